// ============================================================================
// EVENT HANDLING - Sistema de eventos
// ============================================================================
// GESTIÓN DE MEMORY LEAKS:
// - Listeners en elementos del DOM: al destruir el elemento (set_inner_html("")
//   en cada re-render) el navegador limpia sus listeners, así que
//   closure.forget() es seguro.
// - Listeners globales (window/document) solo se registran UNA VEZ al inicio.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MouseEvent};

/// Helper para crear click handler simple
pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    element.add_event_listener_with_callback(
        "click",
        closure.as_ref().unchecked_ref(),
    )?;
    // Nota: closure.forget() es necesario para mantener el closure vivo en Rust WASM
    closure.forget();
    Ok(())
}

/// Helper para input (se dispara en cada tecla)
pub fn on_input<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    on_event(element, "input", handler)
}

/// Helper para change (<select>, <input type="file">)
pub fn on_change<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    on_event(element, "change", handler)
}

fn on_event<F>(element: &Element, event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    element.add_event_listener_with_callback(
        event_type,
        closure.as_ref().unchecked_ref(),
    )?;
    closure.forget();
    Ok(())
}
