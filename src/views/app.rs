// ============================================================================
// APP VIEW - Composición de la pantalla completa
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{ElementBuilder, append_child};
use crate::state::app_state::AppState;
use crate::views::{
    render_add_quote_form, render_quote_controls, render_quote_display, render_sync_indicator,
    render_sync_notification, render_transfer_controls,
};

/// Renderizar aplicación completa desde el estado
pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?
        .class("quote-app")
        .build();

    let header = ElementBuilder::new("header")?
        .class("app-header")
        .child(ElementBuilder::new("h1")?.text("Dynamic Quote Generator").build())?
        .build();
    append_child(&container, &header)?;

    if let Some(indicator) = render_sync_indicator(state)? {
        append_child(&container, &indicator)?;
    }

    if let Some(notification) = render_sync_notification(state)? {
        append_child(&container, &notification)?;
    }

    append_child(&container, &render_quote_display(state)?)?;
    append_child(&container, &render_quote_controls(state)?)?;
    append_child(&container, &render_add_quote_form(state)?)?;
    append_child(&container, &render_transfer_controls(state)?)?;

    Ok(container)
}
