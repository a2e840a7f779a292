// ============================================================================
// APP - Aplicación principal
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement};

use crate::dom::{document, get_element_by_id, set_inner_html, append_child};
use crate::state::app_state::AppState;
use crate::viewmodels::{QuoteViewModel, SyncViewModel};
use crate::views::render_app;

/// Aplicación principal
pub struct App {
    state: AppState,
    root: Element,
    auto_sync: Option<Interval>,
}

impl App {
    /// Crear nueva aplicación. Un storage corrupto aborta el arranque.
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::for_browser()?;
        log::info!("📋 Catálogo listo con {} citas", state.store.borrow().len());

        QuoteViewModel::new().show_initial(&state);

        // Suscribirse a cambios de estado para re-renderizar automáticamente.
        // Varias notificaciones en el mismo tick producen un solo render.
        let render_scheduled = Rc::new(Cell::new(false));
        state.subscribe_to_changes(move || {
            if render_scheduled.replace(true) {
                return;
            }
            let render_scheduled = render_scheduled.clone();
            Timeout::new(0, move || {
                render_scheduled.set(false);
                crate::rerender_app();
            })
            .forget();
        });

        Ok(Self {
            state,
            root,
            auto_sync: None,
        })
    }

    /// Renderizar aplicación. El input con foco la recupera tras el re-render.
    pub fn render(&self) -> Result<(), JsValue> {
        let focus = FocusedInput::capture();

        // Limpiar contenido anterior
        set_inner_html(&self.root, "");
        let app_view = render_app(&self.state)?;
        append_child(&self.root, &app_view)?;

        if let Some(focus) = focus {
            focus.restore();
        }
        Ok(())
    }

    /// Ciclo inicial + timer periódico
    pub fn start_auto_sync(&mut self) {
        if self.auto_sync.is_some() {
            log::warn!("⚠️ Auto-sync ya iniciado, ignorando llamada duplicada");
            return;
        }
        self.auto_sync = Some(SyncViewModel::new().start_auto_sync(&self.state));
    }

    /// Obtener referencia al estado
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Elemento con foco (por id) y selección de texto antes de un re-render
struct FocusedInput {
    id: String,
    selection: Option<(u32, u32)>,
}

impl FocusedInput {
    fn capture() -> Option<Self> {
        let active = document()?.active_element()?;
        let id = active.id();
        if id.is_empty() {
            return None;
        }
        let selection = active.dyn_ref::<HtmlInputElement>().and_then(|input| {
            let start = input.selection_start().ok().flatten()?;
            let end = input.selection_end().ok().flatten()?;
            Some((start, end))
        });
        Some(Self { id, selection })
    }

    fn restore(&self) {
        let Some(element) = get_element_by_id(&self.id) else {
            return;
        };
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            if let Err(e) = html.focus() {
                log::debug!("No se pudo restaurar el foco en #{}: {:?}", self.id, e);
                return;
            }
        }
        if let (Some((start, end)), Some(input)) = (self.selection, element.dyn_ref::<HtmlInputElement>()) {
            let _ = input.set_selection_range(start, end);
        }
    }
}
