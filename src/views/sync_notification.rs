// ============================================================================
// SYNC NOTIFICATION VIEW - Aviso de sync con botón Undo
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{ElementBuilder, append_child, on_click};
use crate::state::app_state::AppState;
use crate::viewmodels::{SyncViewModel, schedule_notification_dismiss};

/// Renderizar notificación activa; None si no hay ninguna
pub fn render_sync_notification(state: &AppState) -> Result<Option<Element>, JsValue> {
    let Some(notification) = state.current_notification() else {
        return Ok(None);
    };

    let container = ElementBuilder::new("div")?
        .class("sync-notification")
        .id("notification")?
        .attr("role", "status")?
        .build();

    let message = ElementBuilder::new("span")?
        .class("sync-notification__message")
        .text(&notification.message)
        .build();
    append_child(&container, &message)?;

    if notification.offer_undo {
        let undo_btn = ElementBuilder::new("button")?
            .class("sync-notification__undo")
            .id("undoSync")?
            .text("Undo")
            .build();

        let state_clone = state.clone();
        on_click(&undo_btn, move |_| {
            match SyncViewModel::new().undo(&state_clone) {
                Ok(true) => {
                    if let Some(current) = state_clone.current_notification() {
                        schedule_notification_dismiss(&state_clone, current.seq);
                    }
                }
                Ok(false) => {}
                Err(e) => log::error!("❌ Error deshaciendo sync: {}", e),
            }
        })?;
        append_child(&container, &undo_btn)?;
    }

    let close_btn = ElementBuilder::new("button")?
        .class("sync-notification__close")
        .attr("aria-label", "Dismiss")?
        .text("×")
        .build();

    let state_clone = state.clone();
    let seq = notification.seq;
    on_click(&close_btn, move |_| {
        if state_clone.dismiss_notification(seq) {
            state_clone.notify_subscribers();
        }
    })?;
    append_child(&container, &close_btn)?;

    Ok(Some(container))
}
