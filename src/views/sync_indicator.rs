// ============================================================================
// SYNC INDICATOR VIEW - Indicador de estado de sincronización
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{ElementBuilder, add_class, set_attribute};
use crate::state::app_state::AppState;

/// Renderizar indicador de sincronización
/// Retorna None cuando está Idle sin error (no mostrar nada)
pub fn render_sync_indicator(state: &AppState) -> Result<Option<Element>, JsValue> {
    let (text_content, is_error_state) = if state.sync.is_syncing() {
        ("⏳ Syncing...".to_string(), false)
    } else if let Some(message) = state.sync.get_last_error() {
        (format!("📴 Sync failed: {}", message), true)
    } else {
        return Ok(None);
    };

    let indicator = ElementBuilder::new("div")?
        .class("sync-indicator")
        .text(&text_content)
        .build();

    if let Some(attempt) = state
        .sync
        .get_last_sync_attempt()
        .and_then(chrono::DateTime::<chrono::Utc>::from_timestamp_millis)
    {
        set_attribute(
            &indicator,
            "title",
            &format!("Last attempt: {}", attempt.format("%H:%M:%S UTC")),
        )?;
    }

    // Aplicar clase de error para estados offline/error
    if is_error_state {
        add_class(&indicator, "sync-indicator--error")?;
    }

    Ok(Some(indicator))
}
