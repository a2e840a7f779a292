// ============================================================================
// TRANSFER CONTROLS VIEW - Export / Import JSON
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlInputElement};
use crate::dom::{ElementBuilder, append_child, on_click, on_change};
use crate::services::TransferService;
use crate::state::app_state::AppState;
use crate::utils::constants::EXPORT_FILE_NAME;
use crate::viewmodels::QuoteViewModel;

/// Botón de export + input de archivo para import
pub fn render_transfer_controls(state: &AppState) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?
        .class("transfer-controls")
        .build();

    let export_btn = ElementBuilder::new("button")?
        .class("btn-export")
        .id("exportQuotes")?
        .text("Export Quotes")
        .build();

    {
        let state_clone = state.clone();
        on_click(&export_btn, move |_| {
            let result = QuoteViewModel::new()
                .export_json(&state_clone)
                .map_err(JsValue::from)
                .and_then(|json| TransferService::download_json(&json, EXPORT_FILE_NAME));
            if let Err(e) = result {
                log::error!("❌ Error exportando citas: {:?}", e);
            }
        })?;
    }

    let import_label = ElementBuilder::new("label")?
        .class("import-label")
        .attr("for", "importFile")?
        .text("Import Quotes")
        .build();

    let import_input = ElementBuilder::new("input")?
        .id("importFile")?
        .attr("type", "file")?
        .attr("accept", ".json,application/json")?
        .build();

    {
        let state_clone = state.clone();
        on_change(&import_input, move |e: web_sys::Event| {
            let file = e
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));

            let Some(file) = file else {
                return;
            };

            let state_inner = state_clone.clone();
            spawn_local(async move {
                match TransferService::read_text(file).await {
                    Ok(contents) => {
                        let _ = QuoteViewModel::new().import_quotes(&state_inner, &contents);
                    }
                    Err(e) => {
                        log::error!("❌ Error leyendo archivo: {:?}", e);
                        state_inner.set_feedback("Could not read file.", true);
                        state_inner.notify_subscribers();
                    }
                }
            });
        })?;
    }

    append_child(&container, &export_btn)?;
    append_child(&container, &import_label)?;
    append_child(&container, &import_input)?;

    Ok(container)
}
