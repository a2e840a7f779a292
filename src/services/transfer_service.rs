// ============================================================================
// TRANSFER SERVICE - Export (descarga) e import (lectura de archivo)
// ============================================================================
// Solo I/O del navegador; el parseo vive en QuoteStore::import_all
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, HtmlAnchorElement, Url};

use crate::dom::create_element;

pub struct TransferService;

impl TransferService {
    /// Descarga `json` como archivo `file_name`
    pub fn download_json(json: &str, file_name: &str) -> Result<(), JsValue> {
        let parts = js_sys::Array::of1(&JsValue::from_str(json));
        let options = BlobPropertyBag::new();
        options.set_type("application/json");
        let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
        let url = Url::create_object_url_with_blob(&blob)?;

        let anchor = create_element("a")?.dyn_into::<HtmlAnchorElement>()?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        anchor.click();

        Url::revoke_object_url(&url)?;
        log::info!("📦 Export descargado como {}", file_name);
        Ok(())
    }

    /// Lee el contenido de un archivo seleccionado como texto
    pub async fn read_text(file: File) -> Result<String, JsValue> {
        log::info!("📂 Leyendo archivo {}", file.name());
        let text = JsFuture::from(file.text()).await?;
        text.as_string()
            .ok_or_else(|| JsValue::from_str("File content is not text"))
    }
}
