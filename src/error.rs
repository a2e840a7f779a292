// ============================================================================
// ERRORES - Taxonomía de errores del catálogo
// ============================================================================
// Validación → mensaje al usuario, sin cambios de estado
// Parse      → visible en import, propagado en la carga inicial
// Network    → solo log, el siguiente tick del timer es la única recuperación
// ============================================================================

use wasm_bindgen::JsValue;

use crate::utils::constants::{MSG_EMPTY_FIELDS, MSG_INVALID_IMPORT};

#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    /// Texto o categoría vacíos después de trim
    #[error("{}", MSG_EMPTY_FIELDS)]
    EmptyField,

    /// El archivo importado no contiene un array JSON
    #[error("{}", MSG_INVALID_IMPORT)]
    InvalidImport,

    /// JSON malformado (storage o archivo importado)
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
}

impl QuoteError {
    /// Mensaje para la región de feedback del formulario
    pub fn user_message(&self) -> String {
        match self {
            QuoteError::Parse(e) => format!("Could not read file: {}", e),
            other => other.to_string(),
        }
    }
}

impl From<QuoteError> for JsValue {
    fn from(err: QuoteError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
