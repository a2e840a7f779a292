// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP
// ============================================================================

use gloo_net::http::Request;

use crate::config::CONFIG;
use crate::error::QuoteError;
use crate::models::{Quote, RemotePost};

/// Cliente del endpoint remoto de citas
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: CONFIG.remote_url.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET de la colección remota completa
    pub async fn fetch_posts(&self) -> Result<Vec<RemotePost>, QuoteError> {
        let response = Request::get(&self.base_url)
            .send()
            .await
            .map_err(|e| QuoteError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| response.status_text());
            return Err(QuoteError::Http { status, message });
        }

        response
            .json::<Vec<RemotePost>>()
            .await
            .map_err(|e| QuoteError::Network(format!("Parse error: {}", e)))
    }

    /// POST de una cita nueva; la respuesta solo se usa para logging
    pub async fn post_quote(&self, quote: &Quote) -> Result<serde_json::Value, QuoteError> {
        let response = Request::post(&self.base_url)
            .json(quote)
            .map_err(|e| QuoteError::Network(format!("Request build error: {}", e)))?
            .send()
            .await
            .map_err(|e| QuoteError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(QuoteError::Http {
                status: response.status(),
                message: response.status_text(),
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| QuoteError::Network(format!("Parse error: {}", e)))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
