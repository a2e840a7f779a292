use serde::{Deserialize, Serialize};

use crate::utils::constants::{SEED_QUOTES, SERVER_CATEGORY};

/// Registro de cita
/// `id` y `lastUpdated` son opcionales en listas guardadas por versiones
/// anteriores; se cargan como 0.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[serde(default)]
    pub id: i64,
    pub text: String,
    pub category: String,
    #[serde(default)]
    pub last_updated: i64,
}

impl Quote {
    pub fn new(id: i64, text: impl Into<String>, category: impl Into<String>, last_updated: i64) -> Self {
        Self {
            id,
            text: text.into(),
            category: category.into(),
            last_updated,
        }
    }

    /// Formato visible: "<texto>" — <categoría>
    pub fn display_text(&self) -> String {
        format!("\"{}\" — {}", self.text, self.category)
    }

    /// Lista inicial cuando no hay nada persistido
    pub fn seed(now: i64) -> Vec<Quote> {
        SEED_QUOTES
            .iter()
            .map(|(id, text, category)| Quote::new(*id, *text, *category, now))
            .collect()
    }
}

/// Registro tal como llega en un archivo importado
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedQuote {
    pub id: Option<i64>,
    pub text: String,
    pub category: String,
    pub last_updated: Option<i64>,
}

/// Item del endpoint remoto; solo se leen `id` y `title`
#[derive(Clone, Debug, Deserialize)]
pub struct RemotePost {
    pub id: i64,
    #[serde(default)]
    pub title: String,
}

impl RemotePost {
    /// Convierte al formato local: categoría fija y lastUpdated = momento del fetch
    pub fn into_quote(self, fetched_at: i64) -> Quote {
        Quote {
            id: self.id,
            text: self.title,
            category: SERVER_CATEGORY.to_string(),
            last_updated: fetched_at,
        }
    }
}
