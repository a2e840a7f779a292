// ============================================================================
// QUOTE STORE - Lista de citas + snapshot de undo
// ============================================================================
// Toda mutación persiste la lista completa en la clave `quotes`.
// La lista nueva se guarda primero y solo se asigna si la escritura tuvo
// éxito: un error de storage deja el store intacto.
// ============================================================================

use std::collections::HashSet;
use std::rc::Rc;

use crate::error::QuoteError;
use crate::models::{CategoryFilter, ImportedQuote, MergeReport, Quote};
use crate::services::sync_service::merge_remote;
use crate::utils::constants::QUOTES_STORAGE_KEY;
use crate::utils::storage::{load_json, save_json, KeyValueStorage};

pub struct QuoteStore {
    quotes: Vec<Quote>,
    undo_snapshot: Option<Vec<Quote>>,
    storage: Rc<dyn KeyValueStorage>,
}

impl QuoteStore {
    /// Carga desde storage; si no hay nada, guarda la lista inicial.
    /// Contenido corrupto se propaga como QuoteError::Parse.
    pub fn load(storage: Rc<dyn KeyValueStorage>, now: i64) -> Result<Self, QuoteError> {
        match load_json::<Vec<Quote>>(storage.as_ref(), QUOTES_STORAGE_KEY)? {
            Some(quotes) => {
                log::info!("📋 {} citas cargadas desde storage", quotes.len());
                Ok(Self {
                    quotes,
                    undo_snapshot: None,
                    storage,
                })
            }
            None => {
                log::info!("🌱 Storage vacío, usando citas iniciales");
                let store = Self {
                    quotes: Quote::seed(now),
                    undo_snapshot: None,
                    storage,
                };
                store.save()?;
                Ok(store)
            }
        }
    }

    pub fn save(&self) -> Result<(), QuoteError> {
        self.persist(&self.quotes)
    }

    fn persist(&self, quotes: &[Quote]) -> Result<(), QuoteError> {
        save_json(self.storage.as_ref(), QUOTES_STORAGE_KEY, quotes)?;
        log::debug!("💾 {} citas guardadas", quotes.len());
        Ok(())
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn find(&self, id: i64) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.id == id)
    }

    /// Agrega una cita validada con id nuevo y lastUpdated = now
    pub fn add(&mut self, text: &str, category: &str, now: i64) -> Result<Quote, QuoteError> {
        let text = text.trim();
        let category = category.trim();
        if text.is_empty() || category.is_empty() {
            return Err(QuoteError::EmptyField);
        }

        let quote = Quote::new(next_id(&self.quotes, now), text, category, now);
        let mut updated = self.quotes.clone();
        updated.push(quote.clone());
        self.persist(&updated)?;
        self.quotes = updated;
        log::info!("➕ Cita {} agregada en '{}'", quote.id, quote.category);
        Ok(quote)
    }

    /// Importa un array JSON; agrega todo sin deduplicar.
    /// Retorna cuántas citas se agregaron.
    pub fn import_all(&mut self, payload: &str, now: i64) -> Result<usize, QuoteError> {
        let value: serde_json::Value = serde_json::from_str(payload)?;
        if !value.is_array() {
            return Err(QuoteError::InvalidImport);
        }
        let imported: Vec<ImportedQuote> = serde_json::from_value(value)?;

        let count = imported.len();
        let mut updated = self.quotes.clone();
        for item in imported {
            let id = match item.id {
                Some(id) => id,
                None => next_id(&updated, now),
            };
            updated.push(Quote {
                id,
                text: item.text,
                category: item.category,
                last_updated: item.last_updated.unwrap_or(now),
            });
        }

        self.persist(&updated)?;
        self.quotes = updated;
        log::info!("📂 {} citas importadas", count);
        Ok(count)
    }

    /// JSON con formato para descargar como quotes.json
    pub fn export_json(&self) -> Result<String, QuoteError> {
        Ok(serde_json::to_string_pretty(&self.quotes)?)
    }

    /// "all" primero y luego categorías en orden de primera aparición
    pub fn categories(&self) -> Vec<CategoryFilter> {
        let mut categories = vec![CategoryFilter::All];
        for quote in &self.quotes {
            let filter = CategoryFilter::Category(quote.category.clone());
            if !categories.contains(&filter) {
                categories.push(filter);
            }
        }
        categories
    }

    pub fn candidates(&self, filter: &CategoryFilter) -> Vec<&Quote> {
        self.quotes
            .iter()
            .filter(|q| filter.matches(&q.category))
            .collect()
    }

    /// Aplica citas remotas. Todo sync descarta el snapshot anterior;
    /// solo un merge con cambios deja uno nuevo y persiste.
    pub fn apply_remote(&mut self, remote: Vec<Quote>) -> Result<MergeReport, QuoteError> {
        let mut merged = self.quotes.clone();
        let report = merge_remote(&mut merged, remote);

        if !report.changed() {
            if self.undo_snapshot.take().is_some() {
                log::debug!("↩️ Snapshot de undo descartado por sync sin cambios");
            }
            return Ok(report);
        }

        self.persist(&merged)?;
        self.undo_snapshot = Some(std::mem::replace(&mut self.quotes, merged));
        log::info!(
            "🔀 Merge remoto: {} nuevas, {} actualizadas",
            report.inserted,
            report.updated
        );
        Ok(report)
    }

    pub fn has_undo(&self) -> bool {
        self.undo_snapshot.is_some()
    }

    pub fn undo_snapshot(&self) -> Option<&[Quote]> {
        self.undo_snapshot.as_deref()
    }

    /// Restaura el snapshot previo al último sync. false si no había snapshot.
    /// Si la escritura falla el snapshot se conserva.
    pub fn undo(&mut self) -> Result<bool, QuoteError> {
        let Some(snapshot) = self.undo_snapshot.as_deref() else {
            return Ok(false);
        };
        self.persist(snapshot)?;
        if let Some(snapshot) = self.undo_snapshot.take() {
            self.quotes = snapshot;
        }
        log::info!("↩️ Sync deshecho, {} citas restauradas", self.quotes.len());
        Ok(true)
    }
}

/// Id único: timestamp actual salvo que ya exista uno mayor o igual.
/// Con i64::MAX ocupado se usa el menor id positivo libre.
fn next_id(quotes: &[Quote], now: i64) -> i64 {
    let max_id = quotes.iter().map(|q| q.id).max().unwrap_or(0);
    if let Some(after_max) = max_id.checked_add(1) {
        return now.max(after_max);
    }

    let used: HashSet<i64> = quotes.iter().map(|q| q.id).collect();
    (1..i64::MAX).find(|id| !used.contains(id)).unwrap_or(i64::MIN)
}
