// ============================================================================
// PREFERENCES SERVICE - Última categoría (local) y última cita (sesión)
// ============================================================================

use std::rc::Rc;

use crate::error::QuoteError;
use crate::models::{CategoryFilter, Quote};
use crate::utils::constants::{LAST_CATEGORY_STORAGE_KEY, LAST_QUOTE_SESSION_KEY};
use crate::utils::storage::{load_json, save_json, KeyValueStorage};

#[derive(Clone)]
pub struct PreferencesService {
    persistent: Rc<dyn KeyValueStorage>,
    session: Rc<dyn KeyValueStorage>,
}

impl PreferencesService {
    pub fn new(persistent: Rc<dyn KeyValueStorage>, session: Rc<dyn KeyValueStorage>) -> Self {
        Self { persistent, session }
    }

    pub fn save_last_category(&self, filter: &CategoryFilter) -> Result<(), QuoteError> {
        self.persistent.set_item(LAST_CATEGORY_STORAGE_KEY, &filter.value())
    }

    /// Filtro recordado; All si no hay ninguno o storage falla
    pub fn load_last_category(&self) -> CategoryFilter {
        match self.persistent.get_item(LAST_CATEGORY_STORAGE_KEY) {
            Ok(Some(value)) => CategoryFilter::parse(&value),
            Ok(None) => CategoryFilter::All,
            Err(e) => {
                log::warn!("⚠️ No se pudo leer la última categoría: {}", e);
                CategoryFilter::All
            }
        }
    }

    pub fn save_last_quote(&self, quote: &Quote) -> Result<(), QuoteError> {
        save_json(self.session.as_ref(), LAST_QUOTE_SESSION_KEY, quote)
    }

    /// Última cita mostrada en esta sesión; None si no existe o está corrupta
    pub fn load_last_quote(&self) -> Option<Quote> {
        match load_json::<Quote>(self.session.as_ref(), LAST_QUOTE_SESSION_KEY) {
            Ok(quote) => quote,
            Err(e) => {
                log::warn!("⚠️ Última cita de sesión ilegible: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStorage;

    fn service() -> (PreferencesService, MemoryStorage, MemoryStorage) {
        let local = MemoryStorage::new();
        let session = MemoryStorage::new();
        let prefs = PreferencesService::new(Rc::new(local.clone()), Rc::new(session.clone()));
        (prefs, local, session)
    }

    #[test]
    fn category_goes_to_persistent_storage() {
        let (prefs, local, session) = service();
        assert_eq!(prefs.load_last_category(), CategoryFilter::All);

        prefs.save_last_category(&CategoryFilter::parse("Wit")).unwrap();
        assert_eq!(
            local.get_item(LAST_CATEGORY_STORAGE_KEY).unwrap(),
            Some("category:Wit".to_string())
        );
        assert_eq!(session.write_count(), 0);
        assert_eq!(prefs.load_last_category(), CategoryFilter::parse("Wit"));
    }

    #[test]
    fn category_named_all_survives_reload() {
        let (prefs, _local, _session) = service();
        let literal = CategoryFilter::Category("all".to_string());
        prefs.save_last_category(&literal).unwrap();
        assert_eq!(prefs.load_last_category(), literal);
    }

    #[test]
    fn quote_goes_to_session_storage() {
        let (prefs, local, _session) = service();
        let quote = Quote::new(4, "Be brief", "Style", 1);
        prefs.save_last_quote(&quote).unwrap();
        assert_eq!(local.write_count(), 0);
        assert_eq!(prefs.load_last_quote(), Some(quote));
    }

    #[test]
    fn corrupt_session_quote_is_ignored() {
        let (prefs, _local, session) = service();
        session.set_item(LAST_QUOTE_SESSION_KEY, "{broken").unwrap();
        assert_eq!(prefs.load_last_quote(), None);
    }
}
