// ============================================================================
// QUOTE VIEWMODEL - Mostrar, filtrar, agregar e importar citas
// ============================================================================
// Opera sobre AppState y notifica a los subscribers al terminar
// ============================================================================

use chrono::Utc;

use crate::error::QuoteError;
use crate::models::{CategoryFilter, Quote};
use crate::state::{AppState, QuoteDisplay};
use crate::utils::constants::MSG_QUOTE_ADDED;

/// Cómo elegir entre los candidatos del filtro
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickMode {
    /// Botón "Show New Quote"
    Random,
    /// Cambio de filtro: primera coincidencia
    First,
}

/// Índice aleatorio en [0, len) con Math.random()
pub fn browser_random_index(len: usize) -> usize {
    (js_sys::Math::random() * len as f64).floor() as usize
}

/// ViewModel de citas - SOLO lógica de negocio
#[derive(Clone)]
pub struct QuoteViewModel {
    random_index: fn(usize) -> usize,
}

impl QuoteViewModel {
    pub fn new() -> Self {
        Self {
            random_index: browser_random_index,
        }
    }

    pub fn with_random(random_index: fn(usize) -> usize) -> Self {
        Self { random_index }
    }

    /// Elige una cita bajo `filter`. Sin candidatos: mensaje fijo y ninguna escritura.
    pub fn pick(&self, state: &AppState, filter: &CategoryFilter, mode: PickMode) -> QuoteDisplay {
        let chosen = {
            let store = state.store.borrow();
            let candidates = store.candidates(filter);
            if candidates.is_empty() {
                None
            } else {
                let index = match mode {
                    PickMode::Random => (self.random_index)(candidates.len()).min(candidates.len() - 1),
                    PickMode::First => 0,
                };
                Some(candidates[index].clone())
            }
        };

        let display = match chosen {
            None => {
                log::info!("🔍 Sin citas para el filtro '{}'", filter);
                QuoteDisplay::NoQuotes
            }
            Some(quote) => {
                if let Err(e) = state.preferences.save_last_quote(&quote) {
                    log::error!("❌ Error guardando última cita: {}", e);
                }
                if let Err(e) = state.preferences.save_last_category(filter) {
                    log::error!("❌ Error guardando última categoría: {}", e);
                }
                QuoteDisplay::Shown(quote)
            }
        };

        *state.display.borrow_mut() = display.clone();
        state.notify_subscribers();
        display
    }

    /// Cita aleatoria bajo el filtro activo
    pub fn show_random_quote(&self, state: &AppState) -> QuoteDisplay {
        let filter = state.selected_category();
        self.pick(state, &filter, PickMode::Random)
    }

    /// Cambia el filtro activo y muestra la primera coincidencia
    pub fn apply_filter(&self, state: &AppState, value: &str) -> QuoteDisplay {
        let filter = CategoryFilter::parse(value);
        *state.selected_category.borrow_mut() = filter.clone();
        self.pick(state, &filter, PickMode::First)
    }

    /// Al arrancar: la última cita de la sesión si sigue existiendo, si no una aleatoria
    pub fn show_initial(&self, state: &AppState) -> QuoteDisplay {
        let restored = state
            .preferences
            .load_last_quote()
            .and_then(|last| state.store.borrow().find(last.id).cloned());

        match restored {
            Some(quote) => {
                log::info!("💾 Restaurando última cita de la sesión ({})", quote.id);
                let display = QuoteDisplay::Shown(quote);
                *state.display.borrow_mut() = display.clone();
                state.notify_subscribers();
                display
            }
            None => self.show_random_quote(state),
        }
    }

    /// Tras sync/undo: re-muestra la cita actual desde el store si sigue existiendo
    /// y pasa el filtro activo; si no, elige otra bajo el filtro.
    pub fn refresh_display(&self, state: &AppState) -> QuoteDisplay {
        let filter = state.selected_category();
        let current = state
            .displayed_quote()
            .and_then(|shown| state.store.borrow().find(shown.id).cloned())
            .filter(|quote| filter.matches(&quote.category));

        match current {
            Some(quote) => {
                if let Err(e) = state.preferences.save_last_quote(&quote) {
                    log::error!("❌ Error guardando última cita: {}", e);
                }
                let display = QuoteDisplay::Shown(quote);
                *state.display.borrow_mut() = display.clone();
                state.notify_subscribers();
                display
            }
            None => self.show_random_quote(state),
        }
    }

    /// Agrega desde el formulario. El error de validación queda en el feedback.
    pub fn add_quote(&self, state: &AppState, text: &str, category: &str) -> Result<Quote, QuoteError> {
        let result = state
            .store
            .borrow_mut()
            .add(text, category, Utc::now().timestamp_millis());

        match &result {
            Ok(_) => {
                state.draft_text.borrow_mut().clear();
                state.draft_category.borrow_mut().clear();
                state.set_feedback(MSG_QUOTE_ADDED, false);
            }
            Err(e) => {
                log::warn!("⚠️ Cita rechazada: {}", e);
                state.set_feedback(e.user_message(), true);
            }
        }

        state.notify_subscribers();
        result
    }

    /// Importa el contenido de un archivo JSON
    pub fn import_quotes(&self, state: &AppState, contents: &str) -> Result<usize, QuoteError> {
        let result = state
            .store
            .borrow_mut()
            .import_all(contents, Utc::now().timestamp_millis());

        match &result {
            Ok(count) => state.set_feedback(format!("Imported {} quotes.", count), false),
            Err(e) => {
                log::warn!("⚠️ Import rechazado: {}", e);
                state.set_feedback(e.user_message(), true);
            }
        }

        state.notify_subscribers();
        result
    }

    pub fn export_json(&self, state: &AppState) -> Result<String, QuoteError> {
        state.store.borrow().export_json()
    }
}

impl Default for QuoteViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::{
        LAST_CATEGORY_STORAGE_KEY, LAST_QUOTE_SESSION_KEY, MSG_EMPTY_FIELDS, MSG_INVALID_IMPORT,
        MSG_NO_QUOTES, QUOTES_STORAGE_KEY,
    };
    use crate::utils::storage::{load_json, save_json, KeyValueStorage, MemoryStorage};
    use std::rc::Rc;

    fn last(len: usize) -> usize {
        len - 1
    }

    fn out_of_range(len: usize) -> usize {
        len + 5
    }

    fn setup(quotes: Option<&[Quote]>) -> (AppState, MemoryStorage, MemoryStorage) {
        let local = MemoryStorage::new();
        let session = MemoryStorage::new();
        if let Some(quotes) = quotes {
            save_json(&local, QUOTES_STORAGE_KEY, quotes).unwrap();
        }
        let state = AppState::new(Rc::new(local.clone()), Rc::new(session.clone())).unwrap();
        (state, local, session)
    }

    fn sample() -> Vec<Quote> {
        vec![
            Quote::new(1, "first wit", "Wit", 1),
            Quote::new(2, "some grit", "Grit", 1),
            Quote::new(3, "second wit", "Wit", 1),
        ]
    }

    #[test]
    fn all_filter_never_shows_no_quotes_message() {
        let (state, _, _) = setup(Some(&sample()));
        for vm in [QuoteViewModel::with_random(|_| 0), QuoteViewModel::with_random(last)] {
            let display = vm.pick(&state, &CategoryFilter::All, PickMode::Random);
            assert_ne!(display.text(), MSG_NO_QUOTES);
        }
    }

    #[test]
    fn unmatched_filter_shows_message_and_writes_nothing() {
        let (state, local, session) = setup(Some(&sample()));
        let local_writes = local.write_count();
        let vm = QuoteViewModel::with_random(|_| 0);

        let display = vm.pick(&state, &CategoryFilter::parse("Nope"), PickMode::Random);
        assert_eq!(display, QuoteDisplay::NoQuotes);
        assert_eq!(state.display_text(), MSG_NO_QUOTES);
        assert_eq!(local.write_count(), local_writes);
        assert_eq!(session.write_count(), 0);
    }

    #[test]
    fn apply_filter_shows_first_match_and_remembers_it() {
        let (state, local, session) = setup(Some(&sample()));
        let vm = QuoteViewModel::with_random(last);

        let display = vm.apply_filter(&state, "Wit");
        assert_eq!(display.quote().unwrap().id, 1);
        assert_eq!(state.display_text(), "\"first wit\" — Wit");
        assert_eq!(
            local.get_item(LAST_CATEGORY_STORAGE_KEY).unwrap(),
            Some("category:Wit".to_string())
        );
        assert!(session.get_item(LAST_QUOTE_SESSION_KEY).unwrap().is_some());
    }

    #[test]
    fn random_pick_respects_active_filter() {
        let (state, _, _) = setup(Some(&sample()));
        *state.selected_category.borrow_mut() = CategoryFilter::parse("Wit");
        let display = QuoteViewModel::with_random(last).show_random_quote(&state);
        assert_eq!(display.quote().unwrap().id, 3);
    }

    #[test]
    fn random_index_is_clamped() {
        let (state, _, _) = setup(Some(&sample()));
        let display = QuoteViewModel::with_random(out_of_range).show_random_quote(&state);
        assert_eq!(display.quote().unwrap().id, 3);
    }

    #[test]
    fn initial_display_restores_session_quote() {
        let (state, _, session) = setup(Some(&sample()));
        save_json(&session, LAST_QUOTE_SESSION_KEY, &sample()[1]).unwrap();
        let display = QuoteViewModel::with_random(|_| 0).show_initial(&state);
        assert_eq!(display.quote().unwrap().id, 2);
    }

    #[test]
    fn initial_display_falls_back_to_random() {
        let (state, _, _) = setup(Some(&sample()));
        let display = QuoteViewModel::with_random(|_| 0).show_initial(&state);
        assert_eq!(display.quote().unwrap().id, 1);
    }

    #[test]
    fn add_quote_reports_validation_failure() {
        let (state, _, _) = setup(Some(&sample()));
        *state.draft_text.borrow_mut() = "draft".to_string();
        let vm = QuoteViewModel::with_random(|_| 0);

        assert!(vm.add_quote(&state, "", "Wit").is_err());
        assert_eq!(state.store.borrow().len(), 3);
        let feedback = state.feedback().unwrap();
        assert!(feedback.is_error);
        assert_eq!(feedback.message, MSG_EMPTY_FIELDS);
        assert_eq!(*state.draft_text.borrow(), "draft");
    }

    #[test]
    fn add_quote_clears_draft_on_success() {
        let (state, _, _) = setup(Some(&sample()));
        *state.draft_text.borrow_mut() = "draft".to_string();
        let vm = QuoteViewModel::with_random(|_| 0);

        let quote = vm.add_quote(&state, "New one", "Fresh").unwrap();
        assert_eq!(state.store.borrow().len(), 4);
        assert_eq!(state.store.borrow().find(quote.id), Some(&quote));
        assert!(state.draft_text.borrow().is_empty());
        assert!(!state.feedback().unwrap().is_error);
        assert!(state.store.borrow().categories().contains(&CategoryFilter::parse("Fresh")));
    }

    #[test]
    fn import_feedback_covers_both_outcomes() {
        let (state, _, _) = setup(Some(&sample()));
        let vm = QuoteViewModel::with_random(|_| 0);

        assert!(vm.import_quotes(&state, "\"just a string\"").is_err());
        assert_eq!(state.feedback().unwrap().message, MSG_INVALID_IMPORT);
        assert_eq!(state.store.borrow().len(), 3);

        let exported = vm.export_json(&state).unwrap();
        assert_eq!(vm.import_quotes(&state, &exported).unwrap(), 3);
        assert_eq!(state.store.borrow().len(), 6);
        assert_eq!(state.feedback().unwrap().message, "Imported 3 quotes.");
    }

    #[test]
    fn refresh_keeps_current_quote_when_it_still_exists() {
        let (state, _, session) = setup(Some(&sample()));
        let vm = QuoteViewModel::with_random(last);
        vm.apply_filter(&state, "Grit");
        state
            .store
            .borrow_mut()
            .apply_remote(vec![Quote::new(2, "rewritten", "Grit", 99)])
            .unwrap();

        let display = vm.refresh_display(&state);
        assert_eq!(display.quote().unwrap().text, "rewritten");
        let remembered: Quote = load_json(&session, LAST_QUOTE_SESSION_KEY).unwrap().unwrap();
        assert_eq!(remembered.text, "rewritten");
    }

    #[test]
    fn refresh_drops_quote_that_left_the_active_filter() {
        let (state, _, _) = setup(Some(&sample()));
        let vm = QuoteViewModel::with_random(|_| 0);
        vm.apply_filter(&state, "Wit");
        state
            .store
            .borrow_mut()
            .apply_remote(vec![Quote::new(1, "rewritten", "Server", 99)])
            .unwrap();

        let display = vm.refresh_display(&state);
        assert_eq!(display.quote().unwrap().id, 3);

        state
            .store
            .borrow_mut()
            .apply_remote(vec![Quote::new(3, "gone too", "Server", 100)])
            .unwrap();
        assert_eq!(vm.refresh_display(&state), QuoteDisplay::NoQuotes);
    }
}
