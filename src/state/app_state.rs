// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;

use crate::error::QuoteError;
use crate::models::{CategoryFilter, Notification, Quote};
use crate::services::PreferencesService;
use crate::state::SyncStateWrapper;
use crate::stores::QuoteStore;
use crate::utils::constants::MSG_NO_QUOTES;
use crate::utils::storage::{BrowserStorage, KeyValueStorage};

/// Contenido de la región de display
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum QuoteDisplay {
    #[default]
    Blank,
    Shown(Quote),
    NoQuotes,
}

impl QuoteDisplay {
    pub fn text(&self) -> String {
        match self {
            QuoteDisplay::Blank => String::new(),
            QuoteDisplay::Shown(quote) => quote.display_text(),
            QuoteDisplay::NoQuotes => MSG_NO_QUOTES.to_string(),
        }
    }

    pub fn quote(&self) -> Option<&Quote> {
        match self {
            QuoteDisplay::Shown(quote) => Some(quote),
            _ => None,
        }
    }
}

/// Mensaje bajo el formulario (validación, import, éxito)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub is_error: bool,
}

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    pub store: Rc<RefCell<QuoteStore>>,
    pub preferences: PreferencesService,
    pub sync: SyncStateWrapper,

    // UI State
    pub selected_category: Rc<RefCell<CategoryFilter>>,
    pub display: Rc<RefCell<QuoteDisplay>>,
    pub notification: Rc<RefCell<Option<Notification>>>,
    notification_seq: Rc<RefCell<u64>>,

    // Formulario (se conserva entre re-renders)
    pub draft_text: Rc<RefCell<String>>,
    pub draft_category: Rc<RefCell<String>>,
    pub form_feedback: Rc<RefCell<Option<Feedback>>>,

    // Reactivity: Callbacks para notificar cambios
    pub change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl AppState {
    /// Crear estado cargando la lista desde `persistent`.
    /// Un storage corrupto se propaga como error.
    pub fn new(
        persistent: Rc<dyn KeyValueStorage>,
        session: Rc<dyn KeyValueStorage>,
    ) -> Result<Self, QuoteError> {
        let store = QuoteStore::load(persistent.clone(), Utc::now().timestamp_millis())?;
        let preferences = PreferencesService::new(persistent, session);
        let selected_category = preferences.load_last_category();

        Ok(Self {
            store: Rc::new(RefCell::new(store)),
            preferences,
            sync: SyncStateWrapper::new(),

            selected_category: Rc::new(RefCell::new(selected_category)),
            display: Rc::new(RefCell::new(QuoteDisplay::Blank)),
            notification: Rc::new(RefCell::new(None)),
            notification_seq: Rc::new(RefCell::new(0)),

            draft_text: Rc::new(RefCell::new(String::new())),
            draft_category: Rc::new(RefCell::new(String::new())),
            form_feedback: Rc::new(RefCell::new(None)),

            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        })
    }

    /// localStorage + sessionStorage del navegador
    pub fn for_browser() -> Result<Self, QuoteError> {
        Self::new(Rc::new(BrowserStorage::Local), Rc::new(BrowserStorage::Session))
    }

    /// Suscribirse a cambios de estado
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a todos los subscribers de cambios
    pub fn notify_subscribers(&self) {
        // Clonar para que un callback pueda suscribir sin conflicto de borrow
        let subscribers: Vec<_> = self.change_subscribers.borrow().iter().cloned().collect();
        for callback in subscribers {
            callback();
        }
    }

    pub fn selected_category(&self) -> CategoryFilter {
        self.selected_category.borrow().clone()
    }

    pub fn display_text(&self) -> String {
        self.display.borrow().text()
    }

    pub fn displayed_quote(&self) -> Option<Quote> {
        self.display.borrow().quote().cloned()
    }

    /// Muestra una notificación y retorna su número de secuencia
    pub fn show_notification(&self, message: impl Into<String>, offer_undo: bool) -> u64 {
        let seq = {
            let mut seq = self.notification_seq.borrow_mut();
            *seq += 1;
            *seq
        };
        *self.notification.borrow_mut() = Some(Notification {
            seq,
            message: message.into(),
            offer_undo,
        });
        seq
    }

    /// Cierra la notificación `seq` si sigue siendo la visible. true si se cerró.
    pub fn dismiss_notification(&self, seq: u64) -> bool {
        let mut current = self.notification.borrow_mut();
        if current.as_ref().map(|n| n.seq) == Some(seq) {
            *current = None;
            true
        } else {
            false
        }
    }

    pub fn current_notification(&self) -> Option<Notification> {
        self.notification.borrow().clone()
    }

    pub fn set_feedback(&self, message: impl Into<String>, is_error: bool) {
        *self.form_feedback.borrow_mut() = Some(Feedback {
            message: message.into(),
            is_error,
        });
    }

    /// Oculta el feedback del formulario. true si había uno visible.
    pub fn clear_feedback(&self) -> bool {
        self.form_feedback.borrow_mut().take().is_some()
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.form_feedback.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::LAST_CATEGORY_STORAGE_KEY;
    use crate::utils::storage::MemoryStorage;
    use std::cell::Cell;

    fn state() -> AppState {
        AppState::new(Rc::new(MemoryStorage::new()), Rc::new(MemoryStorage::new())).unwrap()
    }

    #[test]
    fn restores_remembered_category() {
        let local = MemoryStorage::new();
        local.set_item(LAST_CATEGORY_STORAGE_KEY, "Philosophy").unwrap();
        let state = AppState::new(Rc::new(local), Rc::new(MemoryStorage::new())).unwrap();
        assert_eq!(state.selected_category(), CategoryFilter::parse("Philosophy"));
        assert_eq!(state.store.borrow().len(), 3);
    }

    #[test]
    fn stale_timer_does_not_close_newer_notification() {
        let state = state();
        let first = state.show_notification("one", true);
        let second = state.show_notification("two", true);
        assert!(!state.dismiss_notification(first));
        assert_eq!(state.current_notification().unwrap().message, "two");
        assert!(state.dismiss_notification(second));
        assert!(state.current_notification().is_none());
    }

    #[test]
    fn subscribers_are_notified() {
        let state = state();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        state.subscribe_to_changes(move || counter.set(counter.get() + 1));
        state.notify_subscribers();
        state.notify_subscribers();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn feedback_clears_once() {
        let state = state();
        assert!(!state.clear_feedback());
        state.set_feedback("Quote added successfully!", false);
        assert!(state.clear_feedback());
        assert!(state.feedback().is_none());
        assert!(!state.clear_feedback());
    }

    #[test]
    fn display_text_reflects_content() {
        let state = state();
        assert_eq!(state.display_text(), "");
        *state.display.borrow_mut() = QuoteDisplay::NoQuotes;
        assert_eq!(state.display_text(), MSG_NO_QUOTES);
        assert!(state.displayed_quote().is_none());
    }
}
