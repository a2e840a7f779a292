// ============================================================================
// SYNC STATE - Estado de sincronización + flag de ciclo en curso
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::SyncState;

/// Estado de sincronización
#[derive(Clone)]
pub struct SyncStateWrapper {
    pub sync_state: Rc<RefCell<SyncState>>,
    pub last_sync_attempt: Rc<RefCell<Option<i64>>>,
    pub last_error: Rc<RefCell<Option<String>>>,
}

impl SyncStateWrapper {
    /// Crear nuevo estado de sincronización
    pub fn new() -> Self {
        Self {
            sync_state: Rc::new(RefCell::new(SyncState::Idle)),
            last_sync_attempt: Rc::new(RefCell::new(None)),
            last_error: Rc::new(RefCell::new(None)),
        }
    }

    /// Idle → Syncing. false si ya hay un ciclo en curso.
    pub fn try_begin(&self, now: i64) -> bool {
        let mut state = self.sync_state.borrow_mut();
        if *state == SyncState::Syncing {
            return false;
        }
        *state = SyncState::Syncing;
        *self.last_sync_attempt.borrow_mut() = Some(now);
        true
    }

    /// Syncing → Idle, con o sin error
    pub fn finish(&self, error: Option<String>) {
        *self.sync_state.borrow_mut() = SyncState::Idle;
        *self.last_error.borrow_mut() = error;
    }

    pub fn is_syncing(&self) -> bool {
        *self.sync_state.borrow() == SyncState::Syncing
    }

    /// Obtener last_sync_attempt
    pub fn get_last_sync_attempt(&self) -> Option<i64> {
        *self.last_sync_attempt.borrow()
    }

    pub fn get_last_error(&self) -> Option<String> {
        self.last_error.borrow().clone()
    }
}

impl Default for SyncStateWrapper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_is_refused_until_finish() {
        let sync = SyncStateWrapper::new();
        assert!(sync.try_begin(1));
        assert!(sync.is_syncing());
        assert!(!sync.try_begin(2));
        assert_eq!(sync.get_last_sync_attempt(), Some(1));

        sync.finish(Some("offline".to_string()));
        assert!(!sync.is_syncing());
        assert_eq!(sync.get_last_error().as_deref(), Some("offline"));

        assert!(sync.try_begin(3));
        sync.finish(None);
        assert_eq!(sync.get_last_error(), None);
    }
}
