// ============================================================================
// SYNC VIEWMODEL - LÓGICA DE SINCRONIZACIÓN + UNDO
// ============================================================================
// Un ciclo: try_begin → fetch → merge → snapshot/persistir → notificar.
// Los ciclos se serializan con el flag de SyncStateWrapper.
// ============================================================================

use chrono::Utc;
use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen_futures::spawn_local;

use crate::config::CONFIG;
use crate::error::QuoteError;
use crate::models::{Quote, SyncResult};
use crate::services::SyncService;
use crate::state::AppState;
use crate::utils::constants::MSG_SYNC_UNDONE;
use crate::viewmodels::QuoteViewModel;

/// ViewModel de sincronización - SOLO lógica de negocio
#[derive(Clone)]
pub struct SyncViewModel {
    sync_service: SyncService,
    quotes: QuoteViewModel,
}

impl SyncViewModel {
    pub fn new() -> Self {
        Self::with_quotes(QuoteViewModel::new())
    }

    pub fn with_quotes(quotes: QuoteViewModel) -> Self {
        Self {
            sync_service: SyncService::new(),
            quotes,
        }
    }

    /// Ciclo completo; Skipped si otro ciclo sigue en curso
    pub async fn run_cycle(&self, state: &AppState) -> SyncResult {
        if !state.sync.try_begin(Utc::now().timestamp_millis()) {
            log::info!("🔄 Sincronización ya en progreso, saltando...");
            return SyncResult::Skipped;
        }
        log::info!("🔄 Iniciando sincronización...");
        state.notify_subscribers();

        let fetched = self.sync_service.fetch_remote_quotes().await;
        let result = self.apply_fetch_result(state, fetched);

        if matches!(result, SyncResult::Merged(_)) {
            if let Some(notification) = state.current_notification() {
                schedule_notification_dismiss(state, notification.seq);
            }
        }
        result
    }

    /// Aplica el resultado del fetch y vuelve a Idle
    pub fn apply_fetch_result(
        &self,
        state: &AppState,
        fetched: Result<Vec<Quote>, QuoteError>,
    ) -> SyncResult {
        let remote = match fetched {
            Ok(remote) => remote,
            Err(e) => {
                log::error!("❌ Error en sincronización: {}", e);
                state.sync.finish(Some(e.to_string()));
                state.notify_subscribers();
                return SyncResult::Error {
                    message: e.to_string(),
                };
            }
        };

        let merged = state.store.borrow_mut().apply_remote(remote);
        match merged {
            Ok(report) if report.changed() => {
                state.sync.finish(None);
                self.quotes.refresh_display(state);
                state.show_notification(
                    format!(
                        "Quotes synced with server: {} new, {} updated.",
                        report.inserted, report.updated
                    ),
                    true,
                );
                state.notify_subscribers();
                log::info!("✅ Sincronización completada (CAMBIOS DETECTADOS)");
                SyncResult::Merged(report)
            }
            Ok(_) => {
                state.sync.finish(None);
                // El snapshot ya no existe: un Undo visible quedaría sin efecto
                if let Some(stale) = state.current_notification().filter(|n| n.offer_undo) {
                    state.dismiss_notification(stale.seq);
                }
                state.notify_subscribers();
                log::info!("✅ Sincronización completada (sin cambios)");
                SyncResult::NoChanges
            }
            Err(e) => {
                log::error!("❌ Error guardando merge: {}", e);
                state.sync.finish(Some(e.to_string()));
                state.notify_subscribers();
                SyncResult::Error {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Deshace el último sync. Ok(false) si no había snapshot.
    pub fn undo(&self, state: &AppState) -> Result<bool, QuoteError> {
        let restored = state.store.borrow_mut().undo()?;
        if !restored {
            log::info!("↩️ Nada que deshacer");
            return Ok(false);
        }

        self.quotes.refresh_display(state);
        state.show_notification(MSG_SYNC_UNDONE, false);
        state.notify_subscribers();
        Ok(true)
    }

    /// Ciclo inmediato + uno cada `sync_interval_seconds`.
    /// El Interval devuelto debe mantenerse vivo.
    pub fn start_auto_sync(&self, state: &AppState) -> Interval {
        log::info!(
            "⏰ Configurando sincronización automática cada {} segundos",
            CONFIG.sync_interval_seconds
        );

        self.spawn_cycle(state);

        let vm = self.clone();
        let state = state.clone();
        Interval::new(CONFIG.sync_interval_ms(), move || {
            vm.spawn_cycle(&state);
        })
    }

    fn spawn_cycle(&self, state: &AppState) {
        let vm = self.clone();
        let state = state.clone();
        spawn_local(async move {
            vm.run_cycle(&state).await;
        });
    }

    /// POST de una cita nueva en segundo plano
    pub fn push_new_quote(&self, quote: Quote) {
        let sync_service = self.sync_service.clone();
        spawn_local(async move {
            sync_service.push_quote(&quote).await;
        });
    }
}

impl Default for SyncViewModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Oculta la notificación `seq` tras el timeout configurado, si sigue visible
pub fn schedule_notification_dismiss(state: &AppState, seq: u64) {
    let state = state.clone();
    Timeout::new(CONFIG.notification_timeout_ms(), move || {
        if state.dismiss_notification(seq) {
            state.notify_subscribers();
        }
    })
    .forget();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MergeReport;
    use crate::utils::constants::QUOTES_STORAGE_KEY;
    use crate::utils::storage::{load_json, save_json, MemoryStorage};
    use std::rc::Rc;

    fn setup(quotes: &[Quote]) -> (AppState, MemoryStorage, SyncViewModel) {
        let local = MemoryStorage::new();
        save_json(&local, QUOTES_STORAGE_KEY, quotes).unwrap();
        let state = AppState::new(Rc::new(local.clone()), Rc::new(MemoryStorage::new())).unwrap();
        let vm = SyncViewModel::with_quotes(QuoteViewModel::with_random(|_| 0));
        (state, local, vm)
    }

    fn persisted(storage: &MemoryStorage) -> Vec<Quote> {
        load_json(storage, QUOTES_STORAGE_KEY).unwrap().unwrap()
    }

    #[test]
    fn network_error_changes_nothing() {
        let original = vec![Quote::new(1, "mine", "Local", 10)];
        let (state, local, vm) = setup(&original);
        assert!(state.sync.try_begin(1));
        let writes = local.write_count();

        let result = vm.apply_fetch_result(&state, Err(QuoteError::Network("offline".to_string())));
        assert!(matches!(result, SyncResult::Error { .. }));
        assert!(!state.sync.is_syncing());
        assert!(state.sync.get_last_error().is_some());
        assert_eq!(state.store.borrow().quotes(), original.as_slice());
        assert!(state.current_notification().is_none());
        assert_eq!(local.write_count(), writes);
    }

    #[test]
    fn newer_remote_overwrites_and_offers_undo() {
        let original = vec![Quote::new(1, "mine", "Local", 10)];
        let (state, local, vm) = setup(&original);
        assert!(state.sync.try_begin(1));

        let result = vm.apply_fetch_result(&state, Ok(vec![Quote::new(1, "theirs", "Server", 20)]));
        assert_eq!(result, SyncResult::Merged(MergeReport { inserted: 0, updated: 1 }));
        assert!(!state.sync.is_syncing());
        assert_eq!(state.store.borrow().undo_snapshot(), Some(original.as_slice()));
        assert_eq!(persisted(&local)[0].text, "theirs");
        assert!(state.current_notification().unwrap().offer_undo);
        assert_eq!(state.displayed_quote().unwrap().text, "theirs");
    }

    #[test]
    fn insert_into_empty_store_reports_change() {
        let (state, _, vm) = setup(&[]);
        let result = vm.apply_fetch_result(&state, Ok(vec![Quote::new(2, "hello", "Server", 5)]));
        assert_eq!(result, SyncResult::Merged(MergeReport { inserted: 1, updated: 0 }));
        assert_eq!(state.store.borrow().quotes(), &[Quote::new(2, "hello", "Server", 5)]);
    }

    #[test]
    fn unchanged_merge_shows_no_notification() {
        let (state, _, vm) = setup(&[Quote::new(1, "mine", "Local", 50)]);
        let result = vm.apply_fetch_result(&state, Ok(vec![Quote::new(1, "theirs", "Server", 20)]));
        assert_eq!(result, SyncResult::NoChanges);
        assert!(state.current_notification().is_none());
        assert!(!state.store.borrow().has_undo());
    }

    #[test]
    fn unchanged_next_sync_withdraws_undo_offer() {
        let original = vec![Quote::new(1, "mine", "Local", 10)];
        let (state, _, vm) = setup(&original);
        vm.apply_fetch_result(&state, Ok(vec![Quote::new(1, "theirs", "Server", 20)]));
        assert!(state.current_notification().unwrap().offer_undo);

        let result = vm.apply_fetch_result(&state, Ok(vec![Quote::new(1, "theirs", "Server", 20)]));
        assert_eq!(result, SyncResult::NoChanges);
        assert!(state.current_notification().is_none());
        assert!(!vm.undo(&state).unwrap());
        assert_eq!(state.store.borrow().quotes()[0].text, "theirs");
    }

    #[test]
    fn failed_fetch_keeps_undo_available() {
        let original = vec![Quote::new(1, "mine", "Local", 10)];
        let (state, _, vm) = setup(&original);
        vm.apply_fetch_result(&state, Ok(vec![Quote::new(1, "theirs", "Server", 20)]));

        vm.apply_fetch_result(&state, Err(QuoteError::Network("offline".to_string())));
        assert!(state.store.borrow().has_undo());
        assert!(vm.undo(&state).unwrap());
        assert_eq!(state.store.borrow().quotes(), original.as_slice());
    }

    #[test]
    fn cycle_is_skipped_while_another_is_in_flight() {
        let original = vec![Quote::new(1, "mine", "Local", 10)];
        let (state, local, vm) = setup(&original);
        assert!(state.sync.try_begin(1));
        let writes = local.write_count();

        let result = futures::executor::block_on(vm.run_cycle(&state));
        assert_eq!(result, SyncResult::Skipped);
        assert!(state.sync.is_syncing());
        assert_eq!(state.store.borrow().quotes(), original.as_slice());
        assert!(state.current_notification().is_none());
        assert_eq!(local.write_count(), writes);
    }

    #[test]
    fn failed_save_during_merge_reports_error_and_keeps_list() {
        let original = vec![Quote::new(1, "mine", "Local", 10)];
        let (state, local, vm) = setup(&original);
        local.set_fail_writes(true);

        let result = vm.apply_fetch_result(&state, Ok(vec![Quote::new(1, "theirs", "Server", 20)]));
        assert!(matches!(result, SyncResult::Error { .. }));
        assert_eq!(state.store.borrow().quotes(), original.as_slice());
        assert!(!state.store.borrow().has_undo());
        assert!(state.current_notification().is_none());
    }

    #[test]
    fn undo_restores_pre_sync_list_once() {
        let original = vec![Quote::new(1, "mine", "Local", 10)];
        let (state, local, vm) = setup(&original);
        vm.apply_fetch_result(
            &state,
            Ok(vec![Quote::new(1, "theirs", "Server", 20), Quote::new(2, "extra", "Server", 20)]),
        );

        assert!(vm.undo(&state).unwrap());
        assert_eq!(state.store.borrow().quotes(), original.as_slice());
        assert_eq!(persisted(&local), original);
        let notification = state.current_notification().unwrap();
        assert_eq!(notification.message, MSG_SYNC_UNDONE);
        assert!(!notification.offer_undo);

        let writes = local.write_count();
        assert!(!vm.undo(&state).unwrap());
        assert_eq!(local.write_count(), writes);
    }

    #[test]
    fn undo_without_sync_is_a_no_op() {
        let original = vec![Quote::new(1, "mine", "Local", 10)];
        let (state, local, vm) = setup(&original);
        let before = local.snapshot();

        assert!(!vm.undo(&state).unwrap());
        assert_eq!(state.store.borrow().quotes(), original.as_slice());
        assert_eq!(local.snapshot(), before);
        assert!(state.current_notification().is_none());
    }
}
