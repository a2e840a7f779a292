use serde::{Deserialize, Serialize};

/// Estado del ciclo de sincronización (idle ↔ syncing)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SyncState {
    #[default]
    Idle,
    Syncing,
}

/// Resultado del merge remoto → local
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct MergeReport {
    pub inserted: usize,
    pub updated: usize,
}

impl MergeReport {
    pub fn changed(&self) -> bool {
        self.inserted > 0 || self.updated > 0
    }
}

/// Resultado de un ciclo de sincronización
#[derive(Debug, Clone, PartialEq)]
pub enum SyncResult {
    /// Hubo inserciones o sobrescrituras; hay snapshot para undo
    Merged(MergeReport),
    /// Fetch correcto pero nada cambió
    NoChanges,
    /// Otro ciclo estaba en curso
    Skipped,
    /// Fallo de red o de parseo; sin cambios de estado
    Error { message: String },
}

/// Notificación visible (con o sin botón Undo)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Identificador creciente; el timer de auto-ocultado solo cierra la suya
    pub seq: u64,
    pub message: String,
    pub offer_undo: bool,
}
