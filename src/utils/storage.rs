// ============================================================================
// STORAGE - Abstracción clave/valor sobre localStorage / sessionStorage
// ============================================================================
// La lógica de negocio solo ve el trait; en el navegador se usa
// BrowserStorage y en tests MemoryStorage.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use serde::{de::DeserializeOwned, Serialize};
use web_sys::{window, Storage};

use crate::error::QuoteError;

/// Almacenamiento clave/valor de texto
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, QuoteError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), QuoteError>;
}

/// Helpers JSON sobre cualquier storage
pub fn save_json<T: Serialize + ?Sized>(
    storage: &dyn KeyValueStorage,
    key: &str,
    value: &T,
) -> Result<(), QuoteError> {
    let json = serde_json::to_string(value)?;
    storage.set_item(key, &json)
}

/// Ok(None) si la clave no existe; Err(Parse) si el contenido está corrupto
pub fn load_json<T: DeserializeOwned>(
    storage: &dyn KeyValueStorage,
    key: &str,
) -> Result<Option<T>, QuoteError> {
    match storage.get_item(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrowserStorage {
    /// Sobrevive a recargas
    Local,
    /// Se borra al cerrar la pestaña
    Session,
}

impl BrowserStorage {
    fn raw(&self) -> Result<Storage, QuoteError> {
        let win = window().ok_or_else(|| QuoteError::StorageUnavailable("no window".to_string()))?;
        let storage = match self {
            BrowserStorage::Local => win.local_storage(),
            BrowserStorage::Session => win.session_storage(),
        };
        storage
            .ok()
            .flatten()
            .ok_or_else(|| QuoteError::StorageUnavailable(format!("{:?} storage", self)))
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, QuoteError> {
        self.raw()?
            .get_item(key)
            .map_err(|_| QuoteError::Storage(format!("Error leyendo '{}'", key)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), QuoteError> {
        self.raw()?
            .set_item(key, value)
            .map_err(|_| QuoteError::Storage(format!("Error guardando '{}'", key)))
    }
}

/// Storage en memoria; los clones comparten contenido
#[derive(Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
    writes: Rc<RefCell<usize>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Número de escrituras exitosas
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }

    /// Simula un storage lleno: toda escritura falla
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn snapshot(&self) -> HashMap<String, String> {
        self.items.borrow().clone()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, QuoteError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), QuoteError> {
        if self.fail_writes.get() {
            return Err(QuoteError::Storage(format!("Quota excedida guardando '{}'", key)));
        }
        *self.writes.borrow_mut() += 1;
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
