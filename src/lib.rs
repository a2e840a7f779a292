// ============================================================================
// QUOTE CATALOG - FRONTEND MVVM (RUST PURO)
// ============================================================================
// Arquitectura MVVM:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Lógica UI (pick, filtro, add, import, sync, undo)
// - Services: HTTP, preferencias, export/import de archivos
// - Stores: Lista de citas persistida + snapshot de undo
// - State: State Management con Rc<RefCell>
// - Models: Estructuras serializables
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod stores;
pub mod services;
pub mod viewmodels;
pub mod state;
pub mod dom;
pub mod views;
pub mod utils;
mod app;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::config::CONFIG;

// Variable estática global para mantener la instancia de App
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    // Inicializar logging
    if CONFIG.is_logging_enabled() {
        wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    }
    log::info!("🚀 Quote Catalog - Rust Puro + MVVM");

    // Crear y renderizar app
    let mut app = App::new()?;
    app.render()?;
    app.start_auto_sync();

    // Guardar app en variable global
    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    Ok(())
}

/// Función pública para re-renderizar la app (re-render completo)
pub fn rerender_app() {
    APP.with(|app_cell| {
        match app_cell.try_borrow() {
            Ok(app) => match app.as_ref() {
                Some(app) => {
                    if let Err(e) = app.render() {
                        log::error!("❌ Error re-renderizando: {:?}", e);
                    }
                }
                None => log::warn!("⚠️ [RERENDER] App no está inicializada"),
            },
            Err(_) => log::warn!("⚠️ [RERENDER] App ocupada, render omitido"),
        }
    });
}

/// Función pública WASM para re-renderizar la app (llamable desde JavaScript)
#[wasm_bindgen]
pub fn rerender_app_wasm() {
    rerender_app();
}

/// Función pública WASM para forzar un ciclo de sincronización
#[wasm_bindgen]
pub fn sync_now() {
    APP.with(|app_cell| {
        if let Some(app) = app_cell.borrow().as_ref() {
            let state = app.state().clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = viewmodels::SyncViewModel::new().run_cycle(&state).await;
                log::info!("🔄 Sync manual: {:?}", result);
            });
        }
    });
}
