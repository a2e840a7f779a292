use serde::{Deserialize, Serialize};

use crate::utils::constants::DEFAULT_REMOTE_URL;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub remote_url: String,
    pub sync_interval_seconds: u32,
    pub notification_timeout_seconds: u32,
    pub remote_batch_limit: usize,
    pub enable_logging: bool,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            remote_url: DEFAULT_REMOTE_URL.to_string(),
            sync_interval_seconds: 60,
            notification_timeout_seconds: 8,
            remote_batch_limit: 10,
            enable_logging: true,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("SYNC_INTERVAL_SECONDS"),
            option_env!("NOTIFICATION_TIMEOUT_SECONDS"),
            option_env!("REMOTE_BATCH_LIMIT"),
            option_env!("ENABLE_LOGGING"),
            option_env!("LOG_LEVEL"),
        )
    }

    /// Valores no parseables caen al default
    fn from_values(
        sync_interval: Option<&str>,
        notification_timeout: Option<&str>,
        batch_limit: Option<&str>,
        enable_logging: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            remote_url: defaults.remote_url,
            sync_interval_seconds: sync_interval
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(defaults.sync_interval_seconds),
            notification_timeout_seconds: notification_timeout
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.notification_timeout_seconds),
            remote_batch_limit: batch_limit
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.remote_batch_limit),
            enable_logging: enable_logging
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
            log_level: log_level
                .map(|v| v.to_lowercase())
                .unwrap_or(defaults.log_level),
        }
    }

    pub fn sync_interval_ms(&self) -> u32 {
        self.sync_interval_seconds.saturating_mul(1000)
    }

    pub fn notification_timeout_ms(&self) -> u32 {
        self.notification_timeout_seconds.saturating_mul(1000)
    }

    /// Nivel para wasm_logger; Off si el logging está deshabilitado
    pub fn log_level(&self) -> log::Level {
        match self.log_level.as_str() {
            "error" => log::Level::Error,
            "warn" => log::Level::Warn,
            "debug" => log::Level::Debug,
            "trace" => log::Level::Trace,
            _ => log::Level::Info,
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
