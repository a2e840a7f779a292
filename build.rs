use std::env;
use std::fs;
use std::path::Path;

/// Variables que config.rs / constants.rs leen con option_env!
const CONFIG_KEYS: &[&str] = &[
    "QUOTES_REMOTE_URL",
    "SYNC_INTERVAL_SECONDS",
    "NOTIFICATION_TIMEOUT_SECONDS",
    "REMOTE_BATCH_LIMIT",
    "ENABLE_LOGGING",
    "LOG_LEVEL",
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env");
    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    // .env es opcional: sin él se usan los defaults de AppConfig
    let Ok(contents) = fs::read_to_string(Path::new(".env")) else {
        return;
    };

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim().trim_matches('"');

        if !CONFIG_KEYS.contains(&key) {
            println!("cargo:warning=.env: clave desconocida '{}' ignorada", key);
            continue;
        }

        // Solo configurar si no está ya definida en el entorno
        if env::var(key).is_err() {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}
