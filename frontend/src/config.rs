//! Build-time configuration.
//!
//! The browser has no process environment, so endpoints are baked in at
//! compile time via `option_env!` and resolved through `AppConfig`.

use furnish_shared::AppConfig;
use furnish_shared::config::{KEY_API_KEY, KEY_DATABASE_URL, KEY_IDENTITY_URL, KEY_UPLOAD_URL};

fn compiled_env(key: &str) -> Option<String> {
    let value = match key {
        KEY_IDENTITY_URL => option_env!("FURNISH_IDENTITY_URL"),
        KEY_API_KEY => option_env!("FURNISH_API_KEY"),
        KEY_DATABASE_URL => option_env!("FURNISH_DATABASE_URL"),
        KEY_UPLOAD_URL => option_env!("FURNISH_UPLOAD_URL"),
        _ => None,
    };
    value.map(str::to_string)
}

pub fn load_config() -> AppConfig {
    let config = AppConfig::from_lookup(compiled_env);
    if config.api_key.is_empty() {
        log::warn!("[Config] FURNISH_API_KEY not set at build time; sign-in will fail");
    }
    config
}
