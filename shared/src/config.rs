//! 运行时配置
//!
//! Endpoints of the hosted services the console talks to. Values come from a
//! key lookup (compile-time env in the browser build) and fall back to the
//! defaults below when a key is absent or blank.

pub const KEY_IDENTITY_URL: &str = "FURNISH_IDENTITY_URL";
pub const KEY_API_KEY: &str = "FURNISH_API_KEY";
pub const KEY_DATABASE_URL: &str = "FURNISH_DATABASE_URL";
pub const KEY_UPLOAD_URL: &str = "FURNISH_UPLOAD_URL";

const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const DEFAULT_DATABASE_URL: &str = "https://furnish-admin-default-rtdb.firebaseio.com";
const DEFAULT_UPLOAD_URL: &str = "https://api.example.com/upload";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub identity_url: String,
    pub api_key: String,
    pub database_url: String,
    pub upload_url: String,
}

impl AppConfig {
    /// Build the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            identity_url: trim_url(read(KEY_IDENTITY_URL, DEFAULT_IDENTITY_URL)),
            api_key: read(KEY_API_KEY, ""),
            database_url: trim_url(read(KEY_DATABASE_URL, DEFAULT_DATABASE_URL)),
            upload_url: read(KEY_UPLOAD_URL, DEFAULT_UPLOAD_URL),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
