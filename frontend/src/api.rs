//! Per-request access to the hosted database and the upload endpoint.

use furnish_shared::{AppConfig, RestDatabase};
use leptos::prelude::*;

use crate::auth::use_auth;
use crate::web::{BrowserUploader, GlooHttpClient};

/// Built fresh from the current session so every request carries the
/// latest credential token.
#[derive(Clone, Debug)]
pub struct AdminApi {
    config: AppConfig,
    token: Option<String>,
}

impl AdminApi {
    pub fn new(config: AppConfig, token: Option<String>) -> Self {
        Self { config, token }
    }

    pub fn database(&self) -> RestDatabase<GlooHttpClient> {
        RestDatabase::new(GlooHttpClient, &self.config.database_url).with_token(self.token.clone())
    }

    pub fn uploader(&self) -> BrowserUploader {
        BrowserUploader::new(&self.config.upload_url)
    }
}

/// Returns a factory for the signed-in user's API. Call the factory inside
/// handlers so a token refreshed after mount is picked up.
pub fn use_api() -> impl Fn() -> AdminApi + Copy + 'static {
    let config = StoredValue::new(use_context::<AppConfig>().expect("AppConfig should be provided"));
    let auth = use_auth();
    move || AdminApi::new(config.get_value(), auth.token())
}
