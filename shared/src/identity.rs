//! Identity provider client.
//!
//! Authentication itself is delegated to a hosted identity service using the
//! Identity Toolkit REST shape: `accounts:signInWithPassword` and
//! `accounts:signUp`, keyed by a public API key.

use serde::{Deserialize, Serialize};

use crate::error::{AdminError, AdminResult};
use crate::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};

/// Successful sign-in/sign-up answer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdentityGrant {
    #[serde(rename = "idToken")]
    pub token: String,
    #[serde(rename = "localId")]
    pub user_id: String,
    pub email: String,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
struct ProviderErrorEnvelope {
    error: ProviderErrorBody,
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    code: serde_json::Value,
    #[serde(default)]
    message: String,
}

#[async_trait::async_trait(?Send)]
pub trait IdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> AdminResult<IdentityGrant>;
    async fn sign_up(&self, email: &str, password: &str) -> AdminResult<IdentityGrant>;
}

pub struct RestIdentityProvider<C> {
    client: C,
    base_url: String,
    api_key: String,
}

impl<C: HttpClient> RestIdentityProvider<C> {
    pub fn new(client: C, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn url(&self, action: &str) -> String {
        format!("{}/accounts:{}?key={}", self.base_url, action, self.api_key)
    }

    async fn exchange(&self, action: &str, email: &str, password: &str) -> AdminResult<IdentityGrant> {
        let body = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        let req = HttpRequest::new(&self.url(action), HttpMethod::Post).with_json(&body)?;
        let resp = self.client.send(req).await?;

        if !resp.ok() {
            return Err(provider_error(&resp));
        }
        resp.json::<IdentityGrant>()
    }
}

#[async_trait::async_trait(?Send)]
impl<C: HttpClient> IdentityProvider for RestIdentityProvider<C> {
    async fn sign_in(&self, email: &str, password: &str) -> AdminResult<IdentityGrant> {
        self.exchange("signInWithPassword", email, password)
            .await
            .map_err(|e| e.in_op("identity.sign_in"))
    }

    async fn sign_up(&self, email: &str, password: &str) -> AdminResult<IdentityGrant> {
        self.exchange("signUp", email, password)
            .await
            .map_err(|e| e.in_op("identity.sign_up"))
    }
}

/// Turn a non-2xx answer into the provider's own error payload when it sent
/// one, otherwise into a generic provider error carrying the status.
fn provider_error(resp: &HttpResponse) -> AdminError {
    match resp.json::<ProviderErrorEnvelope>() {
        Ok(envelope) => {
            let code = match envelope.error.code {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => resp.status.to_string(),
                other => other.to_string(),
            };
            AdminError::provider(code, envelope.error.message)
        }
        Err(_) => AdminError::provider(
            resp.status.to_string(),
            format!("identity provider answered with status {}", resp.status),
        ),
    }
}
