//! Session store
//!
//! Owns the credential token and user profile, mirrors them into durable
//! storage, and is the only place the authentication status changes.
//!
//! The store is single-threaded (`RefCell` state, `?Send` provider) and never
//! holds a borrow across an `.await`. Two guards sit on top of the plain
//! login/register/logout flow:
//! - only one login/register may be outstanding; a second one is rejected
//!   with [`AdminErrorKind::Busy`](crate::error::AdminErrorKind::Busy)
//! - every operation runs under a generation number; `logout` bumps it, and a
//!   provider answer that comes back under an older generation is dropped

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use crate::error::{AdminError, AdminResult};
use crate::identity::{IdentityGrant, IdentityProvider};
use crate::storage::SessionStorage;

#[cfg(test)]
mod tests;

pub const STORAGE_TOKEN_KEY: &str = "token";
pub const STORAGE_PROFILE_KEY: &str = "user";

/// Signed-in user. Persisted as JSON under [`STORAGE_PROFILE_KEY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "email")]
    pub email_address: String,
    #[serde(rename = "localId")]
    pub internal_id: String,
    #[serde(rename = "displayName", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Profile {
    /// Name shown in the navbar.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.email_address)
    }
}

/// Fields `update_profile` may change. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub email_address: Option<String>,
    pub display_name: Option<String>,
}

/// Current session state.
///
/// `is_authenticated()` is derived from the token, and a token is only ever
/// stored together with a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    credential_token: Option<String>,
    profile: Option<Profile>,
    pending_operation: bool,
    last_error: Option<AdminError>,
    generation: u64,
}

impl Session {
    pub fn credential_token(&self) -> Option<&str> {
        self.credential_token.as_deref()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential_token.is_some()
    }

    pub fn pending_operation(&self) -> bool {
        self.pending_operation
    }

    pub fn last_error(&self) -> Option<&AdminError> {
        self.last_error.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What the route guard and the UI read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStatus {
    pub is_authenticated: bool,
    pub pending_operation: bool,
    pub last_error: Option<AdminError>,
}

pub struct SessionStore<P, S> {
    provider: P,
    storage: S,
    state: RefCell<Session>,
}

impl<P: IdentityProvider, S: SessionStorage> SessionStore<P, S> {
    /// Create the store from whatever session was persisted last time.
    ///
    /// A token without a readable profile counts as logged out, and both keys
    /// are erased.
    pub fn restore(provider: P, storage: S) -> Self {
        let session = load_session(&storage);
        if session.is_authenticated() {
            log::info!("[Session] restored persisted session");
        }
        Self {
            provider,
            storage,
            state: RefCell::new(session),
        }
    }

    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> SessionStatus {
        let state = self.state.borrow();
        SessionStatus {
            is_authenticated: state.is_authenticated(),
            pending_operation: state.pending_operation,
            last_error: state.last_error.clone(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn credential_token(&self) -> Option<String> {
        self.state.borrow().credential_token.clone()
    }

    pub async fn login(&self, email: &str, password: &str) -> AdminResult<Profile> {
        let generation = self.begin("login")?;
        let result = self.provider.sign_in(email, password).await;
        self.finish(generation, result, None, "session.login")
    }

    /// Same contract as [`login`](Self::login); `display_name` is stamped into
    /// the stored profile.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> AdminResult<Profile> {
        let generation = self.begin("register")?;
        let result = self.provider.sign_up(email, password).await;
        let display_name = Some(display_name.trim().to_string()).filter(|n| !n.is_empty());
        self.finish(generation, result, display_name, "session.register")
    }

    /// Drop the session and erase persisted storage. Any login/register still
    /// in flight will be discarded when it resolves.
    pub fn logout(&self) {
        {
            let mut state = self.state.borrow_mut();
            let generation = state.generation + 1;
            *state = Session {
                generation,
                ..Session::default()
            };
        }
        self.storage.delete(STORAGE_TOKEN_KEY);
        self.storage.delete(STORAGE_PROFILE_KEY);
        log::info!("[Session] logged out");
    }

    /// Merge `update` into the profile and persist it. The token is untouched.
    pub fn update_profile(&self, update: ProfileUpdate) -> AdminResult<Profile> {
        let mut profile = self
            .state
            .borrow()
            .profile
            .clone()
            .ok_or_else(|| AdminError::not_authenticated().in_op("session.update_profile"))?;

        if let Some(email) = update.email_address {
            profile.email_address = email;
        }
        if let Some(name) = update.display_name {
            profile.display_name = Some(name);
        }

        let raw = serde_json::to_string(&profile)?;
        self.storage
            .set(STORAGE_PROFILE_KEY, &raw)
            .map_err(|e| e.in_op("session.update_profile"))?;

        self.state.borrow_mut().profile = Some(profile.clone());
        Ok(profile)
    }

    fn begin(&self, op: &str) -> AdminResult<u64> {
        let mut state = self.state.borrow_mut();
        if state.pending_operation {
            log::warn!("[Session] {} rejected: another request is pending", op);
            return Err(AdminError::busy().in_op(format!("session.{}", op)));
        }
        state.generation += 1;
        state.pending_operation = true;
        state.last_error = None;
        Ok(state.generation)
    }

    fn finish(
        &self,
        generation: u64,
        result: AdminResult<IdentityGrant>,
        display_name: Option<String>,
        op: &str,
    ) -> AdminResult<Profile> {
        let mut state = self.state.borrow_mut();
        if state.generation != generation {
            log::warn!(
                "[Session] discarding {} response from generation {} (current {})",
                op,
                generation,
                state.generation
            );
            return Err(AdminError::superseded().in_op(op));
        }
        state.pending_operation = false;

        match result {
            Ok(grant) => {
                let profile = Profile {
                    email_address: grant.email,
                    internal_id: grant.user_id,
                    display_name: display_name.or(grant.display_name),
                };
                if let Err(e) = persist(&self.storage, &grant.token, &profile) {
                    // the in-memory session is still valid for this tab
                    log::warn!("[Session] could not persist session: {}", e);
                }
                state.credential_token = Some(grant.token);
                state.profile = Some(profile.clone());
                state.last_error = None;
                log::info!("[Session] {} succeeded for {}", op, profile.email_address);
                Ok(profile)
            }
            Err(err) => {
                let err = err.in_op(op);
                log::warn!("[Session] {} failed: {}", op, err);
                state.last_error = Some(err.clone());
                Err(err)
            }
        }
    }
}

fn persist<S: SessionStorage>(storage: &S, token: &str, profile: &Profile) -> AdminResult<()> {
    let raw = serde_json::to_string(profile)?;
    storage.set(STORAGE_TOKEN_KEY, token)?;
    storage.set(STORAGE_PROFILE_KEY, &raw)
}

fn load_session<S: SessionStorage>(storage: &S) -> Session {
    let Some(token) = storage.get(STORAGE_TOKEN_KEY) else {
        storage.delete(STORAGE_PROFILE_KEY);
        return Session::default();
    };

    let profile = storage
        .get(STORAGE_PROFILE_KEY)
        .and_then(|raw| serde_json::from_str::<Profile>(&raw).ok());

    match profile {
        Some(profile) => Session {
            credential_token: Some(token),
            profile: Some(profile),
            ..Session::default()
        },
        None => {
            log::warn!("[Session] persisted token has no readable profile; clearing");
            storage.delete(STORAGE_TOKEN_KEY);
            storage.delete(STORAGE_PROFILE_KEY);
            Session::default()
        }
    }
}
