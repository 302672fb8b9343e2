//! 认证模块
//!
//! Wraps the core `SessionStore` for the UI. The store is the source of
//! truth; a signal mirrors its snapshot after every operation so views and
//! the router react to sign-in and sign-out.

use std::rc::Rc;

use furnish_shared::{
    AdminResult, AppConfig, Profile, ProfileUpdate, RestIdentityProvider, Session, SessionStore,
};
use leptos::prelude::*;

use crate::web::{BrowserStorage, GlooHttpClient};

type BrowserSessionStore = SessionStore<RestIdentityProvider<GlooHttpClient>, BrowserStorage>;

/// 认证上下文
#[derive(Clone, Copy)]
pub struct AuthContext {
    store: StoredValue<Rc<BrowserSessionStore>, LocalStorage>,
    /// 会话快照（只读）
    pub state: ReadSignal<Session>,
    set_state: WriteSignal<Session>,
}

impl AuthContext {
    /// Restore the persisted session and wrap it for the UI.
    pub fn new(config: &AppConfig) -> Self {
        let provider =
            RestIdentityProvider::new(GlooHttpClient, &config.identity_url, &config.api_key);
        let store = SessionStore::restore(provider, BrowserStorage);
        let (state, set_state) = signal(store.session());
        Self {
            store: StoredValue::new_local(Rc::new(store)),
            state,
            set_state,
        }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.is_authenticated()))
    }

    pub fn token(&self) -> Option<String> {
        self.store.with_value(|store| store.credential_token())
    }

    fn sync(&self) {
        let session = self.store.with_value(|store| store.session());
        self.set_state.set(session);
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 登录
///
/// Navigation afterwards is left to the router's auth listener.
pub async fn login(ctx: AuthContext, email: String, password: String) -> AdminResult<Profile> {
    let store = ctx.store.get_value();
    let result = store.login(&email, &password).await;
    ctx.sync();
    result
}

/// 注册并登录
pub async fn register(
    ctx: AuthContext,
    email: String,
    password: String,
    display_name: String,
) -> AdminResult<Profile> {
    let store = ctx.store.get_value();
    let result = store.register(&email, &password, &display_name).await;
    ctx.sync();
    result
}

/// 注销并清除状态
pub fn logout(ctx: AuthContext) {
    ctx.store.with_value(|store| store.logout());
    ctx.sync();
}

pub fn update_profile(ctx: AuthContext, update: ProfileUpdate) -> AdminResult<Profile> {
    let result = ctx.store.with_value(|store| store.update_profile(update));
    ctx.sync();
    result
}
