//! Furnish Admin 前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `auth`: 会话上下文（包装核心 `SessionStore`）
//! - `web::router`: 路由服务，决策交给核心 `RouteGuard`
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod dashboard;
    mod icons;
    pub mod login;
    pub mod notice;
    pub mod orders;
    pub mod product_form;
    pub mod products;
}
mod config;

use crate::auth::AuthContext;
use crate::components::dashboard::DashboardLayout;
use crate::components::login::LoginPage;
use crate::components::notice::{NoticeToast, provide_notifier};
use crate::components::orders::OrdersPage;
use crate::components::product_form::ProductFormPage;
use crate::components::products::ProductsPage;

use furnish_shared::AppRoute;
use leptos::prelude::*;

// 浏览器 API 适配层：把核心的存储、HTTP 与上传契约落到 gloo-* 上
pub(crate) mod web {
    mod http;
    pub mod router;
    mod storage;

    pub use http::{BrowserUploader, GlooHttpClient};
    pub use storage::BrowserStorage;
}

use web::router::{Router, RouterOutlet};

/// 路由匹配函数
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Products => view! { <DashboardLayout><ProductsPage /></DashboardLayout> }.into_any(),
        AppRoute::ProductNew => {
            view! { <DashboardLayout><ProductFormPage /></DashboardLayout> }.into_any()
        }
        AppRoute::ProductEdit(id) => view! {
            <DashboardLayout><ProductFormPage product_id=id /></DashboardLayout>
        }
        .into_any(),
        AppRoute::Orders => view! { <DashboardLayout><OrdersPage /></DashboardLayout> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 配置与认证上下文（从 LocalStorage 恢复会话）
    let config = config::load_config();
    let auth_ctx = AuthContext::new(&config);
    provide_context(config);
    provide_context(auth_ctx);
    provide_notifier();

    // 2. 认证状态信号注入路由服务
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <NoticeToast />
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
