//! 路由定义与守卫
//!
//! Pure routing rules: no DOM, no history API. The frontend router asks the
//! guard where a navigation should end up and only then touches the browser.

use std::fmt::{self, Display};

use crate::product::ProductId;

const EDIT_PREFIX: &str = "/products/edit/";

/// Views of the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRoute {
    Login,
    /// Product list; also the landing page.
    Products,
    ProductNew,
    ProductEdit(ProductId),
    Orders,
}

impl AppRoute {
    /// Parse a URL path. `None` for paths the console does not know.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        match path {
            "/login" => Some(Self::Login),
            "/" | "/products" => Some(Self::Products),
            "/products/new" => Some(Self::ProductNew),
            "/orders" => Some(Self::Orders),
            _ => path
                .strip_prefix(EDIT_PREFIX)
                .filter(|id| !id.is_empty() && !id.contains('/'))
                .map(|id| Self::ProductEdit(id.to_string())),
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Products => "/products".to_string(),
            Self::ProductNew => "/products/new".to_string(),
            Self::ProductEdit(id) => format!("{}{}", EDIT_PREFIX, id),
            Self::Orders => "/orders".to_string(),
        }
    }

    /// Everything except the login page needs a session.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login)
    }

    /// Signed-in users have no business on the login page.
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    pub fn auth_success_redirect() -> Self {
        Self::Products
    }

    /// Where unknown paths land.
    pub fn fallback() -> Self {
        Self::Products
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// Outcome of a guarded navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Show the requested route.
    Allow(AppRoute),
    /// Show this route instead and replace the URL.
    Redirect(AppRoute),
}

impl RouteDecision {
    pub fn route(&self) -> &AppRoute {
        match self {
            RouteDecision::Allow(route) | RouteDecision::Redirect(route) => route,
        }
    }

    pub fn into_route(self) -> AppRoute {
        match self {
            RouteDecision::Allow(route) | RouteDecision::Redirect(route) => route,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, RouteDecision::Redirect(_))
    }
}

/// Gates views on the session's authentication status.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard;

impl RouteGuard {
    /// Decide where a navigation to `path` ends up.
    pub fn resolve(path: &str, is_authenticated: bool) -> RouteDecision {
        match AppRoute::from_path(path) {
            Some(route) => Self::check(route, is_authenticated),
            None => RouteDecision::Redirect(Self::check(AppRoute::fallback(), is_authenticated).into_route()),
        }
    }

    /// Apply the authentication rules to an already parsed route.
    pub fn check(route: AppRoute, is_authenticated: bool) -> RouteDecision {
        if route.requires_auth() && !is_authenticated {
            return RouteDecision::Redirect(AppRoute::auth_failure_redirect());
        }
        if route.should_redirect_when_authenticated() && is_authenticated {
            return RouteDecision::Redirect(AppRoute::auth_success_redirect());
        }
        RouteDecision::Allow(route)
    }

    /// Route to move to when the authentication status flips while `current`
    /// is displayed, if any.
    pub fn on_auth_change(current: &AppRoute, is_authenticated: bool) -> Option<AppRoute> {
        match Self::check(current.clone(), is_authenticated) {
            RouteDecision::Redirect(route) => Some(route),
            RouteDecision::Allow(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip_through_routes() {
        for route in [
            AppRoute::Login,
            AppRoute::Products,
            AppRoute::ProductNew,
            AppRoute::ProductEdit("-Nabc".into()),
            AppRoute::Orders,
        ] {
            assert_eq!(AppRoute::from_path(&route.to_path()), Some(route));
        }
    }

    #[test]
    fn root_and_trailing_slash_map_to_products() {
        assert_eq!(AppRoute::from_path("/"), Some(AppRoute::Products));
        assert_eq!(AppRoute::from_path(""), Some(AppRoute::Products));
        assert_eq!(AppRoute::from_path("/orders/"), Some(AppRoute::Orders));
    }

    #[test]
    fn malformed_edit_paths_are_unknown() {
        assert_eq!(AppRoute::from_path("/products/edit/"), None);
        assert_eq!(AppRoute::from_path("/products/edit/a/b"), None);
        assert_eq!(AppRoute::from_path("/settings"), None);
    }

    #[test]
    fn unauthenticated_access_redirects_to_login() {
        for path in ["/", "/products/new", "/products/edit/p1", "/orders"] {
            assert_eq!(
                RouteGuard::resolve(path, false),
                RouteDecision::Redirect(AppRoute::Login),
                "{path}"
            );
        }
        assert_eq!(
            RouteGuard::resolve("/login", false),
            RouteDecision::Allow(AppRoute::Login)
        );
    }

    #[test]
    fn authenticated_login_visit_goes_to_products() {
        assert_eq!(
            RouteGuard::resolve("/login", true),
            RouteDecision::Redirect(AppRoute::Products)
        );
        assert_eq!(
            RouteGuard::resolve("/orders", true),
            RouteDecision::Allow(AppRoute::Orders)
        );
    }

    #[test]
    fn unknown_paths_redirect_to_landing_or_login() {
        assert_eq!(
            RouteGuard::resolve("/nope", true),
            RouteDecision::Redirect(AppRoute::Products)
        );
        assert_eq!(
            RouteGuard::resolve("/nope", false),
            RouteDecision::Redirect(AppRoute::Login)
        );
    }

    #[test]
    fn auth_changes_move_the_view() {
        assert_eq!(
            RouteGuard::on_auth_change(&AppRoute::Orders, false),
            Some(AppRoute::Login)
        );
        assert_eq!(
            RouteGuard::on_auth_change(&AppRoute::Login, true),
            Some(AppRoute::Products)
        );
        assert_eq!(RouteGuard::on_auth_change(&AppRoute::Orders, true), None);
    }
}
