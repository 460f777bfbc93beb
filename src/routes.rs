//! Client-side route table and its guard loaders.

use std::fmt;

use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Products,
    Carts,
    Transactions,
    TopBuyer,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Products => "/products",
            Route::Carts => "/carts",
            Route::Transactions => "/transactions",
            Route::TopBuyer => "/top-buyer",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Login => "Login",
            Route::Register => "Register",
            Route::Products => "Products",
            Route::Carts => "Cart",
            Route::Transactions => "Transactions",
            Route::TopBuyer => "Top Buyers",
        }
    }

    /// The route a client path lands on, ignoring guards.
    pub fn parse(path: &str) -> Option<Route> {
        match_route(path).map(|(route, _)| route)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Loader run on route entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loader {
    /// No token: redirect to `/login`.
    RequireSession,
    /// Token present: redirect to `/`.
    RedirectIfSession,
}

#[derive(Debug)]
pub struct RouteNode {
    pub segment: &'static str,
    pub route: Route,
    pub loader: Option<Loader>,
    pub children: &'static [RouteNode],
}

/// Children inherit their parent's loader; a child's own loader runs after it.
pub static ROUTES: &[RouteNode] = &[
    RouteNode {
        segment: "",
        route: Route::Home,
        loader: Some(Loader::RequireSession),
        children: &[
            RouteNode {
                segment: "products",
                route: Route::Products,
                loader: None,
                children: &[],
            },
            RouteNode {
                segment: "carts",
                route: Route::Carts,
                loader: None,
                children: &[],
            },
            RouteNode {
                segment: "transactions",
                route: Route::Transactions,
                loader: None,
                children: &[],
            },
            RouteNode {
                segment: "top-buyer",
                route: Route::TopBuyer,
                loader: None,
                children: &[],
            },
        ],
    },
    RouteNode {
        segment: "login",
        route: Route::Login,
        loader: Some(Loader::RedirectIfSession),
        children: &[],
    },
    RouteNode {
        segment: "register",
        route: Route::Register,
        loader: Some(Loader::RedirectIfSession),
        children: &[],
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(String),
    NotFound(String),
}

impl Navigation {
    pub fn to(route: Route) -> Self {
        Navigation::Redirect(route.path().to_string())
    }
}

/// Strips query, fragment and trailing slashes: `/products/?a=1` -> `products`.
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or("");
    path.trim_matches('/')
}

/// Finds the route for `path` along with the loaders on its branch, outermost first.
pub fn match_route(path: &str) -> Option<(Route, Vec<Loader>)> {
    let normalized = normalize(path);
    let segments: Vec<&str> = if normalized.is_empty() {
        Vec::new()
    } else {
        normalized.split('/').collect()
    };

    // The root node owns the empty segment; every other top-level node is one segment.
    for node in ROUTES {
        let mut loaders = Vec::new();
        if let Some(route) = match_node(node, &segments, &mut loaders) {
            return Some((route, loaders));
        }
    }
    None
}

fn match_node(node: &RouteNode, segments: &[&str], loaders: &mut Vec<Loader>) -> Option<Route> {
    let rest = if node.segment.is_empty() {
        segments
    } else {
        match segments.split_first() {
            Some((first, rest)) if *first == node.segment => rest,
            _ => return None,
        }
    };

    let depth = loaders.len();
    if let Some(loader) = node.loader {
        loaders.push(loader);
    }

    if rest.is_empty() {
        return Some(node.route);
    }

    for child in node.children {
        if let Some(route) = match_node(child, rest, loaders) {
            return Some(route);
        }
    }

    loaders.truncate(depth);
    None
}

/// Runs the route guards for `path` against the current session.
pub fn resolve(path: &str, session: &Session) -> Navigation {
    let Some((route, loaders)) = match_route(path) else {
        tracing::debug!("No route for {}", path);
        return Navigation::NotFound(path.to_string());
    };

    let has_token = session.has_token();
    for loader in loaders {
        match loader {
            Loader::RequireSession if !has_token => {
                tracing::debug!("{} requires a session, redirecting to /login", route);
                return Navigation::to(Route::Login);
            }
            Loader::RedirectIfSession if has_token => {
                tracing::debug!("{} is for guests, redirecting to /", route);
                return Navigation::to(Route::Home);
            }
            _ => {}
        }
    }

    Navigation::Render(route)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_parse_ignores_query_and_slashes() {
        assert_eq!(Route::parse("/products/?category=1"), Some(Route::Products));
        assert_eq!(Route::parse(""), Some(Route::Home));
        assert_eq!(Route::parse("/top-buyer#rank"), Some(Route::TopBuyer));
        assert_eq!(Route::parse("/products/42"), None);
    }
    use crate::storage::MemoryStorage;
    use std::sync::Arc;

    fn guest() -> Session {
        Session::new(Arc::new(MemoryStorage::new()))
    }

    fn member() -> Session {
        Session::new(Arc::new(MemoryStorage::with_token("tok")))
    }

    #[test]
    fn test_match_route_all_paths() {
        for route in [
            Route::Home,
            Route::Login,
            Route::Register,
            Route::Products,
            Route::Carts,
            Route::Transactions,
            Route::TopBuyer,
        ] {
            assert_eq!(match_route(route.path()).map(|(r, _)| r), Some(route));
        }
    }

    #[test]
    fn test_match_route_normalizes() {
        assert_eq!(match_route("/products/").map(|(r, _)| r), Some(Route::Products));
        assert_eq!(
            match_route("/products?search=x#top").map(|(r, _)| r),
            Some(Route::Products)
        );
        assert_eq!(match_route("").map(|(r, _)| r), Some(Route::Home));
        assert!(match_route("/products/12").is_none());
        assert!(match_route("/about").is_none());
    }

    #[test]
    fn test_nested_routes_inherit_root_loader() {
        let (_, loaders) = match_route("/carts").unwrap();
        assert_eq!(loaders, vec![Loader::RequireSession]);

        let (_, loaders) = match_route("/login").unwrap();
        assert_eq!(loaders, vec![Loader::RedirectIfSession]);
    }

    #[test]
    fn test_guest_is_sent_to_login() {
        let session = guest();
        assert_eq!(resolve("/products", &session), Navigation::Redirect("/login".into()));
        assert_eq!(resolve("/", &session), Navigation::Redirect("/login".into()));
        assert_eq!(resolve("/login", &session), Navigation::Render(Route::Login));
        assert_eq!(resolve("/register", &session), Navigation::Render(Route::Register));
    }

    #[test]
    fn test_member_is_sent_away_from_auth_pages() {
        let session = member();
        assert_eq!(resolve("/login", &session), Navigation::Redirect("/".into()));
        assert_eq!(resolve("/register", &session), Navigation::Redirect("/".into()));
        assert_eq!(resolve("/top-buyer", &session), Navigation::Render(Route::TopBuyer));
    }

    #[test]
    fn test_unknown_path() {
        assert_eq!(
            resolve("/services", &member()),
            Navigation::NotFound("/services".into())
        );
    }
}
