use crate::error::Result;
use crate::routes::{Navigation, Route};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Link(Route),
    Logout,
}

impl NavItem {
    pub fn label(self) -> &'static str {
        match self {
            NavItem::Link(route) => route.title(),
            NavItem::Logout => "Logout",
        }
    }
}

/// Header navigation. Links follow the session's logged-in flag.
#[derive(Debug, Default)]
pub struct Navbar {
    pub menu_open: bool,
}

impl Navbar {
    pub const BRAND: &'static str = "NexMedis";

    pub fn items(&self, session: &Session) -> Vec<NavItem> {
        if session.is_logged_in() {
            vec![
                NavItem::Link(Route::Home),
                NavItem::Link(Route::Products),
                NavItem::Link(Route::Carts),
                NavItem::Link(Route::Transactions),
                NavItem::Link(Route::TopBuyer),
                NavItem::Logout,
            ]
        } else {
            vec![
                NavItem::Link(Route::Home),
                NavItem::Link(Route::Login),
                NavItem::Link(Route::Register),
            ]
        }
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Follows a nav item. Any selection closes the mobile menu.
    pub fn select(&mut self, item: NavItem, session: &mut Session) -> Result<Navigation> {
        self.menu_open = false;
        match item {
            NavItem::Link(route) => Ok(Navigation::to(route)),
            NavItem::Logout => session.logout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::sync::Arc;

    #[test]
    fn test_guest_links() {
        let session = Session::new(Arc::new(MemoryStorage::new()));
        let labels: Vec<_> = Navbar::default()
            .items(&session)
            .into_iter()
            .map(NavItem::label)
            .collect();
        assert_eq!(labels, vec!["Home", "Login", "Register"]);
    }

    #[test]
    fn test_member_links_end_with_logout() {
        let session = Session::new(Arc::new(MemoryStorage::with_token("tok")));
        let items = Navbar::default().items(&session);
        assert_eq!(items.last(), Some(&NavItem::Logout));
        assert!(items.contains(&NavItem::Link(Route::TopBuyer)));
        assert!(!items.contains(&NavItem::Link(Route::Login)));
    }

    #[test]
    fn test_select_closes_menu_and_logout_clears_session() {
        let mut session = Session::new(Arc::new(MemoryStorage::with_token("tok")));
        let mut navbar = Navbar::default();

        navbar.toggle_menu();
        assert!(navbar.menu_open);
        let nav = navbar.select(NavItem::Link(Route::Carts), &mut session).unwrap();
        assert_eq!(nav, Navigation::Redirect("/carts".into()));
        assert!(!navbar.menu_open);

        navbar.toggle_menu();
        let nav = navbar.select(NavItem::Logout, &mut session).unwrap();
        assert_eq!(nav, Navigation::Redirect("/login".into()));
        assert!(!navbar.menu_open);
        assert!(!session.is_logged_in());
        assert_eq!(
            navbar.items(&session),
            vec![
                NavItem::Link(Route::Home),
                NavItem::Link(Route::Login),
                NavItem::Link(Route::Register)
            ]
        );
    }
}
