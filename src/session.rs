use std::time::Duration;
use tokio::sync::watch;

use crate::error::Result;
use crate::routes::Navigation;
use crate::storage::{SharedStorage, ACCESS_TOKEN_KEY};

/// Session state derived from the token in local storage.
///
/// There is no expiry check and no refresh: a stored token means logged in.
#[derive(Clone)]
pub struct Session {
    storage: SharedStorage,
    logged_in: bool,
}

impl Session {
    pub fn new(storage: SharedStorage) -> Self {
        let logged_in = read_logged_in(&storage);
        Self { storage, logged_in }
    }

    pub fn storage(&self) -> &SharedStorage {
        &self.storage
    }

    pub fn token(&self) -> Option<String> {
        self.storage
            .get_item(ACCESS_TOKEN_KEY)
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to read session token: {}", e);
                None
            })
            .filter(|token| !token.is_empty())
    }

    /// Live check against storage, used by the route guards.
    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    /// Flag cached at construction and on storage events, used by the navbar.
    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn store_token(&mut self, token: &str) -> Result<()> {
        self.storage.set_item(ACCESS_TOKEN_KEY, token)?;
        self.logged_in = true;
        tracing::info!("Session token stored");
        Ok(())
    }

    pub fn logout(&mut self) -> Result<Navigation> {
        self.storage.remove_item(ACCESS_TOKEN_KEY)?;
        self.logged_in = false;
        tracing::info!("Session cleared");
        Ok(Navigation::Redirect("/login".to_string()))
    }

    /// Re-derives the logged-in flag after a storage change.
    ///
    /// `None` means the whole storage was cleared.
    pub fn on_storage_event(&mut self, key: Option<&str>) {
        if key.map_or(true, |k| k == ACCESS_TOKEN_KEY) {
            self.logged_in = read_logged_in(&self.storage);
        }
    }
}

fn read_logged_in(storage: &SharedStorage) -> bool {
    matches!(storage.get_item(ACCESS_TOKEN_KEY), Ok(Some(token)) if !token.is_empty())
}

/// Polls storage and publishes logged-in changes, so a second process sharing the
/// storage file sees logins and logouts made elsewhere.
pub fn spawn_storage_watcher(storage: SharedStorage, interval: Duration) -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(read_logged_in(&storage));

    tokio::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;
            let logged_in = read_logged_in(&storage);
            if *tx.borrow() != logged_in {
                tracing::info!("Session state changed: logged_in={}", logged_in);
                if tx.send(logged_in).is_err() {
                    break;
                }
            }
            if tx.is_closed() {
                break;
            }
        }
    });

    rx
}
