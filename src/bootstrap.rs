//! Startup gate: choose the first screen.
//!
//! On launch the splash stays up while startup work settles, and for a
//! fixed minimum after that. The route decision itself is one read: a
//! stored token means Home, anything else (including an unreadable store)
//! means Login.

use std::time::Duration;

use crate::router::Screen;
use crate::session::TokenStore;

/// Minimum splash display time after startup work completes.
pub const SPLASH_MIN: Duration = Duration::from_millis(2000);

/// Resolves the initial route from stored-token presence.
pub fn initial_route(store: &dyn TokenStore) -> Screen {
    if store.read().is_some() {
        Screen::Home
    } else {
        Screen::Login
    }
}

/// Performs the bootstrap wait and returns the initial route.
///
/// The splash delay runs after the store read resolves, not concurrently
/// with it. The caller renders the splash before awaiting this.
pub async fn run(store: &dyn TokenStore) -> Screen {
    let route = initial_route(store);
    tokio::time::sleep(SPLASH_MIN).await;
    route
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::session::{FileTokenStore, MemoryTokenStore};

    #[test]
    fn test_token_present_routes_home() {
        let store = MemoryTokenStore::with_token("tok");
        assert_eq!(initial_route(&store), Screen::Home);
    }

    #[test]
    fn test_no_token_routes_login() {
        let store = MemoryTokenStore::new();
        assert_eq!(initial_route(&store), Screen::Login);
    }

    #[test]
    fn test_unreadable_store_routes_login() {
        let temp = TempDir::new().unwrap();
        let store = FileTokenStore::with_path(temp.path().join("auth.json"));
        std::fs::write(store.path(), "{ corrupted").unwrap();

        assert_eq!(initial_route(&store), Screen::Login);
    }

    #[tokio::test(start_paused = true)]
    async fn test_splash_minimum_is_enforced() {
        let store = MemoryTokenStore::new();
        let started = tokio::time::Instant::now();

        let route = run(&store).await;

        assert_eq!(route, Screen::Login);
        assert!(started.elapsed() >= SPLASH_MIN);
    }
}
