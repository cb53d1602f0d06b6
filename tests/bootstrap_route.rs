//! Bootstrap routing against real on-disk stores.

use souk::bootstrap::initial_route;
use souk::router::Screen;
use souk::session::{FileTokenStore, TokenStore};
use tempfile::tempdir;

/// Test: a previously stored token routes straight to Home.
#[test]
fn test_stored_token_routes_home() {
    let temp = tempdir().unwrap();
    let store = FileTokenStore::with_path(temp.path().join("auth.json"));
    store.write("tok-from-last-run").unwrap();

    assert_eq!(initial_route(&store), Screen::Home);
}

/// Test: a fresh install routes to Login.
#[test]
fn test_missing_token_routes_login() {
    let temp = tempdir().unwrap();
    let store = FileTokenStore::with_path(temp.path().join("auth.json"));

    assert_eq!(initial_route(&store), Screen::Login);
}

/// Test: a storage read failure behaves exactly like an absent token.
#[test]
fn test_unreadable_token_file_routes_login() {
    let temp = tempdir().unwrap();
    let store = FileTokenStore::with_path(temp.path().join("auth.json"));
    std::fs::write(store.path(), "not json at all").unwrap();

    assert_eq!(initial_route(&store), Screen::Login);
}

/// Test: routing never consumes the token; Home can read it again.
#[test]
fn test_routing_leaves_token_in_place() {
    let temp = tempdir().unwrap();
    let store = FileTokenStore::with_path(temp.path().join("auth.json"));
    store.write("tok").unwrap();

    let _ = initial_route(&store);
    assert_eq!(store.read().as_deref(), Some("tok"));
}
