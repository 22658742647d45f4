//! Session middleware configuration.
//!
//! The visitor's session is the durable, browser-scoped home of the cart
//! slot. Production sessions are stored in `PostgreSQL`; tests plug in
//! `tower_sessions::MemoryStore` through [`session_layer`].

use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "wg_session";

/// Session expiry time in seconds (30 days of inactivity).
///
/// A cart should outlive a browsing session the way browser local storage
/// does, so this is much longer than a login session would be.
const SESSION_EXPIRY_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Build a session layer over any store.
#[must_use]
pub fn session_layer<S: SessionStore + Clone>(store: S, secure: bool) -> SessionManagerLayer<S> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Create the session layer with the `PostgreSQL` store.
///
/// The sessions table must already exist (`PostgresStore::migrate`).
#[must_use]
pub fn create_session_layer(
    store: PostgresStore,
    config: &StorefrontConfig,
) -> SessionManagerLayer<PostgresStore> {
    session_layer(store, config.is_secure())
}
