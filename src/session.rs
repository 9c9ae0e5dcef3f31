//! Session/auth controller.
//!
//! ARCHITECTURE
//! ============
//! `SessionController` is the single owner of `AuthState`. It exposes read
//! accessors and the named operations (`resolve_session`, `login`,
//! `logout`, `register`, permission checks); nothing else can mutate the
//! state. The `ApiClient` it hands out reads the CSRF token back from the
//! same store on every request, so every page's calls share one session.
//!
//! ERROR HANDLING
//! ==============
//! `resolve_session` and `logout` always settle into a definite state and
//! only log failures. `login` and `register` return errors unchanged and do
//! not touch state when they fail.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use crate::config::ClientConfig;
use crate::error::{ApiError, ConfigError};
use crate::net::api;
use crate::net::cookies::csrf_from_cookie_header;
use crate::net::csrf::TokenSource;
use crate::net::http::ApiClient;
use crate::net::types::{LoginResponse, RegisterRequest, User};
use crate::state::auth::{AuthState, Transition};

// =============================================================================
// STORE
// =============================================================================

/// Shared handle to the single `AuthState`.
///
/// Writes are whole transitions under one lock, so readers never observe a
/// half-applied change.
#[derive(Clone, Default)]
struct SessionStore(Arc<RwLock<AuthState>>);

impl SessionStore {
    fn read(&self) -> RwLockReadGuard<'_, AuthState> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply(&self, transition: Transition) {
        self.0.write().unwrap_or_else(PoisonError::into_inner).apply(transition);
    }
}

impl TokenSource for SessionStore {
    fn session_token(&self) -> Option<String> {
        self.read().csrf_token().map(str::to_owned)
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

#[derive(Clone)]
pub struct SessionController {
    store: SessionStore,
    api: ApiClient,
}

impl SessionController {
    /// Build an unresolved controller. No request is made.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let store = SessionStore::default();
        let api = ApiClient::new(config, Arc::new(store.clone()))?;
        Ok(Self { store, api })
    }

    /// Build a controller and run the initial session resolution once.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed. A missing or
    /// expired session is not an error; it leaves the controller unauthenticated.
    pub async fn start(config: &ClientConfig) -> Result<Self, ConfigError> {
        let controller = Self::new(config)?;
        controller.resolve_session().await;
        Ok(controller)
    }

    /// Transport for every other backend call, sharing this session's
    /// cookies and CSRF token.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.store.read().clone()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.store.read().current_user().cloned()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.store.read().is_authenticated()
    }

    #[must_use]
    pub fn csrf_token(&self) -> Option<String> {
        self.store.read().csrf_token().map(str::to_owned)
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.store.read().loading()
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Ask the server who the current cookie belongs to and sync state.
    ///
    /// Any failure (network, 401, malformed body) means "no session".
    pub async fn resolve_session(&self) {
        match api::fetch_current_user(&self.api).await {
            Ok(user) => {
                let cookie_token = self.api.cookie_header().as_deref().and_then(csrf_from_cookie_header);
                tracing::debug!(username = %user.username, "session restored");
                self.store.apply(Transition::Restored { user, cookie_token });
            }
            Err(e) => {
                tracing::debug!(error = %e, "no session restored");
                self.store.apply(Transition::SignedOut);
            }
        }
    }

    /// Sign in. On success the session holds the returned user and token.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged; state is not modified.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let LoginResponse { user, csrf_token } = api::login(&self.api, username, password).await?;
        if csrf_token.is_none() {
            tracing::warn!(username = %user.username, "login response carried no csrf token");
        }
        tracing::info!(username = %user.username, role = %user.role, "logged in");
        self.store.apply(Transition::LoggedIn { user: user.clone(), csrf_token });
        Ok(user)
    }

    /// Sign out. Local state is always cleared, even if the server call fails.
    pub async fn logout(&self) {
        if let Err(e) = api::logout(&self.api).await {
            tracing::warn!(error = %e, "logout request failed; clearing local session anyway");
        }
        self.store.apply(Transition::SignedOut);
        tracing::info!("logged out");
    }

    /// Create a new account. Does not affect the current session.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    pub async fn register(&self, profile: &RegisterRequest) -> Result<(), ApiError> {
        api::register(&self.api, profile).await
    }

    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        self.store.read().has_permission(permission)
    }

    #[must_use]
    pub fn has_any_permission<S: AsRef<str>>(&self, permissions: &[S]) -> bool {
        self.store.read().has_any_permission(permissions)
    }

    #[must_use]
    pub fn has_all_permissions<S: AsRef<str>>(&self, permissions: &[S]) -> bool {
        self.store.read().has_all_permissions(permissions)
    }
}
