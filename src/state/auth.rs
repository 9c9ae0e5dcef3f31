//! Auth-session state for the current operator.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by every caller that needs "who is signed in" and "may they do X",
//! and by the outbound CSRF stage for the token to attach.
//!
//! DESIGN
//! ======
//! User, authenticated flag, and CSRF token live in one `SessionPhase`
//! value, so `is_authenticated() == current_user().is_some()` holds by
//! construction and a token can never outlive its session. Every change goes
//! through `AuthState::apply`, which swaps the whole phase in one step.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Where the session lifecycle currently is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// No attempt has been made yet to discover an existing session.
    #[default]
    Unresolved,
    /// Resolution found no session, or the session was ended.
    Unauthenticated,
    /// A user is signed in. The token may briefly be `None` when the server
    /// did not surface one and the cookie fallback has nothing yet.
    Authenticated { user: User, csrf_token: Option<String> },
}

/// A complete state change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// `/auth/me` succeeded. A token already held in memory is kept;
    /// otherwise the token read from the readable cookie (if any) is used.
    Restored { user: User, cookie_token: Option<String> },
    /// `/auth/login` succeeded. The response token is authoritative.
    LoggedIn { user: User, csrf_token: Option<String> },
    /// Session ended or could not be restored.
    SignedOut,
}

/// Authentication state tracking the current user, CSRF token, and the
/// initial loading phase.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    phase: SessionPhase,
}

impl AuthState {
    #[must_use]
    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        match &self.phase {
            SessionPhase::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    #[must_use]
    pub fn csrf_token(&self) -> Option<&str> {
        match &self.phase {
            SessionPhase::Authenticated { csrf_token, .. } => csrf_token.as_deref(),
            _ => None,
        }
    }

    /// True only until the first session resolution completes.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.phase == SessionPhase::Unresolved
    }

    /// Apply one transition, replacing user, flag, and token together.
    pub fn apply(&mut self, transition: Transition) {
        self.phase = match transition {
            Transition::Restored { user, cookie_token } => {
                let csrf_token = self.csrf_token().map(str::to_owned).or(cookie_token);
                SessionPhase::Authenticated { user, csrf_token }
            }
            Transition::LoggedIn { user, csrf_token } => SessionPhase::Authenticated { user, csrf_token },
            Transition::SignedOut => SessionPhase::Unauthenticated,
        };
    }

    // =========================================================================
    // PERMISSIONS
    // =========================================================================

    /// Whether the current user holds `permission`.
    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        self.check(|granted| granted.iter().any(|p| p == permission))
    }

    /// Whether the current user holds at least one of `permissions`.
    #[must_use]
    pub fn has_any_permission<S: AsRef<str>>(&self, permissions: &[S]) -> bool {
        self.check(|granted| permissions.iter().any(|wanted| granted.iter().any(|p| p == wanted.as_ref())))
    }

    /// Whether the current user holds every one of `permissions`.
    #[must_use]
    pub fn has_all_permissions<S: AsRef<str>>(&self, permissions: &[S]) -> bool {
        self.check(|granted| permissions.iter().all(|wanted| granted.iter().any(|p| p == wanted.as_ref())))
    }

    /// No user denies everything; the admin role grants everything.
    fn check(&self, granted: impl FnOnce(&[String]) -> bool) -> bool {
        match self.current_user() {
            None => false,
            Some(user) if user.is_admin() => true,
            Some(user) => granted(&user.permissions),
        }
    }
}
