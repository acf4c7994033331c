//! Session authentication state.

use crate::catalog::UserProfile;
use log::*;
use std::sync::{PoisonError, RwLock};

/// Snapshot of the session's authentication.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub is_logged_in: bool,
    pub user: Option<UserProfile>,
}

/// Holds the session's login state in memory. It is not persisted, so a
/// restart starts logged out.
///
#[derive(Debug, Default)]
pub struct AuthStore {
    state: RwLock<AuthState>,
}

impl AuthStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the session as logged in as the given user. The profile is
    /// taken as is.
    ///
    pub fn login(&self, user: UserProfile) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        debug!("Logging in as '{}'.", user.email);
        state.is_logged_in = true;
        state.user = Some(user);
    }

    pub fn logout(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.is_logged_in {
            debug!("Logging out.");
        }
        state.is_logged_in = false;
        state.user = None;
    }

    pub fn is_logged_in(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_logged_in
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .user
            .clone()
    }

    pub fn state(&self) -> AuthState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
