//! Authentication capability.
//!
//! The engine never authenticates anyone itself; it consumes a provider
//! that either yields a stable opaque user id or reports "not signed in".
//! Unauthenticated is a first-class state for every operation: reads
//! degrade to empty results and writes fail with an explicit error, never
//! a panic.

use std::sync::{Arc, RwLock};

use trolley_core::UserId;

/// Source of the current user identity.
pub trait AuthProvider {
    /// The signed-in user's id, or `None` when unauthenticated.
    fn current_user(&self) -> Option<UserId>;
}

/// In-process session holder.
///
/// Cheap to clone; all clones observe the same session. The UI layer signs
/// users in and out, synchronizers only ever read.
#[derive(Debug, Clone, Default)]
pub struct SessionAuth {
    current: Arc<RwLock<Option<UserId>>>,
}

impl SessionAuth {
    /// Create a session with nobody signed in.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session already signed in as `user`.
    #[must_use]
    pub fn signed_in(user: UserId) -> Self {
        let session = Self::new();
        session.sign_in(user);
        session
    }

    /// Record a sign-in.
    pub fn sign_in(&self, user: UserId) {
        match self.current.write() {
            Ok(mut guard) => *guard = Some(user),
            Err(poisoned) => *poisoned.into_inner() = Some(user),
        }
    }

    /// Record a sign-out.
    pub fn sign_out(&self) {
        match self.current.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }
}

impl AuthProvider for SessionAuth {
    fn current_user(&self) -> Option<UserId> {
        self.current
            .read()
            .map_or_else(|poisoned| poisoned.into_inner().clone(), |guard| guard.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_unauthenticated() {
        let auth = SessionAuth::new();
        assert!(auth.current_user().is_none());
    }

    #[test]
    fn test_sign_in_and_out() {
        let auth = SessionAuth::new();
        auth.sign_in(UserId::new("uid-1"));
        assert_eq!(auth.current_user(), Some(UserId::new("uid-1")));
        auth.sign_out();
        assert!(auth.current_user().is_none());
    }

    #[test]
    fn test_clones_share_the_session() {
        let auth = SessionAuth::new();
        let view = auth.clone();
        auth.sign_in(UserId::new("uid-2"));
        assert_eq!(view.current_user(), Some(UserId::new("uid-2")));
    }
}
