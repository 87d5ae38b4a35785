//! Current-user lookup. Sign-in itself happens elsewhere.

use std::sync::RwLock;

pub trait AuthProvider: Send + Sync {
    /// Identifier of the signed-in user, if any.
    fn current_user(&self) -> Option<String>;
}

/// A fixed user (or none), e.g. from the command line.
#[derive(Debug, Clone, Default)]
pub struct StaticAuth(pub Option<String>);

impl StaticAuth {
    pub fn user(id: impl Into<String>) -> Self {
        Self(Some(id.into()))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl AuthProvider for StaticAuth {
    fn current_user(&self) -> Option<String> {
        self.0.clone()
    }
}

/// A user that can change while the session runs.
#[derive(Debug, Default)]
pub struct SharedAuth {
    user: RwLock<Option<String>>,
}

impl SharedAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, id: impl Into<String>) {
        *self.user.write().unwrap_or_else(|p| p.into_inner()) = Some(id.into());
    }

    pub fn sign_out(&self) {
        *self.user.write().unwrap_or_else(|p| p.into_inner()) = None;
    }
}

impl AuthProvider for SharedAuth {
    fn current_user(&self) -> Option<String> {
        self.user.read().unwrap_or_else(|p| p.into_inner()).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_auth_tracks_sign_in() {
        let auth = SharedAuth::new();
        assert_eq!(auth.current_user(), None);
        auth.sign_in("adv-42");
        assert_eq!(auth.current_user().as_deref(), Some("adv-42"));
        auth.sign_out();
        assert_eq!(auth.current_user(), None);
        assert_eq!(StaticAuth::user("u").current_user().as_deref(), Some("u"));
        assert_eq!(StaticAuth::anonymous().current_user(), None);
    }
}
