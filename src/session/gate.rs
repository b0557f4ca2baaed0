/// Proof that the admin secret was entered during the current login.
///
/// Only [`Session::login`](super::Session::login) hands these out, and a
/// logout invalidates every capability issued before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCapability {
    pub(super) epoch: u64,
}

/// A shared-secret check that unlocks editing.
///
/// This is a UI lock for the editing affordances, not access control.
#[derive(Debug, Clone)]
pub struct AdminGate {
    secret: String,
}

impl AdminGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn check(&self, attempt: &str) -> bool {
        attempt == self.secret
    }
}

impl Default for AdminGate {
    fn default() -> Self {
        Self::new("admin")
    }
}
