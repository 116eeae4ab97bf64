//! Session identity supplied by the external identity provider
//!
//! The core never authenticates anyone; it only checks whether the
//! collaborator handed it a user id before allowing owned-data mutations.

use crate::error::{ChordError, Result};
use crate::types::UserId;
use serde::{Deserialize, Serialize};

/// The caller's identity for the current session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Identity {
    /// Signed-in account
    Authenticated(UserId),

    /// No identity present
    Anonymous,
}

impl Identity {
    /// Identity for a signed-in user
    pub fn user(id: impl Into<UserId>) -> Self {
        Self::Authenticated(id.into())
    }

    /// Identity for an anonymous session
    pub fn anonymous() -> Self {
        Self::Anonymous
    }

    /// Whether a user is signed in
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The signed-in user id, or `Unauthenticated`
    pub fn user_id(&self) -> Result<&UserId> {
        match self {
            Self::Authenticated(id) => Ok(id),
            Self::Anonymous => Err(ChordError::Unauthenticated),
        }
    }
}

impl From<UserId> for Identity {
    fn from(id: UserId) -> Self {
        Self::Authenticated(id)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        UserId::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_has_no_user() {
        let session = Identity::anonymous();
        assert!(!session.is_authenticated());
        assert!(matches!(
            session.user_id(),
            Err(ChordError::Unauthenticated)
        ));
    }

    #[test]
    fn authenticated_exposes_user() {
        let session = Identity::user("user-1");
        assert_eq!(session.user_id().unwrap(), &UserId::new("user-1"));
    }
}
