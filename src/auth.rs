use crate::error::{ShajraError, ShajraResult};
use crate::model::{Id, User};

/// The acting principal, if any. Every service operation checks it first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Session {
    principal: Option<Id<User>>,
}

impl Session {
    pub fn signed_in(user_id: Id<User>) -> Self {
        Self {
            principal: Some(user_id),
        }
    }

    pub fn anonymous() -> Self {
        Self { principal: None }
    }

    pub fn current_principal(&self) -> Option<Id<User>> {
        self.principal
    }

    pub fn require_principal(&self) -> ShajraResult<Id<User>> {
        self.principal.ok_or(ShajraError::Unauthorized)
    }
}
