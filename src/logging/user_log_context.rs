use crate::users::{User, UserId};
use serde_derive::Serialize;

/// Represents a context for the user used for the structured logging.
#[derive(Serialize, Debug, Copy, Clone, PartialEq)]
pub struct UserLogContext {
    /// Unique id of the user.
    pub id: UserId,
}

impl UserLogContext {
    /// Returns context used for the structured logging.
    pub fn new(id: UserId) -> Self {
        Self { id }
    }
}

impl User {
    /// Returns context used for the structured logging.
    pub fn log_context(&self) -> UserLogContext {
        UserLogContext::new(self.id)
    }
}
