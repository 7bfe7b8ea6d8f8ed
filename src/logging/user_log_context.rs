use crate::users::{User, UserId};
use serde_derive::Serialize;

/// Represents a context for the user used for the structured logging.
#[derive(Serialize, Debug, Copy, Clone, PartialEq)]
pub struct UserLogContext<'u> {
    /// Unique id of the user.
    pub id: UserId,
    /// Username of the user.
    pub username: &'u str,
}

impl<'u> UserLogContext<'u> {
    /// Returns context used for the structured logging.
    pub fn new(id: UserId, username: &'u str) -> Self {
        Self { id, username }
    }
}

impl User {
    /// Returns context used for the structured logging.
    pub fn log_context(&self) -> UserLogContext<'_> {
        UserLogContext::new(self.id, &self.username)
    }
}
