//! Port supplying the initial user collection.

use async_trait::async_trait;

use crate::domain::User;

use super::define_port_error;

define_port_error! {
    /// Errors raised while fetching the initial collection.
    pub enum UserSourceError {
        /// The source could not be read.
        Unavailable { message: String } => "источник данных недоступен: {message}",
        /// The source produced data that could not be turned into users.
        Generation { message: String } => "не удалось сформировать пользователей: {message}",
    }
}

/// Upstream loader for [`crate::domain::UserStore::load`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Fetch the full collection.
    async fn fetch_users(&self) -> Result<Vec<User>, UserSourceError>;
}

/// In-memory source returning a fixed collection.
#[derive(Debug, Default, Clone)]
pub struct FixtureUserSource {
    users: Vec<User>,
}

impl FixtureUserSource {
    /// Source that always returns `users`.
    pub const fn new(users: Vec<User>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserSource for FixtureUserSource {
    async fn fetch_users(&self) -> Result<Vec<User>, UserSourceError> {
        Ok(self.users.clone())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::UserId;

    #[tokio::test]
    async fn fixture_source_returns_its_users() {
        let users = vec![User::new(UserId::new(1), "Ada", "ada@example.com")];
        let source = FixtureUserSource::new(users.clone());

        assert_eq!(source.fetch_users().await, Ok(users));
    }
}
