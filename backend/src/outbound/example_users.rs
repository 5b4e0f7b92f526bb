//! Initial user source backed by the `example-data` generator.

use std::sync::Arc;

use async_trait::async_trait;
use example_data::{
    ExampleUserRequest, ExampleUserSeed, RoleSeed, StatusSeed, generate_example_users,
};
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{UserSource, UserSourceError};
use crate::domain::{Role, Status, User, UserId};

/// [`UserSource`] producing deterministic example users.
///
/// Last-activity timestamps are generated relative to the clock's current
/// time at each fetch.
pub struct ExampleUserSource {
    seed: u64,
    user_count: usize,
    clock: Arc<dyn Clock>,
}

impl ExampleUserSource {
    /// Source generating `user_count` users from `seed`.
    pub fn new(seed: u64, user_count: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            seed,
            user_count,
            clock,
        }
    }
}

#[async_trait]
impl UserSource for ExampleUserSource {
    async fn fetch_users(&self) -> Result<Vec<User>, UserSourceError> {
        let request = ExampleUserRequest::new(self.seed, self.user_count, self.clock.utc());
        let seeds = generate_example_users(&request)
            .map_err(|err| UserSourceError::generation(err.to_string()))?;
        debug!(seed = self.seed, count = seeds.len(), "generated example users");
        Ok(seeds.into_iter().map(user_from_seed).collect())
    }
}

fn user_from_seed(seed: ExampleUserSeed) -> User {
    let role = match seed.role {
        RoleSeed::Admin => Role::Admin,
        RoleSeed::User => Role::User,
        RoleSeed::Moderator => Role::Moderator,
    };
    let status = match seed.status {
        StatusSeed::Active => Status::Active,
        StatusSeed::Inactive => Status::Inactive,
    };
    User::new(UserId::new(seed.id), seed.name, seed.email)
        .with_role(role)
        .with_status(status)
        .with_registration_date(seed.registration_date)
        .with_last_activity(seed.last_activity)
        .with_counters(seed.login_count, seed.posts_count, seed.comments_count)
}
