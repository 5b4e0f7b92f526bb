//! Deterministic user generation.
//!
//! The same request always produces identical output: the seed drives a
//! ChaCha RNG and the reference instant replaces the wall clock for activity
//! timestamps.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use fake::Fake;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::seed::{ExampleUserSeed, RoleSeed, StatusSeed};
use crate::validation::{is_valid_email, is_valid_name};

/// Maximum number of attempts to generate a valid name.
const MAX_NAME_ATTEMPTS: usize = 100;

/// Year every generated registration falls in.
const REGISTRATION_YEAR: i32 = 2020;

/// Latest day of month used for registrations, valid in every month.
const MAX_REGISTRATION_DAY: u32 = 28;

/// Last activity lies within this many milliseconds before the reference.
const ACTIVITY_WINDOW_MS: i64 = 30 * 24 * 60 * 60 * 1000;

/// Exclusive upper bound for generated login counts.
const MAX_LOGIN_COUNT: u32 = 500;

/// Exclusive upper bound for generated post counts.
const MAX_POSTS_COUNT: u32 = 100;

/// Exclusive upper bound for generated comment counts.
const MAX_COMMENTS_COUNT: u32 = 300;

/// Parameters for one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExampleUserRequest {
    seed: u64,
    user_count: usize,
    reference_time: DateTime<Utc>,
}

impl ExampleUserRequest {
    /// Describe a run producing `user_count` users from `seed`.
    ///
    /// `reference_time` stands in for "now" when generating last-activity
    /// timestamps.
    #[must_use]
    pub const fn new(seed: u64, user_count: usize, reference_time: DateTime<Utc>) -> Self {
        Self {
            seed,
            user_count,
            reference_time,
        }
    }

    /// RNG seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of users to generate.
    #[must_use]
    pub const fn user_count(&self) -> usize {
        self.user_count
    }

    /// Instant last-activity timestamps are measured back from.
    #[must_use]
    pub const fn reference_time(&self) -> DateTime<Utc> {
        self.reference_time
    }
}

/// Generates example users for a request.
///
/// The generated users have:
///
/// - Sequential ids `1..=user_count`
/// - Names passing backend validation, suffixed with the id
/// - Unique `user<id>@example.com` addresses
/// - A random role and status
/// - A registration date in 2020 and a last activity within 30 days of the
///   reference instant
/// - Random login, post and comment counters
///
/// # Errors
///
/// Returns [`GenerationError`] if:
/// - The request asks for zero users
/// - Name generation fails after maximum retries
/// - A timestamp cannot be represented
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use example_data::{ExampleUserRequest, generate_example_users};
///
/// let request = ExampleUserRequest::new(7, 5, Utc::now());
/// let users = generate_example_users(&request).expect("generated");
/// let again = generate_example_users(&request).expect("generated");
///
/// assert_eq!(users, again);
/// ```
pub fn generate_example_users(
    request: &ExampleUserRequest,
) -> Result<Vec<ExampleUserSeed>, GenerationError> {
    if request.user_count() == 0 {
        return Err(GenerationError::EmptyRequest);
    }
    let last_id = u64::try_from(request.user_count()).map_err(|_| GenerationError::TooManyUsers {
        requested: request.user_count(),
    })?;

    let mut rng = ChaCha8Rng::seed_from_u64(request.seed());
    (1..=last_id)
        .map(|id| generate_single_user(&mut rng, id, request.reference_time()))
        .collect()
}

/// Generates a single user with the provided RNG.
fn generate_single_user(
    rng: &mut ChaCha8Rng,
    id: u64,
    reference_time: DateTime<Utc>,
) -> Result<ExampleUserSeed, GenerationError> {
    let name = generate_name(rng, id)?;

    let email = format!("user{id}@example.com");
    if !is_valid_email(&email) {
        return Err(GenerationError::InvalidEmail { email });
    }

    let role = match rng.random_range(0..3_u8) {
        0 => RoleSeed::Admin,
        1 => RoleSeed::User,
        _ => RoleSeed::Moderator,
    };
    let status = if rng.random_ratio(1, 2) {
        StatusSeed::Active
    } else {
        StatusSeed::Inactive
    };

    Ok(ExampleUserSeed {
        id,
        name,
        email,
        role,
        status,
        registration_date: registration_date(rng)?,
        last_activity: last_activity(rng, reference_time)?,
        login_count: rng.random_range(0..MAX_LOGIN_COUNT),
        posts_count: rng.random_range(0..MAX_POSTS_COUNT),
        comments_count: rng.random_range(0..MAX_COMMENTS_COUNT),
    })
}

/// Generates a valid name using the provided RNG.
///
/// Names are a first name followed by a last name and the record id, which
/// keeps them distinguishable in listings even when the faker repeats.
fn generate_name(rng: &mut ChaCha8Rng, id: u64) -> Result<String, GenerationError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let first: String = FirstName(EN).fake_with_rng(rng);
        let last: String = LastName(EN).fake_with_rng(rng);
        let candidate = format!("{first} {last} {id}");

        if is_valid_name(&candidate) {
            return Ok(candidate);
        }
    }

    Err(GenerationError::NameGenerationFailed {
        max_attempts: MAX_NAME_ATTEMPTS,
    })
}

fn registration_date(rng: &mut ChaCha8Rng) -> Result<DateTime<Utc>, GenerationError> {
    let month = rng.random_range(1..=12);
    let day = rng.random_range(1..=MAX_REGISTRATION_DAY);
    Utc.with_ymd_and_hms(REGISTRATION_YEAR, month, day, 0, 0, 0)
        .single()
        .ok_or(GenerationError::TimestampOutOfRange {
            field: "registrationDate",
        })
}

fn last_activity(
    rng: &mut ChaCha8Rng,
    reference_time: DateTime<Utc>,
) -> Result<DateTime<Utc>, GenerationError> {
    let offset_ms = rng.random_range(0..ACTIVITY_WINDOW_MS);
    TimeDelta::try_milliseconds(offset_ms)
        .and_then(|offset| reference_time.checked_sub_signed(offset))
        .ok_or(GenerationError::TimestampOutOfRange {
            field: "lastActivity",
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::{fixture, rstest};

    use super::*;

    /// Generates users for the request and asserts a predicate holds for all.
    ///
    /// # Panics
    ///
    /// Panics if generation fails or the predicate returns `false` for any
    /// user.
    fn assert_all_users<F>(request: &ExampleUserRequest, predicate: F)
    where
        F: Fn(&ExampleUserSeed) -> bool,
    {
        let users = generate_example_users(request).expect("generation should succeed");

        for user in &users {
            assert!(predicate(user), "Predicate failed for user: {user:?}");
        }
    }

    fn reference_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .single()
            .expect("valid reference instant")
    }

    #[fixture]
    fn request() -> ExampleUserRequest {
        ExampleUserRequest::new(42, 50, reference_time())
    }

    #[rstest]
    fn generates_correct_user_count(request: ExampleUserRequest) {
        let users = generate_example_users(&request).expect("generated");
        assert_eq!(users.len(), 50);
    }

    #[rstest]
    fn generation_is_deterministic(request: ExampleUserRequest) {
        let users1 = generate_example_users(&request).expect("generated");
        let users2 = generate_example_users(&request).expect("generated");

        assert_eq!(users1, users2);
    }

    #[test]
    fn different_seeds_produce_different_users() {
        let first = ExampleUserRequest::new(1, 10, reference_time());
        let second = ExampleUserRequest::new(2, 10, reference_time());

        let users1 = generate_example_users(&first).expect("generated");
        let users2 = generate_example_users(&second).expect("generated");

        assert_ne!(users1, users2);
    }

    #[rstest]
    fn ids_are_sequential_from_one(request: ExampleUserRequest) {
        let users = generate_example_users(&request).expect("generated");
        let ids: Vec<u64> = users.iter().map(|user| user.id).collect();
        let expected: Vec<u64> = (1..=50).collect();

        assert_eq!(ids, expected);
    }

    #[rstest]
    fn emails_are_unique_and_valid(request: ExampleUserRequest) {
        let users = generate_example_users(&request).expect("generated");
        let emails: HashSet<&str> = users.iter().map(|user| user.email.as_str()).collect();

        assert_eq!(emails.len(), users.len());
        assert_all_users(&request, |user| is_valid_email(&user.email));
    }

    #[rstest]
    fn names_pass_validation(request: ExampleUserRequest) {
        assert_all_users(&request, |user| is_valid_name(&user.name));
    }

    #[rstest]
    fn registrations_fall_in_2020(request: ExampleUserRequest) {
        use chrono::Datelike;

        assert_all_users(&request, |user| user.registration_date.year() == REGISTRATION_YEAR);
    }

    #[rstest]
    fn last_activity_stays_within_window(request: ExampleUserRequest) {
        let earliest = reference_time() - TimeDelta::days(30);
        assert_all_users(&request, |user| {
            user.last_activity <= reference_time() && user.last_activity > earliest
        });
    }

    #[rstest]
    fn counters_respect_bounds(request: ExampleUserRequest) {
        assert_all_users(&request, |user| {
            user.login_count < MAX_LOGIN_COUNT
                && user.posts_count < MAX_POSTS_COUNT
                && user.comments_count < MAX_COMMENTS_COUNT
        });
    }

    #[rstest]
    fn generates_every_role_and_status(request: ExampleUserRequest) {
        let users = generate_example_users(&request).expect("generated");
        let roles: HashSet<RoleSeed> = users.iter().map(|user| user.role).collect();
        let statuses: HashSet<StatusSeed> = users.iter().map(|user| user.status).collect();

        // 50 users over three roles and two statuses leaves a negligible
        // chance of a missing value for this seed.
        assert_eq!(roles.len(), 3);
        assert_eq!(statuses.len(), 2);
    }

    #[test]
    fn rejects_empty_request() {
        let request = ExampleUserRequest::new(1, 0, reference_time());
        assert_eq!(
            generate_example_users(&request),
            Err(GenerationError::EmptyRequest)
        );
    }
}
