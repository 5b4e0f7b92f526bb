//! Narrowing of the user collection by role, status, registration date and
//! free-text search.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, Utc};
use serde::{Deserialize, Serialize};

use super::user::{Role, Status, User};

/// User-entered filter values.
///
/// Date bounds are kept as the raw strings the user typed; an empty string
/// means no bound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Free-text query matched against name, email and id.
    pub search: String,
    /// Exact role to keep.
    pub role: Option<Role>,
    /// Exact status to keep.
    pub status: Option<Status>,
    /// Earliest registration date, `YYYY-MM-DD` or RFC 3339.
    pub date_from: String,
    /// Latest registration date, `YYYY-MM-DD` or RFC 3339.
    pub date_to: String,
}

/// Applies [`FilterCriteria`] to a collection.
///
/// A calendar-day `date_from` starts at UTC midnight. A calendar-day
/// `date_to` ends at 23:59:59.999 in a fixed UTC offset, the local offset
/// at construction unless overridden.
///
/// # Examples
/// ```
/// use backend::domain::{FilterEngine, Role, User, UserId};
///
/// let users = vec![
///     User::new(UserId::new(1), "Ada", "ada@example.com").with_role(Role::Admin),
///     User::new(UserId::new(2), "Bob", "bob@example.com").with_role(Role::User),
/// ];
/// let mut filter = FilterEngine::new();
/// filter.set_role(Some(Role::Admin));
///
/// let kept: Vec<_> = filter.apply(&users).iter().map(|user| user.id().get()).collect();
/// assert_eq!(kept, vec![1]);
/// ```
#[derive(Debug, Clone)]
pub struct FilterEngine {
    criteria: FilterCriteria,
    offset: FixedOffset,
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterEngine {
    /// Engine with empty criteria using the local UTC offset.
    pub fn new() -> Self {
        Self::with_offset(Local::now().offset().fix())
    }

    /// Engine with empty criteria interpreting dates in `offset`.
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self {
            criteria: FilterCriteria::default(),
            offset,
        }
    }

    /// Current criteria.
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Offset used for calendar dates.
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Replace the search query.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.criteria.search = query.into();
    }

    /// Replace the role filter.
    pub const fn set_role(&mut self, role: Option<Role>) {
        self.criteria.role = role;
    }

    /// Replace the status filter.
    pub const fn set_status(&mut self, status: Option<Status>) {
        self.criteria.status = status;
    }

    /// Replace the lower date bound.
    pub fn set_date_from(&mut self, value: impl Into<String>) {
        self.criteria.date_from = value.into();
    }

    /// Replace the upper date bound.
    pub fn set_date_to(&mut self, value: impl Into<String>) {
        self.criteria.date_to = value.into();
    }

    /// Remove both date bounds.
    pub fn clear_date_filter(&mut self) {
        self.criteria.date_from.clear();
        self.criteria.date_to.clear();
    }

    /// Reset every criterion.
    pub fn clear_all(&mut self) {
        self.criteria = FilterCriteria::default();
    }

    /// Whether any criterion narrows the collection.
    pub fn is_active(&self) -> bool {
        let criteria = &self.criteria;
        !criteria.search.trim().is_empty()
            || criteria.role.is_some()
            || criteria.status.is_some()
            || !criteria.date_from.trim().is_empty()
            || !criteria.date_to.trim().is_empty()
    }

    /// Keep the users matching every criterion, in input order.
    ///
    /// Stages run role, status, date range, then search.
    pub fn apply<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        let from = lower_bound(&self.criteria.date_from);
        let to = upper_bound(&self.criteria.date_to, self.offset);
        let query = self.criteria.search.trim().to_lowercase();

        users
            .iter()
            .filter(|user| self.criteria.role.is_none_or(|role| user.role() == Some(role)))
            .filter(|user| {
                self.criteria
                    .status
                    .is_none_or(|status| user.status() == Some(status))
            })
            .filter(|user| within_range(user.registration_date(), from, to))
            .filter(|user| query.is_empty() || matches_query(user, &query))
            .collect()
    }
}

fn within_range(
    registered: Option<DateTime<Utc>>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> bool {
    if from.is_none() && to.is_none() {
        return true;
    }
    let Some(at) = registered else {
        return false;
    };
    from.is_none_or(|bound| at >= bound) && to.is_none_or(|bound| at <= bound)
}

fn matches_query(user: &User, query: &str) -> bool {
    user.name().to_lowercase().contains(query)
        || user.email().to_lowercase().contains(query)
        || user.id().to_string().contains(query)
}

enum DateBound {
    Instant(DateTime<FixedOffset>),
    Day(NaiveDate),
}

fn parse_bound(raw: &str) -> Option<DateBound> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(DateBound::Instant(instant));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(DateBound::Day)
}

// A calendar-day lower bound starts at UTC midnight; only the upper bound
// follows the engine offset.
fn lower_bound(raw: &str) -> Option<DateTime<Utc>> {
    match parse_bound(raw)? {
        DateBound::Instant(instant) => Some(instant.to_utc()),
        DateBound::Day(day) => Some(day.and_hms_opt(0, 0, 0)?.and_utc()),
    }
}

fn upper_bound(raw: &str, offset: FixedOffset) -> Option<DateTime<Utc>> {
    let day = match parse_bound(raw)? {
        DateBound::Instant(instant) => instant.with_timezone(&offset).date_naive(),
        DateBound::Day(day) => day,
    };
    at_offset(day.and_hms_milli_opt(23, 59, 59, 999)?, offset)
}

fn at_offset(local: NaiveDateTime, offset: FixedOffset) -> Option<DateTime<Utc>> {
    local
        .and_local_timezone(offset)
        .single()
        .map(|instant| instant.to_utc())
}

#[cfg(test)]
mod tests {
    //! Covers each narrowing stage and their composition.

    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::UserId;

    fn day(year: i32, month: u32, date: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, date, hour, 0, 0)
            .single()
            .expect("valid instant")
    }

    #[fixture]
    fn users() -> Vec<User> {
        vec![
            User::new(UserId::new(1), "Иван Петров 1", "user1@example.com")
                .with_role(Role::Admin)
                .with_status(Status::Active)
                .with_registration_date(day(2020, 1, 10, 8)),
            User::new(UserId::new(2), "Мария Сидорова 2", "user2@example.com")
                .with_role(Role::User)
                .with_status(Status::Inactive)
                .with_registration_date(day(2020, 3, 15, 23)),
            User::new(UserId::new(12), "Alex Brown", "alex@mail.org")
                .with_role(Role::Admin)
                .with_status(Status::Inactive)
                .with_registration_date(day(2020, 6, 1, 0)),
            User::new(UserId::new(21), "No Date", "nodate@example.com")
                .with_role(Role::Moderator)
                .with_status(Status::Active),
        ]
    }

    #[fixture]
    fn engine() -> FilterEngine {
        FilterEngine::with_offset(Utc.fix())
    }

    fn ids(users: &[&User]) -> Vec<u64> {
        users.iter().map(|user| user.id().get()).collect()
    }

    #[rstest]
    fn empty_criteria_keep_everything(users: Vec<User>, engine: FilterEngine) {
        assert!(!engine.is_active());
        assert_eq!(ids(&engine.apply(&users)), vec![1, 2, 12, 21]);
    }

    #[rstest]
    fn role_and_status_compose(users: Vec<User>, mut engine: FilterEngine) {
        engine.set_role(Some(Role::Admin));
        assert_eq!(ids(&engine.apply(&users)), vec![1, 12]);

        engine.set_status(Some(Status::Inactive));
        assert_eq!(ids(&engine.apply(&users)), vec![12]);
    }

    #[rstest]
    #[case("user", vec![1, 2])]
    #[case("  MAIL.ORG ", vec![12])]
    #[case("мария", vec![2])]
    #[case("1", vec![1, 12, 21])]
    #[case("   ", vec![1, 2, 12, 21])]
    fn search_matches_name_email_and_id(
        users: Vec<User>,
        mut engine: FilterEngine,
        #[case] query: &str,
        #[case] expected: Vec<u64>,
    ) {
        engine.set_search(query);
        assert_eq!(ids(&engine.apply(&users)), expected);
    }

    #[rstest]
    fn date_range_is_inclusive_by_calendar_day(users: Vec<User>, mut engine: FilterEngine) {
        engine.set_date_from("2020-01-10");
        engine.set_date_to("2020-03-15");
        assert_eq!(ids(&engine.apply(&users)), vec![1, 2]);
    }

    #[rstest]
    fn users_without_registration_never_match_a_bound(users: Vec<User>, mut engine: FilterEngine) {
        engine.set_date_from("2000-01-01");
        assert!(!ids(&engine.apply(&users)).contains(&21));
    }

    #[rstest]
    fn malformed_bounds_are_ignored(users: Vec<User>, mut engine: FilterEngine) {
        engine.set_date_from("yesterday");
        engine.set_date_to("2020-13-45");
        assert_eq!(ids(&engine.apply(&users)), vec![1, 2, 12, 21]);
    }

    #[rstest]
    fn rfc3339_lower_bound_is_used_as_is(users: Vec<User>, mut engine: FilterEngine) {
        engine.set_date_from("2020-03-15T22:00:00Z");
        assert_eq!(ids(&engine.apply(&users)), vec![2, 12]);
    }

    #[rstest]
    fn offset_shifts_calendar_days(users: Vec<User>) {
        let plus_three = FixedOffset::east_opt(3 * 3600).expect("valid offset");
        let mut engine = FilterEngine::with_offset(plus_three);
        // 2020-03-15T23:00Z is already 2020-03-16 at +03:00.
        engine.set_date_to("2020-03-15");

        assert_eq!(ids(&engine.apply(&users)), vec![1]);
    }

    #[rstest]
    fn calendar_lower_bound_starts_at_utc_midnight() {
        let plus_three = FixedOffset::east_opt(3 * 3600).expect("valid offset");
        let mut engine = FilterEngine::with_offset(plus_three);
        // 2020-01-09T22:00Z is already 2020-01-10 at +03:00 but precedes
        // 2020-01-10T00:00Z.
        let users = vec![
            User::new(UserId::new(1), "Late Evening", "late@example.com")
                .with_registration_date(day(2020, 1, 9, 22)),
            User::new(UserId::new(2), "Past Midnight", "early@example.com")
                .with_registration_date(day(2020, 1, 10, 0)),
        ];
        engine.set_date_from("2020-01-10");

        assert_eq!(ids(&engine.apply(&users)), vec![2]);
    }

    #[rstest]
    fn clearing_restores_identity(users: Vec<User>, mut engine: FilterEngine) {
        engine.set_search("alex");
        engine.set_role(Some(Role::User));
        engine.set_date_from("2020-01-01");
        engine.set_date_to("2020-12-31");
        assert!(engine.is_active());

        engine.clear_date_filter();
        assert!(engine.criteria().date_from.is_empty());
        assert!(engine.criteria().date_to.is_empty());
        assert!(engine.is_active());

        engine.clear_all();
        assert!(!engine.is_active());
        assert_eq!(engine.apply(&users).len(), users.len());
    }
}
