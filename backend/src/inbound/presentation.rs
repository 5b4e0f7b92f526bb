//! Label and formatting helpers for directory rows.
//!
//! All helpers are pure: callers pass the current instant and the UTC offset
//! used for calendar dates.

use chrono::{DateTime, Datelike, FixedOffset, Utc};
use serde::Serialize;

use crate::domain::{Role, User};

const MONTHS_GENITIVE: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

const AVATAR_COLOURS: [&str; 5] = ["#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#98D8C8"];
const FALLBACK_COLOUR: &str = "#FF6B6B";

/// Placeholder shown for a missing date.
pub const MISSING_DATE: &str = "-";

/// Human-readable role name; empty for an unset role.
pub const fn role_label(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Admin) => "Администратор",
        Some(Role::User) => "Пользователь",
        Some(Role::Moderator) => "Модератор",
        None => "",
    }
}

/// Long-form date such as `15 января 2024 г.`.
///
/// ```
/// use backend::inbound::presentation::format_date;
/// use chrono::{FixedOffset, TimeZone, Utc};
///
/// let utc = FixedOffset::east_opt(0).expect("offset");
/// let at = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).single();
/// assert_eq!(format_date(at, utc), "15 января 2024 г.");
/// assert_eq!(format_date(None, utc), "-");
/// ```
pub fn format_date(at: Option<DateTime<Utc>>, offset: FixedOffset) -> String {
    let Some(instant) = at else {
        return MISSING_DATE.to_owned();
    };
    let local = instant.with_timezone(&offset);
    let month = MONTHS_GENITIVE
        .get(local.month0() as usize)
        .copied()
        .unwrap_or_default();
    format!("{} {month} {} г.", local.day(), local.year())
}

/// Elapsed time since `at` in words, falling back to [`format_date`] after
/// 30 days.
pub fn format_relative_time(
    at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> String {
    let Some(instant) = at else {
        return MISSING_DATE.to_owned();
    };
    let elapsed = now.signed_duration_since(instant);
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "только что".to_owned();
    }
    if minutes < 60 {
        return format!("{minutes} мин. назад");
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{hours} ч. назад");
    }
    let days = elapsed.num_days();
    if days < 30 {
        return format!("{days} дн. назад");
    }
    format_date(at, offset)
}

/// CSS class describing how recently a user was active.
pub fn activity_class(at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> &'static str {
    let Some(instant) = at else {
        return "activity-old";
    };
    match now.signed_duration_since(instant).num_days() {
        ..1 => "activity-recent",
        1..7 => "activity-week",
        7..30 => "activity-month",
        _ => "activity-old",
    }
}

/// Inline SVG avatar showing the first letter of `name`.
///
/// The background colour is picked from a fixed palette by the UTF-16 code
/// of the first character.
pub fn default_avatar(name: &str) -> String {
    let initial: String = name.chars().take(1).flat_map(char::to_uppercase).collect();
    let colour = name
        .encode_utf16()
        .next()
        .and_then(|code| AVATAR_COLOURS.get(usize::from(code) % AVATAR_COLOURS.len()))
        .copied()
        .unwrap_or(FALLBACK_COLOUR);
    let encoded_colour = colour.replace('#', "%23");
    format!(
        "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='40' height='40'%3E\
         %3Crect width='40' height='40' fill='{encoded_colour}'/%3E\
         %3Ctext x='50%25' y='50%25' dominant-baseline='middle' text-anchor='middle' \
         font-family='Arial' font-size='20' fill='white'%3E{initial}%3C/text%3E%3C/svg%3E"
    )
}

/// Display strings for one table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowLabels {
    /// Avatar image URL, generated from the name when the user has none or
    /// an empty one.
    pub avatar: String,
    /// Role name.
    pub role: &'static str,
    /// Long-form registration date.
    pub registered: String,
    /// Time since the last activity.
    pub last_seen: String,
    /// Recency class of the last activity.
    pub activity_class: &'static str,
}

/// Labels for `user` as seen at `now`, with calendar dates in `offset`.
pub fn row_labels(user: &User, now: DateTime<Utc>, offset: FixedOffset) -> RowLabels {
    RowLabels {
        avatar: user
            .avatar()
            .filter(|avatar| !avatar.is_empty())
            .map_or_else(|| default_avatar(user.name()), str::to_owned),
        role: role_label(user.role()),
        registered: format_date(user.registration_date(), offset),
        last_seen: format_relative_time(user.last_activity(), now, offset),
        activity_class: activity_class(user.last_activity(), now),
    }
}

#[cfg(test)]
mod tests {
    //! Covers labels, date wording and avatar rendering.

    use chrono::{TimeDelta, TimeZone};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::UserId;

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0)
            .single()
            .expect("valid instant")
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).expect("valid offset")
    }

    #[rstest]
    #[case(Some(Role::Admin), "Администратор")]
    #[case(Some(Role::User), "Пользователь")]
    #[case(Some(Role::Moderator), "Модератор")]
    #[case(None, "")]
    fn role_labels(#[case] role: Option<Role>, #[case] label: &str) {
        assert_eq!(role_label(role), label);
    }

    #[rstest]
    fn date_uses_offset_for_calendar_day() {
        let at = Utc.with_ymd_and_hms(2023, 12, 31, 22, 30, 0).single();
        let plus_three = FixedOffset::east_opt(3 * 3600).expect("valid offset");

        assert_eq!(format_date(at, utc()), "31 декабря 2023 г.");
        assert_eq!(format_date(at, plus_three), "1 января 2024 г.");
    }

    #[rstest]
    #[case(TimeDelta::seconds(30), "только что")]
    #[case(TimeDelta::minutes(5), "5 мин. назад")]
    #[case(TimeDelta::minutes(59), "59 мин. назад")]
    #[case(TimeDelta::hours(3), "3 ч. назад")]
    #[case(TimeDelta::days(2), "2 дн. назад")]
    #[case(TimeDelta::days(29), "29 дн. назад")]
    #[case(TimeDelta::days(40), "30 января 2024 г.")]
    #[case(TimeDelta::seconds(-90), "только что")]
    fn relative_time_wording(now: DateTime<Utc>, #[case] ago: TimeDelta, #[case] text: &str) {
        assert_eq!(format_relative_time(Some(now - ago), now, utc()), text);
    }

    #[rstest]
    fn relative_time_of_missing_date(now: DateTime<Utc>) {
        assert_eq!(format_relative_time(None, now, utc()), "-");
    }

    #[rstest]
    #[case(Some(TimeDelta::hours(23)), "activity-recent")]
    #[case(Some(TimeDelta::days(1)), "activity-week")]
    #[case(Some(TimeDelta::days(6)), "activity-week")]
    #[case(Some(TimeDelta::days(7)), "activity-month")]
    #[case(Some(TimeDelta::days(30)), "activity-old")]
    #[case(None, "activity-old")]
    fn activity_classes(
        now: DateTime<Utc>,
        #[case] ago: Option<TimeDelta>,
        #[case] class: &str,
    ) {
        assert_eq!(activity_class(ago.map(|delta| now - delta), now), class);
    }

    #[rstest]
    #[case("Ada", "%23FF6B6B", "A")]
    #[case("Bob", "%234ECDC4", "B")]
    #[case("дмитрий", "%234ECDC4", "Д")]
    #[case("Дмитрий", "%2398D8C8", "Д")]
    #[case("", "%23FF6B6B", "")]
    fn avatar_colour_and_initial(#[case] name: &str, #[case] colour: &str, #[case] initial: &str) {
        let avatar = default_avatar(name);

        assert!(avatar.starts_with("data:image/svg+xml,"));
        assert!(avatar.contains(&format!("fill='{colour}'")), "{avatar}");
        assert!(avatar.ends_with(&format!("%3E{initial}%3C/text%3E%3C/svg%3E")));
    }

    #[rstest]
    fn row_labels_combine_every_helper(now: DateTime<Utc>) {
        let user = User::new(UserId::new(1), "Ada", "ada@example.com")
            .with_role(Role::Admin)
            .with_registration_date(now - TimeDelta::days(40))
            .with_last_activity(now - TimeDelta::hours(3));

        let labels = row_labels(&user, now, utc());

        assert_eq!(labels.role, "Администратор");
        assert_eq!(labels.registered, "30 января 2024 г.");
        assert_eq!(labels.last_seen, "3 ч. назад");
        assert_eq!(labels.activity_class, "activity-recent");
        assert_eq!(labels.avatar, default_avatar("Ada"));
    }

    #[rstest]
    fn row_labels_keep_an_explicit_avatar(now: DateTime<Utc>) {
        let user = User::new(UserId::new(2), "Bob", "bob@example.com")
            .with_avatar("https://example.com/bob.png");

        let labels = row_labels(&user, now, utc());

        assert_eq!(labels.avatar, "https://example.com/bob.png");
        assert_eq!(labels.role, "");
        assert_eq!(labels.registered, "-");
        assert_eq!(labels.last_seen, "-");
        assert_eq!(labels.activity_class, "activity-old");
    }

    #[rstest]
    fn empty_avatar_falls_back_to_initial(now: DateTime<Utc>) {
        let user = User::new(UserId::new(3), "Grace", "grace@example.com").with_avatar("");

        assert_eq!(row_labels(&user, now, utc()).avatar, default_avatar("Grace"));
    }
}
