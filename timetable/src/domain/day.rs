//! Day-of-week codes and free-text day parsing.
//!
//! Internally every day is one of seven two-letter Russian codes
//! (`пн`, `вт`, `ср`, `чт`, `пт`, `сб`, `вс`). User input may use full
//! Russian names, abbreviations or English names; [`translate_day`] maps
//! them onto the canonical codes.

use chrono::{Datelike, Local, Weekday};
use serde::Serialize;
use std::fmt;

use super::TokenPolicy;

/// The seven canonical codes, Monday first.
pub const DAY_CODES: [&str; 7] = ["пн", "вт", "ср", "чт", "пт", "сб", "вс"];

/// Error returned for a day token that does not name a day.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized day {0:?}")]
pub struct UnknownDay(pub String);

/// A canonical day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DayCode {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayCode {
    /// All days, Monday first.
    pub fn all() -> [DayCode; 7] {
        [
            DayCode::Mon,
            DayCode::Tue,
            DayCode::Wed,
            DayCode::Thu,
            DayCode::Fri,
            DayCode::Sat,
            DayCode::Sun,
        ]
    }

    /// The two-letter code.
    pub fn as_str(self) -> &'static str {
        DAY_CODES[self.index()]
    }

    /// Zero-based position in the week, Monday = 0.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a canonical code, ignoring case.
    pub fn from_code(code: &str) -> Option<Self> {
        let lower = code.trim().to_lowercase();
        Self::all().into_iter().find(|day| day.as_str() == lower)
    }

    /// Map an ISO weekday number (Monday = 1 ... Sunday = 7).
    ///
    /// Anything outside 1-7 maps to Monday.
    pub fn from_iso_number(number: u32) -> Self {
        match number {
            2 => DayCode::Tue,
            3 => DayCode::Wed,
            4 => DayCode::Thu,
            5 => DayCode::Fri,
            6 => DayCode::Sat,
            7 => DayCode::Sun,
            _ => DayCode::Mon,
        }
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        Self::from_iso_number(weekday.number_from_monday())
    }

    /// Today's day according to the local clock.
    pub fn today() -> Self {
        Self::from_weekday(Local::now().weekday())
    }
}

impl From<Weekday> for DayCode {
    fn from(weekday: Weekday) -> Self {
        Self::from_weekday(weekday)
    }
}

impl fmt::Display for DayCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recognized spellings for each day, in week order.
const DAY_ALIASES: [(DayCode, &[&str]); 7] = [
    (DayCode::Mon, &["понедельник", "понед", "mon", "monday"]),
    (DayCode::Tue, &["вторник", "втор", "tue", "tuesday"]),
    (DayCode::Wed, &["среда", "сред", "wed", "wednesday"]),
    (DayCode::Thu, &["четверг", "четв", "thu", "thursday"]),
    (DayCode::Fri, &["пятница", "пятн", "fri", "friday"]),
    (DayCode::Sat, &["суббота", "субб", "sat", "saturday"]),
    (DayCode::Sun, &["воскресенье", "воскр", "sun", "sunday"]),
];

fn lookup_alias(lower: &str) -> Option<DayCode> {
    DAY_ALIASES
        .iter()
        .find(|(_, aliases)| aliases.contains(&lower))
        .map(|(day, _)| *day)
}

/// Map a day token onto a two-letter code.
///
/// Known full names, abbreviations and English names map to their
/// canonical code. Anything else becomes its first two characters,
/// lowercased, so canonical codes pass through unchanged and `"ПН"`
/// becomes `"пн"`. Unrecognized words such as `"holiday"` become `"ho"`.
///
/// # Examples
///
/// ```
/// use timetable::domain::translate_day;
///
/// assert_eq!(translate_day("Понедельник"), "пн");
/// assert_eq!(translate_day("fri"), "пт");
/// assert_eq!(translate_day("СБ"), "сб");
/// assert_eq!(translate_day("holiday"), "ho");
/// ```
pub fn translate_day(token: &str) -> String {
    let lower = token.to_lowercase();
    match lookup_alias(&lower) {
        Some(day) => day.as_str().to_string(),
        None => lower.chars().take(2).collect(),
    }
}

/// Translate a day token under the given policy.
///
/// Under [`TokenPolicy::Reject`] the result must be a canonical code.
pub fn translate_day_with(token: &str, policy: TokenPolicy) -> Result<String, UnknownDay> {
    let code = translate_day(token);
    if policy.is_strict() && DayCode::from_code(&code).is_none() {
        return Err(UnknownDay(token.to_string()));
    }
    Ok(code)
}

/// Split a free-text list of days and translate each entry.
///
/// Commas, semicolons and spaces all separate entries; empty entries are
/// dropped. Unknown tokens use the lenient fallback of [`translate_day`].
///
/// # Examples
///
/// ```
/// use timetable::domain::parse_days_string;
///
/// assert_eq!(
///     parse_days_string("Понедельник, ВТ; ср fri"),
///     ["пн", "вт", "ср", "пт"]
/// );
/// ```
pub fn parse_days_string(text: &str) -> Vec<String> {
    split_day_tokens(text).map(translate_day).collect()
}

/// Like [`parse_days_string`], applying `policy` to every entry.
pub fn parse_days_with(text: &str, policy: TokenPolicy) -> Result<Vec<String>, UnknownDay> {
    split_day_tokens(text)
        .map(|token| translate_day_with(token, policy))
        .collect()
}

fn split_day_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split([',', ';', ' '])
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Join day codes for display.
pub fn format_days<S: AsRef<str>>(days: &[S]) -> String {
    days.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Is `day` one of `days`?
///
/// `day` is translated first, and the comparison ignores case.
pub fn is_day_in_list<S: AsRef<str>>(day: &str, days: &[S]) -> bool {
    let wanted = translate_day(day);
    days.iter()
        .any(|candidate| candidate.as_ref().to_lowercase() == wanted)
}

/// Does a route with these operating days run on `today`?
pub fn is_route_active_on<S: AsRef<str>>(days: &[S], today: DayCode) -> bool {
    is_day_in_list(today.as_str(), days)
}
