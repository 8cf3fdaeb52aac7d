//! Calendar arithmetic for the menu views.
//!
//! Weeks run Monday to Sunday. A Sunday is always folded into the week
//! that ends on it: week boundaries are computed from the preceding
//! Saturday whenever the selected date is a Sunday.

use chrono::{Datelike, Days, Duration, NaiveDate, Weekday};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Which slice of the calendar the console is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Weekly,
    Daily,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Weekly => write!(f, "weekly"),
            View::Daily => write!(f, "daily"),
        }
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" => Ok(View::Weekly),
            "daily" | "day" => Ok(View::Daily),
            _ => Err(format!("Invalid view '{}'. Valid options: weekly, daily", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Where the selected week sits relative to the current week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekPosition {
    Past,
    Current,
    Future,
}

impl WeekPosition {
    pub fn of(selected: NaiveDate, today: NaiveDate) -> Self {
        let selected_start = week_start(selected);
        let current_start = week_start(today);
        if selected_start < current_start {
            WeekPosition::Past
        } else if selected_start > current_start {
            WeekPosition::Future
        } else {
            WeekPosition::Current
        }
    }
}

impl fmt::Display for WeekPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekPosition::Past => write!(f, "past week"),
            WeekPosition::Current => write!(f, "current week"),
            WeekPosition::Future => write!(f, "future week"),
        }
    }
}

/// The date week boundaries are computed from: Sundays step back to Saturday.
pub fn week_anchor(date: NaiveDate) -> NaiveDate {
    if date.weekday() == Weekday::Sun {
        date.pred_opt().unwrap_or(date)
    } else {
        date
    }
}

/// Monday of the week `date` belongs to, clamped to the first
/// representable date.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let anchor = week_anchor(date);
    let back = u64::from(anchor.weekday().num_days_from_monday());
    anchor
        .checked_sub_days(Days::new(back))
        .unwrap_or(NaiveDate::MIN)
}

/// Sunday of the week `date` belongs to, clamped to the last
/// representable date.
pub fn week_end(date: NaiveDate) -> NaiveDate {
    let anchor = week_anchor(date);
    let ahead = 6 - u64::from(anchor.weekday().num_days_from_monday());
    anchor
        .checked_add_days(Days::new(ahead))
        .unwrap_or(NaiveDate::MAX)
}

/// Moves `date` by `amount` weeks (weekly view) or days (daily view).
///
/// Returns `date` unchanged if the result would fall outside the
/// representable calendar.
pub fn advance(view: View, date: NaiveDate, direction: Direction, amount: u32) -> NaiveDate {
    let step = match view {
        View::Weekly => Duration::weeks(i64::from(amount)),
        View::Daily => Duration::days(i64::from(amount)),
    };
    let shifted = match direction {
        Direction::Next => date.checked_add_signed(step),
        Direction::Previous => date.checked_sub_signed(step),
    };
    shifted.unwrap_or(date)
}

/// A concrete calendar range to fetch and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Period {
    Week { start: NaiveDate, end: NaiveDate },
    Day { date: NaiveDate },
}

impl Period {
    pub fn resolve(view: View, selected: NaiveDate) -> Self {
        match view {
            View::Weekly => Period::Week {
                start: week_start(selected),
                end: week_end(selected),
            },
            View::Daily => Period::Day { date: selected },
        }
    }

    /// `04 Mar - 10 Mar 2024` for a week, `Monday, 04 Mar 2024` for a day.
    pub fn label(&self) -> String {
        match self {
            Period::Week { start, end } => format!(
                "{} - {}",
                start.format("%d %b"),
                end.format("%d %b %Y")
            ),
            Period::Day { date } => date.format("%A, %d %b %Y").to_string(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            Period::Week { start, end } => *start <= date && date <= *end,
            Period::Day { date: day } => *day == date,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Formats a date the way the API expects it in query strings.
pub fn wire_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a `YYYY-MM-DD` date from user input. Years outside
/// 0001-9999 cannot be sent to the API and are rejected.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", s))?;
    if !(1..=9999).contains(&date.year()) {
        return Err(format!("Invalid date '{}'. Years run from 0001 to 9999.", s));
    }
    Ok(date)
}
