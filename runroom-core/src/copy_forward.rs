//! Which "copy menu" action the current view offers.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::fmt;

use crate::calendar::{week_start, View, WeekPosition};

/// A bulk copy of one period's menus onto another. Copies overwrite the
/// target period on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CopyAction {
    /// A past week with menus, copied onto the current week.
    CopyToCurrentWeek { source: NaiveDate, target: NaiveDate },
    /// The week before the selected one, copied onto the selected week.
    CopyFromPreviousWeek { source: NaiveDate, target: NaiveDate },
    /// A day other than today, copied onto today.
    CopyToToday { source: NaiveDate, target: NaiveDate },
}

impl CopyAction {
    pub fn source(&self) -> NaiveDate {
        match *self {
            CopyAction::CopyToCurrentWeek { source, .. }
            | CopyAction::CopyFromPreviousWeek { source, .. }
            | CopyAction::CopyToToday { source, .. } => source,
        }
    }

    pub fn target(&self) -> NaiveDate {
        match *self {
            CopyAction::CopyToCurrentWeek { target, .. }
            | CopyAction::CopyFromPreviousWeek { target, .. }
            | CopyAction::CopyToToday { target, .. } => target,
        }
    }

    pub fn is_weekly(&self) -> bool {
        !matches!(self, CopyAction::CopyToToday { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            CopyAction::CopyToCurrentWeek { .. } => "Copy to current week",
            CopyAction::CopyFromPreviousWeek { .. } => "Copy from previous week",
            CopyAction::CopyToToday { .. } => "Copy to today",
        }
    }

    /// Confirmation question shown before the copy runs.
    pub fn prompt(&self) -> String {
        match self {
            CopyAction::CopyToCurrentWeek { source, target } => format!(
                "Copy the menu of the week starting {} to the current week (starting {})? \
                 Existing menus in the current week will be overwritten.",
                source, target
            ),
            CopyAction::CopyFromPreviousWeek { source, target } => format!(
                "Copy the menu of the previous week (starting {}) to the week starting {}? \
                 Existing menus in that week will be overwritten.",
                source, target
            ),
            CopyAction::CopyToToday { source, target } => format!(
                "Copy the menu of {} to today ({})? Today's menu will be overwritten.",
                source, target
            ),
        }
    }
}

impl fmt::Display for CopyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} -> {})", self.label(), self.source(), self.target())
    }
}

/// Picks the copy action for the given view state, if any.
///
/// | view   | condition                         | action                  |
/// |--------|-----------------------------------|-------------------------|
/// | weekly | past week with menus              | copy to current week    |
/// | weekly | current or future week            | copy from previous week |
/// | daily  | not today, with a menu            | copy to today           |
pub fn available_copy_action(
    view: View,
    selected: NaiveDate,
    today: NaiveDate,
    has_menus: bool,
) -> Option<CopyAction> {
    match view {
        View::Weekly => {
            let selected_start = week_start(selected);
            match WeekPosition::of(selected, today) {
                WeekPosition::Past if has_menus => Some(CopyAction::CopyToCurrentWeek {
                    source: selected_start,
                    target: week_start(today),
                }),
                WeekPosition::Past => None,
                WeekPosition::Current | WeekPosition::Future => {
                    let previous = selected_start
                        .checked_sub_signed(Duration::weeks(1))
                        .map(week_start)?;
                    Some(CopyAction::CopyFromPreviousWeek {
                        source: previous,
                        target: selected_start,
                    })
                }
            }
        }
        View::Daily if selected != today && has_menus => Some(CopyAction::CopyToToday {
            source: selected,
            target: today,
        }),
        View::Daily => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // Wednesday
    fn today() -> NaiveDate {
        date(2024, 3, 13)
    }

    #[test]
    fn test_past_week_with_menus_copies_to_current() {
        let action = available_copy_action(View::Weekly, date(2024, 2, 28), today(), true);
        assert_eq!(
            action,
            Some(CopyAction::CopyToCurrentWeek {
                source: date(2024, 2, 26),
                target: date(2024, 3, 11),
            })
        );
    }

    #[test]
    fn test_past_week_without_menus_offers_nothing() {
        assert_eq!(
            available_copy_action(View::Weekly, date(2024, 2, 28), today(), false),
            None
        );
    }

    #[test]
    fn test_current_week_copies_from_previous() {
        let action = available_copy_action(View::Weekly, today(), today(), false);
        assert_eq!(
            action,
            Some(CopyAction::CopyFromPreviousWeek {
                source: date(2024, 3, 4),
                target: date(2024, 3, 11),
            })
        );
    }

    #[test]
    fn test_future_week_never_copies_to_current() {
        for has_menus in [true, false] {
            let action =
                available_copy_action(View::Weekly, date(2024, 3, 27), today(), has_menus);
            assert!(matches!(
                action,
                Some(CopyAction::CopyFromPreviousWeek { .. })
            ));
        }
    }

    #[test]
    fn test_sunday_selection_uses_folded_week() {
        let action = available_copy_action(View::Weekly, date(2024, 3, 17), today(), true);
        assert_eq!(
            action,
            Some(CopyAction::CopyFromPreviousWeek {
                source: date(2024, 3, 4),
                target: date(2024, 3, 11),
            })
        );
    }

    #[test]
    fn test_daily_copy_to_today() {
        let yesterday = date(2024, 3, 12);
        let action = available_copy_action(View::Daily, yesterday, today(), true);
        assert_eq!(
            action,
            Some(CopyAction::CopyToToday {
                source: yesterday,
                target: today(),
            })
        );
        assert!(!action.unwrap().is_weekly());
    }

    #[test]
    fn test_daily_today_or_empty_offers_nothing() {
        assert_eq!(available_copy_action(View::Daily, today(), today(), true), None);
        assert_eq!(
            available_copy_action(View::Daily, date(2024, 3, 12), today(), false),
            None
        );
    }

    #[test]
    fn test_prompt_mentions_dates() {
        let action = CopyAction::CopyToToday {
            source: date(2024, 3, 12),
            target: today(),
        };
        let prompt = action.prompt();
        assert!(prompt.contains("2024-03-12"));
        assert!(prompt.contains("2024-03-13"));
    }

    #[test]
    fn test_calendar_edges_do_not_panic() {
        assert!(matches!(
            available_copy_action(View::Weekly, NaiveDate::MAX, today(), false),
            Some(CopyAction::CopyFromPreviousWeek { .. })
        ));
        assert!(matches!(
            available_copy_action(View::Weekly, NaiveDate::MIN, today(), true),
            Some(CopyAction::CopyToCurrentWeek { .. })
        ));
        // No week before the first representable one.
        assert_eq!(
            available_copy_action(View::Weekly, NaiveDate::MIN, NaiveDate::MIN, true),
            None
        );
    }
}
