//! Display labels for period pickers.
//!
//! Labels are Russian. The current, still-open period gets a marker so the
//! user can tell it apart from periods with a finished report.

use crate::calendar::{is_current_month, is_current_week, week_end, week_start};
use crate::clock::Clock;
use crate::models::{MonthId, WeekId};

const MONTH_NAMES: [&str; 12] = [
    "Январь",
    "Февраль",
    "Март",
    "Апрель",
    "Май",
    "Июнь",
    "Июль",
    "Август",
    "Сентябрь",
    "Октябрь",
    "Ноябрь",
    "Декабрь",
];

const WEEK_PREFIX: &str = "Неделя ";
const INCOMPLETE_WEEK: &str = " · неполная";
const INCOMPLETE_MONTH: &str = " · неполный";

/// Nominative Russian name of `month`.
pub fn month_name(month: MonthId) -> &'static str {
    MONTH_NAMES[month.month() as usize - 1]
}

/// `"Неделя 5, 2026 (26.01 – 01.02)"`, plus an incomplete marker for the
/// current week.
pub fn format_week_label(week: WeekId, clock: &dyn Clock) -> String {
    let mut label = format!(
        "{WEEK_PREFIX}{}, {} ({} – {})",
        week.week(),
        week.year(),
        week_start(week).format("%d.%m"),
        week_end(week).format("%d.%m"),
    );
    if is_current_week(week, clock) {
        label.push_str(INCOMPLETE_WEEK);
    }
    label
}

/// `"Январь 2026"`, plus an incomplete marker for the current month.
pub fn format_month_label(month: MonthId, clock: &dyn Clock) -> String {
    let mut label = format!("{} {}", month_name(month), month.year());
    if is_current_month(month, clock) {
        label.push_str(INCOMPLETE_MONTH);
    }
    label
}

/// Recover `(week, year)` from a label built by [`format_week_label`].
pub fn parse_week_label(label: &str) -> Option<(u32, i32)> {
    let rest = label.strip_prefix(WEEK_PREFIX)?;
    let (week, rest) = rest.split_once(", ")?;
    let year = rest.split_whitespace().next()?;
    Some((week.parse().ok()?, year.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::weeks_in_iso_year;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock::on(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap())
    }

    #[test]
    fn week_label_for_completed_week() {
        let week: WeekId = "2026-W05".parse().unwrap();
        assert_eq!(
            format_week_label(week, &clock()),
            "Неделя 5, 2026 (26.01 – 01.02)"
        );
    }

    #[test]
    fn week_label_marks_current_week() {
        let week: WeekId = "2026-W42".parse().unwrap();
        let label = format_week_label(week, &clock());
        assert!(label.ends_with(INCOMPLETE_WEEK), "{label}");
    }

    #[test]
    fn month_labels() {
        let clock = clock();
        assert_eq!(
            format_month_label("2026-01".parse().unwrap(), &clock),
            "Январь 2026"
        );
        assert_eq!(
            format_month_label("2026-10".parse().unwrap(), &clock),
            "Октябрь 2026 · неполный"
        );
    }

    #[test]
    fn month_names_cover_the_year() {
        let first: MonthId = "2026-01".parse().unwrap();
        let names: Vec<_> = (0..12).map(|i| month_name(first.offset(i))).collect();
        assert_eq!(names.first(), Some(&"Январь"));
        assert_eq!(names.last(), Some(&"Декабрь"));
        assert_eq!(names, MONTH_NAMES);
    }

    #[test]
    fn week_label_round_trips_number_and_year() {
        let clock = clock();
        for year in [2020, 2025, 2026, 2027] {
            for week in weeks_in_iso_year(year) {
                let label = format_week_label(week, &clock);
                assert_eq!(
                    parse_week_label(&label),
                    Some((week.week(), week.year())),
                    "{label}"
                );
            }
        }
    }

    #[test]
    fn week_label_uses_iso_year() {
        // 2026-W01 starts on 29 Dec 2025
        let week: WeekId = "2026-W01".parse().unwrap();
        assert_eq!(
            format_week_label(week, &clock()),
            "Неделя 1, 2026 (29.12 – 04.01)"
        );
    }

    #[test]
    fn parse_week_label_rejects_other_text() {
        assert_eq!(parse_week_label("Январь 2026"), None);
        assert_eq!(parse_week_label("Неделя x, 2026"), None);
    }
}
