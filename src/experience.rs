//! Experience counter: elapsed calendar time since a start date

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Experience {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

impl Experience {
    /// Years, months and days from `start` to `today`
    ///
    /// Whole months are counted first; the remaining days are measured from
    /// `start` advanced by those months, clamped to the end of a short month.
    pub fn between(start: NaiveDate, today: NaiveDate) -> Self {
        let zero = Self {
            years: 0,
            months: 0,
            days: 0,
        };
        if today <= start {
            return zero;
        }

        let mut total_months = (today.year() - start.year()) * 12 + today.month() as i32 - start.month() as i32;
        if today.day() < start.day() {
            total_months -= 1;
        }

        let Some(anchor) = start.checked_add_months(Months::new(total_months.max(0) as u32)) else {
            return zero;
        };
        let days = (today - anchor).num_days().max(0) as i32;

        Self {
            years: total_months / 12,
            months: total_months % 12,
            days,
        }
    }

    /// Compact form, e.g. `2Y 4M 16D`; years are omitted when zero
    pub fn compact(&self) -> String {
        let mut out = String::new();
        if self.years > 0 {
            out.push_str(&format!("{}Y ", self.years));
        }
        out.push_str(&format!("{}M {}D", self.months, self.days));
        out
    }

    /// Tenure form, e.g. `(2 Years, 4 Months)`
    pub fn tenure(&self) -> String {
        let mut out = String::new();
        if self.years > 0 {
            out.push_str(&format!("{} {}, ", self.years, plural(self.years, "Year")));
        }
        out.push_str(&format!("{} {}", self.months, plural(self.months, "Month")));
        format!("({})", out)
    }
}

fn plural(n: i32, word: &str) -> String {
    if n == 1 { word.to_string() } else { format!("{}s", word) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_simple_span() {
        let exp = Experience::between(date(2024, 6, 1), date(2026, 10, 17));
        assert_eq!(exp, Experience { years: 2, months: 4, days: 16 });
        assert_eq!(exp.compact(), "2Y 4M 16D");
        assert_eq!(exp.tenure(), "(2 Years, 4 Months)");
    }

    #[test]
    fn test_short_month_clamps_anchor() {
        // Jan 31 + 1 month lands on Feb 28
        let exp = Experience::between(date(2025, 1, 31), date(2025, 3, 1));
        assert_eq!(exp, Experience { years: 0, months: 1, days: 1 });
    }

    #[test]
    fn test_borrows_months_from_year() {
        let exp = Experience::between(date(2024, 6, 15), date(2025, 2, 10));
        assert_eq!(exp, Experience { years: 0, months: 7, days: 26 });
        assert_eq!(exp.compact(), "7M 26D");
        assert_eq!(exp.tenure(), "(7 Months)");
    }

    #[test]
    fn test_singular_units() {
        let exp = Experience::between(date(2024, 6, 1), date(2025, 7, 1));
        assert_eq!(exp.tenure(), "(1 Year, 1 Month)");
        assert_eq!(exp.compact(), "1Y 1M 0D");
    }

    #[test]
    fn test_future_start_is_zero() {
        let exp = Experience::between(date(2030, 1, 1), date(2026, 1, 1));
        assert_eq!(exp.compact(), "0M 0D");
        assert_eq!(exp.tenure(), "(0 Months)");
    }
}
