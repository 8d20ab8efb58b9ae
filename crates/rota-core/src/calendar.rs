//! Month arithmetic and the fixed 42-cell grid layout.
//!
//! The grid is always 6 rows of 7 columns regardless of where the month
//! starts or how many days it has, so the rendered calendar never changes
//! height while navigating months. Weeks start on Monday.

use crate::datekey::DateKey;
use chrono::{Datelike, Local, NaiveDate};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Total cells in the fixed month layout (6 rows x 7 columns).
pub const GRID_CELLS: usize = 42;

/// Days per grid row.
pub const GRID_COLS: usize = 7;

/// A year-month pair failed validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid month '{0}': expected YYYY-MM")]
pub struct InvalidYearMonth(pub String);

/// A calendar month identified by year and 1-based month number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// The month containing today's local date.
    #[must_use]
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// The previous calendar month.
    #[must_use]
    pub const fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The next calendar month.
    #[must_use]
    pub const fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The `YYYY-MM` prefix shared by all date keys in this month.
    #[must_use]
    pub fn prefix(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Whether `key` falls inside this month.
    #[must_use]
    pub fn contains(&self, key: &DateKey) -> bool {
        key.month_prefix() == self.prefix()
    }

    /// The date key for `day` of this month.
    #[must_use]
    pub fn date_key(&self, day: u32) -> DateKey {
        DateKey::from_ymd(self.year, self.month, day)
    }

    /// Number of days in this month.
    #[must_use]
    pub fn day_count(&self) -> u32 {
        days_in_month(self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = InvalidYearMonth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || InvalidYearMonth(s.to_string());
        let (y, m) = s.split_once('-').ok_or_else(err)?;
        if y.len() != 4 || m.len() != 2 {
            return Err(err());
        }
        let year: i32 = y.parse().map_err(|_| err())?;
        let month: u32 = m.parse().map_err(|_| err())?;
        if !(1..=12).contains(&month) {
            return Err(err());
        }
        Ok(Self { year, month })
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// Number of days in the given month.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (first, next_first) {
        (Some(a), Some(b)) => b.signed_duration_since(a).num_days().unsigned_abs() as u32,
        _ => 0,
    }
}

/// Monday-first weekday offset (Monday = 0 .. Sunday = 6) of day 1.
#[must_use]
pub fn first_weekday_offset(ym: YearMonth) -> usize {
    NaiveDate::from_ymd_opt(ym.year, ym.month, 1)
        .map(|d| d.weekday().num_days_from_monday() as usize)
        .unwrap_or(0)
}

/// Whether `key` is today's local date.
#[must_use]
pub fn is_today(key: &DateKey) -> bool {
    let today = Local::now().date_naive();
    key.as_str() == today.format("%Y-%m-%d").to_string()
}

/// One slot in the 42-cell layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Leading/trailing placeholder outside the month.
    Blank,
    /// A real day of the month (1-based).
    Day(u32),
}

/// Fixed 6x7 layout for one month.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    ym: YearMonth,
    cells: Vec<Cell>,
}

impl MonthGrid {
    /// Lay out `ym` into exactly [`GRID_CELLS`] slots.
    #[must_use]
    pub fn build(ym: YearMonth) -> Self {
        let leading = first_weekday_offset(ym);
        let days = ym.day_count();
        let mut cells = Vec::with_capacity(GRID_CELLS);
        cells.resize(leading, Cell::Blank);
        cells.extend((1..=days).map(Cell::Day));
        cells.resize(GRID_CELLS, Cell::Blank);
        Self { ym, cells }
    }

    /// The month this grid was built for.
    #[must_use]
    pub const fn year_month(&self) -> YearMonth {
        self.ym
    }

    /// All 42 cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The six rows of the layout.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(GRID_COLS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_counts_handle_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn monday_first_offset() {
        // 2024-05-01 was a Wednesday.
        let ym = YearMonth {
            year: 2024,
            month: 5,
        };
        assert_eq!(first_weekday_offset(ym), 2);
        // 2024-04-01 was a Monday.
        let ym = YearMonth {
            year: 2024,
            month: 4,
        };
        assert_eq!(first_weekday_offset(ym), 0);
        // 2024-09-01 was a Sunday.
        let ym = YearMonth {
            year: 2024,
            month: 9,
        };
        assert_eq!(first_weekday_offset(ym), 6);
    }

    #[test]
    fn grid_for_wednesday_start_30_day_month() {
        // April 2026 starts on a Wednesday and has 30 days.
        let ym = YearMonth {
            year: 2026,
            month: 4,
        };
        assert_eq!(first_weekday_offset(ym), 2);
        let grid = MonthGrid::build(ym);
        assert_eq!(grid.cells().len(), GRID_CELLS);

        let leading = grid
            .cells()
            .iter()
            .take_while(|c| **c == Cell::Blank)
            .count();
        let days = grid
            .cells()
            .iter()
            .filter(|c| matches!(c, Cell::Day(_)))
            .count();
        assert_eq!(leading, 2);
        assert_eq!(days, 30);
        assert_eq!(GRID_CELLS - leading - days, 10);
    }

    #[test]
    fn grid_is_always_42_cells() {
        for (year, month) in [(2024, 2), (2024, 6), (2025, 2), (2026, 8), (2026, 12)] {
            let grid = MonthGrid::build(YearMonth { year, month });
            assert_eq!(grid.cells().len(), GRID_CELLS);
            assert_eq!(grid.rows().count(), 6);
        }
    }

    #[test]
    fn grid_days_are_contiguous_and_ordered() {
        let grid = MonthGrid::build(YearMonth {
            year: 2024,
            month: 5,
        });
        let days: Vec<u32> = grid
            .cells()
            .iter()
            .filter_map(|c| match c {
                Cell::Day(d) => Some(*d),
                Cell::Blank => None,
            })
            .collect();
        assert_eq!(days, (1..=31).collect::<Vec<_>>());
    }

    #[test]
    fn month_navigation_wraps_year_boundaries() {
        let jan = YearMonth {
            year: 2024,
            month: 1,
        };
        assert_eq!(
            jan.prev(),
            YearMonth {
                year: 2023,
                month: 12
            }
        );
        let dec = YearMonth {
            year: 2024,
            month: 12,
        };
        assert_eq!(
            dec.next(),
            YearMonth {
                year: 2025,
                month: 1
            }
        );
    }

    #[test]
    fn year_month_parses_and_filters() {
        let ym: YearMonth = "2024-05".parse().expect("valid month");
        assert_eq!(ym.prefix(), "2024-05");
        assert!(ym.contains(&"2024-05-01".parse().expect("key")));
        assert!(!ym.contains(&"2024-06-01".parse().expect("key")));

        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("2024-5".parse::<YearMonth>().is_err());
        assert!("202405".parse::<YearMonth>().is_err());
    }
}
