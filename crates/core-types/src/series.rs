use crate::error::CoreError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a fund (or a benchmark index) within the evaluated universe.
///
/// The identifier is opaque to the engine; callers typically use an ISIN or an
/// internal security id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FundId(String);

impl FundId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FundId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A single dated monthly return observation.
///
/// The value is a decimal fraction (0.01 = +1%); `None` marks a month where no
/// return is available. Missing months are carried explicitly on the axis, never
/// silently dropped, so that window lengths always count calendar months.
pub type Observation = (NaiveDate, Option<f64>);

/// An ordered monthly return series for one fund or benchmark.
///
/// Invariants enforced on construction:
/// - dates are strictly increasing;
/// - consecutive dates are exactly one calendar month apart (the day within the
///   month is free, so both month-end and month-start conventions work).
///
/// The engine treats a series as read-only input; it is owned and loaded by the
/// caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Observation>", into = "Vec<Observation>")]
pub struct ReturnSeries {
    dates: Vec<NaiveDate>,
    values: Vec<Option<f64>>,
}

impl ReturnSeries {
    /// Builds a series from dated observations, validating the monthly axis.
    pub fn from_observations(
        observations: impl IntoIterator<Item = Observation>,
    ) -> Result<Self, CoreError> {
        let mut dates = Vec::new();
        let mut values = Vec::new();

        for (date, value) in observations {
            if let Some(&previous) = dates.last() {
                if date <= previous {
                    return Err(CoreError::NonMonotonicDates {
                        previous,
                        current: date,
                    });
                }
                if month_ordinal(date) != month_ordinal(previous) + 1 {
                    return Err(CoreError::NonMonthlySpacing {
                        previous,
                        current: date,
                    });
                }
            }
            dates.push(date);
            values.push(value);
        }

        Ok(Self { dates, values })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Whether `other` is observed on exactly the same monthly axis.
    ///
    /// Relative metrics require this; the evaluator rejects misaligned pairs as
    /// a caller contract violation rather than re-aligning them.
    pub fn same_axis_as(&self, other: &Self) -> bool {
        self.dates == other.dates
    }

    /// The trailing slice of `window_months` values ending at `end_index`
    /// (inclusive), or `None` when fewer than `window_months` calendar slots
    /// precede it. Partial windows at the start of history are never returned.
    pub fn window_ending(&self, end_index: usize, window_months: usize) -> Option<&[Option<f64>]> {
        if window_months == 0 || end_index >= self.len() {
            return None;
        }
        let start = (end_index + 1).checked_sub(window_months)?;
        Some(&self.values[start..=end_index])
    }
}

impl TryFrom<Vec<Observation>> for ReturnSeries {
    type Error = CoreError;

    fn try_from(observations: Vec<Observation>) -> Result<Self, Self::Error> {
        Self::from_observations(observations)
    }
}

impl From<ReturnSeries> for Vec<Observation> {
    fn from(series: ReturnSeries) -> Self {
        series.dates.into_iter().zip(series.values).collect()
    }
}

/// Months since year zero, used to check that two dates are adjacent months.
fn month_ordinal(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn builds_from_monthly_observations() {
        let series = ReturnSeries::from_observations(vec![
            (date(2024, 1, 31), Some(0.01)),
            (date(2024, 2, 29), None),
            (date(2024, 3, 31), Some(-0.02)),
        ])
        .unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.values()[1], None);
    }

    #[test]
    fn rejects_unordered_dates() {
        let result = ReturnSeries::from_observations(vec![
            (date(2024, 2, 29), Some(0.01)),
            (date(2024, 1, 31), Some(0.02)),
        ]);
        assert!(matches!(result, Err(CoreError::NonMonotonicDates { .. })));
    }

    #[test]
    fn rejects_month_gaps() {
        let result = ReturnSeries::from_observations(vec![
            (date(2024, 1, 31), Some(0.01)),
            (date(2024, 3, 31), Some(0.02)),
        ]);
        assert!(matches!(result, Err(CoreError::NonMonthlySpacing { .. })));
    }

    #[test]
    fn year_boundary_counts_as_adjacent_months() {
        let result = ReturnSeries::from_observations(vec![
            (date(2023, 12, 31), Some(0.01)),
            (date(2024, 1, 31), Some(0.02)),
        ]);
        assert!(result.is_ok());
    }

    #[test]
    fn window_ending_requires_full_window() {
        let series = ReturnSeries::from_observations(
            (0u32..5).map(|i| (date(2024, 1 + i, 28), Some(0.01 * f64::from(i)))),
        )
        .unwrap();

        assert!(series.window_ending(1, 3).is_none());
        let slice = series.window_ending(4, 3).unwrap();
        assert_eq!(slice.len(), 3);
        assert_eq!(slice[0], Some(0.02));
        assert!(series.window_ending(4, 6).is_none());
        assert!(series.window_ending(5, 1).is_none());
    }

    #[test]
    fn serde_round_trip_preserves_missing_markers() {
        let series = ReturnSeries::from_observations(vec![
            (date(2024, 1, 31), Some(0.015)),
            (date(2024, 2, 29), None),
        ])
        .unwrap();

        let json = serde_json::to_string(&series).unwrap();
        let back: ReturnSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(back, series);
    }

    #[test]
    fn serde_rejects_invalid_axis() {
        let json = r#"[["2024-01-31", 0.01], ["2024-04-30", 0.02]]"#;
        assert!(serde_json::from_str::<ReturnSeries>(json).is_err());
    }
}
