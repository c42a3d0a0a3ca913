use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Series dates must be strictly increasing: {previous} is not before {current}")]
    NonMonotonicDates {
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("Series dates must be consecutive calendar months: gap between {previous} and {current}")]
    NonMonthlySpacing {
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("A window must span at least one month, got {0}")]
    InvalidWindow(u32),
}
