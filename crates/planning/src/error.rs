use chrono::NaiveDate;
use thiserror::Error;

/// Input errors abort a planning run before anything is produced.
///
/// Missing workout fields are deliberately absent here: a null start time or
/// duration is a data gap handled with safe defaults, and an exhausted
/// recipe pool always resolves through fallback synthesis.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanningError {
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("invalid profile weight: {0} kg")]
    InvalidWeight(f64),
}
