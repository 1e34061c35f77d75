use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("Invalid date range: start {start} is after end {end}")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Monthly investment must be a non-negative number, got {0}")]
    InvalidMonthlyInvestment(f64),

    #[error("Custom annual rate must be a finite number, got {0}")]
    InvalidCustomRate(f64),

    #[error("Annual return must be greater than -100%, got {0}")]
    UnsupportedAnnualReturn(f64),

    #[error("Inflation rate must be a non-negative number, got {0}")]
    InvalidInflationRate(f64),

    #[error("Goal amount must be a non-negative number, got {0}")]
    InvalidGoalAmount(f64),

    #[error("Projected balance is not a finite number after {months} months")]
    NonFiniteProjection { months: usize },
}
