mod calendar;
mod engine;
mod error;
mod goal;
mod report;
mod types;

pub use calendar::{default_date_range, month_count, nth_month};
pub use engine::{apply_tax, monthly_rate, project, resolve_annual_rate};
pub use error::ProjectionError;
pub use goal::estimate_months_to_goal;
pub use report::{ChartDataset, SERIES_LABEL, SummaryLine, chart_dataset, format_usd, summary_lines};
pub use types::{
    AnnualReturns, GoalEstimate, IndexKey, InterestType, ProjectionConfig, ProjectionResult,
    ProjectionSeries, ReturnMode, SeriesPoint, TaxJurisdiction, TaxOutcome, index_returns,
};
