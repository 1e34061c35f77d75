use chrono::NaiveDate;
use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum IndexKey {
    Sp500,
    Stoxx600,
    Nikkei225,
    MsciWorld,
    Nasdaq,
    Russell2000,
    Custom,
}

impl IndexKey {
    pub const ALL: [IndexKey; 7] = [
        IndexKey::Sp500,
        IndexKey::Stoxx600,
        IndexKey::Nikkei225,
        IndexKey::MsciWorld,
        IndexKey::Nasdaq,
        IndexKey::Russell2000,
        IndexKey::Custom,
    ];

    pub fn code(self) -> &'static str {
        match self {
            IndexKey::Sp500 => "SP500",
            IndexKey::Stoxx600 => "STOXX600",
            IndexKey::Nikkei225 => "NIKKEI225",
            IndexKey::MsciWorld => "MSCIWORLD",
            IndexKey::Nasdaq => "NASDAQ",
            IndexKey::Russell2000 => "RUSSELL2000",
            IndexKey::Custom => "CUSTOM",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ReturnMode {
    Past,
    Future,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InterestType {
    Simple,
    Compound,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TaxJurisdiction {
    None,
    Us,
    Germany,
}

impl TaxJurisdiction {
    /// Flat capital gains rate applied to the whole gain, no brackets.
    pub fn rate(self) -> f64 {
        match self {
            TaxJurisdiction::None => 0.0,
            TaxJurisdiction::Us => 0.15,
            TaxJurisdiction::Germany => 0.25,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnnualReturns {
    pub past: f64,
    pub future: f64,
}

impl AnnualReturns {
    pub fn for_mode(self, mode: ReturnMode) -> f64 {
        match mode {
            ReturnMode::Past => self.past,
            ReturnMode::Future => self.future,
        }
    }
}

/// Static return assumptions per index. `Custom` mirrors the caller's rate
/// into both slots, so the mode has no effect on it.
pub fn index_returns(index: IndexKey, custom_annual_rate_percent: f64) -> AnnualReturns {
    match index {
        IndexKey::Sp500 => AnnualReturns {
            past: 0.10,
            future: 0.08,
        },
        IndexKey::Stoxx600 => AnnualReturns {
            past: 0.08,
            future: 0.07,
        },
        IndexKey::Nikkei225 => AnnualReturns {
            past: 0.09,
            future: 0.07,
        },
        IndexKey::MsciWorld => AnnualReturns {
            past: 0.09,
            future: 0.075,
        },
        IndexKey::Nasdaq => AnnualReturns {
            past: 0.12,
            future: 0.10,
        },
        IndexKey::Russell2000 => AnnualReturns {
            past: 0.11,
            future: 0.09,
        },
        IndexKey::Custom => {
            let rate = custom_annual_rate_percent / 100.0;
            AnnualReturns {
                past: rate,
                future: rate,
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_investment: f64,
    pub index: IndexKey,
    pub mode: ReturnMode,
    pub interest_type: InterestType,
    pub custom_annual_rate_percent: f64,
    pub inflation_rate_percent: f64,
    pub tax_jurisdiction: TaxJurisdiction,
    /// Zero means no goal.
    pub goal_amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProjectionSeries {
    points: Vec<SeriesPoint>,
}

impl ProjectionSeries {
    pub(crate) fn push(&mut self, date: NaiveDate, value: f64) {
        self.points.push(SeriesPoint { date, value });
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_value(&self) -> Option<f64> {
        self.points.last().map(|p| p.value)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GoalEstimate {
    Reachable { months: u64 },
    /// The closed-form estimate produced a non-finite or non-positive count,
    /// e.g. a zero balance, a non-positive monthly rate, or a goal the final
    /// balance already covers.
    Undefined,
}

impl GoalEstimate {
    pub fn months(self) -> Option<u64> {
        match self {
            GoalEstimate::Reachable { months } => Some(months),
            GoalEstimate::Undefined => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxOutcome {
    pub gain_before_tax: f64,
    pub tax_amount: f64,
    pub total_after_tax: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub total_before_tax: f64,
    pub total_after_tax: f64,
    pub total_invested: f64,
    pub gain_after_tax: f64,
    pub tax_paid: f64,
    pub annual_rate: f64,
    pub monthly_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months_to_goal: Option<GoalEstimate>,
    pub series: ProjectionSeries,
}

impl ProjectionResult {
    /// Neutral result for callers that show zeros instead of an error.
    pub fn empty() -> Self {
        Self {
            total_before_tax: 0.0,
            total_after_tax: 0.0,
            total_invested: 0.0,
            gain_after_tax: 0.0,
            tax_paid: 0.0,
            annual_rate: 0.0,
            monthly_rate: 0.0,
            months_to_goal: None,
            series: ProjectionSeries::default(),
        }
    }

    pub fn months_simulated(&self) -> usize {
        self.series.len()
    }
}
