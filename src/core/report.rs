use serde::Serialize;

use super::types::{GoalEstimate, ProjectionResult};

pub const SERIES_LABEL: &str = "Portfolio Value";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryLine {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDataset {
    pub label: &'static str,
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

/// en-US dollar formatting: `$12,345.68`, `-$72.90`.
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() {
        return "$0.00".to_string();
    }

    let cents = (value.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let digits = dollars.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

pub fn summary_lines(result: &ProjectionResult) -> Vec<SummaryLine> {
    let mut lines = vec![
        SummaryLine {
            label: "Total (Before Tax)",
            value: format_usd(result.total_before_tax),
        },
        SummaryLine {
            label: "Total (After Tax)",
            value: format_usd(result.total_after_tax),
        },
        SummaryLine {
            label: "Invested",
            value: format_usd(result.total_invested),
        },
        SummaryLine {
            label: "Gained (After Tax)",
            value: format_usd(result.gain_after_tax),
        },
        SummaryLine {
            label: "Tax Paid",
            value: format_usd(result.tax_paid),
        },
    ];

    if let Some(goal) = result.months_to_goal {
        lines.push(SummaryLine {
            label: "Months to reach goal",
            value: match goal {
                GoalEstimate::Reachable { months } => months.to_string(),
                GoalEstimate::Undefined => "undefined".to_string(),
            },
        });
    }
    lines
}

pub fn chart_dataset(result: &ProjectionResult) -> ChartDataset {
    let points = result.series.points();
    ChartDataset {
        label: SERIES_LABEL,
        labels: points
            .iter()
            .map(|p| p.date.format("%Y-%m-%d").to_string())
            .collect(),
        data: points.iter().map(|p| p.value).collect(),
    }
}
