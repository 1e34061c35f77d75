use tracing::debug;

use super::calendar::nth_month;
use super::error::ProjectionError;
use super::goal::estimate_months_to_goal;
use super::types::{
    IndexKey, InterestType, ProjectionConfig, ProjectionResult, ProjectionSeries, ReturnMode,
    TaxJurisdiction, TaxOutcome, index_returns,
};

/// Runs the month-by-month projection for `config`.
///
/// Each month the contribution is added, interest is applied (on the whole
/// balance for compound, on contributed principal only for simple) and the
/// balance is deflated by `inflation / 12`. The return rate is converted to
/// its geometric monthly equivalent while inflation uses the flat monthly
/// share; both conventions are kept as they are.
pub fn project(config: &ProjectionConfig) -> Result<ProjectionResult, ProjectionError> {
    validate_config(config)?;

    let annual_rate = resolve_annual_rate(
        config.index,
        config.mode,
        config.custom_annual_rate_percent,
    )?;
    let r_monthly = monthly_rate(annual_rate);
    let inflation_factor = 1.0 + config.inflation_rate_percent / 100.0 / 12.0;

    let mut series = ProjectionSeries::default();
    let mut total = 0.0;
    let mut invested = 0.0;
    let mut offset = 0u32;

    while let Some(current) = nth_month(config.start_date, offset) {
        if current > config.end_date {
            break;
        }
        offset += 1;
        invested = config.monthly_investment * offset as f64;

        total = match config.interest_type {
            InterestType::Compound => (total + config.monthly_investment) * (1.0 + r_monthly),
            InterestType::Simple => total + config.monthly_investment + invested * r_monthly,
        };
        total /= inflation_factor;

        series.push(current, total);
    }

    // Tax is computed on a finite balance only.
    if !total.is_finite() {
        return Err(ProjectionError::NonFiniteProjection {
            months: series.len(),
        });
    }

    let tax = apply_tax(total, invested, config.tax_jurisdiction);
    let months_to_goal = (config.goal_amount > 0.0)
        .then(|| estimate_months_to_goal(config.goal_amount, total, r_monthly));

    debug!(
        months = series.len(),
        annual_rate,
        monthly_rate = r_monthly,
        total_before_tax = total,
        total_after_tax = tax.total_after_tax,
        "projection complete"
    );

    Ok(ProjectionResult {
        total_before_tax: total,
        total_after_tax: tax.total_after_tax,
        total_invested: invested,
        gain_after_tax: tax.total_after_tax - invested,
        tax_paid: tax.tax_amount,
        annual_rate,
        monthly_rate: r_monthly,
        months_to_goal,
        series,
    })
}

pub fn monthly_rate(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / 12.0) - 1.0
}

pub fn resolve_annual_rate(
    index: IndexKey,
    mode: ReturnMode,
    custom_annual_rate_percent: f64,
) -> Result<f64, ProjectionError> {
    if index == IndexKey::Custom && !custom_annual_rate_percent.is_finite() {
        return Err(ProjectionError::InvalidCustomRate(
            custom_annual_rate_percent,
        ));
    }

    let rate = index_returns(index, custom_annual_rate_percent).for_mode(mode);
    if rate <= -1.0 {
        return Err(ProjectionError::UnsupportedAnnualReturn(rate));
    }
    Ok(rate)
}

/// Flat tax on the nominal gain. Losses are not floored, so a negative gain
/// yields a negative tax that raises the after-tax total.
pub fn apply_tax(total: f64, invested: f64, jurisdiction: TaxJurisdiction) -> TaxOutcome {
    let gain_before_tax = total - invested;
    let tax_amount = gain_before_tax * jurisdiction.rate();
    TaxOutcome {
        gain_before_tax,
        tax_amount,
        total_after_tax: total - tax_amount,
    }
}

fn validate_config(config: &ProjectionConfig) -> Result<(), ProjectionError> {
    if config.start_date > config.end_date {
        return Err(ProjectionError::InvertedDateRange {
            start: config.start_date,
            end: config.end_date,
        });
    }
    if !is_non_negative(config.monthly_investment) {
        return Err(ProjectionError::InvalidMonthlyInvestment(
            config.monthly_investment,
        ));
    }
    if !is_non_negative(config.inflation_rate_percent) {
        return Err(ProjectionError::InvalidInflationRate(
            config.inflation_rate_percent,
        ));
    }
    if !is_non_negative(config.goal_amount) {
        return Err(ProjectionError::InvalidGoalAmount(config.goal_amount));
    }
    Ok(())
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
