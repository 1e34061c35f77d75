use super::GoalEstimate;

/// Months of further geometric growth at `monthly_rate` needed for
/// `final_total` to reach `goal_amount`. This extrapolates from the end of
/// the simulated range and does not add further contributions.
pub fn estimate_months_to_goal(
    goal_amount: f64,
    final_total: f64,
    monthly_rate: f64,
) -> GoalEstimate {
    let raw = ((goal_amount / final_total).ln() / (1.0 + monthly_rate).ln()).ceil();
    if !raw.is_finite() || raw <= 0.0 {
        return GoalEstimate::Undefined;
    }
    GoalEstimate::Reachable { months: raw as u64 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    #[test]
    fn goal_example_takes_seven_months() {
        let r = 1.08_f64.powf(1.0 / 12.0) - 1.0;
        assert_eq!(
            estimate_months_to_goal(13_000.0, 12_486.0, r),
            GoalEstimate::Reachable { months: 7 }
        );
    }

    #[test]
    fn goal_already_met_is_undefined() {
        let r = 0.005;
        assert_eq!(estimate_months_to_goal(10_000.0, 12_000.0, r), GoalEstimate::Undefined);
        assert_eq!(estimate_months_to_goal(12_000.0, 12_000.0, r), GoalEstimate::Undefined);
    }

    #[test]
    fn goal_with_zero_rate_is_undefined() {
        assert_eq!(estimate_months_to_goal(20_000.0, 12_000.0, 0.0), GoalEstimate::Undefined);
    }

    #[test]
    fn goal_with_negative_rate_is_undefined() {
        assert_eq!(estimate_months_to_goal(20_000.0, 12_000.0, -0.01), GoalEstimate::Undefined);
    }

    #[test]
    fn goal_with_zero_balance_is_undefined() {
        assert_eq!(estimate_months_to_goal(20_000.0, 0.0, 0.01), GoalEstimate::Undefined);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_reachable_goal_is_met_after_estimated_months(
            total in 100u32..1_000_000,
            extra_bp in 1u32..50_000,
            rate_bp in 1u32..200
        ) {
            let total = total as f64;
            let goal = total * (1.0 + extra_bp as f64 / 10_000.0);
            let r = rate_bp as f64 / 10_000.0;
            let estimate = estimate_months_to_goal(goal, total, r);
            let months = estimate.months();
            prop_assert!(months.is_some());
            let months = months.unwrap_or_default();
            prop_assert!(total * (1.0 + r).powf(months as f64) >= goal * (1.0 - 1e-9));
            if months > 1 {
                prop_assert!(total * (1.0 + r).powf((months - 1) as f64) < goal * (1.0 + 1e-9));
            }
            prop_assert_eq!(estimate, GoalEstimate::Reachable { months });
        }
    }
}
