//! Severance (liquidación / finiquito) calculation.
//!
//! Every component is priced in days of integrated daily salary, using the
//! fractional years of service so partial years accrue proportionally.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::SeveranceConfig;
use crate::models::{
    AuditStep, ColorTag, ResultLine, SettlementEstimate, SettlementEstimateInput,
    SaturatingAmount, SeveranceComponents, SeveranceInput, SeveranceResult, TerminationType,
};

use super::tenure::{compute_tenure, describe_tenure};

fn money(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Calculates a full severance settlement.
///
/// Severance pay is zero for voluntary resignation. The seniority premium
/// never drops below the configured minimum days. The total is the sum of
/// every component minus deductions, floored at zero.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::calculate_severance;
/// use nomina_engine::config::ConfigLoader;
/// use nomina_engine::models::{SeveranceInput, TerminationType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("config/mx").unwrap();
/// let input = SeveranceInput {
///     base_salary: Decimal::from(15000),
///     start_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     termination_type: TerminationType::Voluntary,
///     has_vacation_bonus: true,
///     has_year_end_bonus: true,
///     has_profit_sharing: false,
///     profit_sharing_percentage: Decimal::ZERO,
///     seniority_bonus: true,
///     unused_vacation_days: Decimal::ZERO,
///     other_benefits: Decimal::ZERO,
///     pending_bonuses: Decimal::ZERO,
///     deductions: Decimal::ZERO,
/// };
///
/// let result = calculate_severance(&input, &loader.latest_rates().severance);
/// assert_eq!(result.components.severance_pay, Decimal::ZERO);
/// ```
pub fn calculate_severance(input: &SeveranceInput, config: &SeveranceConfig) -> SeveranceResult {
    let tenure = compute_tenure(input.start_date, input.end_date, config);
    let years = tenure.total_years;

    let integrated_salary = input.base_salary.sat_mul(config.integration_factor);
    let daily_salary = integrated_salary.sat_div(config.average_days_per_month);

    let severance_days = if input.termination_type == TerminationType::Voluntary {
        Decimal::ZERO
    } else {
        years.sat_mul(config.severance_days_per_year)
    };
    let severance_pay = severance_days.sat_mul(daily_salary);

    let seniority_days = if input.seniority_bonus {
        years
            .sat_mul(config.seniority_days_per_year)
            .max(config.seniority_minimum_days)
    } else {
        Decimal::ZERO
    };
    let seniority_bonus = seniority_days.sat_mul(daily_salary);

    let vacation_days = years
        .sat_mul(config.vacation_days_per_year)
        .sat_add(input.unused_vacation_days);
    let vacation_pay = vacation_days.sat_mul(daily_salary);
    let vacation_premium = if input.has_vacation_bonus {
        vacation_pay.sat_mul(config.vacation_premium_rate)
    } else {
        Decimal::ZERO
    };
    let vacation_benefits = vacation_pay.sat_add(vacation_premium);

    let year_end_bonus = if input.has_year_end_bonus {
        config.year_end_bonus_days.sat_mul(daily_salary)
    } else {
        Decimal::ZERO
    };

    let profit_sharing = if input.has_profit_sharing {
        integrated_salary
            .sat_mul(input.profit_sharing_percentage)
            .sat_div(Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };

    let components = SeveranceComponents {
        severance_pay,
        seniority_bonus,
        vacation_benefits,
        year_end_bonus,
        profit_sharing,
        other_benefits: input.other_benefits,
        pending_bonuses: input.pending_bonuses,
    };
    let subtotal = components.subtotal();
    let total = subtotal.sat_sub(input.deductions).max(Decimal::ZERO);

    let mut lines = vec![
        ResultLine::new(
            "Tenure",
            years,
            describe_tenure(&tenure),
            ColorTag::Info,
            format!("{} days of service", tenure.total_days),
        ),
        ResultLine::new(
            "Termination Type",
            Decimal::ZERO,
            input.termination_type.display_name(),
            ColorTag::Secondary,
            "How the employment relationship ended",
        ),
        ResultLine::currency(
            "Integrated Salary",
            integrated_salary,
            ColorTag::Primary,
            format!(
                "Base salary x {} integration factor",
                config.integration_factor.normalize()
            ),
        ),
        ResultLine::currency(
            "Daily Salary",
            daily_salary,
            ColorTag::Info,
            format!(
                "Integrated salary over {} days",
                config.average_days_per_month.normalize()
            ),
        ),
        ResultLine::currency(
            "Severance Pay",
            severance_pay,
            ColorTag::Success,
            format!(
                "{} days per year of service",
                config.severance_days_per_year.normalize()
            ),
        ),
        ResultLine::currency(
            "Seniority Bonus",
            seniority_bonus,
            ColorTag::Success,
            format!("{} days of integrated salary", seniority_days.round_dp(2).normalize()),
        ),
        ResultLine::currency(
            "Vacation Benefits",
            vacation_benefits,
            ColorTag::Success,
            "Vacation pay and premium",
        ),
        ResultLine::currency(
            "Year-End Bonus",
            year_end_bonus,
            ColorTag::Success,
            format!("{} days of aguinaldo", config.year_end_bonus_days.normalize()),
        ),
        ResultLine::currency(
            "Profit Sharing",
            profit_sharing,
            ColorTag::Success,
            "PTU share of integrated salary",
        ),
    ];
    if !input.other_benefits.is_zero() {
        lines.push(ResultLine::currency(
            "Other Benefits",
            input.other_benefits,
            ColorTag::Secondary,
            "Entered manually",
        ));
    }
    if !input.pending_bonuses.is_zero() {
        lines.push(ResultLine::currency(
            "Pending Bonuses",
            input.pending_bonuses,
            ColorTag::Secondary,
            "Earned but not yet paid",
        ));
    }
    lines.extend([
        ResultLine::currency("Subtotal", subtotal, ColorTag::Primary, "Sum of all components"),
        ResultLine::currency(
            "Deductions",
            input.deductions,
            ColorTag::Danger,
            "Amounts discounted from the settlement",
        ),
        ResultLine::currency(
            "Total Settlement",
            total,
            ColorTag::Success,
            "Amount payable to the employee",
        ),
    ]);

    let audit_steps = vec![
        AuditStep {
            step_number: 1,
            rule_id: "integrated_salary".to_string(),
            rule_name: "Integrated Daily Salary".to_string(),
            legal_ref: "LFT Art. 84, 89".to_string(),
            input: serde_json::json!({
                "base_salary": money(input.base_salary),
                "integration_factor": money(config.integration_factor),
                "total_days": tenure.total_days
            }),
            output: serde_json::json!({
                "integrated_salary": money(integrated_salary),
                "daily_salary": money(daily_salary),
                "total_years": money(years)
            }),
            reasoning: format!(
                "${} x {} / {} = ${} per day",
                money(input.base_salary),
                money(config.integration_factor),
                money(config.average_days_per_month),
                daily_salary.round_dp(2)
            ),
        },
        AuditStep {
            step_number: 2,
            rule_id: "severance_pay".to_string(),
            rule_name: "Severance Pay".to_string(),
            legal_ref: "LFT Art. 50".to_string(),
            input: serde_json::json!({
                "termination_type": input.termination_type.as_str(),
                "total_years": money(years)
            }),
            output: serde_json::json!({ "severance_pay": money(severance_pay) }),
            reasoning: if input.termination_type == TerminationType::Voluntary {
                "Voluntary resignation carries no severance pay".to_string()
            } else {
                format!("{} days of daily salary", severance_days.round_dp(2))
            },
        },
        AuditStep {
            step_number: 3,
            rule_id: "seniority_bonus".to_string(),
            rule_name: "Seniority Premium".to_string(),
            legal_ref: "LFT Art. 162".to_string(),
            input: serde_json::json!({
                "enabled": input.seniority_bonus,
                "total_years": money(years)
            }),
            output: serde_json::json!({
                "days": money(seniority_days),
                "seniority_bonus": money(seniority_bonus)
            }),
            reasoning: format!(
                "max({}, years x {}) days of daily salary",
                config.seniority_minimum_days.normalize(),
                config.seniority_days_per_year.normalize()
            ),
        },
        AuditStep {
            step_number: 4,
            rule_id: "vacation_benefits".to_string(),
            rule_name: "Vacation Pay and Premium".to_string(),
            legal_ref: "LFT Art. 76, 80".to_string(),
            input: serde_json::json!({
                "unused_vacation_days": money(input.unused_vacation_days),
                "premium_enabled": input.has_vacation_bonus
            }),
            output: serde_json::json!({
                "vacation_days": money(vacation_days),
                "vacation_pay": money(vacation_pay),
                "vacation_premium": money(vacation_premium)
            }),
            reasoning: format!(
                "{} days of vacation pay plus premium ${}",
                vacation_days.round_dp(2),
                vacation_premium.round_dp(2)
            ),
        },
        AuditStep {
            step_number: 5,
            rule_id: "year_end_bonus".to_string(),
            rule_name: "Year-End Bonus".to_string(),
            legal_ref: "LFT Art. 87".to_string(),
            input: serde_json::json!({ "enabled": input.has_year_end_bonus }),
            output: serde_json::json!({ "year_end_bonus": money(year_end_bonus) }),
            reasoning: format!(
                "{} days of daily salary",
                config.year_end_bonus_days.normalize()
            ),
        },
        AuditStep {
            step_number: 6,
            rule_id: "profit_sharing".to_string(),
            rule_name: "Profit Sharing".to_string(),
            legal_ref: "LFT Art. 117".to_string(),
            input: serde_json::json!({
                "enabled": input.has_profit_sharing,
                "percentage": money(input.profit_sharing_percentage)
            }),
            output: serde_json::json!({ "profit_sharing": money(profit_sharing) }),
            reasoning: "Percentage of integrated salary".to_string(),
        },
        AuditStep {
            step_number: 7,
            rule_id: "settlement_total".to_string(),
            rule_name: "Settlement Total".to_string(),
            legal_ref: "LFT Art. 48".to_string(),
            input: serde_json::json!({
                "subtotal": money(subtotal),
                "deductions": money(input.deductions)
            }),
            output: serde_json::json!({ "total": money(total) }),
            reasoning: if subtotal < input.deductions {
                "Deductions exceed the subtotal, total clamped to zero".to_string()
            } else {
                format!("${} - ${}", subtotal.round_dp(2), money(input.deductions))
            },
        },
    ];

    SeveranceResult {
        tenure,
        termination_type: input.termination_type,
        integrated_salary,
        daily_salary,
        components,
        subtotal,
        deductions: input.deductions,
        total,
        lines,
        audit_steps,
    }
}

/// Produces the quick settlement figure recorded with a termination.
///
/// `base x months + base / days_per_month x severance_days x whole_years
/// + base / days_per_year x days x benefit_rate`, rounded to whole pesos.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::estimate_settlement;
/// use nomina_engine::config::ConfigLoader;
/// use nomina_engine::models::SettlementEstimateInput;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("config/mx").unwrap();
/// let input = SettlementEstimateInput {
///     base_salary: Decimal::from(15000),
///     start_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
/// };
///
/// let estimate = estimate_settlement(&input, &loader.latest_rates().severance);
/// assert_eq!(estimate.amount, Decimal::from(68000));
/// ```
pub fn estimate_settlement(
    input: &SettlementEstimateInput,
    config: &SeveranceConfig,
) -> SettlementEstimate {
    let tenure = compute_tenure(input.start_date, input.end_date, config);
    let base = input.base_salary;

    let salary_months = base.sat_mul(config.estimate_months_of_salary);
    let severance = base
        .sat_mul(config.severance_days_per_year)
        .sat_mul(Decimal::from(tenure.years))
        .sat_div(Decimal::from(config.days_per_month));
    let benefits = base
        .sat_mul(Decimal::from(tenure.total_days))
        .sat_mul(config.estimate_benefit_rate)
        .sat_div(Decimal::from(config.days_per_year));

    let amount = salary_months
        .sat_add(severance)
        .sat_add(benefits)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    SettlementEstimate {
        days_worked: tenure.total_days,
        whole_years: tenure.years,
        amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn config() -> SeveranceConfig {
        SeveranceConfig {
            integration_factor: dec("1.0452"),
            average_days_per_month: dec("30.4"),
            days_per_year: 365,
            days_per_month: 30,
            severance_days_per_year: dec("20"),
            seniority_days_per_year: dec("12"),
            seniority_minimum_days: dec("5"),
            vacation_days_per_year: dec("12"),
            vacation_premium_rate: dec("0.25"),
            year_end_bonus_days: dec("15"),
            estimate_months_of_salary: dec("3"),
            estimate_benefit_rate: dec("0.10"),
        }
    }

    fn input(termination_type: TerminationType, start: NaiveDate, end: NaiveDate) -> SeveranceInput {
        SeveranceInput {
            base_salary: dec("15000"),
            start_date: start,
            end_date: end,
            termination_type,
            has_vacation_bonus: true,
            has_year_end_bonus: true,
            has_profit_sharing: false,
            profit_sharing_percentage: Decimal::ZERO,
            seniority_bonus: true,
            unused_vacation_days: Decimal::ZERO,
            other_benefits: Decimal::ZERO,
            pending_bonuses: Decimal::ZERO,
            deductions: Decimal::ZERO,
        }
    }

    fn cents(value: Decimal) -> Decimal {
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    #[test]
    fn test_voluntary_two_year_scenario() {
        let req = input(TerminationType::Voluntary, date(2022, 1, 1), date(2024, 1, 1));
        let result = calculate_severance(&req, &config());

        assert_eq!(result.tenure.years, 2);
        assert_eq!(result.integrated_salary, dec("15678"));
        assert_eq!(cents(result.daily_salary), dec("515.72"));
        assert_eq!(result.components.severance_pay, Decimal::ZERO);
        assert_eq!(cents(result.components.seniority_bonus), dec("12377.37"));
        // 24 vacation days + 25% premium = 30 days
        assert_eq!(cents(result.components.vacation_benefits), dec("15471.71"));
        assert_eq!(cents(result.components.year_end_bonus), dec("7735.86"));
    }

    #[test]
    fn test_involuntary_accrues_twenty_days_per_year() {
        let req = input(TerminationType::Involuntary, date(2022, 1, 1), date(2024, 1, 1));
        let result = calculate_severance(&req, &config());

        // 40 days x 15678 / 30.4
        assert_eq!(cents(result.components.severance_pay), dec("20628.95"));
        assert_eq!(result.termination_type, TerminationType::Involuntary);
    }

    #[test]
    fn test_partial_year_accrues_partial_severance() {
        // 73 days is 0.2 years
        let req = input(TerminationType::Mutual, date(2023, 1, 1), date(2023, 3, 15));
        let result = calculate_severance(&req, &config());

        assert_eq!(result.tenure.total_days, 73);
        assert_eq!(result.tenure.total_years, dec("0.2"));
        assert_eq!(
            cents(result.components.severance_pay),
            cents(dec("4") * result.daily_salary)
        );
    }

    #[test]
    fn test_seniority_floor_for_short_tenure() {
        let req = input(TerminationType::Involuntary, date(2024, 1, 1), date(2024, 3, 1));
        let result = calculate_severance(&req, &config());

        assert_eq!(
            result.components.seniority_bonus,
            dec("5") * result.daily_salary
        );
    }

    #[test]
    fn test_disabled_seniority_bonus() {
        let mut req = input(TerminationType::Involuntary, date(2022, 1, 1), date(2024, 1, 1));
        req.seniority_bonus = false;

        let result = calculate_severance(&req, &config());
        assert_eq!(result.components.seniority_bonus, Decimal::ZERO);
    }

    #[test]
    fn test_vacation_without_premium_includes_unused_days() {
        let mut req = input(TerminationType::Voluntary, date(2022, 1, 1), date(2024, 1, 1));
        req.has_vacation_bonus = false;
        req.unused_vacation_days = dec("6");

        let result = calculate_severance(&req, &config());
        assert_eq!(
            result.components.vacation_benefits,
            dec("30") * result.daily_salary
        );
    }

    #[test]
    fn test_profit_sharing_and_manual_amounts() {
        let mut req = input(TerminationType::Retirement, date(2022, 1, 1), date(2024, 1, 1));
        req.has_profit_sharing = true;
        req.profit_sharing_percentage = dec("10");
        req.other_benefits = dec("1000");
        req.pending_bonuses = dec("500");

        let result = calculate_severance(&req, &config());

        assert_eq!(result.components.profit_sharing, dec("1567.8"));
        assert_eq!(result.subtotal, result.components.subtotal());
        assert!(result.lines.iter().any(|l| l.label == "Other Benefits"));
        assert!(result.lines.iter().any(|l| l.label == "Pending Bonuses"));
    }

    #[test]
    fn test_total_floored_at_zero() {
        let mut req = input(TerminationType::Voluntary, date(2023, 1, 1), date(2023, 2, 1));
        req.deductions = dec("1000000");

        let result = calculate_severance(&req, &config());

        assert_eq!(result.total, Decimal::ZERO);
        assert_eq!(result.deductions, dec("1000000"));
        assert_eq!(result.lines.last().unwrap().formatted_value, "$0.00");
    }

    #[test]
    fn test_end_before_start_uses_zero_tenure() {
        let req = input(TerminationType::Involuntary, date(2024, 1, 1), date(2023, 1, 1));
        let result = calculate_severance(&req, &config());

        assert_eq!(result.tenure.total_days, 0);
        assert_eq!(result.components.severance_pay, Decimal::ZERO);
        assert_eq!(
            result.components.seniority_bonus,
            dec("5") * result.daily_salary
        );
    }

    #[test]
    fn test_lines_and_audit_trail() {
        let req = input(TerminationType::Death, date(2021, 1, 1), date(2022, 3, 17));
        let result = calculate_severance(&req, &config());

        assert_eq!(result.lines[0].formatted_value, "1 years, 2 months, 15 days");
        assert_eq!(result.lines[1].formatted_value, "Fallecimiento");
        assert_eq!(result.audit_steps.len(), 7);
        assert_eq!(result.audit_steps[2].legal_ref, "LFT Art. 162");
    }

    #[test]
    fn test_calculation_is_reproducible() {
        let req = input(TerminationType::Involuntary, date(2019, 5, 20), date(2024, 8, 2));
        let first = serde_json::to_string(&calculate_severance(&req, &config())).unwrap();
        let second = serde_json::to_string(&calculate_severance(&req, &config())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_estimate_settlement() {
        let req = SettlementEstimateInput {
            base_salary: dec("15000"),
            start_date: date(2022, 1, 1),
            end_date: date(2024, 1, 1),
        };
        let estimate = estimate_settlement(&req, &config());

        assert_eq!(estimate.days_worked, 730);
        assert_eq!(estimate.whole_years, 2);
        assert_eq!(estimate.amount, dec("68000"));
    }

    #[test]
    fn test_estimate_settlement_rounds_to_whole_pesos() {
        let req = SettlementEstimateInput {
            base_salary: dec("10000"),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 1, 11),
        };
        let estimate = estimate_settlement(&req, &config());

        // 30000 + 0 + 10000 x 10 x 0.1 / 365 = 30027.397...
        assert_eq!(estimate.amount, dec("30027"));
    }

    #[test]
    fn test_base_salary_beyond_decimal_range_saturates() {
        let mut req = input(TerminationType::Involuntary, date(2022, 1, 1), date(2024, 1, 1));
        req.base_salary = Decimal::MAX;
        req.has_profit_sharing = true;
        req.profit_sharing_percentage = dec("10");
        req.pending_bonuses = Decimal::MAX;

        let result = calculate_severance(&req, &config());

        assert_eq!(result.integrated_salary, Decimal::MAX);
        assert_eq!(result.components.severance_pay, Decimal::MAX);
        assert_eq!(result.subtotal, Decimal::MAX);
        assert_eq!(result.total, Decimal::MAX);
        let total_line = result.lines.iter().find(|l| l.label == "Total Settlement").unwrap();
        assert_eq!(total_line.formatted_value, "$79,228,162,514,264,337,593,543,950,335.00");
    }

    #[test]
    fn test_saturated_subtotal_still_honours_deductions() {
        let mut req = input(TerminationType::Mutual, date(2022, 1, 1), date(2024, 1, 1));
        req.base_salary = Decimal::MAX;
        req.deductions = Decimal::MAX;

        let result = calculate_severance(&req, &config());

        assert_eq!(result.total, Decimal::ZERO);
    }

    #[test]
    fn test_estimate_with_huge_salary_saturates() {
        let estimate = estimate_settlement(
            &SettlementEstimateInput {
                base_salary: Decimal::MAX,
                start_date: date(2022, 1, 1),
                end_date: date(2024, 1, 1),
            },
            &config(),
        );

        assert_eq!(estimate.amount, Decimal::MAX);
    }

    proptest! {
        #[test]
        fn prop_voluntary_never_pays_severance(
            salary in 1u32..500_000,
            days in 0i64..20_000,
        ) {
            let start = date(1990, 1, 1);
            let end = start + chrono::Duration::days(days);
            let mut req = input(TerminationType::Voluntary, start, end);
            req.base_salary = Decimal::from(salary);

            let result = calculate_severance(&req, &config());

            prop_assert_eq!(result.components.severance_pay, Decimal::ZERO);
            prop_assert!(result.components.seniority_bonus > Decimal::ZERO);
            prop_assert!(result.components.year_end_bonus > Decimal::ZERO);
        }

        #[test]
        fn prop_short_tenure_gets_seniority_floor(days in 0i64..150) {
            let start = date(2020, 1, 1);
            let req = input(TerminationType::Involuntary, start, start + chrono::Duration::days(days));

            let result = calculate_severance(&req, &config());

            prop_assert_eq!(
                result.components.seniority_bonus,
                dec("5") * result.daily_salary
            );
        }
    }
}
