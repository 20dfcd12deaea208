//! Annual income tax (ISR) calculation.
//!
//! Builds taxable income from the declared income and deductions, resolves
//! it against the configured tariff and applies the employment subsidy.

use rust_decimal::Decimal;

use crate::config::IsrConfig;
use crate::models::{ColorTag, IsrInput, IsrResult, ResultLine, SaturatingAmount};

use super::bracket_tax::{apply_employment_subsidy, resolve_bracket};

/// Calculates annual income tax.
///
/// `taxable = max(0, income + other_income - deductions - other_deductions)`.
/// The effective rate is the pre-subsidy tax over total income. The subsidy
/// is tested against total income, not taxable income. Income sums beyond
/// the `Decimal` range saturate rather than panic.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::calculate_isr;
/// use nomina_engine::config::ConfigLoader;
/// use nomina_engine::models::IsrInput;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("config/mx").unwrap();
/// let input = IsrInput {
///     annual_income: Decimal::from(300000),
///     other_income: Decimal::ZERO,
///     deductions: Decimal::ZERO,
///     other_deductions: Decimal::ZERO,
///     has_subsidy: false,
/// };
///
/// let result = calculate_isr(&input, &loader.latest_rates().isr);
/// assert_eq!(result.final_tax, Decimal::from(45000));
/// ```
pub fn calculate_isr(input: &IsrInput, config: &IsrConfig) -> IsrResult {
    let total_income = input.annual_income.sat_add(input.other_income);
    let total_deductions = input.deductions.sat_add(input.other_deductions);
    let taxable_income = total_income.sat_sub(total_deductions).max(Decimal::ZERO);

    let resolution = resolve_bracket(taxable_income, &config.brackets, 1);
    let computed_tax = resolution.tax;

    let effective_rate = if total_income.is_zero() {
        Decimal::ZERO
    } else {
        computed_tax.sat_div(total_income)
    };

    let subsidy = apply_employment_subsidy(
        computed_tax,
        total_income,
        &config.subsidy,
        input.has_subsidy,
        2,
    );

    let marginal_percent = resolution.bracket.rate.sat_mul(Decimal::ONE_HUNDRED);
    let lines = vec![
        ResultLine::currency(
            "Total Income",
            total_income,
            ColorTag::Primary,
            "Sum of all annual income",
        ),
        ResultLine::currency(
            "Total Deductions",
            total_deductions,
            ColorTag::Success,
            "Authorised deductions",
        ),
        ResultLine::currency(
            "Taxable Income",
            taxable_income,
            ColorTag::Warning,
            "Base for the ISR calculation",
        ),
        ResultLine::percentage(
            "Marginal Rate",
            marginal_percent,
            ColorTag::Info,
            format!("{}% rate for this income level", marginal_percent.normalize()),
        ),
        ResultLine::currency(
            "Computed ISR",
            computed_tax,
            ColorTag::Danger,
            "Tax before subsidies",
        ),
        ResultLine::currency(
            "Employment Subsidy",
            subsidy.subsidy,
            ColorTag::Success,
            "Applicable subsidy, if any",
        ),
        ResultLine::currency(
            "ISR Payable",
            subsidy.tax_after_subsidy,
            ColorTag::Danger,
            "Final tax to pay",
        ),
        ResultLine::percentage(
            "Effective Rate",
            effective_rate.sat_mul(Decimal::ONE_HUNDRED),
            ColorTag::Info,
            "Share of total income paid as tax",
        ),
    ];

    IsrResult {
        total_income,
        total_deductions,
        taxable_income,
        bracket: resolution.bracket,
        computed_tax,
        subsidy: subsidy.subsidy,
        final_tax: subsidy.tax_after_subsidy,
        effective_rate,
        used_fallback: resolution.used_fallback,
        lines,
        audit_steps: vec![resolution.audit_step, subsidy.audit_step],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SubsidyConfig;
    use crate::models::TaxBracket;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn config() -> IsrConfig {
        IsrConfig {
            brackets: vec![
                TaxBracket {
                    min: dec("0"),
                    max: dec("416220.00"),
                    rate: dec("0.15"),
                    fixed_amount: dec("0"),
                },
                TaxBracket {
                    min: dec("416220.01"),
                    max: dec("624329.00"),
                    rate: dec("0.20"),
                    fixed_amount: dec("62433.00"),
                },
            ],
            continuity_tolerance: Decimal::ZERO,
            subsidy: SubsidyConfig {
                threshold: dec("500000"),
                rate: dec("0.0092"),
            },
        }
    }

    fn input(annual: &str) -> IsrInput {
        IsrInput {
            annual_income: dec(annual),
            other_income: Decimal::ZERO,
            deductions: Decimal::ZERO,
            other_deductions: Decimal::ZERO,
            has_subsidy: false,
        }
    }

    #[test]
    fn test_simple_first_bracket_income() {
        let result = calculate_isr(&input("300000"), &config());

        assert_eq!(result.taxable_income, dec("300000"));
        assert_eq!(result.computed_tax, dec("45000"));
        assert_eq!(result.final_tax, dec("45000"));
        assert_eq!(result.effective_rate, dec("0.15"));
        assert_eq!(result.lines.len(), 8);
        assert_eq!(result.lines[3].formatted_value, "15.00%");
    }

    #[test]
    fn test_deductions_reduce_taxable_income() {
        let mut req = input("500000");
        req.other_income = dec("20000");
        req.deductions = dec("80000");
        req.other_deductions = dec("23779.99");

        let result = calculate_isr(&req, &config());

        assert_eq!(result.total_income, dec("520000"));
        assert_eq!(result.total_deductions, dec("103779.99"));
        assert_eq!(result.taxable_income, dec("416220.01"));
        assert_eq!(result.computed_tax, dec("62433.00"));
        // effective rate is measured against total income
        assert_eq!(
            result.effective_rate,
            dec("62433").checked_div(dec("520000")).unwrap()
        );
    }

    #[test]
    fn test_deductions_above_income_give_zero_taxable() {
        let mut req = input("10000");
        req.deductions = dec("50000");

        let result = calculate_isr(&req, &config());

        assert_eq!(result.taxable_income, Decimal::ZERO);
        assert_eq!(result.final_tax, Decimal::ZERO);
        assert!(!result.used_fallback);
    }

    #[test]
    fn test_subsidy_uses_total_income() {
        let mut req = input("300000");
        req.has_subsidy = true;

        let result = calculate_isr(&req, &config());

        assert_eq!(result.subsidy, dec("2760"));
        assert_eq!(result.final_tax, dec("42240"));
        assert_eq!(result.audit_steps.len(), 2);
        assert_eq!(result.audit_steps[1].rule_id, "employment_subsidy");
    }

    #[test]
    fn test_zero_income_has_zero_rates() {
        let result = calculate_isr(&input("0"), &config());
        assert_eq!(result.effective_rate, Decimal::ZERO);
        assert_eq!(result.final_tax, Decimal::ZERO);
    }

    #[test]
    fn test_income_beyond_decimal_range_saturates() {
        let mut req = input("0");
        req.annual_income = Decimal::MAX;
        req.other_income = Decimal::ONE;
        req.has_subsidy = true;

        let result = calculate_isr(&req, &config());

        assert_eq!(result.total_income, Decimal::MAX);
        assert_eq!(result.taxable_income, Decimal::MAX);
        assert!(result.used_fallback);
        assert_eq!(result.subsidy, Decimal::ZERO);
        assert_eq!(result.final_tax, result.computed_tax);
        assert_eq!(result.effective_rate.round_dp(2), dec("0.15"));
    }

    #[test]
    fn test_deductions_beyond_decimal_range_clamp_to_zero() {
        let mut req = input("300000");
        req.deductions = Decimal::MAX;
        req.other_deductions = Decimal::MAX;

        let result = calculate_isr(&req, &config());

        assert_eq!(result.total_deductions, Decimal::MAX);
        assert_eq!(result.taxable_income, Decimal::ZERO);
        assert_eq!(result.final_tax, Decimal::ZERO);
    }
}
