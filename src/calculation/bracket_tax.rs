//! Progressive bracket tax resolution.
//!
//! This module places an income in a bracket table and computes
//! `fixed_amount + (income - min) * rate`. Lookups never fail: income that
//! no bracket contains falls back to the first bracket, and callers that
//! want hard bounds use [`resolve_bracket_strict`].

use rust_decimal::Decimal;
use tracing::warn;

use crate::config::SubsidyConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, BracketResolution, SaturatingAmount, SubsidyResult, TaxBracket};

/// The step between one bracket's `max` and the next bracket's `min`.
pub const BRACKET_ADJACENCY_STEP: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Finds the bracket containing `income`.
///
/// Sub-cent values between adjacent brackets (e.g. 416220.005 between
/// 416220.00 and 416220.01) belong to the lower bracket.
fn locate_bracket(income: Decimal, brackets: &[TaxBracket]) -> Option<usize> {
    brackets.iter().position(|b| b.contains(income)).or_else(|| {
        brackets
            .windows(2)
            .position(|pair| income > pair[0].max && income < pair[1].min)
    })
}

/// Resolves the tax for `income` against a bracket table.
///
/// If no bracket contains the income (negative income or income above the
/// last bracket's `max`), the first bracket is used and
/// [`BracketResolution::used_fallback`] is set. Tax is floored at zero and
/// the effective rate is zero for zero income.
///
/// # Arguments
///
/// * `income` - The taxable income
/// * `brackets` - The tax table, ordered by `min`
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::resolve_bracket;
/// use nomina_engine::models::TaxBracket;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let brackets = vec![
///     TaxBracket {
///         min: Decimal::ZERO,
///         max: Decimal::from_str("416220.00").unwrap(),
///         rate: Decimal::from_str("0.15").unwrap(),
///         fixed_amount: Decimal::ZERO,
///     },
///     TaxBracket {
///         min: Decimal::from_str("416220.01").unwrap(),
///         max: Decimal::from_str("624329.00").unwrap(),
///         rate: Decimal::from_str("0.20").unwrap(),
///         fixed_amount: Decimal::from_str("62433.00").unwrap(),
///     },
/// ];
///
/// let result = resolve_bracket(Decimal::from(100000), &brackets, 1);
/// assert_eq!(result.bracket_index, 0);
/// assert_eq!(result.tax, Decimal::from(15000));
/// assert!(!result.used_fallback);
/// ```
pub fn resolve_bracket(
    income: Decimal,
    brackets: &[TaxBracket],
    step_number: u32,
) -> BracketResolution {
    match locate_bracket(income, brackets) {
        Some(index) => build_resolution(income, index, &brackets[index], false, step_number),
        None => {
            warn!(income = %income, "Income outside every tax bracket, using first bracket");
            let fallback = brackets.first().cloned().unwrap_or(TaxBracket {
                min: Decimal::ZERO,
                max: Decimal::ZERO,
                rate: Decimal::ZERO,
                fixed_amount: Decimal::ZERO,
            });
            build_resolution(income, 0, &fallback, true, step_number)
        }
    }
}

/// Resolves the tax for `income`, rejecting income that no bracket contains.
///
/// # Errors
///
/// Returns [`EngineError::IncomeOutOfRange`] instead of falling back to the
/// first bracket.
pub fn resolve_bracket_strict(
    income: Decimal,
    brackets: &[TaxBracket],
    step_number: u32,
) -> EngineResult<BracketResolution> {
    let index = locate_bracket(income, brackets).ok_or(EngineError::IncomeOutOfRange { income })?;
    Ok(build_resolution(
        income,
        index,
        &brackets[index],
        false,
        step_number,
    ))
}

fn build_resolution(
    income: Decimal,
    index: usize,
    bracket: &TaxBracket,
    used_fallback: bool,
    step_number: u32,
) -> BracketResolution {
    let tax = bracket.tax_for(income).max(Decimal::ZERO);
    let effective_rate = if income.is_zero() {
        Decimal::ZERO
    } else {
        tax.sat_div(income)
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "isr_bracket".to_string(),
        rule_name: "ISR Bracket Lookup".to_string(),
        legal_ref: "LISR Art. 152".to_string(),
        input: serde_json::json!({
            "income": income.normalize().to_string()
        }),
        output: serde_json::json!({
            "bracket_index": index,
            "tax": tax.normalize().to_string(),
            "effective_rate": effective_rate.normalize().to_string(),
            "used_fallback": used_fallback
        }),
        reasoning: format!(
            "${} + (${} - ${}) x {} = ${}{}",
            bracket.fixed_amount.normalize(),
            income.normalize(),
            bracket.min.normalize(),
            bracket.rate.normalize(),
            tax.normalize(),
            if used_fallback {
                " (income outside every bracket, first bracket applied)"
            } else {
                ""
            }
        ),
    };

    BracketResolution {
        bracket_index: index,
        bracket: bracket.clone(),
        tax,
        effective_rate,
        used_fallback,
        audit_step,
    }
}

/// Applies the employment subsidy to a computed tax.
///
/// When `enabled` and `income <= threshold`, `income * rate` is subtracted
/// from the tax; the result is floored at zero.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::apply_employment_subsidy;
/// use nomina_engine::config::SubsidyConfig;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = SubsidyConfig {
///     threshold: Decimal::from(500000),
///     rate: Decimal::from_str("0.0092").unwrap(),
/// };
/// let result = apply_employment_subsidy(Decimal::from(15000), Decimal::from(100000), &config, true, 2);
/// assert_eq!(result.subsidy, Decimal::from(920));
/// assert_eq!(result.tax_after_subsidy, Decimal::from(14080));
/// ```
pub fn apply_employment_subsidy(
    tax: Decimal,
    income: Decimal,
    config: &SubsidyConfig,
    enabled: bool,
    step_number: u32,
) -> SubsidyResult {
    let eligible = enabled && income <= config.threshold;
    let subsidy = if eligible {
        income.sat_mul(config.rate).max(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };
    let tax_after_subsidy = tax.sat_sub(subsidy).max(Decimal::ZERO);

    let reasoning = if !enabled {
        "Employment subsidy not requested".to_string()
    } else if !eligible {
        format!(
            "Income ${} exceeds subsidy threshold ${}",
            income.normalize(),
            config.threshold.normalize()
        )
    } else {
        format!(
            "${} x {} = ${} subsidy; tax ${} -> ${}",
            income.normalize(),
            config.rate.normalize(),
            subsidy.normalize(),
            tax.normalize(),
            tax_after_subsidy.normalize()
        )
    };

    SubsidyResult {
        subsidy,
        tax_after_subsidy,
        audit_step: AuditStep {
            step_number,
            rule_id: "employment_subsidy".to_string(),
            rule_name: "Employment Subsidy".to_string(),
            legal_ref: "Decreto Subsidio para el Empleo".to_string(),
            input: serde_json::json!({
                "tax": tax.normalize().to_string(),
                "income": income.normalize().to_string(),
                "enabled": enabled
            }),
            output: serde_json::json!({
                "subsidy": subsidy.normalize().to_string(),
                "tax_after_subsidy": tax_after_subsidy.normalize().to_string()
            }),
            reasoning,
        },
    }
}

/// Checks that a bracket table is ordered, adjacent and continuous.
///
/// Each bracket must have `min <= max` and a rate in `[0, 1]`; adjacent
/// brackets must satisfy `max[i] + 0.01 == min[i + 1]`; and the tax at
/// `max[i]` under bracket `i` must equal `fixed_amount[i + 1]` within
/// `tolerance`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidBracketTable`] naming the first offending
/// bracket.
pub fn validate_bracket_table(brackets: &[TaxBracket], tolerance: Decimal) -> EngineResult<()> {
    let first = brackets.first().ok_or_else(|| EngineError::InvalidBracketTable {
        index: 0,
        message: "table has no brackets".to_string(),
    })?;

    if first.min > BRACKET_ADJACENCY_STEP {
        return Err(EngineError::InvalidBracketTable {
            index: 0,
            message: format!("first bracket starts at {}, expected 0", first.min),
        });
    }

    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.min > bracket.max {
            return Err(EngineError::InvalidBracketTable {
                index,
                message: format!("min {} is greater than max {}", bracket.min, bracket.max),
            });
        }
        if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
            return Err(EngineError::InvalidBracketTable {
                index,
                message: format!("rate {} is outside [0, 1]", bracket.rate),
            });
        }
    }

    for (offset, pair) in brackets.windows(2).enumerate() {
        let (lower, upper) = (&pair[0], &pair[1]);
        let index = offset + 1;

        if lower.max.sat_add(BRACKET_ADJACENCY_STEP) != upper.min {
            return Err(EngineError::InvalidBracketTable {
                index,
                message: format!(
                    "min {} does not follow previous max {}",
                    upper.min, lower.max
                ),
            });
        }

        let tax_at_boundary = lower.tax_for(lower.max);
        if tax_at_boundary.sat_sub(upper.fixed_amount).abs() > tolerance {
            return Err(EngineError::InvalidBracketTable {
                index,
                message: format!(
                    "fixed amount {} does not match tax {} at previous max",
                    upper.fixed_amount,
                    tax_at_boundary.normalize()
                ),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn bracket(min: &str, max: &str, rate: &str, fixed: &str) -> TaxBracket {
        TaxBracket {
            min: dec(min),
            max: dec(max),
            rate: dec(rate),
            fixed_amount: dec(fixed),
        }
    }

    fn isr_table() -> Vec<TaxBracket> {
        vec![
            bracket("0.00", "416220.00", "0.15", "0"),
            bracket("416220.01", "624329.00", "0.20", "62433.00"),
            bracket("624329.01", "867123.00", "0.25", "104054.798"),
            bracket("867123.01", "1000000.00", "0.30", "164753.2955"),
            bracket("1000000.01", "3000000.00", "0.32", "204616.3925"),
            bracket("3000000.01", "999999999.99", "0.35", "844616.3893"),
        ]
    }

    fn subsidy() -> SubsidyConfig {
        SubsidyConfig {
            threshold: dec("500000"),
            rate: dec("0.0092"),
        }
    }

    #[test]
    fn test_income_in_first_bracket() {
        let result = resolve_bracket(dec("300000"), &isr_table(), 1);

        assert_eq!(result.bracket_index, 0);
        assert_eq!(result.tax, dec("45000"));
        assert_eq!(result.effective_rate, dec("0.15"));
        assert!(!result.used_fallback);
        assert_eq!(result.audit_step.rule_id, "isr_bracket");
    }

    #[test]
    fn test_income_in_middle_bracket() {
        let result = resolve_bracket(dec("700000"), &isr_table(), 1);

        assert_eq!(result.bracket_index, 2);
        // 104054.798 + (700000 - 624329.01) * 0.25 = 122972.5455
        assert_eq!(result.tax, dec("122972.5455"));
    }

    #[test]
    fn test_boundary_income_uses_lower_bracket() {
        let result = resolve_bracket(dec("416220.00"), &isr_table(), 1);
        assert_eq!(result.bracket_index, 0);
        assert_eq!(result.tax, dec("62433.00"));

        let result = resolve_bracket(dec("416220.01"), &isr_table(), 1);
        assert_eq!(result.bracket_index, 1);
        assert_eq!(result.tax, dec("62433.00"));
    }

    #[test]
    fn test_sub_cent_gap_belongs_to_lower_bracket() {
        let result = resolve_bracket(dec("416220.005"), &isr_table(), 1);
        assert_eq!(result.bracket_index, 0);
        assert!(!result.used_fallback);
    }

    #[test]
    fn test_tax_at_each_max_equals_next_fixed_amount() {
        let table = isr_table();
        for pair in table.windows(2) {
            let at_max = resolve_bracket(pair[0].max, &table, 1);
            assert_eq!(at_max.tax, pair[1].fixed_amount);
        }
    }

    #[test]
    fn test_negative_income_falls_back_to_first_bracket() {
        let result = resolve_bracket(dec("-1000"), &isr_table(), 1);

        assert!(result.used_fallback);
        assert_eq!(result.bracket_index, 0);
        assert_eq!(result.tax, Decimal::ZERO);
        assert!(result.audit_step.reasoning.contains("first bracket applied"));
    }

    #[test]
    fn test_income_above_last_max_falls_back_to_first_bracket() {
        let result = resolve_bracket(dec("2000000000"), &isr_table(), 1);

        assert!(result.used_fallback);
        assert_eq!(result.bracket_index, 0);
        assert_eq!(result.tax, dec("300000000"));
    }

    #[test]
    fn test_zero_income_has_zero_effective_rate() {
        let result = resolve_bracket(Decimal::ZERO, &isr_table(), 1);
        assert_eq!(result.tax, Decimal::ZERO);
        assert_eq!(result.effective_rate, Decimal::ZERO);
    }

    #[test]
    fn test_empty_table_resolves_to_zero_tax() {
        let result = resolve_bracket(dec("1000"), &[], 1);
        assert!(result.used_fallback);
        assert_eq!(result.tax, Decimal::ZERO);
    }

    #[test]
    fn test_strict_lookup_rejects_out_of_range_income() {
        let result = resolve_bracket_strict(dec("-5"), &isr_table(), 1);
        match result {
            Err(EngineError::IncomeOutOfRange { income }) => assert_eq!(income, dec("-5")),
            other => panic!("Expected IncomeOutOfRange, got {:?}", other),
        }

        let ok = resolve_bracket_strict(dec("5000"), &isr_table(), 1).unwrap();
        assert_eq!(ok.tax, dec("750"));
    }

    #[test]
    fn test_subsidy_applied_below_threshold() {
        let result = apply_employment_subsidy(dec("45000"), dec("300000"), &subsidy(), true, 2);
        assert_eq!(result.subsidy, dec("2760"));
        assert_eq!(result.tax_after_subsidy, dec("42240"));
    }

    #[test]
    fn test_subsidy_not_applied_above_threshold() {
        let result = apply_employment_subsidy(dec("90000"), dec("500000.01"), &subsidy(), true, 2);
        assert_eq!(result.subsidy, Decimal::ZERO);
        assert_eq!(result.tax_after_subsidy, dec("90000"));
        assert!(result.audit_step.reasoning.contains("exceeds"));
    }

    #[test]
    fn test_subsidy_disabled() {
        let result = apply_employment_subsidy(dec("100"), dec("1000"), &subsidy(), false, 2);
        assert_eq!(result.subsidy, Decimal::ZERO);
        assert_eq!(result.tax_after_subsidy, dec("100"));
    }

    #[test]
    fn test_subsidy_floors_tax_at_zero() {
        let result = apply_employment_subsidy(dec("5"), dec("1000"), &subsidy(), true, 2);
        assert_eq!(result.subsidy, dec("9.2"));
        assert_eq!(result.tax_after_subsidy, Decimal::ZERO);
    }

    #[test]
    fn test_validate_accepts_continuous_table() {
        assert!(validate_bracket_table(&isr_table(), Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_validate_rejects_discontinuous_fixed_amount() {
        let mut table = isr_table();
        table[1].fixed_amount = dec("62432.84");

        match validate_bracket_table(&table, Decimal::ZERO) {
            Err(EngineError::InvalidBracketTable { index, message }) => {
                assert_eq!(index, 1);
                assert!(message.contains("62433"));
            }
            other => panic!("Expected InvalidBracketTable, got {:?}", other),
        }

        assert!(validate_bracket_table(&table, dec("0.20")).is_ok());
    }

    #[test]
    fn test_validate_rejects_gap_between_brackets() {
        let mut table = isr_table();
        table[2].min = dec("624330.00");
        assert!(matches!(
            validate_bracket_table(&table, Decimal::ZERO),
            Err(EngineError::InvalidBracketTable { index: 2, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_table_and_bad_rate() {
        assert!(validate_bracket_table(&[], Decimal::ZERO).is_err());

        let mut table = isr_table();
        table[0].rate = dec("1.5");
        assert!(matches!(
            validate_bracket_table(&table, Decimal::ZERO),
            Err(EngineError::InvalidBracketTable { index: 0, .. })
        ));
    }
}
