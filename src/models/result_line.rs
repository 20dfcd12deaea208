//! Presentation and audit records shared by every calculator.
//!
//! A [`ResultLine`] is one labelled figure in the order a caller shows it.
//! An [`AuditStep`] records a rule application with its inputs, outputs and
//! the legal reference that justifies it.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Display hint attached to each result line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTag {
    /// Headline figures (gross, integrated salary).
    Primary,
    /// Informational figures (rates, tenure).
    Info,
    /// Amounts in the recipient's favour.
    Success,
    /// Contributions and withholdings.
    Warning,
    /// Deductions and taxes payable.
    Danger,
    /// Miscellaneous entries.
    Secondary,
}

/// A single labelled figure in a calculation result.
///
/// # Example
///
/// ```
/// use nomina_engine::models::{ColorTag, ResultLine};
/// use rust_decimal::Decimal;
///
/// let line = ResultLine::currency(
///     "Gross Salary",
///     Decimal::new(1500000, 2),
///     ColorTag::Primary,
///     "Salary before deductions",
/// );
/// assert_eq!(line.formatted_value, "$15,000.00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultLine {
    /// Human-readable label.
    pub label: String,
    /// The unrounded value.
    pub value: Decimal,
    /// The value rendered for display.
    pub formatted_value: String,
    /// Display hint.
    pub color: ColorTag,
    /// What the figure means.
    pub description: String,
}

impl ResultLine {
    /// Creates a line with an explicit formatted value.
    pub fn new(
        label: impl Into<String>,
        value: Decimal,
        formatted_value: impl Into<String>,
        color: ColorTag,
        description: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            value,
            formatted_value: formatted_value.into(),
            color,
            description: description.into(),
        }
    }

    /// Creates a line formatted as Mexican pesos.
    pub fn currency(
        label: impl Into<String>,
        value: Decimal,
        color: ColorTag,
        description: impl Into<String>,
    ) -> Self {
        Self::new(label, value, format_currency(value), color, description)
    }

    /// Creates a line formatted as a percentage. `value` is already scaled to
    /// whole percent (15 means 15%).
    pub fn percentage(
        label: impl Into<String>,
        value: Decimal,
        color: ColorTag,
        description: impl Into<String>,
    ) -> Self {
        Self::new(label, value, format_percentage(value), color, description)
    }
}

/// Formats an amount as pesos with thousands separators and two decimals,
/// e.g. `$1,234,567.89`. Rounds half away from zero.
pub fn format_currency(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    rounded = rounded.abs();
    rounded.rescale(2);

    let text = rounded.to_string();
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${}.{}", grouped, fraction)
    } else {
        format!("${}.{}", grouped, fraction)
    }
}

/// Formats a whole-percent value with two decimals, e.g. `15.00%`.
pub fn format_percentage(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    format!("{}%", rounded)
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The statute or regulation backing the rule (e.g. "LFT Art. 162").
    pub legal_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_currency_groups_thousands() {
        assert_eq!(format_currency(dec("15000")), "$15,000.00");
        assert_eq!(format_currency(dec("1234567.891")), "$1,234,567.89");
        assert_eq!(format_currency(dec("999.5")), "$999.50");
    }

    #[test]
    fn test_format_currency_small_and_zero_amounts() {
        assert_eq!(format_currency(Decimal::ZERO), "$0.00");
        assert_eq!(format_currency(dec("0.004")), "$0.00");
        assert_eq!(format_currency(dec("12")), "$12.00");
    }

    #[test]
    fn test_format_currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(dec("0.125")), "$0.13");
        assert_eq!(format_currency(dec("515.7236842105")), "$515.72");
    }

    #[test]
    fn test_format_currency_negative_amount() {
        assert_eq!(format_currency(dec("-2500.5")), "-$2,500.50");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(dec("15")), "15.00%");
        assert_eq!(format_percentage(dec("7.4995")), "7.50%");
    }

    #[test]
    fn test_color_tag_serialization() {
        let json = serde_json::to_string(&ColorTag::Secondary).unwrap();
        assert_eq!(json, "\"secondary\"");
    }

    #[test]
    fn test_result_line_serializes_value_as_string() {
        let line = ResultLine::currency("Net", dec("13875"), ColorTag::Success, "Net salary");
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["value"], "13875");
        assert_eq!(json["formatted_value"], "$13,875.00");
        assert_eq!(json["color"], "success");
    }
}
