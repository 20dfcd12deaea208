//! Income tax (ISR) and value-added tax (IVA) models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditStep, ResultLine, SaturatingAmount};

/// One row of a progressive tax table.
///
/// Tax inside the bracket is `fixed_amount + (income - min) * rate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Lower limit, inclusive.
    pub min: Decimal,
    /// Upper limit, inclusive.
    pub max: Decimal,
    /// Marginal rate as a fraction (0.15 means 15%).
    pub rate: Decimal,
    /// Tax owed at `min`.
    pub fixed_amount: Decimal,
}

impl TaxBracket {
    /// Returns true if `income` lies within `[min, max]`.
    pub fn contains(&self, income: Decimal) -> bool {
        income >= self.min && income <= self.max
    }

    /// Applies this bracket's formula to `income`.
    pub fn tax_for(&self, income: Decimal) -> Decimal {
        self.fixed_amount
            .sat_add(income.sat_sub(self.min).sat_mul(self.rate))
    }
}

/// The outcome of placing an income in a bracket table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketResolution {
    /// Position of the applied bracket in the table.
    pub bracket_index: usize,
    /// The applied bracket.
    pub bracket: TaxBracket,
    /// The computed tax, never negative.
    pub tax: Decimal,
    /// `tax / income`, or zero when income is zero.
    pub effective_rate: Decimal,
    /// True when no bracket contained the income and the first one was used.
    pub used_fallback: bool,
    /// The audit step recording the lookup.
    pub audit_step: AuditStep,
}

/// The outcome of applying the employment subsidy to a tax amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsidyResult {
    /// The subsidy granted (zero when disabled or above the threshold).
    pub subsidy: Decimal,
    /// Tax after the subsidy, floored at zero.
    pub tax_after_subsidy: Decimal,
    /// The audit step recording the decision.
    pub audit_step: AuditStep,
}

/// Input for the annual income tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsrInput {
    /// Annual income from salary.
    pub annual_income: Decimal,
    /// Other annual income.
    #[serde(default)]
    pub other_income: Decimal,
    /// Authorised deductions.
    #[serde(default)]
    pub deductions: Decimal,
    /// Additional deductions.
    #[serde(default)]
    pub other_deductions: Decimal,
    /// Whether the employment subsidy applies.
    #[serde(default)]
    pub has_subsidy: bool,
}

/// Result of the annual income tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsrResult {
    /// Salary plus other income.
    pub total_income: Decimal,
    /// All deductions.
    pub total_deductions: Decimal,
    /// Income subject to tax, never negative.
    pub taxable_income: Decimal,
    /// The bracket applied to the taxable income.
    pub bracket: TaxBracket,
    /// Tax before subsidy.
    pub computed_tax: Decimal,
    /// Subsidy granted.
    pub subsidy: Decimal,
    /// Tax payable after subsidy.
    pub final_tax: Decimal,
    /// Computed tax over total income, as a fraction.
    pub effective_rate: Decimal,
    /// True when the bracket lookup fell back to the first bracket.
    pub used_fallback: bool,
    /// Presentation lines.
    pub lines: Vec<ResultLine>,
    /// Audit trail of the rules applied.
    pub audit_steps: Vec<AuditStep>,
}

/// A configured VAT rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatRate {
    /// The rate as a fraction.
    pub rate: Decimal,
    /// Display name (e.g. "16% - IVA General").
    pub name: String,
}

fn default_includes_vat() -> bool {
    true
}

/// Input for a VAT calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatInput {
    /// The amount entered by the user.
    pub subtotal: Decimal,
    /// The VAT rate to apply.
    pub rate: Decimal,
    /// Whether `subtotal` already includes VAT.
    #[serde(default = "default_includes_vat")]
    pub includes_vat: bool,
}

/// Result of a VAT calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatResult {
    /// The amount as entered.
    pub subtotal: Decimal,
    /// The VAT portion.
    pub vat: Decimal,
    /// Amount including VAT.
    pub total: Decimal,
    /// Amount excluding VAT.
    pub net_amount: Decimal,
    /// The applied rate.
    pub rate: Decimal,
    /// Display name of the applied rate.
    pub rate_name: String,
}
