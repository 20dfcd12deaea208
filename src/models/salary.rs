//! Salary breakdown models.
//!
//! [`SalaryInput`] mirrors the fields a payroll clerk fills in for one
//! monthly period; [`SalaryBreakdown`] is the full calculation snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditStep, ColorTag, ResultLine};

fn default_work_days() -> Decimal {
    Decimal::from(30)
}

fn default_work_hours() -> Decimal {
    Decimal::from(8)
}

fn default_overtime_multiplier() -> Decimal {
    Decimal::new(15, 1)
}

fn enabled() -> bool {
    true
}

/// Input for one period's salary breakdown.
///
/// Monetary fields are non-negative. `profit_sharing_percentage` is a whole
/// percent (10 means 10%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryInput {
    /// Base salary for the period.
    pub base_salary: Decimal,
    /// Days worked in the period.
    #[serde(default = "default_work_days")]
    pub work_days: Decimal,
    /// Hours in a working day.
    #[serde(default = "default_work_hours")]
    pub work_hours: Decimal,
    /// Overtime hours worked.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Overtime pay multiplier, at least 1.
    #[serde(default = "default_overtime_multiplier")]
    pub overtime_multiplier: Decimal,
    /// Bonuses paid in the period.
    #[serde(default)]
    pub bonuses: Decimal,
    /// Allowances paid in the period.
    #[serde(default)]
    pub allowances: Decimal,
    /// Commissions paid in the period.
    #[serde(default)]
    pub commissions: Decimal,
    /// Other deductions withheld from the employee.
    #[serde(default)]
    pub other_deductions: Decimal,
    /// Social security (IMSS) contributions apply.
    #[serde(default = "enabled")]
    pub has_social_security: bool,
    /// Housing fund (INFONAVIT) contribution applies.
    #[serde(default = "enabled")]
    pub has_housing_fund: bool,
    /// Retirement fund (SAR) contribution applies.
    #[serde(default = "enabled")]
    pub has_retirement_fund: bool,
    /// Employment subsidy is credited.
    #[serde(default)]
    pub has_employment_subsidy: bool,
    /// Vacation premium is reported.
    #[serde(default = "enabled")]
    pub has_vacation_premium: bool,
    /// Year-end bonus (aguinaldo) is reported.
    #[serde(default = "enabled")]
    pub has_year_end_bonus: bool,
    /// Profit sharing (PTU) is reported.
    #[serde(default)]
    pub has_profit_sharing: bool,
    /// Profit sharing as a whole percent of gross.
    #[serde(default)]
    pub profit_sharing_percentage: Decimal,
}

impl SalaryInput {
    /// Creates an input with the given base salary and every other field at
    /// its default.
    pub fn with_base_salary(base_salary: Decimal) -> Self {
        Self {
            base_salary,
            work_days: default_work_days(),
            work_hours: default_work_hours(),
            overtime_hours: Decimal::ZERO,
            overtime_multiplier: default_overtime_multiplier(),
            bonuses: Decimal::ZERO,
            allowances: Decimal::ZERO,
            commissions: Decimal::ZERO,
            other_deductions: Decimal::ZERO,
            has_social_security: true,
            has_housing_fund: true,
            has_retirement_fund: true,
            has_employment_subsidy: false,
            has_vacation_premium: true,
            has_year_end_bonus: true,
            has_profit_sharing: false,
            profit_sharing_percentage: Decimal::ZERO,
        }
    }
}

/// One slice of the gross salary composition chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionShare {
    /// Category name.
    pub category: String,
    /// Amount in pesos.
    pub amount: Decimal,
    /// Amount as a whole percent of gross (zero when gross is zero).
    pub percentage: Decimal,
    /// Display hint.
    pub color: ColorTag,
}

/// Full result of a salary breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// Base salary over work days.
    pub daily_rate: Decimal,
    /// Daily rate over work hours.
    pub hourly_rate: Decimal,
    /// Overtime pay.
    pub overtime_pay: Decimal,
    /// Base plus overtime, bonuses, allowances and commissions.
    pub gross_salary: Decimal,
    /// The capped base used for social security.
    pub social_security_base: Decimal,
    /// Employee share of social security.
    pub social_security_employee: Decimal,
    /// Employer share of social security.
    pub social_security_employer: Decimal,
    /// Housing fund contribution withheld from the employee.
    pub housing_fund: Decimal,
    /// Retirement fund contribution paid by the employer.
    pub retirement_fund: Decimal,
    /// Employment subsidy credited to the employee.
    pub employment_subsidy: Decimal,
    /// Other deductions as entered.
    pub other_deductions: Decimal,
    /// Social security employee share, housing fund and other deductions.
    pub total_deductions: Decimal,
    /// Gross minus deductions plus subsidy.
    pub net_salary: Decimal,
    /// Vacation premium on gross.
    pub vacation_premium: Decimal,
    /// Proportional year-end bonus.
    pub year_end_bonus: Decimal,
    /// Profit sharing on gross.
    pub profit_sharing: Decimal,
    /// Vacation premium, year-end bonus and profit sharing.
    pub total_benefits: Decimal,
    /// Gross times twelve.
    pub annual_gross: Decimal,
    /// Net times twelve.
    pub annual_net: Decimal,
    /// Benefits times twelve.
    pub annual_benefits: Decimal,
    /// Presentation lines in display order.
    pub lines: Vec<ResultLine>,
    /// Composition of gross salary.
    pub composition: Vec<CompositionShare>,
    /// Audit trail of the rules applied.
    pub audit_steps: Vec<AuditStep>,
}
