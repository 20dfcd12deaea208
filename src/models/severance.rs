//! Severance (liquidación) models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditStep, ResultLine, SaturatingAmount};

/// How the employment relationship ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationType {
    /// Voluntary resignation. No severance pay is owed.
    Voluntary,
    /// Unjustified dismissal.
    Involuntary,
    /// Mutual agreement.
    Mutual,
    /// Retirement.
    Retirement,
    /// Death of the employee.
    Death,
}

impl TerminationType {
    /// Returns the Spanish display name used on settlement documents.
    ///
    /// # Examples
    ///
    /// ```
    /// use nomina_engine::models::TerminationType;
    ///
    /// assert_eq!(TerminationType::Involuntary.display_name(), "Despido Injustificado");
    /// ```
    pub fn display_name(self) -> &'static str {
        match self {
            TerminationType::Voluntary => "Renuncia Voluntaria",
            TerminationType::Involuntary => "Despido Injustificado",
            TerminationType::Mutual => "Terminación Mutua",
            TerminationType::Retirement => "Jubilación",
            TerminationType::Death => "Fallecimiento",
        }
    }

    /// Returns the snake_case identifier used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            TerminationType::Voluntary => "voluntary",
            TerminationType::Involuntary => "involuntary",
            TerminationType::Mutual => "mutual",
            TerminationType::Retirement => "retirement",
            TerminationType::Death => "death",
        }
    }
}

/// Length of service between two dates.
///
/// Uses a civil-calendar approximation: 365-day years and 30-day months, no
/// leap-year-aware month boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenureSpan {
    /// First day of employment.
    pub start_date: NaiveDate,
    /// Last day of employment.
    pub end_date: NaiveDate,
    /// Days between the two dates, never negative.
    pub total_days: i64,
    /// `floor(total_days / 365)`.
    pub years: i64,
    /// Whole 30-day months in the remainder after `years`.
    pub months: i64,
    /// Days left after `years` and `months`.
    pub days: i64,
    /// Fractional years, `total_days / 365`.
    pub total_years: Decimal,
}

fn enabled() -> bool {
    true
}

/// Input for a severance calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveranceInput {
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// First day of employment.
    pub start_date: NaiveDate,
    /// Last day of employment.
    pub end_date: NaiveDate,
    /// How employment ended.
    pub termination_type: TerminationType,
    /// Add the vacation premium to vacation pay.
    #[serde(default = "enabled")]
    pub has_vacation_bonus: bool,
    /// Include the year-end bonus.
    #[serde(default = "enabled")]
    pub has_year_end_bonus: bool,
    /// Include profit sharing.
    #[serde(default)]
    pub has_profit_sharing: bool,
    /// Profit sharing as a whole percent of integrated salary.
    #[serde(default)]
    pub profit_sharing_percentage: Decimal,
    /// Include the seniority premium.
    #[serde(default = "enabled")]
    pub seniority_bonus: bool,
    /// Vacation days owed from previous periods.
    #[serde(default)]
    pub unused_vacation_days: Decimal,
    /// Other benefits entered manually.
    #[serde(default)]
    pub other_benefits: Decimal,
    /// Bonuses earned but not yet paid.
    #[serde(default)]
    pub pending_bonuses: Decimal,
    /// Amounts to discount from the settlement.
    #[serde(default)]
    pub deductions: Decimal,
}

/// The individual amounts that make up a settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveranceComponents {
    /// Indemnization, zero for voluntary resignation.
    pub severance_pay: Decimal,
    /// Seniority premium.
    pub seniority_bonus: Decimal,
    /// Vacation pay including the premium when enabled.
    pub vacation_benefits: Decimal,
    /// Year-end bonus.
    pub year_end_bonus: Decimal,
    /// Profit sharing.
    pub profit_sharing: Decimal,
    /// Other benefits as entered.
    pub other_benefits: Decimal,
    /// Pending bonuses as entered.
    pub pending_bonuses: Decimal,
}

impl SeveranceComponents {
    /// Sum of every component before deductions.
    pub fn subtotal(&self) -> Decimal {
        [
            self.seniority_bonus,
            self.vacation_benefits,
            self.year_end_bonus,
            self.profit_sharing,
            self.other_benefits,
            self.pending_bonuses,
        ]
        .into_iter()
        .fold(self.severance_pay, Decimal::sat_add)
    }
}

/// Full result of a severance calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveranceResult {
    /// The computed length of service.
    pub tenure: TenureSpan,
    /// How employment ended.
    pub termination_type: TerminationType,
    /// Monthly base salary times the integration factor.
    pub integrated_salary: Decimal,
    /// Integrated salary over the average days per month.
    pub daily_salary: Decimal,
    /// The settlement components.
    pub components: SeveranceComponents,
    /// Sum of the components.
    pub subtotal: Decimal,
    /// Deductions as entered.
    pub deductions: Decimal,
    /// Subtotal minus deductions, floored at zero.
    pub total: Decimal,
    /// Presentation lines in display order.
    pub lines: Vec<ResultLine>,
    /// Audit trail of the rules applied.
    pub audit_steps: Vec<AuditStep>,
}

/// Input for the quick settlement estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementEstimateInput {
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// First day of employment.
    pub start_date: NaiveDate,
    /// Last day of employment.
    pub end_date: NaiveDate,
}

/// A rough settlement figure used when registering a termination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementEstimate {
    /// Days between hire and termination, never negative.
    pub days_worked: i64,
    /// Whole years of service.
    pub whole_years: i64,
    /// The estimate rounded to whole pesos.
    pub amount: Decimal,
}
