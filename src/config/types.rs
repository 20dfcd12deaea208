//! Configuration types for the payroll calculation engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every regulatory constant
//! the calculators use lives here, so a yearly update is a new rate file
//! rather than a code change.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{RegionCode, TaxBracket, VatRate};

/// Metadata about the configuration set.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// Short identifier (e.g., "MX-NOMINA").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// The version or publication date of the tables.
    pub version: String,
    /// Where the published tables come from.
    pub source_url: String,
}

/// Regions configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionsConfig {
    /// The subdelegación table.
    pub regions: Vec<RegionCode>,
}

/// Employment subsidy parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct SubsidyConfig {
    /// Income at or below which the subsidy applies.
    pub threshold: Decimal,
    /// Subsidy as a fraction of income.
    pub rate: Decimal,
}

/// Income tax (ISR) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct IsrConfig {
    /// The progressive tariff, ordered by `min`.
    pub brackets: Vec<TaxBracket>,
    /// Allowed difference between a bracket's tax at `max` and the next
    /// bracket's fixed amount.
    #[serde(default)]
    pub continuity_tolerance: Decimal,
    /// Employment subsidy parameters.
    pub subsidy: SubsidyConfig,
}

/// Contribution and benefit rates used by the salary breakdown.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionConfig {
    /// Employee share of social security (IMSS).
    pub social_security_employee_rate: Decimal,
    /// Employer share of social security (IMSS).
    pub social_security_employer_rate: Decimal,
    /// Maximum monthly base subject to social security.
    pub social_security_base_cap: Decimal,
    /// Housing fund (INFONAVIT) rate on uncapped gross.
    pub housing_fund_rate: Decimal,
    /// Retirement fund (SAR) rate on uncapped gross.
    pub retirement_fund_rate: Decimal,
    /// Employment subsidy as a fraction of gross.
    pub employment_subsidy_rate: Decimal,
    /// Vacation premium as a fraction of gross.
    pub vacation_premium_rate: Decimal,
    /// Year-end bonus days.
    pub year_end_bonus_days: Decimal,
    /// Days the year-end bonus is prorated over.
    pub year_end_bonus_basis_days: Decimal,
}

/// Severance factors.
#[derive(Debug, Clone, Deserialize)]
pub struct SeveranceConfig {
    /// Multiplier that loads base salary with mandated benefits.
    pub integration_factor: Decimal,
    /// Average days in a month used to derive the daily salary.
    pub average_days_per_month: Decimal,
    /// Days in a tenure year.
    pub days_per_year: i64,
    /// Days in a tenure month.
    pub days_per_month: i64,
    /// Severance days owed per year of service.
    pub severance_days_per_year: Decimal,
    /// Seniority premium days per year of service.
    pub seniority_days_per_year: Decimal,
    /// Minimum seniority premium days.
    pub seniority_minimum_days: Decimal,
    /// Vacation days accrued per year of service.
    pub vacation_days_per_year: Decimal,
    /// Vacation premium as a fraction of vacation pay.
    pub vacation_premium_rate: Decimal,
    /// Year-end bonus days.
    pub year_end_bonus_days: Decimal,
    /// Months of salary in the quick settlement estimate.
    pub estimate_months_of_salary: Decimal,
    /// Benefit loading in the quick settlement estimate.
    pub estimate_benefit_rate: Decimal,
}

/// Rate configuration for a specific effective date.
#[derive(Debug, Clone, Deserialize)]
pub struct RateConfig {
    /// The effective date for these rates.
    pub effective_date: NaiveDate,
    /// Income tax tables.
    pub isr: IsrConfig,
    /// Accepted VAT rates.
    pub vat_rates: Vec<VatRate>,
    /// Salary contribution rates.
    pub contributions: ContributionConfig,
    /// Severance factors.
    pub severance: SeveranceConfig,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Configuration metadata.
    metadata: EngineMetadata,
    /// Region table.
    regions: Vec<RegionCode>,
    /// Rate configurations by effective date (sorted oldest first).
    rates: Vec<RateConfig>,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(metadata: EngineMetadata, regions: Vec<RegionCode>, rates: Vec<RateConfig>) -> Self {
        let mut sorted_rates = rates;
        sorted_rates.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            regions,
            rates: sorted_rates,
        }
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns the region table.
    pub fn regions(&self) -> &[RegionCode] {
        &self.regions
    }

    /// Returns all rate configurations, oldest first.
    pub fn rates(&self) -> &[RateConfig] {
        &self.rates
    }
}
