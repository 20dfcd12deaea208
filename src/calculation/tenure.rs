//! Length-of-service calculation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::SeveranceConfig;
use crate::models::TenureSpan;

/// Computes the tenure between two dates.
///
/// Years are `floor(days / days_per_year)`; months and days are the true
/// remainders using `days_per_month`. An end date before the start date
/// clamps to zero days.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::compute_tenure;
/// use nomina_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("config/mx").unwrap();
/// let tenure = compute_tenure(
///     NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     &loader.latest_rates().severance,
/// );
/// assert_eq!(tenure.total_days, 730);
/// assert_eq!(tenure.years, 2);
/// ```
pub fn compute_tenure(
    start_date: NaiveDate,
    end_date: NaiveDate,
    config: &SeveranceConfig,
) -> TenureSpan {
    let elapsed = (end_date - start_date).num_days();
    if elapsed < 0 {
        tracing::warn!(%start_date, %end_date, "End date precedes start date, tenure clamped to zero");
    }
    let total_days = elapsed.max(0);

    let years = total_days.checked_div(config.days_per_year).unwrap_or(0);
    let remainder = total_days.checked_rem(config.days_per_year).unwrap_or(total_days);
    let months = remainder.checked_div(config.days_per_month).unwrap_or(0);
    let days = remainder.checked_rem(config.days_per_month).unwrap_or(remainder);

    let total_years = Decimal::from(total_days)
        .checked_div(Decimal::from(config.days_per_year))
        .unwrap_or(Decimal::ZERO);

    TenureSpan {
        start_date,
        end_date,
        total_days,
        years,
        months,
        days,
        total_years,
    }
}

/// Renders a tenure as "N years, M months, D days".
pub fn describe_tenure(tenure: &TenureSpan) -> String {
    format!(
        "{} years, {} months, {} days",
        tenure.years, tenure.months, tenure.days
    )
}

#[cfg(test)]
mod tests {
    use super::*;
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

    #[test]
    fn test_two_full_years() {
        let tenure = compute_tenure(date(2022, 1, 1), date(2024, 1, 1), &config());

        assert_eq!(tenure.total_days, 730);
        assert_eq!(tenure.years, 2);
        assert_eq!(tenure.months, 0);
        assert_eq!(tenure.days, 0);
        assert_eq!(tenure.total_years, dec("2"));
    }

    #[test]
    fn test_remainder_months_and_days() {
        // 365 + 75 days
        let tenure = compute_tenure(date(2021, 1, 1), date(2022, 3, 17), &config());

        assert_eq!(tenure.total_days, 440);
        assert_eq!(tenure.years, 1);
        assert_eq!(tenure.months, 2);
        assert_eq!(tenure.days, 15);
    }

    #[test]
    fn test_leap_year_is_not_calendar_exact() {
        let tenure = compute_tenure(date(2024, 1, 1), date(2025, 1, 1), &config());

        assert_eq!(tenure.total_days, 366);
        assert_eq!(tenure.years, 1);
        assert_eq!(tenure.days, 1);
    }

    #[test]
    fn test_end_before_start_clamps_to_zero() {
        let tenure = compute_tenure(date(2024, 1, 1), date(2023, 1, 1), &config());

        assert_eq!(tenure.total_days, 0);
        assert_eq!(tenure.years, 0);
        assert_eq!(tenure.total_years, Decimal::ZERO);
    }

    #[test]
    fn test_describe_tenure() {
        let tenure = compute_tenure(date(2021, 1, 1), date(2022, 3, 17), &config());
        assert_eq!(describe_tenure(&tenure), "1 years, 2 months, 15 days");
    }
}
