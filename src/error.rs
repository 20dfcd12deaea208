//! Error types for the payroll calculation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Numeric edge cases in the tax, salary and severance calculators never
//! surface here; errors come from configuration loading, strict bracket
//! lookups, VAT rate lookups and NSS construction.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the payroll calculation engine.
///
/// # Example
///
/// ```
/// use nomina_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or failed validation.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No rate set is effective on the requested date.
    #[error("No rate configuration effective on {date}")]
    RatesNotFound {
        /// The date for which rates were requested.
        date: NaiveDate,
    },

    /// A tax bracket table violates ordering, adjacency or continuity.
    #[error("Invalid tax bracket table at bracket {index}: {message}")]
    InvalidBracketTable {
        /// Index of the offending bracket.
        index: usize,
        /// A description of the violation.
        message: String,
    },

    /// Income falls outside every bracket of a table (strict lookup only).
    #[error("Income {income} is outside the configured tax brackets")]
    IncomeOutOfRange {
        /// The income that could not be placed.
        income: Decimal,
    },

    /// A VAT rate that is not part of the configured rate list.
    #[error("Unknown VAT rate: {rate}")]
    UnknownVatRate {
        /// The requested rate.
        rate: Decimal,
    },

    /// A region (subdelegación) code that is not in the region table.
    #[error("Invalid region code: {code}")]
    InvalidRegion {
        /// The region code that was rejected.
        code: String,
    },

    /// A component supplied to build an NSS was out of range.
    #[error("Invalid NSS component '{field}': {message}")]
    InvalidNssComponent {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_rates_not_found_displays_date() {
        let error = EngineError::RatesNotFound {
            date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "No rate configuration effective on 2020-01-01"
        );
    }

    #[test]
    fn test_invalid_bracket_table_displays_index() {
        let error = EngineError::InvalidBracketTable {
            index: 2,
            message: "min is greater than max".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid tax bracket table at bracket 2: min is greater than max"
        );
    }

    #[test]
    fn test_income_out_of_range_displays_income() {
        let error = EngineError::IncomeOutOfRange {
            income: Decimal::from_str("-10.50").unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Income -10.50 is outside the configured tax brackets"
        );
    }

    #[test]
    fn test_invalid_nss_component_displays_field_and_message() {
        let error = EngineError::InvalidNssComponent {
            field: "month".to_string(),
            message: "must be between 1 and 12".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid NSS component 'month': must be between 1 and 12"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_region() -> EngineResult<()> {
            Err(EngineError::InvalidRegion {
                code: "99".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_region()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
