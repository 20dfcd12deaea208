//! Request types for the payroll engine API.
//!
//! Calculation requests carry the calculator input at the top level plus an
//! optional `as_of` date that selects the rate set.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{IsrInput, SalaryInput, SettlementEstimateInput, SeveranceInput, VatInput};

/// Request body for `POST /isr`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsrRequest {
    /// Date whose rate set applies; defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    /// The calculator input.
    #[serde(flatten)]
    pub input: IsrInput,
}

/// Request body for `POST /vat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VatRequest {
    /// Date whose rate set applies; defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    /// The calculator input.
    #[serde(flatten)]
    pub input: VatInput,
}

/// Request body for `POST /salary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRequest {
    /// Date whose rate set applies; defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    /// The calculator input.
    #[serde(flatten)]
    pub input: SalaryInput,
}

/// Request body for `POST /severance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeveranceRequest {
    /// Date whose rate set applies; defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    /// The calculator input.
    #[serde(flatten)]
    pub input: SeveranceInput,
}

/// Request body for `POST /severance/estimate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementEstimateRequest {
    /// Date whose rate set applies; defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    /// The estimate input.
    #[serde(flatten)]
    pub input: SettlementEstimateInput,
}

/// Request body for `POST /nss/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NssValidateRequest {
    /// The number to validate.
    pub nss: String,
    /// Reference date for the future-year check; defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// Request body for `POST /nss/check-digit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckDigitRequest {
    /// The first ten digits of an NSS.
    pub base: String,
}
