//! HTTP API module for the payroll engine.
//!
//! This module exposes the tax, salary, severance and NSS calculators as
//! JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CheckDigitRequest, IsrRequest, NssValidateRequest, SalaryRequest, SettlementEstimateRequest,
    SeveranceRequest, VatRequest,
};
pub use response::{ApiError, ApiErrorResponse, CheckDigitResponse, NssValidationResponse};
pub use state::AppState;
