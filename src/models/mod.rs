//! Core data models for the payroll calculation engine.
//!
//! Every record here is built fresh for one calculation call and never
//! mutated afterwards.

mod amount;
mod nss;
mod result_line;
mod salary;
mod severance;
mod tax;

pub(crate) use amount::SaturatingAmount;
pub use nss::{GeneratedNss, Gender, NssBreakdown, NssGenerationRequest, NssValidation, RegionCode};
pub use result_line::{AuditStep, ColorTag, ResultLine, format_currency, format_percentage};
pub use salary::{CompositionShare, SalaryBreakdown, SalaryInput};
pub use severance::{
    SettlementEstimate, SettlementEstimateInput, SeveranceComponents, SeveranceInput,
    SeveranceResult, TenureSpan, TerminationType,
};
pub use tax::{
    BracketResolution, IsrInput, IsrResult, SubsidyResult, TaxBracket, VatInput, VatRate,
    VatResult,
};
