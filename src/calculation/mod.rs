//! Calculation logic for the payroll engine.
//!
//! Progressive bracket lookup and the employment subsidy, annual income tax,
//! VAT, the monthly salary breakdown, tenure and severance settlements, and
//! NSS check digits. Every function here is synchronous and keeps no state
//! between calls; NSS generation takes its sequence digits from an injected
//! [`SequenceSource`].

mod bracket_tax;
mod isr;
mod nss;
mod salary_breakdown;
mod sequence;
mod severance;
mod tenure;
mod vat;

pub use bracket_tax::{
    BRACKET_ADJACENCY_STEP, apply_employment_subsidy, resolve_bracket, resolve_bracket_strict,
    validate_bracket_table,
};
pub use isr::calculate_isr;
pub use nss::{
    NSS_LENGTH, check_digit_for, compute_check_digit, describe_nss, format_nss, generate_nss,
    validate_nss, validate_nss_as_of,
};
pub use salary_breakdown::calculate_salary_breakdown;
pub use sequence::{FixedSequence, SequenceSource, UuidSequenceSource};
pub use severance::{calculate_severance, estimate_settlement};
pub use tenure::{compute_tenure, describe_tenure};
pub use vat::calculate_vat;
