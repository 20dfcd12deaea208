//! Payroll Calculation Engine for Mexico
//!
//! This crate provides the regulated calculations behind Mexican payroll:
//! progressive income tax (ISR) with the employment subsidy, VAT (IVA),
//! monthly salary breakdowns with IMSS, INFONAVIT and SAR contributions,
//! severance settlements under the Ley Federal del Trabajo, and IMSS social
//! security number (NSS) check digits. Regulatory tables are loaded from
//! versioned YAML configuration.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
