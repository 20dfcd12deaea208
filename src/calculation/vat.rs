//! Value-added tax (IVA) calculation.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{SaturatingAmount, VatInput, VatRate, VatResult};

/// Calculates VAT on an amount.
///
/// When the amount already includes VAT, the tax is extracted as
/// `subtotal * rate / (1 + rate)` and the total is the amount itself;
/// otherwise VAT is added on top.
///
/// # Errors
///
/// Returns [`EngineError::UnknownVatRate`] when `input.rate` is not one of
/// the configured rates.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::calculate_vat;
/// use nomina_engine::models::{VatInput, VatRate};
/// use rust_decimal::Decimal;
///
/// let rates = vec![VatRate { rate: Decimal::new(16, 2), name: "16% - IVA General".to_string() }];
/// let input = VatInput { subtotal: Decimal::from(1000), rate: Decimal::new(16, 2), includes_vat: false };
///
/// let result = calculate_vat(&input, &rates).unwrap();
/// assert_eq!(result.vat, Decimal::from(160));
/// assert_eq!(result.total, Decimal::from(1160));
/// ```
pub fn calculate_vat(input: &VatInput, rates: &[VatRate]) -> EngineResult<VatResult> {
    let configured = rates
        .iter()
        .find(|r| r.rate == input.rate)
        .ok_or(EngineError::UnknownVatRate { rate: input.rate })?;

    let (vat, total) = if input.includes_vat {
        let vat = input
            .subtotal
            .sat_mul(input.rate)
            .sat_div(Decimal::ONE.sat_add(input.rate));
        (vat, input.subtotal)
    } else {
        let vat = input.subtotal.sat_mul(input.rate);
        (vat, input.subtotal.sat_add(vat))
    };

    Ok(VatResult {
        subtotal: input.subtotal,
        vat,
        total,
        net_amount: total.sat_sub(vat),
        rate: configured.rate,
        rate_name: configured.name.clone(),
    })
}
