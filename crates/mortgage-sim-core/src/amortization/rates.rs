//! Annual-to-monthly rate conversion.
//!
//! The two conversions deliberately differ: the interest rate is quoted as an
//! annual effective rate and converted geometrically, while the reference
//! (monetary-correction) index takes a flat twelfth of its annual quote.

use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageSimError;
use crate::math::nth_root;
use crate::types::{Percent, Rate};
use crate::MortgageSimResult;

const MONTHS_PER_YEAR: u32 = 12;
const PERCENT: Decimal = dec!(100);

/// Monthly rates consumed by the schedule generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRates {
    /// Effective monthly interest rate, as a decimal.
    pub interest: Rate,
    /// Monthly reference-index rate, as a decimal.
    pub reference: Rate,
}

/// `(1 + annual/100)^(1/12) - 1`
pub fn monthly_interest_rate(annual_interest_rate: Percent) -> MortgageSimResult<Rate> {
    if annual_interest_rate < Decimal::ZERO {
        return Err(MortgageSimError::invalid(
            "annual_interest_rate",
            "Interest rate cannot be negative",
        ));
    }
    let growth = Decimal::ONE + annual_interest_rate / PERCENT;
    nth_root(growth, MONTHS_PER_YEAR)
        .map(|root| root - Decimal::ONE)
        .ok_or_else(|| MortgageSimError::Overflow {
            context: format!("monthly conversion of {annual_interest_rate}% p.a."),
        })
}

/// `(annual / 12) / 100`
pub fn monthly_reference_rate(annual_reference_rate: Percent) -> MortgageSimResult<Rate> {
    if annual_reference_rate < Decimal::ZERO {
        return Err(MortgageSimError::invalid(
            "annual_reference_rate",
            "Reference rate cannot be negative",
        ));
    }
    Ok(annual_reference_rate / Decimal::from(MONTHS_PER_YEAR) / PERCENT)
}

/// Normalize both annual quotes into the monthly rates used by the engine.
pub fn normalize_rates(
    annual_interest_rate: Percent,
    annual_reference_rate: Percent,
) -> MortgageSimResult<MonthlyRates> {
    let rates = MonthlyRates {
        interest: monthly_interest_rate(annual_interest_rate)?,
        reference: monthly_reference_rate(annual_reference_rate)?,
    };
    debug!(
        "normalized rates: {}% p.a. -> {} monthly interest, {}% p.a. -> {} monthly reference",
        annual_interest_rate, rates.interest, annual_reference_rate, rates.reference
    );
    Ok(rates)
}
