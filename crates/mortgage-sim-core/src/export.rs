//! Semicolon-delimited schedule export with comma decimal separators.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::amortization::schedule::Schedule;
use crate::error::MortgageSimError;
use crate::MortgageSimResult;

pub const EXPORT_HEADERS: [&str; 6] = [
    "Installment",
    "Payment",
    "Interest",
    "Charges",
    "Amortization",
    "Outstanding Balance",
];

/// Two fixed decimals, comma separator, no grouping: `1782.2124` -> `1782,21`.
pub fn format_decimal_comma(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        // no "-0,00" for residue below half a cent
        rounded = Decimal::ZERO;
    }
    format!("{rounded:.2}").replace('.', ",")
}

/// Render the schedule as a `;`-delimited table with a header row.
pub fn export_schedule_csv(schedule: &Schedule) -> MortgageSimResult<String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(EXPORT_HEADERS)?;
    for inst in schedule {
        wtr.write_record([
            inst.number.to_string(),
            format_decimal_comma(inst.payment_amount),
            format_decimal_comma(inst.interest_amount),
            format_decimal_comma(inst.flat_charges),
            format_decimal_comma(inst.amortization_amount),
            format_decimal_comma(inst.outstanding_balance),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| MortgageSimError::ExportError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| MortgageSimError::ExportError(e.to_string()))
}
