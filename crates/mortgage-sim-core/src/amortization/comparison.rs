//! Side-by-side SAC vs PRICE comparison for the same loan.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::schedule::{compute_schedule, LoanParameters, ScheduleType};
use crate::amortization::summary::{summarize, ScheduleSummary};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::MortgageSimResult;

/// One month of both cash-flow streams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonPeriod {
    pub number: u32,
    pub sac_payment: Money,
    pub price_payment: Money,
    pub sac_balance: Money,
    pub price_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutput {
    pub sac: ScheduleSummary,
    pub price: ScheduleSummary,
    /// PRICE total interest minus SAC total interest.
    pub interest_difference: Money,
    /// PRICE total paid minus SAC total paid.
    pub total_paid_difference: Money,
    /// First installment where the SAC payment is no longer above PRICE.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crossover_installment: Option<u32>,
    pub periods: Vec<ComparisonPeriod>,
}

/// Run both regimes on the same parameters. The requested schedule type is ignored.
pub fn compare_schedules(
    params: &LoanParameters,
) -> MortgageSimResult<ComputationOutput<ComparisonOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let sac = compute_schedule(&LoanParameters {
        schedule_type: ScheduleType::ConstantAmortization,
        ..params.clone()
    })?;
    let price = compute_schedule(&LoanParameters {
        schedule_type: ScheduleType::ConstantInstallment,
        ..params.clone()
    })?;

    let periods: Vec<ComparisonPeriod> = sac
        .iter()
        .zip(price.iter())
        .map(|(s, p)| ComparisonPeriod {
            number: s.number,
            sac_payment: s.payment_amount,
            price_payment: p.payment_amount,
            sac_balance: s.outstanding_balance,
            price_balance: p.outstanding_balance,
        })
        .collect();

    let crossover_installment = periods
        .iter()
        .find(|p| p.sac_payment <= p.price_payment)
        .map(|p| p.number);

    let sac_summary = summarize(&sac);
    let price_summary = summarize(&price);

    if params.annual_reference_rate > Decimal::ZERO {
        warnings.push(format!(
            "Reference index of {}% p.a. grows both balances; totals exceed the amount financed",
            params.annual_reference_rate
        ));
    }
    if crossover_installment.is_none() {
        warnings.push("SAC payment never falls to the PRICE payment within the term".into());
    }

    let output = ComparisonOutput {
        interest_difference: price_summary.total_interest - sac_summary.total_interest,
        total_paid_difference: price_summary.total_paid - sac_summary.total_paid,
        sac: sac_summary,
        price: price_summary,
        crossover_installment,
        periods,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "SAC vs PRICE cash-flow comparison",
        params,
        warnings,
        elapsed,
        output,
    ))
}
