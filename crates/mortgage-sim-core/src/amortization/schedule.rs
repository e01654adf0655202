//! SAC (constant amortization) and PRICE (constant installment) schedule
//! generators.
//!
//! Both generators carry a single running balance and recompute the period's
//! amortization or payment from that balance and the number of remaining
//! installments. Reference-index accrual is applied to the balance after
//! amortization, so it feeds the next period's interest and sizing.

use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::rates::{normalize_rates, MonthlyRates};
use crate::amortization::summary::{summarize, ScheduleSummary};
use crate::error::MortgageSimError;
use crate::math::iterative_pow_recip;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::MortgageSimResult;

/// Residual balances below one cent are rounding noise.
const BALANCE_EPSILON: Decimal = dec!(0.01);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Repayment regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScheduleType {
    /// Principal reduction = remaining balance / remaining installments.
    #[serde(rename = "SAC", alias = "sac")]
    ConstantAmortization,
    /// Level annuity payment (French amortization).
    #[serde(rename = "PRICE", alias = "price")]
    ConstantInstallment,
}

impl std::fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleType::ConstantAmortization => write!(f, "SAC"),
            ScheduleType::ConstantInstallment => write!(f, "PRICE"),
        }
    }
}

/// Validated loan parameters for one simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub schedule_type: ScheduleType,
    /// Amount financed (property value minus down payment).
    pub principal: Money,
    pub term_months: u32,
    /// Annual effective interest rate in percentage points.
    pub annual_interest_rate: Percent,
    /// Annual reference-index rate in percentage points.
    pub annual_reference_rate: Percent,
    pub monthly_admin_charge: Money,
    pub monthly_insurance_charge: Money,
}

impl LoanParameters {
    /// Flat amount added to every installment.
    pub fn flat_charges(&self) -> Money {
        self.monthly_admin_charge + self.monthly_insurance_charge
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// A single month of the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based installment number.
    pub number: u32,
    /// Interest + amortization + flat charges.
    pub payment_amount: Money,
    /// Interest on the balance at the start of the month.
    pub interest_amount: Money,
    pub amortization_amount: Money,
    pub flat_charges: Money,
    pub monthly_reference_rate: Rate,
    /// Balance after amortization and reference-index accrual.
    pub outstanding_balance: Money,
}

/// Ordered installments, one per month of the term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    installments: Vec<Installment>,
}

impl Schedule {
    pub fn len(&self) -> usize {
        self.installments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installments.is_empty()
    }

    pub fn first(&self) -> Option<&Installment> {
        self.installments.first()
    }

    pub fn last(&self) -> Option<&Installment> {
        self.installments.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Installment> {
        self.installments.iter()
    }

    pub fn installments(&self) -> &[Installment] {
        &self.installments
    }

    /// Closing balance of the final installment.
    ///
    /// The last period divides by one remaining installment, so the
    /// pre-accrual balance is fully retired and the index accrues on zero.
    /// Anything left here is arithmetic residue, reported rather than floored.
    pub fn residual_balance(&self) -> Money {
        self.last()
            .map(|i| i.outstanding_balance)
            .unwrap_or(Decimal::ZERO)
    }
}

impl From<Vec<Installment>> for Schedule {
    fn from(installments: Vec<Installment>) -> Self {
        Schedule { installments }
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Installment;
    type IntoIter = std::slice::Iter<'a, Installment>;

    fn into_iter(self) -> Self::IntoIter {
        self.installments.iter()
    }
}

/// Full simulation result: rates, totals and the schedule itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub schedule_type: ScheduleType,
    pub monthly_interest_rate: Rate,
    pub monthly_reference_rate: Rate,
    /// Principal repaid beyond the amount financed, from reference-index accrual.
    pub indexation_accrued: Money,
    pub summary: ScheduleSummary,
    pub installments: Schedule,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Generate the month-by-month schedule for the given parameters.
pub fn compute_schedule(params: &LoanParameters) -> MortgageSimResult<Schedule> {
    check_structure(params)?;
    let rates = normalize_rates(params.annual_interest_rate, params.annual_reference_rate)?;
    debug!(
        "computing {} schedule: principal {}, {} months",
        params.schedule_type, params.principal, params.term_months
    );

    let schedule = match params.schedule_type {
        ScheduleType::ConstantAmortization => constant_amortization(
            params.principal,
            params.term_months,
            rates,
            params.flat_charges(),
        )?,
        ScheduleType::ConstantInstallment => constant_installment(
            params.principal,
            params.term_months,
            rates,
            params.flat_charges(),
        )?,
    };

    // Every other total is bounded by the sum of payments.
    schedule
        .iter()
        .try_fold(Decimal::ZERO, |acc, inst| acc.checked_add(inst.payment_amount))
        .ok_or_else(|| MortgageSimError::Overflow {
            context: format!("total paid over {} {} installments", params.term_months, params.schedule_type),
        })?;

    Ok(schedule)
}

/// Compute the schedule and wrap it with totals, warnings and metadata.
pub fn simulate(params: &LoanParameters) -> MortgageSimResult<ComputationOutput<SimulationOutput>> {
    let start = Instant::now();

    let schedule = compute_schedule(params)?;
    let rates = normalize_rates(params.annual_interest_rate, params.annual_reference_rate)?;
    let summary = summarize(&schedule);

    let indexation_accrued = summary.total_amortization - params.principal;
    let warnings = schedule_warnings(params, &summary, indexation_accrued);

    let methodology = match params.schedule_type {
        ScheduleType::ConstantAmortization => "SAC (constant amortization) with reference-index accrual",
        ScheduleType::ConstantInstallment => "PRICE (constant installment) with reference-index accrual",
    };

    let output = SimulationOutput {
        schedule_type: params.schedule_type,
        monthly_interest_rate: rates.interest,
        monthly_reference_rate: rates.reference,
        indexation_accrued,
        summary,
        installments: schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, params, warnings, elapsed, output))
}

/// Indexation and residual-balance warnings for a computed schedule.
///
/// The final period retires the whole pre-accrual balance in both regimes, so
/// the residual check only trips on accumulated rounding.
fn schedule_warnings(
    params: &LoanParameters,
    summary: &ScheduleSummary,
    indexation_accrued: Money,
) -> Vec<String> {
    let mut warnings = Vec::new();

    if indexation_accrued >= BALANCE_EPSILON {
        warnings.push(format!(
            "Reference-index accrual adds {} to the principal repaid over the term",
            indexation_accrued.round_dp(2)
        ));
    }

    if summary.residual_balance.abs() >= BALANCE_EPSILON {
        warn!(
            "{} schedule leaves residual balance {} after final period",
            params.schedule_type, summary.residual_balance
        );
        warnings.push(format!(
            "Residual balance of {} remains after installment {}",
            summary.residual_balance.round_dp(2),
            summary.installment_count
        ));
    }

    warnings
}

/// Level-payment annuity: `PV * r / (1 - (1 + r)^-n)`.
pub fn annuity_payment(present_value: Money, rate: Rate, periods: u32) -> MortgageSimResult<Money> {
    if periods == 0 {
        return Err(MortgageSimError::invalid(
            "periods",
            "Number of periods must be > 0",
        ));
    }
    let denominator = Decimal::ONE - iterative_pow_recip(Decimal::ONE + rate, periods);
    if denominator.is_zero() {
        return Err(MortgageSimError::DivisionByZero {
            context: format!("annuity payment at rate {rate} over {periods} periods"),
        });
    }
    present_value
        .checked_mul(rate)
        .and_then(|scaled| scaled.checked_div(denominator))
        .ok_or_else(|| MortgageSimError::Overflow {
            context: format!("annuity payment on {present_value} at rate {rate}"),
        })
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn constant_amortization(
    principal: Money,
    term_months: u32,
    rates: MonthlyRates,
    flat_charges: Money,
) -> MortgageSimResult<Schedule> {
    let mut installments = Vec::with_capacity(term_months as usize);
    let mut balance = principal;

    for number in 1..=term_months {
        let remaining = term_months - (number - 1);
        let interest = checked(balance.checked_mul(rates.interest), number)?;
        let amortization = balance / Decimal::from(remaining);
        let payment = checked(
            amortization
                .checked_add(interest)
                .and_then(|p| p.checked_add(flat_charges)),
            number,
        )?;

        balance -= amortization;
        balance = accrue(balance, rates.reference, number)?;

        installments.push(Installment {
            number,
            payment_amount: payment,
            interest_amount: interest,
            amortization_amount: amortization,
            flat_charges,
            monthly_reference_rate: rates.reference,
            outstanding_balance: balance,
        });
    }

    Ok(Schedule::from(installments))
}

fn constant_installment(
    principal: Money,
    term_months: u32,
    rates: MonthlyRates,
    flat_charges: Money,
) -> MortgageSimResult<Schedule> {
    if rates.interest.is_zero() {
        return Err(MortgageSimError::DivisionByZero {
            context: "PRICE installment with zero interest rate".into(),
        });
    }

    let mut installments = Vec::with_capacity(term_months as usize);
    let mut balance = principal;

    for number in 1..=term_months {
        let remaining = term_months - (number - 1);
        let payment = annuity_payment(balance, rates.interest, remaining)?;
        let interest = checked(balance.checked_mul(rates.interest), number)?;
        let amortization = payment - interest;

        balance -= amortization;
        balance = accrue(balance, rates.reference, number)?;

        installments.push(Installment {
            number,
            payment_amount: checked(payment.checked_add(flat_charges), number)?,
            interest_amount: interest,
            amortization_amount: amortization,
            flat_charges,
            monthly_reference_rate: rates.reference,
            outstanding_balance: balance,
        });
    }

    Ok(Schedule::from(installments))
}

/// Add one period of reference-index accrual to the balance.
fn accrue(balance: Money, reference: Rate, number: u32) -> MortgageSimResult<Money> {
    checked(
        balance
            .checked_mul(reference)
            .and_then(|accrual| balance.checked_add(accrual)),
        number,
    )
}

fn checked(value: Option<Decimal>, number: u32) -> MortgageSimResult<Decimal> {
    value.ok_or_else(|| MortgageSimError::Overflow {
        context: format!("installment {number}"),
    })
}

fn check_structure(params: &LoanParameters) -> MortgageSimResult<()> {
    if params.term_months == 0 {
        return Err(MortgageSimError::invalid(
            "term_months",
            "Term must be at least 1 month",
        ));
    }
    if params.principal <= Decimal::ZERO {
        return Err(MortgageSimError::invalid(
            "principal",
            "Principal must be positive",
        ));
    }
    if params.monthly_admin_charge < Decimal::ZERO || params.monthly_insurance_charge < Decimal::ZERO {
        return Err(MortgageSimError::invalid(
            "flat_charges",
            "Monthly charges cannot be negative",
        ));
    }
    Ok(())
}
