use serde::{Deserialize, Serialize};

use crate::amortization::schedule::Schedule;
use crate::types::Money;

/// Totals over a schedule, as shown next to a saved simulation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub installment_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_payment: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_payment: Option<Money>,
    /// Sum of every payment, charges included.
    pub total_paid: Money,
    pub total_interest: Money,
    /// Sum of admin and insurance charges over the term.
    pub total_charges: Money,
    pub total_amortization: Money,
    pub residual_balance: Money,
}

/// Sum a schedule into display totals.
pub fn summarize(schedule: &Schedule) -> ScheduleSummary {
    let mut summary = ScheduleSummary {
        installment_count: schedule.len() as u32,
        first_payment: schedule.first().map(|i| i.payment_amount),
        last_payment: schedule.last().map(|i| i.payment_amount),
        residual_balance: schedule.residual_balance(),
        ..ScheduleSummary::default()
    };

    for inst in schedule {
        summary.total_paid += inst.payment_amount;
        summary.total_interest += inst.interest_amount;
        summary.total_charges += inst.flat_charges;
        summary.total_amortization += inst.amortization_amount;
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::schedule::Installment;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn installment(number: u32, interest: Decimal, amortization: Decimal, balance: Decimal) -> Installment {
        Installment {
            number,
            payment_amount: interest + amortization + dec!(10),
            interest_amount: interest,
            amortization_amount: amortization,
            flat_charges: dec!(10),
            monthly_reference_rate: Decimal::ZERO,
            outstanding_balance: balance,
        }
    }

    #[test]
    fn test_summary_totals() {
        let schedule = Schedule::from(vec![
            installment(1, dec!(20), dec!(100), dec!(100)),
            installment(2, dec!(10), dec!(100), dec!(0)),
        ]);
        let summary = summarize(&schedule);
        assert_eq!(
            summary,
            ScheduleSummary {
                installment_count: 2,
                first_payment: Some(dec!(130)),
                last_payment: Some(dec!(120)),
                total_paid: dec!(250),
                total_interest: dec!(30),
                total_charges: dec!(20),
                total_amortization: dec!(200),
                residual_balance: dec!(0),
            }
        );
    }

    #[test]
    fn test_empty_schedule() {
        let summary = summarize(&Schedule::default());
        assert_eq!(summary.installment_count, 0);
        assert!(summary.first_payment.is_none());
        assert!(summary.last_payment.is_none());
        assert_eq!(summary.total_paid, Decimal::ZERO);
    }
}
