//! Borrower-facing validation of a raw simulation request.
//!
//! Rules are checked in a fixed order and the first failure is returned, so a
//! caller always has exactly one message to show.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::schedule::{LoanParameters, ScheduleType};
use crate::error::MortgageSimError;
use crate::types::{Money, Percent};
use crate::MortgageSimResult;

/// Minimum down payment as a fraction of the property value.
pub const MIN_DOWN_PAYMENT_RATIO: Decimal = dec!(0.20);
/// Shortest accepted term (10 years).
pub const MIN_TERM_MONTHS: u32 = 120;
/// Longest accepted term (35 years).
pub const MAX_TERM_MONTHS: u32 = 420;

/// Unvalidated request as entered by the borrower.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub schedule_type: ScheduleType,
    pub property_value: Money,
    pub down_payment: Money,
    pub term_months: u32,
    /// Annual effective interest rate in percentage points.
    pub annual_interest_rate: Percent,
    /// Annual reference-index rate in percentage points.
    #[serde(default)]
    pub annual_reference_rate: Percent,
    #[serde(default)]
    pub monthly_admin_charge: Money,
    #[serde(default)]
    pub monthly_insurance_charge: Money,
}

impl LoanRequest {
    /// Amount financed.
    pub fn principal(&self) -> Money {
        self.property_value - self.down_payment
    }
}

/// Validate a request and derive the engine parameters from it.
pub fn validate_request(request: &LoanRequest) -> MortgageSimResult<LoanParameters> {
    if request.property_value <= Decimal::ZERO {
        return Err(MortgageSimError::invalid(
            "property_value",
            "Property value must be greater than zero",
        ));
    }
    if request.down_payment <= Decimal::ZERO {
        return Err(MortgageSimError::invalid(
            "down_payment",
            "Down payment must be greater than zero",
        ));
    }
    if request.down_payment >= request.property_value {
        return Err(MortgageSimError::invalid(
            "down_payment",
            "Down payment must be less than the property value",
        ));
    }
    if request.down_payment < request.property_value * MIN_DOWN_PAYMENT_RATIO {
        return Err(MortgageSimError::invalid(
            "down_payment",
            "Down payment must be at least 20% of the property value",
        ));
    }
    if request.term_months == 0 {
        return Err(MortgageSimError::invalid(
            "term_months",
            "Term must be greater than zero",
        ));
    }
    if request.term_months < MIN_TERM_MONTHS {
        return Err(MortgageSimError::invalid(
            "term_months",
            format!("Minimum term is {MIN_TERM_MONTHS} months (10 years)"),
        ));
    }
    if request.term_months > MAX_TERM_MONTHS {
        return Err(MortgageSimError::invalid(
            "term_months",
            format!("Maximum term is {MAX_TERM_MONTHS} months (35 years)"),
        ));
    }
    if request.annual_interest_rate <= Decimal::ZERO {
        return Err(MortgageSimError::invalid(
            "annual_interest_rate",
            "Interest rate must be greater than zero",
        ));
    }
    if request.annual_reference_rate < Decimal::ZERO {
        return Err(MortgageSimError::invalid(
            "annual_reference_rate",
            "Reference rate cannot be negative",
        ));
    }
    if request.monthly_admin_charge < Decimal::ZERO {
        return Err(MortgageSimError::invalid(
            "monthly_admin_charge",
            "Administrative charge cannot be negative",
        ));
    }
    if request.monthly_insurance_charge < Decimal::ZERO {
        return Err(MortgageSimError::invalid(
            "monthly_insurance_charge",
            "Insurance charge cannot be negative",
        ));
    }

    Ok(LoanParameters {
        schedule_type: request.schedule_type,
        principal: request.principal(),
        term_months: request.term_months,
        annual_interest_rate: request.annual_interest_rate,
        annual_reference_rate: request.annual_reference_rate,
        monthly_admin_charge: request.monthly_admin_charge,
        monthly_insurance_charge: request.monthly_insurance_charge,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request() -> LoanRequest {
        LoanRequest {
            schedule_type: ScheduleType::ConstantAmortization,
            property_value: dec!(500000),
            down_payment: dec!(100000),
            term_months: 360,
            annual_interest_rate: dec!(10.5),
            annual_reference_rate: dec!(0.8),
            monthly_admin_charge: dec!(25),
            monthly_insurance_charge: dec!(45.90),
        }
    }

    fn rejected_field(req: &LoanRequest) -> String {
        match validate_request(req) {
            Err(MortgageSimError::InvalidInput { field, .. }) => field,
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_request_derives_principal() {
        let params = validate_request(&request()).unwrap();
        assert_eq!(
            params,
            LoanParameters {
                schedule_type: ScheduleType::ConstantAmortization,
                principal: dec!(400000),
                term_months: 360,
                annual_interest_rate: dec!(10.5),
                annual_reference_rate: dec!(0.8),
                monthly_admin_charge: dec!(25),
                monthly_insurance_charge: dec!(45.90),
            }
        );
    }

    #[test]
    fn test_down_payment_equal_to_property_value_rejected() {
        let mut req = request();
        req.down_payment = req.property_value;
        assert_eq!(rejected_field(&req), "down_payment");
    }

    #[test]
    fn test_down_payment_floor() {
        let mut req = request();
        req.down_payment = dec!(99999.99);
        assert_eq!(rejected_field(&req), "down_payment");

        req.down_payment = dec!(100000);
        assert!(validate_request(&req).is_ok());
    }

    #[test]
    fn test_term_bounds() {
        let mut req = request();
        for (term, ok) in [(119, false), (120, true), (420, true), (421, false), (0, false)] {
            req.term_months = term;
            assert_eq!(validate_request(&req).is_ok(), ok, "term {term}");
        }
    }

    #[test]
    fn test_interest_rate_must_be_positive() {
        let mut req = request();
        req.annual_interest_rate = Decimal::ZERO;
        assert_eq!(rejected_field(&req), "annual_interest_rate");
    }

    #[test]
    fn test_negative_charges_rejected() {
        let mut req = request();
        req.monthly_insurance_charge = dec!(-1);
        assert_eq!(rejected_field(&req), "monthly_insurance_charge");

        let mut req = request();
        req.annual_reference_rate = dec!(-0.1);
        assert_eq!(rejected_field(&req), "annual_reference_rate");
    }

    #[test]
    fn test_first_failure_wins() {
        let mut req = request();
        req.property_value = Decimal::ZERO;
        req.term_months = 10;
        req.annual_interest_rate = dec!(-1);
        assert_eq!(rejected_field(&req), "property_value");
    }

    #[test]
    fn test_optional_fields_default_to_zero() {
        let req: LoanRequest = serde_json::from_str(
            r#"{
                "schedule_type": "PRICE",
                "property_value": "250000",
                "down_payment": "50000",
                "term_months": 240,
                "annual_interest_rate": "9.9"
            }"#,
        )
        .unwrap();
        assert_eq!(req.annual_reference_rate, Decimal::ZERO);
        assert_eq!(req.monthly_admin_charge, Decimal::ZERO);
        assert_eq!(req.principal(), dec!(200000));
    }
}
