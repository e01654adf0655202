use mortgage_sim_core::amortization::schedule::annuity_payment;
use mortgage_sim_core::{
    compute_schedule, normalize_rates, simulate, validate_request, LoanParameters, LoanRequest,
    MortgageSimError, ScheduleType,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const TOL: Decimal = dec!(0.0000001);

fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{}: expected ~{}, got {} (diff = {})",
        msg,
        expected,
        actual,
        diff
    );
}

fn loan(schedule_type: ScheduleType, term_months: u32, reference: Decimal) -> LoanParameters {
    LoanParameters {
        schedule_type,
        principal: dec!(100000),
        term_months,
        annual_interest_rate: dec!(12),
        annual_reference_rate: reference,
        monthly_admin_charge: Decimal::ZERO,
        monthly_insurance_charge: Decimal::ZERO,
    }
}

// ===========================================================================
// Shape
// ===========================================================================

#[test]
fn test_schedule_length_and_numbering() {
    for schedule_type in [ScheduleType::ConstantAmortization, ScheduleType::ConstantInstallment] {
        for term in [120, 241, 420] {
            let schedule = compute_schedule(&loan(schedule_type, term, dec!(1.1))).unwrap();
            assert_eq!(schedule.len(), term as usize);
            for (idx, inst) in schedule.iter().enumerate() {
                assert_eq!(inst.number, idx as u32 + 1);
            }
        }
    }
}

// ===========================================================================
// SAC
// ===========================================================================

#[test]
fn test_sac_constant_amortization_without_index() {
    let schedule = compute_schedule(&loan(ScheduleType::ConstantAmortization, 120, Decimal::ZERO)).unwrap();
    let expected = dec!(100000) / dec!(120);
    for inst in &schedule {
        assert_close(inst.amortization_amount, expected, TOL, "SAC amortization");
    }
}

#[test]
fn test_sac_known_scenario() {
    // 100k over 120 months at 12% p.a. effective (~0.9489% monthly)
    let schedule = compute_schedule(&loan(ScheduleType::ConstantAmortization, 120, Decimal::ZERO)).unwrap();
    let first = schedule.first().unwrap();
    assert_close(first.amortization_amount, dec!(833.33), dec!(0.01), "p1 amortization");
    assert_close(first.interest_amount, dec!(948.88), dec!(0.01), "p1 interest");
    assert_close(first.payment_amount, dec!(1782.21), dec!(0.01), "p1 payment");
}

#[test]
fn test_sac_interest_strictly_decreasing_without_index() {
    let schedule = compute_schedule(&loan(ScheduleType::ConstantAmortization, 240, Decimal::ZERO)).unwrap();
    for pair in schedule.installments().windows(2) {
        assert!(pair[1].interest_amount < pair[0].interest_amount);
    }
}

#[test]
fn test_sac_amortization_grows_with_index() {
    // With a positive index the balance is topped up each month while the
    // divisor shrinks by one, so amortization rises period over period.
    let schedule = compute_schedule(&loan(ScheduleType::ConstantAmortization, 240, dec!(3))).unwrap();
    for pair in schedule.installments().windows(2) {
        assert!(pair[1].amortization_amount > pair[0].amortization_amount);
    }
}

#[test]
fn test_sac_amortization_sums_to_principal() {
    let schedule = compute_schedule(&loan(ScheduleType::ConstantAmortization, 360, Decimal::ZERO)).unwrap();
    let total: Decimal = schedule.iter().map(|i| i.amortization_amount).sum();
    // 1e-6 relative
    assert_close(total, dec!(100000), dec!(0.1), "SAC amortization total");
}

// ===========================================================================
// PRICE
// ===========================================================================

#[test]
fn test_price_level_payment_net_of_charges() {
    let mut params = loan(ScheduleType::ConstantInstallment, 360, Decimal::ZERO);
    params.monthly_admin_charge = dec!(25);
    params.monthly_insurance_charge = dec!(50);
    let schedule = compute_schedule(&params).unwrap();
    let level = schedule.first().unwrap().payment_amount - dec!(75);
    for inst in &schedule {
        assert_close(inst.payment_amount - inst.flat_charges, level, TOL, "PRICE level");
    }
}

#[test]
fn test_price_payment_invariance_from_any_period() {
    let params = loan(ScheduleType::ConstantInstallment, 180, Decimal::ZERO);
    let rates = normalize_rates(params.annual_interest_rate, params.annual_reference_rate).unwrap();
    let schedule = compute_schedule(&params).unwrap();
    let first = schedule.first().unwrap().payment_amount;

    for k in [2u32, 60, 121, 180] {
        let opening = schedule.installments()[(k - 2) as usize].outstanding_balance;
        let recomputed = annuity_payment(opening, rates.interest, 180 - k + 1).unwrap();
        assert_close(recomputed, first, TOL, "PMT recomputed");
    }
}

#[test]
fn test_price_payment_rises_with_index() {
    let schedule = compute_schedule(&loan(ScheduleType::ConstantInstallment, 240, dec!(2))).unwrap();
    for pair in schedule.installments().windows(2) {
        assert!(pair[1].payment_amount > pair[0].payment_amount);
    }
}

#[test]
fn test_price_zero_interest_fails() {
    let mut params = loan(ScheduleType::ConstantInstallment, 120, Decimal::ZERO);
    params.annual_interest_rate = Decimal::ZERO;
    assert!(matches!(
        compute_schedule(&params),
        Err(MortgageSimError::DivisionByZero { .. })
    ));
}

// ===========================================================================
// Shared
// ===========================================================================

#[test]
fn test_interest_chains_from_prior_balance() {
    for schedule_type in [ScheduleType::ConstantAmortization, ScheduleType::ConstantInstallment] {
        let params = loan(schedule_type, 120, dec!(1.8));
        let rates = normalize_rates(params.annual_interest_rate, params.annual_reference_rate).unwrap();
        let schedule = compute_schedule(&params).unwrap();

        assert_close(
            schedule.first().unwrap().interest_amount,
            params.principal * rates.interest,
            TOL,
            "first interest on principal",
        );
        for pair in schedule.installments().windows(2) {
            assert_close(
                pair[1].interest_amount,
                pair[0].outstanding_balance * rates.interest,
                TOL,
                "interest on prior closing balance",
            );
        }
    }
}

#[test]
fn test_reference_accrual_after_amortization() {
    let params = loan(ScheduleType::ConstantAmortization, 120, dec!(6));
    let schedule = compute_schedule(&params).unwrap();
    let first = schedule.first().unwrap();
    // (100000 - 833.33...) * 1.005
    let expected = (dec!(100000) - first.amortization_amount) * dec!(1.005);
    assert_close(first.outstanding_balance, expected, TOL, "accrued balance");
}

#[test]
fn test_simulate_envelope() {
    let output = simulate(&loan(ScheduleType::ConstantAmortization, 120, Decimal::ZERO)).unwrap();
    assert!(output.methodology.contains("SAC"));
    assert_eq!(output.metadata.precision, "rust_decimal_128bit");
    assert_eq!(output.result.summary.installment_count, 120);
    assert_eq!(output.assumptions["term_months"], 120);
}

// ===========================================================================
// Extreme rates on validated requests
// ===========================================================================

fn validated(schedule_type: ScheduleType, annual_interest_rate: Decimal) -> LoanParameters {
    validate_request(&LoanRequest {
        schedule_type,
        property_value: dec!(500000),
        down_payment: dec!(100000),
        term_months: 420,
        annual_interest_rate,
        annual_reference_rate: Decimal::ZERO,
        monthly_admin_charge: Decimal::ZERO,
        monthly_insurance_charge: Decimal::ZERO,
    })
    .unwrap()
}

#[test]
fn test_validated_high_rates_never_panic() {
    for rate in [dec!(300), dec!(600), dec!(1000)] {
        let schedule = compute_schedule(&validated(ScheduleType::ConstantInstallment, rate)).unwrap();
        assert_eq!(schedule.len(), 420);
    }

    for schedule_type in [ScheduleType::ConstantAmortization, ScheduleType::ConstantInstallment] {
        let err = compute_schedule(&validated(schedule_type, dec!(10000000))).unwrap_err();
        assert!(matches!(err, MortgageSimError::Overflow { .. }), "{err}");
    }
}
