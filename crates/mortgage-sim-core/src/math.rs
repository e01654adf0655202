use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const ROOT_TOLERANCE: Decimal = dec!(0.0000000000001);
const ROOT_MAX_ITERATIONS: u32 = 40;

/// Compute base^n for a non-negative integer exponent via iterative multiplication.
/// `None` when the product leaves the `Decimal` range.
pub(crate) fn iterative_pow(base: Decimal, n: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result = result.checked_mul(base)?;
    }
    Some(result)
}

/// Compute 1 / base^n. Zero when base^n underflows to zero or overflows.
pub(crate) fn iterative_pow_recip(base: Decimal, n: u32) -> Decimal {
    match iterative_pow(base, n) {
        Some(pow) if !pow.is_zero() => Decimal::ONE / pow,
        _ => Decimal::ZERO,
    }
}

/// Compute the nth root of a non-negative x using Newton's method.
/// `None` when an iterate overflows.
pub(crate) fn nth_root(x: Decimal, n: u32) -> Option<Decimal> {
    if x == Decimal::ONE || x.is_zero() {
        return Some(x);
    }
    if n == 0 {
        return Some(Decimal::ONE);
    }
    if n == 1 {
        return Some(x);
    }

    let n_dec = Decimal::from(n);
    let mut guess = Decimal::ONE;

    for _ in 0..ROOT_MAX_ITERATIONS {
        let g_n_minus_1 = iterative_pow(guess, n - 1)?;
        if g_n_minus_1.is_zero() {
            break;
        }
        let g_n = g_n_minus_1.checked_mul(guess)?;

        let delta = (g_n - x).checked_div(n_dec.checked_mul(g_n_minus_1)?)?;
        guess = guess.checked_sub(delta)?;

        if delta.abs() < ROOT_TOLERANCE {
            break;
        }
    }

    Some(guess)
}
