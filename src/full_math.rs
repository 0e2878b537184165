use crate::error::QuoteMathError;
use alloy::primitives::{Uint, I256, U256, U512};
use alloy::primitives::ruint::UintTryFrom;

// 2^96, the fixed point scale of every sqrt price
pub const Q96: U256 = U256::from_limbs([0, 1 << 32, 0, 0]);
// 2^192, the scale of a squared sqrt price
pub const Q192: U512 = U512::from_limbs([0, 0, 0, 1, 0, 0, 0, 0]);

/// Returns `floor(sqrt(value))` using Newton's method.
///
/// Iteration starts at `value / 2` and stops as soon as the next estimate
/// stops decreasing. 0 and 1 are returned as is.
pub fn integer_sqrt<const BITS: usize, const LIMBS: usize>(
    value: Uint<BITS, LIMBS>,
) -> Uint<BITS, LIMBS> {
    if value.bit_len() <= 1 {
        return value;
    }
    let mut x0 = value >> 1usize;
    let mut x1 = (x0 + value / x0) >> 1usize;
    while x1 < x0 {
        x0 = x1;
        x1 = (x0 + value / x0) >> 1usize;
    }
    x0
}

/// Square root of a signed value, rejecting negative input.
pub fn integer_sqrt_signed(value: I256) -> Result<U256, QuoteMathError> {
    if value.is_negative() {
        return Err(QuoteMathError::NegativeSquareRoot);
    }
    Ok(integer_sqrt(value.into_raw()))
}

/// Calculates floor(a×b÷denominator) with a 512 bit intermediate product.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, QuoteMathError> {
    if denominator.is_zero() {
        return Err(QuoteMathError::DivisionByZero);
    }
    let product = U512::from(a) * U512::from(b);
    narrow(product / U512::from(denominator))
}

/// Narrows a 512 bit intermediate back to 256 bits.
pub fn narrow(value: U512) -> Result<U256, QuoteMathError> {
    U256::uint_try_from(value).ok().ok_or(QuoteMathError::Overflow)
}

// (mantissa, exponent) such that value == mantissa * 2^exponent
pub(crate) fn decompose_f64(value: f64) -> (u64, i32) {
    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    if biased == 0 {
        // subnormal
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased - 1075)
    }
}

/// Exact floor of a finite, non-negative double.
///
/// Returns `None` for NaN, infinities, negative values and values of 2^256 or more.
pub fn u256_from_f64_floor(value: f64) -> Option<U256> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    if value < 1.0 {
        return Some(U256::ZERO);
    }
    let (mantissa, exponent) = decompose_f64(value);
    if exponent >= 0 {
        let shift = exponent as usize;
        if 64 - mantissa.leading_zeros() as usize + shift > 256 {
            return None;
        }
        Some(U256::from(mantissa) << shift)
    } else {
        Some(U256::from(mantissa >> exponent.unsigned_abs()))
    }
}

/// Nearest double to `value`. Display only.
pub fn u256_to_f64(value: U256) -> f64 {
    f64::from(value)
}
