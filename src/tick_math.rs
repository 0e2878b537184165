use crate::error::QuoteMathError;
use alloy::primitives::U256;

pub const MIN_TICK: i32 = -887272;
pub const MAX_TICK: i32 = -MIN_TICK;

// sqrt ratio at MIN_TICK
pub const MIN_SQRT_RATIO: U256 = U256::from_limbs([4295128739, 0, 0, 0]);
// sqrt ratio at MAX_TICK
pub const MAX_SQRT_RATIO: U256 = U256::from_limbs([
    6743328256752651558,
    17280870778742802505,
    4294805859,
    0,
]);

// 1/sqrt(1.0001)^(2^i) as Q128.128, i = 0..20
const RATIO_MULTIPLIERS: [u128; 20] = [
    0xfffcb933bd6fad37aa2d162d1a594001,
    0xfff97272373d413259a46990580e213a,
    0xfff2e50f5f656932ef12357cf3c7fdcc,
    0xffe5caca7e10e4e61c3624eaa0941cd0,
    0xffcb9843d60f6159c9db58835c926644,
    0xff973b41fa98c081472e6896dfb254c0,
    0xff2ea16466c96a3843ec78b326b52861,
    0xfe5dee046a99a2a811c461f1969c3053,
    0xfcbe86c7900a88aedcffc83b479aa3a4,
    0xf987a7253ac413176f2b074cf7815e54,
    0xf3392b0822b70005940c7a398e4b70f3,
    0xe7159475a2c29b7443b29c7fa6e889d9,
    0xd097f3bdfd2022b8845ad8f792aa5825,
    0xa9f746462d870fdf8a65dc1f90e061e5,
    0x70d869a156d2a1b890bb3df62baf32f7,
    0x31be135f97d08fd981231505542fcfa6,
    0x9aa508b5b7a84e1c677de54f3e99bc9,
    0x5d6af8dedb81196699c329225ee604,
    0x2216e584f5fa1ea926041bedfe98,
    0x48a170391f7dc42444e8fa2,
];

pub fn check_tick(tick: i32) -> Result<(), QuoteMathError> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(QuoteMathError::TickOutOfBounds(tick));
    }
    Ok(())
}

/// Exact sqrt(1.0001^tick) * 2^96, bit for bit what the pool contracts compute.
///
/// Use this whenever the result is submitted on-chain. The floating point
/// [`crate::price::tick_to_sqrt_price_x96`] only agrees to ~15 significant digits.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U256, QuoteMathError> {
    check_tick(tick)?;
    let abs_tick = tick.unsigned_abs();

    let mut ratio = if abs_tick & 0x1 != 0 {
        U256::from(RATIO_MULTIPLIERS[0])
    } else {
        U256::from(1) << 128
    };
    for (bit, multiplier) in RATIO_MULTIPLIERS.iter().enumerate().skip(1) {
        if abs_tick & (1 << bit) != 0 {
            ratio = (ratio * U256::from(*multiplier)) >> 128;
        }
    }
    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q64.96, rounding up
    let round_up = if (ratio & U256::from(u32::MAX)).is_zero() {
        U256::ZERO
    } else {
        U256::from(1)
    };
    Ok((ratio >> 32) + round_up)
}

/// Greatest tick whose sqrt ratio is less than or equal to `sqrt_price_x96`.
pub fn get_tick_at_sqrt_ratio(sqrt_price_x96: U256) -> Result<i32, QuoteMathError> {
    if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 >= MAX_SQRT_RATIO {
        return Err(QuoteMathError::SqrtPriceOutOfBounds);
    }
    let mut low = MIN_TICK;
    let mut high = MAX_TICK;
    while low < high {
        let mid = low + (high - low + 1) / 2;
        if get_sqrt_ratio_at_tick(mid)? <= sqrt_price_x96 {
            low = mid;
        } else {
            high = mid - 1;
        }
    }
    Ok(low)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::full_math::Q96;
    use std::str::FromStr;

    #[test]
    fn test_get_sqrt_ratio_at_tick_bounds() {
        assert!(matches!(
            get_sqrt_ratio_at_tick(MIN_TICK - 1),
            Err(QuoteMathError::TickOutOfBounds(_))
        ));
        assert!(matches!(
            get_sqrt_ratio_at_tick(MAX_TICK + 1),
            Err(QuoteMathError::TickOutOfBounds(_))
        ));
    }

    #[test]
    fn test_get_sqrt_ratio_at_tick_values() -> eyre::Result<()> {
        assert_eq!(get_sqrt_ratio_at_tick(MIN_TICK)?, MIN_SQRT_RATIO);
        assert_eq!(get_sqrt_ratio_at_tick(MAX_TICK)?, MAX_SQRT_RATIO);
        assert_eq!(get_sqrt_ratio_at_tick(0)?, Q96);
        assert_eq!(
            get_sqrt_ratio_at_tick(MIN_TICK + 1)?,
            U256::from(4295343490u64)
        );
        assert_eq!(
            get_sqrt_ratio_at_tick(MAX_TICK - 1)?,
            U256::from_str("1461373636630004318706518188784493106690254656249")?
        );
        assert_eq!(
            get_sqrt_ratio_at_tick(1)?,
            U256::from_str("79232123823359799118286999568")?
        );
        assert_eq!(
            get_sqrt_ratio_at_tick(-1)?,
            U256::from_str("79224201403219477170569942574")?
        );
        assert_eq!(
            get_sqrt_ratio_at_tick(60)?,
            U256::from_str("79466191966197645195421774833")?
        );
        assert_eq!(
            get_sqrt_ratio_at_tick(-360447)?,
            U256::from_str("1181037675793633873273")?
        );
        Ok(())
    }

    #[test]
    fn test_get_tick_at_sqrt_ratio() -> eyre::Result<()> {
        assert_eq!(get_tick_at_sqrt_ratio(MIN_SQRT_RATIO)?, MIN_TICK);
        assert_eq!(get_tick_at_sqrt_ratio(Q96)?, 0);
        assert_eq!(get_tick_at_sqrt_ratio(Q96 - U256::from(1))?, -1);
        assert_eq!(
            get_tick_at_sqrt_ratio(MAX_SQRT_RATIO - U256::from(1))?,
            MAX_TICK - 1
        );
        for tick in [-360447, -200, -1, 1, 60, 4470, 200_000] {
            let ratio = get_sqrt_ratio_at_tick(tick)?;
            assert_eq!(get_tick_at_sqrt_ratio(ratio)?, tick);
            assert_eq!(get_tick_at_sqrt_ratio(ratio - U256::from(1))?, tick - 1);
        }
        assert!(matches!(
            get_tick_at_sqrt_ratio(MAX_SQRT_RATIO),
            Err(QuoteMathError::SqrtPriceOutOfBounds)
        ));
        assert!(matches!(
            get_tick_at_sqrt_ratio(MIN_SQRT_RATIO - U256::from(1)),
            Err(QuoteMathError::SqrtPriceOutOfBounds)
        ));
        Ok(())
    }
}
