use crate::error::QuoteMathError;
use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

pub const BASIS_POINTS: u32 = 10_000;
// highest tolerance accepted, 50%
pub const MAX_SLIPPAGE_BPS: u32 = 5_000;

/// Slippage tolerance in basis points (0.5% = 50).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slippage {
    bps: u32,
}

impl Default for Slippage {
    fn default() -> Self {
        Slippage { bps: 50 }
    }
}

// floor(amount * numerator / BASIS_POINTS) without a wider intermediate
fn scale(amount: U256, numerator: u32) -> U256 {
    let denominator = U256::from(BASIS_POINTS);
    let numerator = U256::from(numerator);
    let quotient = amount / denominator;
    let remainder = amount % denominator;
    quotient * numerator + remainder * numerator / denominator
}

impl Slippage {
    /// From a percentage as typed in the settings (0.5 means 0.5%), at most 50%.
    ///
    /// Rounded to the nearest basis point.
    pub fn from_percent(percent: f64) -> Result<Self, QuoteMathError> {
        let max_percent = MAX_SLIPPAGE_BPS as f64 / 100.0;
        if !percent.is_finite() || !(0.0..=max_percent).contains(&percent) {
            return Err(QuoteMathError::InvalidSlippage(percent));
        }
        Ok(Slippage {
            bps: (percent * 100.0).round() as u32,
        })
    }

    pub fn from_bps(bps: u32) -> Result<Self, QuoteMathError> {
        if bps > MAX_SLIPPAGE_BPS {
            return Err(QuoteMathError::InvalidSlippage(bps as f64 / 100.0));
        }
        Ok(Slippage { bps })
    }

    pub fn bps(&self) -> u32 {
        self.bps
    }

    pub fn percent(&self) -> f64 {
        self.bps as f64 / 100.0
    }

    /// amount * (1 - tolerance): the least output accepted for a swap or mint.
    pub fn minimum_out(&self, amount: U256) -> U256 {
        scale(amount, BASIS_POINTS - self.bps)
    }

    /// amount * tolerance: the multiplicative floor used for decrease-liquidity minimums.
    pub fn fraction_of(&self, amount: U256) -> U256 {
        scale(amount, self.bps)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_percent() -> eyre::Result<()> {
        assert_eq!(Slippage::from_percent(0.5)?.bps(), 50);
        assert_eq!(Slippage::from_percent(0.0)?.bps(), 0);
        assert_eq!(Slippage::from_percent(50.0)?.bps(), 5_000);
        assert_eq!(Slippage::from_percent(0.5)?, Slippage::default());
        // 0.57 * 100 and 0.29 * 100 land just under the whole basis point
        assert_eq!(Slippage::from_percent(0.57)?.bps(), 57);
        assert_eq!(Slippage::from_percent(0.29)?.bps(), 29);
        assert_eq!(Slippage::from_percent(1.15)?.bps(), 115);
        assert_eq!(Slippage::from_percent(0.004)?.bps(), 0);
        assert!(matches!(
            Slippage::from_percent(-0.1),
            Err(QuoteMathError::InvalidSlippage(_))
        ));
        assert!(matches!(
            Slippage::from_percent(50.01),
            Err(QuoteMathError::InvalidSlippage(_))
        ));
        assert!(matches!(
            Slippage::from_percent(100.0),
            Err(QuoteMathError::InvalidSlippage(_))
        ));
        assert!(Slippage::from_percent(f64::NAN).is_err());
        assert_eq!(Slippage::from_bps(5_000)?.bps(), 5_000);
        assert!(Slippage::from_bps(5_001).is_err());
        Ok(())
    }

    #[test]
    fn test_minimum_out() -> eyre::Result<()> {
        let slippage = Slippage::from_percent(0.5)?;
        assert_eq!(slippage.minimum_out(U256::from(10_000)), U256::from(9_950));
        assert_eq!(slippage.minimum_out(U256::from(1_000_001)), U256::from(995_000));
        assert_eq!(slippage.minimum_out(U256::ZERO), U256::ZERO);
        // no overflow at the top of the range
        let max = slippage.minimum_out(U256::MAX);
        assert!(max < U256::MAX);
        assert_eq!(Slippage::from_bps(0)?.minimum_out(U256::MAX), U256::MAX);
        Ok(())
    }

    #[test]
    fn test_fraction_of() -> eyre::Result<()> {
        let slippage = Slippage::from_percent(0.5)?;
        assert_eq!(slippage.fraction_of(U256::from(10_000)), U256::from(50));
        assert_eq!(slippage.fraction_of(U256::from(199)), U256::ZERO);
        assert_eq!(Slippage::from_bps(5_000)?.fraction_of(U256::from(10_001)), U256::from(5_000));
        assert_eq!(Slippage::from_percent(0.57)?.fraction_of(U256::from(10_000)), U256::from(57));
        Ok(())
    }
}
