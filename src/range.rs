use crate::error::QuoteMathError;
use crate::price::{price_to_tick, tick_to_price};
use crate::tick::{is_aligned, snap_tick, TickSpacing};
use crate::tick_math::{MAX_TICK, MIN_TICK};
use serde::{Deserialize, Serialize};

// half width of the default range, as a fraction of |current tick|
pub const DEFAULT_RANGE_FRACTION: f64 = 0.02;

/// The `[tick_lower, tick_upper]` interval a position covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRange {
    pub tick_lower: i32,
    pub tick_upper: i32,
}

impl PositionRange {
    /// Validated range: ordered, aligned to `tick_spacing` and inside the tick bounds.
    pub fn new(
        tick_lower: i32,
        tick_upper: i32,
        tick_spacing: TickSpacing,
    ) -> Result<Self, QuoteMathError> {
        if tick_lower >= tick_upper {
            return Err(QuoteMathError::InvalidRange {
                lower: tick_lower,
                upper: tick_upper,
            });
        }
        if tick_lower < MIN_TICK {
            return Err(QuoteMathError::TickOutOfBounds(tick_lower));
        }
        if tick_upper > MAX_TICK {
            return Err(QuoteMathError::TickOutOfBounds(tick_upper));
        }
        for tick in [tick_lower, tick_upper] {
            if !is_aligned(tick, tick_spacing) {
                return Err(QuoteMathError::UnalignedTick {
                    tick,
                    spacing: tick_spacing.get(),
                });
            }
        }
        Ok(PositionRange {
            tick_lower,
            tick_upper,
        })
    }

    /// Display prices of both bounds.
    pub fn price_bounds(&self) -> (f64, f64) {
        (tick_to_price(self.tick_lower), tick_to_price(self.tick_upper))
    }

    pub fn contains(&self, tick: i32) -> bool {
        self.tick_lower <= tick && tick < self.tick_upper
    }
}

/// Default range around the current tick: ±2% of |current_tick|, at least one tick,
/// lower bound snapped down and upper bound snapped up.
///
/// Not clamped to the tick bounds; a pool sitting within 2% of MIN_TICK or MAX_TICK
/// gets a range that [`PositionRange::new`] would reject.
pub fn default_range(current_tick: i32, tick_spacing: TickSpacing) -> PositionRange {
    let range =
        ((current_tick.unsigned_abs() as f64 * DEFAULT_RANGE_FRACTION).round() as i32).max(1);
    PositionRange {
        tick_lower: snap_tick(current_tick - range, tick_spacing, true),
        tick_upper: snap_tick(current_tick + range, tick_spacing, false),
    }
}

/// Range typed in as prices: each price is converted to its nearest tick, then the
/// lower bound is snapped down and the upper bound up.
pub fn range_from_prices(
    lower_price: f64,
    upper_price: f64,
    tick_spacing: TickSpacing,
) -> Result<PositionRange, QuoteMathError> {
    let tick_lower = snap_tick(price_to_tick(lower_price)?, tick_spacing, true);
    let tick_upper = snap_tick(price_to_tick(upper_price)?, tick_spacing, false);
    PositionRange::new(tick_lower, tick_upper, tick_spacing)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_range() -> eyre::Result<()> {
        let range = default_range(-360447, TickSpacing::new(200)?);
        assert_eq!(range.tick_lower, -367800);
        assert_eq!(range.tick_upper, -353200);

        let range = default_range(0, TickSpacing::new(60)?);
        assert_eq!(range.tick_lower, -60);
        assert_eq!(range.tick_upper, 60);

        let range = default_range(0, TickSpacing::new(1)?);
        assert_eq!(range.tick_lower, -1);
        assert_eq!(range.tick_upper, 1);

        let range = default_range(84_056, TickSpacing::new(60)?);
        assert_eq!(range.tick_lower, 82_320);
        assert_eq!(range.tick_upper, 85_740);
        Ok(())
    }

    #[test]
    fn test_default_range_always_valid() -> eyre::Result<()> {
        for spacing in [1, 10, 60, 200] {
            let tick_spacing = TickSpacing::new(spacing)?;
            let mut tick = -860_000;
            while tick <= 860_000 {
                let range = default_range(tick, tick_spacing);
                assert!(range.tick_lower < range.tick_upper);
                assert!(is_aligned(range.tick_lower, tick_spacing));
                assert!(is_aligned(range.tick_upper, tick_spacing));
                assert!(range.tick_lower <= tick && tick <= range.tick_upper);
                PositionRange::new(range.tick_lower, range.tick_upper, tick_spacing)?;
                tick += 4099;
            }
        }
        Ok(())
    }

    #[test]
    fn test_position_range_validation() -> eyre::Result<()> {
        let spacing = TickSpacing::new(60)?;
        assert!(PositionRange::new(-60, 60, spacing).is_ok());
        assert!(matches!(
            PositionRange::new(60, 60, spacing),
            Err(QuoteMathError::InvalidRange { .. })
        ));
        assert!(matches!(
            PositionRange::new(120, 60, spacing),
            Err(QuoteMathError::InvalidRange { .. })
        ));
        assert!(matches!(
            PositionRange::new(-61, 60, spacing),
            Err(QuoteMathError::UnalignedTick { tick: -61, spacing: 60 })
        ));
        assert!(matches!(
            PositionRange::new(-887280, 60, spacing),
            Err(QuoteMathError::TickOutOfBounds(-887280))
        ));
        Ok(())
    }

    #[test]
    fn test_range_from_prices() -> eyre::Result<()> {
        let spacing = TickSpacing::new(60)?;
        let range = range_from_prices(4096.0, 4759.0, spacing)?;
        assert_eq!(range.tick_lower, 83_160);
        assert_eq!(range.tick_upper, 84_720);
        let (lower, upper) = range.price_bounds();
        assert!(lower < 4096.0 && upper > 4759.0);
        assert!(range.contains(price_to_tick(4470.0)?));

        assert!(matches!(
            range_from_prices(4759.0, 4096.0, spacing),
            Err(QuoteMathError::InvalidRange { .. })
        ));
        assert!(matches!(
            range_from_prices(0.0, 4096.0, spacing),
            Err(QuoteMathError::InvalidPrice(_))
        ));
        Ok(())
    }
}
