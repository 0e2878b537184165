use crate::error::QuoteMathError;
use crate::tick_math::{MAX_TICK, MIN_TICK};
use serde::{Deserialize, Serialize};

// largest spacing the factory accepts
pub const MAX_TICK_SPACING: i32 = 16384;

/// Distance between usable ticks of a pool, always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct TickSpacing(i32);

impl TickSpacing {
    pub fn new(spacing: i32) -> Result<Self, QuoteMathError> {
        if spacing < 1 || spacing > MAX_TICK_SPACING {
            return Err(QuoteMathError::InvalidTickSpacing(spacing));
        }
        Ok(TickSpacing(spacing))
    }

    // caller guarantees 1 <= spacing <= MAX_TICK_SPACING
    pub(crate) const fn new_unchecked(spacing: i32) -> Self {
        TickSpacing(spacing)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for TickSpacing {
    type Error = QuoteMathError;

    fn try_from(spacing: i32) -> Result<Self, Self::Error> {
        TickSpacing::new(spacing)
    }
}

impl From<TickSpacing> for i32 {
    fn from(spacing: TickSpacing) -> i32 {
        spacing.0
    }
}

/// Aligns `tick` to a multiple of `tick_spacing`.
///
/// `round_down` floors toward negative infinity (lower bounds), otherwise the
/// tick is raised to the next multiple (upper bounds). Ticks are expected to
/// lie inside [MIN_TICK, MAX_TICK].
pub fn snap_tick(tick: i32, tick_spacing: TickSpacing, round_down: bool) -> i32 {
    let spacing = tick_spacing.get();
    let quotient = tick.div_euclid(spacing);
    if round_down || tick.rem_euclid(spacing) == 0 {
        quotient * spacing
    } else {
        (quotient + 1) * spacing
    }
}

pub fn is_aligned(tick: i32, tick_spacing: TickSpacing) -> bool {
    tick.rem_euclid(tick_spacing.get()) == 0
}

/// Lowest and highest ticks usable with `tick_spacing`.
pub fn usable_tick_bounds(tick_spacing: TickSpacing) -> (i32, i32) {
    (
        snap_tick(MIN_TICK, tick_spacing, false),
        snap_tick(MAX_TICK, tick_spacing, true),
    )
}

#[cfg(test)]
mod test {
    use super::*;

    fn spacing(value: i32) -> TickSpacing {
        TickSpacing::new(value).unwrap()
    }

    #[test]
    fn test_tick_spacing() {
        assert!(matches!(
            TickSpacing::new(0),
            Err(QuoteMathError::InvalidTickSpacing(0))
        ));
        assert!(matches!(
            TickSpacing::new(-60),
            Err(QuoteMathError::InvalidTickSpacing(-60))
        ));
        assert!(TickSpacing::new(MAX_TICK_SPACING + 1).is_err());
        assert_eq!(spacing(60).get(), 60);
    }

    #[test]
    fn test_snap_tick() {
        assert_eq!(snap_tick(37, spacing(60), true), 0);
        assert_eq!(snap_tick(37, spacing(60), false), 60);
        assert_eq!(snap_tick(-37, spacing(60), true), -60);
        assert_eq!(snap_tick(-37, spacing(60), false), 0);
        assert_eq!(snap_tick(120, spacing(60), true), 120);
        assert_eq!(snap_tick(120, spacing(60), false), 120);
        assert_eq!(snap_tick(-120, spacing(60), false), -120);
        assert_eq!(snap_tick(-367656, spacing(200), true), -367800);
        assert_eq!(snap_tick(-353238, spacing(200), false), -353200);
    }

    #[test]
    fn test_snap_tick_idempotent_and_ordered() {
        for s in [1, 10, 60, 200, 16384] {
            let tick_spacing = spacing(s);
            let mut tick = MIN_TICK;
            while tick <= MAX_TICK {
                for round_down in [true, false] {
                    let snapped = snap_tick(tick, tick_spacing, round_down);
                    assert_eq!(snap_tick(snapped, tick_spacing, round_down), snapped);
                    assert!(is_aligned(snapped, tick_spacing));
                }
                let lower = snap_tick(tick, tick_spacing, true);
                let upper = snap_tick(tick, tick_spacing, false);
                assert!(lower <= tick && tick <= upper);
                assert!(upper - lower <= s);
                tick += 7919;
            }
        }
    }

    #[test]
    fn test_usable_tick_bounds() {
        assert_eq!(usable_tick_bounds(spacing(1)), (MIN_TICK, MAX_TICK));
        assert_eq!(usable_tick_bounds(spacing(60)), (-887220, 887220));
        assert_eq!(usable_tick_bounds(spacing(200)), (-887200, 887200));
    }
}
