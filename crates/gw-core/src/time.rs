//! Turn time model.
//!
//! The host game drives everything from a monotonically increasing `Tick`
//! counter; this crate never owns a clock of its own.  `Cadence` expresses
//! "run every N ticks" checks (the reservation validation sweep runs on a
//! fixed cadence, not every tick).

use std::fmt;

// ── Tick ──────────────────────────────────────────────────────────────────────

/// An absolute turn-thread tick counter.  `u64` cannot realistically wrap.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── Cadence ───────────────────────────────────────────────────────────────────

/// A fixed-interval schedule: due on every tick that is a multiple of
/// `interval_ticks`.  An interval of 0 is never due (disabled).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cadence {
    pub interval_ticks: u64,
}

impl Cadence {
    #[inline]
    pub fn every(interval_ticks: u64) -> Self {
        Self { interval_ticks }
    }

    /// `true` if work scheduled on this cadence should run at `tick`.
    #[inline]
    pub fn due(self, tick: Tick) -> bool {
        self.interval_ticks > 0 && tick.0.is_multiple_of(self.interval_ticks)
    }
}
