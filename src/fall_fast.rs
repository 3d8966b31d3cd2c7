//! Fast-fall release emulation.
//!
//! Plain terminals only report key presses. Holding Down then shows up as a
//! stream of auto-repeated presses, and nothing marks the moment the key is let
//! go. [`ReleaseEmulator`] turns that stream back into a press/release pair: the
//! first press passes through, repeats inside the grace window are swallowed,
//! and a release is synthesized once the presses stop.

use crate::types::Seconds;

/// Silence after the last Down press that counts as a release.
pub const RELEASE_GRACE_MS: u64 = 150;

/// Whole milliseconds, so the grace comparison is exact at the boundary.
fn to_millis(now: Seconds) -> u64 {
    (now * 1000.0).round() as u64
}

#[derive(Debug, Clone, Default)]
pub struct ReleaseEmulator {
    last_press_ms: Option<u64>,
}

impl ReleaseEmulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a Down press at `now`. Returns true if it should reach the game,
    /// false for a repeat of a press that is still held.
    pub fn press(&mut self, now: Seconds) -> bool {
        self.last_press_ms.replace(to_millis(now)).is_none()
    }

    /// Forget the held key, e.g. after the game consumed a release or changed phase.
    pub fn reset(&mut self) {
        self.last_press_ms = None;
    }

    pub fn is_held(&self) -> bool {
        self.last_press_ms.is_some()
    }

    /// True exactly once when the grace window since the last press has passed.
    pub fn release_due(&mut self, now: Seconds) -> bool {
        match self.last_press_ms {
            Some(at) if to_millis(now).saturating_sub(at) >= RELEASE_GRACE_MS => {
                self.last_press_ms = None;
                true
            }
            _ => false,
        }
    }
}
