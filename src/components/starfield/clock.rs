//! Monotonic time sources driving rotation and twinkle.

use std::cell::Cell;

use web_sys::{Performance, Window};

use super::error::{Result, StarfieldError};

/// A monotonically increasing clock, in seconds.
///
/// Read once per frame; the same reading drives both rotation and twinkle.
pub trait Clock {
	fn now(&self) -> f64;
}

/// Browser high-resolution clock (`performance.now()`), sharing its time origin
/// with `requestAnimationFrame` timestamps.
pub struct PerformanceClock {
	performance: Performance,
}

impl PerformanceClock {
	pub fn from_window(window: &Window) -> Result<Self> {
		let performance = window
			.performance()
			.ok_or_else(|| StarfieldError::SurfaceUnavailable("window.performance missing".into()))?;
		Ok(Self { performance })
	}
}

impl Clock for PerformanceClock {
	fn now(&self) -> f64 {
		self.performance.now() / 1000.0
	}
}

/// Clock advanced by hand. Useful for deterministic stepping.
#[derive(Debug, Default)]
pub struct ManualClock {
	now: Cell<f64>,
}

impl ManualClock {
	pub fn new(start: f64) -> Self {
		Self {
			now: Cell::new(start),
		}
	}

	pub fn advance(&self, seconds: f64) {
		self.now.set(self.now.get() + seconds);
	}

	pub fn set(&self, seconds: f64) {
		self.now.set(seconds);
	}
}

impl Clock for ManualClock {
	fn now(&self) -> f64 {
		self.now.get()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn manual_clock_advances() {
		let clock = ManualClock::new(10.0);
		clock.advance(0.25);
		clock.advance(0.5);
		assert_eq!(clock.now(), 10.75);
		clock.set(3.0);
		assert_eq!(clock.now(), 3.0);
	}
}
