//! Wall-clock rotation integrator.
//!
//! The rotation increment is derived from measured elapsed time, never from a
//! per-tick constant, so apparent speed does not depend on the host's frame
//! cadence.

/// Turns successive clock readings into angular increments.
#[derive(Clone, Debug)]
pub struct RotationScheduler {
	/// Radians per second.
	angular_rate: f64,
	last_timestamp: Option<f64>,
}

impl RotationScheduler {
	pub fn new(angular_rate: f64) -> Self {
		Self {
			angular_rate,
			last_timestamp: None,
		}
	}

	pub fn angular_rate(&self) -> f64 {
		self.angular_rate
	}

	/// Records `now` (seconds) and returns the rotation accrued since the
	/// previous call. The first call yields zero. A clock that steps backwards
	/// also yields zero.
	pub fn advance(&mut self, now: f64) -> f64 {
		let dt = match self.last_timestamp {
			Some(last) => (now - last).max(0.0),
			None => 0.0,
		};
		self.last_timestamp = Some(now);
		self.angular_rate * dt
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn first_tick_is_zero() {
		let mut s = RotationScheduler::new(2.0);
		assert_eq!(s.advance(123.0), 0.0);
		assert!((s.advance(124.5) - 3.0).abs() < 1e-12);
	}

	#[test]
	fn total_rotation_independent_of_partition() {
		let rate = 0.001;
		let steps = [0.016, 0.5, 0.0, 2.25, 0.033, 7.2, 0.001];
		let total: f64 = steps.iter().sum();

		let mut irregular = RotationScheduler::new(rate);
		let mut t = 5.0;
		let mut sum = irregular.advance(t);
		for dt in steps {
			t += dt;
			sum += irregular.advance(t);
		}

		let mut single = RotationScheduler::new(rate);
		single.advance(5.0);
		let once = single.advance(5.0 + total);

		assert!((sum - rate * total).abs() < 1e-12);
		assert!((sum - once).abs() < 1e-12);
	}

	#[test]
	fn backwards_clock_does_not_rewind() {
		let mut s = RotationScheduler::new(1.0);
		s.advance(10.0);
		assert_eq!(s.advance(9.0), 0.0);
		assert!((s.advance(9.5) - 0.5).abs() < 1e-12);
	}
}
