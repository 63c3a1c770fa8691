//! Star field controller.
//!
//! Owns everything one running animation needs: configuration, viewport
//! metrics, the star population, the rotation integrator, the random source,
//! and the clock reading of the current frame. Created when the component
//! mounts, resized on window resize, and ticked once per animation frame.

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::clock::Clock;
use super::config::StarfieldConfig;
use super::error::{Result, StarfieldError};
use super::scheduler::RotationScheduler;
use super::stars::{Star, StarField};
use super::viewport::Viewport;

/// Lifecycle of a star field animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// No viewport has been applied yet.
	Uninitialized,
	/// Sized and accepting ticks.
	Running,
	/// Torn down or failed; ticks are ignored.
	Stopped,
}

pub struct StarfieldState<R = SmallRng> {
	pub config: StarfieldConfig,
	viewport: Option<Viewport>,
	field: StarField,
	scheduler: RotationScheduler,
	rng: R,
	/// Clock reading of the latest tick, in seconds.
	time: f64,
	phase: Phase,
}

impl StarfieldState<SmallRng> {
	/// Controller with a reproducible random source.
	pub fn seeded(config: StarfieldConfig, seed: u64) -> Result<Self> {
		Self::with_rng(config, SmallRng::seed_from_u64(seed))
	}
}

impl<R> StarfieldState<R> {
	pub fn viewport(&self) -> Option<&Viewport> {
		self.viewport.as_ref()
	}

	pub fn field(&self) -> &StarField {
		&self.field
	}

	pub fn stars(&self) -> &[Star] {
		&self.field.stars
	}

	pub fn time(&self) -> f64 {
		self.time
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	pub fn is_running(&self) -> bool {
		self.phase == Phase::Running
	}

	/// Advances every star by the rotation accrued up to `now` (seconds).
	///
	/// The whole population is rotated before this returns, so a render that
	/// follows never sees a partially rotated frame.
	pub fn tick(&mut self, now: f64) {
		if self.phase != Phase::Running {
			return;
		}
		let d_theta = self.scheduler.advance(now);
		self.field.rotate(d_theta);
		self.time = now;
	}

	/// Reads `clock` once and ticks with that reading.
	pub fn frame(&mut self, clock: &impl Clock) {
		self.tick(clock.now());
	}

	/// Stops accepting ticks for good.
	pub fn stop(&mut self) {
		if self.phase != Phase::Stopped {
			info!("starfield: animation stopped");
		}
		self.phase = Phase::Stopped;
	}
}

impl<R: Rng> StarfieldState<R> {
	/// Controller drawing its randomness from `rng`. Validates `config`.
	pub fn with_rng(config: StarfieldConfig, rng: R) -> Result<Self> {
		config.validate()?;
		let scheduler = RotationScheduler::new(config.angular_rate());
		Ok(Self {
			config,
			viewport: None,
			field: StarField::default(),
			scheduler,
			rng,
			time: 0.0,
			phase: Phase::Uninitialized,
		})
	}

	/// Applies new host dimensions: recomputes viewport metrics and replaces the
	/// population. Nothing is committed unless both steps succeed.
	pub fn resize(&mut self, logical_width: f64, logical_height: f64, density: f64) -> Result<()> {
		if self.phase == Phase::Stopped {
			return Ok(());
		}
		let viewport = Viewport::new(logical_width, logical_height, density)?;
		let field = StarField::generate(&viewport, &self.config, &mut self.rng)?;
		self.commit(viewport, field);
		Ok(())
	}

	/// Regenerates the population for the current viewport.
	pub fn populate(&mut self) -> Result<()> {
		let viewport = self.viewport.ok_or_else(|| {
			StarfieldError::InvalidConfig("cannot populate before the first resize".into())
		})?;
		let field = StarField::generate(&viewport, &self.config, &mut self.rng)?;
		self.commit(viewport, field);
		Ok(())
	}

	fn commit(&mut self, viewport: Viewport, field: StarField) {
		info!(
			"starfield: generated {} stars ({} in cluster) for {}x{} @ {}x",
			field.len(),
			field.cluster().len(),
			viewport.width,
			viewport.height,
			viewport.density
		);
		self.viewport = Some(viewport);
		self.field = field;
		if self.phase == Phase::Uninitialized {
			debug!("starfield: running");
			self.phase = Phase::Running;
		}
	}
}
