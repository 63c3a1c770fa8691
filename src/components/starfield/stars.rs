//! Star population in polar form around the viewport center.

use std::f64::consts::TAU;

use rand::Rng;

use super::config::StarfieldConfig;
use super::error::{Result, StarfieldError};
use super::viewport::Viewport;

/// A single point-light. Only `theta` changes after generation.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
	/// Draw radius in physical pixels.
	pub radius: f64,
	/// Fixed distance from the viewport center.
	pub rho: f64,
	/// Current angle around the center, advanced every tick.
	pub theta: f64,
	pub base_alpha: f64,
	pub twinkle_phase: f64,
	pub twinkle_amplitude: f64,
}

impl Star {
	/// Brightness at `time` seconds, clamped to `[0, 1]`.
	pub fn alpha(&self, frequency: f64, time: f64) -> f64 {
		let twinkle = self.twinkle_amplitude * (frequency * time + self.twinkle_phase).sin();
		(self.base_alpha + twinkle).clamp(0.0, 1.0)
	}
}

/// Background stars followed by the cluster, in draw order.
#[derive(Clone, Debug, Default)]
pub struct StarField {
	pub stars: Vec<Star>,
	background_count: usize,
}

impl StarField {
	/// Builds a fresh population for `viewport`.
	pub fn generate<R: Rng + ?Sized>(
		viewport: &Viewport,
		config: &StarfieldConfig,
		rng: &mut R,
	) -> Result<Self> {
		config.validate()?;
		let background_count = usize::try_from(config.star_count).map_err(|_| {
			StarfieldError::InvalidConfig(format!(
				"star_count {} does not fit this target",
				config.star_count
			))
		})?;
		let density = viewport.density;
		let mut stars = Vec::with_capacity(background_count + config.cluster.len());

		for _ in 0..background_count {
			let x = rng.random_range(0.0..viewport.width);
			let y = rng.random_range(0.0..viewport.height);
			let (rho, theta) = viewport.to_polar(x, y);

			stars.push(Star {
				radius: rng.random_range(config.min_radius..=config.max_radius) * density,
				rho: rho.min(viewport.rmax),
				theta,
				base_alpha: rng.random_range(0.25..0.7),
				twinkle_phase: rng.random_range(0.0..TAU),
				twinkle_amplitude: config.twinkle_amplitude * rng.random_range(0.6..1.4),
			});
		}

		// Cluster members are left unclamped so the shape stays rigid. On viewports
		// smaller than the cluster itself they may sit beyond `rmax`.
		let ax = viewport.cx + viewport.width * config.cluster_anchor.x;
		let ay = viewport.cy + viewport.height * config.cluster_anchor.y;
		for member in &config.cluster {
			let (rho, theta) = viewport.to_polar(ax + member.dx * density, ay + member.dy * density);
			stars.push(Star {
				radius: member.r * density,
				rho,
				theta,
				base_alpha: config.cluster_alpha,
				twinkle_phase: rng.random_range(0.0..TAU),
				twinkle_amplitude: config.twinkle_amplitude * config.cluster_twinkle_scale,
			});
		}

		Ok(Self {
			stars,
			background_count,
		})
	}

	pub fn len(&self) -> usize {
		self.stars.len()
	}

	pub fn is_empty(&self) -> bool {
		self.stars.is_empty()
	}

	pub fn background(&self) -> &[Star] {
		&self.stars[..self.background_count]
	}

	pub fn cluster(&self) -> &[Star] {
		&self.stars[self.background_count..]
	}

	/// Applies the same angular increment to every star.
	pub fn rotate(&mut self, d_theta: f64) {
		for s in &mut self.stars {
			s.theta += d_theta;
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	fn field(seed: u64) -> (Viewport, StarfieldConfig, StarField) {
		let vp = Viewport::new(800.0, 600.0, 2.0).unwrap();
		let config = StarfieldConfig::default();
		let mut rng = SmallRng::seed_from_u64(seed);
		let f = StarField::generate(&vp, &config, &mut rng).unwrap();
		(vp, config, f)
	}

	#[test]
	fn population_size_and_order() {
		let (_, config, f) = field(1);
		assert_eq!(f.len(), config.star_count as usize + config.cluster.len());
		assert_eq!(f.background().len(), config.star_count as usize);
		assert_eq!(f.cluster().len(), config.cluster.len());
		assert!(f.cluster().iter().all(|s| s.base_alpha == config.cluster_alpha));
	}

	#[test]
	fn stars_respect_bounds() {
		let (vp, config, f) = field(7);
		for s in f.background() {
			assert!(s.rho >= 0.0 && s.rho <= vp.rmax);
			assert!(s.radius > 0.0);
			assert!(s.radius >= config.min_radius * vp.density);
			assert!(s.radius <= config.max_radius * vp.density);
			assert!((0.25..0.7).contains(&s.base_alpha));
			assert!((0.0..TAU).contains(&s.twinkle_phase));
		}
		for s in f.cluster() {
			assert!(s.rho <= vp.rmax);
			assert!(s.radius > 0.0);
		}
	}

	#[test]
	fn same_seed_same_field() {
		let (_, _, a) = field(99);
		let (_, _, b) = field(99);
		let (_, _, c) = field(100);
		assert_eq!(a.stars, b.stars);
		assert_ne!(a.stars, c.stars);
	}

	#[test]
	fn cluster_matches_configured_offsets() {
		let (vp, config, f) = field(3);
		let first = f.cluster()[0].clone();
		let (x0, y0) = vp.to_screen(first.rho, first.theta);
		for (star, member) in f.cluster().iter().zip(&config.cluster).skip(1) {
			let (x, y) = vp.to_screen(star.rho, star.theta);
			let (ex, ey) = (
				(member.dx - config.cluster[0].dx) * vp.density,
				(member.dy - config.cluster[0].dy) * vp.density,
			);
			assert!((x - x0 - ex).abs() < 1e-9);
			assert!((y - y0 - ey).abs() < 1e-9);
			assert!((star.radius - member.r * vp.density).abs() < 1e-12);
		}
	}

	#[test]
	fn rejects_empty_population() {
		let vp = Viewport::new(100.0, 100.0, 1.0).unwrap();
		let mut rng = SmallRng::seed_from_u64(0);
		for count in [0, -5] {
			let config = StarfieldConfig {
				star_count: count,
				..Default::default()
			};
			assert!(StarField::generate(&vp, &config, &mut rng).is_err());
		}
	}

	#[test]
	fn rejects_oversized_population() {
		let vp = Viewport::new(100.0, 100.0, 1.0).unwrap();
		let mut rng = SmallRng::seed_from_u64(0);
		let config = StarfieldConfig {
			star_count: i64::MAX,
			..Default::default()
		};
		assert!(matches!(
			StarField::generate(&vp, &config, &mut rng),
			Err(StarfieldError::InvalidConfig(_))
		));
	}

	#[test]
	fn tiny_viewport_keeps_cluster_shape_over_bounds() {
		let vp = Viewport::new(40.0, 30.0, 1.0).unwrap();
		let config = StarfieldConfig::default();
		let mut rng = SmallRng::seed_from_u64(12);
		let f = StarField::generate(&vp, &config, &mut rng).unwrap();

		// Background stars are clamped; the cluster is not, so it can overhang.
		assert!(f.background().iter().all(|s| s.rho <= vp.rmax));
		assert!(f.cluster().iter().any(|s| s.rho > vp.rmax));

		let (x0, y0) = vp.to_screen(f.cluster()[0].rho, f.cluster()[0].theta);
		for (star, member) in f.cluster().iter().zip(&config.cluster) {
			let (x, y) = vp.to_screen(star.rho, star.theta);
			assert!((x - x0 - (member.dx - config.cluster[0].dx)).abs() < 1e-9);
			assert!((y - y0 - (member.dy - config.cluster[0].dy)).abs() < 1e-9);
		}
	}

	#[test]
	fn alpha_is_clamped() {
		let bright = Star {
			radius: 1.0,
			rho: 0.0,
			theta: 0.0,
			base_alpha: 0.95,
			twinkle_phase: 0.0,
			twinkle_amplitude: 0.5,
		};
		let dim = Star {
			base_alpha: 0.05,
			..bright.clone()
		};
		for i in 0..200 {
			let t = i as f64 * 0.37;
			for freq in [0.05, 1.0, 13.0] {
				let a = bright.alpha(freq, t);
				let b = dim.alpha(freq, t);
				assert!((0.0..=1.0).contains(&a));
				assert!((0.0..=1.0).contains(&b));
			}
		}
		assert_eq!(bright.alpha(1.0, std::f64::consts::FRAC_PI_2), 1.0);
		assert_eq!(dim.alpha(1.0, -std::f64::consts::FRAC_PI_2), 0.0);
	}
}
