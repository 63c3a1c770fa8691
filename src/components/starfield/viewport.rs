//! Viewport metrics: physical size, center, and the maximum radial extent.

use super::error::{Result, StarfieldError};

/// Margin applied to the center-to-corner distance so corner stars never pop
/// in or out as the field rotates.
pub const RADIUS_MARGIN: f64 = 1.05;

/// Normalizes a host-reported pixel density, flooring it at 1.
pub fn normalize_density(raw: f64) -> f64 {
	if raw.is_finite() { raw.max(1.0) } else { 1.0 }
}

/// Sizing of the drawing surface, recomputed wholesale on every resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub logical_width: f64,
	pub logical_height: f64,
	/// Physical pixels per logical pixel.
	pub density: f64,
	/// Physical width in pixels.
	pub width: f64,
	/// Physical height in pixels.
	pub height: f64,
	pub cx: f64,
	pub cy: f64,
	/// Largest radial distance a star may sit from the center.
	pub rmax: f64,
}

impl Viewport {
	pub fn new(logical_width: f64, logical_height: f64, density: f64) -> Result<Self> {
		let degenerate = || StarfieldError::DegenerateViewport {
			width: logical_width,
			height: logical_height,
			density,
		};
		let positive = |v: f64| v.is_finite() && v > 0.0;
		if !(positive(logical_width) && positive(logical_height) && positive(density)) {
			return Err(degenerate());
		}

		let width = (logical_width * density).round();
		let height = (logical_height * density).round();
		if width < 1.0 || height < 1.0 {
			return Err(degenerate());
		}

		let (cx, cy) = (width / 2.0, height / 2.0);
		Ok(Self {
			logical_width,
			logical_height,
			density,
			width,
			height,
			cx,
			cy,
			rmax: cx.hypot(cy) * RADIUS_MARGIN,
		})
	}

	/// Converts polar coordinates around the center to physical pixel coordinates.
	pub fn to_screen(&self, rho: f64, theta: f64) -> (f64, f64) {
		(self.cx + rho * theta.cos(), self.cy + rho * theta.sin())
	}

	/// Converts a physical pixel position to `(rho, theta)` around the center.
	pub fn to_polar(&self, x: f64, y: f64) -> (f64, f64) {
		let (dx, dy) = (x - self.cx, y - self.cy);
		(dx.hypot(dy), dy.atan2(dx))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn computes_center_and_extent() {
		let vp = Viewport::new(800.0, 600.0, 1.0).unwrap();
		assert_eq!((vp.width, vp.height), (800.0, 600.0));
		assert_eq!((vp.cx, vp.cy), (400.0, 300.0));
		assert!((vp.rmax - 500.0 * 1.05).abs() < 1e-9);
	}

	#[test]
	fn scales_by_density_and_rounds() {
		let vp = Viewport::new(333.0, 201.0, 1.5).unwrap();
		assert_eq!((vp.width, vp.height), (500.0, 302.0));
		assert_eq!((vp.cx, vp.cy), (250.0, 151.0));
		assert_eq!((vp.logical_width, vp.logical_height), (333.0, 201.0));
	}

	#[test]
	fn rejects_degenerate_sizes() {
		assert!(matches!(
			Viewport::new(0.0, 0.0, 1.0),
			Err(StarfieldError::DegenerateViewport { .. })
		));
		assert!(Viewport::new(-10.0, 300.0, 1.0).is_err());
		assert!(Viewport::new(100.0, 100.0, 0.0).is_err());
		assert!(Viewport::new(f64::NAN, 100.0, 1.0).is_err());
		assert!(Viewport::new(0.2, 0.2, 1.0).is_err());
	}

	#[test]
	fn polar_round_trip_through_center() {
		let vp = Viewport::new(800.0, 600.0, 1.0).unwrap();
		let (rho, theta) = vp.to_polar(700.0, 100.0);
		let (x, y) = vp.to_screen(rho, theta);
		assert!((x - 700.0).abs() < 1e-9 && (y - 100.0).abs() < 1e-9);
	}

	#[test]
	fn density_floor() {
		assert_eq!(normalize_density(0.5), 1.0);
		assert_eq!(normalize_density(2.0), 2.0);
		assert_eq!(normalize_density(f64::NAN), 1.0);
	}
}
