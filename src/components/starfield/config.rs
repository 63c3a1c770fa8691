//! Star field configuration: counts, radii, twinkle, rotation speed, colors, and
//! the fixed cluster shape.
//!
//! Every field has a default and can be overridden independently from JSON.

use serde::Deserialize;

use super::error::{Result, StarfieldError};

/// Upper bound on `star_count`; keeps the population allocation and per-frame
/// draw pass bounded on every target, wasm32 included.
pub const MAX_STAR_COUNT: i64 = 200_000;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const BLACK: Color = Color::rgb(0, 0, 0);
	pub const WHITE: Color = Color::rgb(255, 255, 255);

	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses a CSS color string.
	/// Supports hex (`#RGB`, `#RRGGBB`) and `rgb()`/`rgba()` functional notation.
	pub fn parse(color_str: &str) -> Result<Self> {
		let s = color_str.trim();
		let invalid = || StarfieldError::InvalidConfig(format!("unrecognized color {color_str:?}"));

		if let Some(hex) = s.strip_prefix('#') {
			if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
				return Err(invalid());
			}
			let channel = |h: &str| u8::from_str_radix(h, 16).map_err(|_| invalid());
			return match hex.len() {
				3 => {
					let (r, g, b) = (channel(&hex[0..1])?, channel(&hex[1..2])?, channel(&hex[2..3])?);
					Ok(Color::rgb(r * 17, g * 17, b * 17))
				}
				6 => Ok(Color::rgb(
					channel(&hex[0..2])?,
					channel(&hex[2..4])?,
					channel(&hex[4..6])?,
				)),
				_ => Err(invalid()),
			};
		}

		let (inner, components) = if let Some(rest) = s.strip_prefix("rgba(") {
			(rest, 4)
		} else if let Some(rest) = s.strip_prefix("rgb(") {
			(rest, 3)
		} else {
			return Err(invalid());
		};
		let inner = inner.strip_suffix(')').ok_or_else(invalid)?;
		let nums: Vec<&str> = inner.split(',').map(str::trim).collect();
		if nums.len() != components {
			return Err(invalid());
		}
		let channel = |i: usize| {
			let digits = nums[i];
			if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
				return Err(invalid());
			}
			digits.parse::<u8>().map_err(|_| invalid())
		};
		let a = match nums.get(3) {
			Some(a) => a.parse::<f64>().map_err(|_| invalid())?,
			None => 1.0,
		};
		if !(0.0..=1.0).contains(&a) {
			return Err(invalid());
		}
		Ok(Color::rgba(channel(0)?, channel(1)?, channel(2)?, a))
	}
}

impl TryFrom<String> for Color {
	type Error = StarfieldError;

	fn try_from(value: String) -> Result<Self> {
		Color::parse(&value)
	}
}

/// One member of the fixed cluster, offset from the cluster anchor in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct ClusterStar {
	pub dx: f64,
	pub dy: f64,
	/// Draw radius before density scaling.
	pub r: f64,
}

impl ClusterStar {
	pub const fn new(dx: f64, dy: f64, r: f64) -> Self {
		Self { dx, dy, r }
	}
}

/// Cluster anchor, as a fraction of the physical viewport size measured from the center.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct ClusterAnchor {
	pub x: f64,
	pub y: f64,
}

/// A loose Pleiades-like arrangement.
pub fn pleiades() -> Vec<ClusterStar> {
	vec![
		ClusterStar::new(0.0, 0.0, 1.2),
		ClusterStar::new(-18.0, 10.0, 0.9),
		ClusterStar::new(16.0, -8.0, 0.9),
		ClusterStar::new(-26.0, -14.0, 0.8),
		ClusterStar::new(10.0, 18.0, 0.9),
		ClusterStar::new(28.0, 6.0, 0.8),
		ClusterStar::new(-8.0, -26.0, 0.9),
	]
}

/// Complete star field configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
	/// Number of randomly scattered background stars.
	pub star_count: i64,
	/// Minimum star draw radius in logical pixels.
	pub min_radius: f64,
	/// Maximum star draw radius in logical pixels.
	pub max_radius: f64,
	/// Twinkle amplitude applied to background stars (scaled per star by 0.6..1.4).
	pub twinkle_amplitude: f64,
	/// Shared twinkle angular frequency in radians per second.
	pub twinkle_frequency: f64,
	/// Base rotation rate in degrees per hour.
	pub rotation_deg_per_hour: f64,
	/// Visual acceleration applied on top of the base rotation rate.
	pub speed_multiplier: f64,
	pub background: Color,
	pub star_color: Color,
	pub cluster_anchor: ClusterAnchor,
	pub cluster: Vec<ClusterStar>,
	/// Resting brightness of every cluster member.
	pub cluster_alpha: f64,
	/// Fraction of `twinkle_amplitude` used for cluster members.
	pub cluster_twinkle_scale: f64,
	/// Fixed random seed. When unset the host picks one at startup.
	pub seed: Option<u64>,
}

impl Default for StarfieldConfig {
	fn default() -> Self {
		Self {
			star_count: 2200,
			min_radius: 0.2,
			max_radius: 0.6,
			twinkle_amplitude: 0.05,
			twinkle_frequency: 0.05,
			rotation_deg_per_hour: 15.0,
			speed_multiplier: 4.0,
			background: Color::BLACK,
			star_color: Color::WHITE,
			cluster_anchor: ClusterAnchor { x: 0.20, y: -0.18 },
			cluster: pleiades(),
			cluster_alpha: 0.95,
			cluster_twinkle_scale: 0.3,
			seed: None,
		}
	}
}

impl StarfieldConfig {
	/// Parses JSON overrides on top of the defaults, then validates.
	pub fn from_json(json: &str) -> Result<Self> {
		let config: Self = serde_json::from_str(json)
			.map_err(|e| StarfieldError::InvalidConfig(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}

	/// Rejects values the generator and scheduler cannot work with.
	pub fn validate(&self) -> Result<()> {
		let fail = |msg: String| Err(StarfieldError::InvalidConfig(msg));

		if self.star_count <= 0 {
			return fail(format!("star_count must be positive, got {}", self.star_count));
		}
		if self.star_count > MAX_STAR_COUNT {
			return fail(format!(
				"star_count must not exceed {MAX_STAR_COUNT}, got {}",
				self.star_count
			));
		}
		if !(self.min_radius.is_finite() && self.min_radius > 0.0) {
			return fail(format!("min_radius must be positive, got {}", self.min_radius));
		}
		if !(self.max_radius.is_finite() && self.max_radius > 0.0) {
			return fail(format!("max_radius must be positive, got {}", self.max_radius));
		}
		if self.min_radius > self.max_radius {
			return fail(format!(
				"min_radius {} exceeds max_radius {}",
				self.min_radius, self.max_radius
			));
		}
		if !(self.twinkle_amplitude.is_finite() && self.twinkle_amplitude >= 0.0) {
			return fail(format!(
				"twinkle_amplitude must be non-negative, got {}",
				self.twinkle_amplitude
			));
		}
		for (name, value) in [
			("twinkle_frequency", self.twinkle_frequency),
			("rotation_deg_per_hour", self.rotation_deg_per_hour),
			("speed_multiplier", self.speed_multiplier),
			("cluster_anchor.x", self.cluster_anchor.x),
			("cluster_anchor.y", self.cluster_anchor.y),
			("cluster_twinkle_scale", self.cluster_twinkle_scale),
		] {
			if !value.is_finite() {
				return fail(format!("{name} must be finite, got {value}"));
			}
		}
		if !(0.0..=1.0).contains(&self.cluster_alpha) {
			return fail(format!("cluster_alpha must be within 0..=1, got {}", self.cluster_alpha));
		}
		for (i, s) in self.cluster.iter().enumerate() {
			if !(s.dx.is_finite() && s.dy.is_finite()) {
				return fail(format!("cluster[{i}] offset must be finite"));
			}
			if !(s.r.is_finite() && s.r > 0.0) {
				return fail(format!("cluster[{i}] radius must be positive, got {}", s.r));
			}
		}
		Ok(())
	}

	/// Base rotation rate converted to radians per second.
	pub fn base_angular_speed(&self) -> f64 {
		self.rotation_deg_per_hour.to_radians() / 3600.0
	}

	/// Effective rotation rate in radians per second, multiplier included.
	pub fn angular_rate(&self) -> f64 {
		self.base_angular_speed() * self.speed_multiplier
	}
}
