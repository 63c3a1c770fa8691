//! Error types for the star field.

/// Failures surfaced by configuration, sizing, and the drawing surface.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum StarfieldError {
	/// The host could not provide a usable 2D drawing surface.
	#[error("drawing surface unavailable: {0}")]
	SurfaceUnavailable(String),

	/// A configuration value is out of range.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	/// The requested viewport has no drawable area.
	#[error("degenerate viewport {width}x{height} at density {density}")]
	DegenerateViewport {
		width: f64,
		height: f64,
		density: f64,
	},

	/// The surface rejected a draw call mid-run.
	#[error("rendering failed: {0}")]
	Render(String),
}

/// Result alias used throughout the star field.
pub type Result<T> = std::result::Result<T, StarfieldError>;
