//! Animated star field background.
//!
//! Renders a dense scatter of point-lights on an HTML canvas, rotating rigidly
//! about the viewport center with a subtle per-star twinkle, plus one fixed
//! cluster that reads as a stable constellation:
//! - Stars are stored in polar form around the center, so only their angle
//!   changes over time and resizes never stretch the field
//! - Rotation integrates measured wall-clock time, independent of frame rate
//! - A resize recomputes the viewport and regenerates the whole population
//! - Generation takes an injectable random source and time an injectable clock
//!
//! # Example
//!
//! ```ignore
//! use starfield::{StarfieldCanvas, StarfieldConfig};
//!
//! let config = StarfieldConfig { star_count: 800, ..Default::default() };
//! view! { <StarfieldCanvas config=config /> }
//! ```

pub mod clock;
mod component;
pub mod config;
mod error;
pub mod render;
pub mod scheduler;
pub mod state;
pub mod stars;
pub mod viewport;

pub use clock::{Clock, ManualClock, PerformanceClock};
pub use component::StarfieldCanvas;
pub use config::{ClusterAnchor, ClusterStar, Color, StarfieldConfig};
pub use error::{Result, StarfieldError};
pub use render::{Surface, render};
pub use state::{Phase, StarfieldState};
pub use stars::{Star, StarField};
pub use viewport::Viewport;
