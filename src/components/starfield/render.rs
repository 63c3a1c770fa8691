//! Per-frame drawing of the star field.
//!
//! Each frame fully overwrites the surface with the background color, then
//! draws every star as a filled disc in generation order (background stars
//! first, cluster on top).

use std::f64::consts::PI;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::config::Color;
use super::error::{Result, StarfieldError};
use super::state::StarfieldState;
use super::viewport::normalize_density;

/// The immediate-mode drawing surface the star field draws on.
pub trait Surface {
	/// Current backing-store size in physical pixels.
	fn dimensions(&self) -> (f64, f64);
	/// Physical pixels per logical pixel, floored at 1.
	fn pixel_density(&self) -> f64;
	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) -> Result<()>;
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) -> Result<()>;
}

impl Surface for CanvasRenderingContext2d {
	fn dimensions(&self) -> (f64, f64) {
		self.canvas()
			.map(|c| (c.width() as f64, c.height() as f64))
			.unwrap_or((0.0, 0.0))
	}

	fn pixel_density(&self) -> f64 {
		web_sys::window()
			.map(|w| normalize_density(w.device_pixel_ratio()))
			.unwrap_or(1.0)
	}

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) -> Result<()> {
		self.set_fill_style_str(&color.to_css());
		CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
		Ok(())
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) -> Result<()> {
		self.begin_path();
		self.arc(x, y, radius, 0.0, PI * 2.0).map_err(render_error)?;
		self.set_fill_style_str(&color.to_css());
		self.fill();
		Ok(())
	}
}

fn render_error(err: JsValue) -> StarfieldError {
	StarfieldError::Render(format!("{err:?}"))
}

/// Acquires an opaque 2D context for `canvas`.
pub fn opaque_context(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
	let unavailable = |what: &str| StarfieldError::SurfaceUnavailable(what.to_string());

	let options = js_sys::Object::new();
	js_sys::Reflect::set(&options, &"alpha".into(), &JsValue::FALSE)
		.map_err(|_| unavailable("could not build context options"))?;

	canvas
		.get_context_with_context_options("2d", &options)
		.map_err(|e| unavailable(&format!("getContext failed: {e:?}")))?
		.ok_or_else(|| unavailable("2d context not supported"))?
		.dyn_into::<CanvasRenderingContext2d>()
		.map_err(|_| unavailable("context is not a CanvasRenderingContext2d"))
}

/// Draws one frame of `state` onto `surface`.
///
/// Uses the frame time recorded by the last tick for every star.
pub fn render<R, S: Surface + ?Sized>(state: &StarfieldState<R>, surface: &mut S) -> Result<()> {
	let Some(vp) = state.viewport() else {
		return Ok(());
	};
	let config = &state.config;
	let time = state.time();

	// Cover the whole backing store even if it has not caught up with the viewport yet.
	let (width, height) = surface.dimensions();
	surface.fill_rect(
		0.0,
		0.0,
		width.max(vp.width),
		height.max(vp.height),
		config.background.with_alpha(1.0),
	)?;

	for star in state.stars() {
		let (x, y) = vp.to_screen(star.rho, star.theta);
		let alpha = star.alpha(config.twinkle_frequency, time);
		surface.fill_circle(x, y, star.radius, config.star_color.with_alpha(alpha))?;
	}
	Ok(())
}
