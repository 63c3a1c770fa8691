//! Leptos component hosting the star field canvas.
//!
//! The component fills the window with a canvas, keeps its backing store sized
//! to physical pixels, and drives the controller from `requestAnimationFrame`.
//! Window resizes are applied in full (metrics and a fresh population) between
//! frames. Teardown or a failed draw stops the loop.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlElement, Window};

use super::clock::PerformanceClock;
use super::config::StarfieldConfig;
use super::error::{Result, StarfieldError};
use super::render::{self, Surface, opaque_context};
use super::state::StarfieldState;

type Callback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Renders the rotating star field as a full-window background canvas.
#[component]
pub fn StarfieldCanvas(
	#[prop(default = StarfieldConfig::default())] config: StarfieldConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let alive = Arc::new(AtomicBool::new(true));
	let animate: Callback = Rc::new(RefCell::new(None));
	let resize_cb: Callback = Rc::new(RefCell::new(None));
	let alive_init = alive.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if animate.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		if let Err(e) = start(
			canvas,
			config.clone(),
			alive_init.clone(),
			animate.clone(),
			resize_cb.clone(),
		) {
			error!("starfield: failed to start: {e}");
		}
	});

	on_cleanup(move || alive.store(false, Ordering::Relaxed));

	view! {
		<canvas
			node_ref=canvas_ref
			class="starfield-canvas"
			style="position: fixed; inset: 0; display: block; z-index: -1; pointer-events: none;"
		/>
	}
}

/// Sets up the controller, the resize listener, and the frame loop.
///
/// Fails before anything is scheduled if the host cannot provide a surface.
fn start(
	canvas: HtmlCanvasElement,
	config: StarfieldConfig,
	alive: Arc<AtomicBool>,
	animate: Callback,
	resize_cb: Callback,
) -> Result<()> {
	let window = web_sys::window()
		.ok_or_else(|| StarfieldError::SurfaceUnavailable("no window".into()))?;
	let mut ctx = opaque_context(&canvas)?;
	let clock = PerformanceClock::from_window(&window)?;
	let seed = config.seed.unwrap_or_else(entropy_seed);

	let state = Rc::new(RefCell::new(StarfieldState::seeded(config, seed)?));
	fit_to_window(&window, &canvas, &ctx, &mut state.borrow_mut())?;
	info!("starfield: started (seed {seed})");

	let (state_resize, canvas_resize, ctx_resize) = (state.clone(), canvas.clone(), ctx.clone());
	*resize_cb.borrow_mut() = Some(Closure::new(move || {
		let Some(win) = web_sys::window() else {
			return;
		};
		if let Err(e) =
			fit_to_window(&win, &canvas_resize, &ctx_resize, &mut state_resize.borrow_mut())
		{
			warn!("starfield: resize ignored: {e}");
		}
	}));
	if let Some(ref cb) = *resize_cb.borrow() {
		window
			.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
			.map_err(|e| {
				StarfieldError::SurfaceUnavailable(format!("resize listener: {e:?}"))
			})?;
	}

	let animate_inner = animate.clone();
	*animate.borrow_mut() = Some(Closure::new(move || {
		let keep_running = {
			let mut s = state.borrow_mut();
			if !alive.load(Ordering::Relaxed) {
				s.stop();
				false
			} else {
				s.frame(&clock);
				match render::render(&*s, &mut ctx) {
					Ok(()) => true,
					Err(e) => {
						error!("starfield: {e}");
						s.stop();
						false
					}
				}
			}
		};

		let scheduled = keep_running
			&& animate_inner.borrow().as_ref().is_some_and(|cb| {
				web_sys::window()
					.is_some_and(|w| w.request_animation_frame(cb.as_ref().unchecked_ref()).is_ok())
			});
		if keep_running && !scheduled {
			error!("starfield: could not schedule next frame");
			state.borrow_mut().stop();
		}
		if !scheduled {
			detach_resize(&resize_cb);
			// Breaks the self-reference so the controller is freed. wasm-bindgen
			// defers releasing a closure that is still executing until it returns.
			drop(animate_inner.borrow_mut().take());
		}
	}));
	if let Some(ref cb) = *animate.borrow() {
		window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.map_err(|e| StarfieldError::SurfaceUnavailable(format!("requestAnimationFrame: {e:?}")))?;
	}
	Ok(())
}

/// Applies the current window size and density, then matches the canvas to the
/// new viewport. A rejected size leaves canvas and state untouched.
fn fit_to_window(
	window: &Window,
	canvas: &HtmlCanvasElement,
	surface: &impl Surface,
	state: &mut StarfieldState,
) -> Result<()> {
	let dimension = |v: std::result::Result<JsValue, JsValue>| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
	};
	let (w, h) = (dimension(window.inner_width()), dimension(window.inner_height()));
	state.resize(w, h, surface.pixel_density())?;

	if let Some(vp) = state.viewport() {
		canvas.set_width(vp.width as u32);
		canvas.set_height(vp.height as u32);
		// `leptos::prelude` shadows `style()` with its attribute setter.
		let style = HtmlElement::style(canvas);
		let _ = style.set_property("width", &format!("{}px", vp.logical_width));
		let _ = style.set_property("height", &format!("{}px", vp.logical_height));
	}
	Ok(())
}

fn detach_resize(resize_cb: &Callback) {
	if let Some(cb) = resize_cb.borrow_mut().take() {
		if let Some(win) = web_sys::window() {
			let _ = win.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	}
}

fn entropy_seed() -> u64 {
	let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
	let lo = js_sys::Date::now() as u64;
	(hi << 32) ^ lo
}
