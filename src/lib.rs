//! starfield: rotating, twinkling star-field background for the web.
//!
//! This crate provides a WASM canvas component that renders a procedurally
//! generated star field slowly turning about the viewport center.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::starfield::{
	Clock, ManualClock, StarField, StarfieldCanvas, StarfieldConfig, StarfieldError,
	StarfieldState, Surface, Viewport,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("starfield: logging initialized");
}

/// Load configuration overrides from a script element with id="starfield-config".
/// Expected format: a JSON object with any subset of the `StarfieldConfig` fields.
fn load_config() -> Option<StarfieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("starfield-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match StarfieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!("starfield: loaded config ({} stars)", config.star_count);
			Some(config)
		}
		Err(e) => {
			warn!("starfield: ignoring config, using defaults: {}", e);
			None
		}
	}
}

/// Main application component.
/// Reads optional configuration from the DOM and mounts the star field.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Night Sky" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<StarfieldCanvas config=config />
	}
}
