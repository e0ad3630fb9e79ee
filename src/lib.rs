//! particle-field: animated particle background for a static portfolio page.
//!
//! This crate provides a WASM canvas component that fills the viewport behind
//! the page with drifting, linked particles. The host page owns the light/dark
//! theme; the background follows the `data-theme` attribute on `<html>`.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlScriptElement, MutationObserver, MutationObserverInit, Window};

// Only needed for its `js` feature, which gives `rand` an entropy source on wasm32.
use getrandom as _;

pub mod components;

pub use components::particle_field::{
	FieldConfig, ParticleField, ParticleFieldCanvas, ParticleRenderer, ThemeMode,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Load field overrides from a script element with id="particle-field-config".
/// Falls back to defaults when the element is absent or its JSON is invalid.
pub fn load_field_config() -> FieldConfig {
	let Some(json_text) = config_script_text() else {
		return FieldConfig::default();
	};

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!("particle-field: loaded config overrides");
			config
		}
		Err(e) => {
			warn!("particle-field: failed to parse config: {}", e);
			FieldConfig::default()
		}
	}
}

fn config_script_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-field-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// The theme currently published on `<html data-theme>`.
pub fn current_theme() -> ThemeMode {
	let attr = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.document_element())
		.and_then(|root| root.get_attribute("data-theme"));
	ThemeMode::from_attribute(attr.as_deref())
}

/// Observes `<html>` attribute changes and reports the theme after each one.
/// Disconnects when dropped.
pub struct ThemeWatcher {
	observer: MutationObserver,
	_callback: Closure<dyn FnMut(js_sys::Array, MutationObserver)>,
}

impl Drop for ThemeWatcher {
	fn drop(&mut self) {
		self.observer.disconnect();
	}
}

/// Call `on_change` whenever the host page flips `data-theme`.
pub fn watch_theme(on_change: impl Fn(ThemeMode) + 'static) -> Option<ThemeWatcher> {
	let root = web_sys::window()?.document()?.document_element()?;
	let target = root.clone();
	let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
		move |_records: js_sys::Array, _observer: MutationObserver| {
			let attr = target.get_attribute("data-theme");
			on_change(ThemeMode::from_attribute(attr.as_deref()));
		},
	);
	let observer = MutationObserver::new(callback.as_ref().unchecked_ref()).ok()?;
	let init = MutationObserverInit::new();
	init.set_attributes(true);
	observer.observe_with_options(&root, &init).ok()?;

	Some(ThemeWatcher {
		observer,
		_callback: callback,
	})
}

/// Main application component.
/// Follows the page theme and renders the particle background.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let (theme, set_theme) = signal(current_theme());
	let watcher = watch_theme(move |mode| {
		if theme.get_untracked() != mode {
			set_theme.set(mode);
		}
	});
	if watcher.is_none() {
		warn!("particle-field: theme changes will not be followed");
	}
	// Keeps the observer connected for as long as the app is mounted.
	let _watcher = StoredValue::new_local(watcher);

	let config = load_field_config();

	view! {
		<Meta name="color-scheme" content="light dark" />
		<ParticleFieldCanvas theme=theme config=config />
	}
}
