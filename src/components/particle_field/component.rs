//! Leptos component wrapping the particle field canvas.
//!
//! The component renders a fixed, full-viewport canvas behind the page and
//! starts a [`ParticleRenderer`] on it once mounted. Theme changes flow in
//! through a signal. The renderer is held in a local stored value and taken
//! out in `on_cleanup`, which stops its frame loop and detaches its listeners.

use leptos::prelude::*;
use log::debug;
use web_sys::HtmlCanvasElement;

use super::config::FieldConfig;
use super::renderer::ParticleRenderer;
use super::theme::ThemeMode;

/// Animated particle background.
///
/// `theme` is owned by the host page; the component only follows it.
#[component]
pub fn ParticleFieldCanvas(
	#[prop(into)] theme: Signal<ThemeMode>,
	#[prop(optional)] config: FieldConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let renderer = StoredValue::new_local(None::<ParticleRenderer>);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if renderer.with_value(Option::is_some) {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		match ParticleRenderer::start(Some(canvas), theme.get_untracked(), config.clone()) {
			Ok(started) => {
				debug!(
					"particle-field: background active with {} particles",
					started.particle_count()
				);
				renderer.set_value(Some(started));
			}
			Err(e) => debug!("particle-field: background inactive: {}", e),
		}
	});

	Effect::new(move |prev: Option<ThemeMode>| {
		let mode = theme.get();
		if prev.is_some_and(|p| p != mode) {
			renderer.with_value(|r| {
				if let Some(r) = r {
					r.set_theme(mode);
				}
			});
		}
		mode
	});

	on_cleanup(move || {
		renderer.try_update_value(|r| {
			if let Some(r) = r.take() {
				r.stop();
			}
		});
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			aria-hidden="true"
			style="position: fixed; inset: 0; z-index: -1; display: block; pointer-events: none;"
		/>
	}
}
