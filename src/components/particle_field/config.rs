//! Tunable parameters for the particle field.
//!
//! Every numeric policy of the field lives here so it can be read in one place
//! and overridden from the page without rebuilding. Defaults reproduce the
//! portfolio background exactly.
//!
//! # Overrides
//!
//! The host page may embed a JSON object in a
//! `<script id="particle-field-config" type="application/json">` element.
//! Missing keys keep their defaults:
//!
//! ```json
//! { "wide_count": 90, "link_distance": 100, "max_speed": 1.5 }
//! ```

use serde::Deserialize;

use super::theme::Color;

/// Complete configuration for the particle field.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	/// Viewport width (logical px) below which the narrow count is used.
	pub narrow_breakpoint: f64,
	/// Particle count on narrow viewports.
	pub narrow_count: usize,
	/// Particle count on everything else.
	pub wide_count: usize,
	/// Distance beyond each surface edge a particle travels before wrapping.
	pub edge_padding: f64,
	/// Pairs closer than this are joined by a line.
	pub link_distance: f64,
	/// Line opacity at zero distance.
	pub link_opacity: f64,
	/// Line color. Its alpha is replaced per line.
	pub link_color: Color,
	/// Line width in logical px.
	pub link_width: f64,
	/// Shadow blur around each dot.
	pub glow_blur: f64,
	/// Lower bound of the initial speed, in logical px per step.
	pub speed_min: f64,
	/// Upper bound of the speed range.
	pub speed_max: f64,
	/// Lower bound of the dot radius.
	pub size_min: f64,
	/// Upper bound of the radius range.
	pub size_max: f64,
	/// Lower bound of the dot opacity.
	pub alpha_min: f64,
	/// Upper bound of the opacity range.
	pub alpha_max: f64,
	/// Velocity added per unit of normalized pointer offset.
	pub pointer_nudge: f64,
	/// Upper bound for the device pixel ratio.
	pub max_dpr: f64,
	/// Quiet period before a resize is applied.
	pub resize_debounce_ms: u32,
	/// Minimum spacing between applied pointer moves.
	pub pointer_throttle_ms: u32,
	/// Hard cap on particle speed after a pointer nudge. `None`, or a value
	/// that is not a positive number, lets nudges accumulate without bound.
	pub max_speed: Option<f64>,
	/// Scale each step by elapsed frame time instead of one step per callback.
	pub frame_compensation: bool,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			narrow_breakpoint: 768.0,
			narrow_count: 70,
			wide_count: 130,
			edge_padding: 50.0,
			link_distance: 120.0,
			link_opacity: 0.35,
			link_color: Color::rgb(180, 124, 255),
			link_width: 1.0,
			glow_blur: 10.0,
			speed_min: 0.2,
			speed_max: 0.8,
			size_min: 0.5,
			size_max: 2.5,
			alpha_min: 0.2,
			alpha_max: 0.9,
			pointer_nudge: 0.02,
			max_dpr: 2.0,
			resize_debounce_ms: 200,
			pointer_throttle_ms: 50,
			max_speed: None,
			frame_compensation: false,
		}
	}
}

impl FieldConfig {
	/// Parse overrides from JSON, keeping defaults for anything not given.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	/// Number of particles for a viewport of the given logical width.
	pub fn particle_count(&self, viewport_width: f64) -> usize {
		if viewport_width < self.narrow_breakpoint {
			self.narrow_count
		} else {
			self.wide_count
		}
	}

	/// The effective speed cap. Only positive finite values cap anything.
	pub fn speed_cap(&self) -> Option<f64> {
		self.max_speed.filter(|m| m.is_finite() && *m > 0.0)
	}

	/// Opacity of the line joining two particles `distance` apart, or `None`
	/// when they are too far apart to be joined.
	pub fn link_alpha(&self, distance: f64) -> Option<f64> {
		if distance < self.link_distance {
			Some((1.0 - distance / self.link_distance) * self.link_opacity)
		} else {
			None
		}
	}
}
