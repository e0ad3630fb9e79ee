//! Visual theming for the particle field.
//!
//! Provides the light/dark mode flag, particle palettes and the backdrop
//! gradient for each mode.

use rand::Rng;
use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `0.0..=1.0`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS color string: hex when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			self.to_css_rgb()
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Hex form, ignoring opacity.
	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

const VIOLET: Color = Color::rgb(0x7c, 0x4d, 0xff);
const CYAN: Color = Color::rgb(0x00, 0xe5, 0xff);
const ORANGE: Color = Color::rgb(0xff, 0x98, 0x00);
const LIGHT_VIOLET: Color = Color::rgb(0xb4, 0x7c, 0xff);

/// Light or dark page theme, as published by the host page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
	/// Default when the page publishes nothing.
	#[default]
	Light,
	/// `data-theme="dark"`.
	Dark,
}

impl ThemeMode {
	/// Parse the value of a `data-theme` attribute. Anything but `"dark"` is light.
	pub fn from_attribute(value: Option<&str>) -> Self {
		match value.map(str::trim) {
			Some(v) if v.eq_ignore_ascii_case("dark") => ThemeMode::Dark,
			_ => ThemeMode::Light,
		}
	}

	/// Attribute value for this mode.
	pub fn as_str(self) -> &'static str {
		match self {
			ThemeMode::Light => "light",
			ThemeMode::Dark => "dark",
		}
	}
}

/// A small fixed set of particle colors. Sampling is uniform.
#[derive(Clone, Debug)]
pub struct Palette {
	/// Palette entries; never empty.
	pub colors: Vec<Color>,
}

impl Palette {
	/// Violet, cyan and orange.
	pub fn light() -> Self {
		Self {
			colors: vec![VIOLET, CYAN, ORANGE],
		}
	}

	/// Cyan, violet and light violet.
	pub fn dark() -> Self {
		Self {
			colors: vec![CYAN, VIOLET, LIGHT_VIOLET],
		}
	}

	/// Pick one color uniformly at random.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
		self.colors[rng.gen_range(0..self.colors.len())]
	}

	/// Whether `color` is one of the palette entries.
	pub fn contains(&self, color: &Color) -> bool {
		self.colors.contains(color)
	}
}

/// Soft radial gradient painted behind the particles.
///
/// Focal circles are expressed as fractions of the surface size; the outer
/// radius is the larger surface dimension.
#[derive(Clone, Debug)]
pub struct BackdropStyle {
	/// Inner circle center as (fraction of width, fraction of height).
	pub inner_center: (f64, f64),
	/// Inner circle radius in logical units.
	pub inner_radius: f64,
	/// Outer circle center as (fraction of width, fraction of height).
	pub outer_center: (f64, f64),
	/// Gradient stops as (offset, color).
	pub stops: [(f64, Color); 3],
}

/// Complete visual theme for one mode.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Mode this theme was built for.
	pub mode: ThemeMode,
	/// Colors new and recolored particles are drawn from.
	pub palette: Palette,
	/// Gradient painted before the particles.
	pub backdrop: BackdropStyle,
}

impl Theme {
	/// Violet and cyan backdrop fading to transparent white.
	pub fn light() -> Self {
		Self {
			mode: ThemeMode::Light,
			palette: Palette::light(),
			backdrop: BackdropStyle {
				inner_center: (0.3, 0.2),
				inner_radius: 100.0,
				outer_center: (0.7, 0.8),
				stops: [
					(0.0, VIOLET.with_alpha(0.08)),
					(0.5, CYAN.with_alpha(0.06)),
					(1.0, Color::rgba(255, 255, 255, 0.0)),
				],
			},
		}
	}

	/// Same layout as light, with lower-alpha stops fading to black.
	pub fn dark() -> Self {
		Self {
			mode: ThemeMode::Dark,
			palette: Palette::dark(),
			backdrop: BackdropStyle {
				inner_center: (0.3, 0.2),
				inner_radius: 100.0,
				outer_center: (0.7, 0.8),
				stops: [
					(0.0, VIOLET.with_alpha(0.06)),
					(0.5, CYAN.with_alpha(0.05)),
					(1.0, Color::rgba(0, 0, 0, 0.0)),
				],
			},
		}
	}

	/// Theme preset for `mode`.
	pub fn for_mode(mode: ThemeMode) -> Self {
		match mode {
			ThemeMode::Light => Self::light(),
			ThemeMode::Dark => Self::dark(),
		}
	}
}
