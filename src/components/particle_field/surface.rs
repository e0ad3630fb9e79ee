//! Drawing surface geometry.
//!
//! The field works in logical (CSS pixel) units. The canvas backing store is
//! sized in device pixels and a `dpr` transform maps one onto the other.

/// Logical size of the drawing surface plus its device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
	/// Logical width (CSS px).
	pub width: f64,
	/// Logical height (CSS px).
	pub height: f64,
	/// Device pixel ratio, already capped.
	pub dpr: f64,
}

impl Surface {
	/// Build a surface from raw viewport values.
	///
	/// A missing or non-positive ratio counts as 1. Dimensions are clamped to
	/// at least one logical pixel so the center is never zero.
	pub fn from_viewport(width: f64, height: f64, raw_dpr: Option<f64>, max_dpr: f64) -> Self {
		let dpr = raw_dpr
			.filter(|d| d.is_finite() && *d > 0.0)
			.unwrap_or(1.0)
			.min(max_dpr);
		Self {
			width: sanitize(width),
			height: sanitize(height),
			dpr,
		}
	}

	/// Backing store width in device pixels.
	pub fn device_width(&self) -> u32 {
		(self.width * self.dpr).floor() as u32
	}

	/// Backing store height in device pixels.
	pub fn device_height(&self) -> u32 {
		(self.height * self.dpr).floor() as u32
	}

	/// Center point in logical units.
	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}

	/// Pointer offset from the center, normalized so the surface edges map to ±1.
	pub fn normalized_offset(&self, x: f64, y: f64) -> (f64, f64) {
		let (cx, cy) = self.center();
		((x - cx) / cx, (y - cy) / cy)
	}
}

fn sanitize(dim: f64) -> f64 {
	if dim.is_finite() { dim.max(1.0) } else { 1.0 }
}
