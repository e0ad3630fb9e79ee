//! Rate limiting and frame pacing for host events.
//!
//! Both work on millisecond timestamps supplied by the caller
//! (`Event.timeStamp` or the animation frame time), so they hold no timers.

/// Leading-edge throttle: the first call in each window passes, the rest of
/// that window is dropped.
#[derive(Clone, Debug)]
pub struct Throttle {
	window_ms: f64,
	last: Option<f64>,
}

impl Throttle {
	/// A throttle admitting one call per `window_ms`.
	pub fn new(window_ms: u32) -> Self {
		Self {
			window_ms: window_ms as f64,
			last: None,
		}
	}

	/// Returns `true` when a call at `now` may run, and records it.
	pub fn admit(&mut self, now: f64) -> bool {
		match self.last {
			Some(last) if now - last < self.window_ms => false,
			_ => {
				self.last = Some(now);
				true
			}
		}
	}
}

/// Length of one frame at the nominal 60 Hz refresh.
pub const NOMINAL_FRAME_MS: f64 = 1000.0 / 60.0;

/// Velocity multiplier for a frame at `now_ms` given the previous frame time.
///
/// The first frame counts as one nominal step. Long stalls (a backgrounded
/// tab) are clamped to four steps so particles do not jump across the surface.
pub fn frame_step(previous_ms: Option<f64>, now_ms: f64) -> f64 {
	match previous_ms {
		Some(prev) => ((now_ms - prev) / NOMINAL_FRAME_MS).clamp(0.0, 4.0),
		None => 1.0,
	}
}
