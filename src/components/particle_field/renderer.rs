//! Browser lifecycle for the particle field.
//!
//! [`ParticleRenderer`] binds a [`ParticleField`] to a canvas, drives it from
//! `requestAnimationFrame`, and listens to window resize and mouse movement.
//! Every browser handle it holds is an RAII value, so [`ParticleRenderer::stop`]
//! (or dropping the renderer) cancels the next frame, any pending resize, and
//! detaches both listeners.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{AnimationFrame, request_animation_frame};
use gloo::timers::callback::Timeout;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::config::FieldConfig;
use super::particles::ParticleField;
use super::render;
use super::surface::Surface;
use super::theme::ThemeMode;
use super::timing::{Throttle, frame_step};

/// Why a renderer could not bind to its surface.
///
/// None of these are user-facing; the page simply has no animated background.
#[derive(Debug, Error)]
pub enum SurfaceError {
	/// Not running in a browser window.
	#[error("no browser window")]
	NoWindow,
	/// The canvas element was not mounted.
	#[error("canvas element is missing")]
	MissingCanvas,
	/// `getContext("2d")` failed or returned null.
	#[error("canvas has no 2d context")]
	NoContext,
}

/// Shared state reachable from the frame loop and event handlers.
struct RendererInner {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	field: RefCell<ParticleField>,
	throttle: RefCell<Throttle>,
	resize_quiet_ms: u32,
	max_dpr: f64,
	frame_compensation: bool,
	running: Cell<bool>,
	last_frame_ms: Cell<Option<f64>>,
	frame: RefCell<Option<AnimationFrame>>,
	resize_timeout: RefCell<Option<Timeout>>,
	listeners: RefCell<Vec<EventListener>>,
}

/// An animated particle background bound to one canvas.
///
/// Created by [`ParticleRenderer::start`]; runs until [`stop`](Self::stop)
/// is called or the value is dropped.
pub struct ParticleRenderer {
	inner: Rc<RendererInner>,
}

impl ParticleRenderer {
	/// Bind to `canvas`, populate the field and start the frame loop.
	///
	/// Fails without side effects when there is no window, no canvas, or the
	/// canvas refuses a 2d context.
	pub fn start(
		canvas: Option<HtmlCanvasElement>,
		mode: ThemeMode,
		config: FieldConfig,
	) -> Result<Self, SurfaceError> {
		let window = web_sys::window().ok_or(SurfaceError::NoWindow)?;
		let canvas = canvas.ok_or(SurfaceError::MissingCanvas)?;
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into().ok())
			.ok_or(SurfaceError::NoContext)?;

		let surface = viewport_surface(&window, config.max_dpr);
		let inner = Rc::new(RendererInner {
			canvas,
			ctx,
			throttle: RefCell::new(Throttle::new(config.pointer_throttle_ms)),
			resize_quiet_ms: config.resize_debounce_ms,
			max_dpr: config.max_dpr,
			frame_compensation: config.frame_compensation,
			field: RefCell::new(ParticleField::new(
				config,
				surface,
				mode,
				StdRng::from_entropy(),
			)),
			running: Cell::new(true),
			last_frame_ms: Cell::new(None),
			frame: RefCell::new(None),
			resize_timeout: RefCell::new(None),
			listeners: RefCell::new(Vec::new()),
		});

		inner.apply_surface(surface);
		inner.install_listeners(&window);
		inner.schedule_frame();

		info!(
			"particle-field: started {} particles on {}x{} @{}x, theme {}",
			inner.field.borrow().len(),
			surface.width,
			surface.height,
			surface.dpr,
			mode.as_str()
		);

		Ok(Self { inner })
	}

	/// Switch palettes and recolor every particle.
	pub fn set_theme(&self, mode: ThemeMode) {
		self.inner.field.borrow_mut().set_theme(mode);
		debug!("particle-field: theme set to {}", mode.as_str());
	}

	/// Cancel the pending frame and resize, and detach listeners. Idempotent.
	pub fn stop(&self) {
		if !self.inner.running.replace(false) {
			return;
		}
		self.inner.frame.borrow_mut().take();
		self.inner.resize_timeout.borrow_mut().take();
		self.inner.listeners.borrow_mut().clear();
		info!("particle-field: stopped");
	}

	/// Size of the particle population.
	pub fn particle_count(&self) -> usize {
		self.inner.field.borrow().len()
	}
}

impl Drop for ParticleRenderer {
	fn drop(&mut self) {
		self.stop();
	}
}

impl RendererInner {
	fn schedule_frame(self: &Rc<Self>) {
		if !self.running.get() {
			return;
		}
		let inner = Rc::clone(self);
		let handle = request_animation_frame(move |timestamp| {
			inner.frame.borrow_mut().take();
			inner.on_frame(timestamp);
		});
		*self.frame.borrow_mut() = Some(handle);
	}

	fn on_frame(self: &Rc<Self>, timestamp: f64) {
		if !self.running.get() {
			return;
		}
		let step = if self.frame_compensation {
			frame_step(self.last_frame_ms.replace(Some(timestamp)), timestamp)
		} else {
			1.0
		};
		render::advance_and_draw(&mut *self.field.borrow_mut(), &self.ctx, step);
		self.schedule_frame();
	}

	fn install_listeners(self: &Rc<Self>, window: &Window) {
		let mut listeners = Vec::with_capacity(2);

		let inner = Rc::clone(self);
		listeners.push(EventListener::new(window, "resize", move |_event| {
			inner.queue_resize();
		}));

		let inner = Rc::clone(self);
		listeners.push(EventListener::new(window, "mousemove", move |event| {
			let Some(event) = event.dyn_ref::<MouseEvent>() else {
				return;
			};
			if !inner.throttle.borrow_mut().admit(event.time_stamp()) {
				return;
			}
			inner
				.field
				.borrow_mut()
				.nudge(event.client_x() as f64, event.client_y() as f64);
		}));

		*self.listeners.borrow_mut() = listeners;
	}

	/// Arm the trailing resize timeout. Dropping the previous `Timeout`
	/// clears it, so only the last resize in a burst is applied.
	fn queue_resize(self: &Rc<Self>) {
		let inner = Rc::clone(self);
		let timeout = Timeout::new(self.resize_quiet_ms, move || {
			inner.on_resize();
		});
		*self.resize_timeout.borrow_mut() = Some(timeout);
	}

	fn on_resize(&self) {
		if !self.running.get() {
			return;
		}
		let Some(window) = web_sys::window() else {
			return;
		};
		let surface = viewport_surface(&window, self.max_dpr);
		self.apply_surface(surface);
		self.field.borrow_mut().resize(surface);
		debug!(
			"particle-field: resized to {}x{} @{}x",
			surface.width, surface.height, surface.dpr
		);
	}

	/// Size the backing store in device pixels, the element in CSS pixels, and
	/// map logical units onto device pixels.
	fn apply_surface(&self, surface: Surface) {
		self.canvas.set_width(surface.device_width());
		self.canvas.set_height(surface.device_height());
		let style = self.canvas.style();
		let _ = style.set_property("width", &format!("{}px", surface.width));
		let _ = style.set_property("height", &format!("{}px", surface.height));
		let _ = self
			.ctx
			.set_transform(surface.dpr, 0.0, 0.0, surface.dpr, 0.0, 0.0);
	}
}

fn viewport_surface(window: &Window, max_dpr: f64) -> Surface {
	let width = window
		.inner_width()
		.ok()
		.and_then(|v| v.as_f64())
		.unwrap_or(1.0);
	let height = window
		.inner_height()
		.ok()
		.and_then(|v| v.as_f64())
		.unwrap_or(1.0);
	Surface::from_viewport(width, height, Some(window.device_pixel_ratio()), max_dpr)
}
