//! Canvas rendering for the particle field.
//!
//! Each frame runs in a fixed order:
//! 1. Clear and paint the backdrop gradient
//! 2. Advance particles
//! 3. Connection lines between nearby particles
//! 4. Glowing particle dots on top
//!
//! Drawing goes through [`Painter`] so the frame can be replayed against a
//! recorder off the browser.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::particles::ParticleField;
use super::surface::Surface;
use super::theme::{BackdropStyle, Color};

/// The drawing operations a frame needs. Coordinates are logical units.
pub trait Painter {
	/// Erase `width` x `height` from the origin.
	fn clear(&self, width: f64, height: f64);
	/// Fill the whole surface with the backdrop gradient.
	fn backdrop(&self, surface: &Surface, style: &BackdropStyle);
	/// Stroke a straight line.
	fn line(&self, from: (f64, f64), to: (f64, f64), color: Color, width: f64);
	/// Fill a circle at `alpha` with a shadow glow of the same color. Global
	/// alpha and shadow are reset afterwards.
	fn glow_dot(&self, x: f64, y: f64, radius: f64, color: Color, alpha: f64, blur: f64);
}

impl Painter for CanvasRenderingContext2d {
	fn clear(&self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn backdrop(&self, surface: &Surface, style: &BackdropStyle) {
		let (w, h) = (surface.width, surface.height);
		let Ok(gradient) = self.create_radial_gradient(
			w * style.inner_center.0,
			h * style.inner_center.1,
			style.inner_radius,
			w * style.outer_center.0,
			h * style.outer_center.1,
			w.max(h),
		) else {
			return;
		};
		for (offset, color) in &style.stops {
			let _ = gradient.add_color_stop(*offset as f32, &color.to_css());
		}

		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		self.fill_rect(0.0, 0.0, w, h);
	}

	fn line(&self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}

	fn glow_dot(&self, x: f64, y: f64, radius: f64, color: Color, alpha: f64, blur: f64) {
		let css = color.to_css();
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, TAU);
		self.close_path();
		self.set_fill_style_str(&css);
		self.set_global_alpha(alpha);
		self.set_shadow_blur(blur);
		self.set_shadow_color(&css);
		self.fill();
		self.set_global_alpha(1.0);
		self.set_shadow_blur(0.0);
	}
}

/// Runs one complete frame: clear, backdrop, advance by `step`, lines, dots.
pub fn advance_and_draw<P: Painter + ?Sized>(field: &mut ParticleField, painter: &P, step: f64) {
	let surface = field.surface();
	painter.clear(surface.width, surface.height);
	painter.backdrop(&surface, &field.theme().backdrop);

	field.advance(step);

	draw_links(field, painter);
	draw_particles(field, painter);
}

fn draw_links<P: Painter + ?Sized>(field: &ParticleField, painter: &P) {
	let config = field.config();
	for link in field.links() {
		painter.line(
			link.from,
			link.to,
			config.link_color.with_alpha(link.alpha),
			config.link_width,
		);
	}
}

fn draw_particles<P: Painter + ?Sized>(field: &ParticleField, painter: &P) {
	let blur = field.config().glow_blur;
	for p in field.particles() {
		painter.glow_dot(p.x, p.y, p.size, p.color, p.alpha, blur);
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::components::particle_field::config::FieldConfig;
	use crate::components::particle_field::theme::ThemeMode;

	#[derive(Debug, PartialEq)]
	enum Op {
		Clear(f64, f64),
		Backdrop(f64),
		Line(Color, f64),
		Dot(f64, f64, Color, f64, f64),
	}

	#[derive(Default)]
	struct Recorder(RefCell<Vec<Op>>);

	impl Painter for Recorder {
		fn clear(&self, width: f64, height: f64) {
			self.0.borrow_mut().push(Op::Clear(width, height));
		}

		fn backdrop(&self, _surface: &Surface, style: &BackdropStyle) {
			self.0.borrow_mut().push(Op::Backdrop(style.stops[0].1.a));
		}

		fn line(&self, _from: (f64, f64), _to: (f64, f64), color: Color, width: f64) {
			self.0.borrow_mut().push(Op::Line(color, width));
		}

		fn glow_dot(&self, x: f64, y: f64, _radius: f64, color: Color, alpha: f64, blur: f64) {
			self.0.borrow_mut().push(Op::Dot(x, y, color, alpha, blur));
		}
	}

	fn field_sized(mode: ThemeMode, width: f64, height: f64) -> ParticleField {
		ParticleField::new(
			FieldConfig::default(),
			Surface::from_viewport(width, height, Some(1.0), 2.0),
			mode,
			StdRng::seed_from_u64(11),
		)
	}

	fn field(mode: ThemeMode) -> ParticleField {
		field_sized(mode, 1024.0, 768.0)
	}

	fn rank(op: &Op) -> u8 {
		match op {
			Op::Clear(..) => 0,
			Op::Backdrop(_) => 1,
			Op::Line(..) => 2,
			Op::Dot(..) => 3,
		}
	}

	#[test]
	fn frame_draws_in_fixed_order() {
		let mut f = field(ThemeMode::Light);
		let painter = Recorder::default();
		advance_and_draw(&mut f, &painter, 1.0);
		let ops = painter.0.into_inner();
		assert_eq!(ops[0], Op::Clear(1024.0, 768.0));
		assert_eq!(ops[1], Op::Backdrop(0.08));
		assert!(ops.windows(2).all(|w| rank(&w[0]) <= rank(&w[1])));
		let dots = ops.iter().filter(|op| matches!(op, Op::Dot(..))).count();
		assert_eq!(dots, 130);
	}

	#[test]
	fn dots_use_advanced_positions() {
		let mut f = field(ThemeMode::Dark);
		let expected: Vec<_> = f
			.particles()
			.iter()
			.map(|p| (p.x + p.vx, p.y + p.vy, p.color, p.alpha))
			.collect();
		let painter = Recorder::default();
		advance_and_draw(&mut f, &painter, 1.0);
		let dots: Vec<_> = painter
			.0
			.into_inner()
			.into_iter()
			.filter_map(|op| match op {
				Op::Dot(x, y, c, a, blur) => {
					assert_eq!(blur, 10.0);
					Some((x, y, c, a))
				}
				_ => None,
			})
			.collect();
		assert_eq!(dots, expected);
	}

	#[test]
	fn dark_backdrop_and_link_color() {
		let mut f = field_sized(ThemeMode::Dark, 100_000.0, 768.0);
		for (i, p) in f.particles_mut().iter_mut().enumerate() {
			(p.x, p.y, p.vx, p.vy) = (i as f64 * 500.0, 0.0, 0.0, 0.0);
		}
		f.particles_mut()[1].x = 30.0;
		let painter = Recorder::default();
		advance_and_draw(&mut f, &painter, 1.0);
		let ops = painter.0.into_inner();
		assert_eq!(ops[1], Op::Backdrop(0.06));
		let lines: Vec<_> = ops
			.iter()
			.filter_map(|op| match op {
				Op::Line(c, w) => Some((*c, *w)),
				_ => None,
			})
			.collect();
		assert_eq!(lines.len(), 1);
		let (color, width) = lines[0];
		assert_eq!((color.r, color.g, color.b), (180, 124, 255));
		assert!((color.a - 0.75 * 0.35).abs() < 1e-12);
		assert_eq!(width, 1.0);
	}

	#[test]
	fn zero_step_keeps_positions() {
		let mut f = field(ThemeMode::Light);
		let before = f.particles().to_vec();
		advance_and_draw(&mut f, &Recorder::default(), 0.0);
		assert_eq!(before, f.particles());
	}
}
