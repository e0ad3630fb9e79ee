//! Particle simulation for the animated background.
//!
//! A fixed population of particles drifts across the surface, wrapping at a
//! padded border. Pointer movement nudges every velocity, and a theme change
//! recolors every particle in place.

use std::f64::consts::TAU;

use rand::Rng;
use rand::rngs::StdRng;

use super::config::FieldConfig;
use super::surface::Surface;
use super::theme::{Color, Theme, ThemeMode};

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position in logical units.
	pub x: f64,
	/// Vertical position in logical units.
	pub y: f64,
	/// Horizontal velocity per step.
	pub vx: f64,
	/// Vertical velocity per step.
	pub vy: f64,
	/// Dot radius.
	pub size: f64,
	/// Fill and glow color, from the active palette.
	pub color: Color,
	/// Dot opacity.
	pub alpha: f64,
}

impl Particle {
	/// Magnitude of the velocity.
	pub fn speed(&self) -> f64 {
		self.vx.hypot(self.vy)
	}
}

/// A line to draw between two nearby particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	/// Start point.
	pub from: (f64, f64),
	/// End point.
	pub to: (f64, f64),
	/// Line opacity, already scaled by distance.
	pub alpha: f64,
}

/// Owns the particle population and everything needed to advance it.
///
/// The population is created once in [`ParticleField::new`]; its length never
/// changes afterwards.
pub struct ParticleField {
	particles: Vec<Particle>,
	surface: Surface,
	theme: Theme,
	config: FieldConfig,
	rng: StdRng,
}

impl ParticleField {
	/// Populate a field for `surface`. The count is chosen from the surface width.
	pub fn new(config: FieldConfig, surface: Surface, mode: ThemeMode, rng: StdRng) -> Self {
		let count = config.particle_count(surface.width);
		let mut field = Self {
			particles: Vec::with_capacity(count),
			surface,
			theme: Theme::for_mode(mode),
			config,
			rng,
		};
		for _ in 0..count {
			let particle = field.create_particle();
			field.particles.push(particle);
		}
		field
	}

	fn create_particle(&mut self) -> Particle {
		let c = &self.config;
		let speed = sample_range(&mut self.rng, c.speed_min, c.speed_max);
		let angle = self.rng.gen_range(0.0..TAU);
		let size = sample_range(&mut self.rng, c.size_min, c.size_max);
		let alpha = sample_range(&mut self.rng, c.alpha_min, c.alpha_max);
		Particle {
			x: self.rng.r#gen::<f64>() * self.surface.width,
			y: self.rng.r#gen::<f64>() * self.surface.height,
			vx: angle.cos() * speed,
			vy: angle.sin() * speed,
			size,
			color: self.theme.palette.sample(&mut self.rng),
			alpha,
		}
	}

	/// The population in creation order.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Mutable access to individual particles. The population size is fixed.
	pub fn particles_mut(&mut self) -> &mut [Particle] {
		&mut self.particles
	}

	/// Number of particles.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// Whether the population is empty (a zero count was configured).
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Current logical surface.
	pub fn surface(&self) -> Surface {
		self.surface
	}

	/// Active theme.
	pub fn theme(&self) -> &Theme {
		&self.theme
	}

	/// Configuration the field was built with.
	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	/// Move every particle by its velocity, then wrap it into the padded bounds.
	///
	/// `step` scales the velocity; `1.0` is one step per frame callback.
	pub fn advance(&mut self, step: f64) {
		let pad = self.config.edge_padding;
		let (w, h) = (self.surface.width, self.surface.height);
		for p in &mut self.particles {
			p.x = wrap(p.x + p.vx * step, w, pad);
			p.y = wrap(p.y + p.vy * step, h, pad);
		}
	}

	/// Every pair closer than the link distance, with its line opacity.
	pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
		let particles = &self.particles;
		particles.iter().enumerate().flat_map(move |(i, a)| {
			particles[i + 1..].iter().filter_map(move |b| {
				let distance = (a.x - b.x).hypot(a.y - b.y);
				self.config.link_alpha(distance).map(|alpha| Link {
					from: (a.x, a.y),
					to: (b.x, b.y),
					alpha,
				})
			})
		})
	}

	/// Shift every velocity toward the pointer's offset from the surface center.
	pub fn nudge(&mut self, pointer_x: f64, pointer_y: f64) {
		let (dx, dy) = self.surface.normalized_offset(pointer_x, pointer_y);
		if dx == 0.0 && dy == 0.0 {
			return;
		}
		let (ax, ay) = (dx * self.config.pointer_nudge, dy * self.config.pointer_nudge);
		let cap = self.config.speed_cap();
		for p in &mut self.particles {
			p.vx += ax;
			p.vy += ay;
			if let Some(max) = cap {
				let speed = p.speed();
				if speed > max && speed > 0.0 {
					let k = max / speed;
					p.vx *= k;
					p.vy *= k;
				}
			}
		}
	}

	/// Adopt a new surface size. Particles keep their coordinates and are
	/// pulled back inside by the next [`advance`](Self::advance).
	pub fn resize(&mut self, surface: Surface) {
		self.surface = surface;
	}

	/// Switch theme and recolor every particle from the new palette.
	pub fn set_theme(&mut self, mode: ThemeMode) {
		self.theme = Theme::for_mode(mode);
		for p in &mut self.particles {
			p.color = self.theme.palette.sample(&mut self.rng);
		}
	}
}

/// Wrap one coordinate into `[-pad, dim + pad]`.
pub fn wrap(v: f64, dim: f64, pad: f64) -> f64 {
	if v < -pad {
		dim + pad
	} else if v > dim + pad {
		-pad
	} else {
		v
	}
}

fn sample_range(rng: &mut StdRng, min: f64, max: f64) -> f64 {
	if max > min { rng.gen_range(min..max) } else { min }
}
