//! Property-based invariant tests for the particle field.
//!
//! 1. Every particle stays inside the padded surface after any sequence of
//!    steps, pointer nudges and resizes.
//! 2. Population size depends only on the initial width and never changes.
//! 3. Theme changes recolor every particle from the active palette.
//! 4. Link opacity falls monotonically with distance and vanishes at the
//!    link distance.

use particle_field::components::particle_field::theme::{BackdropStyle, Palette};
use particle_field::components::particle_field::{
	Color, FieldConfig, Painter, ParticleField, Surface, ThemeMode, advance_and_draw,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

// ── Helpers ─────────────────────────────────────────────────────────────

struct NullPainter;

impl Painter for NullPainter {
	fn clear(&self, _: f64, _: f64) {}
	fn backdrop(&self, _: &Surface, _: &BackdropStyle) {}
	fn line(&self, _: (f64, f64), _: (f64, f64), _: Color, _: f64) {}
	fn glow_dot(&self, _: f64, _: f64, _: f64, _: Color, _: f64, _: f64) {}
}

fn field(width: f64, height: f64, mode: ThemeMode, seed: u64) -> ParticleField {
	ParticleField::new(
		FieldConfig::default(),
		Surface::from_viewport(width, height, Some(1.0), 2.0),
		mode,
		StdRng::seed_from_u64(seed),
	)
}

fn in_bounds(f: &ParticleField) -> bool {
	let s = f.surface();
	f.particles().iter().all(|p| {
		(-50.0..=s.width + 50.0).contains(&p.x) && (-50.0..=s.height + 50.0).contains(&p.y)
	})
}

#[derive(Clone, Debug)]
enum Action {
	Step,
	Pointer(f64, f64),
	Resize(f64, f64),
	Theme(ThemeMode),
}

fn action_strategy() -> impl Strategy<Value = Action> {
	prop_oneof![
		4 => Just(Action::Step),
		2 => (-500.0f64..3000.0, -500.0f64..3000.0).prop_map(|(x, y)| Action::Pointer(x, y)),
		1 => (1.0f64..2560.0, 1.0f64..1600.0).prop_map(|(w, h)| Action::Resize(w, h)),
		1 => prop_oneof![Just(ThemeMode::Light), Just(ThemeMode::Dark)].prop_map(Action::Theme),
	]
}

// ═════════════════════════════════════════════════════════════════════════
// 1 + 2. Wrap invariant and fixed population
// ═════════════════════════════════════════════════════════════════════════

proptest! {
	#[test]
	fn positions_stay_in_padded_bounds(
		width in 200.0f64..2560.0,
		height in 200.0f64..1600.0,
		seed in any::<u64>(),
		actions in prop::collection::vec(action_strategy(), 1..60),
	) {
		let mut f = field(width, height, ThemeMode::Light, seed);
		let expected = if width < 768.0 { 70 } else { 130 };
		prop_assert_eq!(f.len(), expected);

		for action in actions {
			match action {
				Action::Step => {
					advance_and_draw(&mut f, &NullPainter, 1.0);
					prop_assert!(in_bounds(&f), "particle escaped after step");
				}
				Action::Pointer(x, y) => f.nudge(x, y),
				Action::Resize(w, h) => f.resize(Surface::from_viewport(w, h, Some(1.0), 2.0)),
				Action::Theme(mode) => f.set_theme(mode),
			}
			prop_assert_eq!(f.len(), expected);
		}

		f.advance(1.0);
		prop_assert!(in_bounds(&f));
	}
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Theme recolors every particle
// ═════════════════════════════════════════════════════════════════════════

proptest! {
	#[test]
	fn theme_change_uses_active_palette(
		seed in any::<u64>(),
		modes in prop::collection::vec(prop_oneof![Just(ThemeMode::Light), Just(ThemeMode::Dark)], 1..10),
	) {
		let mut f = field(1280.0, 800.0, ThemeMode::Light, seed);
		for mode in modes {
			f.set_theme(mode);
			let palette = match mode {
				ThemeMode::Light => Palette::light(),
				ThemeMode::Dark => Palette::dark(),
			};
			prop_assert!(f.particles().iter().all(|p| palette.contains(&p.color)));
		}
	}
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Link opacity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
	#[test]
	fn link_alpha_monotonic(a in 0.0f64..200.0, b in 0.0f64..200.0) {
		let config = FieldConfig::default();
		let (near, far) = if a <= b { (a, b) } else { (b, a) };
		let alpha_near = config.link_alpha(near).unwrap_or(0.0);
		let alpha_far = config.link_alpha(far).unwrap_or(0.0);
		prop_assert!(alpha_near >= alpha_far);
		if far >= 120.0 {
			prop_assert!(config.link_alpha(far).is_none());
		} else {
			prop_assert!(alpha_far > 0.0);
		}
	}
}

// ── Scenarios ───────────────────────────────────────────────────────────

#[test]
fn untouched_field_keeps_initial_positions() {
	let mut f = field(1024.0, 768.0, ThemeMode::Light, 99);
	let positions = |f: &ParticleField| -> Vec<(f64, f64)> {
		f.particles().iter().map(|p| (p.x, p.y)).collect()
	};
	let initial = positions(&f);
	assert!(
		initial
			.iter()
			.all(|&(x, y)| (0.0..1024.0).contains(&x) && (0.0..768.0).contains(&y))
	);

	// Everything except a step leaves positions alone.
	f.set_theme(ThemeMode::Dark);
	f.nudge(0.0, 0.0);
	f.resize(Surface::from_viewport(640.0, 480.0, Some(1.0), 2.0));
	let _ = f.links().count();
	assert_eq!(positions(&f), initial);
}

#[test]
fn desktop_viewport_single_frame() {
	let mut f = field(1024.0, 768.0, ThemeMode::Light, 5);
	assert_eq!(f.len(), 130);
	let initial = f.particles().to_vec();
	advance_and_draw(&mut f, &NullPainter, 1.0);
	for (before, after) in initial.iter().zip(f.particles()) {
		assert_eq!(after.x, before.x + before.vx);
		assert_eq!(after.y, before.y + before.vy);
	}
	assert!(in_bounds(&f));
}

#[test]
fn mobile_viewport_gets_fewer_particles() {
	let mut f = field(390.0, 844.0, ThemeMode::Dark, 5);
	assert_eq!(f.len(), 70);
	f.resize(Surface::from_viewport(1440.0, 900.0, Some(2.0), 2.0));
	advance_and_draw(&mut f, &NullPainter, 1.0);
	assert_eq!(f.len(), 70);
}

#[test]
fn pointer_at_center_changes_nothing() {
	let mut f = field(1024.0, 768.0, ThemeMode::Light, 8);
	let before = f.particles().to_vec();
	f.nudge(512.0, 384.0);
	assert_eq!(before, f.particles());
}
