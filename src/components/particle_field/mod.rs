//! Animated particle background.
//!
//! Renders a decorative field of drifting particles on an HTML canvas with:
//! - A fixed population sized from the initial viewport width
//! - Edge wrapping with a padded border
//! - Proximity lines between nearby particles
//! - Glowing dots recolored whenever the page theme flips
//! - A subtle parallax nudge from mouse movement
//!
//! # Example
//!
//! ```ignore
//! use particle_field::{FieldConfig, ParticleFieldCanvas, ThemeMode};
//!
//! let (theme, set_theme) = signal(ThemeMode::Dark);
//! view! { <ParticleFieldCanvas theme=theme config=FieldConfig::default() /> }
//! ```
//!
//! Hosts that are not Leptos apps can drive [`ParticleRenderer`] directly, or
//! step a [`ParticleField`] themselves against any [`Painter`].

mod component;
pub mod config;
pub mod particles;
pub mod render;
mod renderer;
pub mod surface;
pub mod theme;
pub mod timing;

pub use component::ParticleFieldCanvas;
pub use config::FieldConfig;
pub use particles::{Link, Particle, ParticleField};
pub use render::{Painter, advance_and_draw};
pub use renderer::{ParticleRenderer, SurfaceError};
pub use surface::Surface;
pub use theme::{Color, Theme, ThemeMode};
