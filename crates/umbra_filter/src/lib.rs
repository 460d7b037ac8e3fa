//! Umbra Color Transform Engine
//!
//! Deterministic, cached HSL remapping for the Umbra dark-mode engine:
//!
//! - **Role transforms**: background, foreground, border, and a uniform
//!   light-mode curve, each a hand-tuned piecewise-linear lightness remap
//!   with a near-neutral snap
//! - **Memoization**: one cache keyed by (role, RGBA, filter parameters);
//!   identical inputs always yield the identical string
//! - **Filter pass**: brightness / contrast / grayscale / sepia applied as a
//!   composed color matrix after the role transform
//!
//! # Example
//!
//! ```rust
//! use umbra_color::Rgba;
//! use umbra_filter::{ColorEngine, FilterConfig};
//!
//! let mut engine = ColorEngine::new();
//! let filter = FilterConfig {
//!     mode: 1,
//!     brightness: 100,
//!     contrast: 100,
//!     grayscale: 0,
//!     sepia: 0,
//! };
//!
//! let dark = engine.modify_background_color(Rgba::rgb(255, 255, 255), &filter);
//! assert_eq!(dark, engine.modify_background_color(Rgba::rgb(255, 255, 255), &filter));
//! ```

pub mod config;
pub mod engine;
mod transforms;

pub use config::FilterConfig;
pub use engine::{ColorEngine, TransformRole};
