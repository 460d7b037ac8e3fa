//! Umbra Color Primitives
//!
//! Shared color plumbing for the Umbra dark-mode engine:
//!
//! - **Color types**: [`Rgba`] (8-bit channels, fractional alpha) and
//!   [`Hsla`] (degrees / fractions)
//! - **Conversion**: [`rgb_to_hsl`] / [`hsl_to_rgb`]
//! - **Color matrices**: brightness, contrast, grayscale and sepia as
//!   composable 5x5 matrices
//! - **Formatting**: CSS color strings (hex for opaque colors, `rgba()`
//!   otherwise)

pub mod color;
pub mod matrix;

pub use color::{format_color, hsl_to_rgb, rgb_to_hsl, Hsla, Rgba};
pub use matrix::ColorMatrix;
