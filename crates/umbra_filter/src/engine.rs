//! Memoizing color engine
//!
//! One engine instance owns the memo cache for all four transform roles. The
//! cache is append-only between explicit clears and every cached value is the
//! output of a pure function of its key, so a hit is always bit-identical to
//! a recompute.

use rustc_hash::FxHashMap;
use umbra_color::{format_color, hsl_to_rgb, rgb_to_hsl, ColorMatrix, Rgba};

use crate::config::FilterConfig;
use crate::transforms;

/// Which remapping curve a color goes through.
///
/// An explicit tag rather than a function reference, so the cache key stays
/// portable and hashable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransformRole {
    Background,
    Foreground,
    Border,
    LightMode,
}

impl TransformRole {
    fn apply(self, color: umbra_color::Hsla) -> umbra_color::Hsla {
        match self {
            TransformRole::Background => transforms::background_hsl(color),
            TransformRole::Foreground => transforms::foreground_hsl(color),
            TransformRole::Border => transforms::border_hsl(color),
            TransformRole::LightMode => transforms::light_mode_hsl(color),
        }
    }
}

/// Serialized input key: role tag plus every input that affects the output.
/// Alpha is stored as raw bits so equal floats key identically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    role: TransformRole,
    r: u8,
    g: u8,
    b: u8,
    alpha_bits: u32,
    filter: FilterConfig,
}

impl CacheKey {
    fn new(role: TransformRole, color: Rgba, filter: &FilterConfig) -> Self {
        Self {
            role,
            r: color.r,
            g: color.g,
            b: color.b,
            alpha_bits: color.a.to_bits(),
            filter: *filter,
        }
    }
}

/// The color transform engine with its memo cache.
#[derive(Default)]
pub struct ColorEngine {
    cache: FxHashMap<CacheKey, String>,
    misses: u64,
}

impl ColorEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remap a background color.
    pub fn modify_background_color(&mut self, color: Rgba, filter: &FilterConfig) -> String {
        self.modify(TransformRole::Background, color, filter)
    }

    /// Remap a foreground (text) color.
    pub fn modify_foreground_color(&mut self, color: Rgba, filter: &FilterConfig) -> String {
        self.modify(TransformRole::Foreground, color, filter)
    }

    /// Remap a border color.
    pub fn modify_border_color(&mut self, color: Rgba, filter: &FilterConfig) -> String {
        self.modify(TransformRole::Border, color, filter)
    }

    /// Shadows follow the background curve.
    pub fn modify_shadow_color(&mut self, color: Rgba, filter: &FilterConfig) -> String {
        self.modify_background_color(color, filter)
    }

    /// Gradient stops follow the background curve.
    pub fn modify_gradient_color(&mut self, color: Rgba, filter: &FilterConfig) -> String {
        self.modify_background_color(color, filter)
    }

    /// Drop every memoized entry for every transform.
    pub fn clear_cache(&mut self) {
        tracing::debug!(entries = self.cache.len(), "clearing color cache");
        self.cache.clear();
    }

    /// Number of memoized entries across all roles.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Number of cache misses (full recomputations) so far.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    fn modify(&mut self, role: TransformRole, color: Rgba, filter: &FilterConfig) -> String {
        // Light mode bypasses the role-specific transform for every entry
        // point; folding the role here also unifies the cache entries.
        let role = if filter.mode == 0 {
            TransformRole::LightMode
        } else {
            role
        };

        let key = CacheKey::new(role, color, filter);
        if let Some(hit) = self.cache.get(&key) {
            return hit.clone();
        }
        self.misses += 1;
        tracing::trace!(?role, ?color, "color cache miss");

        let remapped = hsl_to_rgb(role.apply(rgb_to_hsl(color)));
        let filtered = match filter_matrix(filter) {
            Some(matrix) => matrix.apply(remapped),
            None => remapped,
        };
        let formatted = format_color(filtered);
        self.cache.insert(key, formatted.clone());
        formatted
    }
}

/// Compose the generic matrix pass; `None` when the configuration is identity.
fn filter_matrix(filter: &FilterConfig) -> Option<ColorMatrix> {
    if filter.is_matrix_identity() {
        return None;
    }
    let mut matrix = ColorMatrix::identity();
    if filter.brightness != 100 {
        matrix = matrix.multiply(&ColorMatrix::brightness(filter.brightness as f32 / 100.0));
    }
    if filter.contrast != 100 {
        matrix = matrix.multiply(&ColorMatrix::contrast(filter.contrast as f32 / 100.0));
    }
    if filter.grayscale != 0 {
        matrix = matrix.multiply(&ColorMatrix::grayscale(filter.grayscale as f32 / 100.0));
    }
    if filter.sepia != 0 {
        matrix = matrix.multiply(&ColorMatrix::sepia(filter.sepia as f32 / 100.0));
    }
    Some(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DARK: FilterConfig = FilterConfig {
        mode: 1,
        brightness: 100,
        contrast: 100,
        grayscale: 0,
        sepia: 0,
    };

    #[test]
    fn identical_inputs_share_one_cache_entry() {
        let mut engine = ColorEngine::new();
        let color = Rgba::rgb(10, 10, 10);

        let first = engine.modify_background_color(color, &DARK);
        assert_eq!(engine.cache_len(), 1);
        let second = engine.modify_background_color(color, &DARK);
        assert_eq!(first, second);
        assert_eq!(engine.cache_len(), 1);
        assert_eq!(engine.misses(), 1);
    }

    #[test]
    fn roles_cache_independently() {
        let mut engine = ColorEngine::new();
        let color = Rgba::rgb(10, 10, 10);
        engine.modify_background_color(color, &DARK);
        engine.modify_foreground_color(color, &DARK);
        assert_eq!(engine.cache_len(), 2);
    }

    #[test]
    fn aliases_share_the_background_entry() {
        let mut engine = ColorEngine::new();
        let color = Rgba::rgb(77, 50, 50);
        let bg = engine.modify_background_color(color, &DARK);
        assert_eq!(engine.modify_shadow_color(color, &DARK), bg);
        assert_eq!(engine.modify_gradient_color(color, &DARK), bg);
        assert_eq!(engine.cache_len(), 1);
    }

    #[test]
    fn clear_cache_forces_recompute() {
        let mut engine = ColorEngine::new();
        let color = Rgba::rgb(10, 10, 10);
        engine.modify_background_color(color, &DARK);
        assert_eq!(engine.misses(), 1);

        engine.clear_cache();
        assert_eq!(engine.cache_len(), 0);
        engine.modify_background_color(color, &DARK);
        assert_eq!(engine.misses(), 2);
    }
}
