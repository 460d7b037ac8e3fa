//! Hand-tuned HSL role transforms
//!
//! Each transform is a piecewise-linear lightness remap plus a near-neutral
//! snap: once saturation drops below the role's threshold, hue and saturation
//! jump to a fixed low-chroma anchor so grayscale input cannot pick up a
//! color cast from hue noise.

use umbra_color::Hsla;

/// Linear domain → range mapping, clamped to the domain
fn scale(value: f32, domain_min: f32, domain_max: f32, range_min: f32, range_max: f32) -> f32 {
    let d = domain_max - domain_min;
    if d.abs() < 1e-12 {
        return range_min;
    }
    let t = ((value - domain_min) / d).clamp(0.0, 1.0);
    range_min + t * (range_max - range_min)
}

/// Dark backgrounds: dark input is kept, bright input is inverted into a
/// narrow dark band (brighter in, darker out).
pub(crate) fn background_hsl(color: Hsla) -> Hsla {
    const NEUTRAL_THRESHOLD: f32 = 0.12;
    const NEUTRAL_HUE: f32 = 205.0;
    const NEUTRAL_SATURATION: f32 = 0.12;

    let (h, s) = if color.s < NEUTRAL_THRESHOLD {
        (NEUTRAL_HUE, NEUTRAL_SATURATION)
    } else {
        (color.h, color.s)
    };
    let l = if color.l < 0.5 {
        color.l
    } else {
        scale(color.l, 0.5, 1.0, 0.4, 0.1)
    };
    Hsla::new(h, s, l, color.a)
}

/// Light foregrounds: light input is kept, dark input is inverted into a
/// bright band (darker in, brighter out).
pub(crate) fn foreground_hsl(color: Hsla) -> Hsla {
    const NEUTRAL_THRESHOLD: f32 = 0.24;
    const NEUTRAL_HUE: f32 = 40.0;
    const NEUTRAL_SATURATION: f32 = 0.16;

    let (h, s) = if color.s < NEUTRAL_THRESHOLD {
        (NEUTRAL_HUE, NEUTRAL_SATURATION)
    } else {
        (color.h, color.s)
    };
    let l = if color.l > 0.5 {
        color.l
    } else {
        scale(color.l, 0.0, 0.5, 0.9, 0.6)
    };
    Hsla::new(h, s, l, color.a)
}

/// Borders sit between the remapped background and foreground bands.
pub(crate) fn border_hsl(color: Hsla) -> Hsla {
    const NEUTRAL_THRESHOLD: f32 = 0.12;
    const NEUTRAL_HUE: f32 = 210.0;
    const NEUTRAL_SATURATION: f32 = 0.1;

    let (h, s) = if color.s < NEUTRAL_THRESHOLD {
        (NEUTRAL_HUE, NEUTRAL_SATURATION)
    } else {
        (color.h, color.s)
    };
    let l = if color.l < 0.5 {
        scale(color.l, 0.0, 0.5, 0.5, 0.35)
    } else {
        scale(color.l, 0.5, 1.0, 0.35, 0.2)
    };
    Hsla::new(h, s, l, color.a)
}

/// Light-mode uniform curve: extremes are pulled slightly inward, everything
/// else passes through. Applied to all roles when the filter mode is 0.
pub(crate) fn light_mode_hsl(color: Hsla) -> Hsla {
    const NEUTRAL_THRESHOLD: f32 = 0.12;
    const NEUTRAL_HUE: f32 = 36.0;
    const NEUTRAL_SATURATION: f32 = 0.08;

    let (h, s) = if color.s < NEUTRAL_THRESHOLD {
        (NEUTRAL_HUE, NEUTRAL_SATURATION)
    } else {
        (color.h, color.s)
    };
    let l = if color.l < 0.5 {
        scale(color.l, 0.0, 0.5, 0.06, 0.5)
    } else {
        scale(color.l, 0.5, 1.0, 0.5, 0.98)
    };
    Hsla::new(h, s, l, color.a)
}
