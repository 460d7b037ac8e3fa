//! Color types and colorspace conversion

/// RGBA color with 8-bit channels and a fractional alpha (0.0 to 1.0)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba {
        r: 255,
        g: 255,
        b: 255,
        a: 1.0,
    };
    pub const BLACK: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 1.0,
    };

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Whether the color is fully opaque
    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }
}

/// HSLA color: hue in degrees (0-360), saturation/lightness/alpha as fractions
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Hsla {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: f32,
}

impl Hsla {
    pub const fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self { h, s, l, a }
    }
}

/// Convert an RGBA color to HSLA
pub fn rgb_to_hsl(color: Rgba) -> Hsla {
    let r = color.r as f32 / 255.0;
    let g = color.g as f32 / 255.0;
    let b = color.b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let c = max - min;
    let l = (max + min) / 2.0;

    if c == 0.0 {
        return Hsla::new(0.0, 0.0, l, color.a);
    }

    let h = if max == r {
        ((g - b) / c).rem_euclid(6.0)
    } else if max == g {
        (b - r) / c + 2.0
    } else {
        (r - g) / c + 4.0
    } * 60.0;

    let s = c / (1.0 - (2.0 * l - 1.0).abs());

    Hsla::new(h, s, l, color.a)
}

/// Convert an HSLA color back to RGBA
pub fn hsl_to_rgb(color: Hsla) -> Rgba {
    let h = color.h.rem_euclid(360.0);
    let s = color.s.clamp(0.0, 1.0);
    let l = color.l.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Rgba {
        r: ((r + m) * 255.0).round() as u8,
        g: ((g + m) * 255.0).round() as u8,
        b: ((b + m) * 255.0).round() as u8,
        a: color.a,
    }
}

/// Format a color as a CSS string: `#rrggbb` when opaque, `rgba()` otherwise
pub fn format_color(color: Rgba) -> String {
    if color.is_opaque() {
        format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
    } else {
        format!(
            "rgba({}, {}, {}, {})",
            color.r,
            color.g,
            color.b,
            format_alpha(color.a)
        )
    }
}

/// Two-decimal alpha with trailing zeros trimmed, so identical inputs always
/// produce identical strings
fn format_alpha(a: f32) -> String {
    let s = format!("{:.2}", a.clamp(0.0, 1.0));
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hues_convert() {
        let red = rgb_to_hsl(Rgba::rgb(255, 0, 0));
        assert_eq!(red.h, 0.0);
        assert_eq!(red.s, 1.0);
        assert!((red.l - 0.5).abs() < 1e-6);

        let green = rgb_to_hsl(Rgba::rgb(0, 255, 0));
        assert!((green.h - 120.0).abs() < 1e-3);

        let blue = rgb_to_hsl(Rgba::rgb(0, 0, 255));
        assert!((blue.h - 240.0).abs() < 1e-3);
    }

    #[test]
    fn grays_have_zero_saturation() {
        for value in [0u8, 64, 128, 200, 255] {
            let hsl = rgb_to_hsl(Rgba::rgb(value, value, value));
            assert_eq!(hsl.s, 0.0);
            assert_eq!(hsl.h, 0.0);
        }
        assert_eq!(rgb_to_hsl(Rgba::WHITE).l, 1.0);
        assert_eq!(rgb_to_hsl(Rgba::BLACK).l, 0.0);
    }

    #[test]
    fn round_trip_is_close() {
        for color in [
            Rgba::rgb(12, 200, 99),
            Rgba::rgb(255, 128, 0),
            Rgba::rgb(3, 3, 250),
            Rgba::rgb(128, 128, 128),
        ] {
            let back = hsl_to_rgb(rgb_to_hsl(color));
            assert!((back.r as i32 - color.r as i32).abs() <= 1);
            assert!((back.g as i32 - color.g as i32).abs() <= 1);
            assert!((back.b as i32 - color.b as i32).abs() <= 1);
        }
    }

    #[test]
    fn formats_opaque_as_hex() {
        assert_eq!(format_color(Rgba::rgb(255, 0, 16)), "#ff0010");
    }

    #[test]
    fn formats_translucent_as_rgba() {
        assert_eq!(
            format_color(Rgba::new(10, 20, 30, 0.5)),
            "rgba(10, 20, 30, 0.5)"
        );
        assert_eq!(format_color(Rgba::new(0, 0, 0, 0.0)), "rgba(0, 0, 0, 0)");
    }
}
