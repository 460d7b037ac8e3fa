//! End-to-end properties of the color transform engine.

use umbra_color::{rgb_to_hsl, Rgba};
use umbra_filter::{ColorEngine, FilterConfig};

const DARK: FilterConfig = FilterConfig {
    mode: 1,
    brightness: 100,
    contrast: 100,
    grayscale: 0,
    sepia: 0,
};

const LIGHT: FilterConfig = FilterConfig {
    mode: 0,
    brightness: 100,
    contrast: 100,
    grayscale: 0,
    sepia: 0,
};

/// Parse the `#rrggbb` output format back into a color.
fn parse_hex(s: &str) -> Rgba {
    assert!(s.starts_with('#') && s.len() == 7, "unexpected format: {s}");
    let channel = |range| u8::from_str_radix(&s[range], 16).unwrap();
    Rgba::rgb(channel(1..3), channel(3..5), channel(5..7))
}

#[test]
fn memoized_call_returns_identical_string_without_growing_cache() {
    let mut engine = ColorEngine::new();
    let color = Rgba::new(10, 10, 10, 1.0);

    let first = engine.modify_background_color(color, &DARK);
    let size_after_first = engine.cache_len();
    let second = engine.modify_background_color(color, &DARK);

    assert_eq!(first, second);
    assert_eq!(engine.cache_len(), size_after_first);
}

#[test]
fn near_neutral_foreground_lands_on_the_warm_anchor() {
    let mut engine = ColorEngine::new();
    let out = engine.modify_foreground_color(Rgba::new(128, 128, 128, 1.0), &DARK);

    let hsl = rgb_to_hsl(parse_hex(&out));
    // Input saturation is zero, far below the 0.24 threshold; output must sit
    // in the hue=40 / sat=0.16 anchor region regardless.
    assert!((hsl.h - 40.0).abs() < 6.0, "hue was {}", hsl.h);
    assert!((hsl.s - 0.16).abs() < 0.04, "saturation was {}", hsl.s);
}

#[test]
fn light_mode_routes_every_role_through_the_uniform_transform() {
    let mut engine = ColorEngine::new();
    let color = Rgba::new(40, 90, 200, 1.0);

    let border = engine.modify_border_color(color, &LIGHT);
    let background = engine.modify_background_color(color, &LIGHT);
    let foreground = engine.modify_foreground_color(color, &LIGHT);

    assert_eq!(border, background);
    assert_eq!(background, foreground);
}

#[test]
fn clear_cache_empties_all_roles_and_recomputes() {
    let mut engine = ColorEngine::new();
    let color = Rgba::new(10, 200, 30, 1.0);

    engine.modify_background_color(color, &DARK);
    engine.modify_foreground_color(color, &DARK);
    engine.modify_border_color(color, &DARK);
    assert_eq!(engine.cache_len(), 3);
    let misses_before = engine.misses();

    engine.clear_cache();
    assert_eq!(engine.cache_len(), 0);

    let recomputed = engine.modify_background_color(color, &DARK);
    assert_eq!(engine.misses(), misses_before + 1);
    assert!(recomputed.starts_with('#'));
}

#[test]
fn translucent_input_formats_as_rgba() {
    let mut engine = ColorEngine::new();
    let out = engine.modify_background_color(Rgba::new(255, 255, 255, 0.5), &DARK);
    assert!(out.starts_with("rgba("), "unexpected format: {out}");
}

#[test]
fn bright_backgrounds_come_out_dark() {
    let mut engine = ColorEngine::new();
    let out = engine.modify_background_color(Rgba::new(250, 250, 250, 1.0), &DARK);
    let hsl = rgb_to_hsl(parse_hex(&out));
    assert!(hsl.l < 0.25, "lightness was {}", hsl.l);
}

#[test]
fn dark_text_comes_out_light() {
    let mut engine = ColorEngine::new();
    let out = engine.modify_foreground_color(Rgba::new(20, 20, 20, 1.0), &DARK);
    let hsl = rgb_to_hsl(parse_hex(&out));
    assert!(hsl.l > 0.7, "lightness was {}", hsl.l);
}

#[test]
fn filter_parameters_participate_in_the_cache_key() {
    let mut engine = ColorEngine::new();
    let color = Rgba::new(200, 40, 40, 1.0);
    let plain = engine.modify_background_color(color, &DARK);
    let dimmed = engine.modify_background_color(
        color,
        &FilterConfig {
            brightness: 80,
            ..DARK
        },
    );
    assert_ne!(plain, dimmed);
    assert_eq!(engine.cache_len(), 2);
}

#[test]
fn config_round_trips_through_serde() {
    let json = serde_json::to_string(&DARK).unwrap();
    let back: FilterConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, DARK);
}
