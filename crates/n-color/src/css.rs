// SPDX-License-Identifier: MIT
//
// CSS color text: parsing into `Color` and canonical number formatting.
//
// Only the forms theme authors actually write are accepted: hex, oklch(),
// rgb()/rgba() and three keywords. Anything else (named colors, hsl(),
// var() references, color-mix() expressions) returns None; the token
// engine decides what a parse failure means for its caller.
//
// Both the legacy comma syntax (`rgb(10, 20, 30)`) and the modern space
// syntax with slash alpha (`oklch(0.5 0.1 90 / 50%)`) are understood.

use crate::color::{Color, normalize_hue};

/// Parse CSS color text. See [`Color::parse_css`].
pub(crate) fn parse(input: &str) -> Option<Color> {
    let text = input.trim().to_ascii_lowercase();

    if text.starts_with('#') {
        return parse_hex(&text);
    }

    match text.as_str() {
        "white" => return Some(Color::WHITE),
        "black" => return Some(Color::BLACK),
        "transparent" => return Some(Color::TRANSPARENT),
        _ => {}
    }

    let (func, args) = split_function(&text)?;
    match func {
        "oklch" => parse_oklch(args),
        "rgb" | "rgba" => parse_rgb(args),
        _ => None,
    }
}

/// Split `name(args)` into its name and argument text.
fn split_function(text: &str) -> Option<(&str, &str)> {
    let open = text.find('(')?;
    let inner = text[open + 1..].strip_suffix(')')?;
    let name = text[..open].trim();
    if name.is_empty() || inner.contains('(') {
        return None;
    }
    Some((name, inner))
}

/// Split function arguments into components plus an optional alpha.
///
/// Commas and whitespace both separate components; a `/` introduces alpha.
fn split_args(args: &str) -> (Vec<&str>, Option<&str>) {
    let (main, alpha) = match args.split_once('/') {
        Some((main, alpha)) => (main, Some(alpha.trim())),
        None => (args, None),
    };
    let parts = main
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    (parts, alpha)
}

/// A number, or a percentage scaled so that `100%` equals `percent_scale`.
fn parse_component(text: &str, percent_scale: f32) -> Option<f32> {
    if text == "none" {
        return Some(0.0);
    }
    let value = if let Some(pct) = text.strip_suffix('%') {
        pct.parse::<f32>().ok()? / 100.0 * percent_scale
    } else {
        text.parse::<f32>().ok()?
    };
    value.is_finite().then_some(value)
}

fn parse_alpha(text: Option<&str>) -> Option<f32> {
    text.map_or(Some(1.0), |a| parse_component(a, 1.0).map(|v| v.clamp(0.0, 1.0)))
}

fn parse_oklch(args: &str) -> Option<Color> {
    let (parts, alpha) = split_args(args);
    let [l, c, h] = parts.as_slice() else {
        return None;
    };
    let l = parse_component(l, 1.0)?.clamp(0.0, 1.0);
    // CSS Color 4: 100% chroma is 0.4.
    let c = parse_component(c, 0.4)?.max(0.0);
    let h = parse_component(h.strip_suffix("deg").unwrap_or(h), 360.0)?;
    Some(Color::oklcha(l, c, normalize_hue(h), parse_alpha(alpha)?))
}

fn parse_rgb(args: &str) -> Option<Color> {
    let (parts, alpha) = split_args(args);
    let (channels, alpha) = match (parts.as_slice(), alpha) {
        ([r, g, b], alpha) => ([*r, *g, *b], alpha),
        ([r, g, b, a], None) => ([*r, *g, *b], Some(*a)),
        _ => return None,
    };
    let mut srgb = [0.0f32; 3];
    for (slot, text) in srgb.iter_mut().zip(channels) {
        *slot = (parse_component(text, 255.0)? / 255.0).clamp(0.0, 1.0);
    }
    Some(Color::srgba(srgb[0], srgb[1], srgb[2], parse_alpha(alpha)?))
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

/// Parse a hex color string (`#` optional).
pub(crate) fn parse_hex(s: &str) -> Option<Color> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes.len() {
        3 | 4 => {
            let mut out = [255u8; 4];
            for (slot, &digit) in out.iter_mut().zip(bytes) {
                let v = parse_hex_digit(digit)?;
                *slot = (v << 4) | v;
            }
            Some(Color::rgba8(out[0], out[1], out[2], out[3]))
        }
        6 | 8 => {
            let mut out = [255u8; 4];
            for (slot, pair) in out.iter_mut().zip(bytes.chunks(2)) {
                *slot = (parse_hex_digit(pair[0])? << 4) | parse_hex_digit(pair[1])?;
            }
            Some(Color::rgba8(out[0], out[1], out[2], out[3]))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

// ─── Formatting ──────────────────────────────────────────────────────────────

/// Format a component with at most three decimals, trailing zeros removed.
///
/// `-0` is written as `0` so that output stays byte-stable.
pub(crate) fn format_number(v: f32) -> String {
    let text = format!("{v:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() < eps
    }

    // ── oklch() ──────────────────────────────────────────────────────────

    #[test]
    fn oklch_plain_numbers() {
        let c = parse("oklch(0.55 0.15 240)").unwrap();
        assert_eq!(c, Color::oklch(0.55, 0.15, 240.0));
    }

    #[test]
    fn oklch_percent_lightness_and_alpha() {
        let c = parse("oklch(62% 0.2 30deg / 50%)").unwrap();
        assert!(approx_eq(c.l, 0.62, 1e-6));
        assert!(approx_eq(c.alpha, 0.5, 1e-6));
        assert!(approx_eq(c.h, 30.0, 1e-4));
    }

    #[test]
    fn oklch_wrong_arity_fails() {
        assert!(parse("oklch(0.5 0.1)").is_none());
        assert!(parse("oklch(0.5 0.1 30 40)").is_none());
    }

    #[test]
    fn oklch_roundtrips_through_css_text() {
        for text in ["oklch(0.205 0 0)", "oklch(0.646 0.222 41.116)", "oklch(0.985 0 0)"] {
            assert_eq!(parse(text).unwrap().to_css(), text);
        }
    }

    // ── rgb() ────────────────────────────────────────────────────────────

    #[test]
    fn rgb_legacy_and_modern_syntax_agree() {
        let legacy = parse("rgb(255, 0, 0)").unwrap();
        let modern = parse("rgb(255 0 0)").unwrap();
        assert_eq!(legacy, modern);
    }

    #[test]
    fn rgba_fourth_component_is_alpha() {
        let c = parse("rgba(0, 0, 0, 0.25)").unwrap();
        assert!(approx_eq(c.alpha, 0.25, 1e-6));
    }

    // ── hex and keywords ─────────────────────────────────────────────────

    #[test]
    fn hex_forms() {
        assert_eq!(parse("#fff"), Some(Color::rgb8(255, 255, 255)));
        assert_eq!(parse("#FFFFFF"), Some(Color::rgb8(255, 255, 255)));
        assert!(parse("#ffff").unwrap().is_opaque());
        assert!(!parse("#ffffff80").unwrap().is_opaque());
        assert!(parse("#ggg").is_none());
        assert!(parse("#12345").is_none());
    }

    #[test]
    fn keywords() {
        assert_eq!(parse(" White "), Some(Color::WHITE));
        assert_eq!(parse("black"), Some(Color::BLACK));
        assert!(parse("transparent").unwrap().alpha < 1e-6);
    }

    #[test]
    fn references_and_expressions_are_not_colors() {
        assert!(parse("var(--ocean)").is_none());
        assert!(parse("color-mix(in oklch, var(--ocean) 92%, white 8%)").is_none());
        assert!(parse("hsl(0 0% 0%)").is_none());
        assert!(parse("").is_none());
    }

    // ── format_number ────────────────────────────────────────────────────

    #[test]
    fn format_number_trims() {
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(240.0), "240");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0001), "0");
        assert_eq!(format_number(41.116), "41.116");
    }

    // ── Arbitrary input ──────────────────────────────────────────────────

    proptest::proptest! {
        #[test]
        fn parse_never_panics(text in "\\PC{0,40}") {
            let _ = parse(&text);
        }

        #[test]
        fn parsed_oklch_is_in_range(l in 0.0f32..1.0, c in 0.0f32..0.37, h in 0.0f32..360.0) {
            let text = format!("oklch({l} {c} {h})");
            let color = parse(&text).unwrap();
            proptest::prop_assert!((0.0..=1.0).contains(&color.l));
            proptest::prop_assert!((0.0..360.0).contains(&color.h));
        }
    }
}
