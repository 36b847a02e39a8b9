// SPDX-License-Identifier: MIT
//
// WCAG 2.1 luminance and contrast ratio.
//
// Readability is judged in sRGB relative luminance space because that is
// how WCAG defines it, even though every color here is stored as OKLCH.
// Translucent colors are measured as if opaque; callers that care about
// the backdrop composite first.

use crate::color::{Color, srgb_to_linear};

/// Compute the relative luminance of a color per WCAG 2.1.
///
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
///
/// Returns a value in [0.0, 1.0] where 0 is black and 1 is white.
#[must_use]
pub fn relative_luminance(color: Color) -> f64 {
    let (r, g, b) = color.to_srgb();
    let r_lin = f64::from(srgb_to_linear(r));
    let g_lin = f64::from(srgb_to_linear(g));
    let b_lin = f64::from(srgb_to_linear(b));
    0.2126f64.mul_add(r_lin, 0.7152f64.mul_add(g_lin, 0.0722 * b_lin))
}

/// Compute the WCAG 2.1 contrast ratio between two colors.
///
/// Returns a value in [1.0, 21.0], independent of argument order.
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn luminance_extremes() {
        assert!(approx_eq(relative_luminance(Color::BLACK), 0.0, 0.001));
        assert!(approx_eq(relative_luminance(Color::WHITE), 1.0, 0.001));
    }

    #[test]
    fn luminance_pure_green() {
        let green = Color::srgb(0.0, 1.0, 0.0);
        assert!(approx_eq(relative_luminance(green), 0.7152, 0.01));
    }

    #[test]
    fn black_on_white_is_21() {
        let ratio = contrast_ratio(Color::BLACK, Color::WHITE);
        assert!(approx_eq(ratio, 21.0, 0.1), "B/W contrast: {ratio}");
    }

    #[test]
    fn contrast_is_symmetric_and_at_least_one() {
        let a = Color::srgb(0.8, 0.2, 0.3);
        let b = Color::srgb(0.1, 0.1, 0.4);
        assert!(approx_eq(contrast_ratio(a, b), contrast_ratio(b, a), 1e-9));
        assert!(contrast_ratio(a, a) >= 1.0 - 1e-9);
    }
}
