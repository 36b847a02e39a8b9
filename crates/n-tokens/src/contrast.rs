//! Contrast text: pick near-black or near-white text for a fill.
//!
//! The only accessibility judgment the engine makes: compare the WCAG
//! contrast ratio of the fill against pure white and pure black and take
//! the stronger side. Ties go to near-black.

use n_color::{Color, contrast_ratio};

use crate::diagnostics::{Diagnostic, DiagnosticSink};

/// One of the two text colors the heuristic can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContrastText {
    NearBlack,
    NearWhite,
}

impl ContrastText {
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::NearBlack => Color::oklch(0.145, 0.0, 0.0),
            Self::NearWhite => Color::oklch(0.985, 0.0, 0.0),
        }
    }

    /// `oklch(0.145 0 0)` or `oklch(0.985 0 0)`.
    #[must_use]
    pub const fn to_css(self) -> &'static str {
        match self {
            Self::NearBlack => "oklch(0.145 0 0)",
            Self::NearWhite => "oklch(0.985 0 0)",
        }
    }
}

/// Text color for a parsed fill.
#[must_use]
pub fn contrast_for(fill: Color) -> ContrastText {
    let against_white = contrast_ratio(fill, Color::WHITE);
    let against_black = contrast_ratio(fill, Color::BLACK);
    if against_white > against_black {
        ContrastText::NearWhite
    } else {
        ContrastText::NearBlack
    }
}

/// Text color for fill given as CSS text. Unparseable text is reported and
/// gets near-black.
pub fn contrast_text(fill: &str, sink: &mut impl DiagnosticSink) -> ContrastText {
    match Color::parse_css(fill) {
        Some(color) => contrast_for(color),
        None => {
            sink.report(Diagnostic::UnparseableColor {
                context: "contrast".into(),
                value: fill.to_string(),
            });
            ContrastText::NearBlack
        }
    }
}
