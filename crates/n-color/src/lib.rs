// SPDX-License-Identifier: MIT
//
// n-color: OKLCH color values for the n-brand token engine.
//
// Theme authors write colors as CSS text. This crate turns that text into a
// `Color` held in OKLCH, writes it back out as canonical `oklch(...)` text,
// and supplies the WCAG luminance math the engine's contrast heuristic
// needs. It has no knowledge of tokens, roles, or stylesheets.
//
//   css.rs       → parse hex / rgb() / oklch() text, format numbers
//   color.rs     → the Color type and OKLCH ↔ sRGB conversion
//   luminance.rs → relative luminance and contrast ratio

// Mathematical code uses small integer-to-float casts.
#![allow(clippy::cast_precision_loss)]
// Hue/lightness/chroma variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod color;
mod css;
pub mod luminance;

pub use color::Color;
pub use luminance::{contrast_ratio, relative_luminance};
