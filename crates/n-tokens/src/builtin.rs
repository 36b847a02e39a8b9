//! Named preset brands: ready-to-use definitions.
//!
//! Each preset is an ordinary [`BrandDefinition`] run through
//! [`Brand::build`], so presets exercise exactly the same pipeline as
//! brand files.

use crate::brand::{Brand, BrandDefinition, BrandInfo};
use crate::diagnostics::TracingSink;
use crate::font::{FontDefinition, FontRole};
use crate::guide::{AuxValues, NamedValue, StyleGuide};
use crate::token::ColorDefinition;
use crate::value::StyleValue;

/// Look up a builtin brand by name.
///
/// Returns `None` if the name is not recognized.
#[must_use]
pub fn builtin_brand(name: &str) -> Option<Brand> {
    builtin_definition(name).map(|def| Brand::build(&def, &mut TracingSink))
}

/// The definition behind a builtin brand.
#[must_use]
pub fn builtin_definition(name: &str) -> Option<BrandDefinition> {
    Some(match name {
        "default" | "ocean" => ocean(),
        "ember" => ember(),
        "graphite" => graphite(),
        _ => return None,
    })
}

/// List all available builtin brand names.
#[must_use]
pub const fn builtin_names() -> &'static [&'static str] {
    &["default", "ocean", "ember", "graphite"]
}

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

fn info(name: &str, tagline: &str, industry: &str) -> BrandInfo {
    BrandInfo {
        name: name.to_string(),
        tagline: Some(tagline.to_string()),
        industry: Some(industry.to_string()),
        website: None,
    }
}

fn neutrals() -> Vec<ColorDefinition> {
    vec![
        ColorDefinition::new("Paper", "oklch(1 0 0)", "oklch(0.145 0 0)").roles(&["background", "popover"]),
        ColorDefinition::new("Ink", "oklch(0.145 0 0)", "oklch(0.985 0 0)")
            .roles(&["foreground", "card-foreground", "popover-foreground"]),
        ColorDefinition::new("Mist", "oklch(0.97 0 0)", "oklch(0.269 0 0)").roles(&["muted", "sidebar"]),
        ColorDefinition::new("Slate", "oklch(0.556 0 0)", "oklch(0.708 0 0)").roles(&["muted-foreground"]),
        ColorDefinition::new("Hairline", "oklch(0.922 0 0)", "oklch(1 0 0 / 10%)").roles(&["border", "sidebar-border"]),
        ColorDefinition::new("Field", "oklch(0.922 0 0)", "oklch(1 0 0 / 15%)").roles(&["input"]),
    ]
}

fn shadows() -> Vec<NamedValue> {
    vec![
        NamedValue::new("shadow-xs", "0 1px 2px 0 rgb(0 0 0 / 0.05)"),
        NamedValue::new("shadow-sm", "0 1px 3px 0 rgb(0 0 0 / 0.1), 0 1px 2px -1px rgb(0 0 0 / 0.1)"),
        NamedValue::new("shadow-md", "0 4px 6px -1px rgb(0 0 0 / 0.1), 0 2px 4px -2px rgb(0 0 0 / 0.1)"),
    ]
}

fn wire(primary: &str, secondary: &str, accent: &str, destructive: &str, radius: &str) -> StyleGuide {
    StyleGuide {
        primary: Some(StyleValue::reference(primary)),
        secondary: Some(StyleValue::reference(secondary)),
        accent: Some(StyleValue::reference(accent)),
        destructive: Some(StyleValue::reference(destructive)),
        ring: Some(StyleValue::reference(primary)),
        radius: Some(radius.to_string()),
        spacing: Some("0.25rem".to_string()),
        ..StyleGuide::default()
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

fn ocean() -> BrandDefinition {
    let mut colors = neutrals();
    colors.extend([
        ColorDefinition::new("Ocean", "oklch(0.546 0.245 262.881)", "oklch(0.623 0.214 259.815)")
            .color()
            .roles(&["primary", "chart-1", "sidebar-primary"])
            .on_color("oklch(0.985 0 0)", "oklch(0.985 0 0)"),
        ColorDefinition::new("Lagoon", "oklch(0.704 0.14 182.503)", "oklch(0.6 0.118 184.704)")
            .color()
            .roles(&["secondary", "chart-2"]),
        ColorDefinition::new("Seafoam", "oklch(0.905 0.093 164.15)", "oklch(0.432 0.095 166.913)")
            .color()
            .roles(&["accent", "sidebar-accent", "chart-3"]),
        ColorDefinition::new("Coral", "oklch(0.637 0.237 25.331)", "oklch(0.704 0.191 22.216)")
            .color()
            .roles(&["destructive"]),
        ColorDefinition::new("Kelp", "oklch(0.627 0.194 149.214)", "oklch(0.723 0.219 149.579)")
            .color()
            .roles(&["success"]),
        ColorDefinition::new("Sunlit", "oklch(0.795 0.184 86.047)", "oklch(0.852 0.199 91.936)")
            .color()
            .roles(&["warning", "chart-4"]),
    ]);

    let mut style_guide = wire("Ocean", "Lagoon", "Seafoam", "Coral", "0.625rem");
    style_guide.success = Some(StyleValue::reference("Kelp"));
    style_guide.warning = Some(StyleValue::reference("Sunlit"));

    BrandDefinition {
        info: info("Ocean", "Deep blues with a tropical edge", "Software"),
        colors,
        fonts: vec![
            FontDefinition::new("Inter", FontRole::Sans).weights(&[400, 500, 600, 700]),
            FontDefinition::new("JetBrains Mono", FontRole::Mono).weights(&[400, 700]),
        ],
        style_guide,
        aux: AuxValues {
            shadows: shadows(),
            ..AuxValues::default()
        },
    }
}

fn ember() -> BrandDefinition {
    let mut colors = neutrals();
    colors.extend([
        ColorDefinition::new("Ember", "oklch(0.646 0.222 41.116)", "oklch(0.705 0.213 47.604)")
            .color()
            .roles(&["primary", "chart-1"]),
        ColorDefinition::new("Ash", "oklch(0.97 0.001 106.424)", "oklch(0.268 0.007 34.298)").roles(&["secondary"]),
        ColorDefinition::new("Glow", "oklch(0.828 0.189 84.429)", "oklch(0.769 0.188 70.08)")
            .color()
            .roles(&["accent", "chart-2"]),
        ColorDefinition::new("Brick", "oklch(0.577 0.245 27.325)", "oklch(0.704 0.191 22.216)")
            .color()
            .roles(&["destructive", "chart-3"]),
    ]);

    BrandDefinition {
        info: info("Ember", "Warm oranges for bold products", "Hospitality"),
        colors,
        fonts: vec![
            FontDefinition::new("Outfit", FontRole::Sans).weights(&[400, 600]),
            FontDefinition::new("Playfair Display", FontRole::Display).weights(&[700]),
        ],
        style_guide: wire("Ember", "Ash", "Glow", "Brick", "0.5rem"),
        aux: AuxValues {
            charts: vec![StyleValue::reference("Ember"), StyleValue::reference("Glow:dark")],
            shadows: shadows(),
            ..AuxValues::default()
        },
    }
}

fn graphite() -> BrandDefinition {
    let mut colors = neutrals();
    colors.extend([
        ColorDefinition::new("Graphite", "oklch(0.205 0 0)", "oklch(0.922 0 0)").roles(&["primary"]),
        ColorDefinition::new("Steel", "oklch(0.97 0 0)", "oklch(0.269 0 0)").roles(&["secondary", "accent"]),
        ColorDefinition::new("Signal", "oklch(0.577 0.245 27.325)", "oklch(0.704 0.191 22.216)")
            .color()
            .roles(&["destructive"]),
        ColorDefinition::new("Cobalt", "oklch(0.488 0.243 264.376)", "oklch(0.488 0.243 264.376)")
            .color()
            .roles(&["info", "chart-1"]),
    ]);

    let mut style_guide = wire("Graphite", "Steel", "Steel", "Signal", "0.375rem");
    style_guide.info = Some(StyleValue::reference("Cobalt"));

    BrandDefinition {
        info: info("Graphite", "Quiet monochrome for dense tools", "Finance"),
        colors,
        fonts: vec![
            FontDefinition::new("IBM Plex Sans", FontRole::Sans).weights(&[400, 500]),
            FontDefinition::new("IBM Plex Serif", FontRole::Serif).weights(&[400]),
            FontDefinition::new("IBM Plex Mono", FontRole::Mono).weights(&[400]),
        ],
        style_guide,
        aux: AuxValues {
            borders: vec![NamedValue::new("border-width", "1px")],
            ..AuxValues::default()
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
