//! Export formats: every format derives from the same built brand.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::brand::{Brand, BrandInfo};
use crate::emit::render_stylesheet;
use crate::font::FontToken;
use crate::guide::ResolvedVariableMap;
use crate::token::ColorToken;

/// Header prepended to the utility-framework flavor.
const TAILWIND_HEADER: &str = "@import \"tailwindcss\";\n@custom-variant dark (&:is(.dark *));\n";

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// The stylesheet as rendered.
    #[default]
    Css,
    /// Structured JSON projection of tokens and resolved variables.
    Json,
    /// Stylesheet with the utility-framework import header.
    Tailwind,
}

impl ExportFormat {
    pub const ALL: [Self; 3] = [Self::Css, Self::Json, Self::Tailwind];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Json => "json",
            Self::Tailwind => "tailwind",
        }
    }

    /// Conventional file extension.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Css | Self::Tailwind => "css",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown export format '{s}' (expected css, json or tailwind)"))
    }
}

#[derive(Serialize)]
struct Variables<'a> {
    light: &'a ResolvedVariableMap,
    dark: &'a ResolvedVariableMap,
}

#[derive(Serialize)]
struct JsonExport<'a> {
    name: &'a str,
    info: &'a BrandInfo,
    tokens: &'a [ColorToken],
    fonts: &'a [FontToken],
    variables: Variables<'a>,
}

fn to_json(brand: &Brand) -> String {
    let doc = JsonExport {
        name: &brand.name,
        info: &brand.info,
        tokens: &brand.tokens,
        fonts: &brand.fonts,
        variables: Variables {
            light: &brand.light,
            dark: &brand.dark,
        },
    };
    // Every field serializes to strings, numbers and string-keyed maps.
    let mut json = serde_json::to_string_pretty(&doc).unwrap_or_default();
    json.push('\n');
    json
}

/// Render a brand in the given format.
#[must_use]
pub fn export(brand: &Brand, format: ExportFormat) -> String {
    match format {
        ExportFormat::Css => render_stylesheet(brand),
        ExportFormat::Json => to_json(brand),
        ExportFormat::Tailwind => format!("{TAILWIND_HEADER}\n{}", render_stylesheet(brand)),
    }
}
