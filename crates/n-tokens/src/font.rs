//! Font tokens: typography definitions and their CSS font stacks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::token::{normalize_name, variable_name};

/// Typographic slot a font fills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontRole {
    #[default]
    Sans,
    Serif,
    Mono,
    Display,
}

impl FontRole {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sans => "sans",
            Self::Serif => "serif",
            Self::Mono => "mono",
            Self::Display => "display",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sans" => Some(Self::Sans),
            "serif" => Some(Self::Serif),
            "mono" => Some(Self::Mono),
            "display" => Some(Self::Display),
            _ => None,
        }
    }

    /// Generic families appended to every stack of this role.
    #[must_use]
    pub const fn generic_stack(self) -> &'static str {
        match self {
            Self::Sans | Self::Display => "ui-sans-serif, system-ui, sans-serif",
            Self::Serif => "ui-serif, Georgia, serif",
            Self::Mono => "ui-monospace, SFMono-Regular, monospace",
        }
    }
}

impl fmt::Display for FontRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw font definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontDefinition {
    pub name: String,
    pub family: String,
    pub role: Option<String>,
    pub fallbacks: Vec<String>,
    pub weights: Vec<u16>,
}

impl FontDefinition {
    #[must_use]
    pub fn new(family: &str, role: FontRole) -> Self {
        Self {
            name: family.to_string(),
            family: family.to_string(),
            role: Some(role.name().to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn weights(mut self, weights: &[u16]) -> Self {
        self.weights = weights.to_vec();
        self
    }
}

/// A built font token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontToken {
    pub name: String,
    pub variable_name: String,
    pub role: FontRole,
    pub family: String,
    pub fallbacks: Vec<String>,
    pub weights: Vec<u16>,
}

impl FontToken {
    /// CSS font stack: family, user fallbacks, then the role's generics.
    #[must_use]
    pub fn stack(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(self.fallbacks.len() + 2);
        if !self.family.is_empty() {
            parts.push(quote_family(&self.family));
        }
        parts.extend(self.fallbacks.iter().map(|f| quote_family(f)));
        parts.push(self.role.generic_stack().to_string());
        parts.join(", ")
    }
}

/// Quote a family name unless it is a bare identifier.
fn quote_family(family: &str) -> String {
    let family = family.trim();
    if family.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        family.to_string()
    } else {
        format!("\"{}\"", family.replace('"', "'"))
    }
}

/// Build font tokens. The first font per role wins; later ones are reported
/// and dropped.
pub fn build_fonts(defs: &[FontDefinition], sink: &mut impl DiagnosticSink) -> Vec<FontToken> {
    let mut fonts: Vec<FontToken> = Vec::with_capacity(defs.len());

    for (i, def) in defs.iter().enumerate() {
        let mut name = normalize_name(&def.name);
        if name.is_empty() {
            name = normalize_name(&def.family);
        }
        if name.is_empty() {
            name = format!("Font {}", i + 1);
            sink.report(Diagnostic::MalformedDefinition {
                definition: name.clone(),
                detail: "missing name and family, using placeholder".into(),
            });
        }

        let role = match def.role.as_deref() {
            None => FontRole::Sans,
            Some(text) => FontRole::from_name(text).unwrap_or_else(|| {
                sink.report(Diagnostic::MalformedDefinition {
                    definition: name.clone(),
                    detail: format!("unknown font role '{}', using sans", text.trim()),
                });
                FontRole::Sans
            }),
        };

        if let Some(kept) = fonts.iter().find(|f| f.role == role) {
            sink.report(Diagnostic::DuplicateFontRole {
                role: role.name().to_string(),
                kept: kept.name.clone(),
                ignored: name,
            });
            continue;
        }

        let mut variable = variable_name(&name);
        if variable.is_empty() {
            variable = format!("font-{}", i + 1);
        }

        fonts.push(FontToken {
            variable_name: variable,
            name,
            role,
            family: normalize_name(&def.family),
            fallbacks: def
                .fallbacks
                .iter()
                .map(|f| normalize_name(f))
                .filter(|f| !f.is_empty())
                .collect(),
            weights: def.weights.clone(),
        });
    }

    fonts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Collector, Ignore};

    #[test]
    fn stack_quotes_multiword_families() {
        let fonts = build_fonts(
            &[FontDefinition {
                fallbacks: vec!["Helvetica Neue".into(), "Arial".into()],
                ..FontDefinition::new("Inter Variable", FontRole::Sans)
            }],
            &mut Ignore,
        );
        assert_eq!(
            fonts[0].stack(),
            "\"Inter Variable\", \"Helvetica Neue\", Arial, ui-sans-serif, system-ui, sans-serif"
        );
    }

    #[test]
    fn role_generics() {
        let fonts = build_fonts(
            &[
                FontDefinition::new("JetBrains Mono", FontRole::Mono),
                FontDefinition::new("Lora", FontRole::Serif),
                FontDefinition::new("Anton", FontRole::Display),
            ],
            &mut Ignore,
        );
        assert_eq!(fonts[0].stack(), "\"JetBrains Mono\", ui-monospace, SFMono-Regular, monospace");
        assert_eq!(fonts[1].stack(), "Lora, ui-serif, Georgia, serif");
        assert_eq!(fonts[2].stack(), "Anton, ui-sans-serif, system-ui, sans-serif");
    }

    #[test]
    fn role_defaults_to_sans() {
        let def = FontDefinition { family: "Inter".into(), ..FontDefinition::default() };
        let fonts = build_fonts(&[def], &mut Ignore);
        assert_eq!(fonts[0].role, FontRole::Sans);
        assert_eq!(fonts[0].name, "Inter");
        assert_eq!(fonts[0].variable_name, "inter");
    }

    #[test]
    fn first_font_per_role_wins() {
        let mut sink = Collector::new();
        let fonts = build_fonts(
            &[
                FontDefinition::new("Inter", FontRole::Sans),
                FontDefinition::new("Roboto", FontRole::Sans),
            ],
            &mut sink,
        );
        assert_eq!(fonts.len(), 1);
        assert_eq!(fonts[0].family, "Inter");
        assert_eq!(sink.count("duplicate-font-role"), 1);
    }

    #[test]
    fn nameless_font_gets_placeholder() {
        let mut sink = Collector::new();
        let fonts = build_fonts(&[FontDefinition::default()], &mut sink);
        assert_eq!(fonts[0].name, "Font 1");
        assert_eq!(fonts[0].stack(), "ui-sans-serif, system-ui, sans-serif");
        assert_eq!(sink.count("malformed-definition"), 1);
    }
}
