//! Brand: the theme aggregate.
//!
//! A [`BrandDefinition`] is the declarative input (what a brand file holds).
//! [`Brand::build`] runs the whole pipeline once: tokens, fonts, role index,
//! then one composed map per variant. The result is plain immutable data;
//! editing a theme means building a new `Brand`.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{Collector, Diagnostic, DiagnosticSink};
use crate::font::{FontDefinition, FontToken, build_fonts};
use crate::guide::{AuxValues, ResolvedVariableMap, StyleGuide, compose_variants};
use crate::resolve::RoleIndex;
use crate::token::{ColorDefinition, ColorToken, Variant, build_tokens, variable_name};

/// Business metadata shown alongside a theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandInfo {
    pub name: String,
    pub tagline: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
}

/// Declarative brand input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrandDefinition {
    pub info: BrandInfo,
    pub colors: Vec<ColorDefinition>,
    pub fonts: Vec<FontDefinition>,
    #[serde(alias = "style_guide")]
    pub style_guide: StyleGuide,
    pub aux: AuxValues,
}

/// A fully built theme.
#[derive(Debug, Clone, PartialEq)]
pub struct Brand {
    /// Machine identifier, derived from the display name.
    pub name: String,
    pub info: BrandInfo,
    pub tokens: Vec<ColorToken>,
    pub fonts: Vec<FontToken>,
    pub style_guide: StyleGuide,
    pub aux: AuxValues,
    pub light: ResolvedVariableMap,
    pub dark: ResolvedVariableMap,
    duplicate_roles: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Brand {
    /// Build a brand. Every diagnostic is forwarded to `sink` and also kept
    /// on the brand.
    pub fn build(definition: &BrandDefinition, sink: &mut impl DiagnosticSink) -> Self {
        let mut collected = Collector::new();
        let mut both = |d: Diagnostic| {
            collected.report(d.clone());
            sink.report(d);
        };

        let name = match variable_name(&definition.info.name) {
            n if n.is_empty() => "untitled".to_string(),
            n => n,
        };

        let tokens = build_tokens(&definition.colors, &mut both);
        let fonts = build_fonts(&definition.fonts, &mut both);

        let (light, dark, duplicate_roles) = {
            let index = RoleIndex::build(&tokens, &mut both);
            let (light, dark) = compose_variants(&name, &index, &definition.style_guide, &definition.aux, &mut both);
            (light, dark, index.duplicate_count())
        };

        tracing::debug!(
            theme = %name,
            tokens = tokens.len(),
            fonts = fonts.len(),
            variables = light.len(),
            "built brand"
        );

        Self {
            name,
            info: definition.info.clone(),
            tokens,
            fonts,
            style_guide: definition.style_guide.clone(),
            aux: definition.aux.clone(),
            light,
            dark,
            duplicate_roles,
            diagnostics: collected.into_events(),
        }
    }

    /// Resolved map for one variant.
    #[must_use]
    pub const fn variables(&self, variant: Variant) -> &ResolvedVariableMap {
        match variant {
            Variant::Light => &self.light,
            Variant::Dark => &self.dark,
        }
    }

    /// Diagnostics produced while building, in order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of role claims ignored because another token got there first.
    #[must_use]
    pub const fn duplicate_role_count(&self) -> usize {
        self.duplicate_roles
    }

    /// Display name, falling back to the machine name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.info.name.trim().is_empty() {
            &self.name
        } else {
            self.info.name.trim()
        }
    }

    /// Whether any resolved value in either variant is a fallback.
    #[must_use]
    pub fn has_fallback(&self) -> bool {
        self.light.has_fallback() || self.dark.has_fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Ignore;
    use crate::font::FontRole;
    use crate::value::StyleValue;

    fn definition() -> BrandDefinition {
        BrandDefinition {
            info: BrandInfo { name: "Harbor Labs".into(), ..BrandInfo::default() },
            colors: vec![
                ColorDefinition::new("Ocean", "oklch(0.55 0.15 240)", "oklch(0.7 0.12 240)")
                    .color()
                    .roles(&["primary"]),
                ColorDefinition::new("Wave", "#38bdf8", "#0ea5e9").roles(&["primary"]),
            ],
            fonts: vec![FontDefinition::new("Inter", FontRole::Sans)],
            style_guide: StyleGuide {
                primary: Some(StyleValue::reference("Ocean")),
                ..StyleGuide::default()
            },
            aux: AuxValues::default(),
        }
    }

    #[test]
    fn builds_both_variants() {
        let brand = Brand::build(&definition(), &mut Ignore);
        assert_eq!(brand.name, "harbor-labs");
        assert_eq!(brand.display_name(), "Harbor Labs");
        assert_eq!(brand.tokens.len(), 2);
        assert_eq!(brand.fonts.len(), 1);
        assert_eq!(brand.variables(Variant::Light).get("primary").map(|v| v.to_css()), Some("var(--ocean)".into()));
        assert_eq!(brand.light.len(), brand.dark.len());
    }

    #[test]
    fn duplicates_reported_once_and_kept() {
        let mut sink = Collector::new();
        let brand = Brand::build(&definition(), &mut sink);
        assert_eq!(brand.duplicate_role_count(), 1);
        assert_eq!(sink.count("duplicate-role"), 1);
        assert_eq!(brand.diagnostics(), sink.events());
    }

    #[test]
    fn empty_definition_builds() {
        let brand = Brand::build(&BrandDefinition::default(), &mut Ignore);
        assert_eq!(brand.name, "untitled");
        assert!(brand.tokens.is_empty());
        assert!(brand.has_fallback());
    }

    #[test]
    fn partial_json_definition_loads() {
        let def: BrandDefinition = serde_json::from_str(
            r##"{
                "info": { "name": "Tiny" },
                "colors": [{ "name": "Ocean", "light": "#0ea5e9", "roles": ["primary"] }],
                "styleGuide": { "radius": "0.5rem" }
            }"##,
        )
        .unwrap();
        let brand = Brand::build(&def, &mut Ignore);
        assert_eq!(brand.light.get("primary").map(|v| v.to_css()), Some("var(--ocean)".into()));
        assert_eq!(brand.light.get("radius").map(|v| v.to_css()), Some("0.5rem".into()));
    }
}
