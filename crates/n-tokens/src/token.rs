//! Color tokens: raw definitions in, fully derived tokens out.
//!
//! A [`ColorDefinition`] is what a theme author (or an editing UI) hands
//! over: loose text that may be half-typed. [`ColorToken::build`] turns it
//! into a [`ColorToken`] with a normalized name, a machine-safe variable
//! name, parsed light/dark values, influence-sorted roles and, for
//! `color`-category tokens, the four lightness steps. Building never fails;
//! gaps are filled with defaults and reported to the sink.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use n_color::Color;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::role::{self, Role};

/// Value used when neither variant of a definition has a usable color.
pub const MID_GRAY: Color = Color::oklch(0.5, 0.0, 0.0);

// ---------------------------------------------------------------------------
// Variant
// ---------------------------------------------------------------------------

/// Light or dark theme variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Light,
    Dark,
}

impl Variant {
    pub const BOTH: [Self; 2] = [Self::Light, Self::Dark];

    /// Selector that opens this variant's root block.
    #[must_use]
    pub const fn selector(self) -> &'static str {
        match self {
            Self::Light => ":root",
            Self::Dark => ".dark",
        }
    }
}

// ---------------------------------------------------------------------------
// Category and steps
// ---------------------------------------------------------------------------

/// Whether a token gets lightness steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Brand color: gets `bright`, `brighter`, `dark`, `darker`.
    Color,
    /// Foundation neutral: no steps.
    #[default]
    Shade,
}

impl Category {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "color" => Some(Self::Color),
            "shade" => Some(Self::Shade),
            _ => None,
        }
    }
}

/// A derived lightness step. `base` is not a step; it names the token itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Bright,
    Brighter,
    Dark,
    Darker,
}

impl Step {
    pub const ALL: [Self; 4] = [Self::Bright, Self::Brighter, Self::Dark, Self::Darker];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bright => "bright",
            Self::Brighter => "brighter",
            Self::Dark => "dark",
            Self::Darker => "darker",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    /// Blend partner and its share in percent.
    #[must_use]
    pub const fn blend(self) -> (&'static str, u8) {
        match self {
            Self::Bright => ("white", 8),
            Self::Brighter => ("white", 15),
            Self::Dark => ("black", 8),
            Self::Darker => ("black", 15),
        }
    }

    /// The `color-mix` expression deriving this step from `--<variable>`.
    #[must_use]
    pub fn expression(self, variable: &str) -> String {
        let (partner, share) = self.blend();
        let keep = 100 - share;
        format!("color-mix(in oklch, var(--{variable}) {keep}%, {partner} {share}%)")
    }

    /// Approximate the blended color, for contrast guesses on step values.
    #[must_use]
    pub fn apply(self, color: Color) -> Color {
        let (partner, share) = self.blend();
        let partner = if partner == "white" { Color::WHITE } else { Color::BLACK };
        color.mix(&partner, f32::from(share) / 100.0)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// ColorDefinition
// ---------------------------------------------------------------------------

/// Raw, author-supplied color definition. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorDefinition {
    pub name: String,
    pub light: Option<String>,
    pub dark: Option<String>,
    pub roles: Vec<String>,
    pub category: Option<String>,
    #[serde(alias = "on_color_light")]
    pub on_color_light: Option<String>,
    #[serde(alias = "on_color_dark")]
    pub on_color_dark: Option<String>,
}

impl ColorDefinition {
    /// A shade with the given light and dark values.
    #[must_use]
    pub fn new(name: &str, light: &str, dark: &str) -> Self {
        Self {
            name: name.to_string(),
            light: Some(light.to_string()),
            dark: Some(dark.to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn roles(mut self, roles: &[&str]) -> Self {
        self.roles = roles.iter().map(|r| (*r).to_string()).collect();
        self
    }

    /// Mark as a `color`-category token (gets steps).
    #[must_use]
    pub fn color(mut self) -> Self {
        self.category = Some("color".to_string());
        self
    }

    #[must_use]
    pub fn on_color(mut self, light: &str, dark: &str) -> Self {
        self.on_color_light = Some(light.to_string());
        self.on_color_dark = Some(dark.to_string());
        self
    }
}

// ---------------------------------------------------------------------------
// ColorToken
// ---------------------------------------------------------------------------

/// One named color and everything derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorToken {
    pub name: String,
    pub raw_name: String,
    pub variable_name: String,
    pub light_value: Color,
    pub dark_value: Color,
    pub roles: Vec<Role>,
    pub category: Category,
    pub light_steps: BTreeMap<Step, String>,
    pub dark_steps: BTreeMap<Step, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_color_light: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_color_dark: Option<Color>,
}

impl ColorToken {
    /// Build a token from a raw definition.
    ///
    /// `position` is the definition's 0-based index, used for the
    /// `Color <n>` placeholder when the name is empty.
    pub fn build(def: &ColorDefinition, position: usize, sink: &mut impl DiagnosticSink) -> Self {
        let mut name = normalize_name(&def.name);
        if name.is_empty() {
            name = format!("Color {}", position + 1);
            sink.report(Diagnostic::MalformedDefinition {
                definition: name.clone(),
                detail: "missing name, using placeholder".into(),
            });
        }

        let variable_name = safe_variable_name(&name, position, sink);

        let light = parse_field(&name, "light value", def.light.as_deref(), sink);
        let dark = parse_field(&name, "dark value", def.dark.as_deref(), sink);
        let (light_value, dark_value) = match (light, dark) {
            (Some(l), Some(d)) => (l, d),
            (Some(l), None) => (l, l),
            (None, Some(d)) => (d, d),
            (None, None) => {
                sink.report(Diagnostic::MalformedDefinition {
                    definition: name.clone(),
                    detail: "no usable light or dark value, using mid gray".into(),
                });
                (MID_GRAY, MID_GRAY)
            }
        };

        let mut claimed = Vec::with_capacity(def.roles.len());
        for text in &def.roles {
            match Role::from_name(text) {
                Some(role) => claimed.push(role),
                None => sink.report(Diagnostic::MalformedDefinition {
                    definition: name.clone(),
                    detail: format!("unknown role '{}' ignored", text.trim()),
                }),
            }
        }

        let category = match def.category.as_deref() {
            None => Category::Shade,
            Some(text) => Category::from_name(text).unwrap_or_else(|| {
                sink.report(Diagnostic::MalformedDefinition {
                    definition: name.clone(),
                    detail: format!("unknown category '{}', using shade", text.trim()),
                });
                Category::Shade
            }),
        };

        let steps = match category {
            Category::Color => Step::ALL
                .into_iter()
                .map(|s| (s, s.expression(&variable_name)))
                .collect(),
            Category::Shade => BTreeMap::new(),
        };

        Self {
            on_color_light: parse_field(&name, "light on-color", def.on_color_light.as_deref(), sink),
            on_color_dark: parse_field(&name, "dark on-color", def.on_color_dark.as_deref(), sink),
            raw_name: def.name.clone(),
            name,
            variable_name,
            light_value,
            dark_value,
            roles: role::sort_roles(&claimed),
            category,
            light_steps: steps.clone(),
            dark_steps: steps,
        }
    }

    #[must_use]
    pub const fn value(&self, variant: Variant) -> Color {
        match variant {
            Variant::Light => self.light_value,
            Variant::Dark => self.dark_value,
        }
    }

    #[must_use]
    pub const fn steps(&self, variant: Variant) -> &BTreeMap<Step, String> {
        match variant {
            Variant::Light => &self.light_steps,
            Variant::Dark => &self.dark_steps,
        }
    }

    #[must_use]
    pub const fn on_color(&self, variant: Variant) -> Option<Color> {
        match variant {
            Variant::Light => self.on_color_light,
            Variant::Dark => self.on_color_dark,
        }
    }

    #[inline]
    #[must_use]
    pub fn has_steps(&self) -> bool {
        self.category == Category::Color
    }

    #[must_use]
    pub fn claims(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Variable name of one of this token's steps (`ocean-bright`).
    #[must_use]
    pub fn step_variable(&self, step: Step) -> String {
        format!("{}-{step}", self.variable_name)
    }

    /// Every stylesheet variable this token declares: the base, then steps.
    pub fn variables(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(self.variable_name.clone())
            .chain(self.light_steps.keys().map(|&step| self.step_variable(step)))
    }

    /// Point the token, and its step expressions, at a new variable name.
    fn rename_variable(&mut self, variable: String) {
        for steps in [&mut self.light_steps, &mut self.dark_steps] {
            for (step, expression) in steps.iter_mut() {
                *expression = step.expression(&variable);
            }
        }
        self.variable_name = variable;
    }

    /// Whether `reference` names this token by display or raw name. The
    /// display-name comparison ignores whitespace differences.
    #[must_use]
    pub fn answers_to(&self, reference: &str) -> bool {
        self.raw_name == reference || self.name == normalize_name(reference)
    }
}

/// Build the theme's token collection in declaration order.
///
/// Variable names are unique across the collection: a token whose base or
/// step variables clash with an earlier token's gets a numeric suffix
/// (`ocean-2`) and a diagnostic.
pub fn build_tokens(defs: &[ColorDefinition], sink: &mut impl DiagnosticSink) -> Vec<ColorToken> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut tokens = Vec::with_capacity(defs.len());

    for (i, def) in defs.iter().enumerate() {
        let mut token = ColorToken::build(def, i, sink);
        let derived = token.variable_name.clone();
        let mut suffix = 1;
        while token.variables().any(|v| taken.contains(&v)) || (suffix > 1 && is_reserved(&token.variable_name)) {
            suffix += 1;
            token.rename_variable(format!("{derived}-{suffix}"));
        }
        if suffix > 1 {
            sink.report(Diagnostic::MalformedDefinition {
                definition: token.name.clone(),
                detail: format!("variable name '{derived}' already in use, using '{}'", token.variable_name),
            });
        }
        taken.extend(token.variables());
        tokens.push(token);
    }

    tokens
}

// ---------------------------------------------------------------------------
// Naming
// ---------------------------------------------------------------------------

/// Trim and collapse inner whitespace runs to one space.
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase, whitespace runs to `-`, anything outside `[a-z0-9-_]` dropped.
#[must_use]
pub fn variable_name(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            word.to_lowercase()
                .chars()
                .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '_')
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Names the stylesheet already uses for semantic variables.
pub(crate) fn is_reserved(variable: &str) -> bool {
    if matches!(variable, "radius" | "spacing" | crate::resolve::FALLBACK_VARIABLE) {
        return true;
    }
    let base = Step::ALL
        .iter()
        .find_map(|s| variable.strip_suffix(s.name()).and_then(|v| v.strip_suffix('-')))
        .unwrap_or(variable);
    Role::from_name(base).is_some_and(|r| r.name() == base)
}

/// Derive the variable name, steering clear of empty and reserved names.
fn safe_variable_name(name: &str, position: usize, sink: &mut impl DiagnosticSink) -> String {
    let derived = variable_name(name);
    if derived.is_empty() {
        return format!("color-{}", position + 1);
    }
    if is_reserved(&derived) {
        let renamed = format!("brand-{derived}");
        sink.report(Diagnostic::MalformedDefinition {
            definition: name.to_string(),
            detail: format!("variable name '{derived}' is reserved, using '{renamed}'"),
        });
        return renamed;
    }
    derived
}

fn parse_field(
    name: &str,
    field: &str,
    text: Option<&str>,
    sink: &mut impl DiagnosticSink,
) -> Option<Color> {
    let text = text?.trim();
    if text.is_empty() {
        return None;
    }
    let parsed = Color::parse_css(text);
    if parsed.is_none() {
        sink.report(Diagnostic::UnparseableColor {
            context: format!("{name} {field}"),
            value: text.to_string(),
        });
    }
    parsed
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Collector, Ignore};
    use proptest::prelude::*;

    fn build(def: &ColorDefinition) -> ColorToken {
        ColorToken::build(def, 0, &mut Ignore)
    }

    // ── Naming ───────────────────────────────────────────────────────────

    #[test]
    fn variable_name_rules() {
        assert_eq!(variable_name("Ocean"), "ocean");
        assert_eq!(variable_name("  Deep   Sea Blue "), "deep-sea-blue");
        assert_eq!(variable_name("Café Noir!"), "caf-noir");
        assert_eq!(variable_name("brand_red-2"), "brand_red-2");
        assert_eq!(variable_name("★"), "");
    }

    #[test]
    fn name_is_normalized_raw_name_kept() {
        let t = build(&ColorDefinition::new("  Deep \t Sea ", "#000", "#fff"));
        assert_eq!(t.name, "Deep Sea");
        assert_eq!(t.raw_name, "  Deep \t Sea ");
        assert_eq!(t.variable_name, "deep-sea");
    }

    #[test]
    fn empty_name_gets_placeholder() {
        let mut sink = Collector::new();
        let t = ColorToken::build(&ColorDefinition::new(" ", "#000", "#fff"), 2, &mut sink);
        assert_eq!(t.name, "Color 3");
        assert_eq!(t.variable_name, "color-3");
        assert_eq!(sink.count("malformed-definition"), 1);
    }

    #[test]
    fn reserved_variable_names_are_prefixed() {
        let mut sink = Collector::new();
        let t = ColorToken::build(&ColorDefinition::new("Primary", "#000", "#fff"), 0, &mut sink);
        assert_eq!(t.variable_name, "brand-primary");
        let t = ColorToken::build(&ColorDefinition::new("Ring Dark", "#000", "#fff"), 1, &mut sink);
        assert_eq!(t.variable_name, "brand-ring-dark");
        assert_eq!(sink.count("malformed-definition"), 2);

        let t = build(&ColorDefinition::new("Primary Blue", "#000", "#fff"));
        assert_eq!(t.variable_name, "primary-blue");
    }

    // ── Values ───────────────────────────────────────────────────────────

    #[test]
    fn values_are_parsed() {
        let t = build(&ColorDefinition::new("Ocean", "oklch(0.55 0.15 240)", "oklch(0.7 0.12 240)"));
        assert_eq!(t.light_value.to_css(), "oklch(0.55 0.15 240)");
        assert_eq!(t.dark_value.to_css(), "oklch(0.7 0.12 240)");
    }

    #[test]
    fn missing_variant_borrows_the_other() {
        let def = ColorDefinition {
            name: "Ink".into(),
            light: Some("#111111".into()),
            ..ColorDefinition::default()
        };
        let t = build(&def);
        assert_eq!(t.light_value, t.dark_value);
    }

    #[test]
    fn unusable_values_become_mid_gray() {
        let mut sink = Collector::new();
        let def = ColorDefinition {
            name: "Broken".into(),
            light: Some("not a color".into()),
            ..ColorDefinition::default()
        };
        let t = ColorToken::build(&def, 0, &mut sink);
        assert_eq!(t.light_value, MID_GRAY);
        assert_eq!(t.dark_value, MID_GRAY);
        assert_eq!(sink.count("unparseable-color"), 1);
        assert_eq!(sink.count("malformed-definition"), 1);
    }

    #[test]
    fn bad_on_color_is_absent() {
        let mut sink = Collector::new();
        let def = ColorDefinition::new("Ocean", "#000", "#fff").on_color("#fff", "nope");
        let t = ColorToken::build(&def, 0, &mut sink);
        assert!(t.on_color_light.is_some());
        assert!(t.on_color_dark.is_none());
        assert_eq!(sink.count("unparseable-color"), 1);
    }

    // ── Roles and category ───────────────────────────────────────────────

    #[test]
    fn roles_sorted_and_unknown_dropped() {
        let mut sink = Collector::new();
        let def = ColorDefinition::new("Ocean", "#000", "#fff").roles(&["ring", "tertiary", "primary"]);
        let t = ColorToken::build(&def, 0, &mut sink);
        assert_eq!(t.roles, vec![Role::Primary, Role::Ring]);
        assert_eq!(sink.count("malformed-definition"), 1);
    }

    #[test]
    fn category_defaults_to_shade() {
        let t = build(&ColorDefinition::new("Ink", "#000", "#fff"));
        assert_eq!(t.category, Category::Shade);
        assert!(t.light_steps.is_empty() && t.dark_steps.is_empty());

        let mut sink = Collector::new();
        let def = ColorDefinition {
            category: Some("sparkly".into()),
            ..ColorDefinition::new("Ink", "#000", "#fff")
        };
        let t = ColorToken::build(&def, 0, &mut sink);
        assert_eq!(t.category, Category::Shade);
        assert_eq!(sink.count("malformed-definition"), 1);
    }

    #[test]
    fn color_tokens_get_step_expressions() {
        let t = build(&ColorDefinition::new("Ocean", "#000", "#fff").color());
        assert_eq!(
            t.light_steps[&Step::Bright],
            "color-mix(in oklch, var(--ocean) 92%, white 8%)"
        );
        assert_eq!(
            t.light_steps[&Step::Brighter],
            "color-mix(in oklch, var(--ocean) 85%, white 15%)"
        );
        assert_eq!(t.dark_steps[&Step::Dark], "color-mix(in oklch, var(--ocean) 92%, black 8%)");
        assert_eq!(t.dark_steps[&Step::Darker], "color-mix(in oklch, var(--ocean) 85%, black 15%)");
        assert_eq!(t.step_variable(Step::Brighter), "ocean-brighter");
    }

    #[test]
    fn step_apply_moves_lightness() {
        let base = Color::oklch(0.5, 0.1, 200.0);
        assert!(Step::Bright.apply(base).l > base.l);
        assert!(Step::Brighter.apply(base).l > Step::Bright.apply(base).l);
        assert!(Step::Darker.apply(base).l < Step::Dark.apply(base).l);
    }

    #[test]
    fn build_tokens_keeps_declaration_order() {
        let defs = [
            ColorDefinition::new("B", "#000", "#fff"),
            ColorDefinition::new("A", "#000", "#fff"),
        ];
        let names: Vec<_> = build_tokens(&defs, &mut Ignore).into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["B", "A"]);
    }

    #[test]
    fn clashing_variable_names_get_suffixes() {
        let defs = [
            ColorDefinition::new("Ocean", "#000", "#fff").color(),
            ColorDefinition::new("ocean", "#111", "#eee").color(),
            ColorDefinition::new("Ocean!", "#222", "#ddd"),
            ColorDefinition::new("Ocean Bright", "#333", "#ccc"),
        ];
        let mut sink = Collector::new();
        let tokens = build_tokens(&defs, &mut sink);
        let variables: Vec<_> = tokens.iter().map(|t| t.variable_name.as_str()).collect();
        assert_eq!(variables, ["ocean", "ocean-2", "ocean-3", "ocean-bright-2"]);
        assert_eq!(tokens[1].light_steps[&Step::Bright], "color-mix(in oklch, var(--ocean-2) 92%, white 8%)");
        assert_eq!(tokens[1].dark_steps[&Step::Darker], "color-mix(in oklch, var(--ocean-2) 85%, black 15%)");
        assert_eq!(sink.count("malformed-definition"), 3);

        let all: Vec<String> = tokens.iter().flat_map(ColorToken::variables).collect();
        let unique: HashSet<&String> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn placeholder_names_do_not_clash() {
        let defs = [ColorDefinition::new("Color 2", "#000", "#fff"), ColorDefinition::new("★", "#000", "#fff")];
        let tokens = build_tokens(&defs, &mut Ignore);
        assert_eq!(tokens[0].variable_name, "color-2");
        assert_eq!(tokens[1].variable_name, "color-2-2");
    }

    #[test]
    fn definition_deserializes_partially() {
        let def: ColorDefinition = serde_json::from_str(r##"{ "name": "Ocean", "onColorLight": "#fff" }"##).unwrap();
        assert_eq!(def.name, "Ocean");
        assert_eq!(def.on_color_light.as_deref(), Some("#fff"));
        assert!(def.light.is_none() && def.roles.is_empty());
    }

    // ── Properties ───────────────────────────────────────────────────────

    proptest! {
        #[test]
        fn steps_are_complete_or_empty(name in "[A-Za-z ]{0,12}", is_color in any::<bool>()) {
            let mut def = ColorDefinition::new(&name, "#336699", "#99ccff");
            if is_color {
                def = def.color();
            }
            let t = build(&def);
            for steps in [&t.light_steps, &t.dark_steps] {
                if is_color {
                    prop_assert_eq!(steps.keys().copied().collect::<Vec<_>>(), Step::ALL.to_vec());
                } else {
                    prop_assert!(steps.is_empty());
                }
            }
        }

        #[test]
        fn variable_names_are_css_safe(name in "\\PC{0,24}") {
            let t = build(&ColorDefinition::new(&name, "#000", "#fff"));
            prop_assert!(!t.variable_name.is_empty());
            prop_assert!(t.variable_name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'));
        }
    }
}
