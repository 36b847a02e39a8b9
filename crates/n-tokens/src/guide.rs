//! Style guide composition: semantic wiring to a flat variable map.
//!
//! A [`StyleGuide`] names which token fills each semantic group
//! (`primary -> "Ocean"`); [`AuxValues`] carry overrides and non-color
//! literals. [`compose`] turns both, plus the token collection, into one
//! [`ResolvedVariableMap`] per variant.
//!
//! # Fallback tiers
//!
//! ```text
//! group fill        guide value → role owner → neighbor → fallback
//! group foreground  on-color → role owner → contrast guess
//! chart-N           aux slot → role owner → primary/secondary/accent/…
//! sidebar-*         role owner → main-surface neighbor
//! ```
//!
//! Every variable the map emits has a value; nothing is left undefined.

use serde::{Deserialize, Serialize, Serializer};
use serde::ser::SerializeMap;

use crate::contrast::{ContrastText, contrast_for};
use crate::diagnostics::{Collector, Diagnostic, DiagnosticSink};
use crate::resolve::{ResolvedValue, RoleIndex, resolve_parts};
use crate::role::Role;
use crate::token::{ColorToken, Variant, is_reserved};
use crate::value::StyleValue;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Semantic group → token wiring, plus radius and spacing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleGuide {
    pub primary: Option<StyleValue>,
    pub secondary: Option<StyleValue>,
    pub accent: Option<StyleValue>,
    pub destructive: Option<StyleValue>,
    pub success: Option<StyleValue>,
    pub info: Option<StyleValue>,
    pub warning: Option<StyleValue>,
    pub card: Option<StyleValue>,
    pub popover: Option<StyleValue>,
    pub muted: Option<StyleValue>,
    pub input: Option<StyleValue>,
    pub border: Option<StyleValue>,
    pub ring: Option<StyleValue>,
    pub radius: Option<String>,
    pub spacing: Option<String>,
}

impl StyleGuide {
    /// Value declared for a style-guide group.
    #[must_use]
    pub const fn field(&self, role: Role) -> Option<&StyleValue> {
        match role {
            Role::Primary => self.primary.as_ref(),
            Role::Secondary => self.secondary.as_ref(),
            Role::Accent => self.accent.as_ref(),
            Role::Destructive => self.destructive.as_ref(),
            Role::Success => self.success.as_ref(),
            Role::Info => self.info.as_ref(),
            Role::Warning => self.warning.as_ref(),
            Role::Card => self.card.as_ref(),
            Role::Popover => self.popover.as_ref(),
            Role::Muted => self.muted.as_ref(),
            Role::Input => self.input.as_ref(),
            Role::Border => self.border.as_ref(),
            Role::Ring => self.ring.as_ref(),
            _ => None,
        }
    }
}

/// The groups a style guide can wire, in stylesheet alias order.
pub const GUIDE_GROUPS: [Role; 13] = [
    Role::Primary,
    Role::Secondary,
    Role::Accent,
    Role::Destructive,
    Role::Success,
    Role::Info,
    Role::Warning,
    Role::Card,
    Role::Popover,
    Role::Muted,
    Role::Input,
    Role::Border,
    Role::Ring,
];

/// A named literal (`shadow-sm = "0 1px 2px ..."`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedValue {
    pub name: String,
    pub value: String,
}

impl NamedValue {
    #[must_use]
    pub fn new(name: &str, value: &str) -> Self {
        Self { name: name.to_string(), value: value.to_string() }
    }
}

/// Overrides and literals that sit beside the style guide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuxValues {
    pub background: Option<StyleValue>,
    pub foreground: Option<StyleValue>,
    /// Chart slots in order; missing slots fall back.
    pub charts: Vec<StyleValue>,
    pub shadows: Vec<NamedValue>,
    pub borders: Vec<NamedValue>,
    pub radii: Vec<NamedValue>,
    pub extra: Vec<NamedValue>,
}

// ---------------------------------------------------------------------------
// ResolvedVariableMap
// ---------------------------------------------------------------------------

/// Whether a map entry is a color (re-exported as `--color-<name>`) or a
/// literal consumed directly (radius, spacing, shadows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Color,
    Literal,
}

/// One variable of a resolved map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    pub name: String,
    pub value: ResolvedValue,
    pub kind: EntryKind,
}

/// Insertion-ordered variable name → value map for one variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedVariableMap {
    entries: Vec<MapEntry>,
}

impl ResolvedVariableMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced entry keeps its original position.
    pub fn insert(&mut self, name: &str, value: ResolvedValue, kind: EntryKind) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            entry.value = value;
            entry.kind = kind;
        } else {
            self.entries.push(MapEntry { name: name.to_string(), value, kind });
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResolvedValue> {
        self.entries.iter().find(|e| e.name == name).map(|e| &e.value)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MapEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn has_fallback(&self) -> bool {
        self.entries.iter().any(|e| e.value.is_fallback())
    }
}

impl<'a> IntoIterator for &'a ResolvedVariableMap {
    type Item = &'a MapEntry;
    type IntoIter = std::slice::Iter<'a, MapEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Serialized as an ordered `{ name: css }` object.
impl Serialize for ResolvedVariableMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, &entry.value.to_css())?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Composer
// ---------------------------------------------------------------------------

/// Static background when nothing claims it.
const fn default_background(variant: Variant) -> &'static str {
    match variant {
        Variant::Light => "oklch(1 0 0)",
        Variant::Dark => "oklch(0.145 0 0)",
    }
}

/// Contrast text used when a fill has no computable color.
const fn default_text(variant: Variant) -> ContrastText {
    match variant {
        Variant::Light => ContrastText::NearBlack,
        Variant::Dark => ContrastText::NearWhite,
    }
}

/// Where a group's fill came from, which decides its foreground.
enum Source<'a> {
    /// A token: its on-color applies.
    Token(&'a ColorToken),
    /// Copied from a neighbor group: the neighbor's foreground applies.
    Neighbor(Role),
    /// Literal or fallback: guessed from the value.
    Value,
}

struct Composer<'t, 's, S: DiagnosticSink> {
    theme: &'t str,
    index: &'t RoleIndex<'t>,
    variant: Variant,
    sink: &'s mut S,
    map: ResolvedVariableMap,
}

impl<'t, S: DiagnosticSink> Composer<'t, '_, S> {
    fn tokens(&self) -> &'t [ColorToken] {
        self.index.tokens()
    }

    fn put(&mut self, role: Role, value: ResolvedValue) {
        self.map.insert(role.name(), value, EntryKind::Color);
    }

    fn value_of(&self, role: Role) -> ResolvedValue {
        self.map.get(role.name()).cloned().unwrap_or(ResolvedValue::Fallback)
    }

    /// Resolve a style value; `keep_step` is false for group fills.
    fn resolve(&mut self, value: &StyleValue, keep_step: bool) -> (ResolvedValue, Option<&'t ColorToken>) {
        match value {
            StyleValue::Literal(text) => (ResolvedValue::Literal(text.clone()), None),
            StyleValue::ColorRef { name, step } => {
                let step = if keep_step { step.as_deref() } else { None };
                let resolved = resolve_parts(name, step, self.tokens(), self.theme, self.sink);
                let token = match &resolved {
                    ResolvedValue::Token { variable, .. } => {
                        self.tokens().iter().find(|t| &t.variable_name == variable)
                    }
                    _ => None,
                };
                (resolved, token)
            }
        }
    }

    /// Contrast guess for a resolved fill.
    fn guess_text(&self, fill: &ResolvedValue) -> ResolvedValue {
        let side = fill
            .color_in(self.tokens(), self.variant)
            .map_or_else(|| default_text(self.variant), contrast_for);
        ResolvedValue::Literal(side.to_css().to_string())
    }

    // ── Base pair ────────────────────────────────────────────────────────

    fn base_pair(&mut self, aux: &AuxValues) {
        let background = if let Some(value) = &aux.background {
            self.resolve(value, true).0
        } else if let Some(token) = self.index.get(Role::Background) {
            ResolvedValue::token(token)
        } else {
            ResolvedValue::Literal(default_background(self.variant).to_string())
        };

        let foreground = if let Some(value) = &aux.foreground {
            self.resolve(value, true).0
        } else if let Some(token) = self.index.get(Role::Foreground) {
            ResolvedValue::token(token)
        } else {
            self.guess_text(&background)
        };

        self.put(Role::Background, background);
        self.put(Role::Foreground, foreground);
    }

    // ── Groups ───────────────────────────────────────────────────────────

    /// Fill for a group: guide value, role owner, then the neighbor.
    fn group_fill(&mut self, role: Role, guide: &StyleGuide, neighbor: Option<Role>) -> (ResolvedValue, Source<'t>) {
        if let Some(value) = guide.field(role) {
            let (resolved, token) = self.resolve(value, false);
            return (resolved, token.map_or(Source::Value, Source::Token));
        }
        if let Some(token) = self.index.get(role) {
            return (ResolvedValue::token(token), Source::Token(token));
        }
        if let Some(neighbor) = neighbor {
            return (self.value_of(neighbor), Source::Neighbor(neighbor));
        }
        self.sink.report(Diagnostic::UnresolvedReference {
            theme: self.theme.to_string(),
            reference: role.name().to_string(),
        });
        (ResolvedValue::Fallback, Source::Value)
    }

    /// Foreground for a group: on-color, role owner, then a guess.
    fn group_text(&self, role: Role, fill: &ResolvedValue, source: &Source<'t>) -> Option<ResolvedValue> {
        let fg_role = role.foreground()?;

        if let Source::Token(token) = source {
            if let Some(on) = token.on_color(self.variant) {
                return Some(ResolvedValue::color(on));
            }
        }
        if let Some(token) = self.index.get(fg_role) {
            return Some(ResolvedValue::token(token));
        }
        Some(match source {
            Source::Neighbor(neighbor) => neighbor
                .foreground()
                .map_or_else(|| self.guess_text(fill), |fg| self.value_of(fg)),
            Source::Value if fill.color_in(self.tokens(), self.variant).is_none() => {
                self.value_of(Role::Foreground)
            }
            _ => self.guess_text(fill),
        })
    }

    fn group(&mut self, role: Role, guide: &StyleGuide, neighbor: Option<Role>) {
        let (fill, source) = self.group_fill(role, guide, neighbor);
        let text = self.group_text(role, &fill, &source);
        self.put(role, fill);
        if let (Some(fg_role), Some(text)) = (role.foreground(), text) {
            self.put(fg_role, text);
        }
    }

    // ── Charts and sidebar ───────────────────────────────────────────────

    fn charts(&mut self, aux: &AuxValues) {
        const CYCLE: [Role; 5] = [Role::Primary, Role::Secondary, Role::Accent, Role::Destructive, Role::Muted];

        for (i, role) in Role::CHARTS.into_iter().enumerate() {
            let value = if let Some(slot) = aux.charts.get(i) {
                self.resolve(slot, true).0
            } else if let Some(token) = self.index.get(role) {
                ResolvedValue::token(token)
            } else {
                self.value_of(CYCLE[i % CYCLE.len()])
            };
            self.put(role, value);
        }
    }

    fn sidebar(&mut self) {
        const PAIRS: [(Role, Role); 8] = [
            (Role::Sidebar, Role::Card),
            (Role::SidebarForeground, Role::CardForeground),
            (Role::SidebarPrimary, Role::Primary),
            (Role::SidebarPrimaryForeground, Role::PrimaryForeground),
            (Role::SidebarAccent, Role::Accent),
            (Role::SidebarAccentForeground, Role::AccentForeground),
            (Role::SidebarBorder, Role::Border),
            (Role::SidebarRing, Role::Ring),
        ];

        for (role, neighbor) in PAIRS {
            let value = self
                .index
                .get(role)
                .map_or_else(|| self.value_of(neighbor), ResolvedValue::token);
            self.put(role, value);
        }
    }

    // ── Literals ─────────────────────────────────────────────────────────

    fn literals(&mut self, guide: &StyleGuide, aux: &AuxValues) {
        for (name, value) in [("radius", &guide.radius), ("spacing", &guide.spacing)] {
            if let Some(text) = value {
                self.map.insert(name, ResolvedValue::Literal(text.trim().to_string()), EntryKind::Literal);
            }
        }
        for list in [&aux.shadows, &aux.borders, &aux.radii, &aux.extra] {
            for NamedValue { name, value } in list {
                let name = name.trim();
                if name.is_empty() {
                    continue;
                }
                if let Some(problem) = self.literal_name_problem(name) {
                    self.sink.report(Diagnostic::MalformedDefinition {
                        definition: format!("aux value '{name}'"),
                        detail: format!("{problem}, skipped"),
                    });
                    continue;
                }
                self.map.insert(name, ResolvedValue::Literal(value.trim().to_string()), EntryKind::Literal);
            }
        }
    }

    /// Why an auxiliary literal can't be declared under `name`, if it can't.
    fn literal_name_problem(&self, name: &str) -> Option<&'static str> {
        let valid = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_';
        if !name.chars().all(valid) {
            Some("name may only use a-z, 0-9, '-' and '_'")
        } else if self.map.contains(name) || is_reserved(name) || name.starts_with("font-family-") {
            Some("name is already a stylesheet variable")
        } else if self.tokens().iter().any(|t| t.variables().any(|v| v == name)) {
            Some("name is already a color token variable")
        } else {
            None
        }
    }
}

/// Compose one variant's map from an existing role index.
///
/// Reports every problem it meets, so composing both variants this way
/// reports each one twice; [`compose_variants`] doesn't.
pub fn compose_with_index(
    theme: &str,
    index: &RoleIndex<'_>,
    guide: &StyleGuide,
    aux: &AuxValues,
    variant: Variant,
    sink: &mut impl DiagnosticSink,
) -> ResolvedVariableMap {
    let mut c = Composer {
        theme,
        index,
        variant,
        sink,
        map: ResolvedVariableMap::new(),
    };

    c.base_pair(aux);
    c.group(Role::Card, guide, Some(Role::Background));
    c.group(Role::Popover, guide, Some(Role::Background));
    for role in [Role::Primary, Role::Secondary, Role::Muted, Role::Accent, Role::Destructive] {
        c.group(role, guide, None);
    }
    for role in [Role::Success, Role::Info, Role::Warning] {
        if guide.field(role).is_some() {
            c.group(role, guide, None);
        }
    }
    c.group(Role::Border, guide, Some(Role::Muted));
    c.group(Role::Input, guide, Some(Role::Border));
    c.group(Role::Ring, guide, Some(Role::Primary));
    c.charts(aux);
    c.sidebar();
    c.literals(guide, aux);

    c.map
}

/// Compose the light and dark maps of one theme.
///
/// Reference and naming problems don't depend on the variant, so each is
/// reported once even though both variants run into it.
pub fn compose_variants(
    theme: &str,
    index: &RoleIndex<'_>,
    guide: &StyleGuide,
    aux: &AuxValues,
    sink: &mut impl DiagnosticSink,
) -> (ResolvedVariableMap, ResolvedVariableMap) {
    let mut light_events = Collector::new();
    let light = compose_with_index(theme, index, guide, aux, Variant::Light, &mut light_events);
    let mut dark_events = Collector::new();
    let dark = compose_with_index(theme, index, guide, aux, Variant::Dark, &mut dark_events);

    let light_events = light_events.into_events();
    let dark_only: Vec<_> = dark_events
        .into_events()
        .into_iter()
        .filter(|event| !light_events.contains(event))
        .collect();
    for event in light_events.into_iter().chain(dark_only) {
        sink.report(event);
    }

    (light, dark)
}

/// Compose one variant's resolved variable map.
pub fn compose(
    theme: &str,
    tokens: &[ColorToken],
    guide: &StyleGuide,
    aux: &AuxValues,
    variant: Variant,
    sink: &mut impl DiagnosticSink,
) -> ResolvedVariableMap {
    let index = RoleIndex::build(tokens, sink);
    compose_with_index(theme, &index, guide, aux, variant, sink)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
