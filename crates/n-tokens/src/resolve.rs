//! Reference resolution: human names to variable references.
//!
//! Theme authors refer to tokens by display name (`"Ocean"`, optionally
//! `"Ocean:bright"`). The resolver turns such a reference into a
//! [`ResolvedValue`] pointing at the token's variable or one of its step
//! variables. A reference that names no token becomes
//! [`ResolvedValue::Fallback`], rendered as `var(--broken-reference)`; the
//! stylesheet declares that variable whenever it is used, so no emitted
//! reference ever dangles.
//!
//! [`RoleIndex`] answers "which token fills this role?" with an explicit
//! first-claim-wins rule over declaration order.

use std::collections::BTreeMap;
use std::fmt;

use n_color::Color;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::role::Role;
use crate::token::{ColorToken, Step, Variant};
use crate::value::split_reference;

/// Variable every unresolved reference points at.
pub const FALLBACK_VARIABLE: &str = "broken-reference";

/// Value declared for [`FALLBACK_VARIABLE`]: loud magenta, hard to miss.
pub const FALLBACK_COLOR: Color = Color::oklch(0.65, 0.3, 328.0);

// ---------------------------------------------------------------------------
// ResolvedValue
// ---------------------------------------------------------------------------

/// Final value of one stylesheet variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedValue {
    /// CSS text emitted verbatim.
    Literal(String),
    /// Reference to a token variable or one of its steps.
    Token { variable: String, step: Option<Step> },
    /// Reference that could not be resolved.
    Fallback,
}

impl ResolvedValue {
    /// Base reference to a token.
    #[must_use]
    pub fn token(token: &ColorToken) -> Self {
        Self::Token {
            variable: token.variable_name.clone(),
            step: None,
        }
    }

    #[must_use]
    pub fn color(color: Color) -> Self {
        Self::Literal(color.to_css())
    }

    /// CSS text of this value.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Literal(text) => text.clone(),
            Self::Token { variable, step: None } => format!("var(--{variable})"),
            Self::Token { variable, step: Some(step) } => format!("var(--{variable}-{step})"),
            Self::Fallback => format!("var(--{FALLBACK_VARIABLE})"),
        }
    }

    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback)
    }

    /// The token this value points at, base references only.
    #[must_use]
    pub fn base_token<'a>(&self, tokens: &'a [ColorToken]) -> Option<&'a ColorToken> {
        match self {
            Self::Token { variable, step: None } => tokens.iter().find(|t| &t.variable_name == variable),
            _ => None,
        }
    }

    /// Best-effort concrete color for one variant, for contrast guesses.
    ///
    /// Step references are approximated with [`Step::apply`]; literals are
    /// parsed; fallbacks have no color.
    #[must_use]
    pub fn color_in(&self, tokens: &[ColorToken], variant: Variant) -> Option<Color> {
        match self {
            Self::Literal(text) => Color::parse_css(text),
            Self::Token { variable, step } => {
                let token = tokens.iter().find(|t| &t.variable_name == variable)?;
                let base = token.value(variant);
                Some(step.map_or(base, |s| s.apply(base)))
            }
            Self::Fallback => None,
        }
    }
}

impl fmt::Display for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// First token whose display or raw name equals `name`.
#[must_use]
pub fn find_token<'a>(tokens: &'a [ColorToken], name: &str) -> Option<&'a ColorToken> {
    tokens.iter().find(|t| t.answers_to(name))
}

/// Resolve a name and optional step.
///
/// A missing or `base` step gives the base reference; an unknown step is
/// reported and also gives the base reference. Steps on `shade` tokens are
/// unknown, since shades have no step variables.
pub fn resolve_parts(
    name: &str,
    step: Option<&str>,
    tokens: &[ColorToken],
    theme: &str,
    sink: &mut impl DiagnosticSink,
) -> ResolvedValue {
    let Some(token) = find_token(tokens, name) else {
        sink.report(Diagnostic::UnresolvedReference {
            theme: theme.to_string(),
            reference: reference_text(name, step),
        });
        return ResolvedValue::Fallback;
    };

    let step = match step {
        None | Some("base") => None,
        Some(text) => match Step::from_name(text).filter(|_| token.has_steps()) {
            Some(step) => Some(step),
            None => {
                sink.report(Diagnostic::UnknownStep {
                    theme: theme.to_string(),
                    reference: reference_text(name, Some(text)),
                    step: text.to_string(),
                });
                None
            }
        },
    };

    ResolvedValue::Token {
        variable: token.variable_name.clone(),
        step,
    }
}

/// Resolve `Name` or `Name:step` against the token collection.
pub fn resolve_reference(
    reference: &str,
    tokens: &[ColorToken],
    theme: &str,
    sink: &mut impl DiagnosticSink,
) -> ResolvedValue {
    let (name, step) = split_reference(reference);
    resolve_parts(name, step, tokens, theme, sink)
}

/// [`resolve_reference`] rendered straight to CSS text.
pub fn reference_css(
    reference: &str,
    tokens: &[ColorToken],
    theme: &str,
    sink: &mut impl DiagnosticSink,
) -> String {
    resolve_reference(reference, tokens, theme, sink).to_css()
}

fn reference_text(name: &str, step: Option<&str>) -> String {
    step.map_or_else(|| name.to_string(), |s| format!("{name}:{s}"))
}

// ---------------------------------------------------------------------------
// RoleIndex
// ---------------------------------------------------------------------------

/// Role → token map. The first token (in declaration order) that claims a
/// role owns it; every later claim is counted and reported.
#[derive(Debug, Clone)]
pub struct RoleIndex<'a> {
    tokens: &'a [ColorToken],
    owners: BTreeMap<Role, usize>,
    duplicates: usize,
}

impl<'a> RoleIndex<'a> {
    pub fn build(tokens: &'a [ColorToken], sink: &mut impl DiagnosticSink) -> Self {
        let mut owners = BTreeMap::new();
        let mut duplicates = 0;

        for (i, token) in tokens.iter().enumerate() {
            for &role in &token.roles {
                match owners.get(&role) {
                    None => {
                        owners.insert(role, i);
                    }
                    Some(&owner) => {
                        duplicates += 1;
                        sink.report(Diagnostic::DuplicateRole {
                            role,
                            kept: tokens[owner].name.clone(),
                            ignored: token.name.clone(),
                        });
                    }
                }
            }
        }

        Self { tokens, owners, duplicates }
    }

    /// Token owning `role`, if any.
    #[must_use]
    pub fn get(&self, role: Role) -> Option<&'a ColorToken> {
        self.owners.get(&role).map(|&i| &self.tokens[i])
    }

    #[must_use]
    pub const fn tokens(&self) -> &'a [ColorToken] {
        self.tokens
    }

    /// Number of ignored claims.
    #[must_use]
    pub const fn duplicate_count(&self) -> usize {
        self.duplicates
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
