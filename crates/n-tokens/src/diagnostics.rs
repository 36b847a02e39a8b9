//! Diagnostics: structured warnings the engine reports instead of failing.
//!
//! Every recoverable problem (an unknown token name, a role claimed twice, a
//! color that doesn't parse) degrades to a safe visual default and emits one
//! [`Diagnostic`] into a caller-supplied [`DiagnosticSink`]. The engine never
//! logs on its own; the caller decides whether events are collected
//! ([`Collector`]), forwarded to `tracing` ([`TracingSink`]), or dropped
//! ([`Ignore`]).

use std::fmt;

use serde::Serialize;

use crate::role::Role;

/// One recoverable problem found while building or resolving a theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Diagnostic {
    /// An abstract reference names a token that doesn't exist.
    UnresolvedReference { theme: String, reference: String },

    /// A `Name:step` reference used a step name that isn't known.
    UnknownStep { theme: String, reference: String, step: String },

    /// A role was claimed by more than one token; `kept` wins.
    DuplicateRole { role: Role, kept: String, ignored: String },

    /// A font role was claimed by more than one font; `kept` wins.
    DuplicateFontRole { role: String, kept: String, ignored: String },

    /// Color text could not be parsed.
    UnparseableColor { context: String, value: String },

    /// A raw definition was missing or had a malformed field.
    MalformedDefinition { definition: String, detail: String },
}

impl Diagnostic {
    /// Short machine-readable kind, used as a structured log field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnresolvedReference { .. } => "unresolved-reference",
            Self::UnknownStep { .. } => "unknown-step",
            Self::DuplicateRole { .. } => "duplicate-role",
            Self::DuplicateFontRole { .. } => "duplicate-font-role",
            Self::UnparseableColor { .. } => "unparseable-color",
            Self::MalformedDefinition { .. } => "malformed-definition",
        }
    }

    /// Theme variant the event arose in, for resolution-time events.
    #[must_use]
    pub fn theme(&self) -> Option<&str> {
        match self {
            Self::UnresolvedReference { theme, .. } | Self::UnknownStep { theme, .. } => Some(theme),
            _ => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedReference { theme, reference } => {
                write!(f, "[{theme}] reference '{reference}' does not name a color token")
            }
            Self::UnknownStep { theme, reference, step } => write!(
                f,
                "[{theme}] reference '{reference}' uses unknown step '{step}', using base color"
            ),
            Self::DuplicateRole { role, kept, ignored } => write!(
                f,
                "role '{role}' claimed by both '{kept}' and '{ignored}', keeping '{kept}'"
            ),
            Self::DuplicateFontRole { role, kept, ignored } => write!(
                f,
                "font role '{role}' claimed by both '{kept}' and '{ignored}', keeping '{kept}'"
            ),
            Self::UnparseableColor { context, value } => {
                write!(f, "{context}: cannot parse color '{value}'")
            }
            Self::MalformedDefinition { definition, detail } => {
                write!(f, "definition '{definition}': {detail}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Receiver for engine diagnostics.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl<F: FnMut(Diagnostic)> DiagnosticSink for F {
    fn report(&mut self, diagnostic: Diagnostic) {
        self(diagnostic);
    }
}

/// Stores every diagnostic in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collector {
    events: Vec<Diagnostic>,
}

impl Collector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[Diagnostic] {
        &self.events
    }

    #[must_use]
    pub fn into_events(self) -> Vec<Diagnostic> {
        self.events
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of collected events of the given kind (see [`Diagnostic::kind`]).
    #[must_use]
    pub fn count(&self, kind: &str) -> usize {
        self.events.iter().filter(|d| d.kind() == kind).count()
    }
}

impl DiagnosticSink for Collector {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.events.push(diagnostic);
    }
}

/// Forwards each diagnostic to `tracing` at WARN level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(kind = diagnostic.kind(), theme = diagnostic.theme(), "{diagnostic}");
    }
}

/// Drops every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ignore;

impl DiagnosticSink for Ignore {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}
