//! Style values: literal CSS or a reference to a color token.
//!
//! Style-guide fields arrive as plain strings in brand files. They are
//! classified exactly once, when the file is deserialized, into a
//! [`StyleValue`]; the composer only ever matches on the tag.
//!
//! Classification: text is a literal when it starts with `var(`, `#` or a
//! number, contains a function call, a number with a CSS unit, or one of
//! the CSS keywords theme authors use for borders and shadows. Everything
//! else is a token name, optionally suffixed with `:step`. Callers that
//! know better can skip the heuristic with the explicit `{ literal = ... }`
//! or `{ ref = ... }` table forms.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

static LITERAL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^\s*(?:var\(|#|[-+.]?\d)",
        r"|[a-z-]+\(",
        r"|\d(?:%|(?:px|rem|em|vh|vw|vmin|vmax|ch|ex|pt|s|ms|deg|fr)\b)",
        r"|\b(?:solid|dashed|dotted|double|none|inherit|initial|unset|transparent|currentcolor)\b",
    ))
    .ok()
});

/// A style-guide value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleValue {
    /// CSS text emitted verbatim.
    Literal(String),
    /// A token name, optionally with a step (`Ocean:bright`).
    ColorRef { name: String, step: Option<String> },
}

impl StyleValue {
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Parse a `Name` or `Name:step` reference without classifying.
    #[must_use]
    pub fn reference(text: &str) -> Self {
        let (name, step) = split_reference(text);
        Self::ColorRef {
            name: name.to_string(),
            step: step.map(str::to_string),
        }
    }

    /// Classify free text as a literal or a reference.
    #[must_use]
    pub fn classify(text: &str) -> Self {
        if LITERAL.as_ref().is_some_and(|re| re.is_match(text)) {
            Self::Literal(text.trim().to_string())
        } else {
            Self::reference(text)
        }
    }

    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

/// Split on the first `:`, trimming both sides. An empty step is absent.
#[must_use]
pub fn split_reference(text: &str) -> (&str, Option<&str>) {
    match text.split_once(':') {
        Some((name, step)) => {
            let step = step.trim();
            (name.trim(), (!step.is_empty()).then_some(step))
        }
        None => (text.trim(), None),
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::ColorRef { name, step: None } => f.write_str(name),
            Self::ColorRef { name, step: Some(step) } => write!(f, "{name}:{step}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Tagged(Tagged),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Tagged {
    Literal(String),
    Ref(String),
}

impl<'de> Deserialize<'de> for StyleValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawValue::deserialize(deserializer)? {
            RawValue::Text(text) => Self::classify(&text),
            RawValue::Tagged(Tagged::Literal(text)) => Self::Literal(text),
            RawValue::Tagged(Tagged::Ref(text)) => Self::reference(&text),
        })
    }
}

impl Serialize for StyleValue {
    /// Plain text when reclassifying it gives the same value, the tagged
    /// form otherwise.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text = self.to_string();
        if Self::classify(&text) == *self {
            serializer.serialize_str(&text)
        } else if self.is_literal() {
            Tagged::Literal(text).serialize(serializer)
        } else {
            Tagged::Ref(text).serialize(serializer)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn is_literal(text: &str) -> bool {
        StyleValue::classify(text).is_literal()
    }

    #[test]
    fn literals() {
        for text in [
            "var(--ocean)",
            "#0ea5e9",
            "0.5rem",
            "1px solid",
            "oklch(0.5 0.1 200)",
            "0 1px 2px 0 rgb(0 0 0 / 0.05)",
            "none",
            "calc(100% - 2px)",
            "12",
            "transparent",
        ] {
            assert!(is_literal(text), "{text} should be literal");
        }
    }

    #[test]
    fn references() {
        assert_eq!(
            StyleValue::classify("Ocean"),
            StyleValue::ColorRef { name: "Ocean".into(), step: None }
        );
        assert_eq!(
            StyleValue::classify(" Deep Sea : bright "),
            StyleValue::ColorRef { name: "Deep Sea".into(), step: Some("bright".into()) }
        );
        assert!(!is_literal("Chart Blue 2"));
        assert!(!is_literal("Midnight Blue"));
        assert!(is_literal("Blue 50%"));
    }

    #[test]
    fn empty_step_is_absent() {
        assert_eq!(split_reference("Ocean:"), ("Ocean", None));
        assert_eq!(split_reference("Ocean:base:extra"), ("Ocean", Some("base:extra")));
    }

    #[test]
    fn deserializes_plain_and_tagged() {
        #[derive(Deserialize)]
        struct Doc {
            a: StyleValue,
            b: StyleValue,
            c: StyleValue,
        }
        let doc: Doc = toml::from_str(
            r#"
            a = "Ocean:dark"
            b = { literal = "Midnight Blue" }
            c = { ref = "12 Monkeys" }
            "#,
        )
        .unwrap();
        assert_eq!(doc.a, StyleValue::ColorRef { name: "Ocean".into(), step: Some("dark".into()) });
        assert_eq!(doc.b, StyleValue::literal("Midnight Blue"));
        assert_eq!(doc.c, StyleValue::ColorRef { name: "12 Monkeys".into(), step: None });
    }

    #[test]
    fn serializes_unambiguously() {
        let plain = serde_json::to_string(&StyleValue::reference("Ocean:bright")).unwrap();
        assert_eq!(plain, "\"Ocean:bright\"");
        let tagged = serde_json::to_string(&StyleValue::literal("Midnight Blue")).unwrap();
        assert_eq!(tagged, r#"{"literal":"Midnight Blue"}"#);
        let back: StyleValue = serde_json::from_str(&tagged).unwrap();
        assert_eq!(back, StyleValue::literal("Midnight Blue"));
    }
}
