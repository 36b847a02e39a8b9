//! # n-tokens: design-token engine
//!
//! Turns a declarative brand (named colors, semantic role claims, a style
//! guide, typography and spacing literals) into resolved, cross-referenced
//! style variables and a stylesheet for a light and a dark variant.
//!
//! # Architecture
//!
//! ```text
//! BrandDefinition (brand file / preset / editor state)
//!     │
//!     ▼
//! token.rs:    ColorDefinition → ColorToken (names, values, roles, steps)
//!     │
//!     ▼
//! resolve.rs:  RoleIndex (first claim wins) + "Name:step" → var(--...)
//!     │
//!     ▼
//! guide.rs:    StyleGuide + AuxValues → ResolvedVariableMap per variant
//!     │
//!     ▼
//! brand.rs:    Brand (immutable aggregate)
//!     │
//!     ▼
//! emit.rs:     :root / .dark / @theme inline stylesheet text
//! export.rs:   CSS, JSON, utility-framework flavors
//! ```
//!
//! # Failure model
//!
//! The engine never panics and never returns `Err` for bad theme data.
//! Problems degrade to a visible default and a [`Diagnostic`] delivered to
//! the caller's [`DiagnosticSink`]. Only [`config`] (file I/O) can fail.

pub mod brand;
pub mod builtin;
pub mod config;
pub mod contrast;
pub mod diagnostics;
pub mod emit;
pub mod export;
pub mod font;
pub mod guide;
pub mod resolve;
pub mod role;
pub mod token;
pub mod value;

pub use brand::{Brand, BrandDefinition, BrandInfo};
pub use builtin::{builtin_brand, builtin_names};
pub use config::{LoadError, load_brand_file};
pub use contrast::{ContrastText, contrast_for, contrast_text};
pub use diagnostics::{Collector, Diagnostic, DiagnosticSink, Ignore, TracingSink};
pub use emit::render_stylesheet;
pub use export::{ExportFormat, export};
pub use font::{FontDefinition, FontRole, FontToken};
pub use guide::{AuxValues, ResolvedVariableMap, StyleGuide, compose, compose_variants};
pub use resolve::{ResolvedValue, RoleIndex, reference_css, resolve_reference};
pub use role::{Role, RoleInfo};
pub use token::{Category, ColorDefinition, ColorToken, Step, Variant, build_tokens};
pub use value::StyleValue;
