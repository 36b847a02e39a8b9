//! Brand files: loading [`BrandDefinition`]s from TOML or JSON on disk.
//!
//! The only fallible part of the crate. Everything past deserialization is
//! handled by the engine's diagnostics, so a file that parses always builds.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::brand::BrandDefinition;

/// Error returned when a brand file cannot be read or parsed.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid JSON in {}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} is not a brand file (expected .toml or .json)", path.display())]
    UnsupportedExtension { path: PathBuf },
}

/// Brand file syntax, picked by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Toml,
    Json,
}

impl FileFormat {
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse brand text in the given syntax. `path` is only used for errors.
///
/// # Errors
///
/// [`LoadError::Toml`] or [`LoadError::Json`] when the text does not match
/// the brand schema.
pub fn parse_brand(text: &str, format: FileFormat, path: &Path) -> Result<BrandDefinition, LoadError> {
    match format {
        FileFormat::Toml => toml::from_str(text).map_err(|source| LoadError::Toml {
            path: path.to_path_buf(),
            source,
        }),
        FileFormat::Json => serde_json::from_str(text).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Read and parse a `.toml` or `.json` brand file.
///
/// # Errors
///
/// Fails on an unknown extension, an unreadable file, or a parse error.
pub fn load_brand_file(path: impl AsRef<Path>) -> Result<BrandDefinition, LoadError> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedExtension {
        path: path.to_path_buf(),
    })?;
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let definition = parse_brand(&text, format, path)?;
    tracing::debug!(path = %path.display(), colors = definition.colors.len(), "loaded brand file");
    Ok(definition)
}
