// SPDX-License-Identifier: MIT
//
// n-brand: render brand themes to stylesheets.
//
// This is the command-line front end over the two library crates:
//
//   n-color  → OKLCH color values, CSS parsing, contrast ratios
//   n-tokens → tokens, role index, style-guide composition, emitters
//
// Every subcommand ends in the same place: a `Brand` built once from a
// preset or a brand file, then projected into text.
//
//   list                          → preset names
//   render [PRESET | --file PATH] → css / json / tailwind on stdout or --output
//   check PATH                    → diagnostics + contrast table, exit 1 on problems

use std::fmt::{self, Write as _};
use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use n_color::contrast_ratio;
use n_tokens::{Brand, Collector, Diagnostic, ExportFormat, TracingSink, Variant, builtin_brand, builtin_names, contrast_for, export};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "N_BRAND_LOG";

/// WCAG AA threshold for body text.
const AA_RATIO: f64 = 4.5;

// ─── Arguments ──────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about = "Design-token engine: brand themes to stylesheets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the builtin preset brands
    List,
    /// Render a preset or a brand file
    Render {
        /// Preset name (defaults to "default")
        #[arg(conflicts_with = "file")]
        preset: Option<String>,
        /// Brand file (.toml or .json) instead of a preset
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Output format: css, json or tailwind
        #[arg(long, default_value_t = ExportFormat::Css)]
        format: ExportFormat,
        /// Output path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Build a brand file and report every problem found
    Check {
        /// Brand file (.toml or .json)
        path: PathBuf,
    },
}

// ─── Commands ───────────────────────────────────────────────────────────────

fn load_preset(name: &str) -> Result<Brand> {
    match builtin_brand(name) {
        Some(brand) => Ok(brand),
        None => bail!("unknown preset '{name}' (available: {})", builtin_names().join(", ")),
    }
}

fn load_file(path: &Path) -> Result<Brand> {
    let definition = n_tokens::load_brand_file(path)?;
    Ok(Brand::build(&definition, &mut TracingSink))
}

fn render(preset: Option<&str>, file: Option<&Path>, format: ExportFormat, output: Option<&Path>) -> Result<()> {
    let brand = match file {
        Some(path) => load_file(path)?,
        None => load_preset(preset.unwrap_or("default"))?,
    };
    let text = export(&brand, format);

    match output {
        Some(path) => {
            fs::write(path, &text).with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(brand = %brand.name, %format, path = %path.display(), "wrote theme");
        }
        None => io::stdout().lock().write_all(text.as_bytes()).context("failed to write to stdout")?,
    }
    Ok(())
}

/// One row per token: light and dark fill against its contrast text.
fn write_contrast_report(out: &mut String, brand: &Brand) -> fmt::Result {
    for token in &brand.tokens {
        write!(out, "  {:<20}", token.name)?;
        for variant in Variant::BOTH {
            let fill = token.value(variant);
            let text = token.on_color(variant).unwrap_or_else(|| contrast_for(fill).color());
            let ratio = contrast_ratio(fill, text);
            let flag = if ratio < AA_RATIO { " !" } else { "" };
            write!(out, "  {variant:?} {ratio:>5.2}{flag:<2}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_check_report(out: &mut String, brand: &Brand, diagnostics: &[Diagnostic]) -> fmt::Result {
    writeln!(out, "{} ({} colors, {} fonts)", brand.display_name(), brand.tokens.len(), brand.fonts.len())?;
    for diagnostic in diagnostics {
        writeln!(out, "  {:<22} {diagnostic}", diagnostic.kind())?;
    }
    writeln!(out, "contrast (AA = {AA_RATIO}):")?;
    write_contrast_report(out, brand)
}

/// Build a brand file and describe what went wrong. The flag is `true` when
/// no diagnostics were raised.
fn check(path: &Path) -> Result<(bool, String)> {
    let definition = n_tokens::load_brand_file(path)?;
    let mut sink = Collector::new();
    let brand = Brand::build(&definition, &mut sink);

    let mut out = String::new();
    write_check_report(&mut out, &brand, sink.events()).context("failed to format report")?;

    Ok((sink.is_empty(), out))
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::List => {
            for name in builtin_names() {
                println!("{name}");
            }
        }
        Command::Render { preset, file, format, output } => {
            render(preset.as_deref(), file.as_deref(), format, output.as_deref())?;
        }
        Command::Check { path } => {
            let (clean, report) = check(&path)?;
            print!("{report}");
            if !clean {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
