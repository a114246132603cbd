//! # Pagecraft CLI
//!
//! Headless host for the Pagecraft canvas engine.
//!
//! Loads documents saved by the browser editor, replays scripted editing
//! sessions and writes the generated page source.
//!
//! ## Usage
//!
//! ```bash
//! pagecraft generate page.json -o page.html
//! pagecraft --full-page --title "Deals" replay session.json --html page.html
//! pagecraft templates
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `CliConfig` - Resolved viewport, codegen options and command
//! - `script` - Scripted sessions replayed through `CanvasEngine`

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

pub mod script;

pub use script::{replay, ReplayReport, Script, ScriptStep};

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use pagecraft_core::{
    template::template, CanvasEngine, CodeGenerator, CodegenOptions, ComponentKind, Document,
    ViewportMode,
};

/// Command-line arguments for pagecraft.
#[derive(Debug, Clone, Parser)]
#[command(name = "pagecraft")]
#[command(about = "Pagecraft landing page builder")]
#[command(version)]
pub struct CliArgs {
    /// Preview width: wide, medium or narrow
    #[arg(long, env = "PAGECRAFT_VIEWPORT", default_value = "wide", global = true)]
    pub viewport: ViewportMode,

    /// Page title used with --full-page
    #[arg(long, env = "PAGECRAFT_TITLE", default_value = "Landing Page", global = true)]
    pub title: String,

    /// Wrap the output in a complete HTML document
    #[arg(long, global = true)]
    pub full_page: bool,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Generate page source from a saved document
    Generate {
        /// Document JSON file
        document: PathBuf,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replay a scripted editing session
    Replay {
        /// Script JSON file
        script: PathBuf,
        /// Starting document (empty if omitted)
        #[arg(long)]
        document: Option<PathBuf>,
        /// Where to save the resulting document (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also write the generated page source here
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// List the component palette
    Templates,
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// Preview width for replayed sessions.
    pub viewport: ViewportMode,
    /// Code generation options.
    pub codegen: CodegenOptions,
    /// Command to run.
    pub command: Command,
}

impl From<CliArgs> for CliConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            viewport: args.viewport,
            codegen: CodegenOptions {
                full_page: args.full_page,
                title: args.title,
            },
            command: args.command,
        }
    }
}

/// Read a document saved as JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid document.
pub fn load_document(path: &Path) -> anyhow::Result<Document> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read document {}", path.display()))?;
    Document::from_json(&json).with_context(|| format!("Invalid document {}", path.display()))
}

/// Write `contents` to `path`, or to stdout when no path is given.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_output(path: Option<&Path>, contents: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, contents)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => println!("{contents}"),
    }
    Ok(())
}

/// Render the component palette as a table.
#[must_use]
pub fn palette() -> String {
    let mut out = String::new();
    for kind in ComponentKind::ALL {
        let t = template(kind);
        let _ = writeln!(
            out,
            "{:<16} {:>5}x{:<4} {}",
            kind.name(),
            t.width,
            t.height,
            t.content.unwrap_or(t.placeholder)
        );
    }
    out
}

/// Run the configured command.
///
/// # Errors
///
/// Returns an error if an input file is missing or invalid, or an output
/// file cannot be written.
pub fn run(config: &CliConfig) -> anyhow::Result<()> {
    let generator = CodeGenerator::new(config.codegen.clone());

    match &config.command {
        Command::Generate { document, output } => {
            let doc = load_document(document)?;
            tracing::debug!("Generating source for {} components", doc.len());
            write_output(output.as_deref(), &generator.generate(&doc))
        }
        Command::Replay {
            script,
            document,
            output,
            html,
        } => {
            let json = std::fs::read_to_string(script)
                .with_context(|| format!("Failed to read script {}", script.display()))?;
            let script = Script::from_json(&json).context("Invalid script")?;

            let mut engine = match document {
                Some(path) => CanvasEngine::with_document(load_document(path)?),
                None => CanvasEngine::new(),
            };
            engine.set_viewport_mode(config.viewport);

            replay(&mut engine, &script);

            let offscreen = engine.offscreen_components();
            if !offscreen.is_empty() {
                tracing::warn!(
                    "{} components overflow the {} viewport",
                    offscreen.len(),
                    engine.viewport().mode()
                );
            }

            if let Some(path) = html {
                write_output(Some(path), &generator.generate(engine.document()))?;
            }
            let saved = engine
                .document()
                .to_json()
                .context("Failed to serialize document")?;
            write_output(output.as_deref(), &saved)
        }
        Command::Templates => {
            print!("{}", palette());
            Ok(())
        }
    }
}
