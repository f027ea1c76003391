//! Command-line interface for dotenver.
//!
//! ```text
//! dotenver [OPTIONS] <FILE>...
//! dotenver [OPTIONS] --recursive [--pattern <GLOB>]
//! ```
//!
//! Every template renders to the `.env` next to it. Existing values are kept
//! and missing variables are added, unless `--override` is given.
//!
//! # Exit status
//!
//! - `0` - every template was written, or `--recursive` found nothing
//! - `1` - a template path was invalid, or any template failed
//! - `2` - invalid command-line arguments

pub mod validate;


use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::core::DotenverError;
use crate::discovery::PatternMatcher;
use crate::dotenv::dotenv_path;
use crate::generators::{FakerGenerator, ValueGenerator};
use crate::output::OutputWriter;
use crate::templating::{BatchRenderer, LineMatcher, TemplateSource};

/// Settings derived from global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,

    /// Suppress per-file success messages
    pub quiet: bool,

    /// Configuration file given with `--config`
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// `RUST_LOG` takes precedence over the level chosen by flags.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("dotenver={}", self.log_level)));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "dotenver",
    about = "Render dotenver templates as .env files",
    version,
    long_about = "Render dotenver templates as .env files.\n\n\
        By default values in existing .env files are respected, and missing variables are added."
)]
#[command(group(ArgGroup::new("input").required(true).args(["files", "recursive"])))]
pub struct Cli {
    /// Template files to render
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Process every template found below the working directory
    #[arg(short, long)]
    recursive: bool,

    /// Glob used by --recursive (default from config: **/.env.example); invalid with FILE
    #[arg(long, value_name = "GLOB", conflicts_with = "files")]
    pattern: Option<String>,

    /// Ignore existing .env files and regenerate them from the templates
    #[arg(short = 'o', long = "override")]
    override_existing: bool,

    /// Path to a configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Run the command with settings derived from the flags.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(&config)
    }

    /// Derive [`CliConfig`] from the global flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: log_level.to_string(),
            quiet: self.quiet,
            config_path: self.config.clone(),
        }
    }

    /// Render the selected templates with a configuration already applied.
    pub fn execute_with_config(self, cli_config: &CliConfig) -> Result<()> {
        let settings = Config::load(cli_config.config_path.as_deref())?;
        debug!("Using configuration: {settings:?}");

        let templates = if self.recursive {
            let pattern = self.pattern.as_deref().unwrap_or(&settings.recursive_pattern);
            let templates = discover(pattern, &settings)?;
            if templates.is_empty() {
                eprintln!("{}", format!("No \"{pattern}\" files found").red());
                return Ok(());
            }
            templates
        } else {
            self.files
        };

        for template in &templates {
            validate::check_template_path(template, &settings.template_suffixes)?;
        }

        render(&templates, self.override_existing, cli_config.quiet, &settings)
    }
}

fn discover(pattern: &str, settings: &Config) -> Result<Vec<PathBuf>> {
    let matcher = PatternMatcher::new(pattern)
        .map_err(|error| DotenverError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: format!("{error:#}"),
        })?
        .with_exclude_dirs(&settings.exclude_dirs);

    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    matcher.find_matches(&cwd)
}

/// Render `templates` as one batch and write the results.
///
/// Every template is attempted; the error reports how many failed.
pub fn render(
    templates: &[PathBuf],
    override_existing: bool,
    quiet: bool,
    settings: &Config,
) -> Result<()> {
    let generator: Arc<dyn ValueGenerator> = Arc::new(FakerGenerator::new());
    let renderer = BatchRenderer::new(LineMatcher::new()?, generator);

    info!("Rendering {} template(s)", templates.len());
    let sources = templates
        .iter()
        .map(|template| {
            TemplateSource::load(
                template,
                dotenv_path(template, &settings.template_suffixes),
                override_existing,
                renderer.matcher(),
            )
        })
        .collect();

    let summary = OutputWriter::new(quiet).write_all(renderer.render_batch(sources));
    if summary.is_success() {
        Ok(())
    } else {
        Err(DotenverError::BatchFailed {
            failed: summary.failed.len(),
            total: summary.total(),
        }
        .into())
    }
}
