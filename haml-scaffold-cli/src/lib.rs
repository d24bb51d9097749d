//! haml-scaffold CLI library

#![forbid(unsafe_code)]

pub mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use haml_scaffold::config::ScaffoldConfig;
use haml_scaffold::scaffold::GenerationOptions;

pub use commands::ScaffoldCommand;

/// Generate a Haml/Sass scaffold for a resource
#[derive(Debug, Parser)]
#[command(name = "haml-scaffold")]
#[command(version)]
#[command(about = "Scaffold a resource with Haml views and Sass stylesheets", long_about = None)]
pub struct Cli {
    /// Resource name, optionally namespaced (e.g., `post`, `admin/post`)
    pub name: String,

    /// Model attributes passed on to the model generator (e.g., `title:string`)
    pub fields: Vec<String>,

    /// Don't add timestamps to the model
    #[arg(long)]
    pub skip_timestamps: bool,

    /// Don't generate a migration for the model
    #[arg(long)]
    pub skip_migration: bool,

    /// Also generate the application layout, Blueprint, jQuery UI themes and javascripts
    #[arg(long)]
    pub layout: bool,

    /// Use ERB views and CSS stylesheets instead of Haml and Sass
    #[arg(long)]
    pub erb: bool,

    /// Print the planned actions without touching the project
    #[arg(short, long)]
    pub pretend: bool,

    /// Overwrite generated files and shared layout assets that differ from the templates
    #[arg(short, long)]
    pub force: bool,

    /// Project root
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Template directory (overrides the configured `template_root`)
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Configuration file (defaults to `scaffold.toml` in the project root)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Generation options selected by the flags
    #[must_use]
    pub fn options(&self) -> GenerationOptions {
        GenerationOptions {
            skip_timestamps: self.skip_timestamps,
            skip_migration: self.skip_migration,
            layout: self.layout,
            use_alternate_template_syntax: self.erb,
            field_args: self.fields.clone(),
        }
    }

    /// Load the layered configuration and apply command-line overrides
    pub fn load_config(&self) -> Result<ScaffoldConfig> {
        let mut config = match &self.config {
            Some(path) => ScaffoldConfig::load_from(&self.root, path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
            None => ScaffoldConfig::load_for_project(&self.root)
                .context("Failed to load project configuration")?,
        };

        if let Some(templates) = &self.templates {
            config.template_root.clone_from(templates);
        }
        if self.force {
            config.overwrite_existing = true;
        }
        Ok(config)
    }
}
