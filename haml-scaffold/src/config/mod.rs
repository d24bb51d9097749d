//! Configuration management for haml-scaffold
//!
//! Configuration is layered with figment, later sources overriding earlier
//! ones:
//!
//! 1. Hardcoded defaults
//! 2. `scaffold.toml` in the project root (or an explicit file)
//! 3. Environment variables (`HAML_SCAFFOLD_` prefix)
//!
//! Command-line flags are applied on top by the caller.
//!
//! # Example Configuration
//!
//! ```toml
//! # scaffold.toml
//! template_root = "lib/templates/haml_scaffold"
//! overwrite_existing = false
//! app_name = "Depot"
//! ```

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scaffold::inflect::Inflections;

/// Default location of the generator templates, relative to the project root
pub const DEFAULT_TEMPLATE_ROOT: &str = "vendor/plugins/haml_scaffold/generators/haml_scaffold/templates";

/// Name of the per-project configuration file
pub const CONFIG_FILE_NAME: &str = "scaffold.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "HAML_SCAFFOLD_";

/// Generator configuration
///
/// Replaces any reliance on the process working directory: every path the
/// planner and materializer touch is derived from these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Root of the application being scaffolded
    pub project_root: PathBuf,

    /// Directory holding the generator templates and static assets
    ///
    /// Relative paths are resolved against `project_root`.
    pub template_root: PathBuf,

    /// Overwrite rendered files that already exist with different content
    pub overwrite_existing: bool,

    /// Application name exposed to templates; derived from the project
    /// directory when unset
    pub app_name: Option<String>,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            template_root: PathBuf::from(DEFAULT_TEMPLATE_ROOT),
            overwrite_existing: false,
            app_name: None,
        }
    }
}

impl ScaffoldConfig {
    /// Create a default configuration rooted at `project_root`
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            ..Self::default()
        }
    }

    /// Load configuration for a project
    ///
    /// Reads `scaffold.toml` from the project root when present, then
    /// `HAML_SCAFFOLD_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Config`](crate::error::ScaffoldError::Config)
    /// if a source cannot be parsed.
    pub fn load_for_project(project_root: impl Into<PathBuf>) -> Result<Self> {
        let project_root = project_root.into();
        let file = project_root.join(CONFIG_FILE_NAME);
        Self::figment(Self::new(project_root), &file).extract().map_err(Into::into)
    }

    /// Load configuration from a specific file
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Config`](crate::error::ScaffoldError::Config)
    /// if a source cannot be parsed.
    pub fn load_from(project_root: impl Into<PathBuf>, path: &Path) -> Result<Self> {
        Self::figment(Self::new(project_root), path).extract().map_err(Into::into)
    }

    fn figment(defaults: Self, file: &Path) -> Figment {
        Figment::from(Serialized::defaults(defaults))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Absolute (or root-relative) template directory
    #[must_use]
    pub fn template_dir(&self) -> PathBuf {
        self.project_root.join(&self.template_root)
    }

    /// Application name handed to templates
    ///
    /// Falls back to the capitalized project directory name.
    #[must_use]
    pub fn app_name(&self) -> String {
        if let Some(name) = &self.app_name {
            return name.clone();
        }
        self.project_root
            .file_name()
            .map(|name| Inflections::capitalize(&name.to_string_lossy()))
            .unwrap_or_else(|| "App".to_string())
    }
}
