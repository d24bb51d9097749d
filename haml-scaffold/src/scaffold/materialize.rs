//! Executes a planned manifest against a project tree

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use once_cell::unsync::OnceCell;
use serde::Serialize;
use serde_json::Value;

use super::collisions::ClassIndex;
use super::linker::{LinkOutcome, StylesheetLinker};
use super::manifest::{CollisionPolicy, ManifestAction};
use super::routes::{RouteOutcome, RouteRegistrar, ROUTES_FILE};
use crate::config::ScaffoldConfig;
use crate::error::{Result, ScaffoldError};

/// Outcome of one executed action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    /// No collision found
    Checked,
    /// File or directory written for the first time
    Create,
    /// Directory already present
    Exists,
    /// Destination already had the same content
    Identical,
    /// Destination replaced
    Overwrite,
    /// Destination left untouched
    Skip,
    /// Line inserted into an existing file
    Insert,
    /// Line was already there
    AlreadyPresent,
    /// Route added
    Route,
    /// Left for the caller to run
    Deferred,
}

impl ActionStatus {
    /// Status word shown next to the path
    #[must_use]
    pub const fn word(self) -> &'static str {
        match self {
            Self::Checked => "check",
            Self::Create => "create",
            Self::Exists => "exists",
            Self::Identical => "identical",
            Self::Overwrite => "force",
            Self::Skip => "skip",
            Self::Insert => "insert",
            Self::AlreadyPresent => "present",
            Self::Route => "route",
            Self::Deferred => "deferred",
        }
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.word())
    }
}

/// Everything a run did, in order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    /// Executed actions with their outcome
    pub entries: Vec<(ManifestAction, ActionStatus)>,
    /// Dependent generators the caller still has to run
    pub deferred: Vec<ManifestAction>,
}

impl RunReport {
    /// Number of actions that ended with `status`
    #[must_use]
    pub fn count(&self, status: ActionStatus) -> usize {
        self.entries.iter().filter(|(_, s)| *s == status).count()
    }

    /// Status of the action writing `dest`, if any
    #[must_use]
    pub fn status_of(&self, dest: &Path) -> Option<ActionStatus> {
        self.entries
            .iter()
            .find(|(action, _)| action.destination() == Some(dest))
            .map(|(_, status)| *status)
    }
}

/// Applies manifest actions to the configured project root
pub struct Materializer {
    config: ScaffoldConfig,
    env: Environment<'static>,
    linker: StylesheetLinker,
    routes: RouteRegistrar,
}

impl fmt::Debug for Materializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Materializer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Materializer {
    /// Create a materializer for `config`
    #[must_use]
    pub fn new(config: ScaffoldConfig) -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);

        Self {
            config,
            env,
            linker: StylesheetLinker,
            routes: RouteRegistrar,
        }
    }

    /// Run every action in order, stopping at the first failure
    ///
    /// Files written before a failure stay on disk.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing action.
    pub fn run(&self, actions: &[ManifestAction]) -> Result<RunReport> {
        let mut report = RunReport::default();
        let classes: OnceCell<ClassIndex> = OnceCell::new();

        for action in actions {
            let status = match action {
                ManifestAction::CheckCollisions { class_names } => {
                    classes
                        .get_or_try_init(|| ClassIndex::scan(&self.config.project_root))?
                        .check(class_names)?;
                    ActionStatus::Checked
                }
                ManifestAction::CreateDirectory { path } => self.create_directory(path)?,
                ManifestAction::RenderTemplate {
                    template,
                    dest,
                    context,
                } => self.render_template(template, dest, context)?,
                ManifestAction::CopyStaticFile {
                    source,
                    dest,
                    collision,
                } => self.copy_static_file(source, dest, *collision)?,
                ManifestAction::InsertLine {
                    target,
                    anchor,
                    line,
                } => match self.linker.insert_line(&self.project_path(target), anchor, line)? {
                    LinkOutcome::Inserted { .. } => ActionStatus::Insert,
                    LinkOutcome::AlreadyLinked => ActionStatus::AlreadyPresent,
                },
                ManifestAction::RegisterRoute { resource } => {
                    let file = self.project_path(Path::new(ROUTES_FILE));
                    match self.routes.register(&file, resource)? {
                        RouteOutcome::Added => ActionStatus::Route,
                        RouteOutcome::AlreadyPresent => ActionStatus::AlreadyPresent,
                        RouteOutcome::MissingSentinel => ActionStatus::Skip,
                    }
                }
                ManifestAction::DeclareDependency { .. } => {
                    report.deferred.push(action.clone());
                    ActionStatus::Deferred
                }
            };

            tracing::info!(status = status.word(), action = action.verb(), "{action}");
            report.entries.push((action.clone(), status));
        }

        Ok(report)
    }

    fn project_path(&self, relative: &Path) -> PathBuf {
        self.config.project_root.join(relative)
    }

    fn create_directory(&self, relative: &Path) -> Result<ActionStatus> {
        let path = self.project_path(relative);
        if path.is_dir() {
            return Ok(ActionStatus::Exists);
        }
        fs::create_dir_all(&path).map_err(|e| ScaffoldError::io(&path, e))?;
        Ok(ActionStatus::Create)
    }

    fn render_template(&self, template: &str, dest: &Path, context: &Value) -> Result<ActionStatus> {
        let path = self.config.template_dir().join(template);
        let source = fs::read_to_string(&path).map_err(|e| ScaffoldError::io(&path, e))?;
        let rendered = self
            .env
            .render_str(&source, context)
            .map_err(|source| ScaffoldError::TemplateRender {
                template: template.to_string(),
                source,
            })?;

        let policy = if self.config.overwrite_existing {
            CollisionPolicy::Overwrite
        } else {
            CollisionPolicy::Skip
        };
        self.write_file(dest, rendered.as_bytes(), policy)
    }

    fn copy_static_file(
        &self,
        source: &str,
        dest: &Path,
        collision: CollisionPolicy,
    ) -> Result<ActionStatus> {
        let path = self.config.template_dir().join(source);
        let bytes = fs::read(&path).map_err(|e| ScaffoldError::io(&path, e))?;
        self.write_file(dest, &bytes, collision)
    }

    fn write_file(&self, relative: &Path, bytes: &[u8], policy: CollisionPolicy) -> Result<ActionStatus> {
        let path = self.project_path(relative);

        let status = if path.exists() {
            let existing = fs::read(&path).map_err(|e| ScaffoldError::io(&path, e))?;
            if existing == bytes {
                return Ok(ActionStatus::Identical);
            }
            match policy {
                CollisionPolicy::Skip => return Ok(ActionStatus::Skip),
                CollisionPolicy::Overwrite => ActionStatus::Overwrite,
            }
        } else {
            ActionStatus::Create
        };

        fs::write(&path, bytes).map_err(|e| ScaffoldError::io(&path, e))?;
        Ok(status)
    }
}
