//! Scaffold manifest planning
//!
//! The planner turns a [`ResourceName`] and [`GenerationOptions`] into the
//! ordered list of [`ManifestAction`]s that a materializer executes. Later
//! actions assume earlier ones succeeded, so the order is part of the
//! contract:
//!
//! 1. Class collision checks
//! 2. Directories
//! 3. Views and partials
//! 4. Layout, theme and javascript bundle (`--layout` only)
//! 5. Resource stylesheet
//! 6. Stylesheet reference in the shared includes partial
//! 7. Controller, functional test and helper
//! 8. Route
//! 9. Companion model generator

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{json, Value};

use super::family::TemplateFamily;
use super::inflect::Inflections;
use super::linker::STYLESHEET_ANCHOR;
use super::lister::{FileLister, FsLister};
use super::names::ResourceName;
use crate::config::ScaffoldConfig;
use crate::error::Result;

/// Views rendered for every resource
pub const SCAFFOLD_VIEWS: [&str; 4] = ["index", "show", "new", "edit"];

/// jQuery UI themes shipped with `--layout`
pub const UI_THEMES: [&str; 4] = ["black-tie", "cupertino", "smoothness", "vader"];

/// Stylesheet file inside each jQuery UI theme directory
pub const UI_THEME_STYLESHEET: &str = "jquery-ui-1.7.2.custom.css";

/// Blueprint CSS sources and their destination names
pub const BLUEPRINT_FILES: [(&str, &str); 3] = [
    ("ie.css", "ie.css"),
    ("print.css", "print.css"),
    ("screen.css", "blueprint.css"),
];

/// Javascript assets shipped with `--layout`
pub const JAVASCRIPTS: [&str; 3] = [
    "jquery-1.3.2.min.js",
    "jquery-ui-1.7.2.custom.min.js",
    "application.js",
];

/// Extensions treated as theme images
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "gif", "jpg", "jpeg"];

/// Name of the generator the scaffold depends on
pub const MODEL_GENERATOR: &str = "model";

/// What to do when a copy destination already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Replace the existing file
    Overwrite,
    /// Keep the existing file untouched
    Skip,
}

/// Options parsed from the command line
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationOptions {
    /// Suppress timestamp columns in the model generator
    pub skip_timestamps: bool,
    /// Suppress the migration in the model generator
    pub skip_migration: bool,
    /// Emit the layout, theme and javascript bundle
    pub layout: bool,
    /// Use ERB/CSS instead of Haml/Sass
    pub use_alternate_template_syntax: bool,
    /// `field:type` arguments, forwarded verbatim to the model generator
    pub field_args: Vec<String>,
}

impl GenerationOptions {
    /// Template family selected by these options
    #[must_use]
    pub const fn family(&self) -> TemplateFamily {
        TemplateFamily::select(self.use_alternate_template_syntax)
    }
}

/// One unit of planned filesystem work
///
/// Paths are relative to the project root; template and source ids are
/// relative to the template root.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ManifestAction {
    /// Abort unless none of these fully qualified classes exist yet
    CheckCollisions {
        /// Class names to check
        class_names: Vec<String>,
    },
    /// Create a directory (and its parents)
    CreateDirectory {
        /// Directory path
        path: PathBuf,
    },
    /// Render a template with the scaffold context
    RenderTemplate {
        /// Template id
        template: String,
        /// Destination file
        dest: PathBuf,
        /// Render context
        context: Value,
    },
    /// Copy a static file verbatim
    CopyStaticFile {
        /// Source id
        source: String,
        /// Destination file
        dest: PathBuf,
        /// Behaviour when `dest` exists
        collision: CollisionPolicy,
    },
    /// Insert `line` after the last line matching `anchor`
    InsertLine {
        /// File to patch
        target: PathBuf,
        /// Regex identifying anchor lines
        anchor: String,
        /// Line to insert
        line: String,
    },
    /// Add a resource route
    RegisterRoute {
        /// Plural underscored resource name
        resource: String,
    },
    /// Run another generator after this one
    DeclareDependency {
        /// Generator name
        generator: String,
        /// Arguments, starting with the resource name
        args: Vec<String>,
        /// Collision policy for the dependent generator's files
        collision: CollisionPolicy,
        /// Forwarded `--skip-timestamps`
        skip_timestamps: bool,
        /// Forwarded `--skip-migration`
        skip_migration: bool,
    },
}

impl ManifestAction {
    /// Short verb describing the action kind
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::CheckCollisions { .. } => "check",
            Self::CreateDirectory { .. } => "directory",
            Self::RenderTemplate { .. } => "template",
            Self::CopyStaticFile { .. } => "file",
            Self::InsertLine { .. } => "insert",
            Self::RegisterRoute { .. } => "route",
            Self::DeclareDependency { .. } => "dependency",
        }
    }

    /// File or directory this action writes, if any
    #[must_use]
    pub fn destination(&self) -> Option<&Path> {
        match self {
            Self::CreateDirectory { path } => Some(path),
            Self::RenderTemplate { dest, .. } | Self::CopyStaticFile { dest, .. } => Some(dest),
            Self::InsertLine { target, .. } => Some(target),
            Self::CheckCollisions { .. } | Self::RegisterRoute { .. } | Self::DeclareDependency { .. } => {
                None
            }
        }
    }
}

impl fmt::Display for ManifestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CheckCollisions { class_names } => write!(f, "{}", class_names.join(", ")),
            Self::CreateDirectory { path } => write!(f, "{}", path.display()),
            Self::RenderTemplate { template, dest, .. } => {
                write!(f, "{} (from {template})", dest.display())
            }
            Self::CopyStaticFile { source, dest, collision } => match collision {
                CollisionPolicy::Overwrite => write!(f, "{} (from {source})", dest.display()),
                CollisionPolicy::Skip => {
                    write!(f, "{} (from {source}, keep existing)", dest.display())
                }
            },
            Self::InsertLine { target, line, .. } => write!(f, "{} <- {line}", target.display()),
            Self::RegisterRoute { resource } => write!(f, "map.resources :{resource}"),
            Self::DeclareDependency { generator, args, .. } => {
                write!(f, "{generator} {}", args.join(" "))
            }
        }
    }
}

/// A jQuery UI theme as found in the template root at plan time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiTheme {
    /// Theme directory name
    pub name: String,
    /// Image files in the theme's `images/` directory, sorted
    pub image_file_names: Vec<String>,
}

/// Something that can plan a generator run
pub trait Generator {
    /// Plan the ordered actions for `name`
    ///
    /// # Errors
    ///
    /// Returns an error if plan-time inputs (such as template directory
    /// listings) cannot be read.
    fn plan(&self, name: &ResourceName, options: &GenerationOptions) -> Result<Vec<ManifestAction>>;
}

/// The scaffold generator
#[derive(Debug, Clone)]
pub struct ScaffoldPlanner<L = FsLister> {
    template_root: PathBuf,
    app_name: String,
    shared_assets: CollisionPolicy,
    lister: L,
}

impl ScaffoldPlanner<FsLister> {
    /// Planner reading theme images from the configured template root
    #[must_use]
    pub fn new(config: &ScaffoldConfig) -> Self {
        Self::with_lister(config, FsLister)
    }
}

impl<L: FileLister> ScaffoldPlanner<L> {
    /// Planner with a custom directory lister
    ///
    /// Layout partials, stylesheets and javascripts already in the project
    /// are kept unless `overwrite_existing` is set.
    pub fn with_lister(config: &ScaffoldConfig, lister: L) -> Self {
        let shared_assets = if config.overwrite_existing {
            CollisionPolicy::Overwrite
        } else {
            CollisionPolicy::Skip
        };
        Self {
            template_root: config.template_dir(),
            app_name: config.app_name(),
            shared_assets,
            lister,
        }
    }

    /// Enumerate the fixed themes and their image files
    ///
    /// # Errors
    ///
    /// Returns an error if a theme image directory cannot be listed.
    pub fn ui_themes(&self) -> Result<Vec<UiTheme>> {
        UI_THEMES
            .iter()
            .map(|theme| -> Result<UiTheme> {
                let dir = self.template_root.join(Self::theme_source(theme)).join("images");
                let image_file_names = self
                    .lister
                    .list_files(&dir)?
                    .into_iter()
                    .filter(|file| is_image(file))
                    .collect();
                Ok(UiTheme {
                    name: (*theme).to_string(),
                    image_file_names,
                })
            })
            .collect()
    }

    fn theme_source(theme: &str) -> String {
        format!("css/jquery-ui/{theme}")
    }

    /// Variables shared by every rendered template
    fn context(&self, name: &ResourceName, options: &GenerationOptions) -> Value {
        let family = options.family();
        json!({
            "app_name": self.app_name,
            "resource": name,
            "class_name": name.class_name,
            "class_nesting": name.class_nesting(),
            "class_nesting_depth": name.nesting_depth(),
            "class_path": name.class_path,
            "model_name": Inflections::camelize(&name.base_singular),
            "file_name": name.file_name,
            "table_name": name.table_name,
            "singular_name": name.base_singular,
            "plural_name": name.base_plural,
            "controller_class_name": name.controller_class_name,
            "controller_file_name": name.controller_underscore_name,
            "controller_plural_name": name.controller_plural_name,
            "controller_singular_name": name.controller_singular_name,
            "markup": family.markup(),
            "style": family.style(),
            "layout": options.layout,
            "skip_timestamps": options.skip_timestamps,
            "skip_migration": options.skip_migration,
            "args": options.field_args,
        })
    }

    fn layout_bundle(&self, m: &mut Manifest, cp: &[String], family: TemplateFamily) -> Result<()> {
        let markup = family.markup();
        let style = family.style();

        m.template(
            format!("{markup}/layout.html.{markup}"),
            nested("app/views/layouts", cp).join(format!("application.html.{markup}")),
        );
        for partial in ["_includes", "_flashes"] {
            m.file(
                format!("{markup}/{partial}.html.{markup}"),
                PathBuf::from(format!("app/views/layouts/{partial}.html.{markup}")),
                self.shared_assets,
            );
        }
        m.file(
            format!("{style}/application.{style}"),
            stylesheet_dir(family).join(format!("application.{style}")),
            self.shared_assets,
        );

        m.directory("public/stylesheets/blueprint");
        for (source, dest) in BLUEPRINT_FILES {
            m.file(
                format!("css/blueprint/{source}"),
                PathBuf::from(format!("public/stylesheets/blueprint/{dest}")),
                self.shared_assets,
            );
        }

        for theme in self.ui_themes()? {
            let source = Self::theme_source(&theme.name);
            let dest = PathBuf::from(format!("public/stylesheets/jquery-ui/{}", theme.name));

            m.directory(dest.join("images"));
            m.file(
                format!("{source}/{UI_THEME_STYLESHEET}"),
                dest.join(UI_THEME_STYLESHEET),
                CollisionPolicy::Skip,
            );
            for image in &theme.image_file_names {
                m.file(
                    format!("{source}/images/{image}"),
                    dest.join("images").join(image),
                    CollisionPolicy::Skip,
                );
            }
        }

        m.directory("public/javascripts");
        for script in JAVASCRIPTS {
            m.file(
                format!("js/{script}"),
                PathBuf::from(format!("public/javascripts/{script}")),
                self.shared_assets,
            );
        }

        Ok(())
    }
}

impl<L: FileLister> Generator for ScaffoldPlanner<L> {
    fn plan(&self, name: &ResourceName, options: &GenerationOptions) -> Result<Vec<ManifestAction>> {
        let family = options.family();
        let markup = family.markup();
        let style = family.style();
        let cp = name.class_path.as_slice();
        let cfn = name.controller_underscore_name.as_str();
        let views = nested("app/views", cp).join(cfn);

        let mut m = Manifest::new(self.context(name, options));

        m.check(vec![
            format!("{}Controller", name.controller_class_name),
            format!("{}Helper", name.controller_class_name),
        ]);
        m.check(vec![name.class_name.clone()]);

        m.directory(nested("app/models", cp));
        m.directory(nested("app/controllers", cp));
        m.directory(nested("app/helpers", cp));
        m.directory(views.clone());
        m.directory(nested("app/views/layouts", cp));
        m.directory(nested("test/functional", cp));
        m.directory(nested("test/unit", cp));
        m.directory(nested("public/stylesheets", cp));
        if !family.is_alternate() {
            m.directory(nested("public/stylesheets/sass", cp));
        }

        for view in SCAFFOLD_VIEWS {
            m.template(
                format!("{markup}/{view}.html.{markup}"),
                views.join(format!("{view}.html.{markup}")),
            );
        }
        m.template(
            format!("{markup}/_form.html.{markup}"),
            views.join(format!("_form.html.{markup}")),
        );
        m.template(
            format!("{markup}/_record.html.{markup}"),
            views.join(format!("_{}.html.{markup}", name.controller_singular_name)),
        );

        if options.layout {
            self.layout_bundle(&mut m, cp, family)?;
        }

        m.template(
            format!("{style}/resource.{style}"),
            stylesheet_dir(family).join(format!("{cfn}.{style}")),
        );

        m.push(ManifestAction::InsertLine {
            target: PathBuf::from(format!("app/views/layouts/_includes.html.{markup}")),
            anchor: STYLESHEET_ANCHOR.to_string(),
            line: family.stylesheet_link(cfn),
        });

        m.template(
            "controller.rb".to_string(),
            nested("app/controllers", cp).join(format!("{cfn}_controller.rb")),
        );
        m.template(
            "functional_test.rb".to_string(),
            nested("test/functional", cp).join(format!("{cfn}_controller_test.rb")),
        );
        m.template(
            "helper.rb".to_string(),
            nested("app/helpers", cp).join(format!("{cfn}_helper.rb")),
        );

        m.push(ManifestAction::RegisterRoute {
            resource: cfn.to_string(),
        });

        m.push(ManifestAction::DeclareDependency {
            generator: MODEL_GENERATOR.to_string(),
            args: std::iter::once(name.raw.clone())
                .chain(options.field_args.iter().cloned())
                .collect(),
            collision: CollisionPolicy::Skip,
            skip_timestamps: options.skip_timestamps,
            skip_migration: options.skip_migration,
        });

        tracing::debug!(resource = %name.raw, actions = m.actions.len(), "planned scaffold");
        Ok(m.actions)
    }
}

/// Accumulates actions while planning
struct Manifest {
    context: Value,
    actions: Vec<ManifestAction>,
}

impl Manifest {
    const fn new(context: Value) -> Self {
        Self {
            context,
            actions: Vec::new(),
        }
    }

    fn push(&mut self, action: ManifestAction) {
        self.actions.push(action);
    }

    fn check(&mut self, class_names: Vec<String>) {
        self.push(ManifestAction::CheckCollisions { class_names });
    }

    fn directory(&mut self, path: impl Into<PathBuf>) {
        self.push(ManifestAction::CreateDirectory { path: path.into() });
    }

    fn template(&mut self, template: String, dest: PathBuf) {
        let context = self.context.clone();
        self.push(ManifestAction::RenderTemplate {
            template,
            dest,
            context,
        });
    }

    fn file(&mut self, source: String, dest: PathBuf, collision: CollisionPolicy) {
        self.push(ManifestAction::CopyStaticFile {
            source,
            dest,
            collision,
        });
    }
}

/// `base` followed by the namespace directories
fn nested(base: &str, class_path: &[String]) -> PathBuf {
    class_path.iter().fold(PathBuf::from(base), |path, segment| path.join(segment))
}

/// Directory holding the family's stylesheet sources
fn stylesheet_dir(family: TemplateFamily) -> PathBuf {
    if family.is_alternate() {
        PathBuf::from("public/stylesheets")
    } else {
        PathBuf::from("public/stylesheets/sass")
    }
}

fn is_image(file: &str) -> bool {
    Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}
