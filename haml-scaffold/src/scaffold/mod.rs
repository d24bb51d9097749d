//! Resource scaffolding
//!
//! Resolves a resource name, plans the files a scaffold needs and writes
//! them into a project tree.
//!
//! ```rust,no_run
//! use haml_scaffold::config::ScaffoldConfig;
//! use haml_scaffold::scaffold::{
//!     GenerationOptions, Generator, Materializer, ResourceName, ScaffoldPlanner,
//! };
//!
//! # fn main() -> haml_scaffold::error::Result<()> {
//! let config = ScaffoldConfig::load_for_project("/srv/depot")?;
//! let name = ResourceName::resolve("admin/post")?;
//! let options = GenerationOptions {
//!     layout: true,
//!     field_args: vec!["title:string".into()],
//!     ..GenerationOptions::default()
//! };
//!
//! let actions = ScaffoldPlanner::new(&config).plan(&name, &options)?;
//! let report = Materializer::new(config).run(&actions)?;
//! println!("{} actions", report.entries.len());
//! # Ok(())
//! # }
//! ```

pub mod collisions;
pub mod family;
pub mod inflect;
pub mod linker;
pub mod lister;
pub mod manifest;
pub mod materialize;
pub mod names;
pub mod routes;

pub use collisions::ClassIndex;
pub use family::TemplateFamily;
pub use inflect::Inflections;
pub use linker::{LinkOutcome, StylesheetLinker, STYLESHEET_ANCHOR};
pub use lister::{FileLister, FsLister};
pub use manifest::{
    CollisionPolicy, GenerationOptions, Generator, ManifestAction, ScaffoldPlanner, UiTheme,
};
pub use materialize::{ActionStatus, Materializer, RunReport};
pub use names::ResourceName;
pub use routes::{RouteOutcome, RouteRegistrar};
