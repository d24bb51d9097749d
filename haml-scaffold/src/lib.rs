//! haml-scaffold: resource scaffolding for Haml/Sass Rails applications
//!
//! Given a resource name such as `admin/post`, the generator derives the
//! class, file and table names, plans every directory, view, stylesheet,
//! controller, helper and test a scaffold needs, and writes them into a
//! project tree using either Haml/Sass or ERB/CSS templates.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use haml_scaffold::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ScaffoldConfig::load_for_project(".")?;
//!     let name = ResourceName::resolve("post")?;
//!
//!     let actions = ScaffoldPlanner::new(&config).plan(&name, &GenerationOptions::default())?;
//!     for (action, status) in Materializer::new(config).run(&actions)?.entries {
//!         println!("{status:>12}  {action}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`scaffold`]: name resolution, planning and execution
//! - [`forms`]: inline validation errors for form labels
//! - [`config`]: layered configuration
//! - [`observability`]: logging setup

pub mod config;
pub mod error;
pub mod forms;
pub mod observability;
pub mod scaffold;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! ```rust
    //! use haml_scaffold::prelude::*;
    //! ```

    pub use crate::config::ScaffoldConfig;
    pub use crate::error::{Result, ScaffoldError};
    pub use crate::forms::{InlineErrorLabel, LabelOptions, ValidationErrors};
    pub use crate::scaffold::{
        ActionStatus, GenerationOptions, Generator, ManifestAction, Materializer, ResourceName,
        RunReport, ScaffoldPlanner, TemplateFamily,
    };
}
