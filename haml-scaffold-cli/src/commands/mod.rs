//! CLI command implementations

pub mod scaffold;

pub use scaffold::ScaffoldCommand;
