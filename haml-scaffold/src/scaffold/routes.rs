//! Route registration in `config/routes.rb`

use std::path::Path;

use super::linker::LineFile;
use crate::error::Result;

/// Line opening the route table block
pub const ROUTES_SENTINEL: &str = "ActionController::Routing::Routes.draw do |map|";

/// Routes file relative to the project root
pub const ROUTES_FILE: &str = "config/routes.rb";

/// Result of a route registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// `map.resources` line added
    Added,
    /// The resource is already routed
    AlreadyPresent,
    /// No route table block was found; nothing written
    MissingSentinel,
}

/// Adds `map.resources` entries to a routes file
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteRegistrar;

impl RouteRegistrar {
    /// Route `resource` right after the route table sentinel
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::FileNotFound`](crate::error::ScaffoldError::FileNotFound)
    /// if the routes file does not exist, or an I/O error on read/write failure.
    pub fn register(self, routes_file: &Path, resource: &str) -> Result<RouteOutcome> {
        let route = format!("  map.resources :{resource}");
        let mut file = LineFile::read(routes_file)?;

        if file.lines().iter().any(|line| line.trim() == route.trim()) {
            return Ok(RouteOutcome::AlreadyPresent);
        }

        let Some(sentinel) = file.lines().iter().position(|line| line.contains(ROUTES_SENTINEL)) else {
            tracing::warn!(file = %routes_file.display(), "route table block not found, skipping route");
            return Ok(RouteOutcome::MissingSentinel);
        };

        file.insert(sentinel + 1, [route]);
        file.write(routes_file)?;
        Ok(RouteOutcome::Added)
    }
}
