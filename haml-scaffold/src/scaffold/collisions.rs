//! Class name collision detection
//!
//! Scans the Ruby sources of a project for `class`/`module` declarations so a
//! scaffold run can refuse to generate a class that already exists.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use walkdir::WalkDir;

use crate::error::{Result, ScaffoldError};

/// Source directories searched for declarations, relative to the project root
pub const SOURCE_DIRS: &[&str] = &["app", "lib"];

/// Ruby core constants a generated class must never shadow
const RESERVED: &[&str] = &[
    "Array", "Class", "Comparable", "Date", "Dir", "Enumerable", "Exception", "File", "Float",
    "Hash", "Integer", "IO", "Kernel", "Module", "Numeric", "Object", "Proc", "Process", "Range",
    "Regexp", "String", "Struct", "Symbol", "Thread", "Time",
];

static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*)(?:class|module)\s+([A-Z][A-Za-z0-9_]*(?:::[A-Z][A-Za-z0-9_]*)*)")
        .expect("Invalid regex")
});

static ONE_LINER: Lazy<Regex> = Lazy::new(|| Regex::new(r";\s*end\s*$").expect("Invalid regex"));

static END: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*)end\b").expect("Invalid regex"));

/// Index of class and module names declared in a project
#[derive(Debug, Clone, Default)]
pub struct ClassIndex {
    declared: BTreeMap<String, PathBuf>,
}

impl ClassIndex {
    /// Scan `app/` and `lib/` under `project_root` for `.rb` files
    ///
    /// # Errors
    ///
    /// Returns an I/O error if a source file or directory cannot be read.
    pub fn scan(project_root: &Path) -> Result<Self> {
        let mut index = Self::default();

        for dir in SOURCE_DIRS {
            let root = project_root.join(dir);
            if !root.is_dir() {
                continue;
            }
            for entry in WalkDir::new(&root).sort_by_file_name() {
                let entry = entry.map_err(|e| {
                    let path = e.path().unwrap_or(&root).to_path_buf();
                    ScaffoldError::io(path, e.into())
                })?;
                let path = entry.path();
                if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "rb") {
                    continue;
                }
                let source = fs::read_to_string(path).map_err(|e| ScaffoldError::io(path, e))?;
                let relative = path.strip_prefix(project_root).unwrap_or(path);
                index.add_source(relative, &source);
            }
        }

        tracing::debug!(classes = index.declared.len(), "indexed project classes");
        Ok(index)
    }

    /// Record every declaration in one Ruby source file
    ///
    /// Nested `module`/`class` blocks qualify inner names, so
    /// `module Admin` containing `class PostsController` records
    /// `Admin::PostsController`.
    pub fn add_source(&mut self, path: &Path, source: &str) {
        let mut stack: Vec<(usize, String)> = Vec::new();

        for line in source.lines() {
            if let Some(caps) = DECLARATION.captures(line) {
                let indent = caps[1].len();
                let name = &caps[2];
                let qualified = stack
                    .iter()
                    .map(|(_, outer)| outer.as_str())
                    .chain(std::iter::once(name))
                    .collect::<Vec<_>>()
                    .join("::");

                self.declared
                    .entry(qualified.clone())
                    .or_insert_with(|| path.to_path_buf());

                if !ONE_LINER.is_match(line) {
                    stack.push((indent, name.to_string()));
                }
            } else if let Some(caps) = END.captures(line) {
                let indent = caps[1].len();
                if stack.last().is_some_and(|(open, _)| *open == indent) {
                    stack.pop();
                }
            }
        }
    }

    /// Whether `name` is declared (or reserved)
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        RESERVED.contains(&name) || self.declared.contains_key(name)
    }

    /// Fail on the first name that is already declared
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::NameCollision`] naming the class and, for
    /// project classes, the file declaring it.
    pub fn check(&self, names: &[String]) -> Result<()> {
        for name in names {
            if RESERVED.contains(&name.as_str()) {
                return Err(ScaffoldError::NameCollision {
                    name: name.clone(),
                    location: None,
                });
            }
            if let Some(path) = self.declared.get(name) {
                return Err(ScaffoldError::NameCollision {
                    name: name.clone(),
                    location: Some(path.clone()),
                });
            }
        }
        Ok(())
    }
}
