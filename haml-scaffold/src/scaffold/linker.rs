//! Stylesheet reference insertion
//!
//! Patches a shared layout partial so it links the stylesheet of a newly
//! scaffolded resource. The new reference goes after the *last* line
//! matching the anchor pattern; when nothing matches it goes to the very top
//! of the file. Rewrites keep the file's line terminator (`\n` or `\r\n`)
//! and whether its last line was terminated.

use std::fs;
use std::io::Write;
use std::path::Path;

use regex::Regex;
use tempfile::NamedTempFile;

use super::family::TemplateFamily;
use crate::error::{Result, ScaffoldError};

/// Anchor marking existing stylesheet references in a layout partial
pub const STYLESHEET_ANCHOR: &str = "stylesheet_link_tag";

/// Result of a linking attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Block inserted; `line` is the zero-based index of the new reference
    Inserted {
        /// Index of the inserted reference line in the rewritten file
        line: usize,
    },
    /// The exact reference was already present; the file is untouched
    AlreadyLinked,
}

/// Inserts stylesheet references into layout partials
#[derive(Debug, Clone, Copy, Default)]
pub struct StylesheetLinker;

impl StylesheetLinker {
    /// Link the stylesheet named `link` into `target`
    ///
    /// The reference statement is rendered in the syntax of `family`.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::FileNotFound`] if `target` does not exist, or
    /// an I/O error if it cannot be read or rewritten.
    pub fn insert_stylesheet_reference(
        self,
        target: &Path,
        link: &str,
        family: TemplateFamily,
    ) -> Result<LinkOutcome> {
        self.insert_line(target, STYLESHEET_ANCHOR, &family.stylesheet_link(link))
    }

    /// Insert a blank separator and `line` after the last line matching `anchor`
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidPattern`] for a bad anchor,
    /// [`ScaffoldError::FileNotFound`] if `target` does not exist, or an I/O
    /// error if it cannot be read or rewritten.
    pub fn insert_line(self, target: &Path, anchor: &str, line: &str) -> Result<LinkOutcome> {
        let pattern = Regex::new(anchor).map_err(|source| ScaffoldError::InvalidPattern {
            pattern: anchor.to_string(),
            source,
        })?;

        let mut file = LineFile::read(target)?;

        if file.lines().iter().any(|existing| existing.trim() == line.trim()) {
            tracing::debug!(target = %target.display(), line, "reference already present");
            return Ok(LinkOutcome::AlreadyLinked);
        }

        let at = insertion_index(file.lines(), &pattern);
        file.insert(at, [String::new(), line.to_string()]);
        file.write(target)?;

        tracing::debug!(target = %target.display(), index = at, "inserted reference");
        Ok(LinkOutcome::Inserted { line: at + 1 })
    }
}

/// Index right after the last matching line, or 0 when none match
#[must_use]
pub fn insertion_index(lines: &[String], anchor: &Regex) -> usize {
    lines
        .iter()
        .rposition(|line| anchor.is_match(line))
        .map_or(0, |idx| idx + 1)
}

/// A text file held as lines without terminators
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LineFile {
    lines: Vec<String>,
    newline: &'static str,
    trailing_newline: bool,
}

impl LineFile {
    /// Read `path`, noting its terminator style
    pub(crate) fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ScaffoldError::io(path, e))?;
        Ok(Self::parse(&content))
    }

    fn parse(content: &str) -> Self {
        Self {
            lines: content.lines().map(str::to_string).collect(),
            newline: if content.contains("\r\n") { "\r\n" } else { "\n" },
            trailing_newline: content.is_empty() || content.ends_with('\n'),
        }
    }

    pub(crate) fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Insert `new_lines` before index `at`
    pub(crate) fn insert(&mut self, at: usize, new_lines: impl IntoIterator<Item = String>) {
        self.lines.splice(at..at, new_lines);
    }

    fn render(&self) -> String {
        let mut out = self.lines.join(self.newline);
        if self.trailing_newline && !self.lines.is_empty() {
            out.push_str(self.newline);
        }
        out
    }

    /// Replace the contents of `path` with these lines
    ///
    /// Writes to a temporary file beside the target and renames it into
    /// place, so a failed write never leaves a truncated file behind.
    pub(crate) fn write(&self, path: &Path) -> Result<()> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ScaffoldError::io(dir, e))?;
        if let Ok(metadata) = fs::metadata(path) {
            tmp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(|e| ScaffoldError::io(tmp.path(), e))?;
        }
        tmp.write_all(self.render().as_bytes())
            .map_err(|e| ScaffoldError::io(tmp.path(), e))?;
        tmp.persist(path).map_err(|e| ScaffoldError::io(path, e.error))?;
        Ok(())
    }
}
