//! Error types and error handling

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Scaffold error type
///
/// Every failure aborts the run; nothing already written is rolled back.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The resource identifier does not match `[A-Za-z_][A-Za-z0-9_/]*`
    #[error("Invalid resource name: '{0}'")]
    InvalidName(String),

    /// A derived class name is already declared in the project
    #[error("Name collision: {name} is already declared{}", location_suffix(.location.as_deref()))]
    NameCollision {
        /// Fully qualified class name
        name: String,
        /// File declaring the class (`None` for Ruby core constants)
        location: Option<PathBuf>,
    },

    /// A template failed to render with the supplied context
    #[error("Template render error in {template}: {source}")]
    TemplateRender {
        /// Template id relative to the template root
        template: String,
        /// Underlying engine error
        #[source]
        source: minijinja::Error,
    },

    /// A file that must already exist is missing
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Read or write failure
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// An anchor pattern is not a valid regular expression
    #[error("Invalid anchor pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Regex compilation error
        #[source]
        source: regex::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScaffoldError {
    pub(crate) fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::FileNotFound(path);
        }
        Self::Io { path, source }
    }
}

impl From<figment::Error> for ScaffoldError {
    fn from(error: figment::Error) -> Self {
        Self::Config(error.to_string())
    }
}

fn location_suffix(location: Option<&Path>) -> String {
    location.map_or_else(String::new, |path| format!(" in {}", path.display()))
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_file_not_found() {
        let err = ScaffoldError::io(
            "app/views/layouts/_includes.html.haml",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(matches!(err, ScaffoldError::FileNotFound(_)));
    }

    #[test]
    fn test_other_io_errors_keep_source() {
        let err = ScaffoldError::io(
            "public/javascripts",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, ScaffoldError::Io { .. }));
        assert!(err.to_string().contains("public/javascripts"));
    }

    #[test]
    fn test_collision_message() {
        let err = ScaffoldError::NameCollision {
            name: "PostsController".into(),
            location: Some(PathBuf::from("app/controllers/posts_controller.rb")),
        };
        assert_eq!(
            err.to_string(),
            "Name collision: PostsController is already declared in app/controllers/posts_controller.rb"
        );

        let core = ScaffoldError::NameCollision {
            name: "String".into(),
            location: None,
        };
        assert_eq!(core.to_string(), "Name collision: String is already declared");
    }
}
