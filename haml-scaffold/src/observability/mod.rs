//! Logging setup
//!
//! Diagnostics go to stderr through `tracing`, leaving stdout to the
//! generator's status lines.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global subscriber
///
/// `RUST_LOG` takes precedence; otherwise only warnings are shown, or debug
/// output for the scaffold crates when `verbose` is set.
///
/// # Example
///
/// ```rust,no_run
/// use haml_scaffold::observability;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// observability::init(false)?;
/// tracing::warn!("routes file not found");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init(verbose: bool) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(verbose))
        .try_init()
}

/// Filter used when `RUST_LOG` is unset
#[must_use]
pub const fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "warn,haml_scaffold=debug,haml_scaffold_cli=debug"
    } else {
        "warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_parses() {
        for verbose in [false, true] {
            assert!(EnvFilter::try_new(default_directive(verbose)).is_ok());
        }
        assert!(default_directive(true).contains("haml_scaffold=debug"));
    }
}
