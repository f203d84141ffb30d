//! Log subscriber setup
//!
//! Library code only emits `tracing` events. A subscriber is installed by
//! the CLI at startup, or by a foreign host through
//! `hashbridge_init_logging`. Output always goes to stderr.

use tracing_subscriber::EnvFilter;

/// Fallback filter when neither a directive nor `RUST_LOG` is usable
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Install the global subscriber
///
/// `directive` takes precedence over `RUST_LOG`. Returns `false` if a
/// subscriber was already installed, which makes repeated calls harmless.
pub fn init_logging(directive: Option<&str>, json: bool) -> bool {
    let filter = match directive {
        Some(d) => EnvFilter::try_new(d).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let _ = init_logging(Some("debug"), false);
        assert!(!init_logging(Some("info"), true));
    }
}
