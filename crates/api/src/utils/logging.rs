use std::time::Duration;

use profilebox_domain::{LoggingConfig, ProfileBoxError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Output goes to stderr so
/// command results on stdout stay machine-readable. Calling this twice is
/// harmless; the second subscriber is discarded.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    let installed = if config.json {
        builder.json().with_current_span(false).try_init()
    } else {
        builder.with_target(false).try_init()
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Log the outcome of a command execution with structured fields.
///
/// Callers must avoid forwarding sensitive values in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, success: bool) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, "command_execution_failure");
    }
}

/// Convert a `ProfileBoxError` into a stable label suitable for logging.
#[inline]
pub const fn error_label(error: &ProfileBoxError) -> &'static str {
    match error {
        ProfileBoxError::Database(_) => "database",
        ProfileBoxError::Migration(_) => "migration",
        ProfileBoxError::Config(_) => "config",
        ProfileBoxError::Io(_) => "io",
        ProfileBoxError::NotFound(_) => "not_found",
        ProfileBoxError::InvalidInput(_) => "invalid_input",
        ProfileBoxError::Internal(_) => "internal",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(error_label(&ProfileBoxError::Migration("x".into())), "migration");
        assert_eq!(error_label(&ProfileBoxError::InvalidInput("x".into())), "invalid_input");
    }

    #[test]
    fn init_twice_does_not_panic() {
        let config = LoggingConfig::default();
        init_tracing(&config);
        init_tracing(&LoggingConfig { json: true, ..config });
    }
}
