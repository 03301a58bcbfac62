//! Command execution helpers
//!
//! Provides utilities to reduce boilerplate when implementing commands with
//! timing and logging.

use std::future::Future;
use std::time::Instant;

use profilebox_domain::Result as DomainResult;
use tracing::debug;

use crate::utils::logging::{error_label, log_command_execution};

/// Execute a command with automatic timing and outcome logging
///
/// # Example
///
/// ```rust,ignore
/// pub async fn get_section(ctx: &AppContext, user: &str, key: &str, section: &str)
///     -> DomainResult<String>
/// {
///     execute_command("section::get_section", || async {
///         ctx.profiles.get_section(user, key, section).await
///     })
///     .await
/// }
/// ```
pub async fn execute_command<F, Fut, T>(command_name: &str, command_fn: F) -> DomainResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    let start = Instant::now();

    let result = command_fn().await;

    let elapsed = start.elapsed();
    log_command_execution(command_name, elapsed, result.is_ok());
    if let Err(err) = &result {
        debug!(command = command_name, error_type = error_label(err), error = %err, "command failed");
    }

    result
}
