use chrono::{DateTime, Utc};
use profilebox_domain::Result as DomainResult;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

/// Section body; empty when the section was never written.
pub async fn get_section(
    ctx: &AppContext,
    username: &str,
    profile_key: &str,
    section: &str,
) -> DomainResult<String> {
    execute_command("section::get_section", || {
        ctx.profiles.get_section(username, profile_key, section)
    })
    .await
}

/// Store a section body and return its new update time.
pub async fn save_section(
    ctx: &AppContext,
    username: &str,
    profile_key: &str,
    section: &str,
    body: Option<&str>,
) -> DomainResult<DateTime<Utc>> {
    execute_command("section::save_section", || {
        ctx.profiles.save_section(username, profile_key, section, body)
    })
    .await
}
