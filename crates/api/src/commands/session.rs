use profilebox_core::Session;
use profilebox_domain::Result as DomainResult;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

/// Log in and make sure the user's four boxes exist.
pub async fn login(ctx: &AppContext, username: &str, password: &str) -> DomainResult<Session> {
    execute_command("session::login", || ctx.sessions.login(username, password)).await
}
