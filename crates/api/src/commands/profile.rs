//! Profile box commands

use std::path::Path;

use profilebox_domain::{Profile, ProfileFields, ProfilePage, Result as DomainResult};
use tracing::info;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

/// Profile fields for one box; empty strings when the box has no row.
pub async fn get_profile(
    ctx: &AppContext,
    username: &str,
    profile_key: &str,
) -> DomainResult<Profile> {
    execute_command("profile::get_profile", || ctx.profiles.get_profile(username, profile_key))
        .await
}

/// Overwrite all three profile fields. Unset fields are stored empty.
pub async fn save_profile(
    ctx: &AppContext,
    username: &str,
    profile_key: &str,
    fields: ProfileFields,
) -> DomainResult<Profile> {
    info!(command = "profile::save_profile", username, profile_key, "Executing save_profile");
    execute_command("profile::save_profile", || {
        ctx.profiles.save_profile(username, profile_key, fields)
    })
    .await
}

/// Change only the fields that are set.
pub async fn update_profile(
    ctx: &AppContext,
    username: &str,
    profile_key: &str,
    fields: ProfileFields,
) -> DomainResult<Profile> {
    execute_command("profile::update_profile", || {
        ctx.profiles.update_profile(username, profile_key, fields)
    })
    .await
}

/// The four boxes shown on the main menu.
pub async fn list_boxes(ctx: &AppContext, username: &str) -> DomainResult<Vec<(String, Profile)>> {
    execute_command("profile::list_boxes", || ctx.profiles.list_boxes(username)).await
}

/// Profile, photo and sections for one box.
pub async fn load_page(
    ctx: &AppContext,
    username: &str,
    profile_key: &str,
) -> DomainResult<ProfilePage> {
    execute_command("profile::load_page", || ctx.profiles.load_page(username, profile_key)).await
}

/// Copy an image into the photo directory and point the box at it.
pub async fn import_photo(
    ctx: &AppContext,
    username: &str,
    profile_key: &str,
    source: &Path,
) -> DomainResult<Profile> {
    execute_command("profile::import_photo", || {
        ctx.profiles.import_photo(username, profile_key, source)
    })
    .await
}
