//! Command-line interface
//!
//! Every subcommand acts on one user. Results go to stdout, as text by
//! default or as JSON with `--json`; logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use profilebox_domain::constants::PROFILE_KEYS;
use profilebox_domain::{format_timestamp, PhotoSource, ProfileFields, ProfilePage};
use serde::Serialize;

use crate::commands;
use crate::context::AppContext;

/// ProfileBox: four profile boxes per user
#[derive(Debug, Parser)]
#[command(name = "profilebox", version, about)]
pub struct Cli {
    /// Config file (TOML or JSON); otherwise environment, probed files, defaults
    #[arg(long, global = true, env = "PROFILEBOX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and seed the default boxes
    Login {
        #[arg(long)]
        user: String,
        #[arg(long, env = "PROFILEBOX_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// List the four boxes with their display names
    Boxes {
        #[arg(long)]
        user: String,
    },
    /// Show one box: profile, photo and sections
    Show(BoxArgs),
    /// Change profile fields of a box
    SetProfile {
        #[command(flatten)]
        target: BoxArgs,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        brief: Option<String>,
        #[arg(long)]
        photo: Option<String>,
        /// Store unset fields as empty instead of keeping them
        #[arg(long)]
        replace: bool,
    },
    /// Write a section body
    SetSection {
        #[command(flatten)]
        target: BoxArgs,
        /// Education, Hobbies, Skills, Message (other names are stored too)
        #[arg(long)]
        section: String,
        /// New body; omitted means empty
        #[arg(long)]
        body: Option<String>,
    },
    /// Copy an image into the photo directory and use it for the box
    ImportPhoto {
        #[command(flatten)]
        target: BoxArgs,
        #[arg(long)]
        file: PathBuf,
    },
    /// Apply pending schema migrations
    Migrate,
    /// Check the database and photo directory
    Health,
}

#[derive(Debug, Args)]
pub struct BoxArgs {
    #[arg(long)]
    pub user: String,
    /// Box1..Box4
    #[arg(long, default_value = PROFILE_KEYS[0])]
    pub profile: String,
}

/// Execute `cli.command` against an initialised context.
pub async fn run(ctx: &AppContext, cli: Cli) -> Result<()> {
    let json = cli.json;
    match cli.command {
        Command::Login { user, password } => {
            let session = commands::login(ctx, &user, &password).await?;
            let seeded = session.seeded;
            if json {
                print_json(&serde_json::json!({
                    "username": session.username,
                    "profiles_inserted": seeded.profiles_inserted,
                    "sections_inserted": seeded.sections_inserted,
                }))?;
            } else {
                println!("Welcome, {}!", session.username);
                if !seeded.is_noop() {
                    println!(
                        "Created {} profiles and {} sections.",
                        seeded.profiles_inserted, seeded.sections_inserted
                    );
                }
            }
        }
        Command::Boxes { user } => {
            let boxes = commands::list_boxes(ctx, &user).await?;
            if json {
                print_json(&boxes)?;
            } else {
                for (key, profile) in boxes {
                    println!("{key}  {}  {}", profile.display_name, profile.brief);
                }
            }
        }
        Command::Show(target) => {
            let page = commands::load_page(ctx, &target.user, &target.profile).await?;
            if json {
                print_json(&page)?;
            } else {
                print_page(&page);
            }
        }
        Command::SetProfile { target, name, brief, photo, replace } => {
            let fields = ProfileFields { display_name: name, brief, photo_path: photo };
            let profile = if replace {
                commands::save_profile(ctx, &target.user, &target.profile, fields).await?
            } else {
                commands::update_profile(ctx, &target.user, &target.profile, fields).await?
            };
            if json {
                print_json(&profile)?;
            } else {
                println!("Saved {} for {}.", target.profile, target.user);
            }
        }
        Command::SetSection { target, section, body } => {
            let updated_at = commands::save_section(
                ctx,
                &target.user,
                &target.profile,
                &section,
                body.as_deref(),
            )
            .await?;
            if json {
                print_json(&serde_json::json!({ "section": section, "updated_at": updated_at }))?;
            } else {
                println!("Saved {section} ({}).", format_timestamp(updated_at));
            }
        }
        Command::ImportPhoto { target, file } => {
            let profile = commands::import_photo(ctx, &target.user, &target.profile, &file)
                .await
                .with_context(|| format!("could not import {}", file.display()))?;
            if json {
                print_json(&profile)?;
            } else {
                println!("Photo stored at {}", profile.photo_path);
            }
        }
        Command::Migrate => {
            let report = commands::migrate(ctx).await?;
            if json {
                print_json(&report)?;
            } else {
                match report.current_version {
                    Some(version) if report.applied.is_empty() => {
                        println!("Schema is current (version {version}).");
                    }
                    Some(version) => {
                        println!("Applied {:?}; schema is at version {version}.", report.applied);
                    }
                    None => println!("Schema is not versioned."),
                }
            }
        }
        Command::Health => {
            let status = commands::health(ctx).await;
            if json {
                print_json(&status)?;
            } else {
                for component in &status.components {
                    let state = if component.is_healthy { "ok" } else { "FAILED" };
                    match &component.message {
                        Some(message) => println!("{:<12} {state}: {message}", component.name),
                        None => println!("{:<12} {state}", component.name),
                    }
                }
            }
            anyhow::ensure!(status.is_healthy, "health check failed");
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_page(page: &ProfilePage) {
    let profile = &page.profile;
    println!("{} / {}", page.username, page.profile_key);
    println!("Name:  {}", profile.display_name);
    println!("Brief: {}", profile.brief);
    match &page.photo {
        PhotoSource::File { path } => println!("Photo: {}", path.display()),
        PhotoSource::Placeholder { initials } => println!("Photo: [{initials}]"),
    }
    for section in &page.sections {
        let stamp = section.updated_at.map(format_timestamp).unwrap_or_default();
        println!();
        println!("== {} == {stamp}", section.name);
        println!("{}", section.body);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn profile_defaults_to_first_box() {
        let cli = Cli::parse_from(["profilebox", "show", "--user", "alice"]);
        match cli.command {
            Command::Show(target) => {
                assert_eq!(target.user, "alice");
                assert_eq!(target.profile, "Box1");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn set_section_body_is_optional() {
        let cli = Cli::parse_from([
            "profilebox",
            "--json",
            "set-section",
            "--user",
            "alice",
            "--profile",
            "Box3",
            "--section",
            "Skills",
        ]);
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Command::SetSection { ref section, body: None, .. } if section == "Skills"
        ));
    }
}
