//! Commands exposed to the CLI
//!
//! Each command is a thin wrapper over the services in [`AppContext`] that
//! adds timing and outcome logging.

pub mod database;
pub mod profile;
pub mod section;
pub mod session;

pub use database::{health, migrate, MigrationReport};
pub use profile::{get_profile, import_photo, list_boxes, load_page, save_profile, update_profile};
pub use section::{get_section, save_section};
pub use session::login;
