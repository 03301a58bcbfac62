//! Login session

mod service;

pub use service::{Session, SessionService};
