//! Pure helper functions

pub mod initials;
pub mod timestamps;
