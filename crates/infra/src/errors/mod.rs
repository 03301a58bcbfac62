//! Infrastructure error handling

mod conversions;

pub use conversions::InfraError;
pub(crate) use conversions::{
    map_common_error, map_join_error, map_pg_error, map_sql_error, map_storage_error,
};
