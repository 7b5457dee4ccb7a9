//! Command implementations for the isle CLI.

pub mod bundle;
pub mod schema;
pub mod utils;

pub use bundle::execute as bundle_execute;
pub use schema::execute as schema_execute;
