//! Data models for the park survey backend.

mod record;
mod schema_view;

pub use record::*;
pub use schema_view::*;
