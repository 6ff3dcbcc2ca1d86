//! Extractors that reject with [`AppError`](crate::AppError) problem bodies.

pub mod uuid_path;
pub mod validated_json;
pub mod validated_query;

pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
pub use validated_query::{ValidatedQuery, empty_as_none};
