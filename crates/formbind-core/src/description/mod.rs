//! Loading widget descriptions from documents

pub mod document;
pub mod index;
pub mod loader;

pub use document::{DescriptionDocument, GroupDescription, ViewDescription, SCHEMA_VERSION};
pub use index::DescriptionIndex;
pub use loader::{load_descriptions, parse_document};
