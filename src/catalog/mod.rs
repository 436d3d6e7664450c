//! Model catalog: store discovery, dedup, atomic refresh, and queries.

mod builder;
mod catalog;
mod discovery;
mod entry;
mod language;

pub mod auto;

pub use catalog::{CatalogError, ModelCatalog};
pub use discovery::{discover_stores, DiscoveryError};
pub use entry::{ModelBasic, ModelEntry};
pub use language::LanguageMatcher;
