//! Dataset representation and loading.

mod loader;
mod source;

pub use loader::{Loader, LoaderConfig};
pub use source::{Dataset, Row, SourceMetadata, Value};
