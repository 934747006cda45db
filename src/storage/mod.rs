pub mod json_backend;
pub mod paths;

use std::path::Path;

use crate::{errors::LedgerError, ledger::Document};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over persistence backends capable of storing the ledger
/// document. The document is always read and written as a whole.
pub trait StorageBackend: Send + Sync {
    fn load(&self) -> Result<Document>;
    fn save(&self, document: &Document) -> Result<()>;
    fn path(&self) -> &Path;
}

pub use json_backend::JsonStorage;
