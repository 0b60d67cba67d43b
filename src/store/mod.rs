//! Persistence for the raw filter string.
//!
//! The pipeline reads the saved value once at construction and writes it on
//! every filter-string update. Backends never hold anything else.

pub mod file;
pub mod memory;
#[cfg(feature = "sled-store")]
pub mod sled;

pub use file::FileFilterStore;
pub use memory::MemoryFilterStore;
#[cfg(feature = "sled-store")]
pub use self::sled::SledFilterStore;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "sled-store")]
    #[error("Database error: {0}")]
    Database(#[from] ::sled::Error),
    #[error("Stored filter is not valid UTF-8")]
    InvalidUtf8,
    #[error("Store backend unavailable: {0}")]
    Unavailable(String),
}

pub trait FilterStore: Send {
    /// Returns the last saved filter string, if any was ever saved.
    fn load_filter(&self) -> Result<Option<String>, StoreError>;

    fn save_filter(&mut self, filter: &str) -> Result<(), StoreError>;
}
