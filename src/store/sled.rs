use super::{FilterStore, StoreError};
use std::path::Path;

const FILTER_KEY: &[u8] = b"syslog_filter";

/// Embedded key-value backend for hosts that already keep state in sled.
pub struct SledFilterStore {
    db: sled::Db,
}

impl SledFilterStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self {
            db: sled::open(path)?,
        })
    }
}

impl FilterStore for SledFilterStore {
    fn load_filter(&self) -> Result<Option<String>, StoreError> {
        match self.db.get(FILTER_KEY)? {
            Some(value) => String::from_utf8(value.to_vec())
                .map(Some)
                .map_err(|_| StoreError::InvalidUtf8),
            None => Ok(None),
        }
    }

    fn save_filter(&mut self, filter: &str) -> Result<(), StoreError> {
        self.db.insert(FILTER_KEY, filter.as_bytes())?;
        self.db.flush()?;
        Ok(())
    }
}
