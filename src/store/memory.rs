use super::{FilterStore, StoreError};
use parking_lot::Mutex;
use std::sync::Arc;

/// Process-local store. Clones share the same slot, so a caller can keep a
/// handle and observe what the pipeline saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilterStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryFilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(filter.into()))),
        }
    }

    pub fn current(&self) -> Option<String> {
        self.slot.lock().clone()
    }
}

impl FilterStore for MemoryFilterStore {
    fn load_filter(&self) -> Result<Option<String>, StoreError> {
        Ok(self.slot.lock().clone())
    }

    fn save_filter(&mut self, filter: &str) -> Result<(), StoreError> {
        *self.slot.lock() = Some(filter.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let observer = MemoryFilterStore::new();
        let mut store = observer.clone();
        assert_eq!(store.load_filter().unwrap(), None);

        store.save_filter("wifi,api").unwrap();
        assert_eq!(observer.current(), Some("wifi,api".to_string()));
    }

    #[test]
    fn test_saved_empty_string_is_some() {
        let mut store = MemoryFilterStore::with_filter("wifi");
        store.save_filter("").unwrap();
        assert_eq!(store.load_filter().unwrap(), Some(String::new()));
    }
}
