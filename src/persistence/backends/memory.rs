// Copyright © 2024 Pathway

use std::collections::HashMap;

use crate::persistence::backends::PersistenceBackend;
use crate::persistence::Error;

// Memory KV-storage. Used in tests and when working sets are small
// enough to be kept in RAM for the whole run.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct MemoryKVStorage {
    values: HashMap<String, Vec<u8>>,
}

impl MemoryKVStorage {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }
}

impl PersistenceBackend for MemoryKVStorage {
    fn get_value(&self, key: &str) -> Result<Vec<u8>, Error> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| Error::NoSuchKey(key.to_string()))
    }

    fn append_value(&mut self, key: &str, chunk: &[u8]) -> Result<(), Error> {
        self.values
            .entry(key.to_string())
            .or_default()
            .extend_from_slice(chunk);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Error> {
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Error> {
        self.values.clear();
        Ok(())
    }
}
