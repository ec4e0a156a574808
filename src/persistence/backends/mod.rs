// Copyright © 2024 Pathway

use std::fmt::Debug;

use crate::persistence::Error;

pub use file::FilesystemKVStorage;
pub use memory::MemoryKVStorage;

pub mod file;
pub mod memory;

/// Working sets are materialized in a Key-Value storage that
/// implements the following interface.
///
/// Writes happen from a single thread while the input is partitioned.
/// After [`PersistenceBackend::flush`] the storage is only read, and
/// reads may come from several worker threads at once.
pub trait PersistenceBackend: Send + Sync + Debug {
    /// Get the value corresponding to the `key`.
    fn get_value(&self, key: &str) -> Result<Vec<u8>, Error>;

    /// Append `chunk` to the value corresponding to the `key`,
    /// creating the value if the key is new.
    fn append_value(&mut self, key: &str, chunk: &[u8]) -> Result<(), Error>;

    /// Make every appended chunk durable and release the writers.
    fn flush(&mut self) -> Result<(), Error>;

    /// Drop all stored values, leaving an empty storage behind.
    fn clear(&mut self) -> Result<(), Error>;
}
