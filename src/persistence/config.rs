// Copyright © 2024 Pathway

#![allow(clippy::module_name_repetitions)]

use std::path::PathBuf;

use crate::persistence::backends::{FilesystemKVStorage, MemoryKVStorage, PersistenceBackend};
use crate::persistence::Error;

/// The configuration for the backend that keeps the per-key working sets
/// between partitioning and processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistentStorageConfig {
    Filesystem {
        root_path: PathBuf,
        max_open_writers: usize,
    },
    Memory,
}

impl PersistentStorageConfig {
    pub fn create(&self) -> Result<Box<dyn PersistenceBackend>, Error> {
        match &self {
            Self::Filesystem {
                root_path,
                max_open_writers,
            } => Ok(Box::new(FilesystemKVStorage::with_max_open_writers(
                root_path,
                *max_open_writers,
            )?)),
            Self::Memory => Ok(Box::new(MemoryKVStorage::new())),
        }
    }
}
