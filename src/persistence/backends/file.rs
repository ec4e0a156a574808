// Copyright © 2024 Pathway

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::fs_helpers::{ensure_directory, recreate_directory};
use crate::persistence::backends::PersistenceBackend;
use crate::persistence::Error;

pub const DEFAULT_MAX_OPEN_WRITERS: usize = 256;

/// Stores each key as a separate file under `root_path`.
///
/// Appends go through buffered writers that stay open between calls.
/// At most `max_open_writers` files are open at once: when the limit is
/// reached all writers are flushed and closed, and a later append to the
/// same key reopens its file in append mode.
#[derive(Debug)]
pub struct FilesystemKVStorage {
    root_path: PathBuf,
    writers: HashMap<String, BufWriter<File>>,
    created_keys: HashSet<String>,
    max_open_writers: usize,
}

impl FilesystemKVStorage {
    pub fn new(root_path: &Path) -> Result<Self, Error> {
        Self::with_max_open_writers(root_path, DEFAULT_MAX_OPEN_WRITERS)
    }

    pub fn with_max_open_writers(root_path: &Path, max_open_writers: usize) -> Result<Self, Error> {
        ensure_directory(root_path)?;
        Ok(Self {
            root_path: root_path.to_path_buf(),
            writers: HashMap::new(),
            created_keys: HashSet::new(),
            max_open_writers: max_open_writers.max(1),
        })
    }

    fn object_path(&self, key: &str) -> Result<PathBuf, Error> {
        let is_plain_name = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\', '\0']);
        if is_plain_name {
            Ok(self.root_path.join(key))
        } else {
            Err(Error::InvalidKey(key.to_string()))
        }
    }

    fn close_writers(&mut self) -> Result<(), Error> {
        for (_, mut writer) in self.writers.drain() {
            writer.flush()?;
        }
        Ok(())
    }
}

impl PersistenceBackend for FilesystemKVStorage {
    fn get_value(&self, key: &str) -> Result<Vec<u8>, Error> {
        if self.writers.contains_key(key) {
            return Err(Error::Unflushed(key.to_string()));
        }
        let path = self.object_path(key)?;
        match std::fs::read(path) {
            Ok(value) => Ok(value),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::NoSuchKey(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn append_value(&mut self, key: &str, chunk: &[u8]) -> Result<(), Error> {
        let path = self.object_path(key)?;
        if !self.writers.contains_key(key) && self.writers.len() >= self.max_open_writers {
            self.close_writers()?;
        }
        let writer = match self.writers.entry(key.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                // The first append truncates whatever an earlier run left behind.
                let file = if self.created_keys.insert(key.to_string()) {
                    File::create(&path)?
                } else {
                    OpenOptions::new().append(true).open(&path)?
                };
                entry.insert(BufWriter::new(file))
            }
        };
        writer.write_all(chunk)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Error> {
        self.close_writers()
    }

    fn clear(&mut self) -> Result<(), Error> {
        self.writers.clear();
        self.created_keys.clear();
        recreate_directory(&self.root_path)?;
        Ok(())
    }
}
