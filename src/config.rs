// Copyright © 2024 Pathway

use std::path::{Path, PathBuf};

use crate::engine::DateLayout;
use crate::persistence::backends::file::DEFAULT_MAX_OPEN_WRITERS;
use crate::persistence::config::PersistentStorageConfig;

pub const DEFAULT_RESULT_FILE: &str = "result.csv";
pub const DEFAULT_TEMP_DIRECTORY: &str = "./tmp";
pub const DEFAULT_WORKERS: usize = 8;

pub const PHONE_NUMBER_HEADER: &str = "PHONE_NUMBER";
pub const REACTIVATION_DATE_HEADER: &str = "REACTIVATION_DATE";

/// Column names of the result file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headers {
    pub key: String,
    pub real_activation_date: String,
}

impl Default for Headers {
    fn default() -> Self {
        Self {
            key: PHONE_NUMBER_HEADER.to_string(),
            real_activation_date: REACTIVATION_DATE_HEADER.to_string(),
        }
    }
}

/// Settings of a whole run, handed to each stage when it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    date_layout: DateLayout,
    result_path: PathBuf,
    storage: PersistentStorageConfig,
    headers: Headers,
    workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            date_layout: DateLayout::default(),
            result_path: PathBuf::from(DEFAULT_RESULT_FILE),
            storage: PersistentStorageConfig::Filesystem {
                root_path: PathBuf::from(DEFAULT_TEMP_DIRECTORY),
                max_open_writers: DEFAULT_MAX_OPEN_WRITERS,
            },
            headers: Headers::default(),
            workers: DEFAULT_WORKERS,
        }
    }
}

impl Config {
    #[must_use]
    pub fn with_date_layout(mut self, date_layout: DateLayout) -> Self {
        self.date_layout = date_layout;
        self
    }

    #[must_use]
    pub fn with_result_path(mut self, result_path: impl Into<PathBuf>) -> Self {
        self.result_path = result_path.into();
        self
    }

    #[must_use]
    pub fn with_storage(mut self, storage: PersistentStorageConfig) -> Self {
        self.storage = storage;
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn date_layout(&self) -> &DateLayout {
        &self.date_layout
    }

    pub fn result_path(&self) -> &Path {
        &self.result_path
    }

    pub fn storage(&self) -> &PersistentStorageConfig {
        &self.storage
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}
