// Copyright © 2024 Pathway

use std::io;
use std::path::PathBuf;
use std::result;

use crate::persistence::Error as PersistenceBackendError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Persistence(#[from] PersistenceBackendError),

    #[error("record at line {line} has {fields} fields, expected {expected}")]
    MalformedRecord {
        line: u64,
        fields: usize,
        expected: usize,
    },

    #[error("failed to open input file {path:?}: {source}")]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create result file {path:?}: {source}")]
    OutputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("worker pool needs at least one worker")]
    NoWorkers,
}

pub type Result<T, E = Error> = result::Result<T, E>;
