// Copyright © 2024 Pathway

use std::io::Error as IoError;

pub mod backends;
pub mod config;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error("key {0:?} can't be used as a storage object name")]
    InvalidKey(String),

    #[error("key not found: {0}")]
    NoSuchKey(String),

    #[error("key {0:?} still has an open writer, flush the storage before reading it")]
    Unflushed(String),
}
