// Copyright © 2024 Pathway

use std::io::{Error, ErrorKind};
use std::path::Path;

pub fn ensure_directory(fs_path: &Path) -> Result<(), Error> {
    if !fs_path.exists() {
        if let Err(e) = std::fs::create_dir_all(fs_path) {
            if e.kind() == ErrorKind::AlreadyExists {
                return Ok(());
            }
            return Err(e);
        }
    } else if !fs_path.is_dir() {
        // use ErrorKind::NotADirectory when it becomes stable
        return Err(Error::new(
            ErrorKind::Other,
            "target object should be a directory",
        ));
    }
    Ok(())
}

/// Removes the directory with everything inside and creates it again empty.
pub fn recreate_directory(fs_path: &Path) -> Result<(), Error> {
    match std::fs::remove_dir_all(fs_path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    ensure_directory(fs_path)
}
