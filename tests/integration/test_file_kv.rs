// Copyright © 2024 Pathway

use assert_matches::assert_matches;
use tempfile::tempdir;

use activation_engine::persistence::backends::{FilesystemKVStorage, PersistenceBackend};
use activation_engine::persistence::Error as BackendError;

#[test]
fn test_simple_kv_operations() -> eyre::Result<()> {
    let test_storage = tempdir()?;
    let test_storage_path = test_storage.path();

    let mut storage = FilesystemKVStorage::new(test_storage_path)?;
    assert_matches!(storage.get_value("1"), Err(BackendError::NoSuchKey(key)) if key == "1");

    storage.append_value("1", b"one")?;
    storage.append_value("2", b"two")?;
    storage.append_value("1", b"three")?;
    storage.flush()?;

    assert_eq!(storage.get_value("1")?, b"onethree".to_vec());
    assert_eq!(storage.get_value("2")?, b"two".to_vec());
    assert!(test_storage_path.join("1").is_file());
    assert!(test_storage_path.join("2").is_file());

    Ok(())
}

#[test]
fn test_read_before_flush() -> eyre::Result<()> {
    let test_storage = tempdir()?;
    let mut storage = FilesystemKVStorage::new(test_storage.path())?;

    storage.append_value("555-0100", b"2015-01-01,\n")?;
    assert_matches!(
        storage.get_value("555-0100"),
        Err(BackendError::Unflushed(key)) if key == "555-0100"
    );
    storage.flush()?;
    assert_eq!(storage.get_value("555-0100")?, b"2015-01-01,\n".to_vec());
    Ok(())
}

#[test]
fn test_keys_must_be_file_names() -> eyre::Result<()> {
    let test_storage = tempdir()?;
    let mut storage = FilesystemKVStorage::new(test_storage.path())?;

    for key in ["", ".", "..", "a/b", "../escape"] {
        assert_matches!(
            storage.append_value(key, b"x"),
            Err(BackendError::InvalidKey(_))
        );
    }
    Ok(())
}

#[test]
fn test_open_writers_limit() -> eyre::Result<()> {
    let test_storage = tempdir()?;
    let mut storage = FilesystemKVStorage::with_max_open_writers(test_storage.path(), 2)?;

    for round in 0..3 {
        for key in ["a", "b", "c", "d"] {
            storage.append_value(key, format!("{key}{round};").as_bytes())?;
        }
    }
    storage.flush()?;

    assert_eq!(std::fs::read_dir(test_storage.path())?.count(), 4);
    assert_eq!(storage.get_value("a")?, b"a0;a1;a2;".to_vec());
    assert_eq!(storage.get_value("d")?, b"d0;d1;d2;".to_vec());
    Ok(())
}

#[test]
fn test_leftovers_are_truncated() -> eyre::Result<()> {
    let test_storage = tempdir()?;
    std::fs::write(test_storage.path().join("555-0100"), b"stale\n")?;

    let mut storage = FilesystemKVStorage::new(test_storage.path())?;
    storage.append_value("555-0100", b"fresh\n")?;
    storage.flush()?;
    assert_eq!(storage.get_value("555-0100")?, b"fresh\n".to_vec());
    Ok(())
}

#[test]
fn test_clear_recreates_directory() -> eyre::Result<()> {
    let test_storage = tempdir()?;
    let root = test_storage.path().join("working-sets");
    let mut storage = FilesystemKVStorage::new(&root)?;

    storage.append_value("1", b"one")?;
    storage.append_value("2", b"two")?;
    storage.clear()?;

    assert!(root.is_dir());
    assert_eq!(std::fs::read_dir(&root)?.count(), 0);
    assert_matches!(storage.get_value("2"), Err(BackendError::NoSuchKey(_)));

    storage.append_value("1", b"again")?;
    storage.flush()?;
    assert_eq!(storage.get_value("1")?, b"again".to_vec());
    Ok(())
}
