// Copyright © 2024 Pathway

use assert_matches::assert_matches;

use activation_engine::persistence::backends::{MemoryKVStorage, PersistenceBackend};
use activation_engine::persistence::config::PersistentStorageConfig;
use activation_engine::persistence::Error as BackendError;

#[test]
fn test_memory_kv_operations() -> eyre::Result<()> {
    let mut storage = MemoryKVStorage::new();
    storage.append_value("b", b"two")?;
    storage.append_value("a", b"one")?;
    storage.append_value("a", b"more")?;
    storage.flush()?;

    assert_eq!(storage.get_value("a")?, b"onemore".to_vec());
    assert_eq!(storage.get_value("b")?, b"two".to_vec());

    storage.clear()?;
    assert_matches!(storage.get_value("a"), Err(BackendError::NoSuchKey(_)));
    assert_matches!(storage.get_value("b"), Err(BackendError::NoSuchKey(_)));
    Ok(())
}

#[test]
fn test_memory_config_creates_empty_storage() -> eyre::Result<()> {
    let storage = PersistentStorageConfig::Memory.create()?;
    assert_matches!(storage.get_value("555-0100"), Err(BackendError::NoSuchKey(_)));
    Ok(())
}
