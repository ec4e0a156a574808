// Copyright © 2024 Pathway

pub mod export;
pub mod partition;

pub use export::{export_csv, write_results};
pub use partition::{decode_working_set, Partitioner, StoredWorkingSets};
