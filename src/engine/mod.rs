// Copyright © 2024 Pathway

pub mod error;
pub mod interval;
pub mod pool;
pub mod reconcile;
pub mod result_set;

pub use error::{Error, Result};
pub use interval::{sort_intervals, DateLayout, Interval};
pub use pool::{
    process_key, CancellationHandle, KeyOutcome, LoadWorkingSet, PoolReport, SkipReason,
    WorkerPool,
};
pub use reconcile::find_real_activation;
pub use result_set::ResultSet;

/// Grouping identifier of a working set, a phone number in the input log.
pub type Key = String;
