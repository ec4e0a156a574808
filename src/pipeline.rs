// Copyright © 2024 Pathway

use log::{error, info, warn};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::config::Config;
use crate::connectors::{export_csv, Partitioner, StoredWorkingSets};
use crate::engine::{Error, PoolReport, Result, ResultSet, WorkerPool};
use crate::persistence::backends::PersistenceBackend;

/// Outcome of a run: the reconciled dates and what happened to each key.
#[derive(Debug)]
pub struct Run {
    pub keys: usize,
    pub results: ResultSet,
    pub report: PoolReport,
}

/// Partitions `source` into `storage` and reconciles every key with a pool
/// of `config.workers()` threads.
pub fn run<R: Read>(
    config: &Config,
    source: R,
    storage: &mut dyn PersistenceBackend,
) -> Result<Run> {
    let pool = WorkerPool::new(config.workers())?;
    run_with_pool(config, source, storage, &pool)
}

/// Same as [`run`], with a pool built by the caller, e.g. to keep its
/// cancellation handle.
pub fn run_with_pool<R: Read>(
    config: &Config,
    source: R,
    storage: &mut dyn PersistenceBackend,
    pool: &WorkerPool,
) -> Result<Run> {
    info!("Start processing, partitioning the input into per-key working sets");
    let keys = Partitioner::new(&mut *storage).partition(source)?;

    info!("Fan out {} keys to {} workers", keys.len(), pool.workers());
    let results = ResultSet::new();
    let report = pool.run(
        &keys,
        &StoredWorkingSets::new(&*storage),
        config.date_layout(),
        &results,
    )?;
    if report.skipped_count() > 0 {
        warn!("{} keys were skipped and are missing from the results", report.skipped_count());
    }

    Ok(Run {
        keys: keys.len(),
        results,
        report,
    })
}

/// Runs the whole job for the log at `input_path`: partition, reconcile,
/// export to `config.result_path()` and clear the working-set storage.
///
/// The storage is cleared even when an earlier stage fails; that failure
/// is the one returned.
pub fn run_file(config: &Config, input_path: &Path) -> Result<Run> {
    let input = File::open(input_path).map_err(|source| {
        error!("Failed to open file {}: {source}", input_path.display());
        Error::InputUnavailable {
            path: input_path.to_path_buf(),
            source,
        }
    })?;
    let mut storage = config.storage().create()?;

    let outcome = run(config, BufReader::new(input), storage.as_mut()).and_then(|finished| {
        info!("Exporting to csv");
        export_csv(config.result_path(), &finished.results, config.headers())?;
        Ok(finished)
    });

    info!("Cleaning up...");
    let teardown = storage.clear();
    match (outcome, teardown) {
        (Ok(finished), Ok(())) => Ok(finished),
        (Ok(_), Err(e)) => {
            error!("Failed to clean up the working sets: {e}");
            Err(e.into())
        }
        (Err(e), teardown) => {
            if let Err(teardown_error) = teardown {
                error!("Failed to clean up the working sets: {teardown_error}");
            }
            Err(e)
        }
    }
}
