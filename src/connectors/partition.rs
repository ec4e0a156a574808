// Copyright © 2024 Pathway

use log::{error, info};
use std::collections::HashSet;
use std::io::Read;

use csv::ReaderBuilder as CsvReaderBuilder;
use csv::StringRecord;
use csv::WriterBuilder as CsvWriterBuilder;

use crate::engine::{Error, Interval, Key, LoadWorkingSet, Result};
use crate::persistence::backends::PersistenceBackend;

/// Input rows are `key,activation_date,deactivation_date`.
const INPUT_FIELDS: usize = 3;

/// Stored working-set rows are `activation_date,deactivation_date`.
const STORED_FIELDS: usize = 2;

/// Splits the activation log into one stored working set per key.
pub struct Partitioner<'a> {
    storage: &'a mut dyn PersistenceBackend,
}

impl<'a> Partitioner<'a> {
    pub fn new(storage: &'a mut dyn PersistenceBackend) -> Self {
        Self { storage }
    }

    /// Reads the whole log, skipping its header row, and appends every row
    /// to the working set of its key.
    ///
    /// Returns the distinct keys in the order they were first seen. The
    /// storage is flushed before returning, so every returned key can be
    /// loaded right away. Any malformed row, read error or storage error
    /// aborts the partitioning.
    pub fn partition<R: Read>(&mut self, source: R) -> Result<Vec<Key>> {
        let mut reader = CsvReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let mut keys = Vec::new();
        let mut seen_keys = HashSet::new();
        let mut record = StringRecord::new();
        loop {
            match reader.read_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    error!("Failed to read the input csv: {e}");
                    return Err(e.into());
                }
            }
            if record.len() != INPUT_FIELDS {
                let line = record.position().map_or(0, csv::Position::line);
                error!(
                    "Malformed input record at line {line}: {} fields instead of {INPUT_FIELDS}",
                    record.len()
                );
                return Err(Error::MalformedRecord {
                    line,
                    fields: record.len(),
                    expected: INPUT_FIELDS,
                });
            }

            let key = &record[0];
            let row = encode_row(&record[1], &record[2])?;
            if let Err(e) = self.storage.append_value(key, &row) {
                error!("Failed to write row for key {key:?}: {e}");
                return Err(e.into());
            }
            if !seen_keys.contains(key) {
                seen_keys.insert(key.to_string());
                keys.push(key.to_string());
            }
        }

        self.storage.flush()?;
        info!("Partitioned the input into {} working sets", keys.len());
        Ok(keys)
    }
}

fn encode_row(activation_date: &str, deactivation_date: &str) -> Result<Vec<u8>> {
    let mut row = Vec::new();
    let mut writer = CsvWriterBuilder::new().from_writer(&mut row);
    writer.write_record([activation_date, deactivation_date])?;
    writer.flush()?;
    drop(writer);
    Ok(row)
}

/// Parses the rows of a stored working set, in the order they were written.
pub fn decode_working_set(contents: &[u8]) -> Result<Vec<Interval>> {
    let mut reader = CsvReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(contents);

    let mut intervals = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() != STORED_FIELDS {
            return Err(Error::MalformedRecord {
                line: record.position().map_or(0, csv::Position::line),
                fields: record.len(),
                expected: STORED_FIELDS,
            });
        }
        intervals.push(Interval::new(&record[0], &record[1]));
    }
    Ok(intervals)
}

/// Loads working sets back from the storage filled by a [`Partitioner`].
#[derive(Debug, Clone, Copy)]
pub struct StoredWorkingSets<'a> {
    storage: &'a dyn PersistenceBackend,
}

impl<'a> StoredWorkingSets<'a> {
    pub fn new(storage: &'a dyn PersistenceBackend) -> Self {
        Self { storage }
    }
}

impl LoadWorkingSet for StoredWorkingSets<'_> {
    fn load(&self, key: &str) -> Result<Vec<Interval>> {
        let contents = self.storage.get_value(key)?;
        decode_working_set(&contents)
    }
}
