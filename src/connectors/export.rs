// Copyright © 2024 Pathway

use log::{error, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::WriterBuilder as CsvWriterBuilder;

use crate::config::Headers;
use crate::engine::{Error, Result, ResultSet};

/// Writes the header row and then one `key,real_activation_date` row per
/// key, ordered by key.
pub fn write_results<W: Write>(output: W, results: &ResultSet, headers: &Headers) -> Result<()> {
    let mut writer = CsvWriterBuilder::new().from_writer(output);
    writer.write_record([headers.key.as_str(), headers.real_activation_date.as_str()])?;
    for (key, real_activation_date) in results.sorted_entries() {
        writer.write_record([key.as_str(), real_activation_date.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn export_csv(path: &Path, results: &ResultSet, headers: &Headers) -> Result<()> {
    let file = File::create(path).map_err(|source| {
        error!("Failed to create file {}: {source}", path.display());
        Error::OutputUnavailable {
            path: path.to_path_buf(),
            source,
        }
    })?;
    write_results(BufWriter::new(file), results, headers)?;
    info!("Exported {} results to {}", results.len(), path.display());
    Ok(())
}
