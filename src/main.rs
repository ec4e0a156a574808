// Copyright © 2024 Pathway

use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;

use activation_engine::config::{
    Config, DEFAULT_RESULT_FILE, DEFAULT_TEMP_DIRECTORY, DEFAULT_WORKERS,
};
use activation_engine::persistence::backends::file::DEFAULT_MAX_OPEN_WRITERS;
use activation_engine::persistence::config::PersistentStorageConfig;
use activation_engine::pipeline;

#[derive(Parser, Debug)]
#[command(name = "find-activation-date")]
#[command(about = "Find the real activation date of every phone number in an activation log")]
struct Cli {
    /// Input csv: PHONE_NUMBER,ACTIVATION_DATE,DEACTIVATION_DATE with a header row
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Number of workers
    #[arg(short, long = "worker", visible_alias = "workers", default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Result csv location
    #[arg(short, long, default_value = DEFAULT_RESULT_FILE)]
    output: PathBuf,

    /// Directory for the per-number working sets, emptied when the run ends
    #[arg(long, default_value = DEFAULT_TEMP_DIRECTORY)]
    temp_dir: PathBuf,

    /// Maximum number of working-set files kept open while partitioning
    #[arg(long, default_value_t = DEFAULT_MAX_OPEN_WRITERS)]
    max_open_files: usize,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let Some(input) = cli.input else {
        error!("Please input your csv");
        return ExitCode::FAILURE;
    };

    let config = Config::default()
        .with_workers(cli.workers)
        .with_result_path(cli.output)
        .with_storage(PersistentStorageConfig::Filesystem {
            root_path: cli.temp_dir,
            max_open_writers: cli.max_open_files,
        });

    match pipeline::run_file(&config, &input) {
        Ok(run) => {
            info!(
                "Done. {} numbers reconciled, {} skipped",
                run.results.len(),
                run.report.skipped_count()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
