#![warn(clippy::pedantic)]

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use anyhow::anyhow;
use clap::{ArgAction, Parser};
use log::LevelFilter;

use simple531_app as app;
use simple531_domain as domain;
use simple531_storage::FileStorage;

use command::Command;

mod command;

/// Training maxes and working sets for the 5/3/1 program.
#[derive(Parser, Debug)]
#[command(name = "simple531", version)]
struct Cli {
    /// Directory holding settings and log
    #[arg(long, env = "SIMPLE531_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,
    /// Print more messages (repeatable)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    fn data_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join("simple531"))
                .ok_or_else(|| anyhow!("no data directory found, use --data-dir")),
        }
    }

    fn max_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let storage = FileStorage::new(cli.data_dir()?);
    init_logging(&storage, cli.max_level());

    let output = command::run(
        cli.command.unwrap_or_default(),
        &domain::Service::new(storage.clone()),
        &app::Service::new(storage),
    )?;
    print!("{output}");

    Ok(())
}

fn init_logging(storage: &FileStorage, max_level: LevelFilter) {
    let _ = app::log::init(Arc::new(Mutex::new(storage.clone())), max_level);
}
