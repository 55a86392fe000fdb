mod cli;
mod paths;
mod render;

use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;

use checklist::{Checklist, ChecklistError, NodeId, TreeDocument};
use clap::Parser;
use log::{debug, info};
use simplelog::{Config, WriteLogger};

use crate::cli::Cli;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Checklist(#[from] ChecklistError),
    #[error("Failed to create log file {path}: {source}")]
    Log {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn init_logging(cli: &Cli) -> Result<(), CliError> {
    let path = match &cli.log_file {
        Some(path) => path.clone(),
        None => {
            let Some(path) = paths::log_file() else {
                return Ok(());
            };
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir).map_err(|source| CliError::Log {
                    path: dir.to_path_buf(),
                    source,
                })?;
                paths::rotate_logs(dir);
            }
            path
        }
    };

    let file = File::create(&path).map_err(|source| CliError::Log {
        path: path.clone(),
        source,
    })?;
    // Only fails if a logger is already installed.
    let _ = WriteLogger::init(cli.log_level(), Config::default(), file);
    Ok(())
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let doc = match &cli.input {
        Some(path) => TreeDocument::load(path)?,
        None => TreeDocument::sample(),
    };
    info!("Loaded tree with {} nodes", doc.node_count());

    let mut list = Checklist::new(doc.into_roots());
    for id in &cli.toggles {
        let key = list.require(NodeId(*id))?;
        let (added, removed) = list.toggle(key);
        debug!("Toggled {}: {} added, {} removed", id, added.len(), removed.len());
    }

    Ok(if cli.ids {
        render::render_ids(&list)
    } else {
        render::render(&list)
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(output) => {
            print!("{}", output);
            if cli.ids {
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
