mod commands;
mod logging;
mod progress;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands};
use dotenv::dotenv;
use progress::CliReporter;
use spacehog_core::format::{format_size, parse_size};
use spacehog_core::{deleter, AppConfig, ScanEngine, ScanOptions, ScanState};
use tracing::error;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match spacehog_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    match args.command {
        Some(Commands::Scan {
            root,
            top,
            min_size,
        }) => run_scan(&config, root, top, min_size)?,
        Some(Commands::Delete { paths, yes }) => run_delete(&paths, yes)?,
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

fn run_scan(
    config: &AppConfig,
    root: PathBuf,
    top: usize,
    min_size: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ScanOptions::from_config(config)?;
    if let Some(min) = min_size {
        options.min_size_bytes = parse_size(&min)?;
    }

    let engine = ScanEngine::new(options);
    let summary = engine.scan_blocking(root, Arc::new(CliReporter::new()))?;

    println!();
    for record in summary.records.iter().take(top) {
        println!(
            "{:>12}  {:>16}  {}",
            format_size(record.size_bytes).green(),
            record.size_bytes,
            record.path.display()
        );
    }
    if summary.records.len() > top {
        println!("... and {} more", summary.records.len() - top);
    }

    println!(
        "\n{} files, {} total",
        summary.files_scanned.to_string().bold(),
        format_size(summary.total_bytes).bold()
    );

    if !summary.errors.is_empty() {
        println!(
            "{}",
            format!("{} paths could not be read:", summary.errors.len()).yellow()
        );
        for err in summary.errors.iter().take(10) {
            println!("  {}", err.to_string().yellow());
        }
        if summary.errors.len() > 10 {
            println!("  ... and {} more", summary.errors.len() - 10);
        }
    }

    if summary.state == ScanState::Failed {
        process::exit(1);
    }

    Ok(())
}

fn run_delete(paths: &[PathBuf], yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !yes {
        let prompt = format!(
            "Are you sure you want to delete {} file(s)? This cannot be undone",
            paths.len()
        );
        if !prompt_confirm(&prompt, Some(false))? {
            println!("Aborted, nothing deleted");
            return Ok(());
        }
    }

    let results = deleter::delete_files(paths);

    let mut deleted = 0usize;
    for result in &results {
        if result.succeeded {
            deleted += 1;
        } else if let Some(err) = &result.error {
            println!("{}", format!("failed: {}", err).red());
        }
    }

    let failed = results.len() - deleted;
    if failed > 0 {
        println!(
            "Deleted {} file(s), {} failed",
            deleted.to_string().green(),
            failed.to_string().red()
        );
    } else {
        println!("Deleted {} file(s)", deleted.to_string().green());
    }

    Ok(())
}

fn prompt_confirm(prompt: &str, default: Option<bool>) -> io::Result<bool> {
    let mut input = String::new();

    loop {
        input.clear();

        match default {
            Some(true) => print!("{} (Y/n): ", prompt),
            Some(false) | None => print!("{} (y/N): ", prompt),
        }
        io::stdout().flush()?;

        io::stdin().read_line(&mut input)?;

        match input.trim().to_uppercase().as_str() {
            "Y" => return Ok(true),
            "N" => return Ok(false),
            "" => match default {
                Some(default) => return Ok(default),
                None => continue,
            },
            _ => continue,
        }
    }
}
