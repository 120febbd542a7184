mod commands;
mod logging;
mod progress;

use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands};
use dotenv::dotenv;
use progress::CliReporter;
use shutter_sort_core::hasher::{self, Algorithm};
use shutter_sort_core::{scanner, AppConfig, ProgressReporter, SortEngine};
use tracing::{error, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let args = Cli::parse();

    match args.command {
        Some(Commands::Sort { source, dest }) => {
            let config = match resolve_config(source, dest) {
                Ok(config) => config,
                Err(err) => {
                    error!("Error loading configuration: {}", err);
                    process::exit(1);
                }
            };
            if let Err(err) = run_sort(config) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::FindDupes { path, algorithm }) => {
            if let Err(err) = run_find_dupes(&path, &algorithm) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::PrintConfig) => match shutter_sort_core::config::load_configuration() {
            Ok(config) => println!("Configuration: {:?}", config),
            Err(err) => {
                error!("Error loading configuration: {}", err);
                process::exit(1);
            }
        },
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

/// Both paths on the command line → no config file needed; otherwise load
/// Config.toml and let the flags override what they name.
fn resolve_config(
    source: Option<PathBuf>,
    dest: Option<PathBuf>,
) -> Result<AppConfig, Box<dyn std::error::Error>> {
    if let (Some(source), Some(dest)) = (&source, &dest) {
        return Ok(AppConfig {
            source_dir: source.to_string_lossy().into_owned(),
            dest_dir: dest.to_string_lossy().into_owned(),
            ignore_patterns: Vec::new(),
            full_hash_algorithm: "sha512".to_string(),
        });
    }

    let mut config = shutter_sort_core::config::load_configuration()?;
    if let Some(source) = source {
        config.source_dir = source.to_string_lossy().into_owned();
    }
    if let Some(dest) = dest {
        config.dest_dir = dest.to_string_lossy().into_owned();
    }
    Ok(config)
}

fn run_sort(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let engine = SortEngine::new(config);
    let reporter = CliReporter::new();
    let result = engine.run(&reporter)?;

    println!();
    info!(
        "Scan: {}, Relocate: {}, Detect: {}, Purge: {}",
        format!("{:.2}s", result.scan_duration.as_secs_f64()).green(),
        format!("{:.2}s", result.relocate_duration.as_secs_f64()).green(),
        format!("{:.2}s", result.detect_duration.as_secs_f64()).green(),
        format!("{:.2}s", result.purge_duration.as_secs_f64()).green(),
    );
    info!(
        "{} photos found, {} relocated, {} left without a timestamp",
        format!("{}", result.files_found).cyan(),
        format!("{}", result.files_relocated).cyan(),
        format!("{}", result.files_skipped).cyan(),
    );
    info!(
        "{} duplicate groups, {} files with shared content, {} copies purged",
        format!("{}", result.duplicate_groups).red(),
        format!("{}", result.duplicate_files).red(),
        format!("{}", result.files_purged).red(),
    );

    Ok(())
}

fn run_find_dupes(path: &Path, algorithm: &str) -> Result<(), Box<dyn std::error::Error>> {
    let full_algorithm = Algorithm::from_str(algorithm)?;

    let photos = scanner::collect_photos(path, scanner::PHOTO_EXTENSIONS, &[])?;
    info!("Hashing {} photos under {}", photos.len(), path.display());

    let reporter = CliReporter::new();
    reporter.on_detect_start();
    let detect_start = Instant::now();
    let groups = hasher::find_duplicates(&photos, full_algorithm, &reporter)?;
    reporter.on_detect_complete(groups.len(), detect_start.elapsed().as_secs_f64());

    if groups.is_empty() {
        println!("No duplicates found.");
        return Ok(());
    }

    println!("Found {} duplicate group(s):", groups.len());
    for (i, group) in groups.iter().enumerate() {
        println!(" Group {}:", i + 1);
        for file in &group.paths {
            println!("   ▶ {}", file.display());
        }
    }

    Ok(())
}
