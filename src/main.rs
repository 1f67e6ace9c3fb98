//! Archipelago - Town Report
//!
//! Loads a town file, checks it and prints its quality indices.

use std::path::PathBuf;
use std::process::ExitCode;

use archipelago::core::config::{config, set_config, EditorConfig};
use archipelago::core::error::TownError;
use archipelago::core::types::Uid;
use archipelago::storage::load_from_file;
use archipelago::town::{DistrictType, PathResult, Town, TownMetrics};
use clap::Parser;
use serde::Serialize;

/// Check a town file and report its indices
#[derive(Parser, Debug)]
#[command(name = "archipelago")]
#[command(about = "Validate a town file and print its ENJ, CI and MTA indices")]
struct Args {
    /// Town file to load; an empty town is used when omitted
    path: Option<PathBuf>,

    /// Editor configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Also report access paths from this district
    #[arg(long)]
    origin: Option<Uid>,
}

#[derive(Serialize)]
struct PathReport {
    target: DistrictType,
    #[serde(flatten)]
    result: PathResult,
}

#[derive(Serialize)]
struct Warning {
    message: String,
    uids: Vec<Uid>,
}

impl From<TownError> for Warning {
    fn from(error: TownError) -> Self {
        Self {
            uids: error.uids(),
            message: error.to_string(),
        }
    }
}

#[derive(Serialize)]
struct Report {
    status: String,
    districts: usize,
    links: usize,
    metrics: TownMetrics,
    warnings: Vec<Warning>,
    paths: Vec<PathReport>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let editor_config = match &args.config {
        Some(path) => match EditorConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Invalid configuration {:?}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => EditorConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&editor_config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if set_config(editor_config).is_err() {
        tracing::warn!("Configuration already set, keeping the existing one");
    }

    let (town, status, loaded) = match &args.path {
        Some(path) => match load_from_file(path) {
            Ok(town) => (town, "Correct file".to_string(), true),
            Err(e) => {
                tracing::error!("Failed to load {:?}: {}", path, e);
                (Town::new(), e.to_string(), false)
            }
        },
        None => (Town::new(), "Correct file".to_string(), true),
    };

    let report = build_report(&town, status, args.origin);

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize report: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_report(&report);
    }

    if loaded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn build_report(town: &Town, status: String, origin: Option<Uid>) -> Report {
    let mut warnings: Vec<Warning> = town.audit(config()).into_iter().map(Warning::from).collect();

    let mut paths = Vec::new();
    if let Some(origin) = origin {
        for target in [DistrictType::Transport, DistrictType::Production] {
            match town.path_find(origin, target) {
                Ok(result) => paths.push(PathReport { target, result }),
                Err(e) => {
                    warnings.push(Warning::from(e));
                    break;
                }
            }
        }
    }

    Report {
        status,
        districts: town.len(),
        links: town.link_count(),
        metrics: town.metrics(),
        warnings,
        paths,
    }
}

fn print_report(report: &Report) {
    println!("{}", report.status);
    println!();
    println!("Districts: {}", report.districts);
    println!("Links:     {}", report.links);
    println!();
    println!("ENJ: {:.4}", report.metrics.enj);
    println!("CI:  {:.4}", report.metrics.ci);
    println!("MTA: {:.4}", report.metrics.mta);

    if !report.warnings.is_empty() {
        println!();
        println!("Warnings (safety distance {}):", config().safety_distance);
        for warning in &report.warnings {
            println!("  - {}", warning.message);
        }
    }

    for path in &report.paths {
        println!();
        match path.result.destination() {
            Some(destination) => {
                let hops: Vec<String> = path.result.path.iter().map(|uid| uid.to_string()).collect();
                println!(
                    "Nearest {}: {} via {} (time {:.3})",
                    path.target.name(),
                    destination,
                    hops.join(" -> "),
                    path.result.distance
                );
            }
            None => println!("Nearest {}: unreachable", path.target.name()),
        }
    }
}
