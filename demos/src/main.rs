use std::fs;
use std::process::ExitCode;

use clap::Parser;
use heupath_core::Grid;
use heupath_demo::{Args, DemoConfig, DemoError, render, run_search, summary};
use heupath_search::SearchOutcome;

fn main() -> ExitCode {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // Help and version requests also arrive here.
            if let Err(io) = e.print() {
                log::error!("cannot print usage: {io}");
            }
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode, DemoError> {
    if args.example_config {
        println!("{}", serde_json::to_string_pretty(&DemoConfig::default())?);
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = match &args.config {
        Some(path) => {
            log::info!("loading configuration from {}", path.display());
            serde_json::from_str(&fs::read_to_string(path)?)?
        }
        None => DemoConfig::default(),
    };
    args.apply(&mut config);
    config.validate()?;

    let grid = match &args.map {
        Some(path) => {
            log::info!("loading map from {}", path.display());
            Grid::parse(&fs::read_to_string(path)?)?
        }
        None => {
            log::info!(
                "generating {}x{} board (density {}, seed {})",
                config.rows,
                config.cols,
                config.density,
                config.seed
            );
            config.generate_grid()?
        }
    };

    let report = run_search(&grid, &config.search)?;
    println!("{}\n", render(&grid, &report));
    println!("{}", summary(&report));

    Ok(match report.outcome {
        SearchOutcome::Found { .. } | SearchOutcome::Halted { .. } => ExitCode::SUCCESS,
        SearchOutcome::NotFound { .. } => ExitCode::from(2),
    })
}
