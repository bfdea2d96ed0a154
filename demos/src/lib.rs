//! Shared pieces of the `heupath-demo` command-line tool.
//!
//! Loads a grid from an ASCII map (or scatters barriers over an empty board),
//! runs one weighted best-first search and renders the result as text.

use std::collections::HashSet;
use std::path::PathBuf;

use clap::Parser;
use heupath_core::{Coord, Grid, GridEditor, GridError};
use heupath_search::{
    FrontierPolicy, Heuristic, Mode, Search, SearchConfig, SearchError, SearchOutcome, SearchStats,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Board size used when no map is given.
pub const DEFAULT_ROWS: i32 = 40;
pub const DEFAULT_COLS: i32 = 40;

pub const PATH_SYMBOL: char = '*';
pub const EXPLORED_SYMBOL: char = 'o';

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("invalid demo configuration: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Search(#[from] SearchError),
}

// ---------------------------------------------------------------------------
// DemoConfig
// ---------------------------------------------------------------------------

/// Settings for a generated board and the search run on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Rows of a generated board.
    pub rows: i32,
    /// Columns of a generated board.
    pub cols: i32,
    /// Barrier probability per cell of a generated board.
    pub density: f64,
    /// Seed for the barrier scatter.
    pub seed: u64,
    pub search: SearchConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            density: 0.25,
            seed: 42,
            search: SearchConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), DemoError> {
        if self.rows <= 0 || self.cols <= 0 {
            return Err(DemoError::Config(format!(
                "board must have positive dimensions, got {}x{}",
                self.rows, self.cols
            )));
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(DemoError::Config(format!(
                "density must be within [0, 1], got {}",
                self.density
            )));
        }
        self.search.validate()?;
        Ok(())
    }

    /// Build an empty board with seeded random barriers.
    pub fn generate_grid(&self) -> Result<Grid, DemoError> {
        let mut editor = GridEditor::new(self.rows, self.cols)?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        editor.scatter_barriers(&mut rng, self.density)?;
        Ok(editor.into_grid())
    }
}

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Run a weighted best-first search and print the result.
#[derive(Debug, Clone, Parser)]
#[command(name = "heupath-demo", version)]
pub struct Args {
    /// ASCII map ('.' free, '#' barrier, 'S' start, 'G' goal). Without a
    /// map a random board is generated.
    pub map: Option<PathBuf>,

    /// JSON demo configuration
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// uniform, astar or greedy
    #[arg(long)]
    pub mode: Option<Mode>,

    /// Weight in [0, 2]; overrides --mode
    #[arg(long, value_name = "W")]
    pub weight: Option<f64>,

    /// euclidean or chebyshev
    #[arg(long)]
    pub heuristic: Option<Heuristic>,

    /// Lower queued priorities when a cheaper route is found
    #[arg(long)]
    pub decrease_key: bool,

    /// Stop after N iterations
    #[arg(long, value_name = "N")]
    pub cap: Option<usize>,

    /// Seed for the generated board
    #[arg(long)]
    pub seed: Option<u64>,

    /// Barrier density for the generated board
    #[arg(long)]
    pub density: Option<f64>,

    /// Print an example configuration and exit
    #[arg(long)]
    pub example_config: bool,
}

impl Args {
    /// Apply command-line overrides on top of `config`.
    pub fn apply(&self, config: &mut DemoConfig) {
        if let Some(mode) = self.mode {
            config.search.weight = mode.weight();
        }
        if let Some(w) = self.weight {
            config.search.weight = w;
        }
        if let Some(h) = self.heuristic {
            config.search.heuristic = h;
        }
        if self.decrease_key {
            config.search.frontier = FrontierPolicy::DecreaseKey;
        }
        if self.cap.is_some() {
            config.search.iteration_cap = self.cap;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(d) = self.density {
            config.density = d;
        }
    }
}

// ---------------------------------------------------------------------------
// Running and rendering
// ---------------------------------------------------------------------------

/// Everything the tool prints about one search.
#[derive(Debug, Clone)]
pub struct Report {
    pub outcome: SearchOutcome,
    pub explored: Vec<Coord>,
    pub stats: SearchStats,
}

/// Search `grid` between its own endpoints.
pub fn run_search(grid: &Grid, config: &SearchConfig) -> Result<Report, DemoError> {
    let mut search = Search::new(grid, grid.start(), grid.goal(), *config)?;
    let outcome = search.run();
    log::info!(
        "{} search finished after {} iterations",
        config
            .mode()
            .map_or_else(|| format!("w={}", config.weight), |m| m.to_string()),
        search.stats().iterations
    );
    Ok(Report {
        outcome,
        explored: search.explored().to_vec(),
        stats: search.stats().clone(),
    })
}

/// Draw `grid` with the path and explored cells overlaid.
pub fn render(grid: &Grid, report: &Report) -> String {
    let path: HashSet<Coord> = report
        .outcome
        .path()
        .map(|p| p.iter().copied().collect())
        .unwrap_or_default();
    let explored: HashSet<Coord> = report.explored.iter().copied().collect();

    let mut out = String::with_capacity(grid.len() + grid.rows() as usize);
    for (c, cell) in grid.iter() {
        if c.col == 0 && c.row > 0 {
            out.push('\n');
        }
        let sym = cell.symbol();
        out.push(if sym != '.' {
            sym
        } else if path.contains(&c) {
            PATH_SYMBOL
        } else if explored.contains(&c) {
            EXPLORED_SYMBOL
        } else {
            sym
        });
    }
    out
}

/// One-paragraph summary of a report.
pub fn summary(report: &Report) -> String {
    let headline = match &report.outcome {
        SearchOutcome::Found { path } => {
            format!("found: {} steps", path.len().saturating_sub(1))
        }
        SearchOutcome::Halted { path } => format!(
            "halted by iteration cap: partial path of {} steps",
            path.len().saturating_sub(1)
        ),
        SearchOutcome::NotFound { explored } => {
            format!("no path: {} cells explored", explored.len())
        }
    };
    let st = &report.stats;
    format!(
        "{headline}\niterations {}, expansions {}, skipped {}, pushes {}, decreased {}, peak frontier {}",
        st.iterations, st.expansions, st.skipped, st.pushes, st.decreased, st.peak_frontier
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("heupath-demo").chain(list.iter().copied()))
    }

    #[test]
    fn parses_flags_and_map() {
        let a = args(&[
            "maze.txt",
            "--mode",
            "astar",
            "--heuristic",
            "chebyshev",
            "--cap",
            "12",
            "--decrease-key",
        ])
        .unwrap();
        assert_eq!(a.map, Some(PathBuf::from("maze.txt")));
        assert_eq!(a.mode, Some(Mode::AStar));
        assert_eq!(a.heuristic, Some(Heuristic::Chebyshev));
        assert_eq!(a.cap, Some(12));
        assert!(a.decrease_key);
        assert!(!a.example_config);
    }

    #[test]
    fn rejects_bad_arguments() {
        use clap::error::ErrorKind;

        assert!(args(&["--weight"]).is_err());
        assert!(args(&["a.txt", "b.txt"]).is_err());
        assert_eq!(
            args(&["--cap", "x"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
        assert_eq!(
            args(&["--bogus"]).unwrap_err().kind(),
            ErrorKind::UnknownArgument
        );
        assert_eq!(
            args(&["--mode", "bfs"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn weight_overrides_mode() {
        let a = args(&["--mode", "greedy", "--weight", "0.5", "--seed", "9"]).unwrap();
        let mut cfg = DemoConfig::default();
        a.apply(&mut cfg);
        assert_eq!(cfg.search.weight, 0.5);
        assert_eq!(cfg.seed, 9);
        assert_eq!(cfg.search.frontier, FrontierPolicy::KeepFirst);
    }

    #[test]
    fn config_validation() {
        assert!(DemoConfig::default().validate().is_ok());
        let bad = DemoConfig {
            density: 1.2,
            ..DemoConfig::default()
        };
        assert!(matches!(bad.validate(), Err(DemoError::Config(_))));
        let mut bad_weight = DemoConfig::default();
        bad_weight.search.weight = 3.0;
        assert!(matches!(
            bad_weight.validate(),
            Err(DemoError::Search(SearchError::InvalidWeight(_)))
        ));
    }

    #[test]
    fn config_json_round_trip() {
        let cfg = DemoConfig::default();
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let back: DemoConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
        let partial: DemoConfig = serde_json::from_str(r#"{ "rows": 10 }"#).unwrap();
        assert_eq!(partial.rows, 10);
        assert_eq!(partial.cols, DEFAULT_COLS);
    }

    #[test]
    fn generated_grid_is_reproducible() {
        let cfg = DemoConfig {
            rows: 12,
            cols: 9,
            ..DemoConfig::default()
        };
        let a = cfg.generate_grid().unwrap();
        let b = cfg.generate_grid().unwrap();
        assert_eq!(a, b);
        assert_eq!((a.rows(), a.cols()), (12, 9));
        assert_eq!(a.start(), Coord::new(0, 0));
        assert_eq!(a.goal(), Coord::new(11, 8));
    }

    #[test]
    fn render_overlays_path() {
        let grid = Grid::parse("S#G\n.#.\n...").unwrap();
        let report = run_search(&grid, &SearchConfig::default()).unwrap();
        assert_eq!(render(&grid, &report), "S#G\n*#*\no*o");
        assert_eq!(
            summary(&report),
            "found: 4 steps\n\
             iterations 6, expansions 7, skipped 0, pushes 7, decreased 0, peak frontier 2"
        );
    }

    #[test]
    fn render_marks_explored_cells_when_unreachable() {
        let grid = Grid::parse("S.#G\n..#.").unwrap();
        let report = run_search(&grid, &SearchConfig::default()).unwrap();
        assert_eq!(render(&grid, &report), "So#G\noo#.");
        assert!(summary(&report).starts_with("no path: 4 cells explored"));
    }
}
