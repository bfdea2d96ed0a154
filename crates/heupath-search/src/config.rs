//! Search configuration.
//!
//! The weight `w` selects the algorithm through the evaluation function
//! `f(n) = (2 - w)·g(n) + w·h(n)`: `0` is uniform-cost search, `1` is A* and
//! `2` is greedy best-first search. Values in between blend the two terms.

use std::fmt;
use std::str::FromStr;

use crate::distance::Heuristic;
use crate::error::SearchError;
use crate::frontier::FrontierPolicy;

/// Smallest accepted weight.
pub const MIN_WEIGHT: f64 = 0.0;
/// Largest accepted weight.
pub const MAX_WEIGHT: f64 = 2.0;

/// The three named settings of the weight.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mode {
    #[default]
    Uniform,
    AStar,
    Greedy,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Uniform, Mode::AStar, Mode::Greedy];

    /// The weight this mode stands for.
    #[inline]
    pub fn weight(self) -> f64 {
        match self {
            Mode::Uniform => 0.0,
            Mode::AStar => 1.0,
            Mode::Greedy => 2.0,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Uniform => "Uniform",
            Mode::AStar => "A*",
            Mode::Greedy => "Greedy",
        })
    }
}

impl FromStr for Mode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uniform" | "ucs" | "dijkstra" => Ok(Mode::Uniform),
            "astar" | "a*" | "a_star" => Ok(Mode::AStar),
            "greedy" => Ok(Mode::Greedy),
            _ => Err(SearchError::UnknownMode(s.to_string())),
        }
    }
}

/// Parameters of one search.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Weight `w` in `[0, 2]`.
    pub weight: f64,
    /// Heuristic used for `h(n)`.
    pub heuristic: Heuristic,
    /// Handling of cheaper routes to already-queued cells.
    pub frontier: FrontierPolicy,
    /// Stop after this many loop iterations, returning the path to the next
    /// newly expanded cell. Meant for stepwise inspection.
    pub iteration_cap: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            weight: Mode::default().weight(),
            heuristic: Heuristic::default(),
            frontier: FrontierPolicy::default(),
            iteration_cap: None,
        }
    }
}

impl SearchConfig {
    /// Default configuration with the given weight.
    pub fn new(weight: f64) -> Self {
        Self {
            weight,
            ..Self::default()
        }
    }

    /// Default configuration for a named mode.
    pub fn from_mode(mode: Mode) -> Self {
        Self::new(mode.weight())
    }

    /// Set the heuristic (builder).
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Set the frontier policy (builder).
    pub fn with_frontier(mut self, frontier: FrontierPolicy) -> Self {
        self.frontier = frontier;
        self
    }

    /// Set the iteration cap (builder).
    pub fn with_iteration_cap(mut self, cap: usize) -> Self {
        self.iteration_cap = Some(cap);
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.weight.is_finite() || !(MIN_WEIGHT..=MAX_WEIGHT).contains(&self.weight) {
            return Err(SearchError::InvalidWeight(self.weight));
        }
        Ok(())
    }

    /// The named mode matching this weight exactly, if any.
    pub fn mode(&self) -> Option<Mode> {
        Mode::ALL.into_iter().find(|m| m.weight() == self.weight)
    }

    /// Evaluate `f = (2 - w)·g + w·h`.
    #[inline]
    pub fn f_score(&self, g: u32, h: f64) -> f64 {
        (MAX_WEIGHT - self.weight) * f64::from(g) + self.weight * h
    }
}
