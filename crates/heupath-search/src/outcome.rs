use heupath_core::Coord;

/// Result of a finished search.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOutcome {
    /// The goal was reached. `path` runs from start to goal inclusive.
    Found { path: Vec<Coord> },
    /// The frontier ran dry. `explored` lists every expanded cell in
    /// expansion order, each exactly once.
    NotFound { explored: Vec<Coord> },
    /// The iteration cap stopped the search. `path` runs from the start to
    /// the cell that was being expanded.
    Halted { path: Vec<Coord> },
}

impl SearchOutcome {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }

    /// The path for `Found` and `Halted` outcomes.
    pub fn path(&self) -> Option<&[Coord]> {
        match self {
            SearchOutcome::Found { path } | SearchOutcome::Halted { path } => Some(path),
            SearchOutcome::NotFound { .. } => None,
        }
    }

    /// The explored cells of a `NotFound` outcome.
    pub fn explored(&self) -> Option<&[Coord]> {
        match self {
            SearchOutcome::NotFound { explored } => Some(explored),
            _ => None,
        }
    }

    /// Number of moves along the path.
    pub fn steps(&self) -> Option<usize> {
        self.path().map(|p| p.len().saturating_sub(1))
    }
}

/// Counters collected while a search runs.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Loop iterations, including discarded pops.
    pub iterations: usize,
    /// Cells added to the explored set.
    pub expansions: usize,
    /// Pops discarded because the cell was already explored.
    pub skipped: usize,
    /// Frontier insertions.
    pub pushes: usize,
    /// Queued priorities lowered in place.
    pub decreased: usize,
    /// Largest number of queued cells at any time.
    pub peak_frontier: usize,
    /// Cell with the lowest f-score computed so far, with that score.
    pub closest: Option<(Coord, f64)>,
}
