//! The weighted best-first search loop.
//!
//! [`Search`] holds all per-invocation state (cost map, predecessor map,
//! frontier and explored set) and can be driven one iteration at a time with
//! [`Search::step`] or to completion with [`Search::run`]. The free
//! functions [`search`], [`search_with`] and [`search_grid`] cover the
//! one-shot case.

use std::collections::{HashMap, HashSet};

use heupath_core::{Coord, Grid};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::frontier::{Frontier, FrontierPolicy};
use crate::neighbors::Neighbors;
use crate::outcome::{SearchOutcome, SearchStats};
use crate::path::reconstruct;
use crate::traits::SearchSpace;

/// What a single call to [`Search::step`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// The cell was popped and expanded.
    Expanded(Coord),
    /// The cell was popped but had already been expanded.
    Skipped(Coord),
    /// The search is over; see [`Search::outcome`].
    Done,
}

/// An in-progress search over a borrowed, read-only space.
pub struct Search<'a, S: SearchSpace + ?Sized> {
    space: &'a S,
    start: Coord,
    goal: Coord,
    config: SearchConfig,
    frontier: Frontier,
    costs: HashMap<Coord, u32>,
    predecessors: HashMap<Coord, Coord>,
    explored: HashSet<Coord>,
    expansion_order: Vec<Coord>,
    neighbors: Neighbors,
    stats: SearchStats,
    outcome: Option<SearchOutcome>,
}

impl<'a, S: SearchSpace + ?Sized> Search<'a, S> {
    /// Prepare a search from `start` to `goal`.
    ///
    /// Fails if the configuration is invalid or either endpoint is outside
    /// the space or blocked. When `start == goal` the search is already
    /// finished with a single-cell path.
    pub fn new(
        space: &'a S,
        start: Coord,
        goal: Coord,
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        for c in [start, goal] {
            if !space.in_bounds(c) {
                return Err(SearchError::OutOfBounds {
                    coord: c,
                    bounds: space.bounds(),
                });
            }
            if space.is_blocked(c) {
                return Err(SearchError::BlockedEndpoint(c));
            }
        }

        let mut search = Self {
            space,
            start,
            goal,
            config,
            frontier: Frontier::new(),
            costs: HashMap::new(),
            predecessors: HashMap::new(),
            explored: HashSet::new(),
            expansion_order: Vec::new(),
            neighbors: Neighbors::new(),
            stats: SearchStats::default(),
            outcome: None,
        };

        log::debug!(
            "search {} -> {} (weight {}, {} heuristic, {:?})",
            start,
            goal,
            config.weight,
            config.heuristic,
            config.frontier
        );

        if start == goal {
            search.outcome = Some(SearchOutcome::Found { path: vec![start] });
            return Ok(search);
        }

        let h0 = search.h(start);
        search.costs.insert(start, 0);
        search.frontier.push(start, h0);
        search.stats.pushes = 1;
        search.stats.peak_frontier = 1;
        Ok(search)
    }

    /// Perform one loop iteration.
    pub fn step(&mut self) -> Step {
        if self.outcome.is_some() {
            return Step::Done;
        }

        let Some(entry) = self.frontier.pop() else {
            log::debug!(
                "frontier exhausted after {} expansions; {} unreachable",
                self.stats.expansions,
                self.goal
            );
            self.outcome = Some(SearchOutcome::NotFound {
                explored: self.expansion_order.clone(),
            });
            return Step::Done;
        };
        let current = entry.coord;

        if !self.explored.insert(current) {
            log::trace!("skip {current}: already expanded");
            self.stats.skipped += 1;
            self.stats.iterations += 1;
            return Step::Skipped(current);
        }
        self.expansion_order.push(current);
        self.stats.expansions += 1;

        if current == self.goal {
            let path = reconstruct(&self.predecessors, current);
            log::debug!(
                "reached {} in {} steps after {} expansions",
                current,
                path.len() - 1,
                self.stats.expansions
            );
            self.outcome = Some(SearchOutcome::Found { path });
            return Step::Done;
        }

        if self
            .config
            .iteration_cap
            .is_some_and(|cap| self.stats.iterations >= cap)
        {
            log::debug!(
                "iteration cap reached at {} after {} iterations",
                current,
                self.stats.iterations
            );
            self.outcome = Some(SearchOutcome::Halted {
                path: reconstruct(&self.predecessors, current),
            });
            return Step::Done;
        }

        log::trace!("expand {} (f = {:.3}, seq {})", current, entry.f, entry.seq);

        // Every queued cell has been costed before it was pushed.
        let g = self.costs.get(&current).copied().unwrap_or_default();
        let mut neighbors = std::mem::take(&mut self.neighbors);
        for &n in neighbors.of(self.space, current) {
            self.relax(current, g, n);
        }
        self.neighbors = neighbors;

        self.stats.peak_frontier = self.stats.peak_frontier.max(self.frontier.len());
        self.stats.iterations += 1;
        Step::Expanded(current)
    }

    /// Step until the search finishes and return its outcome.
    pub fn run(&mut self) -> SearchOutcome {
        loop {
            if let Some(outcome) = &self.outcome {
                return outcome.clone();
            }
            self.step();
        }
    }

    /// Consume the search, running it to completion.
    pub fn into_outcome(mut self) -> SearchOutcome {
        self.run();
        self.outcome.unwrap_or(SearchOutcome::NotFound {
            explored: self.expansion_order,
        })
    }

    fn relax(&mut self, current: Coord, g: u32, n: Coord) {
        let tentative = g + 1;
        if self.costs.get(&n).is_some_and(|&old| tentative >= old) {
            return;
        }
        self.costs.insert(n, tentative);
        self.predecessors.insert(n, current);

        let f = self.config.f_score(tentative, self.h(n));
        if self.stats.closest.is_none_or(|(_, best)| f < best) {
            log::debug!("closest so far: f = {f:.3} at {n}");
            self.stats.closest = Some((n, f));
        }

        if !self.frontier.contains(n) {
            self.frontier.push(n, f);
            self.stats.pushes += 1;
        } else if self.config.frontier == FrontierPolicy::DecreaseKey
            && self.frontier.decrease_key(n, f)
        {
            self.stats.decreased += 1;
        }
    }

    #[inline]
    fn h(&self, c: Coord) -> f64 {
        self.config.heuristic.estimate(c, self.goal)
    }

    // -----------------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------------

    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Coord {
        self.goal
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The outcome, once the search has finished.
    #[inline]
    pub fn outcome(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.outcome.is_some()
    }

    /// Best known cost from the start to `c`.
    #[inline]
    pub fn cost(&self, c: Coord) -> Option<u32> {
        self.costs.get(&c).copied()
    }

    /// Cell `c` was reached from along its best known route.
    #[inline]
    pub fn predecessor(&self, c: Coord) -> Option<Coord> {
        self.predecessors.get(&c).copied()
    }

    /// Path from the start to `c` along current predecessors.
    pub fn path_to(&self, c: Coord) -> Vec<Coord> {
        reconstruct(&self.predecessors, c)
    }

    /// Whether `c` has been expanded.
    #[inline]
    pub fn is_explored(&self, c: Coord) -> bool {
        self.explored.contains(&c)
    }

    /// Expanded cells in expansion order.
    #[inline]
    pub fn explored(&self) -> &[Coord] {
        &self.expansion_order
    }

    #[inline]
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    #[inline]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

/// Search `grid` from `start` to `goal` with weight `weight` and otherwise
/// default settings.
pub fn search(
    grid: &Grid,
    start: Coord,
    goal: Coord,
    weight: f64,
) -> Result<SearchOutcome, SearchError> {
    search_with(grid, start, goal, &SearchConfig::new(weight))
}

/// Search any [`SearchSpace`] with a full configuration.
pub fn search_with<S: SearchSpace + ?Sized>(
    space: &S,
    start: Coord,
    goal: Coord,
    config: &SearchConfig,
) -> Result<SearchOutcome, SearchError> {
    Ok(Search::new(space, start, goal, *config)?.into_outcome())
}

/// Search `grid` between its own start and goal cells.
pub fn search_grid(grid: &Grid, config: &SearchConfig) -> Result<SearchOutcome, SearchError> {
    search_with(grid, grid.start(), grid.goal(), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use crate::distance::{Heuristic, chebyshev};
    use heupath_core::GridEditor;

    fn c(row: i32, col: i32) -> Coord {
        Coord::new(row, col)
    }

    fn grid(map: &str) -> Grid {
        Grid::parse(map).unwrap()
    }

    #[test]
    fn astar_takes_the_diagonal_on_open_grid() {
        let g = Grid::new(3, 3).unwrap();
        let out = search(&g, c(0, 0), c(2, 2), 1.0).unwrap();
        assert_eq!(
            out,
            SearchOutcome::Found {
                path: vec![c(0, 0), c(1, 1), c(2, 2)]
            }
        );
    }

    #[test]
    fn uniform_detours_around_wall() {
        let g = grid("S#G\n.#.\n...");
        let out = search(&g, c(0, 0), c(0, 2), 0.0).unwrap();
        assert_eq!(out.steps(), Some(4));
        assert_eq!(
            out.path().unwrap(),
            &[c(0, 0), c(1, 0), c(2, 1), c(1, 2), c(0, 2)]
        );
    }

    #[test]
    fn start_equal_goal_short_circuits() {
        let mut ed = GridEditor::new(10, 10).unwrap();
        ed.move_start(c(5, 5)).unwrap();
        let g = ed.snapshot();
        let mut s = Search::new(&g, c(5, 5), c(5, 5), SearchConfig::default()).unwrap();
        assert!(s.is_done());
        assert_eq!(s.run(), SearchOutcome::Found { path: vec![c(5, 5)] });
        assert_eq!(s.stats().expansions, 0);
        assert_eq!(s.stats().pushes, 0);
        assert!(s.frontier().is_empty());
    }

    #[test]
    fn enclosed_goal_is_not_found() {
        let g = grid(
            "S......\n\
             .......\n\
             ..###..\n\
             ..#G#..\n\
             ..###..\n\
             .......\n\
             .......",
        );
        let out = search_grid(&g, &SearchConfig::from_mode(Mode::AStar)).unwrap();
        let explored: HashSet<_> = out.explored().unwrap().iter().copied().collect();
        assert_eq!(explored.len(), 49 - 8 - 1);
        assert_eq!(out.explored().unwrap().len(), explored.len());
        for (coord, cell) in g.iter() {
            let outside_ring = !cell.is_barrier() && coord != g.goal();
            assert_eq!(explored.contains(&coord), outside_ring, "{coord}");
        }
    }

    #[test]
    fn preconditions_are_checked() {
        let g = grid("S#.\n...\n..G");
        assert_eq!(
            search(&g, c(3, 0), c(2, 2), 1.0),
            Err(SearchError::OutOfBounds {
                coord: c(3, 0),
                bounds: g.bounds()
            })
        );
        assert!(matches!(
            search(&g, c(0, 0), c(-1, 2), 1.0),
            Err(SearchError::OutOfBounds { .. })
        ));
        assert_eq!(
            search(&g, c(0, 1), c(2, 2), 1.0),
            Err(SearchError::BlockedEndpoint(c(0, 1)))
        );
        assert_eq!(
            search(&g, c(0, 0), c(2, 2), 2.5),
            Err(SearchError::InvalidWeight(2.5))
        );
    }

    #[test]
    fn uniform_path_length_is_chebyshev_distance() {
        let g = Grid::new(8, 11).unwrap();
        for goal in [c(7, 10), c(0, 10), c(7, 0), c(3, 9), c(4, 4)] {
            let out = search(&g, c(0, 0), goal, 0.0).unwrap();
            assert_eq!(out.steps(), Some(chebyshev(c(0, 0), goal) as usize));
        }
    }

    #[test]
    fn stepping_reports_progress() {
        let g = Grid::new(3, 3).unwrap();
        let mut s = Search::new(&g, c(0, 0), c(2, 2), SearchConfig::from_mode(Mode::AStar))
            .unwrap();
        assert_eq!(s.step(), Step::Expanded(c(0, 0)));
        assert_eq!(s.cost(c(1, 1)), Some(1));
        assert_eq!(s.predecessor(c(1, 1)), Some(c(0, 0)));
        assert!(s.frontier().contains(c(1, 1)));
        assert_eq!(s.step(), Step::Expanded(c(1, 1)));
        assert_eq!(s.step(), Step::Done);
        assert_eq!(s.step(), Step::Done);
        assert_eq!(s.explored(), &[c(0, 0), c(1, 1), c(2, 2)]);
        assert!(s.outcome().is_some_and(SearchOutcome::is_found));
    }

    // With Euclidean h the cheaper route to (1, 2) is found while it sits
    // in the frontier at a stale priority.
    const STALE_PRIORITY_MAP: &str = "G..#\n##..\n..#.\n.#.S";

    #[test]
    fn keep_first_leaves_stale_priority_in_frontier() {
        let g = grid(STALE_PRIORITY_MAP);
        let mut s = Search::new(&g, g.start(), g.goal(), SearchConfig::from_mode(Mode::AStar))
            .unwrap();
        for expected in [c(3, 3), c(3, 2), c(2, 1), c(2, 3)] {
            assert_eq!(s.step(), Step::Expanded(expected));
        }
        // First reached from (2, 1) at cost 3, then from (2, 3) at cost 2.
        assert_eq!(s.cost(c(1, 2)), Some(2));
        assert_eq!(s.path_to(c(1, 2)), vec![c(3, 3), c(2, 3), c(1, 2)]);
        assert_eq!(s.frontier().priority(c(1, 2)), Some(3.0 + 5f64.sqrt()));
        let mut queued: Vec<_> = s.frontier().coords().collect();
        queued.sort();
        assert_eq!(queued, vec![c(1, 2), c(1, 3), c(2, 0), c(3, 0)]);
    }

    #[test]
    fn decrease_key_recovers_shortest_path_keep_first_misses() {
        let g = grid(STALE_PRIORITY_MAP);
        let shortest = search_grid(&g, &SearchConfig::from_mode(Mode::Uniform)).unwrap();
        assert_eq!(shortest.steps(), Some(4));

        let astar = SearchConfig::from_mode(Mode::AStar);
        let mut keep = Search::new(&g, g.start(), g.goal(), astar).unwrap();
        let out = keep.run();
        assert_eq!(
            out.path().unwrap(),
            &[c(3, 3), c(2, 3), c(1, 3), c(0, 2), c(0, 1), c(0, 0)]
        );
        assert_eq!(keep.stats().decreased, 0);

        let cfg = astar.with_frontier(FrontierPolicy::DecreaseKey);
        let mut lowered = Search::new(&g, g.start(), g.goal(), cfg).unwrap();
        let out = lowered.run();
        assert_eq!(out.path().unwrap(), &[c(3, 3), c(2, 3), c(1, 2), c(0, 1), c(0, 0)]);
        assert_eq!(out.steps(), shortest.steps());
        assert_eq!(lowered.stats().decreased, 1);
    }

    #[test]
    fn closest_tracks_lowest_f() {
        let g = Grid::new(3, 3).unwrap();
        let mut s = Search::new(&g, c(0, 0), c(2, 2), SearchConfig::from_mode(Mode::AStar))
            .unwrap();
        s.run();
        assert_eq!(s.stats().closest, Some((c(2, 2), 2.0)));
    }

    #[test]
    fn iteration_cap_halts_with_partial_path() {
        let g = Grid::new(10, 10).unwrap();
        let cfg = SearchConfig::from_mode(Mode::AStar).with_iteration_cap(3);
        let mut s = Search::new(&g, c(0, 0), c(9, 9), cfg).unwrap();
        let out = s.run();
        let SearchOutcome::Halted { path } = out else {
            panic!("expected a halted search, got {out:?}");
        };
        assert_eq!(path.first(), Some(&c(0, 0)));
        assert_eq!(path, vec![c(0, 0), c(1, 1), c(2, 2), c(3, 3)]);
        assert_eq!(s.stats().iterations, 3);
    }

    #[test]
    fn zero_cap_halts_on_start() {
        let g = Grid::new(4, 4).unwrap();
        let cfg = SearchConfig::default().with_iteration_cap(0);
        let out = search_grid(&g, &cfg).unwrap();
        assert_eq!(out, SearchOutcome::Halted { path: vec![c(0, 0)] });
    }

    #[test]
    fn cap_does_not_preempt_goal() {
        let g = Grid::new(3, 3).unwrap();
        let cfg = SearchConfig::from_mode(Mode::AStar).with_iteration_cap(2);
        let out = search_grid(&g, &cfg).unwrap();
        assert!(out.is_found());
    }

    #[test]
    fn chebyshev_astar_is_optimal_on_open_grid() {
        let g = Grid::new(12, 12).unwrap();
        let cfg = SearchConfig::from_mode(Mode::AStar).with_heuristic(Heuristic::Chebyshev);
        let out = search_with(&g, c(0, 3), c(11, 7), &cfg).unwrap();
        assert_eq!(out.steps(), Some(11));
    }
}
