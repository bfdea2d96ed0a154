use std::collections::HashMap;

use heupath_core::Coord;

/// Walk `predecessors` back from `goal` and return the path from the first
/// coordinate without a predecessor (the start) to `goal`, inclusive.
///
/// If `goal` has no predecessor the result is `[goal]`.
pub fn reconstruct(predecessors: &HashMap<Coord, Coord>, goal: Coord) -> Vec<Coord> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = predecessors.get(&current) {
        // A well-formed map is acyclic; bail out on anything longer.
        if path.len() > predecessors.len() {
            log::warn!("predecessor chain from {goal} does not terminate");
            break;
        }
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
