use std::fmt;
use std::str::FromStr;

use heupath_core::Coord;

use crate::error::SearchError;

/// Straight-line (L2) distance between two coordinates.
///
/// Under the unit step cost used by the search a diagonal move costs 1, not
/// √2, so this overestimates the remaining cost along diagonals.
#[inline]
pub fn euclidean(a: Coord, b: Coord) -> f64 {
    let dr = f64::from(a.row - b.row);
    let dc = f64::from(a.col - b.col);
    (dr * dr + dc * dc).sqrt()
}

/// Chebyshev (L∞) distance between two coordinates: the exact step count on
/// an empty 8-connected grid.
#[inline]
pub fn chebyshev(a: Coord, b: Coord) -> i32 {
    (a.row - b.row).abs().max((a.col - b.col).abs())
}

/// Heuristic used for `h(n)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Heuristic {
    /// Straight-line distance.
    #[default]
    Euclidean,
    /// Admissible under unit diagonal cost.
    Chebyshev,
}

impl Heuristic {
    /// Estimated remaining cost from `from` to `to`.
    #[inline]
    pub fn estimate(self, from: Coord, to: Coord) -> f64 {
        match self {
            Heuristic::Euclidean => euclidean(from, to),
            Heuristic::Chebyshev => f64::from(chebyshev(from, to)),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Heuristic::Euclidean => "euclidean",
            Heuristic::Chebyshev => "chebyshev",
        })
    }
}

impl FromStr for Heuristic {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Heuristic::Euclidean),
            "chebyshev" => Ok(Heuristic::Chebyshev),
            _ => Err(SearchError::UnknownHeuristic(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euclidean_basics() {
        let a = Coord::new(0, 0);
        assert_eq!(euclidean(a, a), 0.0);
        assert_eq!(euclidean(a, Coord::new(3, 4)), 5.0);
        assert_eq!(
            euclidean(Coord::new(2, 7), Coord::new(5, 1)),
            euclidean(Coord::new(5, 1), Coord::new(2, 7))
        );
    }

    #[test]
    fn euclidean_triangle_inequality() {
        let pts = [
            Coord::new(0, 0),
            Coord::new(3, 9),
            Coord::new(-2, 4),
            Coord::new(7, 7),
        ];
        for &a in &pts {
            for &b in &pts {
                for &c in &pts {
                    assert!(euclidean(a, c) <= euclidean(a, b) + euclidean(b, c) + 1e-9);
                }
            }
        }
    }

    #[test]
    fn euclidean_overestimates_diagonal_steps() {
        let a = Coord::new(0, 0);
        let b = Coord::new(3, 3);
        assert_eq!(chebyshev(a, b), 3);
        assert!(euclidean(a, b) > 3.0);
    }

    #[test]
    fn chebyshev_distance() {
        assert_eq!(chebyshev(Coord::new(1, 1), Coord::new(4, 2)), 3);
        assert_eq!(chebyshev(Coord::new(4, 2), Coord::new(1, 1)), 3);
        assert_eq!(
            Heuristic::Chebyshev.estimate(Coord::new(0, 0), Coord::new(2, 5)),
            5.0
        );
    }

    #[test]
    fn heuristic_parses_names() {
        assert_eq!("Euclidean".parse::<Heuristic>().unwrap(), Heuristic::Euclidean);
        assert_eq!("chebyshev".parse::<Heuristic>().unwrap(), Heuristic::Chebyshev);
        assert!("octile".parse::<Heuristic>().is_err());
        assert_eq!(Heuristic::default().to_string(), "euclidean");
    }
}
