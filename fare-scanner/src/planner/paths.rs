//! Bounded-depth path enumeration over the route graph.
//!
//! Produces every acyclic path from any origin to any target within the
//! hop budget. The search is a depth-first traversal driven by an explicit
//! stack, so deep graphs cannot overflow the call stack, and it is exposed
//! as an iterator so callers can stop early.
//!
//! Rules applied at each airport:
//! - A neighbour that is a target completes a path. The search does not
//!   continue past a target.
//! - A neighbour that is neither a target nor already visited becomes an
//!   intermediate hop.
//! - The visited set starts with *all* origins, so no path can pass through
//!   another starting airport (or back through its own).

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use tracing::trace;

use crate::domain::{Airport, Edge, Path, RouteGraph};

use super::scan::ScanError;

/// A pending node expansion.
struct Frame {
    /// Airport to expand.
    airport: Airport,

    /// Edges walked to reach `airport`.
    explored: Vec<Edge>,

    /// Airports that may not be used as intermediate hops below this frame.
    /// Shared between sibling frames; each expansion copies before extending.
    visited: Arc<HashSet<Airport>>,
}

/// Lazy iterator over paths, created by [`find_paths`].
pub struct PathFinder<'g> {
    graph: &'g RouteGraph,
    targets: HashSet<Airport>,
    max_hops: usize,
    stack: Vec<Frame>,
    found: VecDeque<Path>,
}

/// Enumerate every path from `origins` to `targets` with at most `max_hops` edges.
///
/// Origins missing from the graph are dead ends. Paths are never
/// deduplicated: an airport reachable through two different intermediate
/// routes yields two paths. Emission order is unspecified.
///
/// # Errors
///
/// Returns `ScanError::InvalidArgument` if `max_hops` is zero. No traversal
/// happens in that case.
///
/// # Examples
///
/// ```
/// use fare_scanner::domain::{Airport, RouteGraph};
/// use fare_scanner::planner::find_paths;
///
/// let a = |s: &str| Airport::parse(s).unwrap();
/// let graph: RouteGraph = [(a("A"), a("B")), (a("B"), a("C"))].into_iter().collect();
///
/// let paths: Vec<_> = find_paths(&[a("A")], &[a("C")], &graph, 2).unwrap().collect();
/// assert_eq!(paths.len(), 1);
/// assert_eq!(paths[0].to_string(), "A > B, B > C");
/// ```
pub fn find_paths<'g>(
    origins: &[Airport],
    targets: &[Airport],
    graph: &'g RouteGraph,
    max_hops: usize,
) -> Result<PathFinder<'g>, ScanError> {
    if max_hops < 1 {
        return Err(ScanError::InvalidArgument(
            "max_hops must be at least 1".to_string(),
        ));
    }

    let visited: Arc<HashSet<Airport>> = Arc::new(origins.iter().cloned().collect());

    // Unique origins, first one on top of the stack.
    let mut seen = HashSet::new();
    let mut stack: Vec<Frame> = origins
        .iter()
        .filter(|origin| seen.insert(*origin))
        .map(|origin| Frame {
            airport: origin.clone(),
            explored: Vec::new(),
            visited: Arc::clone(&visited),
        })
        .collect();
    stack.reverse();

    Ok(PathFinder {
        graph,
        targets: targets.iter().cloned().collect(),
        max_hops,
        stack,
        found: VecDeque::new(),
    })
}

impl PathFinder<'_> {
    /// Expand one frame: record completed paths, push intermediate hops.
    fn expand(&mut self, frame: Frame) {
        if frame.explored.len() >= self.max_hops {
            return;
        }

        let Some(neighbours) = self.graph.neighbours(&frame.airport) else {
            trace!(airport = %frame.airport, "dead end");
            return;
        };

        let mut visited = (*frame.visited).clone();
        visited.insert(frame.airport.clone());
        let visited = Arc::new(visited);

        for next in neighbours {
            let is_target = self.targets.contains(next);
            if !is_target && visited.contains(next) {
                continue;
            }

            let mut explored = Vec::with_capacity(frame.explored.len() + 1);
            explored.extend(frame.explored.iter().cloned());
            explored.push(Edge::new(frame.airport.clone(), next.clone()));

            if is_target {
                self.found.push_back(Path::from_walk(explored));
            } else {
                self.stack.push(Frame {
                    airport: next.clone(),
                    explored,
                    visited: Arc::clone(&visited),
                });
            }
        }
    }
}

impl Iterator for PathFinder<'_> {
    type Item = Path;

    fn next(&mut self) -> Option<Path> {
        loop {
            if let Some(path) = self.found.pop_front() {
                return Some(path);
            }
            let frame = self.stack.pop()?;
            self.expand(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airport(s: &str) -> Airport {
        Airport::parse(s).unwrap()
    }

    fn airports(codes: &[&str]) -> Vec<Airport> {
        codes.iter().map(|c| airport(c)).collect()
    }

    /// Build a graph from `(from, "to to to")` rows.
    fn graph(adjacency: &[(&str, &str)]) -> RouteGraph {
        let mut graph = RouteGraph::new();
        for (from, tos) in adjacency {
            graph.add_airport(airport(from));
            for to in tos.split_whitespace() {
                graph.add_route(airport(from), airport(to));
            }
        }
        graph
    }

    /// The six-airport network used throughout these tests.
    fn network() -> RouteGraph {
        graph(&[
            ("A", "B C D"),
            ("B", "A F"),
            ("C", "A F E"),
            ("D", "A E"),
            ("E", "D C F"),
            ("F", "B C E"),
        ])
    }

    /// Render paths as node strings ("A-B-F") for set comparison.
    fn run(origins: &[&str], targets: &[&str], graph: &RouteGraph, max_hops: usize) -> Vec<String> {
        let mut paths: Vec<String> =
            find_paths(&airports(origins), &airports(targets), graph, max_hops)
                .unwrap()
                .map(|p| {
                    p.nodes()
                        .iter()
                        .map(|a| a.as_str())
                        .collect::<Vec<_>>()
                        .join("-")
                })
                .collect();
        paths.sort();
        paths
    }

    fn sorted(paths: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = paths.iter().map(|s| s.to_string()).collect();
        v.sort();
        v
    }

    #[test]
    fn unbounded_depth_finds_every_simple_path() {
        let found = run(&["A"], &["F"], &network(), 1_000_000);
        assert_eq!(
            found,
            sorted(&["A-B-F", "A-C-F", "A-C-E-F", "A-D-E-F", "A-D-E-C-F"])
        );
    }

    #[test]
    fn hop_bound_limits_paths() {
        let found = run(&["A"], &["F"], &network(), 2);
        assert_eq!(found, sorted(&["A-B-F", "A-C-F"]));
    }

    #[test]
    fn single_hop_finds_only_direct_routes() {
        let found = run(&["A"], &["B", "F"], &network(), 1);
        assert_eq!(found, sorted(&["A-B"]));
    }

    #[test]
    fn multiple_origins_and_targets() {
        let found = run(&["A", "B"], &["F", "E"], &network(), 1_000_000);
        assert_eq!(found, sorted(&["B-F", "A-C-F", "A-C-E", "A-D-E"]));
    }

    #[test]
    fn zero_hops_is_invalid() {
        let network = network();
        let result = find_paths(&airports(&["A"]), &airports(&["F"]), &network, 0);
        assert!(matches!(result, Err(ScanError::InvalidArgument(_))));
    }

    #[test]
    fn origin_missing_from_graph_is_dead_end() {
        let found = run(&["Z"], &["F"], &network(), 3);
        assert!(found.is_empty());
    }

    #[test]
    fn leaf_destination_is_dead_end() {
        // X has no entry of its own
        let g = graph(&[("A", "X B"), ("B", "C")]);
        let found = run(&["A"], &["C"], &g, 5);
        assert_eq!(found, sorted(&["A-B-C"]));
    }

    #[test]
    fn origin_is_not_matched_against_itself() {
        let g = graph(&[("A", "B"), ("B", "C")]);
        let found = run(&["A"], &["A"], &g, 5);
        assert!(found.is_empty());
    }

    #[test]
    fn distinct_routes_to_same_target_are_kept() {
        let g = graph(&[("A", "B C"), ("B", "D"), ("C", "D")]);
        let found = run(&["A"], &["D"], &g, 3);
        assert_eq!(found, sorted(&["A-B-D", "A-C-D"]));
    }

    #[test]
    fn self_loops_are_not_followed() {
        let g = graph(&[("A", "B"), ("B", "B C")]);
        let found = run(&["A"], &["C"], &g, 5);
        assert_eq!(found, sorted(&["A-B-C"]));
    }

    #[test]
    fn search_stops_at_targets() {
        // B is a target, so C is never reached through it
        let g = graph(&[("A", "B"), ("B", "C")]);
        let found = run(&["A"], &["B", "C"], &g, 5);
        assert_eq!(found, sorted(&["A-B"]));
    }

    #[test]
    fn duplicate_origins_are_searched_once() {
        let found = run(&["A", "A"], &["F"], &network(), 2);
        assert_eq!(found, sorted(&["A-B-F", "A-C-F"]));
    }

    #[test]
    fn paths_are_produced_lazily() {
        let network = network();
        let mut finder =
            find_paths(&airports(&["A"]), &airports(&["F"]), &network, 1_000_000).unwrap();

        let first = finder.next().unwrap();
        assert_eq!(first.destination(), &airport("F"));
        // The rest is still there
        assert_eq!(finder.count(), 4);
    }

    #[test]
    fn each_call_starts_fresh() {
        let network = network();
        let a = run(&["A"], &["F"], &network, 4);
        let b = run(&["A"], &["F"], &network, 4);
        assert_eq!(a, b);
    }
}
