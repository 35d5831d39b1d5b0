//! Route network types: edges, paths and the route graph.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use super::{Airport, DomainError};

/// A directed connection between two airports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Edge {
    /// Departure airport
    pub origin: Airport,
    /// Arrival airport
    pub destination: Airport,
}

impl Edge {
    /// Creates a new edge.
    pub fn new(origin: Airport, destination: Airport) -> Self {
        Self {
            origin,
            destination,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} > {}", self.origin, self.destination)
    }
}

/// A contiguous walk through the route graph.
///
/// # Invariants
///
/// - At least one edge
/// - Consecutive edges connect (destination of one = origin of next)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    edges: Vec<Edge>,
}

impl Path {
    /// Constructs a path from edges.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the edge list is empty or the edges don't connect.
    pub fn new(edges: Vec<Edge>) -> Result<Self, DomainError> {
        if edges.is_empty() {
            return Err(DomainError::EmptyPath);
        }

        for window in edges.windows(2) {
            if window[0].destination != window[1].origin {
                return Err(DomainError::DisconnectedPath(
                    window[0].destination.clone(),
                    window[1].origin.clone(),
                ));
            }
        }

        Ok(Self { edges })
    }

    /// Builds a path from a walk the caller has already checked.
    pub(crate) fn from_walk(edges: Vec<Edge>) -> Self {
        debug_assert!(!edges.is_empty());
        debug_assert!(
            edges
                .windows(2)
                .all(|w| w[0].destination == w[1].origin)
        );
        Self { edges }
    }

    /// Returns the edges in travel order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the number of hops (flights) on this path.
    pub fn hop_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the first airport.
    pub fn origin(&self) -> &Airport {
        &self.edges[0].origin
    }

    /// Returns the last airport.
    pub fn destination(&self) -> &Airport {
        &self.edges[self.edges.len() - 1].destination
    }

    /// Returns every airport on the path in visiting order, endpoints included.
    pub fn nodes(&self) -> Vec<&Airport> {
        std::iter::once(self.origin())
            .chain(self.edges.iter().map(|e| &e.destination))
            .collect()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, edge) in self.edges.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{edge}")?;
        }
        Ok(())
    }
}

/// Directed adjacency graph of airport connections.
///
/// Destinations that have no entry of their own are dead ends, not errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteGraph {
    routes: HashMap<Airport, HashSet<Airport>>,
}

impl RouteGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an airport, even if it has no outgoing routes.
    pub fn add_airport(&mut self, airport: Airport) {
        self.routes.entry(airport).or_default();
    }

    /// Add a directed route.
    pub fn add_route(&mut self, origin: Airport, destination: Airport) {
        self.routes.entry(origin).or_default().insert(destination);
    }

    /// Airports directly reachable from `airport`, if it has an entry.
    pub fn neighbours(&self, airport: &Airport) -> Option<&HashSet<Airport>> {
        self.routes.get(airport)
    }

    /// Returns true if there is a direct route from `origin` to `destination`.
    pub fn has_route(&self, origin: &Airport, destination: &Airport) -> bool {
        self.routes
            .get(origin)
            .is_some_and(|dests| dests.contains(destination))
    }

    /// Number of airports with an entry in the graph.
    pub fn airport_count(&self) -> usize {
        self.routes.len()
    }

    /// Number of directed routes.
    pub fn route_count(&self) -> usize {
        self.routes.values().map(HashSet::len).sum()
    }

    /// Returns true if the graph has no airports.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl FromIterator<(Airport, Airport)> for RouteGraph {
    fn from_iter<I: IntoIterator<Item = (Airport, Airport)>>(iter: I) -> Self {
        let mut graph = RouteGraph::new();
        for (origin, destination) in iter {
            graph.add_route(origin, destination);
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airport(s: &str) -> Airport {
        Airport::parse(s).unwrap()
    }

    fn edge(from: &str, to: &str) -> Edge {
        Edge::new(airport(from), airport(to))
    }

    #[test]
    fn edges_equal_by_both_components() {
        assert_eq!(edge("A", "B"), edge("A", "B"));
        assert_ne!(edge("A", "B"), edge("B", "A"));
        assert_ne!(edge("A", "B"), edge("A", "C"));
    }

    #[test]
    fn path_rejects_empty() {
        assert!(matches!(Path::new(vec![]), Err(DomainError::EmptyPath)));
    }

    #[test]
    fn path_rejects_disconnected_edges() {
        let result = Path::new(vec![edge("A", "B"), edge("C", "D")]);
        assert!(matches!(result, Err(DomainError::DisconnectedPath(_, _))));
    }

    #[test]
    fn path_accessors() {
        let path = Path::new(vec![edge("A", "C"), edge("C", "E"), edge("E", "F")]).unwrap();

        assert_eq!(path.hop_count(), 3);
        assert_eq!(path.origin(), &airport("A"));
        assert_eq!(path.destination(), &airport("F"));

        let nodes: Vec<&str> = path.nodes().into_iter().map(Airport::as_str).collect();
        assert_eq!(nodes, vec!["A", "C", "E", "F"]);
    }

    #[test]
    fn path_display() {
        let path = Path::new(vec![edge("A", "B"), edge("B", "F")]).unwrap();
        assert_eq!(path.to_string(), "A > B, B > F");
    }

    #[test]
    fn graph_from_pairs() {
        let graph: RouteGraph = [("A", "B"), ("A", "C"), ("B", "A")]
            .into_iter()
            .map(|(from, to)| (airport(from), airport(to)))
            .collect();

        assert_eq!(graph.airport_count(), 2);
        assert_eq!(graph.route_count(), 3);
        assert!(graph.has_route(&airport("A"), &airport("C")));
        assert!(!graph.has_route(&airport("C"), &airport("A")));
        assert!(graph.neighbours(&airport("C")).is_none());
    }

    #[test]
    fn graph_keeps_airports_without_routes() {
        let mut graph = RouteGraph::new();
        graph.add_airport(airport("PMF"));

        assert_eq!(graph.airport_count(), 1);
        assert_eq!(graph.route_count(), 0);
        assert!(graph.neighbours(&airport("PMF")).unwrap().is_empty());
    }
}
