//! Itinerary assembly.
//!
//! For each path, every combination of one offer per edge is checked
//! against the timing constraint; the combinations that pass become
//! solutions.

use std::collections::{HashMap, HashSet};

use crate::domain::{DateConstraint, Edge, Flight, Path, Solution};

/// Offers grouped by the edge they serve, in fetch order.
#[derive(Debug, Clone, Default)]
pub struct OfferTable {
    offers: HashMap<Edge, Vec<Flight>>,
    seen: HashSet<Flight>,
}

impl OfferTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an offer under its own edge.
    ///
    /// An offer identical to one already stored is ignored; overlapping
    /// queries for the same edge can return the same flight twice.
    pub fn insert(&mut self, flight: Flight) {
        if self.seen.insert(flight.clone()) {
            self.offers.entry(flight.edge()).or_default().push(flight);
        }
    }

    /// Offers for an edge, if any were fetched.
    pub fn get(&self, edge: &Edge) -> Option<&[Flight]> {
        self.offers.get(edge).map(Vec::as_slice)
    }

    /// Returns true if at least one offer exists for `edge`.
    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.offers.contains_key(edge)
    }

    /// Number of edges with offers.
    pub fn edge_count(&self) -> usize {
        self.offers.len()
    }

    /// Total number of offers.
    pub fn flight_count(&self) -> usize {
        self.offers.values().map(Vec::len).sum()
    }
}

impl FromIterator<Flight> for OfferTable {
    fn from_iter<I: IntoIterator<Item = Flight>>(iter: I) -> Self {
        let mut table = OfferTable::new();
        for flight in iter {
            table.insert(flight);
        }
        table
    }
}

impl Extend<Flight> for OfferTable {
    fn extend<I: IntoIterator<Item = Flight>>(&mut self, iter: I) {
        for flight in iter {
            self.insert(flight);
        }
    }
}

/// Cartesian product of per-edge offer lists.
///
/// Works like an odometer: the last edge varies fastest, the first edge
/// slowest. The order depends only on the order of the input lists.
pub struct FlightCombinations<'a> {
    lists: Vec<&'a [Flight]>,
    indices: Vec<usize>,
    exhausted: bool,
}

impl<'a> FlightCombinations<'a> {
    /// Product over `lists`. Any empty list makes the product empty.
    pub fn new(lists: Vec<&'a [Flight]>) -> Self {
        let exhausted = lists.is_empty() || lists.iter().any(|l| l.is_empty());
        let indices = vec![0; lists.len()];
        Self {
            lists,
            indices,
            exhausted,
        }
    }

    /// Total number of combinations.
    pub fn total(&self) -> usize {
        if self.lists.is_empty() {
            return 0;
        }
        self.lists.iter().map(|l| l.len()).product()
    }

    fn advance(&mut self) {
        for pos in (0..self.indices.len()).rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < self.lists[pos].len() {
                return;
            }
            self.indices[pos] = 0;
        }
        self.exhausted = true;
    }
}

impl Iterator for FlightCombinations<'_> {
    type Item = Vec<Flight>;

    fn next(&mut self) -> Option<Vec<Flight>> {
        if self.exhausted {
            return None;
        }

        let combination = self
            .indices
            .iter()
            .zip(&self.lists)
            .map(|(&i, list)| list[i].clone())
            .collect();

        self.advance();
        Some(combination)
    }
}

/// Every combination of offers along `path`, or `None` if some edge has no offers.
pub fn combinations<'a>(path: &Path, table: &'a OfferTable) -> Option<FlightCombinations<'a>> {
    let lists = path
        .edges()
        .iter()
        .map(|edge| table.get(edge))
        .collect::<Option<Vec<_>>>()?;

    Some(FlightCombinations::new(lists))
}

/// Check a sequence of flights against a constraint, narrowing it after each one.
///
/// Each flight must depart within `[earliest_out, latest_out]` and land by
/// `latest_in`. After a flight is accepted the departure bounds for the
/// next one become its arrival plus the minimum and maximum layover. An
/// empty sequence is compatible.
pub fn are_flights_compatible(flights: &[Flight], constraint: &DateConstraint) -> bool {
    let mut constraint = *constraint;

    for flight in flights {
        if !constraint.admits(flight) {
            return false;
        }
        constraint = constraint.after(flight);
    }

    true
}

/// Every timing-valid solution for `path`.
///
/// A path with an edge that has no offers is a dead path and yields no
/// solutions. Solutions come out in combination order.
pub fn get_path_solutions(
    path: &Path,
    table: &OfferTable,
    constraint: &DateConstraint,
) -> Vec<Solution> {
    let Some(candidates) = combinations(path, table) else {
        return Vec::new();
    };

    candidates
        .filter(|flights| are_flights_compatible(flights, constraint))
        .filter_map(|flights| Solution::from_flights(&flights))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Airport, DateWindow, Price};
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn airport(s: &str) -> Airport {
        Airport::parse(s).unwrap()
    }

    fn at(day: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2016, 10, day)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn flight(
        from: &str,
        to: &str,
        dep: NaiveDateTime,
        arr: NaiveDateTime,
        cents: u64,
        number: &str,
    ) -> Flight {
        Flight::new(
            airport(from),
            airport(to),
            dep,
            arr,
            Price::from_minor(cents),
            number,
        )
    }

    fn path(edges: &[(&str, &str)]) -> Path {
        Path::new(
            edges
                .iter()
                .map(|(from, to)| Edge::new(airport(from), airport(to)))
                .collect(),
        )
        .unwrap()
    }

    /// Constraint for departures on 10-10 (any time) with the given layover bounds.
    fn constraint(min_hours: i64, max_hours: i64) -> DateConstraint {
        let day = NaiveDate::from_ymd_opt(2016, 10, 10).unwrap();
        DateWindow::new(day, day)
            .unwrap()
            .departure_constraint(Duration::hours(min_hours), Duration::hours(max_hours))
    }

    /// Constraint loose enough to accept any of the test flights.
    fn permissive() -> DateConstraint {
        DateConstraint {
            earliest_out: at(1, 0, 0),
            latest_out: at(30, 0, 0),
            latest_in: at(30, 0, 0),
            min_between_flights: Duration::hours(-1000),
            max_between_flights: Duration::hours(1000),
        }
    }

    #[test]
    fn empty_sequence_is_compatible() {
        assert!(are_flights_compatible(&[], &constraint(1, 5)));
    }

    #[test]
    fn layover_too_short() {
        let flights = [
            flight("A", "B", at(10, 6, 0), at(10, 8, 0), 1000, "FR 1"),
            flight("B", "C", at(10, 8, 0), at(10, 10, 0), 1000, "FR 2"),
        ];
        assert!(!are_flights_compatible(&flights, &constraint(1, 5)));
    }

    #[test]
    fn layover_too_long() {
        let flights = [
            flight("A", "B", at(10, 6, 0), at(10, 8, 0), 1000, "FR 1"),
            flight("B", "C", at(10, 18, 0), at(10, 20, 0), 1000, "FR 2"),
        ];
        assert!(!are_flights_compatible(&flights, &constraint(1, 5)));
    }

    #[test]
    fn layover_bounds_are_inclusive() {
        let exactly_min = [
            flight("A", "B", at(10, 6, 0), at(10, 8, 0), 1000, "FR 1"),
            flight("B", "C", at(10, 9, 0), at(10, 10, 0), 1000, "FR 2"),
        ];
        assert!(are_flights_compatible(&exactly_min, &constraint(1, 5)));

        let exactly_max = [
            flight("A", "B", at(10, 6, 0), at(10, 8, 0), 1000, "FR 1"),
            flight("B", "C", at(10, 13, 0), at(10, 14, 0), 1000, "FR 2"),
        ];
        assert!(are_flights_compatible(&exactly_max, &constraint(1, 5)));
    }

    #[test]
    fn first_flight_outside_window_is_rejected() {
        let early = [flight("A", "B", at(9, 22, 0), at(9, 23, 0), 1000, "FR 1")];
        assert!(!are_flights_compatible(&early, &constraint(1, 5)));

        let late = [flight("A", "B", at(11, 6, 0), at(11, 8, 0), 1000, "FR 1")];
        assert!(!are_flights_compatible(&late, &constraint(1, 5)));
    }

    #[test]
    fn any_flight_landing_after_window_is_rejected() {
        // Second flight departs in time but lands after midnight
        let flights = [
            flight("A", "B", at(10, 18, 0), at(10, 20, 0), 1000, "FR 1"),
            flight("B", "C", at(10, 22, 0), at(11, 0, 30), 1000, "FR 2"),
        ];
        assert!(!are_flights_compatible(&flights, &constraint(1, 5)));
    }

    #[test]
    fn valid_three_flight_chain() {
        let flights = [
            flight("A", "B", at(10, 6, 0), at(10, 7, 0), 1000, "FR 1"),
            flight("B", "C", at(10, 9, 0), at(10, 11, 0), 1000, "FR 2"),
            flight("C", "D", at(10, 13, 30), at(10, 15, 0), 1000, "FR 3"),
        ];
        assert!(are_flights_compatible(&flights, &constraint(1, 5)));
    }

    #[test]
    fn dead_edge_yields_no_solutions() {
        let table: OfferTable = [flight("A", "B", at(10, 6, 0), at(10, 7, 0), 1000, "FR 1")]
            .into_iter()
            .collect();

        let solutions = get_path_solutions(&path(&[("A", "B"), ("B", "C")]), &table, &permissive());
        assert!(solutions.is_empty());
        assert!(combinations(&path(&[("A", "B"), ("B", "C")]), &table).is_none());
    }

    #[test]
    fn product_of_three_edges_with_two_offers_each() {
        let table: OfferTable = [
            flight("A", "B", at(10, 6, 0), at(10, 7, 0), 100, "AB1"),
            flight("A", "B", at(10, 8, 0), at(10, 9, 0), 200, "AB2"),
            flight("B", "C", at(10, 10, 0), at(10, 11, 0), 1000, "BC1"),
            flight("B", "C", at(10, 12, 0), at(10, 13, 0), 2000, "BC2"),
            flight("C", "D", at(10, 14, 0), at(10, 15, 0), 10000, "CD1"),
            flight("C", "D", at(10, 16, 0), at(10, 17, 0), 20000, "CD2"),
        ]
        .into_iter()
        .collect();
        let path = path(&[("A", "B"), ("B", "C"), ("C", "D")]);

        let candidates = combinations(&path, &table).unwrap();
        assert_eq!(candidates.total(), 8);
        assert_eq!(candidates.count(), 8);

        let solutions = get_path_solutions(&path, &table, &permissive());
        assert_eq!(solutions.len(), 8);

        // Last edge varies fastest
        let numbers: Vec<String> = solutions
            .iter()
            .map(|s| {
                s.flights()
                    .iter()
                    .map(Flight::flight_number)
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .collect();
        assert_eq!(numbers[0], "AB1/BC1/CD1");
        assert_eq!(numbers[1], "AB1/BC1/CD2");
        assert_eq!(numbers[2], "AB1/BC2/CD1");
        assert_eq!(numbers[7], "AB2/BC2/CD2");

        for solution in &solutions {
            let flights = solution.flights();
            let expected: u64 = flights.iter().map(|f| f.price().minor_units()).sum();
            assert_eq!(solution.price().minor_units(), expected);
            assert_eq!(solution.departure(), flights[0].departure());
            assert_eq!(solution.arrival(), flights[2].arrival());
        }
        assert_eq!(solutions[0].price(), Price::from_minor(11100));
        assert_eq!(solutions[7].price(), Price::from_minor(22200));
    }

    #[test]
    fn compatibility_filters_the_product() {
        let table: OfferTable = [
            flight("A", "B", at(10, 6, 0), at(10, 7, 0), 1000, "AB1"),
            flight("B", "C", at(10, 7, 30), at(10, 8, 30), 1000, "BC1"), // too tight
            flight("B", "C", at(10, 9, 0), at(10, 10, 0), 1000, "BC2"),
            flight("B", "C", at(10, 15, 0), at(10, 16, 0), 1000, "BC3"), // too long
        ]
        .into_iter()
        .collect();

        let solutions = get_path_solutions(&path(&[("A", "B"), ("B", "C")]), &table, &constraint(1, 5));

        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].flights()[1].flight_number(), "BC2");
        assert_eq!(solutions[0].departure(), at(10, 6, 0));
        assert_eq!(solutions[0].arrival(), at(10, 10, 0));
    }

    #[test]
    fn product_order_is_stable() {
        let table: OfferTable = [
            flight("A", "B", at(10, 6, 0), at(10, 7, 0), 100, "AB1"),
            flight("A", "B", at(10, 8, 0), at(10, 9, 0), 200, "AB2"),
            flight("B", "C", at(10, 10, 0), at(10, 11, 0), 1000, "BC1"),
        ]
        .into_iter()
        .collect();
        let path = path(&[("A", "B"), ("B", "C")]);

        let first = get_path_solutions(&path, &table, &permissive());
        let second = get_path_solutions(&path, &table, &permissive());
        assert_eq!(first, second);
    }

    #[test]
    fn table_ignores_duplicate_offers() {
        let f = flight("A", "B", at(10, 6, 0), at(10, 7, 0), 1000, "FR 1");
        let mut table = OfferTable::new();
        table.insert(f.clone());
        table.insert(f.clone());
        table.extend([flight("A", "B", at(10, 9, 0), at(10, 10, 0), 1000, "FR 2")]);

        assert_eq!(table.edge_count(), 1);
        assert_eq!(table.flight_count(), 2);
        assert!(table.contains_edge(&f.edge()));
        assert_eq!(table.get(&f.edge()).unwrap()[0], f);
    }

    #[test]
    fn busy_edge_keeps_first_copy_in_fetch_order() {
        // Two overlapping weekly queries return the same week of flights
        let week: Vec<Flight> = (0..7u32)
            .flat_map(|day| {
                (0..24u32).map(move |hour| {
                    let number = format!("FR {}", day * 24 + hour);
                    flight("A", "B", at(10 + day, hour, 0), at(10 + day, hour, 50), 1000, &number)
                })
            })
            .collect();

        let table: OfferTable = week.iter().cloned().chain(week.iter().cloned()).collect();

        assert_eq!(table.edge_count(), 1);
        assert_eq!(table.flight_count(), week.len());
        assert_eq!(table.get(&week[0].edge()).unwrap(), week.as_slice());
    }

    #[test]
    fn empty_product_when_a_list_is_empty() {
        let flights = [flight("A", "B", at(10, 6, 0), at(10, 7, 0), 100, "AB1")];
        let mut product = FlightCombinations::new(vec![&flights[..], &[]]);
        assert_eq!(product.total(), 0);
        assert!(product.next().is_none());

        let mut none = FlightCombinations::new(vec![]);
        assert!(none.next().is_none());
    }
}
