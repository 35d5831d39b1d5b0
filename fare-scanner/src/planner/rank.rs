//! Solution ordering for scan results.

use std::cmp::Ordering;

use crate::domain::{Flight, Solution};

/// Sort solutions for presentation.
///
/// Solutions are ordered by:
/// 1. Departure time (earlier first)
/// 2. Arrival time (earlier first)
/// 3. Total price (cheaper first)
/// 4. Flight numbers, lexicographically
///
/// The tie-breakers make the output independent of path enumeration order.
pub fn rank_solutions(mut solutions: Vec<Solution>) -> Vec<Solution> {
    solutions.sort_by(compare);
    solutions
}

fn compare(a: &Solution, b: &Solution) -> Ordering {
    // Primary: departure time
    let dep_cmp = a.departure().cmp(&b.departure());
    if dep_cmp != Ordering::Equal {
        return dep_cmp;
    }

    let arr_cmp = a.arrival().cmp(&b.arrival());
    if arr_cmp != Ordering::Equal {
        return arr_cmp;
    }

    let price_cmp = a.price().cmp(&b.price());
    if price_cmp != Ordering::Equal {
        return price_cmp;
    }

    a.flights()
        .iter()
        .map(Flight::flight_number)
        .cmp(b.flights().iter().map(Flight::flight_number))
}
