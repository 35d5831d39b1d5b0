//! Terminal output for scan results and airport listings.

use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::directory::AirportInfo;
use crate::domain::{Flight, Solution};

const FULL_FORMAT: &str = "%a %Y-%m-%d %H:%M";
const TIME_FORMAT: &str = "%H:%M";

/// Format a departure/arrival pair.
///
/// The arrival is shown as a bare time when it falls on the departure day:
/// `"Mon 2016-10-10 06:30 - 07:45"`.
pub fn format_date_pair(departure: NaiveDateTime, arrival: NaiveDateTime) -> String {
    let arrival_format = if departure.date() == arrival.date() {
        TIME_FORMAT
    } else {
        FULL_FORMAT
    };

    format!(
        "{} - {}",
        departure.format(FULL_FORMAT),
        arrival.format(arrival_format)
    )
}

/// One line describing a flight.
pub fn format_flight(flight: &Flight) -> String {
    format!(
        "{} > {} | {} | {} | {}€",
        flight.origin(),
        flight.destination(),
        format_date_pair(flight.departure(), flight.arrival()),
        flight.flight_number(),
        flight.price()
    )
}

/// Render solutions, one block per solution.
///
/// Direct solutions take a single line. Connections get a summary line
/// followed by their flights, indented.
pub fn render_solutions(solutions: &[Solution]) -> String {
    if solutions.is_empty() {
        return "No flights found\n".to_string();
    }

    let mut out = String::new();
    for solution in solutions {
        if let [flight] = solution.flights() {
            let _ = writeln!(out, "{}", format_flight(flight));
            continue;
        }

        let _ = writeln!(
            out,
            "{} > {} | {} | {}€",
            solution.origin(),
            solution.destination(),
            format_date_pair(solution.departure(), solution.arrival()),
            solution.price()
        );
        for flight in solution.flights() {
            let _ = writeln!(out, "  - {}", format_flight(flight));
        }
    }
    out
}

/// Solutions as a JSON array.
pub fn solutions_to_json(solutions: &[Solution]) -> Result<String, serde_json::Error> {
    serde_json::to_string(solutions)
}

/// Render airports as an aligned `label: CODE` table.
pub fn render_airports(airports: &[AirportInfo]) -> String {
    let labels: Vec<String> = airports.iter().map(AirportInfo::label).collect();
    let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for (label, airport) in labels.iter().zip(airports) {
        let _ = writeln!(out, "{label:<width$}: {}", airport.code);
    }
    out
}
