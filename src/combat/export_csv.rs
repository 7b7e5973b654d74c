//! Write attrition round traces as CSV, one row per exchange.

use std::io::Write;

use crate::combat::attrition::RoundEvent;

pub const ROUND_EVENT_HEADERS: [&str; 12] = [
    "round",
    "unit_a",
    "unit_b",
    "distance",
    "accuracy",
    "winner",
    "damage_a",
    "damage_b",
    "health_a",
    "health_b",
    "a_removed",
    "b_removed",
];

pub fn write_round_events<W: Write>(writer: W, events: &[RoundEvent]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);
    if events.is_empty() {
        // serialize() only emits headers alongside the first record.
        csv_writer.write_record(ROUND_EVENT_HEADERS)?;
    }
    for event in events {
        csv_writer.serialize(event)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn round_events_to_csv(events: &[RoundEvent]) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_round_events(&mut buffer, events)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
