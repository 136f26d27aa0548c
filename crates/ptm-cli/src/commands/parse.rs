//! Parse command: show how one availability string is read.

use std::io::Write;

use anyhow::Result;
use ptm_core::parse_availability_detailed;

pub fn run<W: Write>(writer: &mut W, text: &str) -> Result<()> {
    let parsed = parse_availability_detailed(Some(text));

    if parsed.intervals.is_empty() {
        writeln!(writer, "No availability found.")?;
    }
    for interval in &parsed.intervals {
        writeln!(writer, "{} {}", interval.day, interval.range())?;
    }
    for skipped in &parsed.skipped {
        writeln!(writer, "skipped {:?}: {}", skipped.segment, skipped.reason)?;
    }
    Ok(())
}
