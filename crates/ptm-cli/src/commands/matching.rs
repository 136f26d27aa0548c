//! Match command: score every client against every trainer and write the report.

use std::fmt::Write as _;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ptm_core::{MatchConfig, RawRow, ReportRow, ScoreTable, build_report, compute_matches, rank_all};

use crate::sheet;

/// Resolved inputs for one matching run.
#[derive(Debug, Clone)]
pub struct MatchOptions {
    pub trainers_path: PathBuf,
    pub clients_path: PathBuf,
    pub output_path: PathBuf,
    pub top_n: usize,
    pub json: bool,
    pub matching: MatchConfig,
}

/// Reads the trainer and client sheets.
pub fn load_inputs(trainers_path: &Path, clients_path: &Path) -> Result<(Vec<RawRow>, Vec<RawRow>)> {
    let trainers = sheet::read_rows(trainers_path).context("failed to load trainers")?;
    let clients = sheet::read_rows(clients_path).context("failed to load clients")?;
    tracing::info!(trainers = trainers.len(), clients = clients.len(), "loaded inputs");
    Ok((trainers, clients))
}

/// Formats every client's trainers, best first.
pub fn format_console(table: &ScoreTable) -> String {
    let mut output = String::new();
    for (index, row) in rank_all(table).iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }
        writeln!(output, "Client: {}", row.client).unwrap();
        if row.trainers.is_empty() {
            writeln!(output, "  No overlapping trainers").unwrap();
        }
        for score in &row.trainers {
            writeln!(
                output,
                "  Trainer: {}, Total Overlap: {:.1} hours",
                score.trainer, score.hours
            )
            .unwrap();
        }
    }
    output
}

/// Formats report rows as pretty JSON.
pub fn format_json(rows: &[ReportRow]) -> Result<String> {
    serde_json::to_string_pretty(rows).context("failed to serialize report")
}

pub fn run<W: Write>(writer: &mut W, options: &MatchOptions) -> Result<()> {
    let (trainers, clients) = load_inputs(&options.trainers_path, &options.clients_path)?;

    let table = compute_matches(&trainers, &clients, &options.matching);
    let report = build_report(&table, options.top_n);

    if options.json {
        writeln!(writer, "{}", format_json(&report)?)?;
    } else {
        write!(writer, "{}", format_console(&table))?;
    }

    sheet::write_report(&options.output_path, &report, options.top_n)?;
    tracing::info!(path = %options.output_path.display(), rows = report.len(), "wrote report");

    if !options.json {
        writeln!(
            writer,
            "Matching complete. Output saved to {}",
            options.output_path.display()
        )?;
    }
    Ok(())
}
