//! Ranking trainers per client.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::matcher::ScoreTable;

/// Number of trainers kept per client by default.
pub const DEFAULT_TOP_N: usize = 5;

/// A trainer and the hours they overlap with one client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainerScore {
    pub trainer: String,
    pub hours: f64,
}

impl fmt::Display for TrainerScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}h)", self.trainer, self.hours)
    }
}

/// One output row: a client and their best trainers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub client: String,
    pub trainers: Vec<TrainerScore>,
}

impl ReportRow {
    /// `"Alex (3.0h), Riley (1.5h)"`, or an empty string with no matches.
    pub fn formatted_trainers(&self) -> String {
        self.trainers
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Orders by hours descending, then trainer name ascending.
fn by_rank(a: &TrainerScore, b: &TrainerScore) -> Ordering {
    b.hours
        .total_cmp(&a.hours)
        .then_with(|| a.trainer.cmp(&b.trainer))
}

/// Every trainer for every client, in rank order.
pub fn rank_all(table: &ScoreTable) -> Vec<ReportRow> {
    table
        .iter()
        .map(|(client, trainers)| {
            let mut trainers: Vec<TrainerScore> = trainers
                .iter()
                .map(|(trainer, &hours)| TrainerScore {
                    trainer: trainer.clone(),
                    hours,
                })
                .collect();
            trainers.sort_by(by_rank);
            ReportRow {
                client: client.to_string(),
                trainers,
            }
        })
        .collect()
}

/// The `top_n` best trainers for every client, clients in name order.
pub fn build_report(table: &ScoreTable, top_n: usize) -> Vec<ReportRow> {
    let mut rows = rank_all(table);
    for row in &mut rows {
        row.trainers.truncate(top_n);
    }
    rows
}
