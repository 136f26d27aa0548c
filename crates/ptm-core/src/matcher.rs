//! Trainer/client matching.
//!
//! For every day both sides are available, every client entry is paired with
//! every trainer entry on that day. Pairs that pass the gender and location
//! filters add their overlap hours to the client's score for that trainer.

use std::collections::BTreeMap;

use crate::overlap::overlap_hours;
use crate::record::{ClientEntry, DayIndex, Person, RawRow, TrainerEntry};

/// Configuration for matching.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Trainer location that matches clients anywhere.
    /// Default: `"Either"`.
    pub any_location: String,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            any_location: "Either".to_string(),
        }
    }
}

/// Accumulated overlap hours per client, per trainer.
///
/// A trainer only appears under a client once they share a positive overlap.
/// A client can appear with no trainers at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTable {
    clients: BTreeMap<String, BTreeMap<String, f64>>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures `client` is present, with no trainers if it has none yet.
    pub fn register_client(&mut self, client: &str) {
        self.clients.entry(client.to_string()).or_default();
    }

    /// Adds `hours` to the `(client, trainer)` cell, creating it at zero first.
    /// Non-positive amounts are ignored.
    pub fn accumulate(&mut self, client: &str, trainer: &str, hours: f64) {
        if hours <= 0.0 {
            return;
        }
        *self
            .clients
            .entry(client.to_string())
            .or_default()
            .entry(trainer.to_string())
            .or_insert(0.0) += hours;
    }

    /// Accumulated hours for one pair, if the pair ever overlapped.
    pub fn hours(&self, client: &str, trainer: &str) -> Option<f64> {
        self.clients.get(client)?.get(trainer).copied()
    }

    /// Trainers and hours for one client.
    pub fn trainers(&self, client: &str) -> Option<&BTreeMap<String, f64>> {
        self.clients.get(client)
    }

    /// Clients in name order with their trainer scores.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, f64>)> {
        self.clients.iter().map(|(c, t)| (c.as_str(), t))
    }

    pub fn contains_client(&self, client: &str) -> bool {
        self.clients.contains_key(client)
    }

    /// Number of clients.
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl ClientEntry {
    /// Whether this client would train with `trainer`, ignoring time.
    pub fn is_compatible(&self, trainer: &TrainerEntry, config: &MatchConfig) -> bool {
        self.profile
            .preference
            .accepts(trainer.profile.gender.as_deref())
            && (self.location == trainer.location || trainer.location == config.any_location)
    }
}

/// Scores every client against every trainer from raw input rows.
///
/// Every client with a usable name is registered, so clients with no
/// overlapping trainer still appear in the table.
pub fn compute_matches(trainers: &[RawRow], clients: &[RawRow], config: &MatchConfig) -> ScoreTable {
    let trainer_index = DayIndex::<TrainerEntry>::from_rows(trainers);
    let client_index = DayIndex::<ClientEntry>::from_rows(clients);

    let mut table = ScoreTable::new();
    for person in clients.iter().filter_map(Person::from_row) {
        table.register_client(person.name);
    }

    match_day_indexes(&client_index, &trainer_index, config, &mut table);
    tracing::info!(
        clients = table.len(),
        matched = table.iter().filter(|(_, t)| !t.is_empty()).count(),
        "computed matches"
    );
    table
}

/// Accumulates overlaps for every day present on both sides into `table`.
pub fn match_day_indexes(
    clients: &DayIndex<ClientEntry>,
    trainers: &DayIndex<TrainerEntry>,
    config: &MatchConfig,
    table: &mut ScoreTable,
) {
    for (day, client_entries) in clients.iter() {
        let Some(trainer_entries) = trainers.get(day) else {
            tracing::trace!(day, "no trainers available");
            continue;
        };
        match_day(client_entries, trainer_entries, config, table);
    }
}

fn match_day(
    clients: &[ClientEntry],
    trainers: &[TrainerEntry],
    config: &MatchConfig,
    table: &mut ScoreTable,
) {
    for client in clients {
        for trainer in trainers.iter().filter(|t| client.is_compatible(t, config)) {
            let hours = overlap_hours(&client.range, &trainer.range);
            table.accumulate(&client.name, &trainer.name, hours);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trainer(name: &str, availability: &str, location: &str, gender: &str) -> RawRow {
        [
            ("Name", name),
            ("Availability", availability),
            ("Location", location),
            ("Gender", gender),
        ]
        .into_iter()
        .collect()
    }

    fn client(name: &str, availability: &str, location: &str, preference: Option<&str>) -> RawRow {
        let mut row: RawRow = [("Name", name), ("Availability", availability), ("Location", location)]
            .into_iter()
            .collect();
        if let Some(preference) = preference {
            row.insert("Gender Preference", preference);
        }
        row
    }

    fn assert_hours(table: &ScoreTable, client: &str, trainer: &str, expected: f64) {
        let actual = table.hours(client, trainer).unwrap_or(0.0);
        assert!(
            (actual - expected).abs() < 1e-9,
            "{client}/{trainer}: expected {expected}, got {actual}"
        );
    }

    #[test]
    fn accumulates_across_days_and_ranges() {
        let trainers = vec![trainer("Alex", "Mon/Wed 9am-12pm", "Gym A", "male")];
        let clients = vec![client("Dana", "Mon 10am-11am & 11:30am-1pm, Wed 8am-10am", "Gym A", None)];

        let table = compute_matches(&trainers, &clients, &MatchConfig::default());
        assert_hours(&table, "Dana", "Alex", 1.0 + 0.5 + 1.0);
    }

    #[test]
    fn unset_preference_matches_every_gender() {
        let trainers = vec![
            trainer("Alex", "Mon 9am-10am", "Gym A", "male"),
            trainer("Riley", "Mon 9am-10am", "Gym A", "female"),
            trainer("Quinn", "Mon 9am-10am", "Gym A", ""),
        ];
        let clients = vec![client("Dana", "Mon 9am-10am", "Gym A", None)];

        let table = compute_matches(&trainers, &clients, &MatchConfig::default());
        assert_eq!(table.trainers("Dana").unwrap().len(), 3);
    }

    #[test]
    fn preference_excludes_other_genders() {
        let trainers = vec![
            trainer("Alex", "Mon 9am-10am", "Gym A", "Male"),
            trainer("Riley", "Mon 9am-10am", "Gym A", "female"),
        ];
        let clients = vec![client("Dana", "Mon 9am-10am", "Gym A", Some("male"))];

        let table = compute_matches(&trainers, &clients, &MatchConfig::default());
        assert_hours(&table, "Dana", "Alex", 1.0);
        assert_eq!(table.hours("Dana", "Riley"), None);
    }

    #[test]
    fn location_must_match_unless_either() {
        let trainers = vec![
            trainer("Alex", "Mon 9am-10am", "Gym B", "male"),
            trainer("Riley", "Mon 9am-10am", "Either", "female"),
            trainer("Sky", "Mon 9am-10am", "gym a", "female"),
        ];
        let clients = vec![client("Dana", "Mon 9am-10am", "Gym A", None)];

        let table = compute_matches(&trainers, &clients, &MatchConfig::default());
        assert_eq!(table.hours("Dana", "Alex"), None);
        assert_hours(&table, "Dana", "Riley", 1.0);
        assert_eq!(table.hours("Dana", "Sky"), None, "location match is case-sensitive");
    }

    #[test]
    fn any_location_token_is_configurable() {
        let trainers = vec![trainer("Alex", "Mon 9am-10am", "Anywhere", "male")];
        let clients = vec![client("Dana", "Mon 9am-10am", "Gym A", None)];
        let config = MatchConfig {
            any_location: "Anywhere".to_string(),
        };

        let table = compute_matches(&trainers, &clients, &config);
        assert_hours(&table, "Dana", "Alex", 1.0);
    }

    #[test]
    fn days_without_trainers_contribute_nothing() {
        let trainers = vec![trainer("Alex", "Tue 9am-10am", "Gym A", "male")];
        let clients = vec![client("Dana", "Mon 9am-10am", "Gym A", None)];

        let table = compute_matches(&trainers, &clients, &MatchConfig::default());
        assert!(table.contains_client("Dana"));
        assert!(table.trainers("Dana").unwrap().is_empty());
    }

    #[test]
    fn touching_windows_leave_no_entry() {
        let trainers = vec![trainer("Alex", "Mon 10am-11am", "Gym A", "male")];
        let clients = vec![client("Dana", "Mon 9am-10am", "Gym A", None)];

        let table = compute_matches(&trainers, &clients, &MatchConfig::default());
        assert_eq!(table.hours("Dana", "Alex"), None);
    }

    #[test]
    fn invalid_names_never_scored() {
        let trainers = vec![
            trainer("Unknown", "Mon 9am-10am", "Either", "male"),
            trainer("", "Mon 9am-10am", "Either", "male"),
        ];
        let clients = vec![
            client("unknown", "Mon 9am-10am", "Gym A", None),
            client("Dana", "Mon 9am-10am", "Gym A", None),
        ];

        let table = compute_matches(&trainers, &clients, &MatchConfig::default());
        assert_eq!(table.len(), 1);
        assert!(table.trainers("Dana").unwrap().is_empty());
    }

    #[test]
    fn accumulate_ignores_non_positive_hours() {
        let mut table = ScoreTable::new();
        table.accumulate("Dana", "Alex", 0.0);
        assert!(table.is_empty());
        table.accumulate("Dana", "Alex", 1.5);
        table.accumulate("Dana", "Alex", 0.5);
        assert_eq!(table.hours("Dana", "Alex"), Some(2.0));
    }

    #[test]
    fn ordering_of_rows_does_not_change_scores() {
        let trainers = vec![
            trainer("Alex", "Mon 9am-11am, Tue 6pm-8pm", "Either", "male"),
            trainer("Riley", "Mon 10am-12pm", "Gym A", "female"),
        ];
        let clients = vec![
            client("Dana", "Mon 9am-12pm, Tue 7pm-9pm", "Gym A", None),
            client("Emery", "Mon 10:30am-11:30am", "Gym A", Some("female")),
        ];

        let forward = compute_matches(&trainers, &clients, &MatchConfig::default());
        let reversed_trainers: Vec<_> = trainers.iter().rev().cloned().collect();
        let reversed_clients: Vec<_> = clients.iter().rev().cloned().collect();
        let backward = compute_matches(&reversed_trainers, &reversed_clients, &MatchConfig::default());
        assert_eq!(forward, backward);
        assert_hours(&forward, "Dana", "Alex", 3.0);
        assert_hours(&forward, "Emery", "Riley", 1.0);
    }
}
