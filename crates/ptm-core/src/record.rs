//! Raw rows to per-day availability entries.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::availability::parse_availability_detailed;
use crate::time::TimeRange;

/// Column headers read from the input sheets.
pub mod columns {
    pub const NAME: &str = "Name";
    pub const AVAILABILITY: &str = "Availability";
    pub const LOCATION: &str = "Location";
    pub const GENDER: &str = "Gender";
    pub const NOTES: &str = "Notes";
    pub const GENDER_PREFERENCE: &str = "Gender Preference";
}

/// Placeholder used when a name or location cell is missing.
const UNKNOWN: &str = "Unknown";

/// Values that mean "no gender given" in gender and preference cells.
const UNSET_GENDER: [&str; 3] = ["", "nan", "n/a"];

/// One input row, keyed by column header. Missing cells are absent keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: BTreeMap<String, String>,
}

impl RawRow {
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Returns the raw cell text for `column`, if present.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Returns the trimmed cell text, or `default` when the column is absent.
    fn cleaned<'a>(&'a self, column: &str, default: &'a str) -> &'a str {
        self.get(column).map_or(default, str::trim)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.values().all(|v| v.trim().is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Which input sheet a row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Trainer,
    Client,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Trainer => "trainer",
            Self::Client => "client",
        })
    }
}

/// Identity fields shared by trainers and clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person<'a> {
    pub name: &'a str,
    pub location: &'a str,
    pub availability: &'a str,
}

impl<'a> Person<'a> {
    /// Reads the identity fields. Rows with an empty or `unknown` name yield `None`.
    pub fn from_row(row: &'a RawRow) -> Option<Self> {
        let name = row.cleaned(columns::NAME, UNKNOWN);
        if name.is_empty() || name.eq_ignore_ascii_case(UNKNOWN) {
            return None;
        }
        Some(Self {
            name,
            location: row.cleaned(columns::LOCATION, UNKNOWN),
            availability: row.cleaned(columns::AVAILABILITY, ""),
        })
    }
}

/// A client's gender preference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderPreference {
    /// No preference: every trainer qualifies.
    Any,
    /// Only trainers whose lower-cased gender equals this value.
    Only(String),
}

impl GenderPreference {
    pub fn from_field(value: Option<&str>) -> Self {
        normalize_gender(value).map_or(Self::Any, Self::Only)
    }

    pub fn accepts(&self, trainer_gender: Option<&str>) -> bool {
        match self {
            Self::Any => true,
            Self::Only(wanted) => trainer_gender == Some(wanted.as_str()),
        }
    }
}

/// Lower-cases and trims a gender cell; unset markers become `None`.
fn normalize_gender(value: Option<&str>) -> Option<String> {
    let value = value?.trim().to_lowercase();
    (!UNSET_GENDER.contains(&value.as_str())).then_some(value)
}

/// Role-specific attributes carried by each entry.
pub trait Profile: Clone {
    const ROLE: Role;

    fn from_row(row: &RawRow) -> Self;
}

/// Trainer-only attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainerProfile {
    pub gender: Option<String>,
    pub notes: Option<String>,
}

impl Profile for TrainerProfile {
    const ROLE: Role = Role::Trainer;

    fn from_row(row: &RawRow) -> Self {
        let notes = row
            .get(columns::NOTES)
            .map(|n| n.trim().to_lowercase())
            .filter(|n| !n.is_empty());
        Self {
            gender: normalize_gender(row.get(columns::GENDER)),
            notes,
        }
    }
}

/// Client-only attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientProfile {
    pub preference: GenderPreference,
}

impl Profile for ClientProfile {
    const ROLE: Role = Role::Client;

    fn from_row(row: &RawRow) -> Self {
        Self {
            preference: GenderPreference::from_field(row.get(columns::GENDER_PREFERENCE)),
        }
    }
}

/// One person's window on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry<P> {
    pub name: String,
    pub range: TimeRange,
    pub location: String,
    pub profile: P,
}

pub type TrainerEntry = Entry<TrainerProfile>;
pub type ClientEntry = Entry<ClientProfile>;

/// Builds `(day, entry)` pairs for one row. Rows without a usable name build nothing.
pub fn build_entries<P: Profile>(row: &RawRow) -> Vec<(String, Entry<P>)> {
    let Some(person) = Person::from_row(row) else {
        tracing::debug!(role = %P::ROLE, ?row, "skipping row without a usable name");
        return Vec::new();
    };

    let parsed = parse_availability_detailed(Some(person.availability));
    for skipped in &parsed.skipped {
        tracing::debug!(
            role = %P::ROLE,
            name = person.name,
            segment = %skipped.segment,
            reason = %skipped.reason,
            "dropped availability segment"
        );
    }

    let profile = P::from_row(row);
    parsed
        .intervals
        .into_iter()
        .map(|interval| {
            let range = interval.range();
            let entry = Entry {
                name: person.name.to_string(),
                range,
                location: person.location.to_string(),
                profile: profile.clone(),
            };
            (interval.day, entry)
        })
        .collect()
}

/// Entries grouped by day token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayIndex<E> {
    days: BTreeMap<String, Vec<E>>,
}

impl<E> Default for DayIndex<E> {
    fn default() -> Self {
        Self {
            days: BTreeMap::new(),
        }
    }
}

impl<E> DayIndex<E> {
    pub fn insert(&mut self, day: impl Into<String>, entry: E) {
        self.days.entry(day.into()).or_default().push(entry);
    }

    /// Entries active on `day`, or `None` when nobody is available that day.
    pub fn get(&self, day: &str) -> Option<&[E]> {
        self.days.get(day).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[E])> {
        self.days.iter().map(|(d, e)| (d.as_str(), e.as_slice()))
    }

    /// Number of distinct days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Total entries across all days.
    pub fn entry_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }
}

impl<P: Profile> DayIndex<Entry<P>> {
    /// Indexes every row's availability by day.
    pub fn from_rows(rows: &[RawRow]) -> Self {
        let mut index = Self::default();
        for row in rows {
            for (day, entry) in build_entries::<P>(row) {
                index.insert(day, entry);
            }
        }
        tracing::debug!(
            role = %P::ROLE,
            rows = rows.len(),
            days = index.len(),
            entries = index.entry_count(),
            "built day index"
        );
        index
    }
}
