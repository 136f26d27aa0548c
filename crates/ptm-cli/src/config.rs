//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use ptm_core::{DEFAULT_TOP_N, MatchConfig};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Spreadsheet of trainers (`Name, Availability, Location, Gender, Notes`).
    pub trainers_path: PathBuf,

    /// Spreadsheet of clients (`Name, Availability, Location, Gender Preference`).
    pub clients_path: PathBuf,

    /// Where the matching workbook is written.
    pub output_path: PathBuf,

    /// Trainers kept per client in the output.
    pub top_n: usize,

    /// Trainer location that matches clients anywhere.
    pub any_location: String,
}

impl Default for Config {
    fn default() -> Self {
        let matching = MatchConfig::default();
        Self {
            trainers_path: PathBuf::from("personal_trainers.xlsx"),
            clients_path: PathBuf::from("clients.xlsx"),
            output_path: PathBuf::from("PT_Client_Matching_Output.xlsx"),
            top_n: DEFAULT_TOP_N,
            any_location: matching.any_location,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (PTM_*)
        figment = figment.merge(Env::prefixed("PTM_"));

        figment.extract()
    }

    /// Matching settings derived from this configuration.
    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            any_location: self.any_location.clone(),
        }
    }
}

/// Returns the platform-specific config directory for ptm.
///
/// On Linux: `~/.config/ptm`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ptm"))
}
