use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Optional settings file looked up in the working directory at startup.
pub const SETTINGS_FILE: &str = "movie_explorer.json";

/// Tunables shared by the views and reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// File opened at startup when no path is given on the command line.
    pub default_source: PathBuf,
    /// Bin count of every histogram.
    pub histogram_bins: usize,
    /// Runtime-by-language keeps runtimes strictly below this (minutes).
    pub runtime_cutoff: f64,
    /// Collection-vs-revenue keeps revenues strictly below this.
    pub revenue_cutoff: f64,
    pub runtime_top_languages: usize,
    pub rating_top_languages: usize,
    pub rating_top_countries: usize,
    /// p-values below this select the "significant" report branch.
    pub significance_level: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            default_source: PathBuf::from("movies_metadata.csv"),
            histogram_bins: 50,
            runtime_cutoff: 300.0,
            revenue_cutoff: 1e9,
            runtime_top_languages: 8,
            rating_top_languages: 6,
            rating_top_countries: 6,
            significance_level: 0.05,
        }
    }
}

impl AnalysisSettings {
    /// Read settings from a JSON file. Keys left out keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let settings: Self =
            serde_json::from_str(&json_str).context("Failed to parse settings json")?;
        Ok(settings)
    }

    /// Like [`AnalysisSettings::load`], but an absent file means defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("no settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let settings = Self::load(path)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_settings_fall_back_to_defaults() {
        let s: AnalysisSettings =
            serde_json::from_str(r#"{ "histogram_bins": 20 }"#).expect("parse");
        assert_eq!(s.histogram_bins, 20);
        assert_eq!(s.runtime_top_languages, 8);
        assert_eq!(s.significance_level, 0.05);
    }

    #[test]
    fn settings_file_overrides_cutoffs() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(br#"{ "runtime_cutoff": 240.0, "default_source": "other.tsv" }"#)
            .expect("write");

        let s = AnalysisSettings::load(file.path()).expect("load");
        assert_eq!(s.runtime_cutoff, 240.0);
        assert_eq!(s.default_source, PathBuf::from("other.tsv"));
        assert_eq!(s.histogram_bins, 50);
    }

    #[test]
    fn absent_settings_file_means_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let s = AnalysisSettings::load_or_default(dir.path().join(SETTINGS_FILE)).expect("defaults");
        assert_eq!(s, AnalysisSettings::default());
    }

    #[test]
    fn malformed_settings_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"{ histogram_bins: ").expect("write");
        assert!(AnalysisSettings::load_or_default(file.path()).is_err());
    }
}
