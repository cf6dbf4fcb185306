use std::{fs, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

pub const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_DATA_PATH: &str = "data/netflix_titles.csv";
pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_SAMPLE_ROWS: usize = 10;

const MAX_TOP_N: usize = 50;
const MAX_SAMPLE_ROWS: usize = 500;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub data_path: PathBuf,
    /// Entries shown by the "top N" charts (countries, categories).
    pub top_n: usize,
    /// Rows in the overview sample table.
    pub sample_rows: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            top_n: DEFAULT_TOP_N,
            sample_rows: DEFAULT_SAMPLE_ROWS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    data_path: Option<String>,
    top_n: Option<usize>,
    sample_rows: Option<usize>,
}

/// Merge a raw `config.json` body over the defaults.
pub fn parse_config(raw: &str) -> Result<AppConfig, serde_json::Error> {
    let parsed = serde_json::from_str::<RawConfig>(raw)?;
    let mut cfg = AppConfig::default();

    if let Some(path) = parsed.data_path {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            warn!("`data_path` is empty in {CONFIG_FILE}; keeping {DEFAULT_DATA_PATH}");
        } else {
            cfg.data_path = PathBuf::from(trimmed);
        }
    }
    if let Some(n) = parsed.top_n {
        cfg.top_n = n.clamp(1, MAX_TOP_N);
        if cfg.top_n != n {
            warn!("top_n={n} out of range; using {}", cfg.top_n);
        }
    }
    if let Some(n) = parsed.sample_rows {
        cfg.sample_rows = n.clamp(1, MAX_SAMPLE_ROWS);
        if cfg.sample_rows != n {
            warn!("sample_rows={n} out of range; using {}", cfg.sample_rows);
        }
    }

    Ok(cfg)
}

pub fn load_config() -> AppConfig {
    let cfg_path = PathBuf::from(CONFIG_FILE);

    match fs::read_to_string(&cfg_path) {
        Ok(raw) => match parse_config(&raw) {
            Ok(cfg) => {
                info!("Loaded config from {}", cfg_path.display());
                cfg
            }
            Err(err) => {
                warn!("Failed to parse {CONFIG_FILE} ({}). Using defaults.", err);
                AppConfig::default()
            }
        },
        Err(_) => {
            info!("No {CONFIG_FILE} found; using defaults");
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_keeps_defaults() {
        let cfg = parse_config("{}").unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn overrides_and_clamps() {
        let cfg = parse_config(r#"{"data_path":" ./titles.csv ","top_n":0,"sample_rows":25}"#)
            .unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("./titles.csv"));
        assert_eq!(cfg.top_n, 1);
        assert_eq!(cfg.sample_rows, 25);
    }

    #[test]
    fn unknown_keys_do_not_drop_known_ones() {
        let cfg = parse_config(r#"{"data_path":"a.csv","csv_path":"b.csv","top_n":5}"#).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("a.csv"));
        assert_eq!(cfg.top_n, 5);
        assert_eq!(cfg.sample_rows, DEFAULT_SAMPLE_ROWS);
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(parse_config("{ not json").is_err());
    }
}
