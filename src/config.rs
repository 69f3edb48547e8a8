use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// Everything has a CLI flag too; env vars (or a .env file, loaded at
/// startup via dotenvy) just set the defaults for repeated runs against
/// the same corpus.
pub struct Config {
    /// Directory of award XML files (LOESS_DATA_DIR)
    pub data_dir: Option<PathBuf>,
    /// Proportion of files to sample on import (LOESS_SAMPLE_PROPORTION)
    pub sample_proportion: f64,
    /// Where the CLI writes rendered SVGs (LOESS_PLOT_DIR)
    pub plot_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let sample_proportion = match env::var("LOESS_SAMPLE_PROPORTION") {
            Ok(raw) => raw.parse().map_err(|_| {
                anyhow::anyhow!("LOESS_SAMPLE_PROPORTION is not a number: {raw}")
            })?,
            Err(_) => 0.8,
        };

        Ok(Self {
            data_dir: env::var("LOESS_DATA_DIR").ok().map(PathBuf::from),
            sample_proportion,
            plot_dir: env::var("LOESS_PLOT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
        })
    }

    /// Resolve the corpus directory: CLI flag wins, then env, else error.
    pub fn require_data_dir(&self, flag: Option<PathBuf>) -> Result<PathBuf> {
        flag.or_else(|| self.data_dir.clone()).ok_or_else(|| {
            anyhow::anyhow!(
                "No corpus directory given. Pass --dir or set LOESS_DATA_DIR \
                 in your environment or .env file."
            )
        })
    }
}
