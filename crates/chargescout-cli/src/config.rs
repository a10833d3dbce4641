//! Layered configuration: defaults, then an optional `chargescout.toml`,
//! then the environment, then command-line flags (applied by the caller).

use anyhow::{Context, Result};
use chargescout_data::catalog::DatasetFiles;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default search radius in kilometers.
pub const DEFAULT_RADIUS_KM: f64 = 3.0;
/// Default cutoff for the plug-forecast nearest match.
pub const DEFAULT_CUTOFF_KM: f64 = 5.0;

const CONFIG_FILE: &str = "chargescout.toml";
const DATA_DIR_ENV: &str = "CHARGESCOUT_DATA_DIR";

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub radius_km: f64,
    pub cutoff_km: f64,
    pub files: DatasetFiles,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            radius_km: DEFAULT_RADIUS_KM,
            cutoff_km: DEFAULT_CUTOFF_KM,
            files: DatasetFiles::default(),
        }
    }
}

/// The subset of settings a config file may override.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    data_dir: Option<PathBuf>,
    radius_km: Option<f64>,
    cutoff_km: Option<f64>,
    datasets: Option<DatasetFiles>,
}

impl AppConfig {
    /// Load configuration with the standard precedence. An explicit
    /// `config_path` must exist; the default `chargescout.toml` is only
    /// read when present.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let path = config_path.map(Path::to_path_buf).or_else(|| {
            let default = PathBuf::from(CONFIG_FILE);
            default.exists().then_some(default)
        });

        if let Some(path) = path {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let file: FileConfig = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?;
            config.apply_file(file);
        }

        if let Ok(dir) = env::var(DATA_DIR_ENV) {
            if dir.trim().is_empty() {
                tracing::warn!("{} is set but empty; ignoring it", DATA_DIR_ENV);
            } else {
                config.data_dir = PathBuf::from(dir);
            }
        }

        Ok(config)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(data_dir) = file.data_dir {
            self.data_dir = data_dir;
        }
        if let Some(radius_km) = file.radius_km {
            self.radius_km = radius_km;
        }
        if let Some(cutoff_km) = file.cutoff_km {
            self.cutoff_km = cutoff_km;
        }
        if let Some(datasets) = file.datasets {
            self.files = datasets;
        }
    }
}
