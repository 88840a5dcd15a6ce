//! Viewer configuration, loaded from an optional JSON file.

use crate::view::MapperSettings;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a config file when `--config` is not given.
pub const CONFIG_ENV_VAR: &str = "MANDELBROT_CONFIG";

#[derive(Debug, Parser)]
#[command(name = "mandelbrot-viewer", version, about = "Interactive GPU Mandelbrot viewer")]
pub struct Cli {
    /// JSON config file; defaults are used when absent.
    #[arg(long, short, env = CONFIG_ENV_VAR)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Replaces the embedded fragment shader when set. Must keep the
    /// `fs_main` entry point and the uniform block layout.
    pub fragment_shader: Option<PathBuf>,
    pub mapper: MapperSettings,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Mandelbrot".to_string(),
            width: 800,
            height: 600,
            fragment_shader: None,
            mapper: MapperSettings::default(),
        }
    }
}

impl ViewerConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ViewerConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config named on the command line, or defaults when none is given.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        match cli.config.as_deref() {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                Self::load_from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        let m = &self.mapper;
        if !(m.coeff_range > 0.0 && m.coeff_range < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "coeff_range must be in (0, 1), got {}",
                m.coeff_range
            )));
        }
        if !(m.coeff_it > 1.0 && m.coeff_it.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "coeff_it must be > 1, got {}",
                m.coeff_it
            )));
        }
        if !(m.pixels_per_line > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "pixels_per_line must be positive, got {}",
                m.pixels_per_line
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::tempdir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_config_flag() {
        let cli = Cli::try_parse_from(["mandelbrot-viewer", "--config", "viewer.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("viewer.json")));
        let cli = Cli::try_parse_from(["mandelbrot-viewer", "-c", "other.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("other.json")));
        assert!(Cli::try_parse_from(["mandelbrot-viewer", "--zoom", "3"]).is_err());
    }

    #[test]
    fn test_load_without_path_gives_defaults() {
        let cli = Cli { config: None };
        assert_eq!(ViewerConfig::load(&cli).unwrap(), ViewerConfig::default());
    }

    #[test]
    fn test_load_reads_cli_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("viewer.json");
        std::fs::write(&path, r#"{ "title": "Deep zoom" }"#).unwrap();
        let cli = Cli { config: Some(path) };
        assert_eq!(ViewerConfig::load(&cli).unwrap().title, "Deep zoom");
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = ViewerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.mapper.coeff_range, 0.9);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("viewer.json");
        std::fs::write(&path, r#"{ "width": 1024, "mapper": { "coeff_range": 0.8 } }"#).unwrap();

        let config = ViewerConfig::load_from_file(&path).unwrap();
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 600);
        assert_eq!(config.mapper.coeff_range, 0.8);
        assert_eq!(config.mapper.coeff_it, 1.0325);
        assert_eq!(config.mapper.pan_fraction, 0.075);
        assert!(config.fragment_shader.is_none());
    }

    #[test]
    fn test_invalid_coefficients_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{ "mapper": { "coeff_range": 1.5 } }"#).unwrap();
        assert!(matches!(
            ViewerConfig::load_from_file(&path),
            Err(ConfigError::Invalid(_))
        ));

        let mut config = ViewerConfig::default();
        config.mapper.coeff_it = 0.5;
        assert!(config.validate().is_err());
        config.mapper.coeff_it = 1.1;
        config.height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bundled_config_parses() {
        let config: ViewerConfig =
            serde_json::from_str(include_str!("../config/viewer.json")).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!((config.width, config.height), (1024, 768));
        assert_eq!(config.mapper.rotation_step, MapperSettings::default().rotation_step);
    }

    #[test]
    fn test_missing_and_malformed_files() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            ViewerConfig::load_from_file(&missing),
            Err(ConfigError::Io { .. })
        ));

        let malformed = dir.path().join("broken.json");
        std::fs::write(&malformed, "{ width: ").unwrap();
        assert!(matches!(
            ViewerConfig::load_from_file(&malformed),
            Err(ConfigError::Parse { .. })
        ));
    }
}
