use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::DEFAULT_MAX_ATTEMPTS;
use crate::services::{InputFormat, OutputFormat};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub input: InputSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputSettings {
    #[serde(default = "default_input_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub format: InputFormat,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            path: default_input_path(),
            format: InputFormat::default(),
        }
    }
}

fn default_input_path() -> PathBuf { PathBuf::from("data/families.xml") }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    /// Fixed seed for reproducible draws, entropy when unset
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub parallel: bool,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            seed: None,
            parallel: false,
        }
    }
}

fn default_max_attempts() -> usize { DEFAULT_MAX_ATTEMPTS }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
    /// Write here instead of stdout
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with GIFT_DRAW)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., GIFT_DRAW__MATCHING__SEED -> matching.seed
            .add_source(environment())
            .build()?;

        settings.try_deserialize::<Self>()?.validated()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize::<Self>()?.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.matching.max_attempts == 0 {
            return Err(ConfigError::Message(
                "matching.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("GIFT_DRAW")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_matching() {
        let matching = MatchingSettings::default();
        assert_eq!(matching.max_attempts, 100);
        assert_eq!(matching.seed, None);
        assert!(!matching.parallel);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "compact");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[input]\npath = \"families.json\"\nformat = \"json\"\n\n[matching]\nmax_attempts = 5\nseed = 42\n\n[output]\nformat = \"json\""
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.input.path, PathBuf::from("families.json"));
        assert_eq!(settings.input.format, InputFormat::Json);
        assert_eq!(settings.matching.max_attempts, 5);
        assert_eq!(settings.matching.seed, Some(42));
        assert_eq!(settings.output.format, OutputFormat::Json);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_rejects_zero_attempts() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[matching]\nmax_attempts = 0").unwrap();

        assert!(Settings::load_from(file.path()).is_err());
    }
}
