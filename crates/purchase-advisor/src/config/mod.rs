use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::workflows::purchase::ScoringProfile;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the advisor.
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub environment: AppEnvironment,
    pub storage: StorageConfig,
    pub scoring: ScoringSettings,
    pub telemetry: TelemetryConfig,
}

impl AdvisorConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("ADVISOR_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let data_dir = env::var("ADVISOR_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".purchase-advisor"));
        if data_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDataDir);
        }

        let profile = match env::var("ADVISOR_PROFILE") {
            Ok(raw) => {
                ScoringProfile::parse(&raw).ok_or(ConfigError::InvalidProfile { value: raw })?
            }
            Err(_) => ScoringProfile::default(),
        };

        let log_level = env::var("ADVISOR_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            storage: StorageConfig { data_dir },
            scoring: ScoringSettings { profile },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where saved calculations live on disk.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

/// Which weight table the engine runs with.
#[derive(Debug, Clone, Copy)]
pub struct ScoringSettings {
    pub profile: ScoringProfile,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidProfile { value: String },
    EmptyDataDir,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidProfile { value } => write!(
                f,
                "ADVISOR_PROFILE must be 'deliberate' or 'classic', got '{}'",
                value
            ),
            ConfigError::EmptyDataDir => write!(f, "ADVISOR_DATA_DIR must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {}
