use std::env;
use std::fmt;

use crate::rubrics::{EngineConfig, ShortRowPolicy, WeightImbalancePolicy, DEFAULT_MAX_SCORE};

/// Distinguishes runtime behavior for different stages of deployment.
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

/// Top-level configuration for hosts embedding the engine.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub engine: EngineConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let format = match optional_var("APP_LOG_FORMAT") {
            None => LogFormat::Compact,
            Some(value) => LogFormat::parse(&value).ok_or(ConfigError::InvalidValue {
                variable: "APP_LOG_FORMAT",
                value,
                expected: "compact or json",
            })?,
        };

        let default_max_score = match optional_var("APP_DEFAULT_MAX_SCORE") {
            None => DEFAULT_MAX_SCORE,
            Some(value) => value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|score| score.is_finite() && *score > 0.0)
                .ok_or(ConfigError::InvalidMaxScore(value))?,
        };

        let on_short_row = match optional_var("APP_SHORT_ROWS") {
            None => ShortRowPolicy::default(),
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "drop" => ShortRowPolicy::Drop,
                "reject" => ShortRowPolicy::Reject,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        variable: "APP_SHORT_ROWS",
                        value,
                        expected: "drop or reject",
                    })
                }
            },
        };

        let on_weight_imbalance = match optional_var("APP_WEIGHT_IMBALANCE") {
            None => WeightImbalancePolicy::default(),
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "normalize" => WeightImbalancePolicy::Normalize,
                "reject" => WeightImbalancePolicy::Reject,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        variable: "APP_WEIGHT_IMBALANCE",
                        value,
                        expected: "normalize or reject",
                    })
                }
            },
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level, format },
            engine: EngineConfig {
                default_max_score,
                on_short_row,
                on_weight_imbalance,
            },
        })
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Output shape of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidMaxScore(String),
    InvalidValue {
        variable: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidMaxScore(value) => write!(
                f,
                "APP_DEFAULT_MAX_SCORE must be a positive number, got '{}'",
                value
            ),
            ConfigError::InvalidValue {
                variable,
                value,
                expected,
            } => write!(f, "{variable} must be {expected}, got '{value}'"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for name in [
            "APP_ENV",
            "APP_LOG_LEVEL",
            "APP_LOG_FORMAT",
            "APP_DEFAULT_MAX_SCORE",
            "APP_SHORT_ROWS",
            "APP_WEIGHT_IMBALANCE",
        ] {
            env::remove_var(name);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.telemetry.format, LogFormat::Compact);
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn strict_policies_and_scale_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        env::set_var("APP_LOG_FORMAT", "JSON");
        env::set_var("APP_DEFAULT_MAX_SCORE", "20");
        env::set_var("APP_SHORT_ROWS", "reject");
        env::set_var("APP_WEIGHT_IMBALANCE", "Reject");

        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.telemetry.format, LogFormat::Json);
        assert_eq!(config.engine.default_max_score, 20.0);
        assert_eq!(config.engine.on_short_row, ShortRowPolicy::Reject);
        assert_eq!(
            config.engine.on_weight_imbalance,
            WeightImbalancePolicy::Reject
        );
    }

    #[test]
    fn rejects_non_positive_max_score() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_DEFAULT_MAX_SCORE", "-5");
        let error = AppConfig::load().expect_err("negative scale");
        reset_env();
        assert!(matches!(error, ConfigError::InvalidMaxScore(ref value) if value == "-5"));
    }

    #[test]
    fn rejects_unknown_policy_names() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_SHORT_ROWS", "skip");
        let error = AppConfig::load().expect_err("unknown policy");
        reset_env();
        assert_eq!(
            error.to_string(),
            "APP_SHORT_ROWS must be drop or reject, got 'skip'"
        );
    }
}
