use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

pub const DEFAULT_DELAY_MS: u64 = 2000;
pub const DEFAULT_FAILURE_RATE: f64 = 0.1;
pub const DEFAULT_PLACEHOLDER_URL: &str = "https://your.placeholder.png";
pub const DEFAULT_FAILURE_MESSAGE: &str =
    "Oopsie! Our cute little server got a tummy ache. Please try again!";

#[derive(Debug, Clone, Deserialize)]
pub struct AvatarConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub generation: GenerationConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Prod,
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" | "test" => Ok(Environment::Dev),
            "prod" | "production" => Ok(Environment::Prod),
            other => Err(format!("Unknown environment: {}", other)),
        }
    }
}

/// Parameters of the simulated avatar generation.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    pub delay_ms: u64,
    /// Probability in [0, 1] that a request ends in a simulated failure.
    pub failure_rate: f64,
    pub placeholder_url: String,
    pub failure_message: String,
}

impl GenerationConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY_MS,
            failure_rate: DEFAULT_FAILURE_RATE,
            placeholder_url: DEFAULT_PLACEHOLDER_URL.to_string(),
            failure_message: DEFAULT_FAILURE_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// `["*"]` allows any origin.
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            common: core_config::Config::default(),
            environment: Environment::Dev,
            service_name: "avatar-service".to_string(),
            log_level: "info".to_string(),
            otlp_endpoint: None,
            generation: GenerationConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl AvatarConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        let env_str = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string());
        let environment: Environment = env_str
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let is_prod = environment == Environment::Prod;

        let delay_ms = get_env("AVATAR_DELAY_MS", Some(&DEFAULT_DELAY_MS.to_string()), is_prod)?;
        let failure_rate = get_env(
            "AVATAR_FAILURE_RATE",
            Some(&DEFAULT_FAILURE_RATE.to_string()),
            is_prod,
        )?;
        let allowed_origins = get_env("CORS_ALLOWED_ORIGINS", Some("*"), is_prod)?;

        let config = AvatarConfig {
            common: common_config,
            environment,
            service_name: get_env("SERVICE_NAME", Some("avatar-service"), is_prod)?,
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            generation: GenerationConfig {
                delay_ms: parse_delay_ms(&delay_ms)?,
                failure_rate: parse_failure_rate(&failure_rate)?,
                placeholder_url: get_env(
                    "AVATAR_PLACEHOLDER_URL",
                    Some(DEFAULT_PLACEHOLDER_URL),
                    is_prod,
                )?,
                failure_message: get_env(
                    "AVATAR_FAILURE_MESSAGE",
                    Some(DEFAULT_FAILURE_MESSAGE),
                    is_prod,
                )?,
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(&allowed_origins)?,
            },
        };

        Ok(config)
    }
}

fn parse_delay_ms(raw: &str) -> Result<u64, AppError> {
    raw.trim().parse().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("AVATAR_DELAY_MS '{}' is invalid: {}", raw, e))
    })
}

fn parse_failure_rate(raw: &str) -> Result<f64, AppError> {
    let rate: f64 = raw.trim().parse().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!(
            "AVATAR_FAILURE_RATE '{}' is invalid: {}",
            raw,
            e
        ))
    })?;

    if !(0.0..=1.0).contains(&rate) {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "AVATAR_FAILURE_RATE must be within [0, 1], got {}",
            rate
        )));
    }

    Ok(rate)
}

fn parse_origins(raw: &str) -> Result<Vec<String>, AppError> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    if origins.is_empty() {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "CORS_ALLOWED_ORIGINS is set but lists no origins; use '*' to allow any origin"
        )));
    }

    Ok(origins)
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
