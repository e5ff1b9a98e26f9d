//! Configuration management for the `VoiceGuide` backend
//!
//! Settings come from an optional TOML file overlaid with environment
//! variables (`VOICEGUIDE_COMPLETION__API_KEY`, `VOICEGUIDE_SERVER__PORT`, ...).
//! The completion API key may also be given as `OPENAI_API_KEY` and the
//! browser maps key as `GOOGLE_MAPS_API_KEY`.

use crate::VoiceGuideError;
use crate::models::Coordinates;
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fallback environment variable for the completion API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Fallback environment variable for the browser maps key
pub const MAPS_API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Environment variable pointing at the config file
pub const CONFIG_PATH_ENV: &str = "VOICEGUIDE_CONFIG";

/// Root configuration structure for the `VoiceGuide` backend
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VoiceGuideConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub locations: LocationsConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub maps: MapsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound for producing a response, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

/// Chat-completion API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    pub api_key: Option<String>,
    /// Base URL of an OpenAI compatible API
    #[serde(default = "default_completion_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Timeout per outbound call in seconds
    #[serde(default = "default_completion_timeout")]
    pub timeout_seconds: u64,
    /// Retries for transient failures (connect errors, 429, 5xx)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Sampling parameters for the answer and follow-up calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_answer_max_tokens")]
    pub answer_max_tokens: u32,
    #[serde(default = "default_followup_max_tokens")]
    pub followup_max_tokens: u32,
}

/// Gazetteer and directions settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationsConfig {
    /// JSON file replacing the built-in Dubai gazetteer
    pub gazetteer_path: Option<PathBuf>,
    /// Assumed average driving speed for duration estimates
    #[serde(default = "default_average_speed")]
    pub average_speed_kmh: f64,
}

/// Map framing for location answers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_map_center")]
    pub default_center: Coordinates,
    #[serde(default = "default_zoom")]
    pub default_zoom: u8,
    /// Zoom when centred on a single primary location
    #[serde(default = "default_primary_zoom")]
    pub primary_zoom: u8,
    /// Zoom when a route between two locations is shown
    #[serde(default = "default_directions_zoom")]
    pub directions_zoom: u8,
}

/// Browser map widget credentials
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MapsConfig {
    pub google_api_key: Option<String>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_request_timeout() -> u64 {
    60
}

fn default_body_limit() -> usize {
    64 * 1024
}

fn default_completion_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_completion_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    2
}

fn default_temperature() -> f32 {
    0.7
}

fn default_answer_max_tokens() -> u32 {
    800
}

fn default_followup_max_tokens() -> u32 {
    150
}

fn default_average_speed() -> f64 {
    35.0
}

fn default_map_center() -> Coordinates {
    Coordinates::new(25.2048, 55.2708)
}

fn default_zoom() -> u8 {
    11
}

fn default_primary_zoom() -> u8 {
    14
}

fn default_directions_zoom() -> u8 {
    12
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_completion_base_url(),
            model: default_model(),
            timeout_seconds: default_completion_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            answer_max_tokens: default_answer_max_tokens(),
            followup_max_tokens: default_followup_max_tokens(),
        }
    }
}

impl Default for LocationsConfig {
    fn default() -> Self {
        Self {
            gazetteer_path: None,
            average_speed_kmh: default_average_speed(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center: default_map_center(),
            default_zoom: default_zoom(),
            primary_zoom: default_primary_zoom(),
            directions_zoom: default_directions_zoom(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl VoiceGuideConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::load_from_path(path)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config.toml"));

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("VOICEGUIDE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: VoiceGuideConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_key_fallbacks(|name| std::env::var(name).ok());

        config.validate()?;

        Ok(config)
    }

    /// Fill keys missing from the layered sources from their plain variables
    fn apply_key_fallbacks(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.completion.api_key.is_none() {
            self.completion.api_key = lookup(API_KEY_ENV);
        }
        if self.maps.google_api_key.is_none() {
            self.maps.google_api_key = lookup(MAPS_API_KEY_ENV);
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// The completion API key, which is mandatory
    pub fn api_key(&self) -> crate::Result<&str> {
        match self.completion.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(VoiceGuideError::config(format!(
                "Completion API key is not configured. Set {API_KEY_ENV} or VOICEGUIDE_COMPLETION__API_KEY."
            ))),
        }
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        let api_key = self.api_key()?;

        if api_key.len() < 8 {
            return Err(VoiceGuideError::config(
                "Completion API key appears to be invalid (too short). Please check your API key.",
            )
            .into());
        }

        if let Some(maps_key) = &self.maps.google_api_key
            && maps_key.trim().is_empty()
        {
            return Err(VoiceGuideError::config(
                "Maps API key cannot be empty if provided. Either remove it or provide a valid key.",
            )
            .into());
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.completion.timeout_seconds == 0 || self.completion.timeout_seconds > 300 {
            return Err(VoiceGuideError::config(
                "Completion timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.completion.max_retries > 10 {
            return Err(
                VoiceGuideError::config("Completion max retries cannot exceed 10").into(),
            );
        }

        if self.server.request_timeout_seconds == 0 || self.server.request_timeout_seconds > 600 {
            return Err(VoiceGuideError::config(
                "Request timeout must be between 1 and 600 seconds",
            )
            .into());
        }

        if !(0.0..=2.0).contains(&self.assistant.temperature) {
            return Err(
                VoiceGuideError::config("Temperature must be between 0.0 and 2.0").into(),
            );
        }

        if self.assistant.answer_max_tokens == 0 || self.assistant.followup_max_tokens == 0 {
            return Err(VoiceGuideError::config("Token limits must be positive").into());
        }

        if !(self.locations.average_speed_kmh > 0.0) {
            return Err(VoiceGuideError::config("Average speed must be positive").into());
        }

        for zoom in [
            self.map.default_zoom,
            self.map.primary_zoom,
            self.map.directions_zoom,
        ] {
            if zoom > 21 {
                return Err(VoiceGuideError::config("Zoom levels cannot exceed 21").into());
            }
        }

        self.map
            .default_center
            .validate()
            .map_err(|e| VoiceGuideError::config(format!("Invalid map center: {e}")))?;

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(VoiceGuideError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(VoiceGuideError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.completion.base_url.starts_with("http://")
            && !self.completion.base_url.starts_with("https://")
        {
            return Err(VoiceGuideError::config(
                "Completion API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if self.completion.model.trim().is_empty() {
            return Err(VoiceGuideError::config("Completion model cannot be empty").into());
        }

        Ok(())
    }
}
