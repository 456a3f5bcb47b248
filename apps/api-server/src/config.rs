//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use autopost_core::PipelineSettings;
use autopost_infra::http;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Timeout of every outbound HTTP call.
    pub http_timeout: Duration,
    pub pipeline: PipelineSettings,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = PipelineSettings::default();

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            http_timeout: http::timeout_from_env(),
            pipeline: PipelineSettings {
                image_count: parse_var("IMAGE_COUNT").unwrap_or(defaults.image_count),
                min_width: parse_var("IMAGE_MIN_WIDTH").unwrap_or(defaults.min_width),
                min_height: parse_var("IMAGE_MIN_HEIGHT").unwrap_or(defaults.min_height),
            },
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
