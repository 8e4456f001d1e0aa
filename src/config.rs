//! Service configuration
//!
//! Values come from environment variables (a `.env` file is honoured through
//! `dotenv`). Only the model API key is required.
//!
//! - `GEMINI_API_KEY` (or `API_KEY`): key for the Gemini API
//! - `GEMINI_MODEL`: model name (default `gemini-2.5-flash`)
//! - `GEMINI_API_ENDPOINT`: API base URL
//! - `HOST` / `PORT`: bind address (default `0.0.0.0:3000`)
//! - `MEETING_REQUESTS_CSV`: where booking form submissions are written
//! - `MAX_TOOL_ROUNDS`: tool-call rounds allowed per turn (default 10)
//! - `MODEL_TIMEOUT_SECS`: timeout for each call to the model API (default 20)
//! - `REQUEST_TIMEOUT_SECS`: per-request timeout for the HTTP layer
//! - `LOG_LEVEL`: default log filter when `RUST_LOG` is unset

use dotenv::dotenv;
use std::env;
use std::str::FromStr;

use crate::error::ConfigError;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub host: String,
    pub port: u16,
    pub requests_csv: String,
    pub max_tool_rounds: usize,
    pub model_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GEMINI_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing("GEMINI_API_KEY".to_string()))?;

        Ok(Self {
            api_key,
            model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            endpoint: lookup("GEMINI_API_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
                .trim_end_matches('/')
                .to_string(),
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
            requests_csv: lookup("MEETING_REQUESTS_CSV")
                .unwrap_or_else(|| "meeting_requests.csv".to_string()),
            max_tool_rounds: parse_or(&lookup, "MAX_TOOL_ROUNDS", 10)?,
            model_timeout_secs: parse_or(&lookup, "MODEL_TIMEOUT_SECS", 20)?,
            request_timeout_secs: parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value,
        }),
        None => Ok(default),
    }
}
