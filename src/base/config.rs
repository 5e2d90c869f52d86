//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, path::Path, sync::Arc};

use reqwest::Url;
use serde::Deserialize;

use crate::base::prompts;

use super::types::{Res, Void};

/// Default Gemini model to use.
fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

/// Default Gemini REST API base.
fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

/// Default summary for tickets opened from chat.
fn default_ticket_summary() -> String {
    "Support Request from Slack".to_string()
}

/// Default MantisBT category for new tickets.
fn default_ticket_category() -> String {
    "General".to_string()
}

/// Default directive for the support assistant.
fn default_support_directive() -> String {
    prompts::SUPPORT_DIRECTIVE.to_string()
}

/// Default timeout for outbound HTTP calls, in seconds.
fn default_request_timeout_secs() -> u64 {
    30
}

/// Configuration for the helpdesk-bot application.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared settings.
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<ConfigInner> for Config {
    fn from(inner: ConfigInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

/// Settings read from the config file and environment.
#[derive(Debug, Deserialize, Clone)]
pub struct ConfigInner {
    /// Slack bot token (`SLACK_BOT_TOKEN`).
    pub slack_bot_token: String,
    /// Slack app-level token used for socket mode (`SLACK_APP_TOKEN`).
    pub slack_app_token: String,
    /// Gemini API key (`GEMINI_API_KEY`).
    pub gemini_api_key: String,
    /// Gemini model to use (`GEMINI_MODEL`).
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,
    /// Gemini REST API base URL (`GEMINI_API_BASE`).
    #[serde(default = "default_gemini_api_base")]
    pub gemini_api_base: String,
    /// MantisBT REST API base URL, e.g. `http://localhost/mantis/api/rest/` (`MANTIS_URL`).
    pub mantis_url: String,
    /// MantisBT API token (`MANTIS_API_TOKEN`).
    pub mantis_api_token: String,
    /// MantisBT project that receives new tickets (`MANTIS_PROJECT_ID`).
    pub mantis_project_id: i64,
    /// Summary line for new tickets (`TICKET_SUMMARY`).
    #[serde(default = "default_ticket_summary")]
    pub ticket_summary: String,
    /// Category for new tickets; must exist in the MantisBT project (`TICKET_CATEGORY`).
    #[serde(default = "default_ticket_category")]
    pub ticket_category: String,
    /// Optional custom support directive to override the default (`SUPPORT_DIRECTIVE`).
    #[serde(default = "default_support_directive")]
    pub support_directive: String,
    /// Timeout applied to every Gemini and MantisBT request (`REQUEST_TIMEOUT_SECS`).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ConfigInner {
    fn default() -> Self {
        Self {
            slack_bot_token: String::new(),
            slack_app_token: String::new(),
            gemini_api_key: String::new(),
            gemini_model: default_gemini_model(),
            gemini_api_base: default_gemini_api_base(),
            mantis_url: String::new(),
            mantis_api_token: String::new(),
            mantis_project_id: 0,
            ticket_summary: default_ticket_summary(),
            ticket_category: default_ticket_category(),
            support_directive: default_support_directive(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Load the configuration from the optional file and the environment.
    ///
    /// Environment variables override values from the file. Any missing or
    /// invalid required setting is an error.
    pub fn load(explicit_path: Option<&Path>) -> Res<Self> {
        let mut cfg = config::Config::builder();

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        cfg = cfg.add_source(config::Environment::default());

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        result.validate()?;

        Ok(result)
    }

    /// Check the settings that deserialization alone cannot.
    pub fn validate(&self) -> Void {
        let required = [
            ("slack_bot_token", &self.slack_bot_token),
            ("slack_app_token", &self.slack_app_token),
            ("gemini_api_key", &self.gemini_api_key),
            ("gemini_model", &self.gemini_model),
            ("mantis_url", &self.mantis_url),
            ("mantis_api_token", &self.mantis_api_token),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(anyhow::anyhow!("Missing required setting `{name}`."));
            }
        }

        validate_http_url("mantis_url", &self.mantis_url)?;
        validate_http_url("gemini_api_base", &self.gemini_api_base)?;

        if self.mantis_project_id < 1 {
            return Err(anyhow::anyhow!("MantisBT project id must be positive."));
        }

        if self.request_timeout_secs < 1 || self.request_timeout_secs > 600 {
            return Err(anyhow::anyhow!("Request timeout must be between 1 and 600 seconds."));
        }

        Ok(())
    }
}

fn validate_http_url(name: &str, value: &str) -> Void {
    let url = Url::parse(value).map_err(|e| anyhow::anyhow!("Setting `{name}` is not a valid URL: {e}"))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(anyhow::anyhow!("Setting `{name}` must be an http(s) URL."));
    }

    Ok(())
}

// Tests.
