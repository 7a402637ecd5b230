//! Service configuration.
//!
//! Precedence: built-in defaults < TOML file (`EXAMPOINT_CONFIG`, default
//! `config/exampoint.toml`) < environment (`EXAMPOINT__*`).
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | app_name | ExamPoint | Shown in logs and `/health`. |
//! | bind_addr / port | 127.0.0.1 / 8000 | Gateway listener. |
//! | billing_url | Stripe test portal | Paid checkouts redirect here. |
//! | donation_url | Buy Me a Coffee page | Donate link. |
//! | chat.endpoint | unset | Chat-completion URL; AI routes are disabled without it. |
//! | chat.api_key | unset | Bearer token for the chat endpoint. |
//! | chat.model | MaaS_4.1 | Model identifier sent in every request. |
//! | chat.timeout_secs | 60 | Client-side request timeout. |
//! | latency.*_ms | see [`MockLatency`] | Simulated delays. |

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BILLING_URL: &str = "https://billing.stripe.com/p/login/test_cNi4gB3Bl3ea1Ai2UW7bW00";
pub const DEFAULT_DONATION_URL: &str = "https://buymeacoffee.com/exampoint?new=1";
pub const DEFAULT_CHAT_MODEL: &str = "MaaS_4.1";

fn default_timeout_secs() -> u64 {
    60
}

fn default_chat_model() -> String {
    DEFAULT_CHAT_MODEL.to_string()
}

/// Chat-completion endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_chat_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            model: default_chat_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ChatConfig {
    /// Endpoint with surrounding whitespace removed; `None` when unset or blank.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Fixed delays standing in for backend and AI latency, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockLatency {
    pub auth_ms: u64,
    pub flashcards_ms: u64,
    pub quiz_ms: u64,
    pub tutor_ms: u64,
    pub upload_ms: u64,
    pub material_ms: u64,
}

impl Default for MockLatency {
    fn default() -> Self {
        Self {
            auth_ms: 1000,
            flashcards_ms: 2000,
            quiz_ms: 2000,
            tutor_ms: 1500,
            upload_ms: 1500,
            material_ms: 1000,
        }
    }
}

impl MockLatency {
    /// No delays at all; used by tests and benchmarks.
    pub const fn none() -> Self {
        Self {
            auth_ms: 0,
            flashcards_ms: 0,
            quiz_ms: 0,
            tutor_ms: 0,
            upload_ms: 0,
            material_ms: 0,
        }
    }

    pub fn auth(&self) -> Duration {
        Duration::from_millis(self.auth_ms)
    }

    pub fn flashcards(&self) -> Duration {
        Duration::from_millis(self.flashcards_ms)
    }

    pub fn quiz(&self) -> Duration {
        Duration::from_millis(self.quiz_ms)
    }

    pub fn tutor(&self) -> Duration {
        Duration::from_millis(self.tutor_ms)
    }

    pub fn upload(&self) -> Duration {
        Duration::from_millis(self.upload_ms)
    }

    pub fn material(&self) -> Duration {
        Duration::from_millis(self.material_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyConfig {
    pub app_name: String,
    pub bind_addr: String,
    pub port: u16,
    pub billing_url: String,
    pub donation_url: String,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub latency: MockLatency,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            app_name: "ExamPoint".to_string(),
            bind_addr: "127.0.0.1".to_string(),
            port: 8000,
            billing_url: DEFAULT_BILLING_URL.to_string(),
            donation_url: DEFAULT_DONATION_URL.to_string(),
            chat: ChatConfig::default(),
            latency: MockLatency::default(),
        }
    }
}

impl StudyConfig {
    /// Load from `EXAMPOINT_CONFIG` (or `config/exampoint.toml`) and the environment.
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::var("EXAMPOINT_CONFIG").unwrap_or_else(|_| "config/exampoint.toml".to_string());
        Self::load_from(Path::new(&path))
    }

    /// Load from an explicit file path; a missing file falls back to defaults.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        let defaults = StudyConfig::default();
        let latency = defaults.latency;
        let builder = config::Config::builder()
            .set_default("app_name", defaults.app_name)?
            .set_default("bind_addr", defaults.bind_addr)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("billing_url", defaults.billing_url)?
            .set_default("donation_url", defaults.donation_url)?
            .set_default("chat.model", defaults.chat.model)?
            .set_default("chat.timeout_secs", defaults.chat.timeout_secs)?
            .set_default("latency.auth_ms", latency.auth_ms)?
            .set_default("latency.flashcards_ms", latency.flashcards_ms)?
            .set_default("latency.quiz_ms", latency.quiz_ms)?
            .set_default("latency.tutor_ms", latency.tutor_ms)?
            .set_default("latency.upload_ms", latency.upload_ms)?
            .set_default("latency.material_ms", latency.material_ms)?;

        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        builder
            .add_source(config::Environment::with_prefix("EXAMPOINT").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}
