use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub openai: OpenAiConfig,
    pub ask: AskConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    /// Outbound request timeout in seconds; unset means the transport default (none)
    pub timeout_secs: Option<u64>,
    /// Usually supplied through `OPENAI_API_KEY` rather than the config file
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AskConfig {
    pub on_upstream_failure: UpstreamFailurePolicy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

/// What `/api/ask` does when the completion service cannot produce an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UpstreamFailurePolicy {
    /// Always answer 200 with a localized canned answer and a `note`.
    #[default]
    Fallback,
    /// Return 502/500 with the upstream error.
    Surface,
}

impl UpstreamFailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fallback => "fallback",
            Self::Surface => "surface",
        }
    }
}

impl FromStr for UpstreamFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fallback" => Ok(Self::Fallback),
            "surface" => Ok(Self::Surface),
            other => Err(format!("unknown policy '{}' (expected 'fallback' or 'surface')", other)),
        }
    }
}

/// A message raised while loading configuration.
///
/// Configuration is read before the subscriber exists, so these are
/// collected and logged by the caller once tracing is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigNote {
    Info(String),
    Warn(String),
}

impl ConfigNote {
    pub fn log(&self) {
        match self {
            Self::Info(msg) => tracing::info!("{}", msg),
            Self::Warn(msg) => tracing::warn!("{}", msg),
        }
    }
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from the given path, or from conf/config.toml / config.toml
    /// 2. Override with environment variables (OPENAI_API_KEY and APP_*)
    ///
    /// Callers apply any further overrides and then call [`Config::validate`].
    pub fn load(path: Option<&str>) -> Result<(Self, Vec<ConfigNote>), anyhow::Error> {
        let mut notes = Vec::new();
        let mut config = match path.map(str::to_string).or_else(Self::find_config_file) {
            Some(config_path) => {
                notes.push(ConfigNote::Info(format!("Loaded configuration from {}", config_path)));
                Self::from_toml(&config_path)?
            },
            None => {
                notes.push(ConfigNote::Warn("Configuration file not found, using defaults".to_string()));
                Config::default()
            },
        };

        notes.extend(config.apply_env_overrides());

        Ok((config, notes))
    }

    fn apply_env_overrides(&mut self) -> Vec<ConfigNote> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup
    ///
    /// Supported keys:
    /// - OPENAI_API_KEY: Completion API credential
    /// - APP_SERVER_HOST: Server host (default: 0.0.0.0)
    /// - APP_SERVER_PORT: Server port (default: 8080)
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,bible_guide=debug")
    /// - APP_OPENAI_API_BASE: Completion API base URL
    /// - APP_OPENAI_MODEL: Model identifier
    /// - APP_OPENAI_TEMPERATURE: Sampling temperature
    /// - APP_UPSTREAM_FAILURE_POLICY: "fallback" or "surface"
    pub(crate) fn apply_overrides<F>(&mut self, lookup: F) -> Vec<ConfigNote>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut notes = Vec::new();

        if let Some(key) = lookup("OPENAI_API_KEY")
            && !key.trim().is_empty()
        {
            self.openai.api_key = Some(key.trim().to_string());
            notes.push(ConfigNote::Info("Override openai.api_key from env".to_string()));
        }

        if let Some(host) = lookup("APP_SERVER_HOST") {
            self.server.host = host;
            notes.push(ConfigNote::Info(format!("Override server.host from env: {}", self.server.host)));
        }

        if let Some(port) = lookup("APP_SERVER_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
            notes.push(ConfigNote::Info(format!("Override server.port from env: {}", self.server.port)));
        }

        if let Some(level) = lookup("APP_LOG_LEVEL") {
            self.logging.level = level;
            notes.push(ConfigNote::Info(format!("Override logging.level from env: {}", self.logging.level)));
        }

        if let Some(base) = lookup("APP_OPENAI_API_BASE") {
            self.openai.api_base = base;
            notes.push(ConfigNote::Info(format!("Override openai.api_base from env: {}", self.openai.api_base)));
        }

        if let Some(model) = lookup("APP_OPENAI_MODEL") {
            self.openai.model = model;
            notes.push(ConfigNote::Info(format!("Override openai.model from env: {}", self.openai.model)));
        }

        if let Some(temperature) = lookup("APP_OPENAI_TEMPERATURE") {
            match temperature.parse::<f32>() {
                Ok(val) => {
                    self.openai.temperature = val;
                    notes.push(ConfigNote::Info(format!("Override openai.temperature from env: {}", val)));
                },
                Err(e) => notes.push(ConfigNote::Warn(format!(
                    "Invalid APP_OPENAI_TEMPERATURE '{}': {} (keep {})",
                    temperature, e, self.openai.temperature
                ))),
            }
        }

        if let Some(policy) = lookup("APP_UPSTREAM_FAILURE_POLICY") {
            match policy.parse::<UpstreamFailurePolicy>() {
                Ok(val) => {
                    self.ask.on_upstream_failure = val;
                    notes.push(ConfigNote::Info(format!("Override ask.on_upstream_failure from env: {}", val.as_str())));
                },
                Err(e) => notes.push(ConfigNote::Warn(format!(
                    "Invalid APP_UPSTREAM_FAILURE_POLICY: {} (keep {})",
                    e,
                    self.ask.on_upstream_failure.as_str()
                ))),
            }
        }

        notes
    }

    /// Validate configuration, returning non-fatal warnings
    pub fn validate(&self) -> Result<Vec<ConfigNote>, anyhow::Error> {
        let mut notes = Vec::new();
        if self.openai.api_key.is_none() {
            notes.push(ConfigNote::Warn(
                "OPENAI_API_KEY is not set; every answer will be a fallback".to_string(),
            ));
        }

        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.openai.api_base.trim().is_empty() {
            anyhow::bail!("openai.api_base cannot be empty");
        }

        if self.openai.model.trim().is_empty() {
            anyhow::bail!("openai.model cannot be empty");
        }

        if !(0.0..=2.0).contains(&self.openai.temperature) {
            anyhow::bail!("openai.temperature must be within [0, 2]");
        }

        Ok(notes)
    }

    fn find_config_file() -> Option<String> {
        let possible_paths = ["conf/config.toml", "config.toml"];

        possible_paths.iter().find(|p| Path::new(p).exists()).map(|p| p.to_string())
    }

    fn from_toml(path: &str) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.5,
            timeout_secs: None,
            api_key: None,
        }
    }
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info,bible_guide=debug".to_string(), file: None }
    }
}
