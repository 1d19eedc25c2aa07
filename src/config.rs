use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub engine: EngineConfig,
    pub refresh: RefreshConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Metrics endpoint; `{engine}` is replaced by `engine_name`.
    pub url_format: String,
    #[serde(default = "default_engine_name")]
    pub engine_name: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_engine_name() -> String {
    "activiti".into()
}

fn default_request_timeout_ms() -> u64 {
    5000
}

impl EngineConfig {
    /// Metrics URL with the engine name filled in.
    pub fn metrics_url(&self) -> String {
        self.url_format.replace("{engine}", &self.engine_name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshConfig {
    /// Delay between two engine fetches.
    pub interval_ms: u64,
    /// How often to log refresh stats at INFO level.
    pub stats_log_interval_secs: u64,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.engine.url_format.is_empty(),
            "engine.url_format must be non-empty"
        );
        anyhow::ensure!(
            !self.engine.engine_name.is_empty(),
            "engine.engine_name must be non-empty"
        );
        anyhow::ensure!(
            self.engine.request_timeout_ms > 0,
            "engine.request_timeout_ms must be > 0, got {}",
            self.engine.request_timeout_ms
        );
        anyhow::ensure!(
            self.refresh.interval_ms > 0,
            "refresh.interval_ms must be > 0, got {}",
            self.refresh.interval_ms
        );
        anyhow::ensure!(
            self.refresh.stats_log_interval_secs > 0,
            "refresh.stats_log_interval_secs must be > 0, got {}",
            self.refresh.stats_log_interval_secs
        );
        Ok(())
    }
}
