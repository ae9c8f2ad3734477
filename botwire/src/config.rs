//! Runtime configuration: token, API host, update-source settings, logging.
//! Loaded from environment variables; callers load `.env` first (dotenvy)
//! if they want file-based config.

use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Default platform host.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Full runtime config. `load()` reads the environment; `with_token()` gives
/// programmatic defaults. Call `validate()` after either to fail fast.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// BOT_TOKEN (secret; never logged raw)
    pub token: String,
    /// TELEGRAM_API_URL
    pub api_url: String,
    /// VERBOSE: lowers the default log filter to debug
    pub verbose: bool,
    /// LOG_FILE: optional tee target for tracing output
    pub log_file: Option<String>,
    /// POLL_INTERVAL_SECS: pause between polling iterations
    pub poll_interval_secs: u64,
    /// INITIAL_OFFSET: cursor start for a fresh polling session
    pub initial_offset: i64,
    /// ALLOWED_UPDATES: comma-separated payload kinds to subscribe to
    pub allowed_updates: Vec<String>,
    /// DISPATCH_CONCURRENCY: handler pool permits
    pub dispatch_concurrency: usize,
    /// WEBHOOK_ADDR: host:port to bind the webhook server on
    pub webhook_addr: Option<String>,
    /// WEBHOOK_CERT / WEBHOOK_KEY: PEM pair for TLS serving
    pub webhook_cert: Option<PathBuf>,
    pub webhook_key: Option<PathBuf>,
    /// WEBHOOK_SECRET_TOKEN: optional push-header check
    pub webhook_secret_token: Option<String>,
}

impl BotConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN when
    /// provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let api_url = env::var("TELEGRAM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let verbose = env::var("VERBOSE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let log_file = env::var("LOG_FILE").ok();
        let poll_interval_secs = env::var("POLL_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1);
        let initial_offset = env::var("INITIAL_OFFSET")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        let allowed_updates = env::var("ALLOWED_UPDATES")
            .map(|s| {
                s.split(',')
                    .map(|kind| kind.trim().to_string())
                    .filter(|kind| !kind.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        let dispatch_concurrency = env::var("DISPATCH_CONCURRENCY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(32);
        let webhook_addr = env::var("WEBHOOK_ADDR").ok();
        let webhook_cert = env::var("WEBHOOK_CERT").ok().map(PathBuf::from);
        let webhook_key = env::var("WEBHOOK_KEY").ok().map(PathBuf::from);
        let webhook_secret_token = env::var("WEBHOOK_SECRET_TOKEN").ok();

        Ok(Self {
            token,
            api_url,
            verbose,
            log_file,
            poll_interval_secs,
            initial_offset,
            allowed_updates,
            dispatch_concurrency,
            webhook_addr,
            webhook_cert,
            webhook_key,
            webhook_secret_token,
        })
    }

    /// Programmatic config with defaults for everything but the token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            verbose: false,
            log_file: None,
            poll_interval_secs: 1,
            initial_offset: 0,
            allowed_updates: Vec::new(),
            dispatch_concurrency: 32,
            webhook_addr: None,
            webhook_cert: None,
            webhook_key: None,
            webhook_secret_token: None,
        }
    }

    /// Validate before wiring anything up.
    pub fn validate(&self) -> Result<()> {
        if self.token.is_empty() {
            anyhow::bail!("bot token must not be empty");
        }
        if reqwest::Url::parse(&self.api_url).is_err() {
            anyhow::bail!("TELEGRAM_API_URL is not a valid URL: {}", self.api_url);
        }
        if self.dispatch_concurrency == 0 {
            anyhow::bail!("DISPATCH_CONCURRENCY must be at least 1");
        }
        if self.webhook_cert.is_some() != self.webhook_key.is_some() {
            anyhow::bail!("WEBHOOK_CERT and WEBHOOK_KEY must be set together");
        }
        Ok(())
    }
}
