//! Webhook update source: one HTTP route the platform pushes updates to.
//!
//! The route path embeds the SHA-256 of the bot token, so the URL itself is
//! not guessable; that is obscurity, not authentication. Real authentication
//! is the optional secret-token header check, which callers enable by
//! configuring `WEBHOOK_SECRET_TOKEN` and registering the same secret with
//! the platform (`SetWebhook::secret_token`).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use botwire_core::{Error, Result};
use botwire_dispatch::Dispatcher;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::api::transport::sha256_hex;
use crate::config::BotConfig;

/// Fixed prefix of the webhook route.
pub const WEBHOOK_PATH_PREFIX: &str = "/webhook";

/// Header the platform echoes the registered secret in.
pub const SECRET_TOKEN_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

/// Route path for a bot token: `/webhook/<hex sha256(token)>`.
pub fn webhook_path(token: &str) -> String {
    format!("{}/{}", WEBHOOK_PATH_PREFIX, sha256_hex(token))
}

struct WebhookState {
    dispatcher: Arc<Dispatcher>,
    secret_token: Option<String>,
}

/// Webhook update source. Stateless per request: each pushed body decodes
/// to one update and goes through the dispatcher; no cursor is involved.
pub struct WebhookServer {
    path: String,
    addr: SocketAddr,
    tls: Option<(PathBuf, PathBuf)>,
    state: Arc<WebhookState>,
}

impl WebhookServer {
    pub fn new(token: &str, addr: SocketAddr, dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            path: webhook_path(token),
            addr,
            tls: None,
            state: Arc::new(WebhookState {
                dispatcher,
                secret_token: None,
            }),
        }
    }

    /// Server configured from a [`BotConfig`]; requires `WEBHOOK_ADDR`.
    pub fn from_config(config: &BotConfig, dispatcher: Arc<Dispatcher>) -> Result<Self> {
        let addr = config
            .webhook_addr
            .as_deref()
            .ok_or_else(|| Error::Config("WEBHOOK_ADDR not set".to_string()))?
            .parse::<SocketAddr>()
            .map_err(|e| Error::Config(format!("WEBHOOK_ADDR invalid: {}", e)))?;
        let mut server = Self::new(&config.token, addr, dispatcher);
        if let (Some(cert), Some(key)) = (&config.webhook_cert, &config.webhook_key) {
            server = server.tls(cert.clone(), key.clone());
        }
        if let Some(secret) = &config.webhook_secret_token {
            server = server.secret_token(secret.clone());
        }
        Ok(server)
    }

    /// Enables the push-header check.
    pub fn secret_token(mut self, secret: impl Into<String>) -> Self {
        let secret = secret.into();
        self.state = Arc::new(WebhookState {
            dispatcher: Arc::clone(&self.state.dispatcher),
            secret_token: Some(secret),
        });
        self
    }

    /// Serves over TLS with a caller-supplied PEM certificate and key.
    pub fn tls(mut self, cert: PathBuf, key: PathBuf) -> Self {
        self.tls = Some((cert, key));
        self
    }

    /// The secret-derived route path updates must be pushed to.
    pub fn path(&self) -> &str {
        &self.path
    }

    fn router(&self) -> Router {
        Router::new()
            .route(&self.path, post(receive_update))
            .with_state(Arc::clone(&self.state))
    }

    /// Binds and serves until the shutdown signal flips. TLS when a
    /// cert/key pair was supplied, plain TCP otherwise (an explicit choice
    /// for deployments behind a terminating proxy).
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let app = self.router();
        info!(addr = %self.addr, path = %self.path, tls = self.tls.is_some(), "Webhook server starting");

        match self.tls {
            Some((cert, key)) => {
                let tls_config = RustlsConfig::from_pem_file(&cert, &key)
                    .await
                    .map_err(|e| Error::Config(format!("failed to load TLS pair: {}", e)))?;
                let handle = axum_server::Handle::new();
                let watcher = handle.clone();
                tokio::spawn(async move {
                    while shutdown.changed().await.is_ok() {
                        if *shutdown.borrow() {
                            watcher.graceful_shutdown(Some(Duration::from_secs(5)));
                            break;
                        }
                    }
                });
                axum_server::bind_rustls(self.addr, tls_config)
                    .handle(handle)
                    .serve(app.into_make_service())
                    .await
                    .map_err(Error::Io)?;
            }
            None => {
                let listener = tokio::net::TcpListener::bind(self.addr).await?;
                axum::serve(listener, app)
                    .with_graceful_shutdown(async move {
                        while shutdown.changed().await.is_ok() {
                            if *shutdown.borrow() {
                                break;
                            }
                        }
                    })
                    .await
                    .map_err(Error::Io)?;
            }
        }

        info!("Webhook server stopped");
        Ok(())
    }
}

/// One pushed update per request. Decode failures are surfaced to the
/// generic handler and acknowledged with 200 so the platform does not
/// redeliver an undecodable payload.
async fn receive_update(
    State(state): State<Arc<WebhookState>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    if let Some(expected) = &state.secret_token {
        let presented = headers
            .get(SECRET_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok());
        if presented != Some(expected.as_str()) {
            warn!("Webhook request rejected: secret token mismatch");
            return StatusCode::UNAUTHORIZED;
        }
    }

    match serde_json::from_slice::<botwire_core::Update>(&body) {
        Ok(update) => state.dispatcher.dispatch(update),
        Err(err) => {
            warn!(error = %err, "Webhook body failed to decode");
            state
                .dispatcher
                .dispatch_error(Error::Decode(format!("webhook update decode failed: {}", err)));
        }
    }
    StatusCode::OK
}
