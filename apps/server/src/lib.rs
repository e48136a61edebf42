//! # Folio Server
//!
//! Serves the portfolio site over HTTP with `Axum`: archive listing, placement
//! directives, the REST payload and the admin listing.
//!
//! ## Example
//! ```no_run
//! use folio_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder().port(4680).build()?.run().await
//! }
//! ```

pub mod router;

use anyhow::{Context, Result};
use axum_server::Handle;
use folio::domain::config::FolioConfig;
use folio::kernel::server::ApiState;
use folio::kernel::shortcode::ShortcodeFilter;
use folio::store::{MemoryStore, ParagraphFilter, SharedStore};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// A fluent builder for configuring and initializing the [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: FolioConfig,
    store: Option<SharedStore>,
}

impl ServerBuilder {
    /// Set up the server's configuration.
    pub fn config(mut self, cfg: FolioConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    /// Serves from an existing store instead of seeding a fresh in-memory one.
    pub fn store(mut self, store: SharedStore) -> Self {
        self.store = Some(store);
        self
    }

    fn init_store(&self) -> Result<SharedStore> {
        let store = content_store(&self.cfg)?;

        if let Some(seed) = &self.cfg.store.seed {
            store
                .load_seed(seed)
                .with_context(|| format!("Failed to seed the store from {}", seed.display()))?;
        }

        Ok(Arc::new(store))
    }

    /// Consumes the builder and initializes the server.
    ///
    /// # Process
    /// 1. Opens (or seeds) the entity store
    /// 2. Registers content types, field groups and placement directives
    /// 3. Constructs application state
    ///
    /// # Errors
    /// Returns an error if the seed file cannot be loaded or start-up registration
    /// hits a conflicting configuration.
    pub fn build(self) -> Result<Server> {
        let address = SocketAddr::new(self.cfg.server.address, self.cfg.server.port);
        info!(address = %address, "Initializing server");

        let store = match self.store.clone() {
            Some(store) => store,
            None => self.init_store()?,
        };

        let site = folio::init(&self.cfg, store).context("Site bootstrap failed")?;
        let state = site.into_state().context("Failed to finalize API state registry")?;

        Ok(Server { state })
    }
}

/// An empty store whose body filter chain expands the configured snippets, then
/// wraps paragraphs.
///
/// # Errors
/// Returns an error if a configured snippet name is not a valid shortcode name.
pub fn content_store(cfg: &FolioConfig) -> Result<MemoryStore> {
    let snippets = folio::body_shortcodes(cfg).context("Invalid content snippets")?;

    Ok(MemoryStore::new()
        .with_filter(ShortcodeFilter(Arc::new(snippets)))
        .with_filter(ParagraphFilter))
}

/// A fully initialized server instance ready to run.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    /// Returns a new [`ServerBuilder`] to configure the server.
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// Starts the server and runs until the shutdown signal is received.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the configured address.
    pub async fn run(self) -> Result<()> {
        let cfg = self.state.config.clone();
        let address = SocketAddr::new(cfg.server.address, cfg.server.port);

        let app = router::init(self.state);

        let handle = Handle::<SocketAddr>::new();
        let shutdown_handle = handle.clone();

        tokio::spawn(async move {
            if let Err(e) = shutdown_signal().await {
                error!("Error while waiting for shutdown signal: {e}");
                return;
            }
            info!("Shutdown signal received, starting graceful shutdown...");
            shutdown_handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        });

        info!("Starting HTTP server on http://{address}");
        axum_server::bind(address)
            .handle(handle)
            .serve(app.into_make_service())
            .await
            .context("HTTP server failed")?;

        info!("Server shutdown complete");
        Ok(())
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }
}

/// Listens for shutdown signals (Ctrl+C, SIGTERM).
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => {
            res.context("Ctrl+C signal received")?;
        },
        res = terminate => {
            res.context("SIGTERM signal received")?;
        },
    }

    Ok(())
}
