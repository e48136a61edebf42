//! Facade crate for the folio site.
//! Re-exports domain/kernel primitives and runs process-start initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Build an entity store, then call [`init`] once before serving anything.
//! - With the `server` feature, turn the [`Site`] into an `ApiState` and mount [`server::router`].

pub use folio_domain as domain;
pub use folio_kernel as kernel;
pub use folio_store as store;

use folio_domain::config::FolioConfig;
use folio_domain::registry::InitializedSlice;
use folio_kernel::prelude::*;
use folio_portfolio::{Portfolio, PortfolioError};
use folio_store::SharedStore;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::info;

#[folio_derive::folio_error]
pub enum InitError {
    #[error("Feature initialization failed{}: {source}", format_context(.context))]
    Portfolio { source: PortfolioError, context: Option<Cow<'static, str>> },
    #[error("Body shortcode setup failed{}: {source}", format_context(.context))]
    Shortcode { source: ShortcodeError, context: Option<Cow<'static, str>> },
    #[error("Internal init error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[cfg(feature = "server")]
pub mod server {
    use folio_kernel::server::{ApiState, system_router};

    /// Host routes merged with every enabled feature's routes.
    pub fn router() -> axum::Router<ApiState> {
        system_router().merge(folio_portfolio::portfolio_router())
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use folio_portfolio as portfolio;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        "portfolio",
        #[cfg(feature = "server")]
        "server",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Everything start-up produced. Read-only from here on.
#[derive(Debug)]
pub struct Site {
    pub config: FolioConfig,
    pub store: SharedStore,
    pub types: Arc<ContentTypeRegistry>,
    /// `None` when field management is disabled.
    pub fields: Option<Arc<FieldRegistry>>,
    pub shortcodes: Arc<ShortcodeRegistry>,
    pub portfolio: Portfolio,
}

impl Site {
    /// Slices of every enabled feature.
    #[must_use]
    pub fn slices(&self) -> Vec<InitializedSlice> {
        vec![InitializedSlice::new(self.portfolio.clone())]
    }

    /// Shared state for the HTTP surface.
    ///
    /// # Errors
    /// Returns an error if the state cannot be assembled.
    #[cfg(feature = "server")]
    pub fn into_state(self) -> Result<folio_kernel::server::ApiState, folio_kernel::server::ApiStateError> {
        let slices = self.slices();
        folio_kernel::server::ApiState::builder()
            .config(self.config)
            .store(self.store)
            .types(self.types)
            .fields(self.fields)
            .shortcodes(self.shortcodes)
            .register_slices(slices)
            .build()
    }
}

/// Process-start initialization: register content types, declare field groups,
/// then wire placement directives.
///
/// # Errors
/// Returns an error on conflicting registrations; the process must not serve with
/// ambiguous configuration.
pub fn init(config: &FolioConfig, store: SharedStore) -> Result<Site, InitError> {
    let mut types = ContentTypeRegistry::default();
    features::portfolio::register_type(&mut types)?;

    let mut fields = config.fields.enabled.then(FieldRegistry::default);
    features::portfolio::declare_fields(fields.as_mut())?;
    let fields = fields.map(Arc::new);

    let portfolio = features::portfolio::init(Arc::clone(&store), fields.clone(), config.render.clone());

    let mut shortcodes = ShortcodeRegistry::default();
    features::portfolio::wire(&portfolio, &mut shortcodes)?;

    info!(
        types = types.iter().count(),
        fields = fields.is_some(),
        shortcodes = ?shortcodes.names().collect::<Vec<_>>(),
        "Site initialized"
    );

    Ok(Site {
        config: config.clone(),
        store,
        types: Arc::new(types),
        fields,
        shortcodes: Arc::new(shortcodes),
        portfolio,
    })
}

/// Shortcodes expanded inside record bodies, built from `content.snippets`.
///
/// Kept apart from [`Site::shortcodes`] so a body can never pull in the listing
/// that renders it.
///
/// # Errors
/// Returns an error if a snippet name is not a valid shortcode name.
pub fn body_shortcodes(config: &FolioConfig) -> Result<ShortcodeRegistry, InitError> {
    let mut shortcodes = ShortcodeRegistry::default();
    for (name, markup) in &config.content.snippets {
        let markup = markup.clone();
        shortcodes.register(name, move |_| markup.clone())?;
    }
    Ok(shortcodes)
}
