use crate::constants::{SIZE_MEDIUM, SIZE_THUMBNAIL};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared across the site.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FolioConfigInner {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub fields: FieldsConfig,
    pub render: RenderConfig,
    pub content: ContentConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct FolioConfig {
    #[serde(flatten, default)]
    inner: Arc<FolioConfigInner>,
}

impl Deref for FolioConfig {
    type Target = FolioConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for FolioConfig {
    fn deref_mut(&mut self) -> &mut FolioConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
}

/// Entity store bootstrap.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON seed file loaded into the in-memory store at startup.
    pub seed: Option<PathBuf>,
}

/// Field-management add-on availability.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FieldsConfig {
    /// `false` models a host without the add-on installed.
    pub enabled: bool,
}

/// Listing markup knobs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub thumbnail_size: String,
    pub gallery_size: String,
    pub empty_message: String,
}

/// Record body filtering.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Static markup expanded wherever `[name]` appears in a record body.
    pub snippets: BTreeMap<String, String>,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 4680 }
    }
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            thumbnail_size: SIZE_MEDIUM.to_owned(),
            gallery_size: SIZE_THUMBNAIL.to_owned(),
            empty_message: "No portfolio items found.".to_owned(),
        }
    }
}
