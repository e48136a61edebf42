//! Kernel utilities shared across slices.
//!
//! This is the host side of the extension API: features register content types,
//! declare field groups and wire placement directives through the registries here,
//! and escape everything they emit with [`html`].
//!
//! ## Escaping
//! ```rust
//! use folio_kernel::html::{escape_html, escape_url};
//!
//! assert_eq!(escape_html("Acme <Corp>"), "Acme &lt;Corp&gt;");
//! assert_eq!(escape_url("javascript:alert(1)"), "");
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use folio_kernel::config::load_config;
//! let cfg: folio_kernel::domain::config::FolioConfig = load_config(Some("server")).unwrap();
//! ```
pub mod config;
pub mod fields;
pub mod html;
#[cfg(feature = "server")]
pub mod server;
pub mod shortcode;
pub mod types;

pub use folio_domain as domain;
pub use folio_store as store;

pub mod prelude {
    pub use crate::fields::{
        Declaration, FieldDeclaration, FieldError, FieldGroup, FieldReader, FieldRegistry,
        FieldType, Location, declare_field_group,
    };
    pub use crate::html::{escape_attr, escape_html, escape_url};
    #[cfg(feature = "server")]
    pub use crate::server::{ApiState, ApiStateError};
    pub use crate::shortcode::{Attributes, ShortcodeError, ShortcodeFilter, ShortcodeRegistry};
    pub use crate::types::{
        ContentType, ContentTypeRegistry, Registration, Supports, TypeConfig, TypeError,
        TypeLabels,
    };
}
