//! Well-known identifiers shared between the kernel, features and the HTTP surface.

/// Record type key of portfolio entries.
pub const PORTFOLIO: &str = "portfolio";

/// Placement directive rendering the portfolio listing.
pub const PORTFOLIO_ITEMS: &str = "portfolio_items";

/// Field group attached to portfolio records.
pub const PORTFOLIO_FIELD_GROUP: &str = "group_portfolio_fields";

pub const CLIENT_NAME: &str = "client_name";
pub const PROJECT_URL: &str = "project_url";
pub const COMPLETED_DATE: &str = "completed_date";
pub const GALLERY: &str = "gallery";
pub const TECHNOLOGIES_USED: &str = "technologies_used";

/// Image rendition names understood by [`crate::record::Attachment::size_url`].
pub const SIZE_THUMBNAIL: &str = "thumbnail";
pub const SIZE_MEDIUM: &str = "medium";

/// Location rule parameter matching on record type.
pub const POST_TYPE_PARAM: &str = "post_type";
