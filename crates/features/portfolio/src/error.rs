use folio_kernel::fields::FieldError;
use folio_kernel::shortcode::ShortcodeError;
use folio_kernel::types::TypeError;
use std::borrow::Cow;

/// A specialized [`PortfolioError`] enum of this crate.
#[folio_derive::folio_error]
pub enum PortfolioError {
    /// Content type registration failed.
    #[error("Portfolio type error{}: {source}", format_context(.context))]
    Type { source: TypeError, context: Option<Cow<'static, str>> },
    /// Field group declaration failed.
    #[error("Portfolio field error{}: {source}", format_context(.context))]
    Field { source: FieldError, context: Option<Cow<'static, str>> },
    /// Placement directive wiring failed.
    #[error("Portfolio shortcode error{}: {source}", format_context(.context))]
    Shortcode { source: ShortcodeError, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal portfolio error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
