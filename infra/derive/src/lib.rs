#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by every Folio crate.
//!
//! * [`macro@folio_error`] turns a plain enum into a `thiserror` error with context support.
//! * [`macro@folio_slice`] turns a struct into a cheaply clonable feature slice handle.
//!
//! Examples are `ignore`d here because a proc-macro crate cannot use its own macros;
//! the consuming crates exercise them in their tests.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemStruct, parse_macro_input};

/// Defines a domain error enum.
///
/// # Injected items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * A companion `<Name>Ext<T>` trait with `.context(...)` for `Result<T, Name>` and for
///   `Result<T, Source>` of every variant carrying a `source` field.
/// * `From<Source>` for each of those variants so `?` works on upstream errors.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A module-private `format_context` helper used inside `#[error(...)]` strings.
///
/// # Requirements
///
/// Variants must use named fields. A variant with a `source` field (or a field marked
/// `#[source]`) must also carry `context: Option<Cow<'static, str>>` and nothing else.
/// `#[from]` is rejected: the `From` impl is generated.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[folio_derive::folio_error]
/// pub enum StoreError {
///     #[error("Seed I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal store error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read_seed(path: &Path) -> Result<String, StoreError> {
///     std::fs::read_to_string(path).context("Reading seed file")
/// }
/// ```
#[proc_macro_attribute]
pub fn folio_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}

/// Defines a feature slice handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` wraps it in an `Arc`, derefs to it
/// and implements `FeatureSlice` so it can be registered with the kernel.
///
/// # Example
/// ```rust,ignore
/// #[folio_derive::folio_slice]
/// pub struct Portfolio {
///     pub store: SharedStore,
/// }
///
/// let slice = Portfolio::new(PortfolioInner { store });
/// ```
#[proc_macro_attribute]
pub fn folio_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::slice::expand(input).into()
}
