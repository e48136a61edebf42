use folio_derive::folio_error;
use std::borrow::Cow;

#[folio_error]
pub enum DemoError {
    #[error("Seed I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Invalid record{}: {message}", format_context(.context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read_missing() -> Result<String, DemoError> {
    std::fs::read_to_string("/definitely/not/here").context("Reading seed")
}

fn validate(title: &str) -> Result<(), DemoError> {
    if title.is_empty() {
        return Err("empty title".into());
    }
    Err(DemoError::Invalid { message: title.to_owned().into(), context: None })
}

fn main() {
    let err = read_missing().unwrap_err();
    assert!(err.to_string().starts_with("Seed I/O error (Reading seed): "));

    let err = validate("").unwrap_err();
    assert_eq!(err.to_string(), "Internal error: empty title");

    let err = validate("x").context("while importing").unwrap_err();
    assert_eq!(err.to_string(), "Invalid record (while importing): x");
}
