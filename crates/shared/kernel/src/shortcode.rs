//! Placement directives (`[name key="value"]`) that templates embed to pull in
//! rendered markup.

use folio_store::ContentFilter;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info};

/// Attributes passed to a shortcode handler.
pub type Attributes = BTreeMap<String, String>;

type Handler = Arc<dyn Fn(&Attributes) -> String + Send + Sync>;

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("shortcode name pattern"));
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\[([A-Za-z0-9_-]+)((?:\s+[A-Za-z0-9_-]+="[^"]*")*)\s*/?\]"#)
        .expect("shortcode token pattern")
});
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z0-9_-]+)="([^"]*)""#).expect("shortcode attribute pattern")
});

#[folio_derive::folio_error]
pub enum ShortcodeError {
    #[error("Invalid shortcode name{}: {message}", format_context(.context))]
    InvalidName { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Shortcode already registered{}: {message}", format_context(.context))]
    Duplicate { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Unknown shortcode{}: {message}", format_context(.context))]
    Unknown { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Named placement directives and their handlers.
#[derive(Default)]
pub struct ShortcodeRegistry {
    handlers: BTreeMap<String, Handler>,
}

impl fmt::Debug for ShortcodeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcodeRegistry").field("names", &self.handlers.keys()).finish()
    }
}

impl ShortcodeRegistry {
    /// # Errors
    /// [`ShortcodeError::InvalidName`] for names outside `[A-Za-z0-9_-]+`,
    /// [`ShortcodeError::Duplicate`] if `name` is taken.
    pub fn register<F>(&mut self, name: &str, handler: F) -> Result<(), ShortcodeError>
    where
        F: Fn(&Attributes) -> String + Send + Sync + 'static,
    {
        if !NAME.is_match(name) {
            return Err(ShortcodeError::InvalidName {
                message: format!("'{name}' must match [A-Za-z0-9_-]+").into(),
                context: None,
            });
        }
        if self.handlers.contains_key(name) {
            return Err(ShortcodeError::Duplicate { message: name.to_owned().into(), context: None });
        }

        info!(shortcode = name, "Shortcode registered");
        self.handlers.insert(name.to_owned(), Arc::new(handler));
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Invokes a single shortcode.
    ///
    /// # Errors
    /// [`ShortcodeError::Unknown`] if nothing is registered under `name`.
    pub fn render(&self, name: &str, attributes: &Attributes) -> Result<String, ShortcodeError> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| ShortcodeError::Unknown { message: name.to_owned().into(), context: None })?;
        debug!(shortcode = name, "Rendering shortcode");
        Ok(handler(attributes))
    }

    /// Replaces every known shortcode token in `text` with its output.
    ///
    /// Expansion is a single pass: handler output is not scanned again, and unknown
    /// tokens are left as written.
    #[must_use]
    pub fn expand<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.handlers.is_empty() {
            return Cow::Borrowed(text);
        }
        TOKEN.replace_all(text, |caps: &Captures<'_>| {
            let Some(handler) = self.handlers.get(&caps[1]) else {
                return caps[0].to_owned();
            };
            handler(&parse_attributes(caps.get(2).map_or("", |m| m.as_str())))
        })
    }
}

fn parse_attributes(raw: &str) -> Attributes {
    ATTRIBUTE
        .captures_iter(raw)
        .map(|caps| (caps[1].to_owned(), caps[2].to_owned()))
        .collect()
}

/// Content filter that expands shortcodes embedded in record bodies.
#[derive(Debug, Clone)]
pub struct ShortcodeFilter(pub Arc<ShortcodeRegistry>);

impl ContentFilter for ShortcodeFilter {
    fn name(&self) -> &'static str {
        "shortcodes"
    }

    fn apply(&self, text: &str) -> String {
        self.0.expand(text).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ShortcodeRegistry {
        let mut registry = ShortcodeRegistry::default();
        registry.register("year", |_| "2024".to_owned()).unwrap();
        registry
            .register("greet", |attrs| {
                format!("Hello, {}!", attrs.get("name").map_or("stranger", String::as_str))
            })
            .unwrap();
        registry.register("nested", |_| "[year]".to_owned()).unwrap();
        registry
    }

    #[test]
    fn expands_known_tokens_with_attributes() {
        let registry = registry();
        assert_eq!(registry.expand("(c) [year]"), "(c) 2024");
        assert_eq!(registry.expand(r#"[greet name="Ada"] [greet]"#), "Hello, Ada! Hello, stranger!");
    }

    #[test]
    fn leaves_unknown_tokens_and_output_alone() {
        let registry = registry();
        assert_eq!(registry.expand("[missing] [year]"), "[missing] 2024");
        assert_eq!(registry.expand("[nested]"), "[year]");
    }

    #[test]
    fn rejects_duplicates_and_bad_names() {
        let mut registry = registry();
        assert!(matches!(registry.register("year", |_| String::new()), Err(ShortcodeError::Duplicate { .. })));
        assert!(matches!(registry.register("bad name", |_| String::new()), Err(ShortcodeError::InvalidName { .. })));
        assert!(matches!(registry.render("missing", &Attributes::new()), Err(ShortcodeError::Unknown { .. })));
    }

    #[test]
    fn filter_expands_bodies() {
        let filter = ShortcodeFilter(Arc::new(registry()));
        assert_eq!(filter.name(), "shortcodes");
        assert_eq!(filter.apply("<p>[year]</p>"), "<p>2024</p>");
    }
}
