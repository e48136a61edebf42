//! Context-aware output escaping.
//!
//! Every user-controlled value that reaches markup goes through one of these:
//! [`escape_html`] for text nodes, [`escape_attr`] for attribute values and
//! [`escape_url`] for `href`/`src`.

use std::borrow::Cow;

/// URL schemes allowed through [`escape_url`].
pub const ALLOWED_SCHEMES: &[&str] = &[
    "http", "https", "ftp", "ftps", "mailto", "news", "irc", "gopher", "nntp", "feed", "telnet",
    "mms", "rtsp", "sms", "svn", "tel", "fax", "xmpp", "webcal", "urn",
];

/// Escapes `& < > " '` for an HTML text node.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// Escapes a value placed inside a double-quoted attribute.
pub fn escape_attr(text: &str) -> Cow<'_, str> {
    escape_html(text)
}

/// Sanitizes a URL for output in an attribute or text node.
///
/// Spaces become `%20`, characters outside the URL alphabet are dropped, scheme-less
/// hosts get `http://`, and URLs with a scheme outside [`ALLOWED_SCHEMES`] collapse to an
/// empty string. `&` and `'` are entity-encoded.
pub fn escape_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let cleaned: String = trimmed.replace(' ', "%20").chars().filter(|c| is_url_char(*c)).collect();
    if cleaned.is_empty() {
        return String::new();
    }

    let normalized = match scheme_of(&cleaned) {
        Some(scheme) if ALLOWED_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str()) => cleaned,
        Some(_) => return String::new(),
        None if cleaned.starts_with(['/', '#', '?']) || is_php_file(&cleaned) => cleaned,
        None => format!("http://{cleaned}"),
    };

    normalized.replace('&', "&#038;").replace('\'', "&#039;")
}

fn is_url_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || !c.is_ascii() || "-~+_.?#=!&;,/:%@$|*'()[]".contains(c)
}

/// Scheme if a `:` appears before any path, query or fragment delimiter.
fn scheme_of(url: &str) -> Option<&str> {
    let colon = url.find(':')?;
    let delimiter = url.find(['/', '?', '#']).unwrap_or(url.len());
    (colon < delimiter).then(|| &url[..colon])
}

fn is_php_file(url: &str) -> bool {
    url.split(['?', '#'])
        .next()
        .is_some_and(|path| path.ends_with(".php") && !path.contains('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html(r#"a & "b" <c> 'd'"#), "a &amp; &quot;b&quot; &lt;c&gt; &#039;d&#039;");
        assert!(matches!(escape_html("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn keeps_well_formed_urls() {
        assert_eq!(escape_url("https://acme.test"), "https://acme.test");
        assert_eq!(escape_url("/relative/path?x=1&y=2"), "/relative/path?x=1&#038;y=2");
        assert_eq!(escape_url("mailto:hi@acme.test"), "mailto:hi@acme.test");
    }

    #[test]
    fn repairs_or_rejects_suspicious_urls() {
        assert_eq!(escape_url("acme.test/work"), "http://acme.test/work");
        assert_eq!(escape_url("javascript:alert(1)"), "");
        assert_eq!(escape_url(r#"https://acme.test/"><script>"#), "https://acme.test/script");
        assert_eq!(escape_url("https://acme.test/a b"), "https://acme.test/a%20b");
        assert_eq!(escape_url("   "), "");
    }
}
