//! Content filters run over record bodies before display.

use std::fmt::Debug;

/// One pass of the content filter chain.
pub trait ContentFilter: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, content: &str) -> String;
}

const BLOCK_TAGS: &[&str] = &[
    "address", "blockquote", "div", "dl", "figure", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "hr", "ol", "p", "pre", "section", "table", "ul",
];

/// Wraps blank-line separated text blocks in `<p>` and turns single newlines into `<br />`.
///
/// Blocks that already open with block-level markup are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParagraphFilter;

impl ContentFilter for ParagraphFilter {
    fn name(&self) -> &'static str {
        "paragraphs"
    }

    fn apply(&self, content: &str) -> String {
        let normalized = content.replace("\r\n", "\n");
        let mut blocks = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for line in normalized.lines() {
            if line.trim().is_empty() {
                if !current.is_empty() {
                    blocks.push(wrap_block(&current));
                    current.clear();
                }
            } else {
                current.push(line.trim_end());
            }
        }
        if !current.is_empty() {
            blocks.push(wrap_block(&current));
        }

        blocks.join("\n")
    }
}

fn wrap_block(lines: &[&str]) -> String {
    let first = lines.first().map_or("", |line| line.trim_start());
    if opens_block(first) {
        return lines.join("\n");
    }
    format!("<p>{}</p>", lines.iter().map(|l| l.trim()).collect::<Vec<_>>().join("<br />\n"))
}

fn opens_block(line: &str) -> bool {
    let Some(rest) = line.strip_prefix('<') else { return false };
    let name: String = rest
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    BLOCK_TAGS.contains(&name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_text_blocks() {
        let out = ParagraphFilter.apply("First line\nsecond line\n\nNext block");
        assert_eq!(out, "<p>First line<br />\nsecond line</p>\n<p>Next block</p>");
    }

    #[test]
    fn leaves_block_markup_alone() {
        let out = ParagraphFilter.apply("<ul>\n<li>a</li>\n</ul>\n\ntext");
        assert_eq!(out, "<ul>\n<li>a</li>\n</ul>\n<p>text</p>");
    }

    #[test]
    fn empty_content_stays_empty() {
        assert_eq!(ParagraphFilter.apply("  \n\n "), "");
    }
}
