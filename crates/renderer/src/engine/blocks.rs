//! Nested-block engine for JSON block content.
//!
//! Converts a stored array of typed block groups into semantic HTML:
//! paragraph, heading, list, quote, and delimiter groups. Unknown group
//! types are silently skipped.

use serde_json::Value;
use tracing::debug;

use super::NestedBlockEngine;

/// Nested-block engine over Editor.js style block JSON.
///
/// The raw field content is expected to be a JSON array where each entry
/// carries a `"type"` field and a `"data"` object.
pub struct BlockEngine {
    _private: (),
}

impl BlockEngine {
    /// Create a new block engine.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for BlockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl NestedBlockEngine for BlockEngine {
    fn augment(&self, content: &str) -> String {
        let blocks: Vec<Value> = match serde_json::from_str(content) {
            Ok(blocks) => blocks,
            Err(err) => {
                debug!(error = %err, "nested-block content is not a JSON array");
                return String::new();
            }
        };

        let mut html = String::new();
        for block in &blocks {
            let block_type = block.get("type").and_then(|t| t.as_str()).unwrap_or("");
            let data = block.get("data").cloned().unwrap_or_default();
            let rendered = match block_type {
                "paragraph" => render_paragraph(&data),
                "heading" | "header" => render_heading(&data),
                "list" => render_list(&data),
                "quote" => render_quote(&data),
                "delimiter" => render_delimiter(),
                _ => String::new(),
            };
            html.push_str(&rendered);
        }
        html
    }
}

// ---------------------------------------------------------------------------
// Individual block renderers
// ---------------------------------------------------------------------------

/// Data: `{ "text": "..." }`
fn render_paragraph(data: &Value) -> String {
    let text = data.get("text").and_then(|v| v.as_str()).unwrap_or("");
    format!("<p>{}</p>", html_escape(text))
}

/// Data: `{ "text": "...", "level": 2 }`
fn render_heading(data: &Value) -> String {
    let text = data.get("text").and_then(|v| v.as_str()).unwrap_or("");
    let level = data
        .get("level")
        .and_then(|v| v.as_u64())
        .unwrap_or(2)
        .clamp(1, 6);
    format!("<h{level}>{}</h{level}>", html_escape(text))
}

/// Data: `{ "style": "ordered"|"unordered", "items": ["...", ...] }`
fn render_list(data: &Value) -> String {
    let style = data
        .get("style")
        .and_then(|v| v.as_str())
        .unwrap_or("unordered");
    let tag = if style == "ordered" { "ol" } else { "ul" };

    let items = data.get("items").and_then(|v| v.as_array());
    let mut html = format!("<{tag}>");
    if let Some(items) = items {
        for item in items {
            // Items can be plain strings or objects with a "content" field
            let content = item
                .as_str()
                .or_else(|| item.get("content").and_then(|v| v.as_str()))
                .unwrap_or("");
            html.push_str(&format!("<li>{}</li>", html_escape(content)));
        }
    }
    html.push_str(&format!("</{tag}>"));
    html
}

/// Data: `{ "text": "...", "caption": "..." }`
fn render_quote(data: &Value) -> String {
    let text = data.get("text").and_then(|v| v.as_str()).unwrap_or("");
    let caption = data.get("caption").and_then(|v| v.as_str()).unwrap_or("");
    if caption.is_empty() {
        format!("<blockquote><p>{}</p></blockquote>", html_escape(text))
    } else {
        format!(
            "<blockquote><p>{}</p><cite>{}</cite></blockquote>",
            html_escape(text),
            html_escape(caption)
        )
    }
}

fn render_delimiter() -> String {
    "<hr>".to_string()
}

fn html_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn augment(blocks: Value) -> String {
        BlockEngine::new().augment(&blocks.to_string())
    }

    #[test]
    fn paragraph_block() {
        let html = augment(json!([
            { "type": "paragraph", "data": { "text": "Hello, world!" } }
        ]));
        assert_eq!(html, "<p>Hello, world!</p>");
    }

    #[test]
    fn heading_block_with_level() {
        let html = augment(json!([
            { "type": "heading", "data": { "text": "Section", "level": 3 } }
        ]));
        assert_eq!(html, "<h3>Section</h3>");
    }

    #[test]
    fn heading_clamps_out_of_range_level() {
        let html = augment(json!([
            { "type": "header", "data": { "text": "Too deep", "level": 9 } }
        ]));
        assert_eq!(html, "<h6>Too deep</h6>");
    }

    #[test]
    fn ordered_list_block() {
        let html = augment(json!([
            { "type": "list", "data": { "style": "ordered", "items": ["First", "Second"] } }
        ]));
        assert_eq!(html, "<ol><li>First</li><li>Second</li></ol>");
    }

    #[test]
    fn list_defaults_to_unordered() {
        let html = augment(json!([
            { "type": "list", "data": { "items": [{ "content": "Item" }] } }
        ]));
        assert_eq!(html, "<ul><li>Item</li></ul>");
    }

    #[test]
    fn quote_block_with_caption() {
        let html = augment(json!([
            { "type": "quote", "data": { "text": "To be.", "caption": "Someone" } }
        ]));
        assert_eq!(
            html,
            "<blockquote><p>To be.</p><cite>Someone</cite></blockquote>"
        );
    }

    #[test]
    fn quote_block_without_caption() {
        let html = augment(json!([
            { "type": "quote", "data": { "text": "Just a quote." } }
        ]));
        assert_eq!(html, "<blockquote><p>Just a quote.</p></blockquote>");
    }

    #[test]
    fn delimiter_and_multiple_blocks() {
        let html = augment(json!([
            { "type": "heading", "data": { "text": "Title", "level": 1 } },
            { "type": "paragraph", "data": { "text": "Body text." } },
            { "type": "delimiter", "data": {} },
        ]));
        assert_eq!(html, "<h1>Title</h1><p>Body text.</p><hr>");
    }

    #[test]
    fn unknown_block_type_skipped() {
        let html = augment(json!([
            { "type": "widget", "data": { "foo": "bar" } }
        ]));
        assert!(html.is_empty());
    }

    #[test]
    fn invalid_json_yields_empty() {
        assert_eq!(BlockEngine::new().augment("not json"), "");
        assert_eq!(BlockEngine::new().augment("{\"not\": \"an array\"}"), "");
    }

    #[test]
    fn text_content_is_escaped() {
        let html = augment(json!([
            { "type": "paragraph", "data": { "text": "a < b & c" } }
        ]));
        assert_eq!(html, "<p>a &lt; b &amp; c</p>");
    }
}
