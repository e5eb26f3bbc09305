//! Display-text sanitization for augmented field content.
//!
//! Collapses the whitespace noise that template output and rich-text
//! augmentation leave behind, and optionally strips markup down to plain
//! text. This is cosmetic cleanup for previews, summaries, and search
//! indexes, not a security filter; input is trusted CMS output.

use std::sync::LazyLock;

use regex::Regex;

/// Compile a fixed pattern. All patterns below are literals checked by the
/// test suite, so failure is unreachable.
#[allow(clippy::expect_used)]
fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("fixed pattern compiles")
}

// Blank lines, including a leading blank line at the start of the string.
static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| pattern(r"(\A[\r\n]*|[\r\n]+)\s*[\r\n]+"));

// Two or more whitespace characters of any kind.
static EXCESS_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| pattern(r"\s\s+"));

// Adjacent tags, with or without whitespace between them.
static TAG_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| pattern(r">[\s+]?<"));

// A single well-formed anchor with an href attribute.
static ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| pattern(r#"<a[^>]+href="([^"]+)"[^>]*>(.*?)</a>"#));

// A word enclosed directly between an opening and a closing tag.
static TAG_ENCLOSED_WORD: LazyLock<Regex> = LazyLock::new(|| pattern(r">(\w+)</"));

// Any HTML/XML tag.
static TAG: LazyLock<Regex> = LazyLock::new(|| pattern(r"<[^>]*>"));

// A fullstop fused to the following word by tag removal.
static FUSED_FULLSTOP: LazyLock<Regex> = LazyLock::new(|| pattern(r"(\w)\.(\w+)\s"));

/// Normalize augmented HTML into a display-ready string.
///
/// With `keep_tags` false the markup is stripped entirely, leaving only
/// text content; with `link_targets` true, anchor targets are inlined as
/// `label (url)` before the tags go.
///
/// The steps run in a fixed order; later steps rely on earlier ones having
/// already collapsed the input onto a single line. Empty input passes
/// through every step untouched and comes out as `""`. Tag and anchor
/// matching is best-effort: malformed markup is left alone rather than
/// rejected, so the worst outcome is a partially-normalized string.
pub fn sanitize(html: &str, keep_tags: bool, link_targets: bool) -> String {
    // Remove blank lines, then collapse everything onto one line.
    let content = BLANK_LINES.replace_all(html, "");
    let content = content.replace('\n', "");
    let content = EXCESS_WHITESPACE.replace_all(&content, " ");
    let content = content.trim();

    // Separate adjacent tags so words cannot collide once tags vanish.
    let mut content = TAG_BOUNDARY.replace_all(content, "> <").into_owned();

    if !keep_tags {
        if link_targets {
            // Must run while the href attribute is still present.
            content = ANCHOR.replace_all(&content, "${2} (${1})").into_owned();
        }

        content = TAG_ENCLOSED_WORD
            .replace_all(&content, "/> ${1} <")
            .into_owned();
        content = TAG.replace_all(&content, "").into_owned();
    }

    // Re-space sentence boundaries that tag removal fused together.
    let content = FUSED_FULLSTOP.replace_all(&content, "${1}. ${2} ");

    // Tag removal leaves stray spaces behind; tidy them up.
    let content = EXCESS_WHITESPACE.replace_all(&content, " ");
    content.trim().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(sanitize("", false, false), "");
        assert_eq!(sanitize("", true, false), "");
        assert_eq!(sanitize("", false, true), "");
        assert_eq!(sanitize("", true, true), "");
    }

    #[test]
    fn strips_simple_paragraph() {
        assert_eq!(sanitize("<p>Hello</p>", false, false), "Hello");
    }

    #[test]
    fn keeps_tags_when_requested() {
        assert_eq!(sanitize("<p>Hello</p>", true, false), "<p>Hello</p>");
    }

    #[test]
    fn collapses_blank_lines_and_adjacent_tags() {
        assert_eq!(sanitize("<p>A</p>\n\n<p>B</p>", false, false), "A B");
    }

    #[test]
    fn removes_leading_blank_line() {
        assert_eq!(sanitize("\n\n<p>Text</p>", false, false), "Text");
        assert_eq!(sanitize("  \n<p>Text</p>", false, false), "Text");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(
            sanitize("<p>Some    spaced\t\tout   words</p>", false, false),
            "Some spaced out words"
        );
    }

    #[test]
    fn whitespace_collapse_is_idempotent() {
        let once = sanitize("a  b\n\nc", true, false);
        let twice = sanitize(&once, true, false);
        assert_eq!(once, twice);
    }

    #[test]
    fn inlines_link_targets() {
        assert_eq!(
            sanitize(
                "<p><a href=\"https://x.test\">Click</a></p>",
                false,
                true
            ),
            "Click (https://x.test)"
        );
    }

    #[test]
    fn link_targets_off_strips_anchor_to_label() {
        assert_eq!(
            sanitize(
                "<p><a href=\"https://x.test\">Click</a></p>",
                false,
                false
            ),
            "Click"
        );
    }

    #[test]
    fn link_targets_with_extra_attributes() {
        assert_eq!(
            sanitize(
                "<a class=\"btn\" href=\"/go\" rel=\"nofollow\">Go now</a>",
                false,
                true
            ),
            "Go now (/go)"
        );
    }

    #[test]
    fn malformed_anchor_without_href_is_best_effort() {
        // No href: the anchor rewrite cannot match, the tags are simply
        // stripped like any other markup.
        assert_eq!(sanitize("<a>Click</a>", false, true), "Click");
    }

    #[test]
    fn respaces_fused_fullstop() {
        assert_eq!(
            sanitize("foo end.Next bar", false, false),
            "foo end. Next bar"
        );
    }

    #[test]
    fn fullstop_fused_by_tag_removal() {
        assert_eq!(
            sanitize("Alpha.<br>Beta more", false, false),
            "Alpha. Beta more"
        );
    }

    #[test]
    fn fullstop_without_trailing_space_untouched() {
        assert_eq!(sanitize("v1.2", false, false), "v1.2");
    }

    #[test]
    fn fullstop_respace_applies_in_tag_mode_too() {
        assert_eq!(
            sanitize("end.Next words", true, false),
            "end. Next words"
        );
    }

    #[test]
    fn nested_markup_keeps_word_separation() {
        assert_eq!(
            sanitize("<ul><li>One</li><li>Two</li></ul>", false, false),
            "One Two"
        );
    }

    #[test]
    fn unclosed_angle_bracket_passes_through() {
        // No closing `>` anywhere, so the tag pattern cannot match.
        assert_eq!(sanitize("a < b", false, false), "a < b");
    }

    #[test]
    fn bracketed_run_is_treated_as_a_tag() {
        // Anything between `<` and `>` counts as markup, matching the
        // behavior of conventional tag strippers.
        assert_eq!(sanitize("1 < 2 and 3 > 2", false, false), "1 2");
    }

    #[test]
    fn crlf_input_collapses() {
        assert_eq!(sanitize("<p>A</p>\r\n\r\n<p>B</p>", false, false), "A B");
    }

    #[test]
    fn tag_mode_normalizes_tag_gaps() {
        assert_eq!(
            sanitize("<p>A</p>\n\n<p>B</p>", true, false),
            "<p>A</p> <p>B</p>"
        );
    }
}
