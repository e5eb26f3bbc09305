//! Markdown rich-text engine built on `pulldown-cmark`.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};
use url::Url;

use super::{AugmentOptions, Augmentor, RichTextEngine};
use crate::entry::FieldValue;

/// Rich-text engine for fields that store markdown.
///
/// The augmentation stage can rewrite relative image sources to absolute
/// URLs against a configured asset base, so embedded asset references
/// resolve the same way regardless of where the content is displayed.
pub struct MarkdownEngine {
    asset_base: Option<Url>,
}

impl MarkdownEngine {
    /// Create an engine with no asset base; image sources pass through.
    pub fn new() -> Self {
        Self { asset_base: None }
    }

    /// Create an engine resolving relative image sources against `base`.
    pub fn with_asset_base(base: Url) -> Self {
        Self {
            asset_base: Some(base),
        }
    }

    fn parser_options() -> Options {
        Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES
    }

    /// Resolve a relative asset reference against the configured base.
    /// Returns `None` when the reference should be left as written.
    fn resolve_asset_url(&self, dest: &str) -> Option<String> {
        let base = self.asset_base.as_ref()?;
        if dest.contains("://") || dest.starts_with("//") || dest.starts_with('#') {
            return None;
        }
        base.join(dest).ok().map(|url| url.to_string())
    }

    fn render(&self, content: &str, resolve_asset_urls: bool) -> String {
        let events = Parser::new_ext(content, Self::parser_options()).map(|event| match event {
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) if resolve_asset_urls => {
                let dest_url = match self.resolve_asset_url(&dest_url) {
                    Some(absolute) => CowStr::from(absolute),
                    None => dest_url,
                };
                Event::Start(Tag::Image {
                    link_type,
                    dest_url,
                    title,
                    id,
                })
            }
            other => other,
        });

        let mut out = String::new();
        html::push_html(&mut out, events);
        out
    }
}

impl Default for MarkdownEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RichTextEngine for MarkdownEngine {
    fn pre_process(&self, raw: &str) -> String {
        // Stored content may carry platform line endings.
        raw.replace("\r\n", "\n").replace('\r', "\n")
    }

    fn augmentor(&self, options: AugmentOptions) -> Box<dyn Augmentor + '_> {
        Box::new(MarkdownAugmentor {
            engine: self,
            resolve_asset_urls: options.resolve_asset_urls,
        })
    }

    fn to_html(&self, value: &FieldValue) -> String {
        self.render(value.raw(), false)
    }
}

/// Augmentor borrowing the engine for the duration of one render call.
struct MarkdownAugmentor<'a> {
    engine: &'a MarkdownEngine,
    resolve_asset_urls: bool,
}

impl Augmentor for MarkdownAugmentor<'_> {
    fn augment(&self, content: &str) -> String {
        self.engine.render(content, self.resolve_asset_urls)
    }
}
