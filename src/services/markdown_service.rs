use std::sync::LazyLock;
use pulldown_cmark::{html, Options, Parser};
use regex::{Captures, Regex};

use crate::services::page_store::slugify;

/// `[[Page Title]]`, limited to the characters a slug can carry
static WIKI_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[([-a-zA-Z0-9 ]+)\]\]").expect("wiki link pattern is valid")
});

/// Markdown rendering followed by wiki link substitution
#[derive(Clone, Copy, Default)]
pub struct MarkdownService;

impl MarkdownService {
    pub fn new() -> Self {
        Self
    }

    /// Render stored markup to HTML
    pub fn render(&self, raw: &str) -> String {
        let html = self.markdown_to_html(raw);
        self.convert_wiki_links(&html)
    }

    fn markdown_to_html(&self, raw: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_FOOTNOTES);

        let mut out = String::with_capacity(raw.len() * 3 / 2);
        html::push_html(&mut out, Parser::new_ext(raw, options));
        out
    }

    /// Rewrite every `[[Title]]` into a link to that page's view
    pub fn convert_wiki_links(&self, text: &str) -> String {
        WIKI_LINK
            .replace_all(text, |caps: &Captures| {
                let title = &caps[1];
                format!("<a href=\"/view/{}\">{}</a>", slugify(title), title)
            })
            .into_owned()
    }
}
