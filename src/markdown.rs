//! Renders backend advice (markdown) to HTML.
//!
//! The advice text comes from a remote service and is untrusted: raw HTML
//! embedded in it is downgraded to plain text before the output is injected
//! into the page.

use pulldown_cmark::{html::push_html, Event, Options, Parser};

fn options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

pub fn render_advice(text: &str) -> String {
    let parser = Parser::new_ext(text, options());
    let events = parser.map(|event| match event {
        // Text events are HTML-escaped by push_html, Html events are not.
        Event::Html(raw) => Event::Text(raw),
        Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::new();
    push_html(&mut out, events);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emphasis_renders_as_strong() {
        let html = render_advice("**bold**");
        assert!(html.contains("<strong>bold</strong>"), "got: {html}");
    }

    #[test]
    fn headings_and_lists_render() {
        let html = render_advice("## Personalized Financial Advice\n* cut dining out\n* save 20%");
        assert!(html.contains("<h2>Personalized Financial Advice</h2>"));
        assert!(html.contains("<li>cut dining out</li>"));
    }

    #[test]
    fn raw_html_is_escaped() {
        let html = render_advice("before <script>alert(1)</script> after");
        assert!(!html.contains("<script>"), "got: {html}");
        assert!(html.contains("&lt;script&gt;"), "got: {html}");
    }

    #[test]
    fn block_html_is_escaped() {
        let html = render_advice("<div onclick=\"x()\">hi</div>");
        assert!(!html.contains("<div"), "got: {html}");
    }
}
