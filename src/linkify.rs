use regex::Regex;
use std::sync::OnceLock;

/// A piece of message text, split so the renderer can style bare URLs as
/// links. Segments are rendered as literal spans; message content is never
/// interpreted as markup, so responder-controlled text cannot inject
/// styling or control sequences through this path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Link(String),
}

fn url_pattern() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    // Same shape the annisa.org widget used: scheme followed by a
    // non-whitespace run. Trailing punctuation stays inside the URL.
    URL.get_or_init(|| Regex::new(r"https?://\S+").expect("url pattern is valid"))
}

/// Split `text` into plain and link segments. Text without URLs comes back
/// as a single `Text` segment, unchanged.
pub fn linkify(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for m in url_pattern().find_iter(text) {
        if m.start() > last {
            segments.push(Segment::Text(text[last..m.start()].to_string()));
        }
        segments.push(Segment::Link(m.as_str().to_string()));
        last = m.end();
    }

    if last < text.len() || text.is_empty() {
        segments.push(Segment::Text(text[last..].to_string()));
    }

    segments
}
