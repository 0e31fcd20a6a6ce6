use regex::RegexBuilder;

/// A run of text, marked when it matched the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: false,
        }
    }

    fn marked(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: true,
        }
    }
}

/// Splits field text into plain and highlighted runs against the original
/// search query (not the filter text).
///
/// The query is taken literally (regex metacharacters escaped) and matched
/// case-insensitively, leftmost non-overlapping. An empty or whitespace-only
/// query highlights nothing.
pub struct Highlighter {
    pattern: Option<regex::Regex>,
}

impl Highlighter {
    pub fn new(query: &str) -> Self {
        let trimmed = query.trim();
        let pattern = if trimmed.is_empty() {
            None
        } else {
            RegexBuilder::new(&regex::escape(trimmed))
                .case_insensitive(true)
                .build()
                .ok()
        };
        Self { pattern }
    }

    /// Split `text` into segments. Concatenating the segment texts always
    /// reproduces `text` unchanged.
    pub fn split(&self, text: &str) -> Vec<Segment> {
        let Some(re) = &self.pattern else {
            return vec![Segment::plain(text)];
        };

        let mut segments = Vec::new();
        let mut last = 0;
        for m in re.find_iter(text) {
            if m.start() > last {
                segments.push(Segment::plain(&text[last..m.start()]));
            }
            segments.push(Segment::marked(m.as_str()));
            last = m.end();
        }
        if last < text.len() || segments.is_empty() {
            segments.push(Segment::plain(&text[last..]));
        }
        segments
    }
}
