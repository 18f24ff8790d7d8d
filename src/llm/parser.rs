//! Section parsing of free-text completion responses
//!
//! The completion service is asked for a fixed number of blank-line-separated
//! sections, but nothing enforces that shape on the model side. Parsing is
//! positional and lenient: absent sections fall back to type-appropriate
//! defaults, and a response with no usable content at all is reported as
//! `Unparseable` with the raw text so callers can distinguish "field absent"
//! from "parse failed".

/// Outcome of parsing a free-text service response.
#[derive(Debug, Clone)]
pub enum ParseOutcome<T> {
    Parsed(T),
    Unparseable { raw: String, reason: String },
}

impl<T> ParseOutcome<T> {
    pub fn parsed(self) -> Option<T> {
        match self {
            ParseOutcome::Parsed(value) => Some(value),
            ParseOutcome::Unparseable { .. } => None,
        }
    }
}

/// Split a response on blank-line boundaries into ordered sections.
pub fn sections(raw: &str) -> Vec<&str> {
    raw.split("\n\n").collect()
}

/// Section accessor: absent indexes read as empty.
pub fn section<'a>(sections: &[&'a str], index: usize) -> &'a str {
    sections.get(index).copied().unwrap_or("")
}

/// Strip a literal leading label such as `Summary:` and trim the remainder.
pub fn strip_label<'a>(text: &'a str, label: &str) -> &'a str {
    let trimmed = text.trim();
    trimmed.strip_prefix(label).unwrap_or(trimmed).trim()
}

/// Comma-separated list: trim each element, drop empties.
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Hyphen-bulleted list: trim each element, drop empties.
pub fn split_bullets(text: &str) -> Vec<String> {
    text.split('-')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse an integer score, defaulting to 0 when absent or malformed.
pub fn parse_score(text: &str) -> u8 {
    text.trim().parse().unwrap_or(0)
}
