use std::sync::LazyLock;

use regex::Regex;

use crate::text::StopWords;

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4}\b").expect("year pattern is a valid regex"));

/// One project block split into the parts compared by the composite score.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectBlock {
    /// First non-empty line, year tokens removed.
    pub title: String,
    /// Remaining lines joined by spaces, years removed, then distilled.
    pub body: String,
}

impl ProjectBlock {
    pub fn parse(text: &str, stopwords: &StopWords, min_body_token_len: usize) -> Self {
        let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
        let title = lines.next().map(strip_years).unwrap_or_default();
        let rest = strip_years(&lines.collect::<Vec<_>>().join(" "));
        Self {
            title,
            body: stopwords.distill(&rest, min_body_token_len),
        }
    }

    pub fn parts(&self) -> [&str; 2] {
        [&self.title, &self.body]
    }
}

/// Removes standalone four-digit numbers (graduation or project years) so
/// "Chess Bot 2022" and "Chess Bot 2023" compare as equal.
pub fn strip_years(text: &str) -> String {
    YEAR.replace_all(text, "").trim().to_string()
}
