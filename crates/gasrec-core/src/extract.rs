//! Station-name extraction from free-text analysis.
//!
//! Best-effort only: the patterns target the report layout the backend's
//! analysis step produces (numbered lists, `name - detail` lines, and
//! markdown ranking tables). Arbitrary prose will yield noise or nothing.

use std::sync::LazyLock;

use regex::Regex;

/// Upper bound on the number of names returned.
pub const MAX_RECOMMENDATIONS: usize = 5;

static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s*(.+?)(?:\s*[-:]\s*|$)").expect("valid numbered regex"));

static DASH_OR_COLON_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*[-:]\s*").expect("valid prefix regex"));

static BEFORE_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*\(").expect("valid paren regex"));

static TABLE_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\|\s*\d+\s*\|\s*(.+?)\s*\|\s*\$").expect("valid table row regex")
});

/// Extract up to [`MAX_RECOMMENDATIONS`] candidate station names, in line order.
///
/// Each line is tried against the patterns in priority order and the first
/// match wins. A capture is kept only if it is longer than two characters
/// after trimming and does not contain `Rank` or `Name` (table headers).
/// `None` or empty text yields an empty list.
#[must_use]
pub fn extract_recommendations(analysis: Option<&str>) -> Vec<String> {
    let Some(text) = analysis else {
        return Vec::new();
    };

    text.lines()
        .filter_map(candidate_from_line)
        .take(MAX_RECOMMENDATIONS)
        .collect()
}

fn candidate_from_line(line: &str) -> Option<String> {
    let patterns: [&Regex; 4] = [
        &NUMBERED_ITEM,
        &DASH_OR_COLON_PREFIX,
        &BEFORE_PAREN,
        &TABLE_ROW,
    ];

    let captured = patterns
        .iter()
        .find_map(|re| re.captures(line).and_then(|c| c.get(1)))?;

    let name = captured.as_str().trim();
    if name.chars().count() > 2 && !name.contains("Rank") && !name.contains("Name") {
        Some(name.to_string())
    } else {
        None
    }
}
