//! Keyword-based type inference for the create/edit title field.

use crate::model::IssueType;

const BUG_KEYWORDS: &[&str] = &["fix", "broken", "bug", "error", "crash", "issue"];
const FEATURE_KEYWORDS: &[&str] = &["add", "implement", "create", "build", "new"];
const CHORE_KEYWORDS: &[&str] = &[
    "refactor",
    "clean up",
    "reorganize",
    "simplify",
    "extract",
    "update",
    "upgrade",
    "bump",
    "migrate",
    "document",
    "docs",
];

/// Scans `title` word by word (case-insensitive) and returns the type of
/// the first keyword matched, preferring a two-word phrase over a
/// single-word match at the same position.
pub fn infer_type(title: &str) -> Option<IssueType> {
    let words: Vec<String> = title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect();

    for i in 0..words.len() {
        if i + 1 < words.len() {
            let phrase = format!("{} {}", words[i], words[i + 1]);
            if CHORE_KEYWORDS.contains(&phrase.as_str()) {
                return Some(IssueType::Chore);
            }
        }
        let word = words[i].as_str();
        if BUG_KEYWORDS.contains(&word) {
            return Some(IssueType::Bug);
        }
        if FEATURE_KEYWORDS.contains(&word) {
            return Some(IssueType::Feature);
        }
        if CHORE_KEYWORDS.contains(&word) {
            return Some(IssueType::Chore);
        }
    }
    None
}
