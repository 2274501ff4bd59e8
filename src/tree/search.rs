//! Search-filter grammar: tokenizer plus query evaluation.
//!
//! Input is tokenized into `(key, operator, value)` triples (operator is
//! `:` or `=`) plus free-text words. Values support double-quoted strings
//! with backslash escapes. Recognized keys fall back to a substring match
//! on title ∪ id when unrecognized.

use crate::model::{Forest, Node};

/// What kind of completion the search overlay should offer next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuggestionMode {
    /// Suggest a field name (the user is starting a new token).
    Field,
    /// Suggest a value for `pending_field` (the user typed `key:` with no value yet).
    Value,
}

/// A single parsed token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// `key:value` or `key=value`.
    Field { key: String, value: String },
    /// A bare word with no recognized `key:` prefix.
    Word(String),
}

/// The result of tokenizing a search string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseResult {
    pub tokens: Vec<Token>,
    pub suggestion_mode: SuggestionMode,
    pub pending_field: Option<String>,
    /// True if an unterminated quote suppressed emission of the trailing token.
    pub unterminated_quote: bool,
}

impl Default for SuggestionMode {
    fn default() -> Self {
        SuggestionMode::Field
    }
}

/// Tokenizes a raw search-input string into field and free-text terms.
pub fn tokenize(input: &str) -> ParseResult {
    let mut result = ParseResult::default();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;
    let len = chars.len();

    while i < len {
        while i < len && chars[i].is_whitespace() {
            i += 1;
        }
        if i >= len {
            break;
        }

        let start = i;
        // Read a bare word, or the key part of key:value / key=value.
        let mut word = String::new();
        let mut operator: Option<char> = None;
        while i < len && !chars[i].is_whitespace() {
            if (chars[i] == ':' || chars[i] == '=') && operator.is_none() {
                operator = Some(chars[i]);
                i += 1;
                break;
            }
            word.push(chars[i]);
            i += 1;
        }

        let Some(_op) = operator else {
            result.tokens.push(Token::Word(word));
            continue;
        };

        // We have `key<op>`; read the value (quoted or bare).
        if i >= len {
            // Trailing partial token: "status:" with no value yet.
            result.suggestion_mode = SuggestionMode::Value;
            result.pending_field = Some(word);
            continue;
        }

        if chars[i] == '"' {
            i += 1;
            let mut value = String::new();
            let mut closed = false;
            while i < len {
                match chars[i] {
                    '\\' if i + 1 < len => {
                        value.push(chars[i + 1]);
                        i += 2;
                    }
                    '"' => {
                        closed = true;
                        i += 1;
                        break;
                    }
                    c => {
                        value.push(c);
                        i += 1;
                    }
                }
            }
            if !closed {
                result.unterminated_quote = true;
                // Keep the partial query visible but suppress this token.
                let _ = start;
                continue;
            }
            result.tokens.push(Token::Field { key: word, value });
        } else {
            let mut value = String::new();
            while i < len && !chars[i].is_whitespace() {
                value.push(chars[i]);
                i += 1;
            }
            result.tokens.push(Token::Field { key: word, value });
        }
    }

    if result.pending_field.is_none() {
        result.suggestion_mode = SuggestionMode::Field;
    }

    result
}

/// Reserializes tokens back into `k:v` form (values quoted when they
/// contain whitespace), used to test tokenize/serialize idempotence.
pub fn serialize(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| match t {
            Token::Word(w) => w.clone(),
            Token::Field { key, value } => {
                if value.contains(' ') {
                    format!("{key}:\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
                } else {
                    format!("{key}:{value}")
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A parsed, evaluable query.
#[derive(Clone, Debug, Default)]
pub struct Query {
    tokens: Vec<Token>,
}

impl Query {
    pub fn parse(input: &str) -> Self {
        Self {
            tokens: tokenize(input).tokens,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether `node` matches every token in the query (AND semantics).
    pub fn matches(&self, node: &Node) -> bool {
        self.tokens.iter().all(|token| match token {
            Token::Word(w) => substring_match(&node.issue.title, w) || substring_match(&node.issue.id, w),
            Token::Field { key, value } => match key.to_ascii_lowercase().as_str() {
                "status" => node.issue.status.to_string().eq_ignore_ascii_case(value),
                "id" => node.issue.id.eq_ignore_ascii_case(value),
                "title" => substring_match(&node.issue.title, value),
                "label" | "labels" => node
                    .issue
                    .labels
                    .iter()
                    .any(|l| l.eq_ignore_ascii_case(value)),
                "priority" | "prio" => value
                    .parse::<u8>()
                    .map(|p| node.issue.priority.0 == p)
                    .unwrap_or(false),
                "type" | "issue_type" => node.issue.issue_type.to_string().eq_ignore_ascii_case(value),
                "blocked" => {
                    let want = value.eq_ignore_ascii_case("true") || value == "1";
                    node.is_blocked == want
                }
                _ => substring_match(&node.issue.title, value) || substring_match(&node.issue.id, value),
            },
        })
    }
}

fn substring_match(haystack: &str, needle: &str) -> bool {
    haystack.to_ascii_lowercase().contains(&needle.to_ascii_lowercase())
}

/// Three memoized booleans used by the filter engine per node: self-match,
/// any-descendant-match, any-ancestor-match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterMatch {
    pub self_match: bool,
    pub descendant_match: bool,
    pub ancestor_match: bool,
}

impl FilterMatch {
    /// A row is visible iff self-match or descendant-match, or it's an
    /// ancestor on a path to a match (surfaces context).
    pub fn visible(&self) -> bool {
        self.self_match || self.descendant_match || self.ancestor_match
    }
}

/// Evaluates a query across an entire forest, memoizing per-node matches.
pub fn evaluate(forest: &Forest, query: &Query) -> std::collections::HashMap<crate::model::NodeId, FilterMatch> {
    use crate::model::NodeId;
    use std::collections::HashMap;

    let mut out: HashMap<NodeId, FilterMatch> = HashMap::with_capacity(forest.len());

    fn descendant_match(forest: &Forest, id: NodeId, query: &Query, cache: &mut HashMap<NodeId, bool>) -> bool {
        if let Some(v) = cache.get(&id) {
            return *v;
        }
        let self_m = query.matches(forest.node(id));
        let mut any = self_m;
        for &child in &forest.node(id).children {
            if descendant_match(forest, child, query, cache) {
                any = true;
            }
        }
        cache.insert(id, any);
        any
    }

    let mut has_match_in_subtree = HashMap::new();
    for i in 0..forest.len() {
        descendant_match(forest, NodeId(i), query, &mut has_match_in_subtree);
    }

    // Only marks a child `ancestor_match` when this node itself sits on a
    // matching path (it self-matches, or an ancestor of its own already
    // does); every child is still visited so a match further down its own
    // branch is found regardless of this node's status.
    fn mark_ancestors(forest: &Forest, id: NodeId, out: &mut HashMap<NodeId, FilterMatch>) {
        let entry = out.entry(id).or_default();
        let on_path = entry.self_match || entry.ancestor_match;
        for &child in &forest.node(id).children {
            if on_path {
                out.entry(child).or_default().ancestor_match = true;
            }
            mark_ancestors(forest, child, out);
        }
    }

    for i in 0..forest.len() {
        let id = NodeId(i);
        let node = forest.node(id);
        let self_match = query.matches(node);
        let descendant_match = node
            .children
            .iter()
            .any(|c| *has_match_in_subtree.get(c).unwrap_or(&false));
        let entry = out.entry(id).or_default();
        entry.self_match = self_match;
        entry.descendant_match = descendant_match;
    }

    for root in &forest.roots {
        mark_ancestors(forest, *root, &mut out);
    }

    out
}
