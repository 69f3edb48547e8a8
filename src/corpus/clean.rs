// Abstract text normalization.
//
// Turns a raw abstract (which arrives with embedded HTML markup, punctuation,
// and uneven spacing) into a lowercase alphabetic token stream ready for
// vectorization. Ordering matters: markup tags must go before the character
// class filter, otherwise `<p>` would survive as `p` in the output.

use std::sync::OnceLock;

use regex_lite::Regex;

fn markup_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").unwrap())
}

fn non_alpha_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z\s]").unwrap())
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Normalize abstract text for NLP.
///
/// Strips markup tags, drops every non-alphabetic non-whitespace character,
/// lowercases, and collapses whitespace runs to single spaces with no
/// leading or trailing space. Total and idempotent; empty input maps to the
/// empty string.
pub fn clean(text: &str) -> String {
    let text = markup_re().replace_all(text, "");
    let text = non_alpha_re().replace_all(&text, "");
    let text = text.to_lowercase();
    whitespace_re().replace_all(&text, " ").trim().to_string()
}
