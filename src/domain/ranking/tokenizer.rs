use once_cell::sync::Lazy;
use regex::Regex;

/// Words are runs of word characters; every other non-space character is its own token
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+|[^\w\s]").unwrap());

/// Lowercase and split text into word and punctuation tokens
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();

    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}
