use regex_lite::Regex;
use std::sync::OnceLock;

fn non_slug_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("static slug pattern"))
}

/// Lowercases `title` and joins its ASCII alphanumeric runs with `-`.
///
/// Titles without any ASCII letters or digits produce an empty slug; the
/// caller decides how to make those unique.
pub fn slugify(title: &str) -> String {
    let lower = title.trim().to_lowercase();
    non_slug_chars()
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}
