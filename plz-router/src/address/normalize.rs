//! Input normalization for German addresses.

/// Street abbreviations expanded when they appear as a whole token.
const STREET_ABBREVIATIONS: &[(&str, &str)] = &[
    ("str.", "straße"),
    ("str", "straße"),
    ("pl.", "platz"),
    ("pl", "platz"),
    ("weg.", "weg"),
    ("allee.", "allee"),
    ("gasse.", "gasse"),
    ("ufer.", "ufer"),
    ("ring.", "ring"),
    ("damm.", "damm"),
    ("berg.", "berg"),
    ("feld.", "feld"),
    ("hof.", "hof"),
    ("park.", "park"),
];

/// Trim, lowercase, expand street abbreviations and collapse whitespace.
///
/// ```
/// use plz_router::address::normalize_input;
///
/// assert_eq!(
///     normalize_input("  Berliner   Str. 5,  Hamburg "),
///     "berliner straße 5, hamburg"
/// );
/// assert_eq!(normalize_input("Hauptstr. 1"), "hauptstr. 1");
/// ```
pub fn normalize_input(input: &str) -> String {
    input
        .split_whitespace()
        .map(|token| expand_token(&token.to_lowercase()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Expand one lowercase token, keeping any trailing commas in place.
fn expand_token(token: &str) -> String {
    let word = token.trim_end_matches(',');
    let trailing = &token[word.len()..];

    if let Some((_, full)) = STREET_ABBREVIATIONS.iter().find(|(abbr, _)| *abbr == word) {
        return format!("{full}{trailing}");
    }

    token.to_string()
}
