/// Pure string processing utilities

/// Trim and normalize whitespace in a string
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Make a display name usable as a file name stem: path separators and
/// control characters are dropped, whitespace is collapsed.
pub fn sanitize_file_stem(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => ' ',
            _ => c,
        })
        .collect();

    let stem = normalize_whitespace(&cleaned);
    let stem = stem.trim_matches(|c: char| c == '.' || c.is_whitespace());
    if stem.is_empty() {
        "unknown".to_string()
    } else {
        stem.to_string()
    }
}
