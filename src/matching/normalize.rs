/// Canonical comparison form of free text.
///
/// Lowercases, keeps only `a-z`, `0-9` and spaces, collapses runs of spaces
/// and trims. Total: empty or all-punctuation input yields `""`.
///
/// Other whitespace (tabs, newlines) is stripped like punctuation, so
/// `"appeal\ngrade"` becomes `"appealgrade"`.
pub fn normalize(raw: &str) -> String {
    let kept: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect();

    kept.split(' ')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
