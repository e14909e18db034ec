//! Upload filename sanitization.

/// Reduce an uploaded filename to a safe, flat ASCII name.
///
/// Non-ASCII characters are dropped, `/` and `\` become spaces, whitespace
/// runs are joined with `_`, anything outside `[A-Za-z0-9_.-]` is removed and
/// leading or trailing `.`/`_` are trimmed. The result may be empty.
pub fn secure_filename(raw: &str) -> String {
    let flattened: String = raw
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");

    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_owned()
}
