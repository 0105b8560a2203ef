//! Display name derivation from clip file names

/// Prefix artifact some exported clips carry
const LEADING_ARTIFACT: &str = "--";

/// Derive a human-readable name from a clip file name
///
/// Strips the extension and a leading `--`, turns `-` and `_` into spaces and
/// capitalizes the first letter of every word. Falls back to the raw file name
/// when nothing printable is left.
///
/// ```
/// use soundboard_core::naming::display_name;
///
/// assert_eq!(display_name("--Air-Horn.ogg"), "Air Horn");
/// assert_eq!(display_name("boo_sound.ogg"), "Boo Sound");
/// ```
pub fn display_name(file_name: &str) -> String {
    let stem = match file_name.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => file_name,
    };
    let stem = stem.strip_prefix(LEADING_ARTIFACT).unwrap_or(stem);

    let spaced: String = stem
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect();

    let name = capitalize_words(&spaced);
    let name = name.trim();
    if name.is_empty() {
        file_name.trim().to_string()
    } else {
        name.to_string()
    }
}

/// Uppercase every alphanumeric character that starts a word
fn capitalize_words(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;

    for c in input.chars() {
        if c.is_alphanumeric() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }

    out
}
