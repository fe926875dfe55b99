/// Display heading for a raw insight key.
///
/// Splits on `_`, `-`, `.`, whitespace and lower-to-upper camel case
/// boundaries, capitalizes the first letter of each word and joins with single
/// spaces. The rest of each word is left as written, so acronyms survive
/// (`CTA_evaluation` → `CTA Evaluation`).
#[must_use]
pub fn humanize_key(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in key.chars() {
        if matches!(ch, '_' | '-' | '.') || ch.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    if words.is_empty() {
        return "Untitled".to_string();
    }

    words
        .iter()
        .map(String::as_str)
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
