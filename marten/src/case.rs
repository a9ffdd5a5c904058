//! Case conversion for node text normalization.
//!
//! Word boundaries are separator characters (whitespace, `_`, `-`) and
//! camel-case transitions. Both conversions are pure and idempotent:
//! re-applying one to its own output is a no-op.

/// Lower-cases the input and joins its words with underscores.
///
/// `"HelloWorld"` becomes `"hello_world"`; `"HTTPServer"` becomes
/// `"http_server"`.
pub fn underscore(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (i, word) in split_words(input).iter().enumerate() {
        if i > 0 {
            out.push('_');
        }
        for ch in word.chars() {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// Capitalizes each word of the input and joins them with no separator.
///
/// `"hello world"` becomes `"HelloWorld"`. Characters after the first of
/// each word keep their case, so acronyms survive the round trip.
pub fn camelize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for word in split_words(input) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || ch == '_' || ch == '-'
}

/// Splits input at separator characters and camel-case boundaries.
///
/// A boundary sits before an uppercase char that follows a lowercase char or
/// digit, and before the last uppercase char of an uppercase run that is
/// followed by a lowercase char (`"HTTPServer"` -> `["HTTP", "Server"]`).
fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if is_separator(ch) {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if ch.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(ch);
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}
