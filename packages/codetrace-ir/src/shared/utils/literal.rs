//! Literal text helpers shared by every recognizer

/// Strip one pair of matching quote delimiters (`"`, `'` or `` ` ``)
pub fn strip_quotes(text: &str) -> &str {
    let text = text.trim();
    for quote in ['"', '\'', '`'] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}

/// Whether the text is a single quoted string literal
pub fn is_string_literal(text: &str) -> bool {
    let text = text.trim();
    text.len() >= 2
        && ['"', '\'', '`']
            .iter()
            .any(|&q| text.starts_with(q) && text.ends_with(q))
}

/// Whether the text is a plain identifier (`x`, `_count`, `node2`)
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Normalize a raw initializer/right-hand side into the value shown in the trace
///
/// Trailing statement terminators are dropped and string literals lose their
/// quotes; everything else is kept as written.
pub fn normalize_value(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches(';').trim();
    if is_string_literal(trimmed) {
        strip_quotes(trimmed).to_string()
    } else {
        trimmed.to_string()
    }
}

/// Split on `sep` at nesting depth zero, outside string literals
pub fn split_top_level<'a>(text: &'a str, sep: &str) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match quote {
            Some(q) => {
                if c == '\\' {
                    chars.next();
                } else if c == q {
                    quote = None;
                }
            }
            None => match c {
                '"' | '\'' | '`' => quote = Some(c),
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth -= 1,
                _ if depth == 0 && text[i..].starts_with(sep) => {
                    parts.push(&text[start..i]);
                    start = i + sep.len();
                    for _ in 1..sep.chars().count() {
                        chars.next();
                    }
                }
                _ => {}
            },
        }
    }
    parts.push(&text[start..]);
    parts
}
