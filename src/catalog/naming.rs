//! Identifier-safe names for strict downstream consumers
//!
//! Some MCP clients only accept tool/server names that look like function
//! names: they must start with a letter or underscore, use only
//! `[A-Za-z0-9_.:-]`, and be at most 64 characters long.

/// Maximum length of a normalized name
pub const MAX_NAME_LEN: usize = 64;

/// Returned when nothing survives normalization
pub const UNNAMED: &str = "_unnamed";

/// Replacement for characters that have a sensible ASCII spelling (or none).
fn substitute(c: char) -> Option<&'static str> {
    let replacement = match c {
        // Spanish
        'ñ' => "n",
        'Ñ' => "N",
        'á' => "a",
        'é' => "e",
        'í' => "i",
        'ó' => "o",
        'ú' => "u",
        'ü' => "u",
        'Á' => "A",
        'É' => "E",
        'Í' => "I",
        'Ó' => "O",
        'Ú' => "U",
        'Ü' => "U",
        // French
        'à' | 'â' => "a",
        'ç' => "c",
        'è' | 'ê' | 'ë' => "e",
        'î' | 'ï' => "i",
        'ô' => "o",
        'ù' | 'û' => "u",
        'ÿ' => "y",
        'À' | 'Â' => "A",
        'Ç' => "C",
        'È' | 'Ê' | 'Ë' => "E",
        'Î' | 'Ï' => "I",
        'Ô' => "O",
        'Ù' | 'Û' => "U",
        'Ÿ' => "Y",
        // German
        'ä' => "a",
        'ö' => "o",
        'ß' => "ss",
        'Ä' => "A",
        'Ö' => "O",
        // Portuguese
        'ã' => "a",
        'õ' => "o",
        'Ã' => "A",
        'Õ' => "O",
        // Symbols
        '/' | '\\' => "-",
        '&' => "and",
        '+' => "plus",
        '@' => "at",
        '\'' | '\u{2019}' | '"' | '\u{201C}' | '\u{201D}' | '(' | ')' | '[' | ']' | '{' | '}'
        | '#' | '!' | '?' | ',' | ';' | '=' | '*' | '%' | '$' | '€' | '£' | '¥' => "",
        _ => return None,
    };
    Some(replacement)
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | ':' | '-')
}

/// Normalize an arbitrary display name into a function-name-safe identifier.
///
/// Total and idempotent: the output always matches
/// `^[A-Za-z_][A-Za-z0-9_.:-]{0,63}$`.
pub fn normalize_name(name: &str) -> String {
    let mut substituted = String::with_capacity(name.len());
    for c in name.chars() {
        match substitute(c) {
            Some(replacement) => substituted.push_str(replacement),
            None => substituted.push(c),
        }
    }

    // Whitespace runs become a single underscore, everything else outside the
    // allowed set is dropped.
    let mut result = String::with_capacity(substituted.len());
    let mut in_whitespace = false;
    for c in substituted.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                result.push('_');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;
        if is_allowed(c) {
            result.push(c);
        }
    }

    if let Some(first) = result.chars().next() {
        if !(first.is_ascii_alphabetic() || first == '_') {
            result.insert(0, '_');
        }
    }

    // Only ASCII is left at this point, so byte truncation is char-safe.
    result.truncate(MAX_NAME_LEN);

    if result.is_empty() {
        return UNNAMED.to_string();
    }
    result
}

/// Whether `name` already satisfies the identifier constraint.
pub fn is_normalized(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    name.len() <= MAX_NAME_LEN && chars.all(is_allowed)
}
