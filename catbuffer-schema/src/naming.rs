//! Case transforms shared by the schema model and the code generators.

/// Uppercases the first character, leaving the rest untouched.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercases the first character, leaving the rest untouched.
#[must_use]
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Inserts `_` before every uppercase character after the first, preserving case.
#[must_use]
pub fn split_words(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            result.push('_');
        }
        result.push(c);
    }
    result
}

/// Converts a string to snake_case.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    split_words(s).to_lowercase()
}

/// Converts a camelCase or PascalCase name to an enum constant name.
///
/// `TransferTransaction` becomes `TRANSFER_TRANSACTION`.
#[must_use]
pub fn enum_constant_name(s: &str) -> String {
    split_words(s).to_uppercase()
}

/// Derives a human readable comment from an attribute name.
///
/// `maxFee` becomes `Max fee`.
#[must_use]
pub fn comment_from_name(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if i == 0 {
            result.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            result.push(' ');
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}
