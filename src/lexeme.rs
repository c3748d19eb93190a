//! Helpers applied to lexemes the scanner has already cut out of the input:
//! string literal decoding and identifier shape classification.

use std::sync::LazyLock;

use regex::Regex;

static RELATION_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z_]*$").expect("valid relation type pattern"));

static ENTITY_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]*$").expect("valid entity type pattern"));

static VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").expect("valid variable pattern"));

/// Decodes a quoted string literal.
///
/// The first character of the lexeme is taken as the quote character. The
/// enclosing quotes are stripped and exactly two escapes are resolved in a
/// single left-to-right pass: `\\` becomes `\` and a backslash followed by
/// the quote character becomes the quote. Every other backslash is kept.
///
/// # Examples
///
/// ```
/// use rql_ast::lexeme::unquote;
///
/// assert_eq!(unquote(r#""a\"b""#), r#"a"b"#);
/// assert_eq!(unquote(r"'a\\b'"), r"a\b");
/// assert_eq!(unquote(r"'a\nb'"), r"a\nb");
/// assert_eq!(unquote("''"), "");
/// ```
pub fn unquote(lexeme: &str) -> String {
    let mut chars = lexeme.chars();
    let Some(quote) = chars.next() else {
        return String::new();
    };
    if chars.next_back().is_none() {
        return String::new();
    }

    let mut result = String::with_capacity(lexeme.len());
    let mut escaped = false;
    for ch in chars {
        if escaped {
            escaped = false;
            if ch == '\\' || ch == quote {
                // replace the pending backslash
                result.pop();
            }
            result.push(ch);
        } else {
            escaped = ch == '\\';
            result.push(ch);
        }
    }
    result
}

/// Relation type names: lowercase letters and underscores only.
pub fn is_r_type(name: &str) -> bool {
    RELATION_TYPE.is_match(name)
}

/// Entity type names: one uppercase letter followed by lowercase letters.
pub fn is_e_type(name: &str) -> bool {
    ENTITY_TYPE.is_match(name)
}

/// Variable names: one uppercase letter followed by uppercase letters,
/// digits or underscores.
pub fn is_var(name: &str) -> bool {
    VARIABLE.is_match(name)
}

/// Function names. No rule is enforced here yet, every name is accepted.
pub fn is_funcname(_name: &str) -> bool {
    true
}
