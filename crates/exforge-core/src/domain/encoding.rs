//! Encoding of configuration values into generated source text.
//!
//! Every value a template interpolates goes through one of these helpers.
//! Nothing is ever pasted into generated JavaScript or `.env` text raw.

/// Quote characters usable around a `.env` value, in order of preference.
///
/// Single quotes and backticks keep their content literal. Inside double
/// quotes dotenv expands `\n` and `\r`, so they come last.
const ENV_QUOTES: [char; 3] = ['\'', '`', '"'];

/// Render `value` as a JavaScript string literal.
///
/// JSON string literals are valid JavaScript string literals, so quoting is
/// delegated to `serde_json`, which escapes quotes, backslashes and control
/// characters.
pub fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_owned()).to_string()
}

/// Render `value` for the right-hand side of a `KEY=value` line.
///
/// Values made only of unambiguous characters are written raw. Anything else
/// is wrapped in the first quote character that does not occur in it.
/// Callers must have checked [`check_env_encodable`] first; an unencodable
/// value falls back to single quotes.
pub fn env_value(value: &str) -> String {
    if value.chars().all(is_env_safe) {
        return value.to_owned();
    }
    let quote = env_quote(value).unwrap_or('\'');
    format!("{quote}{value}{quote}")
}

/// Check that `value` survives a round-trip through a dotenv parser.
///
/// Returns the reason when it does not.
pub fn check_env_encodable(value: &str) -> Result<(), String> {
    if let Some(c) = value.chars().find(|c| c.is_control()) {
        return Err(format!("contains control character {:?}", c));
    }
    match env_quote(value) {
        None => Err("contains all three quote characters".into()),
        Some('"') if value.contains("\\n") || value.contains("\\r") => Err(
            "contains both ' and ` plus a \\n or \\r sequence dotenv would expand".into(),
        ),
        Some(_) => Ok(()),
    }
}

fn env_quote(value: &str) -> Option<char> {
    ENV_QUOTES.iter().copied().find(|q| !value.contains(*q))
}

fn is_env_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ':' | '@' | '+' | ',' | '%' | '~')
}
