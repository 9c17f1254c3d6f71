//! String helpers for emitting PHP source
//!
//! Every value that lands inside a single-quoted PHP string literal goes
//! through [`escape_single_quoted`] or [`quote`].

/// Escape backslashes and single quotes for a single-quoted PHP literal
pub fn escape_single_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            other => out.push(other),
        }
    }
    out
}

/// Wrap a value in single quotes, escaping as needed
pub fn quote(value: &str) -> String {
    format!("'{}'", escape_single_quoted(value))
}

/// Render a list of identifiers: a bare quoted scalar for one entry,
/// a bracketed list otherwise
pub fn quote_list<S: AsRef<str>>(values: &[S]) -> String {
    let quoted: Vec<String> = values.iter().map(|v| quote(v.as_ref())).collect();
    if quoted.len() == 1 {
        quoted.into_iter().next().unwrap_or_default()
    } else {
        format!("[{}]", quoted.join(", "))
    }
}

/// Strip any run of leading/trailing quote characters, then whitespace
///
/// MariaDB reports string defaults wrapped in quotes (`'draft'`) while
/// MySQL does not (`draft`); both end up as `draft`.
pub fn trim_string_quotes(value: &str) -> &str {
    value
        .trim_start_matches(['"', '\''])
        .trim_end_matches(['"', '\''])
        .trim()
}

/// Whether a default value is a plain numeric literal (`0`, `-1.5`, `1e3`)
pub fn is_numeric_literal(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }
    let plausible = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    plausible && value.parse::<f64>().is_ok()
}

/// `Studly` case: `-`/`_` become word breaks, each word's first letter is
/// upper-cased, and the breaks are removed (`user_profiles` → `UserProfiles`)
///
/// Unlike pascal-casing, the rest of each word is left untouched, so
/// `oauth_clientID` becomes `OauthClientID`.
pub fn studly(value: &str) -> String {
    value
        .split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_single_quoted() {
        assert_eq!(escape_single_quoted("it's"), "it\\'s");
        assert_eq!(escape_single_quoted("C:\\path"), "C:\\\\path");
        assert_eq!(escape_single_quoted("plain"), "plain");
    }

    #[test]
    fn test_quote_list() {
        assert_eq!(quote_list(&["email"]), "'email'");
        assert_eq!(quote_list(&["a", "b"]), "['a', 'b']");
        assert_eq!(quote_list::<&str>(&[]), "[]");
    }

    #[test]
    fn test_trim_string_quotes() {
        assert_eq!(trim_string_quotes("'draft'"), "draft");
        assert_eq!(trim_string_quotes("\"x\" "), "x");
        assert_eq!(trim_string_quotes("plain"), "plain");
    }

    #[test]
    fn test_is_numeric_literal() {
        assert!(is_numeric_literal("0"));
        assert!(is_numeric_literal("-12.50"));
        assert!(is_numeric_literal("1e3"));
        assert!(!is_numeric_literal(""));
        assert!(!is_numeric_literal("abc"));
        assert!(!is_numeric_literal("inf"));
        assert!(!is_numeric_literal("CURRENT_TIMESTAMP"));
    }

    #[test]
    fn test_studly() {
        assert_eq!(studly("users"), "Users");
        assert_eq!(studly("user_profiles"), "UserProfiles");
        assert_eq!(studly("order-items"), "OrderItems");
        assert_eq!(studly("oauth_clientID"), "OauthClientID");
        assert_eq!(studly("a__b"), "AB");
    }
}
