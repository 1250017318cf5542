//! Identifier case conversions used by placeholder filters
//!
//! `{name|snakecase}` and friends route through these helpers so a single
//! request name can be spelled the way each target language expects.

/// Converts a string to snake_case.
///
/// Handles camelCase, PascalCase, kebab-case and space separated input.
///
/// # Examples
/// ```
/// use patterngen::generation::utils::to_snake_case;
///
/// assert_eq!(to_snake_case("fetchUserById"), "fetch_user_by_id");
/// assert_eq!(to_snake_case("FetchUser"), "fetch_user");
/// assert_eq!(to_snake_case("fetch-user"), "fetch_user");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let mut prev_is_lowercase = false;

    for ch in s.chars() {
        if ch.is_uppercase() {
            // Word boundary only when leaving a lowercase run
            if prev_is_lowercase {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
            prev_is_lowercase = false;
        } else if ch.is_alphanumeric() {
            result.push(ch);
            prev_is_lowercase = ch.is_lowercase() || ch.is_ascii_digit();
        } else if matches!(ch, '-' | '_' | ' ') {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            prev_is_lowercase = false;
        }
    }

    result.trim_matches('_').to_string()
}

/// Converts a string to PascalCase for type names.
///
/// # Examples
/// ```
/// use patterngen::generation::utils::to_pascal_case;
///
/// assert_eq!(to_pascal_case("user_account"), "UserAccount");
/// assert_eq!(to_pascal_case("user-account"), "UserAccount");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    to_snake_case(s)
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect()
}

/// Converts a string to camelCase.
///
/// # Examples
/// ```
/// use patterngen::generation::utils::to_camel_case;
///
/// assert_eq!(to_camel_case("fetch_user_by_id"), "fetchUserById");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Converts a string to kebab-case.
pub fn to_kebab_case(s: &str) -> String {
    to_snake_case(s).replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("fetchUserById"), "fetch_user_by_id");
        assert_eq!(to_snake_case("FetchUserById"), "fetch_user_by_id");
        assert_eq!(to_snake_case("fetch-user-by-id"), "fetch_user_by_id");
        assert_eq!(to_snake_case("fetch_user_by_id"), "fetch_user_by_id");
        assert_eq!(to_snake_case("HTTPResponse"), "httpresponse");
        assert_eq!(to_snake_case("get HTTP Response"), "get_http_response");
        assert_eq!(to_snake_case("user2Name"), "user2_name");
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("user_account"), "UserAccount");
        assert_eq!(to_pascal_case("userAccount"), "UserAccount");
        assert_eq!(to_pascal_case("USER_ACCOUNT"), "UserAccount");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("user_account"), "userAccount");
        assert_eq!(to_camel_case("UserAccount"), "userAccount");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_to_kebab_case() {
        assert_eq!(to_kebab_case("UserAccount"), "user-account");
        assert_eq!(to_kebab_case("user_account"), "user-account");
    }
}
