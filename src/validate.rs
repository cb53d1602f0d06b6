//! Client-side input validation.
//!
//! These shapes are contracts shared with the backend; the server applies
//! the same rules.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]{3,20}$").expect("valid regex"));

/// Moroccan mobile numbers: international +2126 prefix or local 06 prefix,
/// followed by eight digits.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+2126|06)\d{8}$").expect("valid regex"));

/// Symbols accepted (and one required) in a password.
const PASSWORD_SYMBOLS: &str = "@$!%*?&";

/// Returns true for a plausible `local@domain.tld` shape.
pub fn email_is_valid(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Returns true for 3-20 characters of `[a-zA-Z0-9_]`.
pub fn username_is_valid(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}

/// Returns true for a valid regional mobile number.
pub fn phone_is_valid(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Password strength check: at least 8 characters, drawn only from
/// letters, digits and `@$!%*?&`, with at least one lowercase letter, one
/// uppercase letter, one digit and one symbol.
pub fn password_is_strong(password: &str) -> bool {
    let mut length = 0usize;
    let mut lower = false;
    let mut upper = false;
    let mut digit = false;
    let mut symbol = false;

    for c in password.chars() {
        length += 1;
        match c {
            'a'..='z' => lower = true,
            'A'..='Z' => upper = true,
            '0'..='9' => digit = true,
            c if PASSWORD_SYMBOLS.contains(c) => symbol = true,
            _ => return false,
        }
    }

    length >= 8 && lower && upper && digit && symbol
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_accepts_plain_address() {
        assert!(email_is_valid("user@example.com"));
        assert!(email_is_valid("a.b+c@mail.example.org"));
    }

    #[test]
    fn test_email_rejects_malformed_addresses() {
        assert!(!email_is_valid("user@example"));
        assert!(!email_is_valid("user.example.com"));
        assert!(!email_is_valid("@example.com"));
        assert!(!email_is_valid("user name@example.com"));
        assert!(!email_is_valid(""));
    }

    #[test]
    fn test_password_accepts_strong_password() {
        assert!(password_is_strong("Abcd123!"));
        assert!(password_is_strong("Xy9$aaaaaaaa"));
    }

    #[test]
    fn test_password_rejects_missing_classes() {
        // No uppercase
        assert!(!password_is_strong("abcd123!"));
        // No symbol
        assert!(!password_is_strong("Abcd1234"));
        // Too short
        assert!(!password_is_strong("Abc1!"));
        // No digit
        assert!(!password_is_strong("Abcdefg!"));
        // No lowercase
        assert!(!password_is_strong("ABCD123!"));
    }

    #[test]
    fn test_password_rejects_characters_outside_the_set() {
        // Space and '#' are not in the accepted set
        assert!(!password_is_strong("Abcd 123!"));
        assert!(!password_is_strong("Abcd123#"));
    }

    #[test]
    fn test_username_shapes() {
        assert!(username_is_valid("john_doe1"));
        assert!(username_is_valid("abc"));
        assert!(!username_is_valid("ab"));
        assert!(!username_is_valid("john doe"));
        assert!(!username_is_valid("a".repeat(21).as_str()));
        assert!(!username_is_valid("john-doe"));
    }

    #[test]
    fn test_phone_shapes() {
        assert!(phone_is_valid("0612345678"));
        assert!(phone_is_valid("+212612345678"));
        assert!(!phone_is_valid("0512345678"));
        assert!(!phone_is_valid("061234567"));
        assert!(!phone_is_valid("06123456789"));
        assert!(!phone_is_valid("phone"));
    }
}
