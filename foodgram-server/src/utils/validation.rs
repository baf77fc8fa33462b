//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits follow the upstream API contract (200-char names/slugs, 7-char hex
//! colors); SQLite TEXT has no built-in length enforcement.

use crate::utils::error::FieldErrors;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: recipe, tag, ingredient, user names
pub const MAX_NAME_LEN: usize = 200;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Usernames
pub const MAX_USERNAME_LEN: usize = 150;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Usernames that collide with API routes and may never be registered
pub const RESERVED_USERNAMES: &[&str] = &["me"];

// ── Validation helpers ──────────────────────────────────────────────

/// Check a required string: non-empty and within the length limit.
/// Problems are collected into `errors` under `field`.
pub fn check_required_text(errors: &mut FieldErrors, value: &str, field: &str, max_len: usize) {
    if value.trim().is_empty() {
        errors.push(field, format!("{field} must not be empty"));
    } else if value.len() > max_len {
        errors.push(
            field,
            format!("{field} is too long ({} chars, max {max_len})", value.len()),
        );
    }
}

/// `#RRGGBB` hex color check (used by the tag model)
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].bytes().all(|b| b.is_ascii_hexdigit())
}

/// Username check: charset, length and the reserved-name rule
pub fn check_username(errors: &mut FieldErrors, value: &str) {
    check_required_text(errors, value, "username", MAX_USERNAME_LEN);
    if RESERVED_USERNAMES.contains(&value) {
        errors.push("username", format!("Username '{value}' is reserved"));
    }
    if !value
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '.' | '@' | '+' | '-' | '_'))
    {
        errors.push(
            "username",
            "Username may only contain letters, digits and .@+-_",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color() {
        assert!(is_hex_color("#49B64E"));
        assert!(is_hex_color("#aabbcc"));
        assert!(!is_hex_color("49B64E"));
        assert!(!is_hex_color("#49B64"));
        assert!(!is_hex_color("#49B64G"));
    }

    #[test]
    fn reserved_username_rejected() {
        let mut errors = FieldErrors::new();
        check_username(&mut errors, "me");
        assert!(!errors.is_empty());
    }

    #[test]
    fn normal_username_passes() {
        let mut errors = FieldErrors::new();
        check_username(&mut errors, "chef_ramsay");
        assert!(errors.is_empty());
    }

    #[test]
    fn empty_and_oversized_text_collected_per_field() {
        let mut errors = FieldErrors::new();
        check_required_text(&mut errors, "", "name", MAX_NAME_LEN);
        check_required_text(&mut errors, &"x".repeat(300), "text", MAX_NAME_LEN);
        assert_eq!(errors.0.len(), 2);
    }
}
