use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

pub fn validate_signup(
    name: &str,
    email: &str,
    password: &Secret<String>,
    phone: &str,
    address: &str,
) -> Vec<String> {
    let mut errors = Vec::new();

    let name = name.trim();
    if name.is_empty() {
        errors.push("Name is required".to_string());
    } else if name.chars().count() < 2 {
        errors.push("Name must be at least 2 characters".to_string());
    }

    errors.extend(validate_email(email));

    let password = password.expose_secret().trim();
    if password.is_empty() {
        errors.push("Password is required".to_string());
    } else if !is_strong_password(password) {
        errors.push(
            "Password must be at least 8 characters long and include an uppercase letter, \
             a lowercase letter, and a symbol"
                .to_string(),
        );
    }

    let phone = phone.trim();
    if phone.is_empty() {
        errors.push("Phone is required".to_string());
    } else if !is_phone_number(phone) {
        errors.push("Invalid phone number".to_string());
    }

    if address.trim().is_empty() {
        errors.push("Address is required".to_string());
    }

    errors
}

pub fn validate_email(email: &str) -> Vec<String> {
    let email = email.trim();
    if email.is_empty() {
        vec!["Email is required".to_string()]
    } else if !EMAIL_REGEX.is_match(email) {
        vec!["Invalid email format".to_string()]
    } else {
        Vec::new()
    }
}

fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| !c.is_alphanumeric())
}

fn is_phone_number(phone: &str) -> bool {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    let digit_count = digits.chars().filter(char::is_ascii_digit).count();
    digits
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
        && (7..=15).contains(&digit_count)
}
