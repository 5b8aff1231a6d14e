use once_cell::sync::Lazy;
use regex::Regex;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

// Accepts 12-34-56 or 123456
static SORT_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d{2}-\d{2}-\d{2}|\d{6})$").unwrap());

static ACCOUNT_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{8}$").unwrap());

// Basic UK NI number pattern, checked against the input with spaces stripped
static NI_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[A-CEGHJ-PR-TW-Z][A-CEGHJ-NPR-TW-Z][0-9]{6}[A-D]$").unwrap());

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_sort_code(code: &str) -> bool {
    SORT_CODE_RE.is_match(code)
}

pub fn is_valid_account_number(num: &str) -> bool {
    ACCOUNT_NUMBER_RE.is_match(num)
}

pub fn is_valid_ni_number(ni: &str) -> bool {
    let stripped: String = ni.split_whitespace().collect();
    NI_NUMBER_RE.is_match(&stripped)
}

/// Progressive dashing for sort-code entry: "123456" -> "12-34-56".
pub fn format_sort_code(val: &str) -> String {
    let digits: String = val.chars().filter(|c| c.is_ascii_digit()).take(6).collect();
    match digits.len() {
        0..=2 => digits,
        3..=4 => format!("{}-{}", &digits[..2], &digits[2..]),
        _ => format!("{}-{}-{}", &digits[..2], &digits[2..4], &digits[4..]),
    }
}

// Hooks for the derive-level gate on Candidate. Empty values pass; the fields
// are independently optional and partially fillable.

pub fn validate_sort_code(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() || is_valid_sort_code(code) {
        return Ok(());
    }
    let mut err = ValidationError::new("sort_code");
    err.message = Some("Invalid Sort Code (XX-XX-XX)".into());
    Err(err)
}

pub fn validate_account_number(num: &str) -> Result<(), ValidationError> {
    if num.is_empty() || is_valid_account_number(num) {
        return Ok(());
    }
    let mut err = ValidationError::new("account_number");
    err.message = Some("Account Number must be 8 digits".into());
    Err(err)
}

pub fn validate_ni_number(ni: &str) -> Result<(), ValidationError> {
    if ni.is_empty() || is_valid_ni_number(ni) {
        return Ok(());
    }
    let mut err = ValidationError::new("ni_number");
    err.message = Some("Invalid UK NI Number".into());
    Err(err)
}

/// Flattens a validation failure into one "field: message" line per failing
/// field, including fields of nested structures such as bank details.
pub fn field_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut out = Vec::new();
    collect_messages(errors, &mut out);
    out
}

fn collect_messages(errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    out.push(format!("{field}: {message}"));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, out),
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect_messages(nested, out);
                }
            }
        }
    }
}
