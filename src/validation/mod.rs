use std::fmt;

pub const USERNAME_MIN_LEN: usize = 2;
pub const PASSWORD_MIN_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult = Result<(), ValidationError>;

pub fn validate_required(field: &'static str, value: &str, message: &str) -> ValidationResult {
    if value.is_empty() {
        return Err(ValidationError::new(field, message));
    }

    Ok(())
}

pub fn validate_min_len(
    field: &'static str,
    value: &str,
    min_len: usize,
    message: &str,
) -> ValidationResult {
    if value.chars().count() < min_len {
        return Err(ValidationError::new(field, message));
    }

    Ok(())
}

/// Accepts `local@domain.tld` shapes: one `@`, no whitespace, a dotted domain
/// whose labels are non-empty.
pub fn validate_email(field: &'static str, value: &str) -> ValidationResult {
    let invalid = || ValidationError::new(field, "Please enter a valid email address");

    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }

    if labels.last().map_or(true, |tld| tld.len() < 2) {
        return Err(invalid());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_required_field() {
        assert!(validate_required("password", "secret", "Password is required").is_ok());
        let err = validate_required("password", "", "Password is required").unwrap_err();
        assert_eq!(err.field, "password");
        assert_eq!(err.message, "Password is required");
    }

    #[test]
    fn validates_min_len() {
        assert!(validate_min_len("username", "jo", 2, "too short").is_ok());
        assert!(validate_min_len("username", "j", 2, "too short").is_err());
        // counts characters, not bytes
        assert!(validate_min_len("username", "é", 2, "too short").is_err());
    }

    #[test]
    fn validates_email() {
        assert!(validate_email("email", "name@example.com").is_ok());
        assert!(validate_email("email", "a.b@clinic.co.id").is_ok());
        assert!(validate_email("email", "").is_err());
        assert!(validate_email("email", "name@").is_err());
        assert!(validate_email("email", "@example.com").is_err());
        assert!(validate_email("email", "name@example").is_err());
        assert!(validate_email("email", "name@@example.com").is_err());
        assert!(validate_email("email", "na me@example.com").is_err());
        assert!(validate_email("email", "name@example.c").is_err());
        assert!(validate_email("email", "name@.com").is_err());
    }
}
