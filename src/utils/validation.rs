//! Input validation helpers
//!
//! Centralized text length constants and field validation for the
//! employee and registration forms. Validation runs before any
//! persistence or uniqueness check and collects the full set of
//! violations instead of stopping at the first.

use validator::ValidateEmail;

use crate::utils::error::FieldError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: employee name, designation, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Usernames
pub const MAX_USERNAME_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Short identifiers: phone numbers, gender, course entries
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Raw employee fields as parsed from a multipart form
///
/// All fields are optional at the parsing stage; which of them are
/// required depends on whether the request is a create or an update.
#[derive(Debug, Default)]
pub struct EmployeeForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub designation: Option<String>,
    pub gender: Option<String>,
    pub course: Vec<String>,
}

/// Whether the string consists of digits only (and is non-empty)
pub fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

fn push_required(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Option<&str>,
    message: &str,
    max_len: usize,
) {
    match value {
        None => errors.push(FieldError::new(field, message)),
        Some(v) if v.trim().is_empty() => errors.push(FieldError::new(field, message)),
        Some(v) if v.len() > max_len => errors.push(FieldError::new(
            field,
            format!("{field} is too long ({} chars, max {max_len})", v.len()),
        )),
        Some(_) => {}
    }
}

fn push_email(errors: &mut Vec<FieldError>, value: &str) {
    if value.len() > MAX_EMAIL_LEN || !value.validate_email() {
        errors.push(FieldError::new("email", "Please include a valid email"));
    }
}

fn push_mobile(errors: &mut Vec<FieldError>, value: &str) {
    if !is_all_digits(value) {
        errors.push(FieldError::new("mobile", "Mobile number must be numeric"));
    } else if value.len() > MAX_SHORT_TEXT_LEN {
        errors.push(FieldError::new("mobile", "Mobile number is too long"));
    }
}

/// Validate an employee create form: every field is required
pub fn validate_employee_create(form: &EmployeeForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    push_required(
        &mut errors,
        "name",
        form.name.as_deref(),
        "Name is required",
        MAX_NAME_LEN,
    );

    match form.email.as_deref() {
        None => errors.push(FieldError::new("email", "Please include a valid email")),
        Some(email) => push_email(&mut errors, email),
    }

    match form.mobile.as_deref() {
        None => errors.push(FieldError::new("mobile", "Mobile number is required")),
        Some(mobile) => push_mobile(&mut errors, mobile),
    }

    push_required(
        &mut errors,
        "designation",
        form.designation.as_deref(),
        "Designation is required",
        MAX_NAME_LEN,
    );
    push_required(
        &mut errors,
        "gender",
        form.gender.as_deref(),
        "Gender is required",
        MAX_SHORT_TEXT_LEN,
    );

    if form.course.iter().all(|c| c.trim().is_empty()) {
        errors.push(FieldError::new("course", "Course is required"));
    }

    errors
}

/// Validate an employee update form: only provided fields are checked
pub fn validate_employee_update(form: &EmployeeForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if form.name.is_some() {
        push_required(
            &mut errors,
            "name",
            form.name.as_deref(),
            "Name is required",
            MAX_NAME_LEN,
        );
    }
    if let Some(email) = form.email.as_deref() {
        push_email(&mut errors, email);
    }
    if let Some(mobile) = form.mobile.as_deref() {
        push_mobile(&mut errors, mobile);
    }
    if form.designation.is_some() {
        push_required(
            &mut errors,
            "designation",
            form.designation.as_deref(),
            "Designation is required",
            MAX_NAME_LEN,
        );
    }
    if form.gender.is_some() {
        push_required(
            &mut errors,
            "gender",
            form.gender.as_deref(),
            "Gender is required",
            MAX_SHORT_TEXT_LEN,
        );
    }
    if !form.course.is_empty() && form.course.iter().all(|c| c.trim().is_empty()) {
        errors.push(FieldError::new("course", "Course is required"));
    }

    errors
}

/// Validate a registration request
pub fn validate_registration(username: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();

    push_required(
        &mut errors,
        "username",
        Some(username),
        "Username is required",
        MAX_USERNAME_LEN,
    );
    push_required(
        &mut errors,
        "password",
        Some(password),
        "Password is required",
        MAX_PASSWORD_LEN,
    );

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> EmployeeForm {
        EmployeeForm {
            name: Some("Alice".into()),
            email: Some("alice@example.com".into()),
            mobile: Some("5551234567".into()),
            designation: Some("Engineer".into()),
            gender: Some("F".into()),
            course: vec!["MCA".into()],
        }
    }

    #[test]
    fn test_create_accepts_valid_form() {
        assert!(validate_employee_create(&valid_form()).is_empty());
    }

    #[test]
    fn test_create_collects_all_violations() {
        let form = EmployeeForm {
            name: None,
            email: Some("not-an-email".into()),
            mobile: Some("555-123".into()),
            designation: Some("".into()),
            gender: None,
            course: vec![],
        };
        let errors = validate_employee_create(&form);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["name", "email", "mobile", "designation", "gender", "course"]
        );
    }

    #[test]
    fn test_mobile_must_be_all_digits() {
        assert!(is_all_digits("0123456789"));
        assert!(!is_all_digits("123 456"));
        assert!(!is_all_digits("+34123456"));
        assert!(!is_all_digits(""));
    }

    #[test]
    fn test_update_skips_absent_fields() {
        let form = EmployeeForm {
            designation: Some("Manager".into()),
            ..Default::default()
        };
        assert!(validate_employee_update(&form).is_empty());
    }

    #[test]
    fn test_update_still_checks_provided_fields() {
        let form = EmployeeForm {
            email: Some("broken@".into()),
            mobile: Some("abc".into()),
            ..Default::default()
        };
        let errors = validate_employee_update(&form);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_registration_requires_both_fields() {
        let errors = validate_registration("", "");
        assert_eq!(errors.len(), 2);
        assert!(validate_registration("alice", "pw1").is_empty());
    }
}
