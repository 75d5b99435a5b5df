//! Payload validation. Failures name the field and the violated constraint
//! and are surfaced before any store interaction.

use crate::error::AppError;
use crate::model::{CustomerCreate, CustomerReplace, WRITABLE_COLUMNS};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d{7,15}$").expect("phone pattern"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern"));

fn check_name(name: &str) -> Result<(), AppError> {
    if name.is_empty() {
        return Err(AppError::Validation("name must not be empty".into()));
    }
    Ok(())
}

fn check_phone(phone: &str) -> Result<(), AppError> {
    if !PHONE_RE.is_match(phone) {
        return Err(AppError::Validation(
            "phone must be 7-15 digits with optional + prefix".into(),
        ));
    }
    Ok(())
}

fn check_email(email: &str) -> Result<(), AppError> {
    if !EMAIL_RE.is_match(email) {
        return Err(AppError::Validation("email must be a valid email address".into()));
    }
    Ok(())
}

pub fn validate_create(payload: &CustomerCreate) -> Result<(), AppError> {
    check_name(&payload.name)?;
    if let Some(phone) = payload.phone.as_deref() {
        check_phone(phone)?;
    }
    if let Some(email) = payload.email.as_deref() {
        check_email(email)?;
    }
    Ok(())
}

/// Full-replace payload: absent fields become NULL, so `name` must be
/// present and non-empty to keep stored names non-null.
pub fn validate_replace(payload: &CustomerReplace) -> Result<(), AppError> {
    match payload.name.as_deref() {
        None => return Err(AppError::Validation("name is required".into())),
        Some(name) => check_name(name)?,
    }
    if let Some(phone) = payload.phone.as_deref() {
        check_phone(phone)?;
    }
    if let Some(email) = payload.email.as_deref() {
        check_email(email)?;
    }
    Ok(())
}

/// Extract and validate the present-field set of a PATCH body. Only fields
/// explicitly present overwrite; unknown keys are ignored, `id` is never
/// updatable. Returns (column, value) pairs, value None for explicit null.
pub fn patch_fields(body: &Value) -> Result<Vec<(String, Option<String>)>, AppError> {
    let map = body
        .as_object()
        .ok_or_else(|| AppError::Validation("body must be a JSON object".into()))?;
    let mut fields = Vec::new();
    for (key, value) in map {
        if !WRITABLE_COLUMNS.contains(&key.as_str()) {
            continue;
        }
        let value = match value {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            _ => {
                return Err(AppError::Validation(format!("{} must be a string", key)));
            }
        };
        match (key.as_str(), value.as_deref()) {
            ("name", None) => {
                return Err(AppError::Validation("name must not be empty".into()))
            }
            ("name", Some(name)) => check_name(name)?,
            ("phone", Some(phone)) => check_phone(phone)?,
            ("email", Some(email)) => check_email(email)?,
            _ => {}
        }
        fields.push((key.clone(), value));
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(name: &str, phone: Option<&str>, email: Option<&str>) -> CustomerCreate {
        CustomerCreate {
            name: name.into(),
            phone: phone.map(Into::into),
            email: email.map(Into::into),
            address: None,
            district: None,
        }
    }

    #[test]
    fn six_digit_phone_rejected_eight_digit_accepted() {
        assert!(validate_create(&create("Ana", Some("12345"), None)).is_err());
        assert!(validate_create(&create("Ana", Some("123456"), None)).is_err());
        assert!(validate_create(&create("Ana", Some("+12345678"), None)).is_ok());
        assert!(validate_create(&create("Ana", Some("1234567"), None)).is_ok());
        assert!(validate_create(&create("Ana", Some("1234567890123456"), None)).is_err());
        assert!(validate_create(&create("Ana", Some("+12-345-678"), None)).is_err());
    }

    #[test]
    fn email_syntax() {
        assert!(validate_create(&create("Ana", None, Some("ana@example.com"))).is_ok());
        assert!(validate_create(&create("Ana", None, Some("not-an-email"))).is_err());
        assert!(validate_create(&create("Ana", None, Some("a@b"))).is_err());
    }

    #[test]
    fn empty_name_rejected() {
        assert!(validate_create(&create("", None, None)).is_err());
    }

    #[test]
    fn replace_requires_name() {
        let payload = CustomerReplace::default();
        assert!(validate_replace(&payload).is_err());
        let payload = CustomerReplace {
            name: Some("Ana".into()),
            ..CustomerReplace::default()
        };
        assert!(validate_replace(&payload).is_ok());
    }

    #[test]
    fn patch_enumerates_present_fields_only() {
        let fields = patch_fields(&json!({
            "phone": "+12345678",
            "district": null,
            "id": 7,
            "unknown": "ignored"
        }))
        .unwrap();
        assert_eq!(
            fields,
            vec![
                ("district".to_string(), None),
                ("phone".to_string(), Some("+12345678".to_string())),
            ]
        );
    }

    #[test]
    fn patch_rejects_null_name_and_non_string_values() {
        assert!(patch_fields(&json!({ "name": null })).is_err());
        assert!(patch_fields(&json!({ "phone": 12345678 })).is_err());
        assert!(patch_fields(&json!(["not", "an", "object"])).is_err());
    }
}
