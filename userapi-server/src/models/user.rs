//! User creation input
//!
//! The create body is parsed leniently: every field arrives as raw JSON and
//! is narrowed here. Non-string values are stored as their JSON text, and
//! `name`/`email` count as missing when null, `false`, `0` or empty.

use serde::Deserialize;
use serde_json::Value;

use super::ValidationError;

/// Raw create-user body
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateUserRequest {
    pub name: Option<Value>,
    pub email: Option<Value>,
    pub department: Option<Value>,
}

/// Validated input for inserting a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
    email: String,
    department: Option<String>,
}

impl NewUser {
    /// Build a new user, requiring non-empty `name` and `email`.
    ///
    /// # Example
    /// ```
    /// use userapi_server::models::NewUser;
    ///
    /// assert!(NewUser::new("Ann", "ann@x.com", Some("Eng")).is_ok());
    /// assert!(NewUser::new("", "ann@x.com", None).is_err());
    /// ```
    pub fn new(
        name: &str,
        email: &str,
        department: Option<&str>,
    ) -> Result<Self, ValidationError> {
        if name.is_empty() || email.is_empty() {
            return Err(ValidationError::Required {
                fields: "Name and email",
            });
        }

        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
            department: department.map(str::to_owned),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = ValidationError;

    fn try_from(req: CreateUserRequest) -> Result<Self, Self::Error> {
        let name = req.name.as_ref().and_then(present_text).unwrap_or_default();
        let email = req.email.as_ref().and_then(present_text).unwrap_or_default();
        let department = req.department.as_ref().and_then(stored_text);

        Self::new(&name, &email, department.as_deref())
    }
}

/// Text for a field that must be present; falsy values read as absent.
fn present_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        _ => stored_text(value),
    }
}

/// Text stored for an optional field; only null is absent.
fn stored_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> CreateUserRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn accepts_full_body() {
        let user = NewUser::try_from(request(json!({
            "name": "Ann",
            "email": "ann@x.com",
            "department": "Eng"
        })))
        .unwrap();

        assert_eq!(user.name(), "Ann");
        assert_eq!(user.email(), "ann@x.com");
        assert_eq!(user.department(), Some("Eng"));
    }

    #[test]
    fn department_is_optional() {
        let user =
            NewUser::try_from(request(json!({"name": "Bo", "email": "bo@x.com"}))).unwrap();
        assert_eq!(user.department(), None);
    }

    #[test]
    fn rejects_missing_name() {
        let err = NewUser::try_from(request(json!({"email": "bo@x.com"}))).unwrap_err();
        assert!(matches!(err, ValidationError::Required { .. }));
    }

    #[test]
    fn rejects_empty_email() {
        let err =
            NewUser::try_from(request(json!({"name": "Bo", "email": ""}))).unwrap_err();
        assert_eq!(err.to_string(), "Name and email are required");
    }

    #[test]
    fn numeric_name_is_stored_as_text() {
        let user =
            NewUser::try_from(request(json!({"name": 42, "email": "bo@x.com"}))).unwrap();
        assert_eq!(user.name(), "42");
    }

    #[test]
    fn falsy_name_counts_as_missing() {
        for name in [json!(0), json!(false), json!(null), json!("")] {
            let err = NewUser::try_from(request(json!({"name": name, "email": "bo@x.com"})))
                .unwrap_err();
            assert!(matches!(err, ValidationError::Required { .. }));
        }
    }

    #[test]
    fn non_string_department_is_stored_as_text() {
        let user = NewUser::try_from(request(json!({
            "name": "Bo",
            "email": "bo@x.com",
            "department": 42
        })))
        .unwrap();
        assert_eq!(user.department(), Some("42"));

        let user = NewUser::try_from(request(json!({
            "name": "Bo",
            "email": "bo@x.com",
            "department": true
        })))
        .unwrap();
        assert_eq!(user.department(), Some("true"));
    }

    #[test]
    fn null_department_is_absent() {
        let user = NewUser::try_from(request(json!({
            "name": "Bo",
            "email": "bo@x.com",
            "department": null
        })))
        .unwrap();
        assert_eq!(user.department(), None);
    }

    #[test]
    fn empty_request_is_invalid() {
        assert!(NewUser::try_from(CreateUserRequest::default()).is_err());
    }
}
