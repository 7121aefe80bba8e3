//! Validated form state
//!
//! A form is a fixed set of named fields, each holding a value, the error
//! text from its last validation, and the rule that produced it. Validation
//! only happens when asked for; editing a field merely clears its error.
//!
//! # Example
//!
//! ```rust
//! use booking_state::form::{rules, FormState};
//! use serde_json::json;
//!
//! let mut form = FormState::<()>::builder()
//!     .field("email", "", rules::email("E-mail obrigatório", "E-mail inválido"))
//!     .build()
//!     .unwrap();
//!
//! assert!(!form.validate_field("email", None).unwrap());
//! assert_eq!(form.error("email"), Some("E-mail obrigatório"));
//!
//! form.set_value("email", json!("user@test.com")).unwrap();
//! assert!(form.validate_field("email", None).unwrap());
//! ```

pub mod mask;
pub mod registration;
pub mod rules;

use crate::error::{Result, StateError};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Validation rule: returns an error message, or `None` when the value is valid.
///
/// `C` is the form's context type, passed through from the validation call.
pub type Validator<C> = Arc<dyn Fn(&Value, Option<&C>) -> Option<String> + Send + Sync>;

/// One named form input
pub struct Field<C> {
    value: Value,
    error: String,
    validate: Validator<C>,
}

impl<C> Field<C> {
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Last validation message, empty when valid
    pub fn error(&self) -> &str {
        &self.error
    }

    fn check(&self, context: Option<&C>) -> Option<String> {
        (self.validate)(&self.value, context)
    }
}

impl<C> fmt::Debug for Field<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("value", &self.value)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

/// Serializable view of a form for the host UI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSnapshot {
    pub values: BTreeMap<String, Value>,
    pub errors: BTreeMap<String, String>,
}

/// Form state manager.
///
/// Field names are fixed at build time. Operations naming a field that was
/// never declared return [`StateError::UnknownField`].
pub struct FormState<C = ()> {
    fields: BTreeMap<String, Field<C>>,
}

impl<C> fmt::Debug for FormState<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormState")
            .field("fields", &self.fields)
            .finish()
    }
}

impl<C> FormState<C> {
    pub fn builder() -> FormBuilder<C> {
        FormBuilder::new()
    }

    fn field_mut(&mut self, name: &str) -> Result<&mut Field<C>> {
        self.fields
            .get_mut(name)
            .ok_or_else(|| StateError::UnknownField(name.to_string()))
    }

    /// Replace a field's value.
    ///
    /// Clears the field's error without re-validating, so a field edited
    /// back into an invalid state reads as error-free until validated again.
    pub fn set_value(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let field = self.field_mut(name)?;
        field.value = value.into();
        field.error.clear();
        Ok(())
    }

    /// Validate a single field, returning whether it is valid.
    pub fn validate_field(&mut self, name: &str, context: Option<&C>) -> Result<bool> {
        let field = self.field_mut(name)?;
        match field.check(context) {
            Some(message) => {
                field.error = message;
                Ok(false)
            }
            None => {
                field.error.clear();
                Ok(true)
            }
        }
    }

    /// Validate every field against the same context.
    ///
    /// All errors are computed before any is stored, then applied together.
    /// Returns `true` only when every field is valid.
    pub fn validate_form(&mut self, context: Option<&C>) -> bool {
        let results: Vec<(String, Option<String>)> = self
            .fields
            .iter()
            .map(|(name, field)| (name.clone(), field.check(context)))
            .collect();

        let mut valid = true;
        for (name, outcome) in results {
            valid &= outcome.is_none();
            if let Some(field) = self.fields.get_mut(&name) {
                field.error = outcome.unwrap_or_default();
            }
        }
        valid
    }

    /// Set every error to empty. Values are untouched.
    pub fn clear_errors(&mut self) {
        for field in self.fields.values_mut() {
            field.error.clear();
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field<C>> {
        self.fields.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).map(Field::value)
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(Field::error)
    }

    /// Field names in stable order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        self.fields.values().any(|f| !f.error.is_empty())
    }

    /// Non-empty errors keyed by field name
    pub fn errors(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .filter(|(_, f)| !f.error.is_empty())
            .map(|(name, f)| (name.clone(), f.error.clone()))
            .collect()
    }

    /// All values as a JSON object, ready to send as a request payload
    pub fn values(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, f)| (name.clone(), f.value.clone()))
            .collect();
        Value::Object(map)
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            values: self
                .fields
                .iter()
                .map(|(name, f)| (name.clone(), f.value.clone()))
                .collect(),
            errors: self
                .fields
                .iter()
                .map(|(name, f)| (name.clone(), f.error.clone()))
                .collect(),
        }
    }
}

/// Builder declaring a form's fields, initial values and rules
pub struct FormBuilder<C> {
    fields: Vec<(String, Value, Validator<C>)>,
}

impl<C> FormBuilder<C> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn field(
        mut self,
        name: impl Into<String>,
        initial: impl Into<Value>,
        validate: Validator<C>,
    ) -> Self {
        self.fields.push((name.into(), initial.into(), validate));
        self
    }

    /// Build the form. Declaring the same name twice is an error.
    pub fn build(self) -> Result<FormState<C>> {
        let mut fields = BTreeMap::new();
        for (name, value, validate) in self.fields {
            if fields.contains_key(&name) {
                return Err(StateError::DuplicateField(name));
            }
            fields.insert(
                name,
                Field {
                    value,
                    error: String::new(),
                    validate,
                },
            );
        }
        Ok(FormState { fields })
    }
}

impl<C> Default for FormBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn two_field_form() -> FormState {
        FormState::builder()
            .field("email", "", rules::email("E-mail obrigatório", "E-mail inválido"))
            .field("name", "", rules::required("Nome obrigatório"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_set_value_clears_existing_error() {
        let mut form = two_field_form();
        assert!(!form.validate_field("name", None).unwrap());
        assert_eq!(form.error("name"), Some("Nome obrigatório"));

        // Still invalid, but edits clear the error until the next validation
        form.set_value("name", "").unwrap();
        assert_eq!(form.error("name"), Some(""));
        assert!(!form.validate_field("name", None).unwrap());
        assert_eq!(form.error("name"), Some("Nome obrigatório"));
    }

    #[test]
    fn test_email_round_trip() {
        let mut form = two_field_form();
        form.set_value("email", "").unwrap();
        assert!(!form.validate_field("email", None).unwrap());
        assert_eq!(form.error("email"), Some("E-mail obrigatório"));

        form.set_value("email", "user@test.com").unwrap();
        assert!(form.validate_field("email", None).unwrap());
        assert_eq!(form.error("email"), Some(""));
    }

    #[test]
    fn test_validate_field_touches_only_that_field() {
        let mut form = two_field_form();
        form.validate_field("email", None).unwrap();
        assert_eq!(form.error("name"), Some(""));
    }

    #[test]
    fn test_validate_form_reports_every_failure() {
        let mut form = two_field_form();
        assert!(!form.validate_form(None));
        assert_eq!(form.error("email"), Some("E-mail obrigatório"));
        assert_eq!(form.error("name"), Some("Nome obrigatório"));
        assert_eq!(form.errors().len(), 2);
    }

    #[test]
    fn test_validate_form_is_deterministic() {
        let mut form = two_field_form();
        form.set_value("email", "broken").unwrap();
        let first = (form.validate_form(None), form.snapshot());
        let second = (form.validate_form(None), form.snapshot());
        assert_eq!(first, second);
    }

    #[test]
    fn test_clear_errors_is_idempotent() {
        let mut form = two_field_form();
        form.set_value("email", "kept").unwrap();
        form.validate_form(None);
        assert!(form.has_errors());

        form.clear_errors();
        let once = form.snapshot();
        form.clear_errors();
        assert_eq!(form.snapshot(), once);
        assert!(once.errors.values().all(String::is_empty));
        assert_eq!(form.value("email"), Some(&json!("kept")));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut form = two_field_form();
        assert!(matches!(
            form.set_value("phone", "1"),
            Err(StateError::UnknownField(name)) if name == "phone"
        ));
        assert!(form.validate_field("phone", None).is_err());
        assert!(form.field("phone").is_none());
    }

    #[test]
    fn test_duplicate_field_is_rejected() {
        let result = FormState::<()>::builder()
            .field("name", "", rules::required("a"))
            .field("name", "", rules::required("b"))
            .build();
        assert!(matches!(result, Err(StateError::DuplicateField(_))));
    }

    #[test]
    fn test_empty_message_still_fails_both_paths() {
        let mut form = FormState::<()>::builder()
            .field("terms", false, Arc::new(|_: &Value, _: Option<&()>| Some(String::new())))
            .build()
            .unwrap();

        assert!(!form.validate_field("terms", None).unwrap());
        assert!(!form.validate_form(None));
        assert_eq!(form.error("terms"), Some(""));
    }

    #[test]
    fn test_values_payload() {
        let mut form = two_field_form();
        form.set_value("email", "user@test.com").unwrap();
        form.set_value("name", "Ana").unwrap();
        assert_eq!(
            form.values(),
            json!({"email": "user@test.com", "name": "Ana"})
        );
    }
}
