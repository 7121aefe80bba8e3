//! Reusable validation rules
//!
//! Each constructor returns a [`Validator`]. Format rules (`email` aside)
//! accept blank values so they can be combined with [`required`] through
//! [`all`] without reporting two messages for one empty input.

use super::mask::digits_only;
use super::Validator;
use serde_json::Value;
use std::sync::Arc;

/// Whether a value counts as "not filled in"
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reject blank values
pub fn required<C: 'static>(message: impl Into<String>) -> Validator<C> {
    let message = message.into();
    Arc::new(move |value: &Value, _: Option<&C>| is_blank(value).then(|| message.clone()))
}

/// Require a plausible e-mail address: `local@domain.tld`, no whitespace
pub fn email<C: 'static>(
    required_message: impl Into<String>,
    invalid_message: impl Into<String>,
) -> Validator<C> {
    let required_message = required_message.into();
    let invalid_message = invalid_message.into();
    Arc::new(move |value: &Value, _: Option<&C>| {
        if is_blank(value) {
            return Some(required_message.clone());
        }
        let valid = text(value).map_or(false, |s| looks_like_email(&s));
        (!valid).then(|| invalid_message.clone())
    })
}

fn looks_like_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Require at least `min` characters (after trimming)
pub fn min_length<C: 'static>(min: usize, message: impl Into<String>) -> Validator<C> {
    let message = message.into();
    Arc::new(move |value: &Value, _: Option<&C>| {
        if is_blank(value) {
            return None;
        }
        let len = text(value).map_or(0, |s| s.chars().count());
        (len < min).then(|| message.clone())
    })
}

/// Require between `min` and `max` digits, ignoring mask punctuation
pub fn digit_count<C: 'static>(
    min: usize,
    max: usize,
    message: impl Into<String>,
) -> Validator<C> {
    let message = message.into();
    Arc::new(move |value: &Value, _: Option<&C>| {
        if is_blank(value) {
            return None;
        }
        let digits = text(value).map_or(0, |s| digits_only(&s).len());
        (!(min..=max).contains(&digits)).then(|| message.clone())
    })
}

/// Apply `inner` only when a context is given and `applies` accepts it
pub fn when<C, P>(applies: P, inner: Validator<C>) -> Validator<C>
where
    C: 'static,
    P: Fn(&C) -> bool + Send + Sync + 'static,
{
    Arc::new(move |value: &Value, context: Option<&C>| match context {
        Some(ctx) if applies(ctx) => inner(value, context),
        _ => None,
    })
}

/// Run rules in order and report the first failure
pub fn all<C: 'static>(rules: Vec<Validator<C>>) -> Validator<C> {
    Arc::new(move |value: &Value, context: Option<&C>| {
        rules.iter().find_map(|rule| rule(value, context))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required() {
        let rule = required::<()>("obrigatório");
        assert_eq!(rule(&json!(""), None).as_deref(), Some("obrigatório"));
        assert_eq!(rule(&json!("   "), None).as_deref(), Some("obrigatório"));
        assert_eq!(rule(&Value::Null, None).as_deref(), Some("obrigatório"));
        assert_eq!(rule(&json!([]), None).as_deref(), Some("obrigatório"));
        assert_eq!(rule(&json!("x"), None), None);
        assert_eq!(rule(&json!(false), None), None);
    }

    #[test]
    fn test_email() {
        let rule = email::<()>("E-mail obrigatório", "E-mail inválido");
        assert_eq!(rule(&json!(""), None).as_deref(), Some("E-mail obrigatório"));
        assert_eq!(rule(&json!("user.test.com"), None).as_deref(), Some("E-mail inválido"));
        assert_eq!(rule(&json!("@test.com"), None).as_deref(), Some("E-mail inválido"));
        assert_eq!(rule(&json!("user@test"), None).as_deref(), Some("E-mail inválido"));
        assert_eq!(rule(&json!("us er@test.com"), None).as_deref(), Some("E-mail inválido"));
        assert_eq!(rule(&json!("user@test.com"), None), None);
        assert_eq!(rule(&json!(" user@test.com "), None), None);
    }

    #[test]
    fn test_min_length_skips_blank() {
        let rule = min_length::<()>(6, "curta");
        assert_eq!(rule(&json!(""), None), None);
        assert_eq!(rule(&json!("abc"), None).as_deref(), Some("curta"));
        assert_eq!(rule(&json!("abcdef"), None), None);
    }

    #[test]
    fn test_digit_count_ignores_mask() {
        let rule = digit_count::<()>(10, 11, "Telefone inválido");
        assert_eq!(rule(&json!("(11) 98765-4321"), None), None);
        assert_eq!(rule(&json!("(11) 3456-7890"), None), None);
        assert_eq!(rule(&json!("(11) 3456"), None).as_deref(), Some("Telefone inválido"));
        assert_eq!(rule(&json!(""), None), None);
    }

    #[test]
    fn test_when_needs_matching_context() {
        let rule = when(|enterprise: &bool| *enterprise, required("CNPJ obrigatório"));
        assert_eq!(rule(&json!(""), None), None);
        assert_eq!(rule(&json!(""), Some(&false)), None);
        assert_eq!(rule(&json!(""), Some(&true)).as_deref(), Some("CNPJ obrigatório"));
    }

    #[test]
    fn test_all_reports_first_failure() {
        let rule = all::<()>(vec![required("obrigatório"), min_length(3, "curta")]);
        assert_eq!(rule(&json!(""), None).as_deref(), Some("obrigatório"));
        assert_eq!(rule(&json!("ab"), None).as_deref(), Some("curta"));
        assert_eq!(rule(&json!("abc"), None), None);
    }
}
