//! Form state behaviour through the public API

use booking_state::form::registration::{
    registration_form, AccountType, RegistrationContext, CNPJ, EMAIL, NAME, PHONE,
};
use booking_state::form::{mask, rules};
use booking_state::{FormState, StateError};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Booking {
    Remote,
    InPerson,
}

fn booking_form() -> FormState<Booking> {
    FormState::builder()
        .field("date", "", rules::required("Data obrigatória"))
        .field(
            "address",
            "",
            rules::when(
                |mode: &Booking| *mode == Booking::InPerson,
                rules::required("Endereço obrigatório"),
            ),
        )
        .field("notes", "", rules::min_length(5, "Descreva melhor"))
        .build()
        .expect("valid form definition")
}

#[test]
fn test_clear_errors_twice_equals_once() {
    let mut form = booking_form();
    form.validate_form(Some(&Booking::InPerson));
    assert!(form.has_errors());

    form.clear_errors();
    let after_one = form.snapshot();
    form.clear_errors();
    assert_eq!(form.snapshot(), after_one);
    assert!(form.errors().is_empty());
}

#[test]
fn test_validate_form_sets_all_errors_in_one_call() {
    let mut form = booking_form();
    assert!(!form.validate_form(Some(&Booking::InPerson)));
    assert_eq!(form.error("date"), Some("Data obrigatória"));
    assert_eq!(form.error("address"), Some("Endereço obrigatório"));
    // Blank notes are allowed, only short ones are rejected
    assert_eq!(form.error("notes"), Some(""));
}

#[test]
fn test_context_changes_outcome() {
    let mut form = booking_form();
    form.set_value("date", "2026-10-20").unwrap();

    assert!(form.validate_form(Some(&Booking::Remote)));
    assert!(!form.validate_form(Some(&Booking::InPerson)));

    form.set_value("address", "Rua A, 100").unwrap();
    assert!(form.validate_form(Some(&Booking::InPerson)));
}

#[test]
fn test_fixing_one_field_leaves_others_untouched() {
    let mut form = booking_form();
    form.validate_form(Some(&Booking::InPerson));

    form.set_value("date", "2026-10-20").unwrap();
    assert_eq!(form.error("date"), Some(""));
    assert_eq!(form.error("address"), Some("Endereço obrigatório"));

    assert!(form.validate_field("date", Some(&Booking::InPerson)).unwrap());
    assert_eq!(form.error("address"), Some("Endereço obrigatório"));
}

#[test]
fn test_registration_enterprise_flow() {
    let mut form = registration_form().unwrap();
    let enterprise = RegistrationContext::new(AccountType::Enterprise);

    form.set_value(NAME, "Acme Libras").unwrap();
    form.set_value(EMAIL, "contato@acme.com").unwrap();
    form.set_value(PHONE, mask::mask_phone("11987654321")).unwrap();

    assert!(!form.validate_form(Some(&enterprise)));
    assert_eq!(form.error(CNPJ), Some("CNPJ obrigatório"));

    form.set_value(CNPJ, "12345678901234").unwrap();
    assert!(form.validate_form(Some(&enterprise)));

    // Masked input validates the same as raw digits
    form.set_value(CNPJ, mask::mask_cnpj("12345678901234")).unwrap();
    assert!(form.validate_form(Some(&enterprise)));

    assert_eq!(
        form.values(),
        json!({
            "cnpj": "12.345.678/9012-34",
            "email": "contato@acme.com",
            "name": "Acme Libras",
            "phone": "(11) 98765-4321",
        })
    );
}

#[test]
fn test_unknown_field_errors_instead_of_panicking() {
    let mut form = registration_form().unwrap();
    let err = form.set_value("cpf", "123").unwrap_err();
    assert!(matches!(err, StateError::UnknownField(ref name) if name == "cpf"));
    assert_eq!(err.to_string(), "Unknown form field: cpf");
}

#[test]
fn test_snapshot_serializes_for_host() {
    let mut form = registration_form().unwrap();
    form.validate_field(NAME, None).unwrap();
    let snapshot = serde_json::to_value(form.snapshot()).unwrap();
    assert_eq!(snapshot["errors"]["name"], "Nome obrigatório");
    assert_eq!(snapshot["errors"]["email"], "");
    assert_eq!(snapshot["values"]["phone"], "");
}
