//! Sign-up form for clients and enterprises

use super::{rules, FormState};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Kind of account being registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    #[default]
    Individual,
    Enterprise,
}

/// Context threaded through registration validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegistrationContext {
    #[serde(rename = "type")]
    pub account_type: AccountType,
}

impl RegistrationContext {
    pub fn new(account_type: AccountType) -> Self {
        Self { account_type }
    }

    pub fn is_enterprise(&self) -> bool {
        self.account_type == AccountType::Enterprise
    }
}

pub const NAME: &str = "name";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";
pub const CNPJ: &str = "cnpj";

/// Build an empty registration form.
///
/// `cnpj` is only checked when validated with an enterprise context.
pub fn registration_form() -> Result<FormState<RegistrationContext>> {
    FormState::builder()
        .field(NAME, "", rules::required("Nome obrigatório"))
        .field(EMAIL, "", rules::email("E-mail obrigatório", "E-mail inválido"))
        .field(
            PHONE,
            "",
            rules::all(vec![
                rules::required("Telefone obrigatório"),
                rules::digit_count(10, 11, "Telefone inválido"),
            ]),
        )
        .field(
            CNPJ,
            "",
            rules::when(
                RegistrationContext::is_enterprise,
                rules::all(vec![
                    rules::required("CNPJ obrigatório"),
                    rules::digit_count(14, 14, "CNPJ inválido"),
                ]),
            ),
        )
        .build()
}
