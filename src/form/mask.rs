//! Input masks for Brazilian documents and phone numbers
//!
//! Masks are applied progressively: partial input gets the punctuation
//! that precedes the digits typed so far, nothing after them.

const CPF_PATTERN: &str = "###.###.###-##";
const CNPJ_PATTERN: &str = "##.###.###/####-##";
const LANDLINE_PATTERN: &str = "(##) ####-####";
const MOBILE_PATTERN: &str = "(##) #####-####";

/// Strip everything except ASCII digits
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Fill `pattern` (`#` = digit slot) with the digits found in `input`.
/// Digits beyond the pattern's capacity are dropped.
pub fn apply_pattern(input: &str, pattern: &str) -> String {
    let mut digits = digits_only(input).into_bytes().into_iter().peekable();
    let mut out = String::with_capacity(pattern.len());
    for slot in pattern.chars() {
        if digits.peek().is_none() {
            break;
        }
        if slot == '#' {
            if let Some(d) = digits.next() {
                out.push(d as char);
            }
        } else {
            out.push(slot);
        }
    }
    out
}

pub fn mask_cpf(input: &str) -> String {
    apply_pattern(input, CPF_PATTERN)
}

pub fn mask_cnpj(input: &str) -> String {
    apply_pattern(input, CNPJ_PATTERN)
}

/// Phone with area code. Eleven digits take the mobile layout.
pub fn mask_phone(input: &str) -> String {
    let pattern = if digits_only(input).len() > 10 {
        MOBILE_PATTERN
    } else {
        LANDLINE_PATTERN
    };
    apply_pattern(input, pattern)
}
