use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

use super::{flatten_field_errors, FieldErrors};
use crate::models::InvoiceStatus;

pub const CUSTOMER_REQUIRED: &str = "Please select a customer.";
pub const AMOUNT_NOT_POSITIVE: &str = "Please enter an amount greater than $0.";
pub const AMOUNT_TOO_LARGE: &str = "Please enter a smaller amount.";
pub const STATUS_REQUIRED: &str = "Please select an invoice status.";

/// Invoice form fields exactly as posted. Every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceForm {
    pub customer_id: Option<String>,
    pub amount: Option<String>,
    pub status: Option<String>,
}

/// Coerced invoice fields with their constraints.
#[derive(Debug, Clone, Validate)]
pub struct InvoiceInput {
    #[validate(length(min = 1, message = "Please select a customer."))]
    pub customer_id: String,

    #[validate(range(exclusive_min = 0.0, message = "Please enter an amount greater than $0."))]
    pub amount: f64,

    #[validate(required(message = "Please select an invoice status."))]
    pub status: Option<InvoiceStatus>,

    amount_exact: PostedAmount,
}

/// Amount as posted, before conversion to cents.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PostedAmount {
    Exact(Decimal),
    /// Numeric, but beyond what `Decimal` can hold.
    OutOfRange(f64),
    Invalid,
}

impl PostedAmount {
    fn as_f64(self) -> f64 {
        match self {
            PostedAmount::Exact(d) => d.to_f64().unwrap_or(0.0),
            PostedAmount::OutOfRange(v) => v,
            PostedAmount::Invalid => 0.0,
        }
    }
}

impl From<&InvoiceForm> for InvoiceInput {
    fn from(form: &InvoiceForm) -> Self {
        let amount_exact = form
            .amount
            .as_deref()
            .map(parse_amount)
            .unwrap_or(PostedAmount::Invalid);

        Self {
            customer_id: form.customer_id.clone().unwrap_or_default(),
            amount: amount_exact.as_f64(),
            status: form.status.as_deref().and_then(InvoiceStatus::parse),
            amount_exact,
        }
    }
}

/// Decimal string such as `"49.99"` or `" 10 "`. Scientific notation is accepted.
fn parse_amount(raw: &str) -> PostedAmount {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return PostedAmount::Invalid;
    }
    if let Ok(exact) = Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed)) {
        return PostedAmount::Exact(exact);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v.abs() >= 1.0 => PostedAmount::OutOfRange(v),
        // Too many fractional digits to hold; far below one cent either way.
        Ok(v) if v.is_finite() => PostedAmount::Exact(Decimal::ZERO),
        _ => PostedAmount::Invalid,
    }
}

/// Invoice fields that passed validation, amount converted to cents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInvoice {
    pub customer_id: String,
    pub amount_in_cents: i64,
    pub status: InvoiceStatus,
}

fn amount_error(message: &str) -> FieldErrors {
    FieldErrors::from([("amount".to_string(), vec![message.to_string()])])
}

/// Whole cents, rounded half away from zero.
fn to_cents(amount: PostedAmount) -> Result<i64, FieldErrors> {
    let exact = match amount {
        PostedAmount::Exact(exact) => exact,
        PostedAmount::OutOfRange(_) => return Err(amount_error(AMOUNT_TOO_LARGE)),
        PostedAmount::Invalid => return Err(amount_error(AMOUNT_NOT_POSITIVE)),
    };

    let cents = exact
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|c| c.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|c| c.to_i64())
        .ok_or_else(|| amount_error(AMOUNT_TOO_LARGE))?;

    // Positive amounts under half a cent round to nothing.
    if cents <= 0 {
        return Err(amount_error(AMOUNT_NOT_POSITIVE));
    }
    Ok(cents)
}

/// Validate a posted invoice form; on failure returns messages per form field.
pub fn validate_invoice(form: &InvoiceForm) -> Result<ValidatedInvoice, FieldErrors> {
    let input = InvoiceInput::from(form);
    input
        .validate()
        .map_err(|errors| flatten_field_errors(&errors))?;

    let amount_in_cents = to_cents(input.amount_exact)?;

    match input.status {
        Some(status) => Ok(ValidatedInvoice {
            customer_id: input.customer_id,
            amount_in_cents,
            status,
        }),
        None => Err(FieldErrors::from([(
            "status".to_string(),
            vec![STATUS_REQUIRED.to_string()],
        )])),
    }
}

/// State handed back to the form after a failed action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActionState {
    #[serde(skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,
    pub message: Option<String>,
}

impl ActionState {
    pub fn invalid(errors: FieldErrors, message: impl Into<String>) -> Self {
        Self {
            errors,
            message: Some(message.into()),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            errors: FieldErrors::new(),
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(customer_id: Option<&str>, amount: Option<&str>, status: Option<&str>) -> InvoiceForm {
        InvoiceForm {
            customer_id: customer_id.map(str::to_string),
            amount: amount.map(str::to_string),
            status: status.map(str::to_string),
        }
    }

    #[test]
    fn valid_form_converts_amount_to_cents() {
        let validated = validate_invoice(&form(Some("c1"), Some("49.99"), Some("pending")))
            .expect("form should validate");

        assert_eq!(
            validated,
            ValidatedInvoice {
                customer_id: "c1".to_string(),
                amount_in_cents: 4999,
                status: InvoiceStatus::Pending,
            }
        );
    }

    #[test]
    fn whole_amounts_and_whitespace_are_accepted() {
        let validated = validate_invoice(&form(Some("c1"), Some(" 10 "), Some("paid"))).unwrap();
        assert_eq!(validated.amount_in_cents, 1000);
        assert_eq!(validated.status, InvoiceStatus::Paid);
    }

    #[test]
    fn sub_cent_amounts_round_to_nearest_cent() {
        let validated = validate_invoice(&form(Some("c1"), Some("0.005"), Some("paid"))).unwrap();
        assert_eq!(validated.amount_in_cents, 1);
    }

    #[test]
    fn empty_customer_is_rejected() {
        let errors = validate_invoice(&form(Some(""), Some("10"), Some("paid"))).unwrap_err();

        assert_eq!(
            errors,
            FieldErrors::from([(
                "customerId".to_string(),
                vec![CUSTOMER_REQUIRED.to_string()]
            )])
        );
    }

    #[test]
    fn missing_customer_is_rejected() {
        let errors = validate_invoice(&form(None, Some("10"), Some("paid"))).unwrap_err();
        assert_eq!(errors["customerId"], vec![CUSTOMER_REQUIRED.to_string()]);
    }

    #[test]
    fn non_positive_and_non_numeric_amounts_are_rejected() {
        for amount in [Some("0"), Some("-5"), Some("abc"), Some(""), Some("NaN"), None] {
            let errors = validate_invoice(&form(Some("c1"), amount, Some("paid"))).unwrap_err();
            assert_eq!(
                errors.get("amount"),
                Some(&vec![AMOUNT_NOT_POSITIVE.to_string()]),
                "amount {:?} should be rejected",
                amount
            );
        }
    }

    #[test]
    fn amounts_that_round_to_zero_cents_are_rejected() {
        for amount in ["0.004", "0.001", "0.0049", "1e-40"] {
            let errors = validate_invoice(&form(Some("c1"), Some(amount), Some("paid"))).unwrap_err();
            assert_eq!(
                errors.get("amount"),
                Some(&vec![AMOUNT_NOT_POSITIVE.to_string()]),
                "amount {:?} should be rejected",
                amount
            );
        }
    }

    #[test]
    fn status_outside_enumeration_is_rejected() {
        for status in [Some("overdue"), Some("PAID"), Some(""), None] {
            let errors = validate_invoice(&form(Some("c1"), Some("10"), status)).unwrap_err();
            assert_eq!(
                errors.get("status"),
                Some(&vec![STATUS_REQUIRED.to_string()]),
                "status {:?} should be rejected",
                status
            );
        }
    }

    #[test]
    fn every_invalid_field_is_reported() {
        let errors = validate_invoice(&InvoiceForm::default()).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains_key("customerId"));
        assert!(errors.contains_key("amount"));
        assert!(errors.contains_key("status"));
    }

    #[test]
    fn huge_amounts_are_rejected() {
        let errors =
            validate_invoice(&form(Some("c1"), Some("90000000000000000000"), Some("paid"))).unwrap_err();
        assert_eq!(errors["amount"], vec![AMOUNT_TOO_LARGE.to_string()]);
    }

    #[test]
    fn amounts_beyond_decimal_range_are_too_large() {
        for amount in ["1e30", "79228162514264337593543950335"] {
            let errors = validate_invoice(&form(Some("c1"), Some(amount), Some("paid"))).unwrap_err();
            assert_eq!(
                errors["amount"],
                vec![AMOUNT_TOO_LARGE.to_string()],
                "amount {:?} should be too large",
                amount
            );
        }
    }

    #[test]
    fn negative_amounts_beyond_decimal_range_are_not_positive() {
        let errors = validate_invoice(&form(Some("c1"), Some("-1e30"), Some("paid"))).unwrap_err();
        assert_eq!(errors["amount"], vec![AMOUNT_NOT_POSITIVE.to_string()]);
    }

    #[test]
    fn action_state_serializes_without_empty_errors() {
        let json = serde_json::to_value(ActionState::message("Deleted Invoice.")).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "Deleted Invoice." }));
    }
}
