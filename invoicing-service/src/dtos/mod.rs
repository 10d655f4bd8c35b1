//! Form payloads and their validation.

pub mod auth;
pub mod invoice;

use std::collections::BTreeMap;
use validator::ValidationErrors;

pub use auth::CredentialsForm;
pub use invoice::{validate_invoice, ActionState, InvoiceForm, InvoiceInput, ValidatedInvoice};

/// Field name (as posted by the form) to human-readable messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Flatten validator output into per-field message lists, keyed by form field name.
pub fn flatten_field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut flattened = FieldErrors::new();
    for (field, field_errors) in errors.field_errors() {
        let messages = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", e.code))
            })
            .collect::<Vec<_>>();
        flattened
            .entry(form_field_name(&field.to_string()))
            .or_default()
            .extend(messages);
    }
    flattened
}

/// `customer_id` -> `customerId`.
fn form_field_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
