//! Invoice form actions: validate, write, then hand navigation back to the caller.

use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::dtos::{validate_invoice, ActionState, InvoiceForm};
use crate::models::{CreateInvoice, UpdateInvoice};
use crate::services::metrics::INVOICE_MUTATIONS_TOTAL;
use crate::services::store::InvoiceStore;

/// The invoice listing view; stale after every successful mutation.
pub const INVOICES_PATH: &str = "/dashboard/invoices";

pub const CREATE_MISSING_FIELDS: &str = "Missing Fields. Failed to Create Invoice.";
pub const UPDATE_MISSING_FIELDS: &str = "Missing Fields. Failed to Update Invoice.";
pub const CREATE_DATABASE_ERROR: &str = "Database Error: Failed to Create Invoice";
pub const UPDATE_DATABASE_ERROR: &str = "Database Error: Failed to Update Invoice.";
pub const DELETE_DATABASE_ERROR: &str = "Database Error: Failed to Delete Invoice.";
pub const DELETED_MESSAGE: &str = "Deleted Invoice.";

/// Where to go after a successful write, and which cached view is now stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub revalidate: &'static str,
    pub redirect_to: &'static str,
    pub message: Option<&'static str>,
}

impl Navigation {
    fn to_invoices(message: Option<&'static str>) -> Self {
        Self {
            revalidate: INVOICES_PATH,
            redirect_to: INVOICES_PATH,
            message,
        }
    }
}

/// Result of an invoice action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Input failed validation; nothing was written.
    ValidationFailed(ActionState),
    /// The store rejected the write; only a generic message is exposed.
    StoreFailed(ActionState),
    /// The write went through.
    Completed(Navigation),
}

impl ActionOutcome {
    fn label(&self) -> &'static str {
        match self {
            ActionOutcome::ValidationFailed(_) => "validation_failed",
            ActionOutcome::StoreFailed(_) => "store_failed",
            ActionOutcome::Completed(_) => "completed",
        }
    }
}

#[derive(Clone)]
pub struct InvoiceActions {
    store: Arc<dyn InvoiceStore>,
    today: fn() -> NaiveDate,
}

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

impl InvoiceActions {
    pub fn new(store: Arc<dyn InvoiceStore>) -> Self {
        Self {
            store,
            today: utc_today,
        }
    }

    /// Override the date source used to stamp new invoices.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub async fn create(&self, form: &InvoiceForm) -> ActionOutcome {
        let outcome = self.create_inner(form).await;
        record("create", &outcome);
        outcome
    }

    async fn create_inner(&self, form: &InvoiceForm) -> ActionOutcome {
        let validated = match validate_invoice(form) {
            Ok(v) => v,
            Err(errors) => {
                return ActionOutcome::ValidationFailed(ActionState::invalid(
                    errors,
                    CREATE_MISSING_FIELDS,
                ))
            }
        };

        let input = CreateInvoice {
            id: Uuid::new_v4(),
            customer_id: validated.customer_id,
            amount: validated.amount_in_cents,
            status: validated.status,
            date: (self.today)(),
        };

        if let Err(e) = self.store.insert_invoice(&input).await {
            tracing::error!(error = %e, "Failed to create invoice");
            return ActionOutcome::StoreFailed(ActionState::message(CREATE_DATABASE_ERROR));
        }

        tracing::info!(invoice_id = %input.id, "Invoice created");
        ActionOutcome::Completed(Navigation::to_invoices(None))
    }

    pub async fn update(&self, id: Uuid, form: &InvoiceForm) -> ActionOutcome {
        let outcome = self.update_inner(id, form).await;
        record("update", &outcome);
        outcome
    }

    async fn update_inner(&self, id: Uuid, form: &InvoiceForm) -> ActionOutcome {
        let validated = match validate_invoice(form) {
            Ok(v) => v,
            Err(errors) => {
                return ActionOutcome::ValidationFailed(ActionState::invalid(
                    errors,
                    UPDATE_MISSING_FIELDS,
                ))
            }
        };

        let input = UpdateInvoice {
            customer_id: validated.customer_id,
            amount: validated.amount_in_cents,
            status: validated.status,
        };

        match self.store.update_invoice(id, &input).await {
            Ok(rows) => {
                tracing::info!(invoice_id = %id, rows, "Invoice updated");
                ActionOutcome::Completed(Navigation::to_invoices(None))
            }
            Err(e) => {
                tracing::error!(invoice_id = %id, error = %e, "Failed to update invoice");
                ActionOutcome::StoreFailed(ActionState::message(UPDATE_DATABASE_ERROR))
            }
        }
    }

    pub async fn delete(&self, id: Uuid) -> ActionOutcome {
        let outcome = match self.store.delete_invoice(id).await {
            Ok(rows) => {
                tracing::info!(invoice_id = %id, rows, "Invoice deleted");
                ActionOutcome::Completed(Navigation::to_invoices(Some(DELETED_MESSAGE)))
            }
            Err(e) => {
                tracing::error!(invoice_id = %id, error = %e, "Failed to delete invoice");
                ActionOutcome::StoreFailed(ActionState::message(DELETE_DATABASE_ERROR))
            }
        };
        record("delete", &outcome);
        outcome
    }
}

fn record(operation: &str, outcome: &ActionOutcome) {
    INVOICE_MUTATIONS_TOTAL
        .with_label_values(&[operation, outcome.label()])
        .inc();
}
