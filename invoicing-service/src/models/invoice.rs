//! Invoice model for invoicing-service.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Invoice status. Only these two values are accepted from forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }

    /// Strict parse: exact lowercase match, anything else is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(InvoiceStatus::Pending),
            "paid" => Some(InvoiceStatus::Paid),
            _ => None,
        }
    }
}

/// Invoice row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    pub id: Uuid,
    pub customer_id: String,
    /// Minor currency units (cents).
    pub amount: i64,
    pub status: String,
    pub date: NaiveDate,
}

/// Input for inserting an invoice.
#[derive(Debug, Clone)]
pub struct CreateInvoice {
    pub id: Uuid,
    pub customer_id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Fields overwritten by an update. Id and date are never touched.
#[derive(Debug, Clone)]
pub struct UpdateInvoice {
    pub customer_id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
}
