//! Store traits consumed by the actions, the credential verifier and the seed loader.
//!
//! Every operation receives its store handle explicitly; there is no global
//! connection. [`Database`](super::Database) is the PostgreSQL implementation and
//! [`MockStore`](super::MockStore) the in-memory one.

use async_trait::async_trait;
use service_core::error::AppError;
use uuid::Uuid;

use crate::models::{CreateInvoice, Customer, Invoice, Revenue, UpdateInvoice, User};

/// Writes against the `invoices` relation.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    async fn insert_invoice(&self, input: &CreateInvoice) -> Result<(), AppError>;

    /// Returns the number of rows changed (0 when the id is unknown).
    async fn update_invoice(&self, id: Uuid, input: &UpdateInvoice) -> Result<u64, AppError>;

    /// Returns the number of rows removed (0 when the id is unknown).
    async fn delete_invoice(&self, id: Uuid) -> Result<u64, AppError>;
}

/// Read lookup against the `users` relation.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}

/// Batch inserts used once by the seed loader. Each call is its own statement.
#[async_trait]
pub trait SeedStore: Send + Sync {
    async fn insert_users(&self, users: &[User]) -> Result<u64, AppError>;
    async fn insert_invoices(&self, invoices: &[Invoice]) -> Result<u64, AppError>;
    async fn insert_customers(&self, customers: &[Customer]) -> Result<u64, AppError>;
    async fn insert_revenue(&self, revenue: &[Revenue]) -> Result<u64, AppError>;
}

#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn health_check(&self) -> Result<(), AppError>;
}
