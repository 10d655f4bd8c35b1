//! In-memory store used by tests and local runs without PostgreSQL.
//!
//! Never wired by `Application::build`; callers opt in through
//! `AppState::new`. Customer references are checked the way the
//! PostgreSQL store casts them.

use async_trait::async_trait;
use service_core::error::AppError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use crate::models::{CreateInvoice, Customer, Invoice, Revenue, UpdateInvoice, User};
use crate::services::store::{HealthCheck, InvoiceStore, SeedStore, UserStore};

#[derive(Default)]
pub struct MockStore {
    pub invoices: Mutex<HashMap<Uuid, Invoice>>,
    pub users: Mutex<Vec<User>>,
    pub customers: Mutex<Vec<Customer>>,
    pub revenue: Mutex<Vec<Revenue>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
    fail_batches: Mutex<Vec<&'static str>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent invoice write fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent read (user lookup, health) fail.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make the named seed batch (`users`, `invoices`, `customers`, `revenue`) fail.
    pub fn fail_batch(&self, relation: &'static str) {
        if let Ok(mut batches) = self.fail_batches.lock() {
            batches.push(relation);
        }
    }

    pub fn with_user(self, user: User) -> Self {
        if let Ok(mut users) = self.users.lock() {
            users.push(user);
        }
        self
    }

    pub fn with_invoice(self, invoice: Invoice) -> Self {
        if let Ok(mut invoices) = self.invoices.lock() {
            invoices.insert(invoice.id, invoice);
        }
        self
    }

    pub fn invoice_count(&self) -> usize {
        self.invoices.lock().map(|i| i.len()).unwrap_or_default()
    }

    fn check_writes(&self) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "connection refused (mock)"
            )));
        }
        Ok(())
    }

    fn check_reads(&self) -> Result<(), AppError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "connection refused (mock)"
            )));
        }
        Ok(())
    }

    fn check_batch(&self, relation: &'static str) -> Result<(), AppError> {
        let failing = self
            .fail_batches
            .lock()
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("Mock store mutex poisoned: {}", e)))?
            .contains(&relation);
        if failing {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "Failed to insert {} (mock)",
                relation
            )));
        }
        Ok(())
    }
}

/// Mirrors the `::uuid` cast the PostgreSQL store applies to customer references.
fn customer_uuid(customer_id: &str) -> Result<String, AppError> {
    Uuid::parse_str(customer_id)
        .map(|id| id.to_string())
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!(
                "invalid input syntax for type uuid: \"{}\" ({}) (mock)",
                customer_id,
                e
            ))
        })
}

fn poisoned(e: impl std::fmt::Display) -> AppError {
    AppError::InternalError(anyhow::anyhow!("Mock store mutex poisoned: {}", e))
}

#[async_trait]
impl HealthCheck for MockStore {
    async fn health_check(&self) -> Result<(), AppError> {
        self.check_reads()
    }
}

#[async_trait]
impl InvoiceStore for MockStore {
    async fn insert_invoice(&self, input: &CreateInvoice) -> Result<(), AppError> {
        self.check_writes()?;
        let customer_id = customer_uuid(&input.customer_id)?;
        let mut invoices = self.invoices.lock().map_err(poisoned)?;
        if invoices.contains_key(&input.id) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "duplicate key value violates unique constraint (mock)"
            )));
        }
        invoices.insert(
            input.id,
            Invoice {
                id: input.id,
                customer_id,
                amount: input.amount,
                status: input.status.as_str().to_string(),
                date: input.date,
            },
        );
        Ok(())
    }

    async fn update_invoice(&self, id: Uuid, input: &UpdateInvoice) -> Result<u64, AppError> {
        self.check_writes()?;
        let customer_id = customer_uuid(&input.customer_id)?;
        let mut invoices = self.invoices.lock().map_err(poisoned)?;
        match invoices.get_mut(&id) {
            Some(invoice) => {
                invoice.customer_id = customer_id;
                invoice.amount = input.amount;
                invoice.status = input.status.as_str().to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_invoice(&self, id: Uuid) -> Result<u64, AppError> {
        self.check_writes()?;
        let mut invoices = self.invoices.lock().map_err(poisoned)?;
        Ok(invoices.remove(&id).map(|_| 1).unwrap_or(0))
    }
}

#[async_trait]
impl UserStore for MockStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.check_reads()?;
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl SeedStore for MockStore {
    async fn insert_users(&self, users: &[User]) -> Result<u64, AppError> {
        self.check_batch("users")?;
        let mut stored = self.users.lock().map_err(poisoned)?;
        stored.extend_from_slice(users);
        Ok(users.len() as u64)
    }

    async fn insert_invoices(&self, invoices: &[Invoice]) -> Result<u64, AppError> {
        self.check_batch("invoices")?;
        let mut stored = self.invoices.lock().map_err(poisoned)?;
        for invoice in invoices {
            stored.insert(invoice.id, invoice.clone());
        }
        Ok(invoices.len() as u64)
    }

    async fn insert_customers(&self, customers: &[Customer]) -> Result<u64, AppError> {
        self.check_batch("customers")?;
        let mut stored = self.customers.lock().map_err(poisoned)?;
        stored.extend_from_slice(customers);
        Ok(customers.len() as u64)
    }

    async fn insert_revenue(&self, revenue: &[Revenue]) -> Result<u64, AppError> {
        self.check_batch("revenue")?;
        let mut stored = self.revenue.lock().map_err(poisoned)?;
        stored.extend_from_slice(revenue);
        Ok(revenue.len() as u64)
    }
}
