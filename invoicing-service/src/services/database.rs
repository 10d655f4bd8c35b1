//! Database service for invoicing-service.

use async_trait::async_trait;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, QueryBuilder};
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::models::{CreateInvoice, Customer, Invoice, Revenue, UpdateInvoice, User};
use crate::services::metrics::DB_QUERY_DURATION;
use crate::services::store::{HealthCheck, InvoiceStore, SeedStore, UserStore};

/// Database connection pool wrapper.
///
/// Each statement checks a connection out of the pool and returns it when the
/// statement completes, including on error.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "invoicing-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("PostgreSQL connection pool closed");
    }
}

#[async_trait]
impl HealthCheck for Database {
    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl InvoiceStore for Database {
    #[instrument(skip(self, input), fields(invoice_id = %input.id))]
    async fn insert_invoice(&self, input: &CreateInvoice) -> Result<(), AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["insert_invoice"])
            .start_timer();

        sqlx::query(
            r#"
            INSERT INTO invoices (id, customer_id, amount, status, date)
            VALUES ($1, $2::uuid, $3, $4, $5)
            "#,
        )
        .bind(input.id)
        .bind(&input.customer_id)
        .bind(input.amount)
        .bind(input.status.as_str())
        .bind(input.date)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to insert invoice: {}", e)))?;

        timer.observe_duration();

        info!(invoice_id = %input.id, amount = input.amount, "Invoice inserted");

        Ok(())
    }

    #[instrument(skip(self, input), fields(invoice_id = %id))]
    async fn update_invoice(&self, id: Uuid, input: &UpdateInvoice) -> Result<u64, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_invoice"])
            .start_timer();

        let result = sqlx::query(
            r#"
            UPDATE invoices
            SET customer_id = $2::uuid, amount = $3, status = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&input.customer_id)
        .bind(input.amount)
        .bind(input.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to update invoice: {}", e)))?;

        timer.observe_duration();

        Ok(result.rows_affected())
    }

    #[instrument(skip(self), fields(invoice_id = %id))]
    async fn delete_invoice(&self, id: Uuid) -> Result<u64, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_invoice"])
            .start_timer();

        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to delete invoice: {}", e))
            })?;

        timer.observe_duration();

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl UserStore for Database {
    #[instrument(skip(self, email))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["find_user_by_email"])
            .start_timer();

        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password FROM users WHERE email = $1 LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch user");
            AppError::DatabaseError(anyhow::anyhow!("Failed to fetch user: {}", e))
        })?;

        timer.observe_duration();

        Ok(user)
    }
}

#[async_trait]
impl SeedStore for Database {
    #[instrument(skip(self, users), fields(count = users.len()))]
    async fn insert_users(&self, users: &[User]) -> Result<u64, AppError> {
        if users.is_empty() {
            return Ok(0);
        }

        let mut builder = QueryBuilder::<Postgres>::new("INSERT INTO users (id, name, email, password) ");
        builder.push_values(users, |mut row, user| {
            row.push_bind(user.id)
                .push_bind(&user.name)
                .push_bind(&user.email)
                .push_bind(&user.password);
        });

        execute_batch(&self.pool, builder, "users").await
    }

    #[instrument(skip(self, invoices), fields(count = invoices.len()))]
    async fn insert_invoices(&self, invoices: &[Invoice]) -> Result<u64, AppError> {
        if invoices.is_empty() {
            return Ok(0);
        }

        let mut builder =
            QueryBuilder::<Postgres>::new("INSERT INTO invoices (id, customer_id, amount, status, date) ");
        builder.push_values(invoices, |mut row, invoice| {
            row.push_bind(invoice.id)
                .push_bind(&invoice.customer_id)
                .push_unseparated("::uuid")
                .push_bind(invoice.amount)
                .push_bind(&invoice.status)
                .push_bind(invoice.date);
        });

        execute_batch(&self.pool, builder, "invoices").await
    }

    #[instrument(skip(self, customers), fields(count = customers.len()))]
    async fn insert_customers(&self, customers: &[Customer]) -> Result<u64, AppError> {
        if customers.is_empty() {
            return Ok(0);
        }

        let mut builder =
            QueryBuilder::<Postgres>::new("INSERT INTO customers (id, name, email, image_url) ");
        builder.push_values(customers, |mut row, customer| {
            row.push_bind(customer.id)
                .push_bind(&customer.name)
                .push_bind(&customer.email)
                .push_bind(&customer.image_url);
        });

        execute_batch(&self.pool, builder, "customers").await
    }

    #[instrument(skip(self, revenue), fields(count = revenue.len()))]
    async fn insert_revenue(&self, revenue: &[Revenue]) -> Result<u64, AppError> {
        if revenue.is_empty() {
            return Ok(0);
        }

        let mut builder = QueryBuilder::<Postgres>::new("INSERT INTO revenue (month, revenue) ");
        builder.push_values(revenue, |mut row, entry| {
            row.push_bind(&entry.month).push_bind(entry.revenue);
        });

        execute_batch(&self.pool, builder, "revenue").await
    }
}

async fn execute_batch(
    pool: &PgPool,
    mut builder: QueryBuilder<'_, Postgres>,
    relation: &'static str,
) -> Result<u64, AppError> {
    let timer = DB_QUERY_DURATION
        .with_label_values(&[relation])
        .start_timer();

    let result = builder.build().execute(pool).await.map_err(|e| {
        AppError::DatabaseError(anyhow::anyhow!("Failed to insert {}: {}", relation, e))
    })?;

    timer.observe_duration();

    info!(relation, rows = result.rows_affected(), "Batch inserted");

    Ok(result.rows_affected())
}
