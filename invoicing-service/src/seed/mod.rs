//! One-shot seed loader for the demo data set.
//!
//! Batches go in as users, invoices, customers, revenue. Each batch is its own
//! statement; a failure stops the run and leaves earlier batches in place.

pub mod placeholder;

use service_core::error::AppError;

use crate::models::User;
use crate::services::SeedStore;
use crate::utils::{hash_password, Password};

/// Rows inserted per relation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: u64,
    pub invoices: u64,
    pub customers: u64,
    pub revenue: u64,
}

/// Load the placeholder data set into `store`.
pub async fn seed(store: &dyn SeedStore) -> Result<SeedReport, AppError> {
    let users = hash_passwords(placeholder::users()?).await?;
    let invoices = placeholder::invoices()?;
    let customers = placeholder::customers()?;
    let revenue = placeholder::revenue();

    let mut report = SeedReport::default();

    report.users = store.insert_users(&users).await?;
    tracing::info!(count = report.users, "Seeded users");

    report.invoices = store.insert_invoices(&invoices).await?;
    tracing::info!(count = report.invoices, "Seeded invoices");

    report.customers = store.insert_customers(&customers).await?;
    tracing::info!(count = report.customers, "Seeded customers");

    report.revenue = store.insert_revenue(&revenue).await?;
    tracing::info!(count = report.revenue, "Seeded revenue");

    Ok(report)
}

/// Replace each plaintext password with its bcrypt hash.
async fn hash_passwords(users: Vec<User>) -> Result<Vec<User>, AppError> {
    tokio::task::spawn_blocking(move || {
        users
            .into_iter()
            .map(|mut user| -> anyhow::Result<User> {
                let hash = hash_password(&Password::new(user.password))?;
                user.password = hash.into_string();
                Ok(user)
            })
            .collect::<anyhow::Result<Vec<User>>>()
    })
    .await
    .map_err(|e| AppError::InternalError(anyhow::anyhow!("Password hashing task failed: {}", e)))?
    .map_err(AppError::InternalError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MockStore;
    use crate::utils::{verify_password, PasswordHashString};

    #[tokio::test]
    async fn seeds_every_collection() {
        let store = MockStore::new();

        let report = seed(&store).await.unwrap();

        assert_eq!(
            report,
            SeedReport {
                users: 1,
                invoices: 15,
                customers: 10,
                revenue: 12,
            }
        );
        assert_eq!(store.invoice_count(), 15);
        assert_eq!(store.customers.lock().unwrap().len(), 10);
        assert_eq!(store.revenue.lock().unwrap().len(), 12);
    }

    #[tokio::test]
    async fn stored_passwords_are_hashed() {
        let store = MockStore::new();
        seed(&store).await.unwrap();

        let users = store.users.lock().unwrap();
        let user = &users[0];
        assert_ne!(user.password, "123456");
        assert!(user.password.starts_with("$2b$10$"));
        assert!(verify_password(
            &Password::new("123456".to_string()),
            &PasswordHashString::new(user.password.clone())
        )
        .unwrap());
    }

    #[tokio::test]
    async fn failed_batch_stops_the_run_and_keeps_earlier_batches() {
        let store = MockStore::new();
        store.fail_batch("customers");

        let err = seed(&store).await.unwrap_err();

        assert!(matches!(err, AppError::DatabaseError(_)));
        assert_eq!(store.users.lock().unwrap().len(), 1);
        assert_eq!(store.invoice_count(), 15);
        assert!(store.customers.lock().unwrap().is_empty());
        assert!(store.revenue.lock().unwrap().is_empty());
    }
}
