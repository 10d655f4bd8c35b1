//! Services module for invoicing-service.

pub mod actions;
pub mod auth;
pub mod database;
pub mod metrics;
pub mod mock;
pub mod store;

pub use actions::{ActionOutcome, InvoiceActions, Navigation};
pub use auth::{AuthError, AuthOutcome, AuthService, LoginOutcome};
pub use database::Database;
pub use metrics::{get_metrics, init_metrics};
pub use mock::MockStore;
pub use store::{HealthCheck, InvoiceStore, SeedStore, UserStore};
