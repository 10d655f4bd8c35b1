//! Loads the demo data set into PostgreSQL, then exits.

use invoicing_service::config::InvoicingConfig;
use invoicing_service::seed::seed;
use invoicing_service::services::Database;
use service_core::observability::init_tracing;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match InvoicingConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(
        &format!("{}-seed", config.service_name),
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    );

    let db = match Database::new(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await
    {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to PostgreSQL");
            return ExitCode::FAILURE;
        }
    };

    let result = seed(&db).await;
    db.close().await;

    match result {
        Ok(report) => {
            tracing::info!(
                users = report.users,
                invoices = report.invoices,
                customers = report.customers,
                revenue = report.revenue,
                "Database seeded successfully"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Seeding failed");
            ExitCode::FAILURE
        }
    }
}
