//! Invoicing Service - invoice form actions, credential sign-in and demo data seeding.
//!
//! [`services::MockStore`] is public so router tests under `tests/` can drive the
//! full app in-process. It backs no production path: `Application::build`
//! always connects the PostgreSQL [`services::Database`].

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod seed;
pub mod services;
pub mod startup;
pub mod utils;

pub use startup::AppState;
