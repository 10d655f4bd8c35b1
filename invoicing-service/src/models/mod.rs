//! Domain models for invoicing-service.

mod customer;
mod invoice;
mod revenue;
mod user;

pub use customer::Customer;
pub use invoice::{CreateInvoice, Invoice, InvoiceStatus, UpdateInvoice};
pub use revenue::Revenue;
pub use user::{SanitizedUser, User};
