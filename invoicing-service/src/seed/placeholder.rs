//! Demo records loaded by the `seed` binary.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{Customer, Invoice, InvoiceStatus, Revenue, User};

pub struct PlaceholderUser {
    pub id: &'static str,
    pub name: &'static str,
    pub email: &'static str,
    /// Plaintext; hashed before it reaches the store.
    pub password: &'static str,
}

pub struct PlaceholderCustomer {
    pub id: &'static str,
    pub name: &'static str,
    pub email: &'static str,
    pub image_url: &'static str,
}

pub struct PlaceholderInvoice {
    /// Index into [`CUSTOMERS`].
    pub customer: usize,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: (i32, u32, u32),
}

pub const USERS: &[PlaceholderUser] = &[PlaceholderUser {
    id: "410544b2-4001-4271-9855-fec4b6a6442a",
    name: "User",
    email: "user@nextmail.com",
    password: "123456",
}];

pub const CUSTOMERS: &[PlaceholderCustomer] = &[
    PlaceholderCustomer {
        id: "3958dc9e-712f-4377-85e9-fec4b6a6442a",
        name: "Delba de Oliveira",
        email: "delba@oliveira.com",
        image_url: "/customers/delba-de-oliveira.png",
    },
    PlaceholderCustomer {
        id: "3958dc9e-742f-4377-85e9-fec4b6a6442a",
        name: "Lee Robinson",
        email: "lee@robinson.com",
        image_url: "/customers/lee-robinson.png",
    },
    PlaceholderCustomer {
        id: "3958dc9e-737f-4377-85e9-fec4b6a6442a",
        name: "Hector Simpson",
        email: "hector@simpson.com",
        image_url: "/customers/hector-simpson.png",
    },
    PlaceholderCustomer {
        id: "50ca3e18-62cd-11ee-8c99-0242ac120002",
        name: "Steven Tey",
        email: "steven@tey.com",
        image_url: "/customers/steven-tey.png",
    },
    PlaceholderCustomer {
        id: "3958dc9e-787f-4377-85e9-fec4b6a6442a",
        name: "Steph Dietz",
        email: "steph@dietz.com",
        image_url: "/customers/steph-dietz.png",
    },
    PlaceholderCustomer {
        id: "76d65c26-f784-44a2-ac19-586678f7c2f2",
        name: "Michael Novotny",
        email: "michael@novotny.com",
        image_url: "/customers/michael-novotny.png",
    },
    PlaceholderCustomer {
        id: "d6e15727-9fe1-4961-8c5b-ea44a9bd81aa",
        name: "Evil Rabbit",
        email: "evil@rabbit.com",
        image_url: "/customers/evil-rabbit.png",
    },
    PlaceholderCustomer {
        id: "126eed9c-c90c-4ef6-a4a8-fcf7408d3c66",
        name: "Emil Kowalski",
        email: "emil@kowalski.com",
        image_url: "/customers/emil-kowalski.png",
    },
    PlaceholderCustomer {
        id: "CC27C14A-0ACF-4F4A-A6C9-D45682C144B9",
        name: "Amy Burns",
        email: "amy@burns.com",
        image_url: "/customers/amy-burns.png",
    },
    PlaceholderCustomer {
        id: "13D07535-C59E-4157-A011-F8D2EF4E0CBB",
        name: "Balazs Orban",
        email: "balazs@orban.com",
        image_url: "/customers/balazs-orban.png",
    },
];

const fn invoice(customer: usize, amount: i64, status: InvoiceStatus, date: (i32, u32, u32)) -> PlaceholderInvoice {
    PlaceholderInvoice {
        customer,
        amount,
        status,
        date,
    }
}

pub const INVOICES: &[PlaceholderInvoice] = &[
    invoice(0, 15795, InvoiceStatus::Pending, (2022, 12, 6)),
    invoice(1, 20348, InvoiceStatus::Pending, (2022, 11, 14)),
    invoice(4, 3040, InvoiceStatus::Paid, (2022, 10, 29)),
    invoice(3, 44800, InvoiceStatus::Paid, (2023, 9, 10)),
    invoice(5, 34577, InvoiceStatus::Pending, (2023, 8, 5)),
    invoice(7, 54246, InvoiceStatus::Pending, (2023, 7, 16)),
    invoice(6, 666, InvoiceStatus::Pending, (2023, 6, 27)),
    invoice(3, 32545, InvoiceStatus::Paid, (2023, 6, 9)),
    invoice(4, 1250, InvoiceStatus::Paid, (2023, 6, 17)),
    invoice(5, 8546, InvoiceStatus::Paid, (2023, 6, 7)),
    invoice(1, 500, InvoiceStatus::Paid, (2023, 8, 19)),
    invoice(5, 8945, InvoiceStatus::Paid, (2023, 6, 3)),
    invoice(2, 8945, InvoiceStatus::Paid, (2023, 6, 18)),
    invoice(0, 8945, InvoiceStatus::Paid, (2023, 10, 4)),
    invoice(2, 1000, InvoiceStatus::Paid, (2022, 6, 5)),
];

pub const REVENUE: &[(&str, i32)] = &[
    ("Jan", 2000),
    ("Feb", 1800),
    ("Mar", 2200),
    ("Apr", 2500),
    ("May", 2300),
    ("Jun", 3200),
    ("Jul", 3500),
    ("Aug", 3700),
    ("Sep", 2500),
    ("Oct", 2800),
    ("Nov", 3000),
    ("Dec", 4800),
];

fn parse_id(raw: &str) -> anyhow::Result<Uuid> {
    Uuid::parse_str(raw).map_err(|e| anyhow::anyhow!("Invalid placeholder id {}: {}", raw, e))
}

/// Users with their plaintext password in `password`.
pub fn users() -> anyhow::Result<Vec<User>> {
    USERS
        .iter()
        .map(|u| {
            Ok(User {
                id: parse_id(u.id)?,
                name: u.name.to_string(),
                email: u.email.to_string(),
                password: u.password.to_string(),
            })
        })
        .collect()
}

pub fn customers() -> anyhow::Result<Vec<Customer>> {
    CUSTOMERS
        .iter()
        .map(|c| {
            Ok(Customer {
                id: parse_id(c.id)?,
                name: c.name.to_string(),
                email: c.email.to_string(),
                image_url: c.image_url.to_string(),
            })
        })
        .collect()
}

/// Invoices with fresh ids.
pub fn invoices() -> anyhow::Result<Vec<Invoice>> {
    INVOICES
        .iter()
        .map(|i| {
            let customer = CUSTOMERS
                .get(i.customer)
                .ok_or_else(|| anyhow::anyhow!("Unknown placeholder customer {}", i.customer))?;
            let (year, month, day) = i.date;
            let date = NaiveDate::from_ymd_opt(year, month, day)
                .ok_or_else(|| anyhow::anyhow!("Invalid placeholder date {:?}", i.date))?;

            Ok(Invoice {
                id: Uuid::new_v4(),
                customer_id: parse_id(customer.id)?.to_string(),
                amount: i.amount,
                status: i.status.as_str().to_string(),
                date,
            })
        })
        .collect()
}

pub fn revenue() -> Vec<Revenue> {
    REVENUE
        .iter()
        .map(|(month, revenue)| Revenue {
            month: month.to_string(),
            revenue: *revenue,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_invoice_references_a_known_customer() {
        let customer_ids: Vec<String> = customers()
            .unwrap()
            .into_iter()
            .map(|c| c.id.to_string())
            .collect();

        for invoice in invoices().unwrap() {
            assert!(customer_ids.contains(&invoice.customer_id));
        }
    }

    #[test]
    fn collections_have_expected_sizes() {
        assert_eq!(users().unwrap().len(), 1);
        assert_eq!(customers().unwrap().len(), 10);
        assert_eq!(invoices().unwrap().len(), 15);
        assert_eq!(revenue().len(), 12);
    }
}
