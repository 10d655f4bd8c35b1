use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Monthly revenue row for the dashboard chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Revenue {
    pub month: String,
    pub revenue: i32,
}
