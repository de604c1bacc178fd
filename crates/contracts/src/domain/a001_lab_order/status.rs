use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a lab order as reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    New,
    Pending,
    Completed,
    Cancelled,
    #[allow(clippy::upper_case_acronyms)]
    QC,
    Redesign,
    #[default]
    Unknown,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::New,
        OrderStatus::Pending,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
        OrderStatus::QC,
        OrderStatus::Redesign,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::New => "New",
            OrderStatus::Pending => "Pending",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::QC => "QC",
            OrderStatus::Redesign => "Redesign",
            OrderStatus::Unknown => "Unknown",
        }
    }

    /// Parse a status string, case-insensitive. Anything unrecognised maps to `Unknown`.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.label().eq_ignore_ascii_case(value))
            .unwrap_or(OrderStatus::Unknown)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        OrderStatus::parse(&value)
    }
}

impl From<OrderStatus> for String {
    fn from(value: OrderStatus) -> Self {
        value.label().to_string()
    }
}
