use crate::shared::serde_helpers::{count_or_zero, skip_invalid, string_or_number};
use serde::{Deserialize, Serialize};

use super::status::OrderStatus;

/// Lab order as returned by the order list endpoint.
///
/// Records are read-only snapshots; the dashboard never edits them locally.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LabOrder {
    /// Order number (sent as a number or a string, empty when missing)
    #[serde(default, deserialize_with = "string_or_number")]
    pub orderid: String,
    #[serde(default)]
    pub status: OrderStatus,
    /// Lab date string, e.g. "14-Mar-2023 07:32:31am"
    #[serde(default, deserialize_with = "string_or_number")]
    pub order_date: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub file_name: String,
    /// Turnaround time
    #[serde(default, deserialize_with = "string_or_number")]
    pub tat: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub unit: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub tooth: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub lab_name: String,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub message_count: u32,
    /// Designated single file for direct download
    #[serde(default, deserialize_with = "string_or_number")]
    pub file_path: String,
    #[serde(default)]
    pub files: Vec<String>,
}

impl LabOrder {
    /// Numeric order number, `None` for non-numeric IDs
    pub fn numeric_id(&self) -> Option<i64> {
        self.orderid.trim().parse().ok()
    }
}

/// Response of the order list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderListResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    /// Records that fail to decode are dropped, the rest still load
    #[serde(default, deserialize_with = "skip_invalid")]
    pub orders: Vec<LabOrder>,
}

/// Response of the per-order file lookup endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderFilesResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub files: Vec<String>,
}

/// Body of a redesign submission for one order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedesignRequest {
    pub orderid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}
