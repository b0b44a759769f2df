//! API models for request and response payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod product;

/// Response for the alerts listing
///
/// The records are passed through untouched; their keys vary by source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertListResponse {
    pub data: Vec<Value>,
    pub total: usize,
}
