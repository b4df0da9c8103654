// src/domain/complaint.rs

use crate::errors::ServerError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplaintStatus {
    #[default]
    Pending,
    Resolved,
}

impl ComplaintStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "pending",
            ComplaintStatus::Resolved => "resolved",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ServerError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ComplaintStatus::Pending),
            "resolved" => Ok(ComplaintStatus::Resolved),
            other => Err(ServerError::Validation(format!(
                "unknown complaint status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: i64,
    /// Snapshot of the customer's name at submission time.
    pub customer_name: String,
    pub subject: String,
    pub body: String,
    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComplaint {
    pub customer_name: String,
    pub subject: String,
    pub body: String,
}

impl NewComplaint {
    /// Field checks only. Whether the customer exists is checked by the store.
    pub fn validated(self) -> Result<Self, ServerError> {
        let customer_name = self.customer_name.trim().to_string();
        let subject = self.subject.trim().to_string();
        let body = self.body.trim().to_string();

        for (field, value) in [
            ("customerName", &customer_name),
            ("subject", &subject),
            ("body", &body),
        ] {
            if value.is_empty() {
                return Err(ServerError::Validation(format!("{field} is required")));
            }
        }

        Ok(Self {
            customer_name,
            subject,
            body,
        })
    }
}
