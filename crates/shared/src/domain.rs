use serde::{Deserialize, Serialize};

/// A customer record as returned by the directory endpoint.
///
/// `email` is a display key only; uniqueness is the server's concern. Records
/// are read-only once listed: there is no client-side update or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
}

impl Customer {
    /// Name shown in the directory table: the business name when one is set,
    /// otherwise "First Last".
    pub fn display_name(&self) -> String {
        match self.business_name.as_deref() {
            Some(business) if !business.is_empty() => business.to_string(),
            _ => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

/// Payload for creating a customer. Same wire shape as [`Customer`];
/// `businessName` is omitted entirely when the draft field was left blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
}

/// Count heading for the directory table, singular below two.
pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 Customer".to_string()
    } else {
        format!("{count} Customers")
    }
}
