use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

//--------------------------------------    LinkageRecord      ---------------------------------------------------------
/// A row of the `customer_ovo` table: the link between a local customer and an OVO wallet.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct LinkageRecord {
    pub customer_id: i64,
    /// The provider's loyalty id. Only set once the linkage is verified.
    #[sqlx(rename = "ovo_id")]
    pub wallet_id: Option<String>,
    /// Local-format phone number, e.g. `0818223456`.
    #[sqlx(rename = "ovo_phone")]
    pub phone: String,
    /// Handle of the most recent authentication challenge. Stale once the linkage is verified.
    #[sqlx(rename = "ovo_auth_id")]
    pub auth_id: String,
    #[sqlx(rename = "fg_verified")]
    pub verified: bool,
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLinkage {
    pub customer_id: i64,
    pub phone: String,
    pub auth_id: String,
    pub source: String,
}

//--------------------------------------    LinkageUpdate      ---------------------------------------------------------
/// A partial update of a linkage record. Only the fields that are set are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkageUpdate {
    pub wallet_id: Option<String>,
    pub phone: Option<String>,
    pub auth_id: Option<String>,
    pub verified: Option<bool>,
}

impl LinkageUpdate {
    pub fn with_wallet_id<S: Into<String>>(mut self, wallet_id: S) -> Self {
        self.wallet_id = Some(wallet_id.into());
        self
    }

    pub fn with_phone<S: Into<String>>(mut self, phone: S) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_auth_id<S: Into<String>>(mut self, auth_id: S) -> Self {
        self.auth_id = Some(auth_id.into());
        self
    }

    pub fn with_verified(mut self, verified: bool) -> Self {
        self.verified = Some(verified);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.wallet_id.is_none() && self.phone.is_none() && self.auth_id.is_none() && self.verified.is_none()
    }
}

//--------------------------------------   PointHistoryEntry   ---------------------------------------------------------
/// One attempt at awarding OVO points for an order, successful or not.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct PointHistoryEntry {
    pub id: i64,
    pub customer_id: i64,
    pub order_id: i64,
    pub so_number: String,
    #[sqlx(rename = "type")]
    pub kind: String,
    /// The JSON-encoded parameters that were sent to the provider.
    pub payload: String,
    #[sqlx(rename = "fg_failed")]
    pub failed: bool,
    pub created_at: DateTime<Utc>,
}

impl PointHistoryEntry {
    pub fn payload_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.payload)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPointHistory {
    pub customer_id: i64,
    pub order_id: i64,
    pub so_number: String,
    pub kind: String,
    pub payload: String,
    pub failed: bool,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn partial_updates() {
        assert!(LinkageUpdate::default().is_empty());
        let update = LinkageUpdate::default().with_auth_id("666").with_verified(false);
        assert!(!update.is_empty());
        assert_eq!(update.auth_id.as_deref(), Some("666"));
        assert_eq!(update.verified, Some(false));
        assert!(update.phone.is_none());
        assert!(update.wallet_id.is_none());
    }
}
