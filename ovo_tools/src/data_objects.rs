use log::{debug, trace};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::OvoApiError;

/// Provider result codes. The meaning of a code depends on the operation that produced it.
pub mod codes {
    pub const STATUS_OK: u16 = 200;
    pub const STATUS_CREATED: u16 = 201;

    pub const NO_ERROR: i64 = 0;

    // customer_authentication
    pub const SENDING_AUTHENTICATION: i64 = 1;
    pub const MERCHANT_ID_MUST_NOT_EMPTY: i64 = 2;
    pub const PHONE_MUST_NOT_EMPTY: i64 = 3;
    pub const CUSTOMER_NOT_FOUND: i64 = 4;

    // customer_authentication_status
    pub const AUTHENTICATED: i64 = 1;
    pub const UNAUTHENTICATED: i64 = 2;
    pub const AUTH_ID_NOT_FOUND: i64 = 3;
}

/// The canonical response envelope returned by every provider operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvoResponse {
    pub status: u16,
    pub data: ResponseData,
    pub message: String,
    pub code: i64,
}

/// The union of the payload fields used by the provider operations. Fields an operation does not return, or returns
/// as `null`, are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseData {
    #[serde(deserialize_with = "null_as_default")]
    pub authentication_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub loyalty_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fullname: String,
    #[serde(deserialize_with = "null_as_default")]
    pub birthdate: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub level: String,
    #[serde(deserialize_with = "null_as_default")]
    pub customer_fullname: String,
    #[serde(deserialize_with = "null_as_default")]
    pub customer_phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub order_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub voucher_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub approval_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub merchant_invoice: String,
}

impl ResponseData {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default, deserialize_with = "null_as_default")]
    status: u16,
    #[serde(default, deserialize_with = "null_as_default")]
    message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    code: i64,
}

/// Reads `null` as the type's default value, the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decodes a provider response body into an [`OvoResponse`].
///
/// The provider's `data` field is polymorphic. Whenever it does not decode into [`ResponseData`] (an array, a scalar,
/// or an object with mistyped fields) it is replaced by an empty payload instead of failing. `null` fields are read
/// as empty and leave the rest of the payload intact. The same holds for a `null` `status`, `code` or `message`.
/// A body that is a bare JSON array decodes to an empty envelope. Malformed JSON, or a mistyped `status`, `code` or
/// `message`, is a [`OvoApiError::DecodeError`].
pub fn decode_response(body: &[u8]) -> Result<OvoResponse, OvoApiError> {
    let value = serde_json::from_slice::<Value>(body).map_err(|e| OvoApiError::DecodeError(e.to_string()))?;
    let mut fields = match value {
        Value::Object(fields) => fields,
        Value::Array(_) => {
            debug!("📡️ Provider returned a bare JSON array. Treating it as an empty response");
            return Ok(OvoResponse::default());
        },
        other => return Err(OvoApiError::DecodeError(format!("Expected a JSON object, but got {other}"))),
    };
    let data = fields.remove("data").unwrap_or(Value::Null);
    let envelope = serde_json::from_value::<Envelope>(Value::Object(fields))
        .map_err(|e| OvoApiError::DecodeError(e.to_string()))?;
    let data = match data {
        Value::Null => ResponseData::default(),
        data => serde_json::from_value::<ResponseData>(data).unwrap_or_else(|e| {
            trace!("📡️ Response data does not match the expected payload ({e}). Using an empty payload");
            ResponseData::default()
        }),
    };
    Ok(OvoResponse { status: envelope.status, data, message: envelope.message, code: envelope.code })
}
