//! The response envelope shared by both transports.
//!
//! Every operation answers with the same logical shape regardless of
//! whether it was reached over HTTP or the command transport:
//! `{message, statusCode, status, data?, meta?}`. The HTTP adapter turns
//! the `statusCode` into the response status; the command adapter sends the
//! envelope verbatim as the reply payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::AppError;

/// Outcome discriminator carried in every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// The operation succeeded.
    Success,
    /// The operation was declined or failed.
    Error,
}

/// The common response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Human-readable outcome message.
    pub message: String,
    /// Numeric status, aligned with HTTP semantics on both transports.
    pub status_code: u16,
    /// Outcome discriminator.
    pub status: Status,
    /// Primary payload, when the operation returns one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Result metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

/// Result metadata attached to an envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    /// Number of records the operation touched or returned.
    pub total_data: i64,
    /// Issued bearer token (login only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Denormalized principal payload (login only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    /// Identifier of the affected record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Creation timestamp of the affected record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Meta {
    /// Metadata with only a record count.
    pub fn total(total_data: i64) -> Self {
        Self {
            total_data,
            ..Self::default()
        }
    }
}

impl Envelope {
    /// A success envelope with the given message and status code.
    pub fn success(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            message: message.into(),
            status_code,
            status: Status::Success,
            data: None,
            meta: None,
        }
    }

    /// An error envelope with the given message and status code.
    ///
    /// Declined business outcomes (wrong current password, unknown recovery
    /// email) use this shape as an ordinary return value, not as an error.
    pub fn declined(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            message: message.into(),
            status_code,
            status: Status::Error,
            data: None,
            meta: Some(Meta::total(0)),
        }
    }

    /// Attach a data payload.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Attach metadata.
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Whether this envelope reports success.
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

impl From<&AppError> for Envelope {
    fn from(err: &AppError) -> Self {
        Self::declined(err.message.clone(), err.status_code())
    }
}

/// Reply shape of the token-validation operation on both transports:
/// `{user, meta: {totalData, id, valid}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReply<T> {
    /// The validated principal.
    pub user: T,
    /// Validation metadata.
    pub meta: ValidationMeta,
}

/// Metadata of a token-validation reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMeta {
    /// Always 1 for a valid token.
    pub total_data: i64,
    /// Id of the validated principal.
    pub id: Uuid,
    /// Whether the token was accepted.
    pub valid: bool,
}

impl<T> ValidationReply<T> {
    /// A reply for a successfully validated principal.
    pub fn valid(user: T, id: Uuid) -> Self {
        Self {
            user,
            meta: ValidationMeta {
                total_data: 1,
                id,
                valid: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn envelope_serializes_camel_case() {
        let env = Envelope::success("Login successful", 200).with_meta(Meta {
            total_data: 1,
            token: Some("abc".into()),
            ..Meta::default()
        });
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["status"], "Success");
        assert_eq!(json["meta"]["totalData"], 1);
        assert_eq!(json["meta"]["token"], "abc");
        assert!(json["meta"].get("payload").is_none());
        assert!(json.get("data").is_none());
    }

    #[test]
    fn app_error_folds_into_declined_envelope() {
        let err = AppError::new(ErrorKind::NotFound, "User not found");
        let env = Envelope::from(&err);
        assert_eq!(env.status, Status::Error);
        assert_eq!(env.status_code, 404);
        assert_eq!(env.message, "User not found");
        assert_eq!(env.meta.unwrap().total_data, 0);
    }
}
