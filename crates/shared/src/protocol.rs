use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Payment, StudentId, StudentIdentity, StudentRecord};

pub const LOOKUP_PATH: &str = "/api/student/lookup";
pub const PAYMENT_PATH: &str = "/api/student/payment";

/// Raw body of `GET /api/student/lookup`.
///
/// The endpoint answers with one of three shapes (`{error}`, `{exists:false}`
/// or the full record), so every field is optional here and
/// [`LookupResponse::into_outcome`] decides which one arrived.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub exists: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<StudentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_fees: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees_paid: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_fee: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payments: Option<Vec<Payment>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Rejected(String),
    Existing(StudentRecord),
    NotFound,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("lookup response for an existing student is missing `{0}`")]
    MissingField(&'static str),
}

impl LookupResponse {
    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn existing(record: StudentRecord) -> Self {
        Self {
            error: None,
            exists: true,
            student_id: Some(record.student_id),
            total_fees: Some(record.total_fees),
            fees_paid: Some(record.fees_paid),
            remaining_fee: Some(record.remaining_fee),
            payments: Some(record.payments),
        }
    }

    pub fn into_outcome(self) -> Result<LookupOutcome, ProtocolError> {
        if let Some(error) = self.error.filter(|e| !e.is_empty()) {
            return Ok(LookupOutcome::Rejected(error));
        }
        if !self.exists {
            return Ok(LookupOutcome::NotFound);
        }

        Ok(LookupOutcome::Existing(StudentRecord {
            student_id: self
                .student_id
                .ok_or(ProtocolError::MissingField("student_id"))?,
            total_fees: self
                .total_fees
                .ok_or(ProtocolError::MissingField("total_fees"))?,
            fees_paid: self
                .fees_paid
                .ok_or(ProtocolError::MissingField("fees_paid"))?,
            remaining_fee: self
                .remaining_fee
                .ok_or(ProtocolError::MissingField("remaining_fee"))?,
            payments: self.payments.unwrap_or_default(),
        }))
    }
}

/// Body of `POST /api/student/payment`. `total_fees` is only sent for a
/// student the server does not know yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    #[serde(flatten)]
    pub identity: StudentIdentity,
    pub payment_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_fees: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub record: StudentRecord,
}
