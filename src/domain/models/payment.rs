use std::fmt;
use std::str::FromStr;

use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::models::booking::TransitionError;

/// Upper bound for an uploaded payment proof, in bytes.
pub const MAX_PROOF_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "proof-uploaded")]
    ProofUploaded,
    #[serde(rename = "verified")]
    Verified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentEvent {
    ProofUploaded,
    Verified,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::ProofUploaded => "proof-uploaded",
            PaymentStatus::Verified => "verified",
        }
    }

    /// Payment side of the lifecycle. A proof may be replaced until an admin
    /// verifies it; verification is final.
    pub fn apply(self, event: PaymentEvent) -> Result<PaymentStatus, TransitionError> {
        match (self, event) {
            (PaymentStatus::Pending, PaymentEvent::ProofUploaded)
            | (PaymentStatus::ProofUploaded, PaymentEvent::ProofUploaded) => Ok(PaymentStatus::ProofUploaded),
            (PaymentStatus::ProofUploaded, PaymentEvent::Verified) => Ok(PaymentStatus::Verified),
            (from, event) => Err(TransitionError::Payment { from, event }),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "proof-uploaded" => Ok(PaymentStatus::ProofUploaded),
            "verified" => Ok(PaymentStatus::Verified),
            other => Err(format!("unknown payment status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofStatus {
    Pending,
    Verified,
}

impl ProofStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProofStatus::Pending => "pending",
            ProofStatus::Verified => "verified",
        }
    }
}

impl FromStr for ProofStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ProofStatus::Pending),
            "verified" => Ok(ProofStatus::Verified),
            other => Err(format!("unknown proof status '{}'", other)),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProofError {
    #[error("payment proof is empty")]
    Empty,
    #[error("payment proof is {size} bytes, the limit is 5 MB")]
    TooLarge { size: usize },
    #[error("payment proof must be an image, got '{0}'")]
    NotAnImage(String),
    #[error("payment proof is not valid base64")]
    Encoding,
}

/// Evidence of payment, embedded inline in the booking it belongs to.
///
/// The content is kept as base64 text. Construction goes through
/// [`PaymentProof::new`] or [`PaymentProof::from_base64`], which enforce the
/// 5 MB cap and the `image/*` MIME rule, so an instance is always uploadable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentProof {
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    /// Base64 content. Empty on bookings read through a listing; load the
    /// booking by id to get it.
    #[serde(skip_serializing)]
    pub data: String,
    pub uploaded_at: DateTime<Utc>,
    pub status: ProofStatus,
}

impl PaymentProof {
    pub fn new(file_name: &str, file_type: &str, bytes: &[u8]) -> Result<Self, ProofError> {
        if bytes.is_empty() {
            return Err(ProofError::Empty);
        }
        if bytes.len() > MAX_PROOF_BYTES {
            return Err(ProofError::TooLarge { size: bytes.len() });
        }
        let file_type = file_type.trim().to_ascii_lowercase();
        if !file_type.starts_with("image/") {
            return Err(ProofError::NotAnImage(file_type));
        }

        let file_name = match file_name.trim() {
            "" => "payment-proof".to_string(),
            name => name.to_string(),
        };

        Ok(Self {
            file_name,
            file_size: bytes.len() as i64,
            file_type,
            data: general_purpose::STANDARD.encode(bytes),
            uploaded_at: Utc::now(),
            status: ProofStatus::Pending,
        })
    }

    /// Accepts a plain base64 payload or a `data:<mime>;base64,` URL as
    /// produced by browser file readers.
    pub fn from_base64(file_name: &str, file_type: &str, encoded: &str) -> Result<Self, ProofError> {
        let payload = match encoded.split_once(";base64,") {
            Some((prefix, rest)) if prefix.starts_with("data:") => rest,
            _ => encoded,
        };
        let bytes = general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|_| ProofError::Encoding)?;
        Self::new(file_name, file_type, &bytes)
    }

    pub fn verified(mut self) -> Self {
        self.status = ProofStatus::Verified;
        self
    }
}
