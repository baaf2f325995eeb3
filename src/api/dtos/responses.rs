use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::models::payment::{PaymentProof, ProofStatus};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Proof including its base64 payload, which booking listings leave out.
#[derive(Serialize)]
pub struct PaymentProofResponse {
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub data_base64: String,
    pub uploaded_at: DateTime<Utc>,
    pub status: ProofStatus,
}

impl From<PaymentProof> for PaymentProofResponse {
    fn from(proof: PaymentProof) -> Self {
        Self {
            file_name: proof.file_name,
            file_size: proof.file_size,
            file_type: proof.file_type,
            data_base64: proof.data,
            uploaded_at: proof.uploaded_at,
            status: proof.status,
        }
    }
}
