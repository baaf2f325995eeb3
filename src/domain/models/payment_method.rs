use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethodType {
    Bank,
    Ewallet,
    Other,
}

impl PaymentMethodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethodType::Bank => "bank",
            PaymentMethodType::Ewallet => "ewallet",
            PaymentMethodType::Other => "other",
        }
    }
}

impl FromStr for PaymentMethodType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bank" => Ok(PaymentMethodType::Bank),
            "ewallet" => Ok(PaymentMethodType::Ewallet),
            "other" => Ok(PaymentMethodType::Other),
            other => Err(format!("unknown payment method type '{}'", other)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
    pub method_type: PaymentMethodType,
    pub account_number: String,
    pub account_name: String,
    pub instructions: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl PaymentMethod {
    pub fn new(
        name: String,
        method_type: PaymentMethodType,
        account_number: String,
        account_name: String,
        instructions: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            method_type,
            account_number,
            account_name,
            instructions,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
