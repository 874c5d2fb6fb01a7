//! Core record types for students and payments.
//!
//! Records travel to and from backends as JSON documents with camelCase keys.
//! Loading is lenient: a document written by an older or sloppier client
//! still yields a usable record, with missing amounts read as zero.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::traits::{RecordId, StoredRecord};
use crate::amount::{
    amount_from_json, compute_balance, in_range, parse_amount_or_zero, MAX_AMOUNT,
};
use crate::error::{FeeLedgerError, Result};

macro_rules! record_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn record_id(&self) -> RecordId {
                RecordId::new(self.0.clone())
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<RecordId> for $name {
            fn from(value: RecordId) -> Self {
                Self(value.as_str().to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

record_id!(StudentId);
record_id!(PaymentId);

/// A student enrolled in the meal plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Backend-assigned identifier
    pub id: StudentId,

    /// Display name
    pub name: String,

    /// Room or unit number
    pub room: String,

    /// Contact number, if recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Meal plan tier
    pub lunch_type: String,
}

/// A fee payment recorded against one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Backend-assigned identifier
    pub id: PaymentId,

    /// Owning student
    pub student_id: StudentId,

    /// Fees due for this entry
    pub total_fees: Decimal,

    /// Amount paid in this entry
    pub paid_amount: Decimal,

    /// Balance as computed when the entry was made (never re-derived)
    pub balance: Decimal,

    /// Payment channel (cash, online, ...)
    pub payment_mode: String,

    /// Calendar date of the payment
    pub date: String,
}

impl Payment {
    /// `total_fees - paid_amount`, for comparison against the stored balance.
    pub fn derived_balance(&self) -> Decimal {
        self.total_fees.saturating_sub(self.paid_amount)
    }
}

fn text_field(data: &serde_json::Value, key: &str) -> String {
    match data.get(key) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn amount_field(data: &serde_json::Value, key: &str, id: &RecordId) -> Decimal {
    amount_from_json(data.get(key)).unwrap_or_else(|| {
        tracing::warn!(record = %id, field = key, "missing or non-numeric amount; using 0");
        Decimal::ZERO
    })
}

fn require_object(record: &StoredRecord) -> Result<()> {
    if record.data.is_object() {
        Ok(())
    } else {
        Err(FeeLedgerError::Validation(format!(
            "Record {} is not a JSON object",
            record.id
        )))
    }
}

impl TryFrom<&StoredRecord> for Student {
    type Error = FeeLedgerError;

    fn try_from(record: &StoredRecord) -> Result<Self> {
        require_object(record)?;
        let data = &record.data;
        let phone = Some(text_field(data, "phone")).filter(|p| !p.is_empty());

        Ok(Student {
            id: StudentId::from(record.id.clone()),
            name: text_field(data, "name"),
            room: text_field(data, "room"),
            phone,
            lunch_type: text_field(data, "lunchType"),
        })
    }
}

impl TryFrom<&StoredRecord> for Payment {
    type Error = FeeLedgerError;

    fn try_from(record: &StoredRecord) -> Result<Self> {
        require_object(record)?;
        let data = &record.data;

        Ok(Payment {
            id: PaymentId::from(record.id.clone()),
            student_id: StudentId::from(text_field(data, "studentId")),
            total_fees: amount_field(data, "totalFees", &record.id),
            paid_amount: amount_field(data, "paidAmount", &record.id),
            balance: amount_field(data, "balance", &record.id),
            payment_mode: text_field(data, "paymentMode"),
            date: text_field(data, "date"),
        })
    }
}

/// Builder for creating new students.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub room: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub lunch_type: String,
}

impl NewStudent {
    pub fn new(
        name: impl Into<String>,
        room: impl Into<String>,
        lunch_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            room: room.into(),
            phone: None,
            lunch_type: lunch_type.into(),
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        let phone = phone.into();
        self.phone = Some(phone).filter(|p| !p.trim().is_empty());
        self
    }

    /// Reject records the dashboard would never accept.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FeeLedgerError::Validation(
                "Student name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_document(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Builder for creating new payments.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub student_id: StudentId,
    pub total_fees: Decimal,
    pub paid_amount: Decimal,
    pub balance: Decimal,
    pub payment_mode: String,
    pub date: String,
}

impl NewPayment {
    /// Build a payment from exact amounts; the balance is derived once here.
    pub fn new(
        student_id: StudentId,
        total_fees: Decimal,
        paid_amount: Decimal,
        payment_mode: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            student_id,
            total_fees,
            paid_amount,
            balance: total_fees.saturating_sub(paid_amount),
            payment_mode: payment_mode.into(),
            date: date.into(),
        }
    }

    /// Build a payment from raw form input, treating unparseable amounts as zero.
    pub fn from_form(
        student_id: StudentId,
        total_fees: &str,
        paid_amount: &str,
        payment_mode: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            student_id,
            total_fees: parse_amount_or_zero(total_fees),
            paid_amount: parse_amount_or_zero(paid_amount),
            balance: compute_balance(total_fees, paid_amount),
            payment_mode: payment_mode.into(),
            date: date.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.student_id.as_str().trim().is_empty() {
            return Err(FeeLedgerError::Validation(
                "Payment must reference a student".to_string(),
            ));
        }
        if self.total_fees < Decimal::ZERO {
            return Err(FeeLedgerError::Validation(format!(
                "Total fees must not be negative: {}",
                self.total_fees
            )));
        }
        if self.paid_amount < Decimal::ZERO {
            return Err(FeeLedgerError::Validation(format!(
                "Paid amount must not be negative: {}",
                self.paid_amount
            )));
        }
        for (label, amount) in [
            ("Total fees", self.total_fees),
            ("Paid amount", self.paid_amount),
            ("Balance", self.balance),
        ] {
            if !in_range(amount) {
                return Err(FeeLedgerError::Validation(format!(
                    "{} exceeds the supported maximum of {}: {}",
                    label, MAX_AMOUNT, amount
                )));
            }
        }
        Ok(())
    }

    pub fn to_document(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
