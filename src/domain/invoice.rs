use std::fmt::Display;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::types::{InterventionId, InvoiceId, TypeConstraintError};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
        }
    }
}

impl TryFrom<&str> for InvoiceStatus {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "draft" => Ok(InvoiceStatus::Draft),
            "sent" => Ok(InvoiceStatus::Sent),
            "paid" => Ok(InvoiceStatus::Paid),
            "overdue" => Ok(InvoiceStatus::Overdue),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown invoice status: {other}"
            ))),
        }
    }
}

impl Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceType {
    Final,
    Deposit,
    Draft,
}

impl InvoiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceType::Final => "final",
            InvoiceType::Deposit => "deposit",
            InvoiceType::Draft => "draft",
        }
    }
}

impl TryFrom<&str> for InvoiceType {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "final" => Ok(InvoiceType::Final),
            "deposit" => Ok(InvoiceType::Deposit),
            "draft" => Ok(InvoiceType::Draft),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown invoice type: {other}"
            ))),
        }
    }
}

impl Display for InvoiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Billing record referencing exactly one intervention by value.
///
/// The reference crosses the partition boundary and is never a SQL join;
/// multiple invoice rows per intervention are possible, but only the
/// `final`+`sent` one qualifies for rollups.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub id: InvoiceId,
    pub intervention_id: InterventionId,
    pub invoice_number: String,
    pub invoice_type: InvoiceType,
    pub status: InvoiceStatus,
    pub invoice_date: NaiveDateTime,
    pub due_date: Option<NaiveDateTime>,
    pub total_ht: Decimal,
    pub total_ttc: Decimal,
    pub amount_paid: Decimal,
}

impl Invoice {
    /// Whether this row is "the" invoice surfaced by reconciliation.
    pub fn is_qualifying(&self) -> bool {
        self.invoice_type == InvoiceType::Final && self.status == InvoiceStatus::Sent
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewInvoice {
    pub intervention_id: InterventionId,
    pub invoice_number: String,
    pub invoice_type: InvoiceType,
    pub status: InvoiceStatus,
    pub invoice_date: NaiveDateTime,
    pub due_date: Option<NaiveDateTime>,
    pub total_ht: Decimal,
    pub total_ttc: Decimal,
    pub amount_paid: Decimal,
}

impl NewInvoice {
    #[must_use]
    pub fn new(
        intervention_id: InterventionId,
        invoice_number: impl Into<String>,
        invoice_date: NaiveDateTime,
    ) -> Self {
        Self {
            intervention_id,
            invoice_number: invoice_number.into(),
            invoice_type: InvoiceType::Final,
            status: InvoiceStatus::Draft,
            invoice_date,
            due_date: None,
            total_ht: Decimal::ZERO,
            total_ttc: Decimal::ZERO,
            amount_paid: Decimal::ZERO,
        }
    }

    #[must_use]
    pub fn invoice_type(mut self, invoice_type: InvoiceType) -> Self {
        self.invoice_type = invoice_type;
        self
    }

    #[must_use]
    pub fn status(mut self, status: InvoiceStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn totals(mut self, total_ht: Decimal, total_ttc: Decimal) -> Self {
        self.total_ht = total_ht;
        self.total_ttc = total_ttc;
        self
    }
}
