//! DTOs for the invoice list surface and its aggregate statistics.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::invoice::Invoice;

/// Minimal intervention+client projection attached to an invoice row.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InvoiceContext {
    pub reference: String,
    pub scheduled_date: NaiveDateTime,
    pub client_name: String,
}

/// An invoice with its (possibly missing) cross-partition context.
///
/// Invoices whose intervention lookup misses keep `context: None` but are
/// still returned, never dropped.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InvoiceWithContext {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub context: Option<InvoiceContext>,
}

/// Aggregate statistics over a collection of invoices.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct InvoiceStats {
    pub total: usize,
    pub sent: usize,
    pub paid: usize,
    pub overdue: usize,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
}

/// Result payload for the invoice list endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceListData {
    pub invoices: Vec<InvoiceWithContext>,
    pub stats: InvoiceStats,
}
