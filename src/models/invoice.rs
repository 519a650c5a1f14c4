use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::invoice::{
    Invoice as DomainInvoice, InvoiceStatus, InvoiceType, NewInvoice as DomainNewInvoice,
};
use crate::domain::types::{InterventionId, InvoiceId, TypeConstraintError, parse_amount};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::billing::invoices)]
/// Diesel model for [`crate::domain::invoice::Invoice`].
pub struct Invoice {
    pub id: i32,
    pub intervention_id: i32,
    pub invoice_number: String,
    pub invoice_type: String,
    pub status: String,
    pub invoice_date: NaiveDateTime,
    pub due_date: Option<NaiveDateTime>,
    pub total_ht: String,
    pub total_ttc: String,
    pub amount_paid: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::billing::invoices)]
/// Insertable form of [`Invoice`].
pub struct NewInvoice {
    pub intervention_id: i32,
    pub invoice_number: String,
    pub invoice_type: String,
    pub status: String,
    pub invoice_date: NaiveDateTime,
    pub due_date: Option<NaiveDateTime>,
    pub total_ht: String,
    pub total_ttc: String,
    pub amount_paid: String,
}

impl TryFrom<Invoice> for DomainInvoice {
    type Error = TypeConstraintError;

    fn try_from(invoice: Invoice) -> Result<Self, Self::Error> {
        Ok(Self {
            id: InvoiceId::new(invoice.id)?,
            intervention_id: InterventionId::new(invoice.intervention_id)?,
            invoice_number: invoice.invoice_number,
            invoice_type: InvoiceType::try_from(invoice.invoice_type.as_str())?,
            status: InvoiceStatus::try_from(invoice.status.as_str())?,
            invoice_date: invoice.invoice_date,
            due_date: invoice.due_date,
            total_ht: parse_amount(&invoice.total_ht)?,
            total_ttc: parse_amount(&invoice.total_ttc)?,
            amount_paid: parse_amount(&invoice.amount_paid)?,
        })
    }
}

impl From<&DomainNewInvoice> for NewInvoice {
    fn from(invoice: &DomainNewInvoice) -> Self {
        Self {
            intervention_id: invoice.intervention_id.get(),
            invoice_number: invoice.invoice_number.clone(),
            invoice_type: invoice.invoice_type.as_str().to_string(),
            status: invoice.status.as_str().to_string(),
            invoice_date: invoice.invoice_date,
            due_date: invoice.due_date,
            total_ht: invoice.total_ht.to_string(),
            total_ttc: invoice.total_ttc.to_string(),
            amount_paid: invoice.amount_paid.to_string(),
        }
    }
}
