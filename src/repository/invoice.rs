//! Repository implementation for invoices (billing partition).

use diesel::prelude::*;

use crate::domain::invoice::{Invoice, NewInvoice};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, InvoiceListQuery, InvoiceReader, InvoiceWriter};

impl InvoiceReader for DieselRepository {
    fn list_invoices(&self, query: InvoiceListQuery) -> RepositoryResult<Vec<Invoice>> {
        use crate::models::invoice::Invoice as DbInvoice;
        use crate::schema::billing::invoices;

        let mut conn = self.billing_conn()?;

        let mut statement = invoices::table.into_boxed();
        if let Some(ids) = &query.intervention_ids {
            let raw: Vec<i32> = ids.iter().map(|id| id.get()).collect();
            statement = statement.filter(invoices::intervention_id.eq_any(raw));
        }
        if let Some(invoice_type) = query.invoice_type {
            statement = statement.filter(invoices::invoice_type.eq(invoice_type.as_str()));
        }
        if let Some(status) = query.status {
            statement = statement.filter(invoices::status.eq(status.as_str()));
        }

        statement
            .order(invoices::id.asc())
            .load::<DbInvoice>(&mut conn)?
            .into_iter()
            .map(|invoice| Invoice::try_from(invoice).map_err(RepositoryError::from))
            .collect()
    }
}

impl InvoiceWriter for DieselRepository {
    fn create_invoices(&self, new_invoices: &[NewInvoice]) -> RepositoryResult<usize> {
        use crate::models::invoice::NewInvoice as DbNewInvoice;
        use crate::schema::billing::invoices;

        let mut conn = self.billing_conn()?;
        let insertables: Vec<DbNewInvoice> = new_invoices.iter().map(Into::into).collect();
        let affected = diesel::insert_into(invoices::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
