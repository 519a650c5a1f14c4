use crate::db::{DbConnection, DbPool};
use crate::domain::client::{Client, NewClient};
use crate::domain::intervention::{Intervention, InterventionStatus, NewIntervention};
use crate::domain::invoice::{Invoice, InvoiceStatus, InvoiceType, NewInvoice};
use crate::domain::types::{ClientId, InterventionId};
use crate::repository::errors::RepositoryResult;

pub mod client;
pub mod errors;
pub mod intervention;
pub mod invoice;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Scope and filters for intervention list queries.
///
/// Client-scoped lists are ordered by `scheduled_date` descending (most
/// recent visit first); unscoped lists ascending (agenda order).
#[derive(Debug, Clone, Default)]
pub struct InterventionListQuery {
    pub client_id: Option<ClientId>,
    pub ids: Option<Vec<InterventionId>>,
    pub status: Option<InterventionStatus>,
}

impl InterventionListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn ids(mut self, ids: Vec<InterventionId>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn status(mut self, status: InterventionStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Filters for invoice list queries against the billing partition.
#[derive(Debug, Clone, Default)]
pub struct InvoiceListQuery {
    pub intervention_ids: Option<Vec<InterventionId>>,
    pub invoice_type: Option<InvoiceType>,
    pub status: Option<InvoiceStatus>,
}

impl InvoiceListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intervention_ids(mut self, ids: Vec<InterventionId>) -> Self {
        self.intervention_ids = Some(ids);
        self
    }

    pub fn invoice_type(mut self, invoice_type: InvoiceType) -> Self {
        self.invoice_type = Some(invoice_type);
        self
    }

    pub fn status(mut self, status: InvoiceStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Filters down to the rollup-qualifying invoices (`final` + `sent`).
    pub fn qualifying(self) -> Self {
        self.invoice_type(InvoiceType::Final).status(InvoiceStatus::Sent)
    }
}

pub trait ClientReader {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    /// Ordered by `(last_name, first_name)`.
    fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
}

pub trait ClientWriter {
    fn create_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize>;
    fn delete_client(&self, client_id: ClientId) -> RepositoryResult<()>;
}

pub trait InterventionReader {
    fn get_intervention_by_id(
        &self,
        id: InterventionId,
    ) -> RepositoryResult<Option<Intervention>>;
    fn list_interventions(
        &self,
        query: InterventionListQuery,
    ) -> RepositoryResult<Vec<Intervention>>;
    fn count_interventions_by_client(&self, client_id: ClientId) -> RepositoryResult<i64>;
    /// Intervention counts grouped by owning client, for list rollups.
    fn count_interventions_per_client(&self) -> RepositoryResult<Vec<(ClientId, i64)>>;
}

pub trait InterventionWriter {
    fn create_interventions(
        &self,
        new_interventions: &[NewIntervention],
    ) -> RepositoryResult<usize>;
}

pub trait InvoiceReader {
    fn list_invoices(&self, query: InvoiceListQuery) -> RepositoryResult<Vec<Invoice>>;
}

pub trait InvoiceWriter {
    fn create_invoices(&self, new_invoices: &[NewInvoice]) -> RepositoryResult<usize>;
}

/// Diesel-backed store adapter holding one pool per partition.
#[derive(Clone)]
pub struct DieselRepository {
    operational: DbPool,
    billing: DbPool,
}

impl DieselRepository {
    pub fn new(operational: DbPool, billing: DbPool) -> Self {
        Self {
            operational,
            billing,
        }
    }

    pub(crate) fn operational_conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.operational.get()?)
    }

    pub(crate) fn billing_conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.billing.get()?)
    }
}
