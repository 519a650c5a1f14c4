//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::client::{Client, NewClient};
use crate::domain::intervention::{Intervention, NewIntervention};
use crate::domain::invoice::{Invoice, NewInvoice};
use crate::domain::types::{ClientId, InterventionId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ClientReader, ClientWriter, InterventionListQuery, InterventionReader, InterventionWriter,
    InvoiceListQuery, InvoiceReader, InvoiceWriter,
};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
    }

    impl ClientWriter for Repository {
        fn create_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize>;
        fn delete_client(&self, client_id: ClientId) -> RepositoryResult<()>;
    }

    impl InterventionReader for Repository {
        fn get_intervention_by_id(
            &self,
            id: InterventionId,
        ) -> RepositoryResult<Option<Intervention>>;
        fn list_interventions(
            &self,
            query: InterventionListQuery,
        ) -> RepositoryResult<Vec<Intervention>>;
        fn count_interventions_by_client(&self, client_id: ClientId) -> RepositoryResult<i64>;
        fn count_interventions_per_client(&self) -> RepositoryResult<Vec<(ClientId, i64)>>;
    }

    impl InterventionWriter for Repository {
        fn create_interventions(
            &self,
            new_interventions: &[NewIntervention],
        ) -> RepositoryResult<usize>;
    }

    impl InvoiceReader for Repository {
        fn list_invoices(&self, query: InvoiceListQuery) -> RepositoryResult<Vec<Invoice>>;
    }

    impl InvoiceWriter for Repository {
        fn create_invoices(&self, new_invoices: &[NewInvoice]) -> RepositoryResult<usize>;
    }
}
