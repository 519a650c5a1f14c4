//! Repository implementation for clients (operational partition).

use diesel::prelude::*;

use crate::domain::client::{Client, NewClient};
use crate::domain::types::ClientId;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientReader, ClientWriter, DieselRepository};

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        use crate::models::client::Client as DbClient;
        use crate::schema::operational::clients;

        let mut conn = self.operational_conn()?;
        let client = clients::table
            .find(id.get())
            .first::<DbClient>(&mut conn)
            .optional()?;

        match client {
            Some(client) => Ok(Some(
                Client::try_from(client).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        use crate::models::client::Client as DbClient;
        use crate::schema::operational::clients;

        let mut conn = self.operational_conn()?;
        clients::table
            .order((clients::last_name.asc(), clients::first_name.asc()))
            .load::<DbClient>(&mut conn)?
            .into_iter()
            .map(|client| Client::try_from(client).map_err(RepositoryError::from))
            .collect()
    }
}

impl ClientWriter for DieselRepository {
    fn create_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize> {
        use crate::models::client::NewClient as DbNewClient;
        use crate::schema::operational::clients;

        let mut conn = self.operational_conn()?;
        let insertables: Vec<DbNewClient> = new_clients.iter().map(Into::into).collect();
        let affected = diesel::insert_into(clients::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_client(&self, client_id: ClientId) -> RepositoryResult<()> {
        use crate::schema::operational::clients;

        let mut conn = self.operational_conn()?;

        // The RESTRICT foreign key on interventions.client_id raises a
        // constraint violation here whenever dependents still exist; callers
        // map that to a structured refusal.
        diesel::delete(clients::table.find(client_id.get())).execute(&mut conn)?;
        Ok(())
    }
}
