//! Repository implementation for interventions and their type tags
//! (operational partition).

use std::collections::HashMap;

use diesel::prelude::*;

use crate::domain::intervention::{Intervention, InterventionTag, NewIntervention};
use crate::domain::types::{ClientId, InterventionId};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, InterventionListQuery, InterventionReader, InterventionWriter,
};

/// Loads tag rows for the given intervention ids and groups them by id.
///
/// Tags live in their own table and are attached with one batched query
/// instead of a per-row lookup.
fn load_tags(
    conn: &mut crate::db::DbConnection,
    intervention_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<InterventionTag>>> {
    use crate::models::intervention::InterventionTypeRow;
    use crate::schema::operational::intervention_types;

    let rows = intervention_types::table
        .filter(intervention_types::intervention_id.eq_any(intervention_ids))
        .load::<InterventionTypeRow>(conn)?;

    let mut grouped: HashMap<i32, Vec<InterventionTag>> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.intervention_id)
            .or_default()
            .push(InterventionTag::from(row.tag.as_str()));
    }
    Ok(grouped)
}

impl InterventionReader for DieselRepository {
    fn get_intervention_by_id(
        &self,
        id: InterventionId,
    ) -> RepositoryResult<Option<Intervention>> {
        use crate::models::intervention::Intervention as DbIntervention;
        use crate::schema::operational::interventions;

        let mut conn = self.operational_conn()?;
        let row = interventions::table
            .find(id.get())
            .first::<DbIntervention>(&mut conn)
            .optional()?;

        match row {
            Some(row) => {
                let tags = load_tags(&mut conn, &[row.id])?
                    .remove(&row.id)
                    .unwrap_or_default();
                Ok(Some(
                    row.into_domain(tags).map_err(RepositoryError::from)?,
                ))
            }
            None => Ok(None),
        }
    }

    fn list_interventions(
        &self,
        query: InterventionListQuery,
    ) -> RepositoryResult<Vec<Intervention>> {
        use crate::models::intervention::Intervention as DbIntervention;
        use crate::schema::operational::interventions;

        let mut conn = self.operational_conn()?;

        let mut statement = interventions::table.into_boxed();
        if let Some(client_id) = query.client_id {
            statement = statement.filter(interventions::client_id.eq(client_id.get()));
        }
        if let Some(ids) = &query.ids {
            let raw: Vec<i32> = ids.iter().map(|id| id.get()).collect();
            statement = statement.filter(interventions::id.eq_any(raw));
        }
        if let Some(status) = query.status {
            statement = statement.filter(interventions::status.eq(status.as_str()));
        }
        // Client history reads newest-first; the global list is agenda order.
        statement = if query.client_id.is_some() {
            statement.order(interventions::scheduled_date.desc())
        } else {
            statement.order(interventions::scheduled_date.asc())
        };

        let rows = statement.load::<DbIntervention>(&mut conn)?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
        let mut tags = load_tags(&mut conn, &ids)?;

        rows.into_iter()
            .map(|row| {
                let row_tags = tags.remove(&row.id).unwrap_or_default();
                row.into_domain(row_tags).map_err(RepositoryError::from)
            })
            .collect()
    }

    fn count_interventions_by_client(&self, client_id: ClientId) -> RepositoryResult<i64> {
        use crate::schema::operational::interventions;

        let mut conn = self.operational_conn()?;
        let count = interventions::table
            .filter(interventions::client_id.eq(client_id.get()))
            .count()
            .get_result(&mut conn)?;
        Ok(count)
    }

    fn count_interventions_per_client(&self) -> RepositoryResult<Vec<(ClientId, i64)>> {
        use diesel::dsl::count_star;

        use crate::schema::operational::interventions;

        let mut conn = self.operational_conn()?;
        interventions::table
            .group_by(interventions::client_id)
            .select((interventions::client_id, count_star()))
            .load::<(i32, i64)>(&mut conn)?
            .into_iter()
            .map(|(client_id, count)| {
                Ok((
                    ClientId::new(client_id).map_err(RepositoryError::from)?,
                    count,
                ))
            })
            .collect()
    }
}

impl InterventionWriter for DieselRepository {
    fn create_interventions(
        &self,
        new_interventions: &[NewIntervention],
    ) -> RepositoryResult<usize> {
        use crate::models::intervention::{
            Intervention as DbIntervention, NewIntervention as DbNewIntervention,
            NewInterventionTypeRow,
        };
        use crate::schema::operational::{intervention_types, interventions};

        let mut conn = self.operational_conn()?;

        conn.transaction::<usize, RepositoryError, _>(|conn| {
            let mut affected = 0;
            for new_intervention in new_interventions {
                let insertable: DbNewIntervention = new_intervention.into();
                let inserted = diesel::insert_into(interventions::table)
                    .values(&insertable)
                    .get_result::<DbIntervention>(conn)?;

                let tag_rows: Vec<NewInterventionTypeRow> = new_intervention
                    .tags
                    .iter()
                    .map(|tag| NewInterventionTypeRow {
                        intervention_id: inserted.id,
                        tag: tag.as_str().to_string(),
                    })
                    .collect();
                if !tag_rows.is_empty() {
                    diesel::insert_into(intervention_types::table)
                        .values(&tag_rows)
                        .execute(conn)?;
                }
                affected += 1;
            }
            Ok(affected)
        })
    }
}
