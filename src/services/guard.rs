//! Referential delete guard for clients.
//!
//! Interventions hold a RESTRICT foreign key on their client, so a delete
//! is first checked against the dependent count and, should another writer
//! slip an intervention in between the check and the delete, the database
//! constraint still refuses the statement. Both paths surface the same
//! structured refusal.

use crate::domain::types::ClientId;
use crate::repository::{ClientReader, ClientWriter, InterventionReader};
use crate::services::{ServiceError, ServiceResult};

/// Result of a non-mutating delete feasibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteCheck {
    pub allowed: bool,
    pub blocking_count: i64,
}

/// Outcome of an attempted client delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Refused { intervention_count: i64 },
}

/// Reports whether the client could currently be deleted, without mutating
/// anything.
pub fn can_delete_client<R>(repo: &R, client_id: ClientId) -> ServiceResult<DeleteCheck>
where
    R: InterventionReader + ?Sized,
{
    let blocking_count = repo.count_interventions_by_client(client_id)?;
    Ok(DeleteCheck {
        allowed: blocking_count == 0,
        blocking_count,
    })
}

/// Deletes a client unless interventions still reference it.
///
/// Returns [`ServiceError::NotFound`] when the client does not exist. A
/// constraint violation raised by the delete itself is converted into a
/// refusal with a freshly read count, floored at one since the database
/// has just proven at least one dependent row exists.
pub fn delete_client<R>(repo: &R, client_id: ClientId) -> ServiceResult<DeleteOutcome>
where
    R: ClientReader + ClientWriter + InterventionReader + ?Sized,
{
    repo.get_client_by_id(client_id)?
        .ok_or(ServiceError::NotFound)?;

    let check = can_delete_client(repo, client_id)?;
    if !check.allowed {
        return Ok(DeleteOutcome::Refused {
            intervention_count: check.blocking_count,
        });
    }

    match repo.delete_client(client_id) {
        Ok(()) => Ok(DeleteOutcome::Deleted),
        Err(err) if err.is_constraint_violation() => {
            let intervention_count = repo.count_interventions_by_client(client_id)?.max(1);
            Ok(DeleteOutcome::Refused { intervention_count })
        }
        Err(err) => Err(err.into()),
    }
}
