//! Request-scoped memoization of client lookups.
//!
//! Reconciliation passes may reference the same client from many invoice
//! rows. The cache lives for a single invocation and is dropped with it; a
//! longer-lived cache would leak stale reads across requests.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::domain::client::Client;
use crate::domain::types::ClientId;
use crate::repository::ClientReader;
use crate::repository::errors::RepositoryResult;

#[derive(Default)]
pub struct ClientCache {
    entries: RefCell<HashMap<ClientId, Option<Client>>>,
}

impl ClientCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached lookup result or fetches and remembers it.
    ///
    /// Missing clients are memoized as `None` too; store errors are not
    /// memoized, so a transient failure does not poison later lookups.
    pub fn get_or_fetch<R>(&self, repo: &R, id: ClientId) -> RepositoryResult<Option<Client>>
    where
        R: ClientReader + ?Sized,
    {
        if let Some(hit) = self.entries.borrow().get(&id) {
            return Ok(hit.clone());
        }
        let fetched = repo.get_client_by_id(id)?;
        self.entries.borrow_mut().insert(id, fetched.clone());
        Ok(fetched)
    }
}
