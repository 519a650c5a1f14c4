//! Cross-partition reconciliation.
//!
//! The operational and billing partitions cannot be joined in SQL, so the
//! engine batches one fetch per partition and stitches the rows together by
//! key in memory. The batched fetch-then-join is what keeps these reads free
//! of N+1 round trips.

use std::collections::HashMap;

use crate::domain::intervention::Intervention;
use crate::domain::invoice::Invoice;
use crate::domain::types::{ClientId, InterventionId};
use crate::dto::client::ClientSummary;
use crate::dto::intervention::{ClientOverview, ReconciledIntervention};
use crate::dto::invoice::{InvoiceContext, InvoiceListData, InvoiceWithContext};
use crate::repository::{
    ClientReader, InterventionListQuery, InterventionReader, InvoiceListQuery, InvoiceReader,
};
use crate::services::cache::ClientCache;
use crate::services::{ServiceError, ServiceResult, finance};

/// Stitches interventions to their qualifying invoice.
///
/// An empty intervention set short-circuits without touching the billing
/// partition. When a data anomaly leaves several qualifying invoices on one
/// intervention, the first encountered in fetch order wins deterministically.
pub fn interventions_with_invoices<R>(
    repo: &R,
    query: InterventionListQuery,
) -> ServiceResult<Vec<ReconciledIntervention>>
where
    R: InterventionReader + InvoiceReader + ?Sized,
{
    let interventions = repo.list_interventions(query)?;
    if interventions.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<InterventionId> = interventions.iter().map(|i| i.id).collect();
    let invoices = repo.list_invoices(InvoiceListQuery::new().intervention_ids(ids).qualifying())?;

    let mut by_intervention: HashMap<InterventionId, Invoice> = HashMap::new();
    for invoice in invoices {
        by_intervention.entry(invoice.intervention_id).or_insert(invoice);
    }

    Ok(interventions
        .into_iter()
        .map(|intervention| reconcile_one(intervention, &mut by_intervention))
        .collect())
}

fn reconcile_one(
    intervention: Intervention,
    invoices: &mut HashMap<InterventionId, Invoice>,
) -> ReconciledIntervention {
    let invoice_total = invoices.remove(&intervention.id).map(|inv| inv.total_ttc);
    ReconciledIntervention {
        has_final_invoice: invoice_total.is_some(),
        invoice_total,
        display_total: finance::displayed_total(&intervention),
        intervention,
    }
}

/// The inverse direction: invoices annotated with a minimal
/// intervention+client projection.
///
/// Invoices whose intervention lookup misses keep an empty context and are
/// still returned. Client rows come from a request-scoped memo cache, one
/// fetch per distinct client per invocation.
pub fn invoices_with_context<R>(repo: &R, query: InvoiceListQuery) -> ServiceResult<InvoiceListData>
where
    R: InvoiceReader + InterventionReader + ClientReader + ?Sized,
{
    let invoices = repo.list_invoices(query)?;
    let stats = finance::invoice_stats(&invoices);
    if invoices.is_empty() {
        return Ok(InvoiceListData {
            invoices: Vec::new(),
            stats,
        });
    }

    let mut ids: Vec<InterventionId> = invoices.iter().map(|inv| inv.intervention_id).collect();
    ids.sort_by_key(|id| id.get());
    ids.dedup();

    let interventions: HashMap<InterventionId, Intervention> = repo
        .list_interventions(InterventionListQuery::new().ids(ids))?
        .into_iter()
        .map(|intervention| (intervention.id, intervention))
        .collect();

    let cache = ClientCache::new();
    let mut annotated = Vec::with_capacity(invoices.len());
    for invoice in invoices {
        let context = match interventions.get(&invoice.intervention_id) {
            Some(intervention) => {
                let client = cache.get_or_fetch(repo, intervention.client_id)?;
                Some(InvoiceContext {
                    reference: intervention.reference.clone(),
                    scheduled_date: intervention.scheduled_date,
                    client_name: client.map(|c| c.display_name()).unwrap_or_default(),
                })
            }
            None => None,
        };
        annotated.push(InvoiceWithContext { invoice, context });
    }

    Ok(InvoiceListData {
        invoices: annotated,
        stats,
    })
}

/// Client detail projection: the client, its derived intervention count and
/// its reconciled intervention history (newest first).
pub fn client_overview<R>(repo: &R, client_id: ClientId) -> ServiceResult<ClientOverview>
where
    R: ClientReader + InterventionReader + InvoiceReader + ?Sized,
{
    let client = repo
        .get_client_by_id(client_id)?
        .ok_or(ServiceError::NotFound)?;
    let interventions =
        interventions_with_invoices(repo, InterventionListQuery::new().client(client_id))?;
    let intervention_count = repo.count_interventions_by_client(client_id)?;

    Ok(ClientOverview {
        client,
        intervention_count,
        interventions,
    })
}

/// Client list with per-client intervention counts, one grouped count query
/// instead of a count per row.
pub fn list_client_summaries<R>(repo: &R) -> ServiceResult<Vec<ClientSummary>>
where
    R: ClientReader + InterventionReader + ?Sized,
{
    let clients = repo.list_clients()?;
    let counts: HashMap<ClientId, i64> = repo
        .count_interventions_per_client()?
        .into_iter()
        .collect();

    Ok(clients
        .into_iter()
        .map(|client| {
            let intervention_count = counts.get(&client.id).copied().unwrap_or(0);
            ClientSummary {
                client,
                intervention_count,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::client::{Client, ClientType};
    use crate::domain::intervention::InterventionStatus;
    use crate::domain::invoice::{InvoiceStatus, InvoiceType};
    use crate::domain::types::InvoiceId;
    use crate::repository::mock::MockRepository;

    fn intervention(id: i32, client_id: i32) -> Intervention {
        Intervention {
            id: InterventionId::new(id).unwrap(),
            client_id: ClientId::new(client_id).unwrap(),
            reference: format!("INT-{id}"),
            scheduled_date: Utc::now().naive_utc(),
            status: InterventionStatus::Scheduled,
            description: None,
            labor_hours: None,
            labor_rate: None,
            travel_fee: Decimal::ZERO,
            total_ttc: Decimal::ZERO,
            gcal_event_id: None,
            signed_by: None,
            completed_at: None,
            created_at: Utc::now().naive_utc(),
            tags: BTreeSet::new(),
        }
    }

    fn invoice(id: i32, intervention_id: i32, total_ttc: Decimal) -> Invoice {
        Invoice {
            id: InvoiceId::new(id).unwrap(),
            intervention_id: InterventionId::new(intervention_id).unwrap(),
            invoice_number: format!("F-{id}"),
            invoice_type: InvoiceType::Final,
            status: InvoiceStatus::Sent,
            invoice_date: Utc::now().naive_utc(),
            due_date: None,
            total_ht: total_ttc,
            total_ttc,
            amount_paid: Decimal::ZERO,
        }
    }

    fn client(id: i32) -> Client {
        Client {
            id: ClientId::new(id).unwrap(),
            client_type: ClientType::Individual,
            first_name: Some("Jean".to_string()),
            last_name: Some("Dupont".to_string()),
            company_name: None,
            email: None,
            phone: None,
            address: None,
            city: None,
            postal_code: None,
            notes: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn interventions_pick_up_their_qualifying_invoice() {
        let mut repo = MockRepository::new();
        repo.expect_list_interventions()
            .times(1)
            .returning(|_| Ok(vec![intervention(1, 1), intervention(2, 1)]));
        repo.expect_list_invoices()
            .times(1)
            .withf(|query| {
                query.invoice_type == Some(InvoiceType::Final)
                    && query.status == Some(InvoiceStatus::Sent)
                    && query
                        .intervention_ids
                        .as_ref()
                        .is_some_and(|ids| ids.len() == 2)
            })
            .returning(|_| Ok(vec![invoice(10, 2, dec!(250.00))]));

        let reconciled =
            interventions_with_invoices(&repo, InterventionListQuery::new()).unwrap();
        assert_eq!(reconciled.len(), 2);
        assert!(!reconciled[0].has_final_invoice);
        assert_eq!(reconciled[0].invoice_total, None);
        assert!(reconciled[1].has_final_invoice);
        assert_eq!(reconciled[1].invoice_total, Some(dec!(250.00)));
    }

    #[test]
    fn empty_intervention_set_never_queries_the_billing_partition() {
        let mut repo = MockRepository::new();
        repo.expect_list_interventions()
            .times(1)
            .returning(|_| Ok(Vec::new()));
        repo.expect_list_invoices().never();

        let reconciled =
            interventions_with_invoices(&repo, InterventionListQuery::new()).unwrap();
        assert!(reconciled.is_empty());
    }

    #[test]
    fn duplicate_qualifying_invoices_resolve_to_the_first_fetched() {
        let mut repo = MockRepository::new();
        repo.expect_list_interventions()
            .times(1)
            .returning(|_| Ok(vec![intervention(1, 1)]));
        repo.expect_list_invoices()
            .times(1)
            .returning(|_| Ok(vec![invoice(10, 1, dec!(100)), invoice(11, 1, dec!(999))]));

        let reconciled =
            interventions_with_invoices(&repo, InterventionListQuery::new()).unwrap();
        assert_eq!(reconciled[0].invoice_total, Some(dec!(100)));
    }

    #[test]
    fn invoices_keep_missing_context_and_memoize_client_reads() {
        let mut repo = MockRepository::new();
        repo.expect_list_invoices()
            .times(1)
            .returning(|_| Ok(vec![invoice(1, 1, dec!(50)), invoice(2, 1, dec!(60)), invoice(3, 7, dec!(70))]));
        // Intervention 7 is gone from the operational partition.
        repo.expect_list_interventions()
            .times(1)
            .returning(|_| Ok(vec![intervention(1, 4)]));
        repo.expect_get_client_by_id()
            .times(1)
            .returning(|id| Ok(Some(client(id.get()))));

        let data = invoices_with_context(&repo, InvoiceListQuery::new()).unwrap();
        assert_eq!(data.invoices.len(), 3);
        assert_eq!(
            data.invoices[0].context.as_ref().map(|c| c.client_name.as_str()),
            Some("Jean Dupont")
        );
        assert!(data.invoices[1].context.is_some());
        assert!(data.invoices[2].context.is_none());
        assert_eq!(data.stats.total, 3);
        assert_eq!(data.stats.total_amount, dec!(180));
    }

    #[test]
    fn client_summaries_join_grouped_counts() {
        let mut repo = MockRepository::new();
        repo.expect_list_clients()
            .times(1)
            .returning(|| Ok(vec![client(1), client(2)]));
        repo.expect_count_interventions_per_client()
            .times(1)
            .returning(|| Ok(vec![(ClientId::new(2).unwrap(), 3)]));

        let summaries = list_client_summaries(&repo).unwrap();
        assert_eq!(summaries[0].intervention_count, 0);
        assert_eq!(summaries[1].intervention_count, 3);
    }
}
