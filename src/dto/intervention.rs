//! DTOs produced by the reconciliation services.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::intervention::Intervention;

/// An intervention stitched to its qualifying invoice across partitions.
///
/// `invoice_total` and `has_final_invoice` come from the billing partition;
/// `display_total` is the derived labor+travel figure, present only when
/// strictly positive, and deliberately distinct from the stored `total_ttc`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReconciledIntervention {
    #[serde(flatten)]
    pub intervention: Intervention,
    pub invoice_total: Option<Decimal>,
    pub has_final_invoice: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_total: Option<Decimal>,
}

/// Everything the client detail surface needs in one pass.
#[derive(Debug, Clone, Serialize)]
pub struct ClientOverview {
    pub client: Client,
    pub intervention_count: i64,
    pub interventions: Vec<ReconciledIntervention>,
}
