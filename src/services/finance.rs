//! Financial aggregation: derived display totals and invoice statistics.
//!
//! Everything here is a pure function of its input, safe to recompute on
//! every read and idempotent under repeated invocation.

use rust_decimal::Decimal;

use crate::domain::intervention::Intervention;
use crate::domain::invoice::{Invoice, InvoiceStatus};
use crate::dto::invoice::InvoiceStats;

/// Derived labor-plus-travel total for an intervention card.
///
/// Null labor fields count as zero and negative operands are clamped to
/// zero. This figure is independent from the stored `total_ttc`, which
/// reflects invoice-driven amounts.
pub fn display_total(intervention: &Intervention) -> Decimal {
    let hours = intervention
        .labor_hours
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO);
    let rate = intervention
        .labor_rate
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO);
    let travel = intervention.travel_fee.max(Decimal::ZERO);
    (hours * rate + travel).round_dp(2)
}

/// [`display_total`] gated for rendering: present only when strictly
/// positive.
pub fn displayed_total(intervention: &Intervention) -> Option<Decimal> {
    Some(display_total(intervention)).filter(|total| *total > Decimal::ZERO)
}

/// Aggregate statistics over a collection of invoices.
///
/// Counts and sums are order-independent; sums use exact decimal
/// arithmetic over `total_ttc`.
pub fn invoice_stats(invoices: &[Invoice]) -> InvoiceStats {
    let mut stats = InvoiceStats {
        total: invoices.len(),
        ..InvoiceStats::default()
    };
    for invoice in invoices {
        match invoice.status {
            InvoiceStatus::Sent => stats.sent += 1,
            InvoiceStatus::Paid => stats.paid += 1,
            InvoiceStatus::Overdue => stats.overdue += 1,
            InvoiceStatus::Draft => {}
        }
        stats.total_amount += invoice.total_ttc;
        if invoice.status == InvoiceStatus::Paid {
            stats.paid_amount += invoice.total_ttc;
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::Utc;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::intervention::InterventionStatus;
    use crate::domain::invoice::InvoiceType;
    use crate::domain::types::{ClientId, InterventionId, InvoiceId};

    fn intervention(
        hours: Option<Decimal>,
        rate: Option<Decimal>,
        travel: Decimal,
    ) -> Intervention {
        Intervention {
            id: InterventionId::new(1).unwrap(),
            client_id: ClientId::new(1).unwrap(),
            reference: "INT-1".to_string(),
            scheduled_date: Utc::now().naive_utc(),
            status: InterventionStatus::Scheduled,
            description: None,
            labor_hours: hours,
            labor_rate: rate,
            travel_fee: travel,
            total_ttc: dec!(999),
            gcal_event_id: None,
            signed_by: None,
            completed_at: None,
            created_at: Utc::now().naive_utc(),
            tags: BTreeSet::new(),
        }
    }

    fn invoice(id: i32, status: InvoiceStatus, total_ttc: Decimal) -> Invoice {
        Invoice {
            id: InvoiceId::new(id).unwrap(),
            intervention_id: InterventionId::new(id).unwrap(),
            invoice_number: format!("F-{id}"),
            invoice_type: InvoiceType::Final,
            status,
            invoice_date: Utc::now().naive_utc(),
            due_date: None,
            total_ht: total_ttc,
            total_ttc,
            amount_paid: Decimal::ZERO,
        }
    }

    #[test]
    fn null_labor_fields_count_as_zero() {
        let i = intervention(Some(dec!(3)), None, dec!(20));
        assert_eq!(display_total(&i), dec!(20.00));
        assert_eq!(displayed_total(&i), Some(dec!(20.00)));
    }

    #[test]
    fn labor_and_travel_sum_into_the_display_total() {
        let i = intervention(Some(dec!(2)), Some(dec!(45)), dec!(10));
        assert_eq!(display_total(&i), dec!(100.00));
    }

    #[test]
    fn zero_total_is_hidden() {
        let i = intervention(Some(Decimal::ZERO), Some(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(display_total(&i), Decimal::ZERO);
        assert_eq!(displayed_total(&i), None);
    }

    #[test]
    fn negative_operands_are_clamped() {
        let i = intervention(Some(dec!(-2)), Some(dec!(45)), dec!(-10));
        assert_eq!(display_total(&i), Decimal::ZERO);
    }

    #[test]
    fn display_total_ignores_stored_total_ttc() {
        let i = intervention(None, None, dec!(15));
        assert_eq!(display_total(&i), dec!(15.00));
        assert_eq!(i.total_ttc, dec!(999));
    }

    #[test]
    fn stats_count_by_status_and_sum_exactly() {
        let invoices = vec![
            invoice(1, InvoiceStatus::Sent, dec!(100.10)),
            invoice(2, InvoiceStatus::Paid, dec!(200.20)),
            invoice(3, InvoiceStatus::Overdue, dec!(50)),
            invoice(4, InvoiceStatus::Draft, dec!(25.05)),
        ];
        let stats = invoice_stats(&invoices);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.sent, 1);
        assert_eq!(stats.paid, 1);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.total_amount, dec!(375.35));
        assert_eq!(stats.paid_amount, dec!(200.20));
        assert!(stats.paid_amount <= stats.total_amount);
    }

    #[test]
    fn stats_are_order_independent() {
        let mut invoices = vec![
            invoice(1, InvoiceStatus::Paid, dec!(10.01)),
            invoice(2, InvoiceStatus::Sent, dec!(20.02)),
            invoice(3, InvoiceStatus::Paid, dec!(30.03)),
        ];
        let forward = invoice_stats(&invoices);
        invoices.reverse();
        let backward = invoice_stats(&invoices);
        assert_eq!(forward, backward);
    }

    #[test]
    fn stats_over_empty_collection_are_zero() {
        let stats = invoice_stats(&[]);
        assert_eq!(stats, InvoiceStats::default());
    }
}
