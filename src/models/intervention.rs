use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::intervention::{
    Intervention as DomainIntervention, InterventionStatus, InterventionTag,
    NewIntervention as DomainNewIntervention,
};
use crate::domain::types::{
    ClientId, InterventionId, TypeConstraintError, parse_amount, parse_amount_opt,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::operational::interventions)]
/// Diesel model for [`crate::domain::intervention::Intervention`].
///
/// Monetary columns are stored as `TEXT` and parsed into exact decimals at
/// this boundary.
pub struct Intervention {
    pub id: i32,
    pub client_id: i32,
    pub reference: String,
    pub scheduled_date: NaiveDateTime,
    pub status: String,
    pub description: Option<String>,
    pub labor_hours: Option<String>,
    pub labor_rate: Option<String>,
    pub travel_fee: String,
    pub total_ttc: String,
    pub gcal_event_id: Option<String>,
    pub signed_by: Option<String>,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl Intervention {
    /// Converts the row into its domain form, attaching the given tag rows
    /// as a de-duplicated set.
    pub fn into_domain(
        self,
        tags: impl IntoIterator<Item = InterventionTag>,
    ) -> Result<DomainIntervention, TypeConstraintError> {
        Ok(DomainIntervention {
            id: InterventionId::new(self.id)?,
            client_id: ClientId::new(self.client_id)?,
            reference: self.reference,
            scheduled_date: self.scheduled_date,
            status: InterventionStatus::try_from(self.status.as_str())?,
            description: self.description,
            labor_hours: parse_amount_opt(self.labor_hours.as_deref())?,
            labor_rate: parse_amount_opt(self.labor_rate.as_deref())?,
            travel_fee: parse_amount(&self.travel_fee)?,
            total_ttc: parse_amount(&self.total_ttc)?,
            gcal_event_id: self.gcal_event_id,
            signed_by: self.signed_by,
            completed_at: self.completed_at,
            created_at: self.created_at,
            tags: tags.into_iter().collect::<BTreeSet<_>>(),
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::operational::interventions)]
/// Insertable form of [`Intervention`].
pub struct NewIntervention {
    pub client_id: i32,
    pub reference: String,
    pub scheduled_date: NaiveDateTime,
    pub status: String,
    pub description: Option<String>,
    pub labor_hours: Option<String>,
    pub labor_rate: Option<String>,
    pub travel_fee: String,
    pub total_ttc: String,
    pub gcal_event_id: Option<String>,
}

impl From<&DomainNewIntervention> for NewIntervention {
    fn from(intervention: &DomainNewIntervention) -> Self {
        Self {
            client_id: intervention.client_id.get(),
            reference: intervention.reference.clone(),
            scheduled_date: intervention.scheduled_date,
            status: intervention.status.as_str().to_string(),
            description: intervention.description.clone(),
            labor_hours: intervention.labor_hours.map(|d| d.to_string()),
            labor_rate: intervention.labor_rate.map(|d| d.to_string()),
            travel_fee: intervention.travel_fee.to_string(),
            total_ttc: intervention.total_ttc.to_string(),
            gcal_event_id: intervention.gcal_event_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Queryable)]
#[diesel(table_name = crate::schema::operational::intervention_types)]
/// One tag row; repeated tags for the same intervention are tolerated.
pub struct InterventionTypeRow {
    pub id: i32,
    pub intervention_id: i32,
    pub tag: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::operational::intervention_types)]
pub struct NewInterventionTypeRow {
    pub intervention_id: i32,
    pub tag: String,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal_macros::dec;

    use super::*;

    fn row() -> Intervention {
        Intervention {
            id: 3,
            client_id: 1,
            reference: "INT-2026-003".to_string(),
            scheduled_date: Utc::now().naive_utc(),
            status: "completed".to_string(),
            description: Some("Filter replacement".to_string()),
            labor_hours: Some("2".to_string()),
            labor_rate: Some("45".to_string()),
            travel_fee: "10".to_string(),
            total_ttc: "250.00".to_string(),
            gcal_event_id: Some("evt_123".to_string()),
            signed_by: None,
            completed_at: Some(Utc::now().naive_utc()),
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn into_domain_parses_amounts_and_dedups_tags() {
        let domain = row()
            .into_domain([
                InterventionTag::Repair,
                InterventionTag::Maintenance,
                InterventionTag::Repair,
            ])
            .unwrap();
        assert_eq!(domain.labor_hours, Some(dec!(2)));
        assert_eq!(domain.labor_rate, Some(dec!(45)));
        assert_eq!(domain.travel_fee, dec!(10));
        assert_eq!(domain.total_ttc, dec!(250.00));
        assert_eq!(domain.tags.len(), 2);
        assert!(domain.tags.contains(&InterventionTag::Repair));
    }

    #[test]
    fn into_domain_rejects_malformed_amounts() {
        let mut bad = row();
        bad.travel_fee = "ten euros".to_string();
        assert!(bad.into_domain([]).is_err());
    }
}
