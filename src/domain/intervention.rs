use std::collections::BTreeSet;
use std::fmt::Display;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, InterventionId, TypeConstraintError};

/// Lifecycle state of a service visit.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InterventionStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl InterventionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterventionStatus::Scheduled => "scheduled",
            InterventionStatus::InProgress => "in_progress",
            InterventionStatus::Completed => "completed",
            InterventionStatus::Cancelled => "cancelled",
        }
    }
}

impl TryFrom<&str> for InterventionStatus {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "scheduled" => Ok(InterventionStatus::Scheduled),
            "in_progress" => Ok(InterventionStatus::InProgress),
            "completed" => Ok(InterventionStatus::Completed),
            "cancelled" => Ok(InterventionStatus::Cancelled),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown intervention status: {other}"
            ))),
        }
    }
}

impl Display for InterventionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Type tag attached to an intervention. Unknown upstream values collapse to
/// [`InterventionTag::Other`] instead of failing the whole row.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InterventionTag {
    Maintenance,
    Repair,
    Installation,
    Emergency,
    Diagnostic,
    Cleaning,
    Winterization,
    Startup,
    Other,
}

impl InterventionTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterventionTag::Maintenance => "maintenance",
            InterventionTag::Repair => "repair",
            InterventionTag::Installation => "installation",
            InterventionTag::Emergency => "emergency",
            InterventionTag::Diagnostic => "diagnostic",
            InterventionTag::Cleaning => "cleaning",
            InterventionTag::Winterization => "winterization",
            InterventionTag::Startup => "startup",
            InterventionTag::Other => "other",
        }
    }
}

impl From<&str> for InterventionTag {
    fn from(s: &str) -> Self {
        match s {
            "maintenance" => InterventionTag::Maintenance,
            "repair" => InterventionTag::Repair,
            "installation" => InterventionTag::Installation,
            "emergency" => InterventionTag::Emergency,
            "diagnostic" => InterventionTag::Diagnostic,
            "cleaning" => InterventionTag::Cleaning,
            "winterization" => InterventionTag::Winterization,
            "startup" => InterventionTag::Startup,
            _ => InterventionTag::Other,
        }
    }
}

impl Display for InterventionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A scheduled or completed service visit.
///
/// `total_ttc` reflects invoice-driven figures and is stored as-is; the
/// labor-plus-travel display total is derived on read by the financial
/// aggregator and is a separate value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Intervention {
    pub id: InterventionId,
    pub client_id: ClientId,
    pub reference: String,
    pub scheduled_date: NaiveDateTime,
    pub status: InterventionStatus,
    pub description: Option<String>,
    pub labor_hours: Option<Decimal>,
    pub labor_rate: Option<Decimal>,
    pub travel_fee: Decimal,
    pub total_ttc: Decimal,
    pub gcal_event_id: Option<String>,
    pub signed_by: Option<String>,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    /// De-duplicated set of type tags; the store tolerates repeated rows.
    pub tags: BTreeSet<InterventionTag>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewIntervention {
    pub client_id: ClientId,
    pub reference: String,
    pub scheduled_date: NaiveDateTime,
    pub status: InterventionStatus,
    pub description: Option<String>,
    pub labor_hours: Option<Decimal>,
    pub labor_rate: Option<Decimal>,
    pub travel_fee: Decimal,
    pub total_ttc: Decimal,
    pub gcal_event_id: Option<String>,
    pub tags: Vec<InterventionTag>,
}

impl NewIntervention {
    #[must_use]
    pub fn new(
        client_id: ClientId,
        reference: impl Into<String>,
        scheduled_date: NaiveDateTime,
    ) -> Self {
        Self {
            client_id,
            reference: reference.into(),
            scheduled_date,
            status: InterventionStatus::Scheduled,
            description: None,
            labor_hours: None,
            labor_rate: None,
            travel_fee: Decimal::ZERO,
            total_ttc: Decimal::ZERO,
            gcal_event_id: None,
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn status(mut self, status: InterventionStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn tags(mut self, tags: Vec<InterventionTag>) -> Self {
        self.tags = tags;
        self
    }

    #[must_use]
    pub fn gcal_event_id(mut self, event_id: impl Into<String>) -> Self {
        self.gcal_event_id = Some(event_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tags_collapse_to_other() {
        assert_eq!(InterventionTag::from("repair"), InterventionTag::Repair);
        assert_eq!(InterventionTag::from("plumbing"), InterventionTag::Other);
    }

    #[test]
    fn status_parsing_is_strict() {
        assert_eq!(
            InterventionStatus::try_from("in_progress").unwrap(),
            InterventionStatus::InProgress
        );
        assert!(InterventionStatus::try_from("done").is_err());
    }
}
