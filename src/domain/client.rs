use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, TypeConstraintError};

/// Billing profile of a client.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClientType {
    Individual,
    Professional,
}

impl ClientType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientType::Individual => "individual",
            ClientType::Professional => "professional",
        }
    }
}

impl TryFrom<&str> for ClientType {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "individual" => Ok(ClientType::Individual),
            "professional" => Ok(ClientType::Professional),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown client type: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub client_type: ClientType,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Client {
    /// Human-readable name: company name for professionals when present,
    /// otherwise "first last" with missing parts dropped.
    pub fn display_name(&self) -> String {
        if let Some(company) = self.company_name.as_deref().filter(|s| !s.is_empty()) {
            return company.to_string();
        }
        let first = self.first_name.as_deref().unwrap_or_default();
        let last = self.last_name.as_deref().unwrap_or_default();
        format!("{first} {last}").trim().to_string()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewClient {
    pub client_type: ClientType,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub notes: Option<String>,
}

impl NewClient {
    #[must_use]
    pub fn individual(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            client_type: ClientType::Individual,
            first_name: Some(first_name.into()).filter(|s| !s.trim().is_empty()),
            last_name: Some(last_name.into()).filter(|s| !s.trim().is_empty()),
            company_name: None,
            email: None,
            phone: None,
            address: None,
            city: None,
            postal_code: None,
            notes: None,
        }
    }

    #[must_use]
    pub fn professional(company_name: impl Into<String>) -> Self {
        Self {
            client_type: ClientType::Professional,
            first_name: None,
            last_name: None,
            company_name: Some(company_name.into()).filter(|s| !s.trim().is_empty()),
            email: None,
            phone: None,
            address: None,
            city: None,
            postal_code: None,
            notes: None,
        }
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into().to_lowercase().trim().to_string()).filter(|s| !s.is_empty());
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into().trim().to_string()).filter(|s| !s.is_empty());
        self
    }
}
