//! DTOs shaped for client listings and the client selection flow.

use serde::{Deserialize, Serialize};

use crate::domain::client::Client;

/// Client row enriched with its derived intervention count.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClientSummary {
    #[serde(flatten)]
    pub client: Client,
    pub intervention_count: i64,
}

/// State of the two-step "search or create" client selection flow.
///
/// The flow starts in `Searching`; picking an existing client or deciding to
/// compose a new one moves to `Composing`, where the selected client stays
/// `None` until a fresh record is saved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ClientSelection {
    Searching,
    Composing { selected: Option<Client> },
}

impl ClientSelection {
    /// Moves to composing with an existing client picked from search.
    #[must_use]
    pub fn pick(client: Client) -> Self {
        ClientSelection::Composing {
            selected: Some(client),
        }
    }

    /// Moves to composing a brand new client record.
    #[must_use]
    pub fn compose_new() -> Self {
        ClientSelection::Composing { selected: None }
    }

    pub fn selected(&self) -> Option<&Client> {
        match self {
            ClientSelection::Searching => None,
            ClientSelection::Composing { selected } => selected.as_ref(),
        }
    }
}

impl Default for ClientSelection {
    fn default() -> Self {
        ClientSelection::Searching
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::domain::client::ClientType;
    use crate::domain::types::ClientId;

    fn sample_client() -> Client {
        Client {
            id: ClientId::new(4).unwrap(),
            client_type: ClientType::Individual,
            first_name: Some("Marie".to_string()),
            last_name: Some("Curie".to_string()),
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
    fn selection_starts_searching_with_nothing_selected() {
        let state = ClientSelection::default();
        assert_eq!(state, ClientSelection::Searching);
        assert!(state.selected().is_none());
    }

    #[test]
    fn picking_a_client_moves_to_composing() {
        let client = sample_client();
        let state = ClientSelection::pick(client.clone());
        assert_eq!(state.selected(), Some(&client));

        let fresh = ClientSelection::compose_new();
        assert!(matches!(
            fresh,
            ClientSelection::Composing { selected: None }
        ));
        assert!(fresh.selected().is_none());
    }

    #[test]
    fn selection_serializes_with_mode_tag() {
        let value = serde_json::to_value(ClientSelection::Searching).unwrap();
        assert_eq!(value, json!({"mode": "searching"}));

        let value = serde_json::to_value(ClientSelection::compose_new()).unwrap();
        assert_eq!(value["mode"], json!("composing"));
        assert_eq!(value["selected"], json!(null));
    }
}
