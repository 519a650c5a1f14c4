//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// SQLite file backing the operational partition.
    pub operational_database_url: String,
    /// SQLite file backing the billing partition.
    pub billing_database_url: String,
    #[serde(default)]
    pub calendar: CalendarSettings,
}

#[derive(Clone, Debug, Default, Deserialize)]
/// Settings for the outbound calendar completion notification.
///
/// Everything here is optional at deployment time: a missing endpoint makes
/// the notifier report a soft `misconfigured` outcome instead of failing,
/// and the credential header is only attached when both halves are present.
pub struct CalendarSettings {
    pub endpoint: Option<String>,
    pub auth_header_name: Option<String>,
    pub auth_header_value: Option<String>,
}
