//! Shared User-Agent string for every outbound HTTP client.
//!
//! Plex, the completion API and Radarr all see the same identifier so
//! operators can find this tool's traffic in their service logs.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/fierce/recommendarr";

/// Default User-Agent for all service clients.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("recommendarr/{version} (+{PROJECT_UA_URL})")
}
