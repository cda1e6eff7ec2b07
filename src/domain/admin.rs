use serde::{Deserialize, Serialize};

/// Destination id meaning "send to the requesting user".
pub const SELF_DESTINATION: &str = "self";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
}

/// Privileged-mode settings, fetched once per session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub admin_root_url: Option<String>,
    #[serde(default)]
    pub destinations: Vec<Destination>,
}

impl AdminConfig {
    pub fn destination(&self, id: &str) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.id == id)
    }
}
