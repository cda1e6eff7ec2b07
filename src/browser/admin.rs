use crate::domain::{AdminConfig, Destination, SELF_DESTINATION};

/// Privileged browsing toggle and download destination picker.
///
/// Everything here is inert unless the session's [`AdminConfig`] says the
/// user is an admin.
#[derive(Debug, Clone, Default)]
pub struct DestinationSelector {
    config: AdminConfig,
    privileged: bool,
    selected: Option<String>,
}

impl DestinationSelector {
    pub fn new(config: AdminConfig) -> Self {
        let selected = if config.is_admin {
            config.destinations.first().map(|d| d.id.clone())
        } else {
            None
        };
        Self {
            config,
            privileged: false,
            selected,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_admin
    }

    pub fn is_privileged(&self) -> bool {
        self.privileged
    }

    /// Flip between normal and privileged browsing. Returns false (and
    /// changes nothing) for non-admins.
    pub fn toggle(&mut self) -> bool {
        if !self.is_enabled() {
            return false;
        }
        self.privileged = !self.privileged;
        true
    }

    /// Root href to load for "home"; `None` means the catalog's own root.
    pub fn effective_root(&self) -> Option<&str> {
        if self.privileged {
            self.config.admin_root_url.as_deref()
        } else {
            None
        }
    }

    pub fn destinations(&self) -> &[Destination] {
        if self.is_enabled() {
            &self.config.destinations
        } else {
            &[]
        }
    }

    pub fn selected(&self) -> Option<&Destination> {
        self.selected
            .as_deref()
            .and_then(|id| self.config.destination(id))
    }

    pub fn select(&mut self, id: &str) -> bool {
        if !self.is_enabled() || self.config.destination(id).is_none() {
            return false;
        }
        self.selected = Some(id.to_string());
        true
    }

    /// Forwarding target for a download; `None` means the requesting user.
    pub fn target_chat_id(&self) -> Option<String> {
        if !self.is_enabled() {
            return None;
        }
        self.selected
            .clone()
            .filter(|id| id != SELF_DESTINATION)
    }
}
