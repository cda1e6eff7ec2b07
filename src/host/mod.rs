//! Host chrome: the calls the controller makes into the embedding app.

use async_trait::async_trait;

/// Chrome owned by the embedding host (back affordance, dialogs, closing).
///
/// The controller issues these calls but never implements them.
#[async_trait]
pub trait HostChrome {
    fn show_back_button(&self);

    fn hide_back_button(&self);

    /// Blocking confirmation dialog. Resolves to the user's answer.
    async fn confirm(&self, message: &str) -> bool;

    /// Transient, dismissible message.
    fn alert(&self, message: &str);

    fn close(&self);
}

/// Host for non-interactive commands: alerts go to the log, confirmations
/// resolve to a fixed answer.
pub struct HeadlessHost {
    assume_yes: bool,
}

impl HeadlessHost {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

#[async_trait]
impl HostChrome for HeadlessHost {
    fn show_back_button(&self) {}

    fn hide_back_button(&self) {}

    async fn confirm(&self, message: &str) -> bool {
        tracing::info!("{} -> {}", message, if self.assume_yes { "yes" } else { "no" });
        self.assume_yes
    }

    fn alert(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn close(&self) {}
}
