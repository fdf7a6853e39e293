//! Client-side cookie-consent gate.

use crate::client::ConsentClient;
use crate::errors::ClientError;
use crate::models::ConsentState;

pub const CONSENT_PROMPT: &str =
    "We use cookies to enhance your experience. Do you allow us to use cookies?";

/// Tracks consent for this session and whether the modal is showing.
///
/// Once granted or denied the state is final for the session; later mounts do
/// not query the server again.
#[derive(Debug, Clone, Default)]
pub struct ConsentGate {
    state: ConsentState,
    show_modal: bool,
}

impl ConsentGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConsentState {
        self.state
    }

    pub fn show_modal(&self) -> bool {
        self.show_modal
    }

    /// Query the server; anything short of a definitive "enabled" opens the modal.
    pub async fn on_mount(&mut self, client: &ConsentClient) {
        if self.state != ConsentState::Unknown {
            return;
        }
        match client.check().await {
            Ok(status) if status.is_enabled() => {
                self.state = ConsentState::Granted;
                self.show_modal = false;
            }
            Ok(status) => {
                tracing::debug!("Consent not granted: {}", status.message);
                self.show_modal = true;
            }
            Err(e) => {
                tracing::warn!("Consent check failed: {}", e);
                self.show_modal = true;
            }
        }
    }

    pub async fn accept(&mut self, client: &ConsentClient) -> Result<(), ClientError> {
        self.choose(client, true).await
    }

    /// Record a refusal. The app stays usable either way.
    pub async fn decline(&mut self, client: &ConsentClient) -> Result<(), ClientError> {
        self.choose(client, false).await
    }

    /// The gate only settles once the server stored the choice; on failure the
    /// modal stays up so the user can answer again.
    async fn choose(&mut self, client: &ConsentClient, allow: bool) -> Result<(), ClientError> {
        match client.set(allow).await {
            Ok(response) => {
                tracing::info!("{}", response.message);
                self.state = if allow {
                    ConsentState::Granted
                } else {
                    ConsentState::Denied
                };
                self.show_modal = false;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to persist consent choice: {}", e);
                Err(e)
            }
        }
    }
}
