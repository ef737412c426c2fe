//! Message handoff to an external channel.

use crate::error::ComandaError;
use std::sync::{Arc, Mutex};

/// Default click-to-chat base URL.
pub const DEFAULT_HANDOFF_BASE_URL: &str = "https://wa.me";

/// Delivers a composed order message.
pub trait MessageHandoff: Send + Sync {
    /// Hand `payload` to `destination`, returning where it was opened
    /// (a link, a file path, ...).
    fn send(&self, payload: &str, destination: &str) -> Result<String, ComandaError>;
}

/// Builds a WhatsApp click-to-chat link carrying the message.
///
/// The payload is percent-encoded, so line breaks travel as `%0A`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppLink {
    base_url: String,
}

impl WhatsAppLink {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// `{base_url}/{destination}?text={encoded payload}`
    pub fn link(&self, payload: &str, destination: &str) -> String {
        format!(
            "{}/{}?text={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(destination.trim()),
            urlencoding::encode(payload)
        )
    }
}

impl Default for WhatsAppLink {
    fn default() -> Self {
        Self::new(DEFAULT_HANDOFF_BASE_URL)
    }
}

impl MessageHandoff for WhatsAppLink {
    fn send(&self, payload: &str, destination: &str) -> Result<String, ComandaError> {
        if destination.trim().is_empty() {
            return Err(ComandaError::Handoff("no destination configured".to_string()));
        }
        let link = self.link(payload, destination);
        tracing::debug!(%link, "Handoff link built");
        Ok(link)
    }
}

/// A message captured by [`RecordingHandoff`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub payload: String,
    pub destination: String,
}

/// Keeps every message in memory; can be told to fail.
#[derive(Debug, Clone, Default)]
pub struct RecordingHandoff {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    failing: bool,
}

impl RecordingHandoff {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handoff that refuses every message.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Messages sent so far.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

impl MessageHandoff for RecordingHandoff {
    fn send(&self, payload: &str, destination: &str) -> Result<String, ComandaError> {
        if self.failing {
            return Err(ComandaError::Handoff("channel unavailable".to_string()));
        }
        let mut sent = self
            .sent
            .lock()
            .map_err(|e| ComandaError::Handoff(e.to_string()))?;
        sent.push(SentMessage {
            payload: payload.to_string(),
            destination: destination.to_string(),
        });
        Ok(format!("recorded:{}", sent.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whatsapp_link_encodes_payload() {
        let link = WhatsAppLink::default()
            .send("*PEDIDO*\nTotal: $95.00", "5212414073434")
            .unwrap();
        assert_eq!(
            link,
            "https://wa.me/5212414073434?text=%2APEDIDO%2A%0ATotal%3A%20%2495.00"
        );
    }

    #[test]
    fn test_whatsapp_link_trims_base_slash() {
        let link = WhatsAppLink::new("https://wa.me/").link("hola", "52");
        assert_eq!(link, "https://wa.me/52?text=hola");
    }

    #[test]
    fn test_whatsapp_requires_destination() {
        assert!(matches!(
            WhatsAppLink::default().send("hola", " "),
            Err(ComandaError::Handoff(_))
        ));
    }

    #[test]
    fn test_recording_handoff() {
        let handoff = RecordingHandoff::new();
        let shared = handoff.clone();
        assert_eq!(handoff.send("a", "52").unwrap(), "recorded:1");
        assert_eq!(
            shared.sent(),
            vec![SentMessage {
                payload: "a".to_string(),
                destination: "52".to_string()
            }]
        );
        assert!(RecordingHandoff::failing().send("a", "52").is_err());
    }
}
