// SPDX-License-Identifier: MPL-2.0
//! Cross-frame language synchronization.
//!
//! Each engine owns a [`FrameHub`]: a mailbox other frames post into and
//! links to the frames embedded in its document. Messages carry the
//! sender's origin, and the allow-list is enforced on both send and
//! receive: a language instruction from an unlisted origin is dropped,
//! never acted on. Propagation runs parent to children, so a switch
//! cascades down an embed hierarchy without echo loops.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Message type discriminator on the wire.
pub const MSG_TYPE: &str = "langChange";

/// Wire shape of a language-change message:
/// `{"type": "langChange", "lang": "<code>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub lang: String,
}

impl FrameMessage {
    pub fn lang_change(lang: &str) -> Self {
        Self {
            kind: MSG_TYPE.to_string(),
            lang: lang.to_string(),
        }
    }
}

/// A received message plus the origin that sent it.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub origin: String,
    pub message: FrameMessage,
}

/// Handle for posting into a frame's mailbox. Hand one to each peer that
/// should be able to reach this frame.
#[derive(Debug, Clone)]
pub struct FrameSender {
    tx: UnboundedSender<Envelope>,
}

impl FrameSender {
    fn post(&self, envelope: Envelope) -> bool {
        self.tx.send(envelope).is_ok()
    }
}

struct FrameLink {
    origin: String,
    sender: FrameSender,
}

/// Per-engine messaging hub.
pub struct FrameHub {
    allowed_origins: Vec<String>,
    links: Vec<FrameLink>,
    inbox_tx: UnboundedSender<Envelope>,
    inbox_rx: UnboundedReceiver<Envelope>,
}

impl FrameHub {
    pub fn new(allowed_origins: Vec<String>) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            allowed_origins,
            links: Vec::new(),
            inbox_tx,
            inbox_rx,
        }
    }

    /// Handle for posting into this frame's mailbox.
    pub fn mailbox(&self) -> FrameSender {
        FrameSender {
            tx: self.inbox_tx.clone(),
        }
    }

    /// Registers an embedded frame under its origin.
    pub fn connect(&mut self, origin: &str, sender: FrameSender) {
        self.links.push(FrameLink {
            origin: origin.to_string(),
            sender,
        });
    }

    pub fn origin_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|o| o == origin)
    }

    /// Best-effort broadcast to every connected frame. Unlisted origins
    /// are skipped with a log line; an unreachable frame (closed mailbox)
    /// is skipped silently and never aborts delivery to the rest.
    pub fn broadcast(&self, own_origin: &str, lang: &str) {
        for link in &self.links {
            if !self.origin_allowed(&link.origin) {
                debug!(
                    "not broadcasting language '{lang}' to unlisted origin '{}'",
                    link.origin
                );
                continue;
            }
            let delivered = link.sender.post(Envelope {
                origin: own_origin.to_string(),
                message: FrameMessage::lang_change(lang),
            });
            if !delivered {
                debug!("frame at '{}' unreachable, skipped", link.origin);
            }
        }
    }

    /// Drains the mailbox, keeping only language-change messages from
    /// allow-listed origins.
    pub fn drain(&mut self) -> Vec<Envelope> {
        let mut accepted = Vec::new();
        while let Ok(envelope) = self.inbox_rx.try_recv() {
            if !self.origin_allowed(&envelope.origin) {
                warn!(
                    "dropping frame message from unlisted origin '{}'",
                    envelope.origin
                );
                continue;
            }
            if envelope.message.kind != MSG_TYPE {
                debug!("ignoring frame message of kind '{}'", envelope.message.kind);
                continue;
            }
            accepted.push(envelope);
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARENT: &str = "https://parent.example";
    const CHILD: &str = "https://child.example";
    const STRANGER: &str = "https://stranger.example";

    #[test]
    fn wire_shape_matches_the_contract() {
        let message = FrameMessage::lang_change("fr");
        let json = serde_json::to_string(&message).expect("message should serialize");
        assert_eq!(json, r#"{"type":"langChange","lang":"fr"}"#);

        let parsed: FrameMessage =
            serde_json::from_str(r#"{"type":"langChange","lang":"es"}"#).expect("should parse");
        assert_eq!(parsed, FrameMessage::lang_change("es"));
    }

    #[test]
    fn broadcast_reaches_allowed_frames_only() {
        let mut trusted = FrameHub::new(vec![PARENT.to_string()]);
        let mut unlisted = FrameHub::new(vec![PARENT.to_string()]);

        let mut parent = FrameHub::new(vec![CHILD.to_string()]);
        parent.connect(CHILD, trusted.mailbox());
        parent.connect(STRANGER, unlisted.mailbox());

        parent.broadcast(PARENT, "fr");

        let received = trusted.drain();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].origin, PARENT);
        assert_eq!(received[0].message.lang, "fr");

        assert!(unlisted.drain().is_empty());
    }

    #[test]
    fn drain_drops_messages_from_unlisted_origins() {
        let mut hub = FrameHub::new(vec![PARENT.to_string()]);
        let mailbox = hub.mailbox();

        mailbox.post(Envelope {
            origin: STRANGER.to_string(),
            message: FrameMessage::lang_change("fr"),
        });
        mailbox.post(Envelope {
            origin: PARENT.to_string(),
            message: FrameMessage::lang_change("es"),
        });

        let accepted = hub.drain();
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].message.lang, "es");
    }

    #[test]
    fn drain_ignores_foreign_message_kinds() {
        let mut hub = FrameHub::new(vec![PARENT.to_string()]);
        hub.mailbox().post(Envelope {
            origin: PARENT.to_string(),
            message: FrameMessage {
                kind: "themeChange".to_string(),
                lang: "fr".to_string(),
            },
        });
        assert!(hub.drain().is_empty());
    }

    #[test]
    fn unreachable_frame_does_not_abort_broadcast() {
        let mut parent = FrameHub::new(vec![CHILD.to_string(), STRANGER.to_string()]);

        let gone = FrameHub::new(Vec::new());
        let dead_mailbox = gone.mailbox();
        drop(gone);
        parent.connect(STRANGER, dead_mailbox);

        let mut alive = FrameHub::new(vec![PARENT.to_string()]);
        parent.connect(CHILD, alive.mailbox());

        parent.broadcast(PARENT, "es");
        assert_eq!(alive.drain().len(), 1);
    }
}
