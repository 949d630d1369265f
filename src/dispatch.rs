//! Transport-neutral glue between an inbound message envelope, the engine
//! and an outbound sender.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{info, warn};

use crate::matching::{FaqEngine, Scorer};

pub const SENDER_FIELD: &str = "From";
pub const BODY_FIELD: &str = "Body";
pub const CHANNEL_PREFIX: &str = "whatsapp:";

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Failed to deliver reply to {recipient}: {reason}")]
    Delivery { recipient: String, reason: String },
}

/// Sender and body extracted from an inbound envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub sender: String,
    pub body: String,
}

impl InboundMessage {
    /// Extract `From` and `Body`. The channel prefix is stripped from the sender.
    pub fn from_fields(fields: &BTreeMap<String, String>) -> Result<Self, DispatchError> {
        let from = fields
            .get(SENDER_FIELD)
            .ok_or(DispatchError::MissingField(SENDER_FIELD))?;
        let body = fields
            .get(BODY_FIELD)
            .ok_or(DispatchError::MissingField(BODY_FIELD))?;

        let sender = from.strip_prefix(CHANNEL_PREFIX).unwrap_or(from.as_str());

        Ok(InboundMessage {
            sender: sender.to_string(),
            body: body.clone(),
        })
    }
}

/// Delivers a text message to a recipient.
pub trait OutboundSender {
    type Error: std::error::Error;

    fn send(&self, recipient: &str, text: &str) -> Result<(), Self::Error>;
}

/// A reply that was handed to the outbound sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub recipient: String,
    pub text: String,
}

/// Validate the envelope, resolve the body and forward the response.
pub fn handle_inbound<S, O>(
    engine: &FaqEngine<S>,
    outbound: &O,
    fields: &BTreeMap<String, String>,
) -> Result<Reply, DispatchError>
where
    S: Scorer,
    O: OutboundSender,
{
    let message = InboundMessage::from_fields(fields)?;
    let text = engine.resolve(&message.body);

    if let Err(e) = outbound.send(&message.sender, &text) {
        warn!(recipient = %message.sender, error = %e, "reply delivery failed");
        return Err(DispatchError::Delivery {
            recipient: message.sender,
            reason: e.to_string(),
        });
    }

    info!(recipient = %message.sender, "reply delivered");
    Ok(Reply {
        recipient: message.sender,
        text,
    })
}
