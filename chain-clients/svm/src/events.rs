//! Program events from transaction logs
//!
//! Events are logged as `Program data: <base64>`, where the decoded bytes are
//! an 8-byte discriminator, `sha256("event:<Name>")[..8]`, followed by the
//! Borsh-encoded event.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::hash::hash;
use swap_intents_common::SwapOrder;

use crate::constants::DISCRIMINATOR_SIZE;
use crate::error::StateError;

const PROGRAM_DATA_PREFIX: &str = "Program data: ";

pub fn event_discriminator(name: &str) -> [u8; DISCRIMINATOR_SIZE] {
    let mut discriminator = [0u8; DISCRIMINATOR_SIZE];
    discriminator.copy_from_slice(&hash(format!("event:{}", name).as_bytes()).to_bytes()[..8]);
    discriminator
}

/// Order created; carries the order as stored, id included.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct SwapIntentEvent {
    pub id: u128,
    pub emitter: String,
    pub src_nid: String,
    pub dst_nid: String,
    pub creator: String,
    pub destination_address: String,
    pub token: String,
    pub amount: u128,
    pub to_token: String,
    pub to_amount: u128,
    pub data: Vec<u8>,
}

impl From<SwapIntentEvent> for SwapOrder {
    fn from(event: SwapIntentEvent) -> Self {
        Self {
            id: event.id,
            emitter: event.emitter,
            src_nid: event.src_nid,
            dst_nid: event.dst_nid,
            creator: event.creator,
            destination_address: event.destination_address,
            token: event.token,
            amount: event.amount,
            to_token: event.to_token,
            to_amount: event.to_amount,
            data: event.data,
        }
    }
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct OrderFilledEvent {
    pub id: u128,
    pub src_nid: String,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct OrderCancelledEvent {
    pub id: u128,
    pub src_nid: String,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct OrderClosedEvent {
    pub id: u128,
}

/// Outbound relay message.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct SendMessageEvent {
    pub target_network: String,
    pub sn: u128,
    pub msg: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentEvent {
    SwapIntent(SwapIntentEvent),
    OrderFilled(OrderFilledEvent),
    OrderCancelled(OrderCancelledEvent),
    OrderClosed(OrderClosedEvent),
    SendMessage(SendMessageEvent),
}

impl IntentEvent {
    pub fn name(&self) -> &'static str {
        match self {
            IntentEvent::SwapIntent(_) => "SwapIntent",
            IntentEvent::OrderFilled(_) => "OrderFilled",
            IntentEvent::OrderCancelled(_) => "OrderCancelled",
            IntentEvent::OrderClosed(_) => "OrderClosed",
            IntentEvent::SendMessage(_) => "SendMessage",
        }
    }

    /// Encodes the event as it appears in a `Program data:` log line.
    pub fn to_log_data(&self) -> Result<Vec<u8>, StateError> {
        let mut data = event_discriminator(self.name()).to_vec();
        let written = match self {
            IntentEvent::SwapIntent(event) => event.serialize(&mut data),
            IntentEvent::OrderFilled(event) => event.serialize(&mut data),
            IntentEvent::OrderCancelled(event) => event.serialize(&mut data),
            IntentEvent::OrderClosed(event) => event.serialize(&mut data),
            IntentEvent::SendMessage(event) => event.serialize(&mut data),
        };
        written.map_err(|e| StateError::Malformed {
            account: "event",
            reason: e.to_string(),
        })?;
        Ok(data)
    }
}

/// Decodes one event payload.
///
/// # Returns
///
/// * `Ok(Some(IntentEvent))` - Known event
/// * `Ok(None)` - Discriminator of some other event or program
/// * `Err(StateError)` - Known discriminator with a malformed body
pub fn parse_event(data: &[u8]) -> Result<Option<IntentEvent>, StateError> {
    if data.len() < DISCRIMINATOR_SIZE {
        return Ok(None);
    }
    let (discriminator, body) = data.split_at(DISCRIMINATOR_SIZE);

    fn body_of<T: BorshDeserialize>(name: &'static str, body: &[u8]) -> Result<T, StateError> {
        T::try_from_slice(body).map_err(|e| StateError::Malformed {
            account: name,
            reason: e.to_string(),
        })
    }

    let event = if discriminator == event_discriminator("SwapIntent") {
        IntentEvent::SwapIntent(body_of("SwapIntent", body)?)
    } else if discriminator == event_discriminator("OrderFilled") {
        IntentEvent::OrderFilled(body_of("OrderFilled", body)?)
    } else if discriminator == event_discriminator("OrderCancelled") {
        IntentEvent::OrderCancelled(body_of("OrderCancelled", body)?)
    } else if discriminator == event_discriminator("OrderClosed") {
        IntentEvent::OrderClosed(body_of("OrderClosed", body)?)
    } else if discriminator == event_discriminator("SendMessage") {
        IntentEvent::SendMessage(body_of("SendMessage", body)?)
    } else {
        return Ok(None);
    };
    Ok(Some(event))
}

/// Collects intent events from transaction log lines, in log order.
///
/// Lines without the `Program data:` prefix, lines that are not base64 and
/// unknown discriminators are skipped.
pub fn parse_logs<S: AsRef<str>>(logs: &[S]) -> Result<Vec<IntentEvent>, StateError> {
    let mut events = Vec::new();
    for line in logs {
        let Some(encoded) = line.as_ref().strip_prefix(PROGRAM_DATA_PREFIX) else {
            continue;
        };
        let data = match STANDARD.decode(encoded.trim()) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!(error = %e, "Skipping undecodable program data log");
                continue;
            }
        };
        if let Some(event) = parse_event(&data)? {
            events.push(event);
        }
    }
    Ok(events)
}

/// Stored orders announced by `SwapIntent` events in `logs`.
pub fn created_orders<S: AsRef<str>>(logs: &[S]) -> Result<Vec<SwapOrder>, StateError> {
    Ok(parse_logs(logs)?
        .into_iter()
        .filter_map(|event| match event {
            IntentEvent::SwapIntent(event) => Some(event.into()),
            _ => None,
        })
        .collect())
}
