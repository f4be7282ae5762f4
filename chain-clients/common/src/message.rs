//! Relay message envelope and its Fill / Cancel payloads
//!
//! A relay delivers `(src_nid, conn_sn, msg)` where `msg` is an encoded
//! [`OrderMessage`]. The payload is only ever decoded against the type named
//! by its `message_type` tag.

use serde::{Deserialize, Serialize};

use crate::codec::{Canonical, Fields};
use crate::error::EncodingError;
use crate::order::SwapOrder;

// ============================================================================
// PAYLOADS
// ============================================================================

/// Confirmation that an order was filled on its destination network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFill {
    /// Id of the filled order
    pub id: u128,
    /// Canonical encoding of the filled order
    pub order_bytes: Vec<u8>,
    /// Address receiving the escrowed funds on the origin network
    pub solver: String,
}

impl OrderFill {
    /// Builds the fill confirmation for `order`.
    pub fn for_order(order: &SwapOrder, solver: impl Into<String>) -> Self {
        Self {
            id: order.id,
            order_bytes: order.encode(),
            solver: solver.into(),
        }
    }

    /// Decodes the embedded order.
    pub fn order(&self) -> Result<SwapOrder, EncodingError> {
        SwapOrder::decode(&self.order_bytes)
    }
}

impl rlp::Encodable for OrderFill {
    fn rlp_append(&self, stream: &mut rlp::RlpStream) {
        stream.begin_list(3);
        stream.append(&self.id);
        stream.append(&self.order_bytes);
        stream.append(&self.solver);
    }
}

impl rlp::Decodable for OrderFill {
    fn decode(rlp: &rlp::Rlp) -> Result<Self, rlp::DecoderError> {
        let fields = Fields::open(rlp, Self::ENTITY, Self::FIELD_COUNT)?;
        Ok(Self::from_fields(&fields)?)
    }
}

impl Canonical for OrderFill {
    const ENTITY: &'static str = "OrderFill";
    const FIELD_COUNT: usize = 3;

    fn from_fields(fields: &Fields<'_>) -> Result<Self, EncodingError> {
        Ok(Self {
            id: fields.value(0, "id")?,
            order_bytes: fields.bytes(1, "order_bytes")?,
            solver: fields.string(2, "solver")?,
        })
    }
}

/// Request to cancel an order, sent from its origin network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancel {
    /// Canonical encoding of the cancelled order
    pub order_bytes: Vec<u8>,
}

impl OrderCancel {
    pub fn for_order(order: &SwapOrder) -> Self {
        Self {
            order_bytes: order.encode(),
        }
    }

    /// Decodes the embedded order.
    pub fn order(&self) -> Result<SwapOrder, EncodingError> {
        SwapOrder::decode(&self.order_bytes)
    }
}

impl rlp::Encodable for OrderCancel {
    fn rlp_append(&self, stream: &mut rlp::RlpStream) {
        stream.begin_list(1);
        stream.append(&self.order_bytes);
    }
}

impl rlp::Decodable for OrderCancel {
    fn decode(rlp: &rlp::Rlp) -> Result<Self, rlp::DecoderError> {
        let fields = Fields::open(rlp, Self::ENTITY, Self::FIELD_COUNT)?;
        Ok(Self::from_fields(&fields)?)
    }
}

impl Canonical for OrderCancel {
    const ENTITY: &'static str = "OrderCancel";
    const FIELD_COUNT: usize = 1;

    fn from_fields(fields: &Fields<'_>) -> Result<Self, EncodingError> {
        Ok(Self {
            order_bytes: fields.bytes(0, "order_bytes")?,
        })
    }
}

// ============================================================================
// ENVELOPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    Fill,
    Cancel,
}

impl MessageType {
    pub fn as_u32(self) -> u32 {
        match self {
            MessageType::Fill => 1,
            MessageType::Cancel => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MessageType::Fill => "fill",
            MessageType::Cancel => "cancel",
        }
    }
}

impl TryFrom<u32> for MessageType {
    type Error = EncodingError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MessageType::Fill),
            2 => Ok(MessageType::Cancel),
            other => Err(EncodingError::UnknownMessageType(other)),
        }
    }
}

/// Relay envelope: a type tag and the encoded payload it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderMessage {
    pub message_type: MessageType,
    pub payload: Vec<u8>,
}

impl OrderMessage {
    pub fn fill(fill: &OrderFill) -> Self {
        Self {
            message_type: MessageType::Fill,
            payload: fill.encode(),
        }
    }

    pub fn cancel(cancel: &OrderCancel) -> Self {
        Self {
            message_type: MessageType::Cancel,
            payload: cancel.encode(),
        }
    }

    /// Decodes the payload against the type named by the tag.
    pub fn resolution(&self) -> Result<Resolution, EncodingError> {
        match self.message_type {
            MessageType::Fill => OrderFill::decode(&self.payload).map(Resolution::Fill),
            MessageType::Cancel => OrderCancel::decode(&self.payload).map(Resolution::Cancel),
        }
    }
}

impl rlp::Encodable for OrderMessage {
    fn rlp_append(&self, stream: &mut rlp::RlpStream) {
        stream.begin_list(2);
        stream.append(&self.message_type.as_u32());
        stream.append(&self.payload);
    }
}

impl rlp::Decodable for OrderMessage {
    fn decode(rlp: &rlp::Rlp) -> Result<Self, rlp::DecoderError> {
        let fields = Fields::open(rlp, Self::ENTITY, Self::FIELD_COUNT)?;
        Ok(Self::from_fields(&fields)?)
    }
}

impl Canonical for OrderMessage {
    const ENTITY: &'static str = "OrderMessage";
    const FIELD_COUNT: usize = 2;

    fn from_fields(fields: &Fields<'_>) -> Result<Self, EncodingError> {
        let message_type = MessageType::try_from(fields.value::<u32>(0, "message_type")?)?;
        Ok(Self {
            message_type,
            payload: fields.bytes(1, "payload")?,
        })
    }
}

/// Decoded envelope payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Fill(OrderFill),
    Cancel(OrderCancel),
}

impl Resolution {
    pub fn message_type(&self) -> MessageType {
        match self {
            Resolution::Fill(_) => MessageType::Fill,
            Resolution::Cancel(_) => MessageType::Cancel,
        }
    }

    pub fn order_bytes(&self) -> &[u8] {
        match self {
            Resolution::Fill(fill) => &fill.order_bytes,
            Resolution::Cancel(cancel) => &cancel.order_bytes,
        }
    }
}

// ============================================================================
// INBOUND DECODE
// ============================================================================

/// Deduplication key of an inbound relay message.
///
/// The destination program keeps one receipt per key; any second delivery
/// with the same key is rejected regardless of its content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplayKey {
    pub src_nid: String,
    pub conn_sn: u128,
}

/// Everything a caller needs to route an inbound relay message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEnvelope {
    pub replay_key: ReplayKey,
    pub message_type: MessageType,
    pub order: SwapOrder,
    /// Solver address for fills, `None` for cancels
    pub solver: Option<String>,
    pub resolution: Resolution,
}

/// Decodes a raw relay message into its replay key, type, order and solver.
///
/// # Arguments
///
/// * `src_nid` - Network the message was sent from
/// * `conn_sn` - Sequence number assigned by the sending network
/// * `msg` - Encoded `OrderMessage`
///
/// # Returns
///
/// * `Ok(DecodedEnvelope)` - Decoded envelope
/// * `Err(EncodingError)` - Malformed envelope, payload or embedded order
pub fn decode_envelope(
    src_nid: &str,
    conn_sn: u128,
    msg: &[u8],
) -> Result<DecodedEnvelope, EncodingError> {
    let message = OrderMessage::decode(msg)?;
    let resolution = message.resolution()?;
    let order = SwapOrder::decode(resolution.order_bytes())?;
    let solver = match &resolution {
        Resolution::Fill(fill) => Some(fill.solver.clone()),
        Resolution::Cancel(_) => None,
    };

    tracing::debug!(
        src_nid,
        conn_sn,
        message_type = message.message_type.as_str(),
        order_id = order.id,
        "Decoded relay envelope"
    );

    Ok(DecodedEnvelope {
        replay_key: ReplayKey {
            src_nid: src_nid.to_string(),
            conn_sn,
        },
        message_type: message.message_type,
        order,
        solver,
        resolution,
    })
}
