//! Error types

use rlp::DecoderError;
use thiserror::Error;

/// Malformed bytes handed to a canonical decoder.
///
/// Every variant names the entity (and field where one applies) so callers can
/// report which part of a payload was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("{entity}: input truncated, needed {needed} more bytes")]
    Truncated { entity: &'static str, needed: usize },

    #[error("{entity}: {count} trailing bytes after the encoded value")]
    TrailingBytes { entity: &'static str, count: usize },

    #[error("{entity}: expected a list")]
    ExpectedList { entity: &'static str },

    #[error("{entity}: expected {expected} fields, found {found}")]
    FieldCount {
        entity: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{entity}: {source}")]
    Malformed {
        entity: &'static str,
        source: DecoderError,
    },

    #[error("{entity}.{field}: {source}")]
    Field {
        entity: &'static str,
        field: &'static str,
        source: DecoderError,
    },

    #[error("{entity}.{field}: invalid UTF-8")]
    InvalidUtf8 { entity: &'static str, field: &'static str },

    #[error("OrderMessage.message_type: unknown message type {0}")]
    UnknownMessageType(u32),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeError {
    #[error("Protocol fee {0} bps exceeds 10000 bps")]
    InvalidProtocolFee(u64),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Order already finished")]
    AlreadyFinished,

    #[error("Invalid order transition from {from} on {event}")]
    InvalidTransition {
        from: &'static str,
        event: &'static str,
    },

    #[error("Duplicate message from {src_nid} with sequence {conn_sn}")]
    DuplicateMessage { src_nid: String, conn_sn: u128 },
}
