//! Error types

use swap_intents_common::{EncodingError, FeeError, LifecycleError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DerivationError {
    #[error("Seed {seed} is {len} bytes, at most 32 allowed")]
    SeedTooLong { seed: String, len: usize },

    #[error("{count} seeds given, at most 15 allowed besides the bump")]
    TooManySeeds { count: usize },

    #[error("No viable bump seed for program address")]
    NoViableBump,
}

/// Failure to build the account list or arguments of an instruction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Address derivation failed: {0}")]
    Derivation(#[from] DerivationError),

    #[error("Fee error: {0}")]
    Fee(#[from] FeeError),

    #[error("Unsupported asset in {field}: {value}")]
    UnsupportedAsset { field: &'static str, value: String },

    #[error("Invalid address in {field}")]
    InvalidAddress { field: &'static str },

    #[error("Solver address is missing")]
    MissingSolver,

    #[error("Destination address is missing")]
    MissingDestination,

    #[error("Order id is not assigned")]
    UnassignedOrderId,

    #[error("Signer does not match the required authority")]
    SignerMismatch,

    #[error("Message network mismatch: expected {expected}, found {found}")]
    NetworkMismatch { expected: String, found: String },

    #[error("Failed to serialize instruction data: {0}")]
    Serialization(String),
}

/// Failure to decode on-ledger account data or program logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("{account}: data too short ({len} bytes)")]
    TooShort { account: &'static str, len: usize },

    #[error("{account}: discriminator mismatch")]
    DiscriminatorMismatch { account: &'static str },

    #[error("{account}: {reason}")]
    Malformed { account: &'static str, reason: String },
}

/// Failure to route an inbound relay message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
