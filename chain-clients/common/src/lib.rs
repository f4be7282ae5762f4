//! Chain-agnostic core for cross-chain swap intents
//!
//! Canonical encoding of orders and relay messages, protocol fee rules and
//! the order lifecycle shared by every network-specific client.

pub mod codec;
pub mod error;
pub mod fee;
pub mod lifecycle;
pub mod message;
pub mod order;

pub use codec::{Canonical, Fields};
pub use error::{EncodingError, FeeError, LifecycleError};
pub use fee::{FeeSplit, FEE_DENOMINATOR};
pub use lifecycle::{OrderEvent, OrderState, ReplayGuard};
pub use message::{
    decode_envelope, DecodedEnvelope, MessageType, OrderCancel, OrderFill, OrderMessage,
    ReplayKey, Resolution,
};
pub use order::{keccak256, SwapOrder};
