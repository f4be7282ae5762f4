//! Solana client core for cross-chain swap intents
//!
//! Derives the intent program's addresses, resolves the ordered account list
//! and arguments of each instruction, decodes program state and events, and
//! routes inbound relay messages. Nothing here signs or submits transactions.

pub mod accounts;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod instruction;
pub mod pda;
pub mod rpc;
pub mod state;

pub use accounts::{
    paginate, AccountMetaView, AssetKind, IntentResolver, QueryAccountsPage, ResolveRequest,
    ResolvedInstruction,
};
pub use config::SvmIntentConfig;
pub use dispatch::{predict_stored_order, Dispatched, InboundDispatcher};
pub use error::{DerivationError, DispatchError, ResolveError, StateError};
pub use events::IntentEvent;
pub use instruction::IntentInstruction;
pub use rpc::SvmIntentReader;
pub use state::ConfigSnapshot;
