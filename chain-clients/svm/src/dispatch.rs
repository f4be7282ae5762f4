//! Inbound relay message routing

use solana_program::pubkey::Pubkey;
use swap_intents_common::{decode_envelope, DecodedEnvelope, ReplayGuard, ReplayKey, SwapOrder};

use crate::accounts::{IntentResolver, ResolvedInstruction};
use crate::error::{DispatchError, ResolveError};
use crate::state::ConfigSnapshot;

/// Relay message ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    pub envelope: DecodedEnvelope,
    pub instruction: ResolvedInstruction,
}

/// Decodes relay messages, drops duplicates locally and resolves the rest.
///
/// A key is recorded only after its message resolved, so a message that
/// failed to resolve can be retried.
#[derive(Debug, Clone)]
pub struct InboundDispatcher {
    resolver: IntentResolver,
    guard: ReplayGuard,
}

impl InboundDispatcher {
    pub fn new(resolver: IntentResolver) -> Self {
        Self {
            resolver,
            guard: ReplayGuard::new(),
        }
    }

    /// Records a key already consumed on chain, e.g. one with an existing receipt.
    pub fn mark_received(&mut self, key: &ReplayKey) {
        // ignore the duplicate error, the key is recorded either way
        let _ = self.guard.admit(key);
    }

    pub fn is_received(&self, key: &ReplayKey) -> bool {
        self.guard.contains(key)
    }

    /// Routes one relay message.
    ///
    /// # Arguments
    ///
    /// * `signer` - Relayer submitting the message, must be the Config admin
    /// * `snapshot` - Config read immediately before dispatch
    /// * `src_nid` - Network the message was sent from
    /// * `conn_sn` - Sequence number assigned by the sending network
    /// * `msg` - Encoded `OrderMessage`
    ///
    /// # Returns
    ///
    /// * `Ok(Dispatched)` - Decoded envelope and resolved `recv_message` instruction
    /// * `Err(DispatchError::Lifecycle)` - Key already received, whatever the payload
    /// * `Err(DispatchError::Resolve)` - Malformed message, wrong relayer or unresolvable order
    pub fn dispatch(
        &mut self,
        signer: &Pubkey,
        snapshot: &ConfigSnapshot,
        src_nid: &str,
        conn_sn: u128,
        msg: &[u8],
    ) -> Result<Dispatched, DispatchError> {
        let key = ReplayKey {
            src_nid: src_nid.to_string(),
            conn_sn,
        };
        self.guard.check(&key)?;

        let envelope = decode_envelope(src_nid, conn_sn, msg).map_err(ResolveError::from)?;
        let instruction = self
            .resolver
            .resolve_envelope(signer, snapshot, &envelope, msg)?;
        self.guard.admit(&key)?;

        tracing::info!(
            src_nid,
            conn_sn,
            message_type = envelope.message_type.as_str(),
            order_id = envelope.order.id,
            "Dispatched relay message"
        );

        Ok(Dispatched {
            envelope,
            instruction,
        })
    }
}

/// Order as the program will store it when `order` is created now.
///
/// The program stamps its own id as emitter, its network id as origin and
/// the next deposit id. A concurrent creation can take that id first, in
/// which case the `SwapIntent` event of the transaction is authoritative.
pub fn predict_stored_order(
    order: &SwapOrder,
    snapshot: &ConfigSnapshot,
    program_id: &Pubkey,
) -> SwapOrder {
    SwapOrder {
        id: snapshot.next_order_id(),
        emitter: program_id.to_string(),
        src_nid: snapshot.network_id.clone(),
        ..order.clone()
    }
}
