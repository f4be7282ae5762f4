//! Order lifecycle and inbound replay protection
//!
//! Order states are tracked by the authoritative program, not stored here.
//! These types let callers predict whether an operation can still succeed
//! before building a transaction for it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::LifecycleError;
use crate::message::ReplayKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderState {
    /// Deposited and escrowed on the origin network
    Created,
    /// Paid out on the destination network, origin escrow not yet released
    Filled,
    /// Cancellation requested, not yet settled
    Cancelled,
    /// Terminal: the order-finished marker is set
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderEvent {
    Fill,
    Cancel,
    /// Resolution of a fill or cancel completed
    Resolve,
}

impl OrderState {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderState::Created => "created",
            OrderState::Filled => "filled",
            OrderState::Cancelled => "cancelled",
            OrderState::Finished => "finished",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == OrderState::Finished
    }

    /// Applies `event`, returning the next state.
    ///
    /// # Returns
    ///
    /// * `Ok(OrderState)` - Next state
    /// * `Err(LifecycleError::AlreadyFinished)` - Any event on a finished order
    /// * `Err(LifecycleError::InvalidTransition)` - Event not valid in the current state
    pub fn apply(self, event: OrderEvent) -> Result<OrderState, LifecycleError> {
        match (self, event) {
            (OrderState::Finished, _) => Err(LifecycleError::AlreadyFinished),
            (OrderState::Created, OrderEvent::Fill) => Ok(OrderState::Filled),
            (OrderState::Created, OrderEvent::Cancel) => Ok(OrderState::Cancelled),
            (OrderState::Filled, OrderEvent::Resolve)
            | (OrderState::Cancelled, OrderEvent::Resolve) => Ok(OrderState::Finished),
            (from, event) => Err(LifecycleError::InvalidTransition {
                from: from.as_str(),
                event: match event {
                    OrderEvent::Fill => "fill",
                    OrderEvent::Cancel => "cancel",
                    OrderEvent::Resolve => "resolve",
                },
            }),
        }
    }
}

/// Caller-owned record of relay messages already admitted.
///
/// Mirrors the receipt gate of the destination program so duplicates are
/// dropped locally before any resolution work.
#[derive(Debug, Default, Clone)]
pub struct ReplayGuard {
    seen: HashSet<ReplayKey>,
}

impl ReplayGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &ReplayKey) -> bool {
        self.seen.contains(key)
    }

    /// Fails with `DuplicateMessage` when `key` was already admitted.
    pub fn check(&self, key: &ReplayKey) -> Result<(), LifecycleError> {
        if self.seen.contains(key) {
            tracing::warn!(
                src_nid = %key.src_nid,
                conn_sn = key.conn_sn,
                "Rejecting duplicate relay message"
            );
            return Err(LifecycleError::DuplicateMessage {
                src_nid: key.src_nid.clone(),
                conn_sn: key.conn_sn,
            });
        }
        Ok(())
    }

    /// Admits `key` once; every later admission of the same key fails.
    pub fn admit(&mut self, key: &ReplayKey) -> Result<(), LifecycleError> {
        self.check(key)?;
        self.seen.insert(key.clone());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
