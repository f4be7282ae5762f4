//! On-ledger account layouts of the intent program
//!
//! Account data is an 8-byte discriminator, `sha256("account:<Name>")[..8]`,
//! followed by the Borsh encoding of the account. Accounts are allocated with
//! fixed sizes, so data may carry zero padding after the encoded fields.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::hash::hash;
use solana_program::pubkey::Pubkey;
use swap_intents_common::{FeeError, SwapOrder, FEE_DENOMINATOR};

use crate::constants::DISCRIMINATOR_SIZE;
use crate::error::StateError;
use crate::instruction::SwapOrderArgs;

/// Account discriminator for the account type `name`.
pub fn account_discriminator(name: &str) -> [u8; DISCRIMINATOR_SIZE] {
    let mut discriminator = [0u8; DISCRIMINATOR_SIZE];
    discriminator.copy_from_slice(&hash(format!("account:{}", name).as_bytes()).to_bytes()[..8]);
    discriminator
}

/// Account types owned by the intent program.
pub trait ProgramAccount: BorshSerialize + BorshDeserialize {
    /// Account type name, as used in the discriminator.
    const NAME: &'static str;

    /// Decodes raw account data, ignoring trailing allocation padding.
    fn from_account_data(data: &[u8]) -> Result<Self, StateError> {
        if data.len() < DISCRIMINATOR_SIZE {
            return Err(StateError::TooShort {
                account: Self::NAME,
                len: data.len(),
            });
        }
        let (discriminator, mut body) = data.split_at(DISCRIMINATOR_SIZE);
        if discriminator != account_discriminator(Self::NAME) {
            return Err(StateError::DiscriminatorMismatch {
                account: Self::NAME,
            });
        }
        Self::deserialize(&mut body).map_err(|e| StateError::Malformed {
            account: Self::NAME,
            reason: e.to_string(),
        })
    }

    /// Encodes the account as the program stores it, without padding.
    fn to_account_data(&self) -> Result<Vec<u8>, StateError> {
        let mut data = account_discriminator(Self::NAME).to_vec();
        self.serialize(&mut data).map_err(|e| StateError::Malformed {
            account: Self::NAME,
            reason: e.to_string(),
        })?;
        Ok(data)
    }
}

/// Per-network singleton (PDA: ["config"])
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct ConfigAccount {
    pub admin: Pubkey,
    pub fee_handler: Pubkey,
    pub network_id: String,
    /// Basis points
    pub protocol_fee: u64,
    /// Id of the last created order
    pub deposit_id: u128,
    /// Sequence number of the last outbound message
    pub conn_sn: u128,
    pub bump: u8,
}

impl ProgramAccount for ConfigAccount {
    const NAME: &'static str = "Config";
}

/// Escrowed order (PDA: [creator, dst_nid, amount_be16, to_amount_be16])
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct OrderAccount {
    pub order: SwapOrderArgs,
    pub bump: u8,
}

impl OrderAccount {
    pub fn order(&self) -> SwapOrder {
        self.order.clone().into()
    }
}

impl ProgramAccount for OrderAccount {
    const NAME: &'static str = "OrderAccount";
}

/// Order-finished marker (PDA: [order_hash])
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderFinishedAccount {
    pub finished: bool,
    pub bump: u8,
}

impl ProgramAccount for OrderFinishedAccount {
    const NAME: &'static str = "OrderFinished";
}

/// Relay receipt (PDA: ["receipt", src_nid, conn_sn_be16])
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptAccount {
    pub received: bool,
    pub bump: u8,
}

impl ProgramAccount for ReceiptAccount {
    const NAME: &'static str = "Receipt";
}

/// Read-only view of the Config account a resolution is built against.
///
/// The program stays authoritative: a transaction built from a snapshot it
/// has since advanced past is rejected on chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSnapshot {
    pub admin: Pubkey,
    pub fee_handler: Pubkey,
    pub network_id: String,
    pub protocol_fee: u64,
    pub deposit_id: u128,
    pub conn_sn: u128,
}

impl ConfigSnapshot {
    /// Id the program will assign to the next created order.
    pub fn next_order_id(&self) -> u128 {
        self.deposit_id.saturating_add(1)
    }

    /// Sequence number of the next outbound relay message.
    pub fn next_conn_sn(&self) -> u128 {
        self.conn_sn.saturating_add(1)
    }

    pub fn validate(&self) -> Result<(), FeeError> {
        if self.protocol_fee > FEE_DENOMINATOR {
            tracing::warn!(
                network_id = %self.network_id,
                protocol_fee = self.protocol_fee,
                "Config snapshot carries an out-of-range protocol fee"
            );
            return Err(FeeError::InvalidProtocolFee(self.protocol_fee));
        }
        Ok(())
    }
}

impl From<ConfigAccount> for ConfigSnapshot {
    fn from(account: ConfigAccount) -> Self {
        Self {
            admin: account.admin,
            fee_handler: account.fee_handler,
            network_id: account.network_id,
            protocol_fee: account.protocol_fee,
            deposit_id: account.deposit_id,
            conn_sn: account.conn_sn,
        }
    }
}
