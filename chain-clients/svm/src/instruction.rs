//! Instruction data of the intent program
//!
//! Data is an 8-byte discriminator, `sha256("global:<name>")[..8]`, followed
//! by the Borsh encoding of the instruction arguments in declaration order.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::hash::hash;
use solana_program::pubkey::Pubkey;
use swap_intents_common::SwapOrder;

use crate::constants::DISCRIMINATOR_SIZE;
use crate::error::ResolveError;

/// Instruction discriminator for `name`.
pub fn instruction_discriminator(name: &str) -> [u8; DISCRIMINATOR_SIZE] {
    let mut discriminator = [0u8; DISCRIMINATOR_SIZE];
    discriminator.copy_from_slice(&hash(format!("global:{}", name).as_bytes()).to_bytes()[..8]);
    discriminator
}

/// Borsh layout of a swap order, field order matching the canonical encoding.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct SwapOrderArgs {
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

impl From<&SwapOrder> for SwapOrderArgs {
    fn from(order: &SwapOrder) -> Self {
        Self {
            id: order.id,
            emitter: order.emitter.clone(),
            src_nid: order.src_nid.clone(),
            dst_nid: order.dst_nid.clone(),
            creator: order.creator.clone(),
            destination_address: order.destination_address.clone(),
            token: order.token.clone(),
            amount: order.amount,
            to_token: order.to_token.clone(),
            to_amount: order.to_amount,
            data: order.data.clone(),
        }
    }
}

impl From<SwapOrderArgs> for SwapOrder {
    fn from(args: SwapOrderArgs) -> Self {
        Self {
            id: args.id,
            emitter: args.emitter,
            src_nid: args.src_nid,
            dst_nid: args.dst_nid,
            creator: args.creator,
            destination_address: args.destination_address,
            token: args.token,
            amount: args.amount,
            to_token: args.to_token,
            to_amount: args.to_amount,
            data: args.data,
        }
    }
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct InitializeArgs {
    pub network_id: String,
    pub fee_handler: Pubkey,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct SetAdminArgs {
    pub account: Pubkey,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct SetProtocolFeeArgs {
    pub fee: u64,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct SetFeeHandlerArgs {
    pub fee_handler: Pubkey,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct SwapArgs {
    pub order: SwapOrderArgs,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct FillArgs {
    pub order: SwapOrderArgs,
    pub solver_address: String,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct CancelArgs {
    pub order: SwapOrderArgs,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct RecvMessageArgs {
    pub src_network: String,
    pub conn_sn: u128,
    pub msg: Vec<u8>,
}

/// Instructions of the intent program a client can build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentInstruction {
    /// Accounts expected:
    /// 0. `[writable]` Config (PDA: ["config"])
    /// 1. `[writable]` Native vault (PDA: ["vault_native"])
    /// 2. `[writable, signer]` Admin/payer
    /// 3. `[]` System program
    Initialize(InitializeArgs),
    SetAdmin(SetAdminArgs),
    SetProtocolFee(SetProtocolFeeArgs),
    SetFeeHandler(SetFeeHandlerArgs),
    Swap(SwapArgs),
    Fill(FillArgs),
    Cancel(CancelArgs),
    RecvMessage(RecvMessageArgs),
}

impl IntentInstruction {
    /// Program-side instruction name.
    pub fn name(&self) -> &'static str {
        match self {
            IntentInstruction::Initialize(_) => "initialize",
            IntentInstruction::SetAdmin(_) => "set_admin",
            IntentInstruction::SetProtocolFee(_) => "set_protocol_fee",
            IntentInstruction::SetFeeHandler(_) => "set_fee_handler",
            IntentInstruction::Swap(_) => "swap",
            IntentInstruction::Fill(_) => "fill",
            IntentInstruction::Cancel(_) => "cancel",
            IntentInstruction::RecvMessage(_) => "recv_message",
        }
    }

    pub fn discriminator(&self) -> [u8; DISCRIMINATOR_SIZE] {
        instruction_discriminator(self.name())
    }

    /// Serialized instruction data: discriminator followed by the arguments.
    pub fn data(&self) -> Result<Vec<u8>, ResolveError> {
        let mut data = self.discriminator().to_vec();
        let written = match self {
            IntentInstruction::Initialize(args) => args.serialize(&mut data),
            IntentInstruction::SetAdmin(args) => args.serialize(&mut data),
            IntentInstruction::SetProtocolFee(args) => args.serialize(&mut data),
            IntentInstruction::SetFeeHandler(args) => args.serialize(&mut data),
            IntentInstruction::Swap(args) => args.serialize(&mut data),
            IntentInstruction::Fill(args) => args.serialize(&mut data),
            IntentInstruction::Cancel(args) => args.serialize(&mut data),
            IntentInstruction::RecvMessage(args) => args.serialize(&mut data),
        };
        written.map_err(|e| ResolveError::Serialization(e.to_string()))?;
        Ok(data)
    }

    /// Parses instruction data produced by [`IntentInstruction::data`].
    pub fn unpack(data: &[u8]) -> Result<Self, ResolveError> {
        if data.len() < DISCRIMINATOR_SIZE {
            return Err(ResolveError::Serialization(format!(
                "instruction data too short: {} bytes",
                data.len()
            )));
        }
        let (discriminator, args) = data.split_at(DISCRIMINATOR_SIZE);
        let unknown = || {
            ResolveError::Serialization(format!(
                "unknown instruction discriminator 0x{}",
                hex::encode(discriminator)
            ))
        };
        let name = [
            "initialize",
            "set_admin",
            "set_protocol_fee",
            "set_fee_handler",
            "swap",
            "fill",
            "cancel",
            "recv_message",
        ]
        .into_iter()
        .find(|name| instruction_discriminator(name) == discriminator)
        .ok_or_else(unknown)?;

        let parsed = match name {
            "initialize" => InitializeArgs::try_from_slice(args).map(IntentInstruction::Initialize),
            "set_admin" => SetAdminArgs::try_from_slice(args).map(IntentInstruction::SetAdmin),
            "set_protocol_fee" => {
                SetProtocolFeeArgs::try_from_slice(args).map(IntentInstruction::SetProtocolFee)
            }
            "set_fee_handler" => {
                SetFeeHandlerArgs::try_from_slice(args).map(IntentInstruction::SetFeeHandler)
            }
            "swap" => SwapArgs::try_from_slice(args).map(IntentInstruction::Swap),
            "fill" => FillArgs::try_from_slice(args).map(IntentInstruction::Fill),
            "cancel" => CancelArgs::try_from_slice(args).map(IntentInstruction::Cancel),
            "recv_message" => {
                RecvMessageArgs::try_from_slice(args).map(IntentInstruction::RecvMessage)
            }
            _ => return Err(unknown()),
        };
        parsed.map_err(|e| ResolveError::Serialization(e.to_string()))
    }
}
