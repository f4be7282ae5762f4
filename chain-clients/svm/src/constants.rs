//! Program constants shared with the on-ledger intent program

use solana_program::{pubkey, pubkey::Pubkey};

/// Sentinel token address meaning the chain's native asset.
pub const NATIVE_ADDRESS: &str = "11111111111111111111111111111111";

pub const CONFIG_SEED: &[u8] = b"config";
pub const VAULT_NATIVE_SEED: &[u8] = b"vault_native";
pub const VAULT_TOKEN_SEED: &[u8] = b"vault_token";
pub const RECEIPT_SEED: &[u8] = b"receipt";

pub const TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey =
    pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");

/// Size of every account, instruction and event discriminator.
pub const DISCRIMINATOR_SIZE: usize = 8;
