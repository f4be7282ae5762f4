//! Program-derived addresses of the intent program
//!
//! Integers in seeds are 16-byte big-endian, independent of the canonical
//! codec's minimal-width rule.

use solana_program::pubkey::{Pubkey, MAX_SEEDS, MAX_SEED_LEN};

use crate::constants::{
    ASSOCIATED_TOKEN_PROGRAM_ID, CONFIG_SEED, RECEIPT_SEED, TOKEN_PROGRAM_ID, VAULT_NATIVE_SEED,
    VAULT_TOKEN_SEED,
};
use crate::error::DerivationError;

/// Derives the address and bump for `seeds` under `program_id`.
///
/// Seeds are validated up front so oversized input is an error rather than a
/// failed search over every bump.
///
/// # Returns
///
/// * `Ok((Pubkey, u8))` - Address and bump seed
/// * `Err(DerivationError)` - Too many seeds, a seed above 32 bytes, or no viable bump
pub fn derive(program_id: &Pubkey, seeds: &[&[u8]]) -> Result<(Pubkey, u8), DerivationError> {
    let named: Vec<(String, &[u8])> = seeds
        .iter()
        .enumerate()
        .map(|(i, seed)| (format!("#{}", i), *seed))
        .collect();
    derive_named(program_id, &named)
}

fn derive_named<S: AsRef<str>>(
    program_id: &Pubkey,
    seeds: &[(S, &[u8])],
) -> Result<(Pubkey, u8), DerivationError> {
    // bump takes the last slot
    if seeds.len() >= MAX_SEEDS {
        return Err(DerivationError::TooManySeeds { count: seeds.len() });
    }
    if let Some((name, seed)) = seeds.iter().find(|(_, seed)| seed.len() > MAX_SEED_LEN) {
        return Err(DerivationError::SeedTooLong {
            seed: name.as_ref().to_string(),
            len: seed.len(),
        });
    }
    let raw: Vec<&[u8]> = seeds.iter().map(|(_, seed)| *seed).collect();
    Pubkey::try_find_program_address(&raw, program_id).ok_or(DerivationError::NoViableBump)
}

/// Config account: `["config"]`
pub fn config(program_id: &Pubkey) -> Result<(Pubkey, u8), DerivationError> {
    derive_named(program_id, &[("config", CONFIG_SEED)])
}

/// Native vault: `["vault_native"]`
pub fn vault_native(program_id: &Pubkey) -> Result<(Pubkey, u8), DerivationError> {
    derive_named(program_id, &[("vault_native", VAULT_NATIVE_SEED)])
}

/// Token vault of `mint`: `["vault_token", mint]`
pub fn vault_token(program_id: &Pubkey, mint: &Pubkey) -> Result<(Pubkey, u8), DerivationError> {
    derive_named(
        program_id,
        &[("vault_token", VAULT_TOKEN_SEED), ("mint", mint.as_ref())],
    )
}

/// Order escrow: `[creator, dst_nid, amount_be16, to_amount_be16]`
pub fn order(
    program_id: &Pubkey,
    creator: &Pubkey,
    dst_nid: &str,
    amount: u128,
    to_amount: u128,
) -> Result<(Pubkey, u8), DerivationError> {
    let amount = amount.to_be_bytes();
    let to_amount = to_amount.to_be_bytes();
    derive_named(
        program_id,
        &[
            ("creator", creator.as_ref()),
            ("dst_nid", dst_nid.as_bytes()),
            ("amount", &amount[..]),
            ("to_amount", &to_amount[..]),
        ],
    )
}

/// Order-finished marker: `[keccak256(encode(order))]`
pub fn order_finished(
    program_id: &Pubkey,
    order_hash: &[u8; 32],
) -> Result<(Pubkey, u8), DerivationError> {
    derive_named(program_id, &[("order_hash", &order_hash[..])])
}

/// Relay receipt: `["receipt", src_nid, conn_sn_be16]`
pub fn receipt(
    program_id: &Pubkey,
    src_nid: &str,
    conn_sn: u128,
) -> Result<(Pubkey, u8), DerivationError> {
    let conn_sn = conn_sn.to_be_bytes();
    derive_named(
        program_id,
        &[
            ("receipt", RECEIPT_SEED),
            ("src_nid", src_nid.as_bytes()),
            ("conn_sn", &conn_sn[..]),
        ],
    )
}

/// Associated token account of `owner` for `mint` under the classic token program.
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Result<Pubkey, DerivationError> {
    derive_named(
        &ASSOCIATED_TOKEN_PROGRAM_ID,
        &[
            ("owner", owner.as_ref()),
            ("token_program", TOKEN_PROGRAM_ID.as_ref()),
            ("mint", mint.as_ref()),
        ],
    )
    .map(|(address, _)| address)
}
