//! Protocol fee arithmetic
//!
//! Mirrors the on-ledger integer math: the fee is the floor of
//! `amount * bps / 10_000`, the payout is what remains.

use serde::{Deserialize, Serialize};

use crate::error::FeeError;

/// Basis-point denominator.
pub const FEE_DENOMINATOR: u64 = 10_000;

/// Fee and payout of one settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSplit {
    pub fee: u128,
    pub payout: u128,
}

/// Protocol fee taken from `amount`, rounded down.
///
/// Computed as `(amount / D) * bps + (amount % D) * bps / D`, which equals
/// `floor(amount * bps / D)` and cannot overflow for `bps <= D`.
///
/// # Returns
///
/// * `Ok(u128)` - Fee in base units, never above `amount`
/// * `Err(FeeError)` - `protocol_fee_bps` above 10000
pub fn fee(amount: u128, protocol_fee_bps: u64) -> Result<u128, FeeError> {
    if protocol_fee_bps > FEE_DENOMINATOR {
        return Err(FeeError::InvalidProtocolFee(protocol_fee_bps));
    }
    let denominator = FEE_DENOMINATOR as u128;
    let bps = protocol_fee_bps as u128;
    Ok((amount / denominator) * bps + (amount % denominator) * bps / denominator)
}

/// Amount left for the recipient after the protocol fee.
pub fn payout(amount: u128, protocol_fee_bps: u64) -> Result<u128, FeeError> {
    Ok(amount - fee(amount, protocol_fee_bps)?)
}

pub fn split(amount: u128, protocol_fee_bps: u64) -> Result<FeeSplit, FeeError> {
    let fee = fee(amount, protocol_fee_bps)?;
    Ok(FeeSplit {
        fee,
        payout: amount - fee,
    })
}
