//! Shared fixtures for the SVM crate tests

#![allow(dead_code)]

use solana_program::pubkey::Pubkey;
use swap_intents_common::SwapOrder;
use swap_intents_svm::constants::NATIVE_ADDRESS;
use swap_intents_svm::ConfigSnapshot;

pub const LOCAL_NID: &str = "solana";
pub const REMOTE_NID: &str = "ethereum";
pub const REMOTE_SOLVER: &str = "0xcb0a6bbccfccde6be9f10ae781b9d9b00d6e63";

/// Fixed identities so derived addresses are stable across tests.
pub struct Actors {
    pub program_id: Pubkey,
    pub admin: Pubkey,
    pub fee_handler: Pubkey,
    pub creator: Pubkey,
    pub solver: Pubkey,
    pub destination: Pubkey,
    pub relayer: Pubkey,
    pub mint: Pubkey,
}

pub fn actors() -> Actors {
    Actors {
        program_id: Pubkey::new_from_array([1u8; 32]),
        admin: Pubkey::new_from_array([2u8; 32]),
        fee_handler: Pubkey::new_from_array([3u8; 32]),
        creator: Pubkey::new_from_array([4u8; 32]),
        solver: Pubkey::new_from_array([5u8; 32]),
        destination: Pubkey::new_from_array([6u8; 32]),
        relayer: Pubkey::new_from_array([7u8; 32]),
        mint: Pubkey::new_from_array([8u8; 32]),
    }
}

pub fn snapshot(actors: &Actors, protocol_fee: u64) -> ConfigSnapshot {
    ConfigSnapshot {
        admin: actors.admin,
        fee_handler: actors.fee_handler,
        network_id: LOCAL_NID.to_string(),
        protocol_fee,
        deposit_id: 41,
        conn_sn: 9,
    }
}

/// Snapshot whose admin is the relayer, which the program requires for deliveries.
pub fn relayer_snapshot(actors: &Actors) -> ConfigSnapshot {
    ConfigSnapshot {
        admin: actors.relayer,
        ..snapshot(actors, 0)
    }
}

/// Native-to-native order created on this network.
pub fn local_native_order(actors: &Actors) -> SwapOrder {
    SwapOrder {
        id: 42,
        emitter: actors.program_id.to_string(),
        src_nid: LOCAL_NID.to_string(),
        dst_nid: LOCAL_NID.to_string(),
        creator: actors.creator.to_string(),
        destination_address: actors.destination.to_string(),
        token: NATIVE_ADDRESS.to_string(),
        amount: 1_000_000_000,
        to_token: NATIVE_ADDRESS.to_string(),
        to_amount: 1_000_000_000,
        data: Vec::new(),
    }
}

/// Token-to-token order created on this network.
pub fn local_token_order(actors: &Actors) -> SwapOrder {
    SwapOrder {
        token: actors.mint.to_string(),
        to_token: actors.mint.to_string(),
        ..local_native_order(actors)
    }
}

/// Order created on a remote network, filled here.
pub fn inbound_order(actors: &Actors, to_token: &str) -> SwapOrder {
    SwapOrder {
        id: 7,
        emitter: "0xbe6452d4d6c61cee97d3".to_string(),
        src_nid: REMOTE_NID.to_string(),
        dst_nid: LOCAL_NID.to_string(),
        creator: "0x3e36eddd65e239222e7e67".to_string(),
        destination_address: actors.destination.to_string(),
        token: "0x14355340e857912188b7f202d550222487".to_string(),
        amount: 5_000,
        to_token: to_token.to_string(),
        to_amount: 4_000,
        data: Vec::new(),
    }
}

/// Order created here, destined for a remote network.
pub fn outbound_order(actors: &Actors, token: &str) -> SwapOrder {
    SwapOrder {
        id: 3,
        emitter: actors.program_id.to_string(),
        src_nid: LOCAL_NID.to_string(),
        dst_nid: REMOTE_NID.to_string(),
        creator: actors.creator.to_string(),
        destination_address: "0xd2c6218b875457a41b6fb7964e".to_string(),
        token: token.to_string(),
        amount: 2_500,
        to_token: "0x91a4728b517484f0f610de7b".to_string(),
        to_amount: 2_400,
        data: vec![1, 2, 3],
    }
}
