//! Shared fixtures for the common crate tests

#![allow(dead_code)]

use swap_intents_common::SwapOrder;

pub const DUMMY_EMITTER: &str = "0xbe6452d4d6c61cee97d3";
pub const DUMMY_CREATOR: &str = "0x3e36eddd65e239222e7e67";
pub const DUMMY_DESTINATION: &str = "0xd2c6218b875457a41b6fb7964e";
pub const DUMMY_TOKEN: &str = "0x14355340e857912188b7f202d550222487";
pub const DUMMY_TO_TOKEN: &str = "0x91a4728b517484f0f610de7b";
pub const DUMMY_SOLVER: &str = "0xcb0a6bbccfccde6be9f10ae781b9d9b00d6e63";

/// Order matching the program's first encoding test vector.
pub fn vector_order() -> SwapOrder {
    SwapOrder {
        id: 1,
        emitter: DUMMY_EMITTER.to_string(),
        src_nid: "Ethereum".to_string(),
        dst_nid: "Polygon".to_string(),
        creator: DUMMY_CREATOR.to_string(),
        destination_address: DUMMY_DESTINATION.to_string(),
        token: DUMMY_TOKEN.to_string(),
        amount: 1000,
        to_token: DUMMY_TO_TOKEN.to_string(),
        to_amount: 900,
        data: Vec::new(),
    }
}

/// Order with no id assigned yet and empty data.
pub fn unassigned_order() -> SwapOrder {
    SwapOrder {
        id: 0,
        ..vector_order()
    }
}

pub fn hex_bytes(value: &str) -> Vec<u8> {
    hex::decode(value).expect("valid hex fixture")
}
