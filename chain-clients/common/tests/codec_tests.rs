//! Canonical codec tests
//!
//! Expected bytes are the on-ledger program's own test vectors, so any
//! difference here means addresses and hashes would diverge on chain.

use rlp::RlpStream;
use swap_intents_common::{
    Canonical, EncodingError, MessageType, OrderCancel, OrderFill, OrderMessage, SwapOrder,
};

mod helpers;
use helpers::{hex_bytes, vector_order, DUMMY_SOLVER};

// ============================================================================
// SWAP ORDER
// ============================================================================

/// 1. Test: SwapOrder Known Encoding
/// Verifies the encoding of a small order matches the program vector byte for byte.
/// Why: Every derived address and hash depends on this exact byte sequence.
#[test]
fn test_swap_order_matches_program_vector() {
    let expected = hex_bytes("f8a601963078626536343532643464366336316365653937643388457468657265756d87506f6c79676f6e983078336533366564646436356532333932323265376536379c30786432633632313862383735343537613431623666623739363465a43078313433353533343065383537393132313838623766323032643535303232323438378203e89a307839316134373238623531373438346630663631306465376282038480");

    let order = vector_order();
    assert_eq!(order.encode(), expected);
    assert_eq!(SwapOrder::decode(&expected).unwrap(), order);
}

/// 2. Test: SwapOrder Large Amounts And Data
/// Verifies multi-byte integers and a non-empty data payload against the program vector.
/// Why: Amounts wider than 8 bytes exercise the variable-width integer rule.
#[test]
fn test_swap_order_large_amounts_match_program_vector() {
    let expected = hex_bytes("f8c701963078626536343532643464366336316365653937643388457468657265756d87506f6c79676f6e983078336533366564646436356532333932323265376536379c30786432633632313862383735343537613431623666623739363465a43078313433353533343065383537393132313838623766323032643535303232323438378c033b2e3c9fd0803ce80000009a3078393161343732386235313734383466306636313064653762850218711a00946c449988e2f33302803c93f8287dc1d8cb33848a");

    let order = SwapOrder {
        amount: 100_000 * 10_u128.pow(22),
        to_amount: 900 * 10_u128.pow(7),
        data: hex_bytes("6c449988e2f33302803c93f8287dc1d8cb33848a"),
        ..vector_order()
    };
    assert_eq!(order.encode(), expected);
    assert_eq!(SwapOrder::decode(&expected).unwrap(), order);
}

/// 3. Test: SwapOrder Zero Id
/// Verifies an unassigned id encodes as the empty string (0x80).
#[test]
fn test_swap_order_zero_id_is_empty_string() {
    let order = SwapOrder { id: 0, ..vector_order() };
    let encoded = order.encode();
    assert_eq!(encoded[2], 0x80);
    assert_eq!(SwapOrder::decode(&encoded).unwrap().id, 0);
}

/// 4. Test: SwapOrder Trailing Bytes
/// Verifies bytes after a complete encoding are rejected.
/// Why: Accepting trailing data would let two byte strings decode to the same order.
#[test]
fn test_swap_order_rejects_trailing_bytes() {
    let mut encoded = vector_order().encode();
    encoded.push(0x00);
    assert_eq!(
        SwapOrder::decode(&encoded).unwrap_err(),
        EncodingError::TrailingBytes {
            entity: "SwapOrder",
            count: 1
        }
    );
}

/// 5. Test: SwapOrder Truncated Input
#[test]
fn test_swap_order_rejects_truncated_input() {
    let encoded = vector_order().encode();
    let err = SwapOrder::decode(&encoded[..encoded.len() - 5]).unwrap_err();
    assert!(matches!(err, EncodingError::Truncated { entity: "SwapOrder", .. }));
}

/// Encodes `order` field by field, replacing the item at `index` with raw bytes.
fn encode_with_raw_field(order: &SwapOrder, index: usize, raw: &[u8]) -> Vec<u8> {
    let mut stream = RlpStream::new_list(11);
    for position in 0..11 {
        if position == index {
            stream.append(&raw.to_vec());
            continue;
        }
        match position {
            0 => stream.append(&order.id),
            1 => stream.append(&order.emitter),
            2 => stream.append(&order.src_nid),
            3 => stream.append(&order.dst_nid),
            4 => stream.append(&order.creator),
            5 => stream.append(&order.destination_address),
            6 => stream.append(&order.token),
            7 => stream.append(&order.amount),
            8 => stream.append(&order.to_token),
            9 => stream.append(&order.to_amount),
            _ => stream.append(&order.data),
        };
    }
    stream.out().to_vec()
}

/// 6. Test: SwapOrder Oversized Integer
/// Verifies an amount wider than 16 bytes is reported against the amount field.
#[test]
fn test_swap_order_rejects_oversized_amount() {
    let encoded = encode_with_raw_field(&vector_order(), 7, &[0x01; 17]);

    let err = SwapOrder::decode(&encoded).unwrap_err();
    assert!(
        matches!(err, EncodingError::Field { entity: "SwapOrder", field: "amount", .. }),
        "unexpected error: {:?}",
        err
    );
}

/// 7. Test: SwapOrder Invalid UTF-8
#[test]
fn test_swap_order_rejects_invalid_utf8_creator() {
    let encoded = encode_with_raw_field(&vector_order(), 4, &[0xff, 0xfe]);

    assert_eq!(
        SwapOrder::decode(&encoded).unwrap_err(),
        EncodingError::InvalidUtf8 {
            entity: "SwapOrder",
            field: "creator"
        }
    );
}

/// 8. Test: SwapOrder Long Data Roundtrip
/// Verifies payloads above 55 bytes use the long length form and still decode.
#[test]
fn test_swap_order_long_data_roundtrip() {
    let order = SwapOrder {
        data: vec![0x5a; 300],
        ..vector_order()
    };
    assert_eq!(SwapOrder::decode(&order.encode()).unwrap(), order);
}

// ============================================================================
// ORDER FILL / ORDER CANCEL
// ============================================================================

/// 9. Test: OrderFill Known Encodings
/// Verifies both program vectors for OrderFill.
#[test]
fn test_order_fill_matches_program_vectors() {
    let fill = OrderFill {
        id: 1,
        order_bytes: hex_bytes("6c449988e2f33302803c93f8287dc1d8cb33848a"),
        solver: DUMMY_SOLVER.to_string(),
    };
    let expected = hex_bytes("f83f01946c449988e2f33302803c93f8287dc1d8cb33848aa830786362306136626263636663636465366265396631306165373831623964396230306436653633");
    assert_eq!(fill.encode(), expected);
    assert_eq!(OrderFill::decode(&expected).unwrap(), fill);

    let fill = OrderFill {
        id: 2,
        order_bytes: hex_bytes("cb0a6bbccfccde6be9f10ae781b9d9b00d6e63"),
        solver: "0x6c449988e2f33302803c93f8287dc1d8cb33848a".to_string(),
    };
    let expected = hex_bytes("f8400293cb0a6bbccfccde6be9f10ae781b9d9b00d6e63aa307836633434393938386532663333333032383033633933663832383764633164386362333338343861");
    assert_eq!(fill.encode(), expected);
    assert_eq!(OrderFill::decode(&expected).unwrap(), fill);
}

/// 10. Test: OrderCancel Known Encoding
#[test]
fn test_order_cancel_matches_program_vector() {
    let cancel = OrderCancel {
        order_bytes: hex_bytes("6c449988e2f33302803c93f8287dc1d8cb33848a"),
    };
    let expected = hex_bytes("d5946c449988e2f33302803c93f8287dc1d8cb33848a");
    assert_eq!(cancel.encode(), expected);
    assert_eq!(OrderCancel::decode(&expected).unwrap(), cancel);
}

/// 11. Test: OrderCancel Rejects Fill Shape
/// Verifies a three-field fill payload is not accepted as a cancel.
/// Why: A lenient decoder would read the fill's id bytes as cancel order bytes.
#[test]
fn test_order_cancel_rejects_fill_shape() {
    let fill = OrderFill::for_order(&vector_order(), DUMMY_SOLVER);
    assert_eq!(
        OrderCancel::decode(&fill.encode()).unwrap_err(),
        EncodingError::FieldCount {
            entity: "OrderCancel",
            expected: 1,
            found: 3
        }
    );
}

/// 12. Test: OrderFill Embedded Order
/// Verifies the helper constructors embed the canonical order encoding.
#[test]
fn test_payload_constructors_embed_order() {
    let order = vector_order();
    let fill = OrderFill::for_order(&order, DUMMY_SOLVER);
    assert_eq!(fill.id, order.id);
    assert_eq!(fill.order().unwrap(), order);

    let cancel = OrderCancel::for_order(&order);
    assert_eq!(cancel.order().unwrap(), order);
}

// ============================================================================
// ORDER MESSAGE
// ============================================================================

/// 13. Test: OrderMessage Known Encodings
#[test]
fn test_order_message_matches_program_vectors() {
    let payload = hex_bytes("6c449988e2f33302803c93f8287dc1d8cb33848a");

    let cancel = OrderMessage {
        message_type: MessageType::Cancel,
        payload: payload.clone(),
    };
    let expected = hex_bytes("d602946c449988e2f33302803c93f8287dc1d8cb33848a");
    assert_eq!(cancel.encode(), expected);
    assert_eq!(OrderMessage::decode(&expected).unwrap(), cancel);

    let fill = OrderMessage {
        message_type: MessageType::Fill,
        payload,
    };
    let expected = hex_bytes("d601946c449988e2f33302803c93f8287dc1d8cb33848a");
    assert_eq!(fill.encode(), expected);
    assert_eq!(OrderMessage::decode(&expected).unwrap(), fill);
}

/// 14. Test: OrderMessage Unknown Type
/// Verifies an unknown tag is an error rather than a panic.
#[test]
fn test_order_message_rejects_unknown_type() {
    let encoded = hex_bytes("d603946c449988e2f33302803c93f8287dc1d8cb33848a");
    assert_eq!(
        OrderMessage::decode(&encoded).unwrap_err(),
        EncodingError::UnknownMessageType(3)
    );
}

/// 15. Test: OrderMessage Not A List
#[test]
fn test_order_message_rejects_byte_string() {
    let encoded = hex_bytes("83010203");
    assert_eq!(
        OrderMessage::decode(&encoded).unwrap_err(),
        EncodingError::ExpectedList {
            entity: "OrderMessage"
        }
    );
}

/// 16. Test: Roundtrip Over Varied Orders
/// Verifies decode(encode(x)) == x across id, amount and string edge values.
#[test]
fn test_roundtrip_varied_orders() {
    let base = vector_order();
    let orders = vec![
        SwapOrder { id: 0, ..base.clone() },
        SwapOrder { id: u128::MAX, ..base.clone() },
        SwapOrder { amount: 0, to_amount: 0, ..base.clone() },
        SwapOrder { amount: 0x7f, to_amount: 0x80, ..base.clone() },
        SwapOrder { emitter: String::new(), creator: "ü".repeat(40), ..base.clone() },
        SwapOrder { data: vec![0x00], ..base.clone() },
        SwapOrder { data: vec![0x80], ..base },
    ];

    for order in orders {
        let encoded = order.encode();
        assert_eq!(SwapOrder::decode(&encoded).unwrap(), order);

        let fill = OrderFill::for_order(&order, DUMMY_SOLVER);
        assert_eq!(OrderFill::decode(&fill.encode()).unwrap(), fill);

        let message = OrderMessage::fill(&fill);
        assert_eq!(OrderMessage::decode(&message.encode()).unwrap(), message);
    }
}

/// 17. Test: Entities Nest In Foreign RLP Lists
/// Verifies the `rlp` trait implementations decode an order embedded in a larger list.
/// Why: Other protocol components carry orders inside their own RLP structures.
#[test]
fn test_order_nests_in_rlp_list() {
    let order = vector_order();
    let mut stream = RlpStream::new_list(2);
    stream.append(&7u32);
    stream.append(&order);
    let encoded = stream.out().to_vec();

    let outer = rlp::Rlp::new(&encoded);
    let nested: SwapOrder = outer.val_at(1).unwrap();
    assert_eq!(nested, order);
}

/// 18. Test: JSON Representation
/// Verifies orders survive a serde JSON roundtrip with every field intact.
#[test]
fn test_swap_order_json_roundtrip() {
    let order = SwapOrder {
        data: vec![0xde, 0xad],
        ..vector_order()
    };
    let json = serde_json::to_value(&order).unwrap();
    assert_eq!(json["src_nid"], "Ethereum");
    assert_eq!(json["data"], serde_json::json!([222, 173]));

    let back: SwapOrder = serde_json::from_value(json).unwrap();
    assert_eq!(back, order);
}
