//! Swap order intent record

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use crate::codec::{Canonical, Fields};
use crate::error::EncodingError;

/// Intent to swap `amount` of `token` on `src_nid` for `to_amount` of
/// `to_token` delivered to `destination_address` on `dst_nid`.
///
/// `id` is zero until the origin network assigns it at creation and never
/// changes afterwards. Two orders are equal only if every field, `data`
/// included, is byte-equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapOrder {
    /// Identifier assigned by the origin network (0 before assignment)
    pub id: u128,
    /// Address of the emitting protocol instance on the origin network
    pub emitter: String,
    /// Network ID of the origin network
    pub src_nid: String,
    /// Network ID of the destination network
    pub dst_nid: String,
    /// Origin-network address of the order creator
    pub creator: String,
    /// Destination-network address receiving `to_token`
    pub destination_address: String,
    /// Deposited asset (native sentinel or asset identifier)
    pub token: String,
    /// Deposited amount in base units
    pub amount: u128,
    /// Requested asset on the destination network
    pub to_token: String,
    /// Requested amount in base units
    pub to_amount: u128,
    /// Opaque caller payload
    pub data: Vec<u8>,
}

impl SwapOrder {
    /// Returns true once the origin network has assigned an id.
    pub fn has_id(&self) -> bool {
        self.id != 0
    }

    /// Returns true when the order settles on the network it was created on.
    pub fn is_same_network(&self) -> bool {
        self.src_nid == self.dst_nid
    }

    /// Keccak-256 digest of the canonical encoding.
    pub fn hash(&self) -> [u8; 32] {
        keccak256(&self.encode())
    }

    /// Returns a copy with the given id.
    pub fn with_id(&self, id: u128) -> Self {
        Self {
            id,
            ..self.clone()
        }
    }
}

impl rlp::Encodable for SwapOrder {
    fn rlp_append(&self, stream: &mut rlp::RlpStream) {
        stream.begin_list(11);
        stream.append(&self.id);
        stream.append(&self.emitter);
        stream.append(&self.src_nid);
        stream.append(&self.dst_nid);
        stream.append(&self.creator);
        stream.append(&self.destination_address);
        stream.append(&self.token);
        stream.append(&self.amount);
        stream.append(&self.to_token);
        stream.append(&self.to_amount);
        stream.append(&self.data);
    }
}

impl rlp::Decodable for SwapOrder {
    fn decode(rlp: &rlp::Rlp) -> Result<Self, rlp::DecoderError> {
        let fields = Fields::open(rlp, Self::ENTITY, Self::FIELD_COUNT)?;
        Ok(Self::from_fields(&fields)?)
    }
}

impl Canonical for SwapOrder {
    const ENTITY: &'static str = "SwapOrder";
    const FIELD_COUNT: usize = 11;

    fn from_fields(fields: &Fields<'_>) -> Result<Self, EncodingError> {
        Ok(Self {
            id: fields.value(0, "id")?,
            emitter: fields.string(1, "emitter")?,
            src_nid: fields.string(2, "src_nid")?,
            dst_nid: fields.string(3, "dst_nid")?,
            creator: fields.string(4, "creator")?,
            destination_address: fields.string(5, "destination_address")?,
            token: fields.string(6, "token")?,
            amount: fields.value(7, "amount")?,
            to_token: fields.string(8, "to_token")?,
            to_amount: fields.value(9, "to_amount")?,
            data: fields.bytes(10, "data")?,
        })
    }
}

/// Keccak-256 of arbitrary bytes.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}
