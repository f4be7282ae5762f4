//! Canonical byte encoding of protocol entities
//!
//! Entities are RLP lists of their fields, encoded and decoded with the `rlp`
//! crate exactly as the on-ledger decoders do. On top of it [`Canonical::decode`]
//! only accepts one complete list with the entity's field count, so a payload
//! of one shape can never be read as another.

use rlp::{DecoderError, PayloadInfo, Rlp};

use crate::error::EncodingError;

/// Entities with a canonical byte representation.
///
/// Implementations must satisfy `decode(&encode(x)) == Ok(x)`.
pub trait Canonical: rlp::Encodable + Sized {
    /// Entity name used in error messages.
    const ENTITY: &'static str;
    /// Number of list items in the encoding.
    const FIELD_COUNT: usize;

    /// Reads the entity from an already shape-checked list.
    fn from_fields(fields: &Fields<'_>) -> Result<Self, EncodingError>;

    fn encode(&self) -> Vec<u8> {
        rlp::encode(self).to_vec()
    }

    /// Decodes `bytes`, which must hold exactly one encoded entity.
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - Decoded entity
    /// * `Err(EncodingError)` - Truncated, trailing, non-canonical or wrongly shaped input
    fn decode(bytes: &[u8]) -> Result<Self, EncodingError> {
        ensure_complete(bytes, Self::ENTITY)?;
        Self::from_fields(&Fields::open(&Rlp::new(bytes), Self::ENTITY, Self::FIELD_COUNT)?)
    }
}

/// Checks that `bytes` is exactly one item, without missing or trailing bytes.
fn ensure_complete(bytes: &[u8], entity: &'static str) -> Result<(), EncodingError> {
    if bytes.is_empty() {
        return Err(EncodingError::Truncated { entity, needed: 1 });
    }
    let info = PayloadInfo::from(bytes).map_err(|source| match source {
        DecoderError::RlpIsTooShort => EncodingError::Truncated { entity, needed: 1 },
        source => EncodingError::Malformed { entity, source },
    })?;
    let total = info.total();
    if total > bytes.len() {
        return Err(EncodingError::Truncated {
            entity,
            needed: total - bytes.len(),
        });
    }
    if total < bytes.len() {
        return Err(EncodingError::TrailingBytes {
            entity,
            count: bytes.len() - total,
        });
    }
    Ok(())
}

/// Field accessor over a list with a known number of items.
pub struct Fields<'a> {
    entity: &'static str,
    rlp: Rlp<'a>,
}

impl<'a> Fields<'a> {
    /// Opens `rlp` as a list of exactly `expected` items.
    pub fn open(rlp: &Rlp<'a>, entity: &'static str, expected: usize) -> Result<Self, EncodingError> {
        if !rlp.is_list() {
            return Err(EncodingError::ExpectedList { entity });
        }
        let found = rlp
            .item_count()
            .map_err(|source| EncodingError::Malformed { entity, source })?;
        if found != expected {
            return Err(EncodingError::FieldCount {
                entity,
                expected,
                found,
            });
        }
        Ok(Self {
            entity,
            rlp: rlp.clone(),
        })
    }

    /// Decodes the item at `index` with its `rlp::Decodable` implementation.
    pub fn value<T: rlp::Decodable>(&self, index: usize, field: &'static str) -> Result<T, EncodingError> {
        self.rlp.val_at(index).map_err(|source| EncodingError::Field {
            entity: self.entity,
            field,
            source,
        })
    }

    pub fn bytes(&self, index: usize, field: &'static str) -> Result<Vec<u8>, EncodingError> {
        self.value(index, field)
    }

    /// Returns the UTF-8 string at `index`.
    pub fn string(&self, index: usize, field: &'static str) -> Result<String, EncodingError> {
        String::from_utf8(self.bytes(index, field)?).map_err(|_| EncodingError::InvalidUtf8 {
            entity: self.entity,
            field,
        })
    }
}

/// Lets entities nest inside other `rlp::Decodable` types.
impl From<EncodingError> for DecoderError {
    fn from(error: EncodingError) -> Self {
        match error {
            EncodingError::Truncated { .. } => DecoderError::RlpIsTooShort,
            EncodingError::TrailingBytes { .. } => DecoderError::RlpInconsistentLengthAndData,
            EncodingError::ExpectedList { .. } => DecoderError::RlpExpectedToBeList,
            EncodingError::FieldCount { .. } => DecoderError::RlpIncorrectListLen,
            EncodingError::Malformed { source, .. } | EncodingError::Field { source, .. } => source,
            EncodingError::InvalidUtf8 { .. } => DecoderError::Custom("invalid UTF-8 string"),
            EncodingError::UnknownMessageType(_) => DecoderError::Custom("unknown message type"),
        }
    }
}
