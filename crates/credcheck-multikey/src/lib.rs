//! Multibase/multicodec codec for Ed25519 public keys.
//!
//! A `publicKeyMultibase` value is the multicodec prefix for an Ed25519
//! public key (the unsigned varint `0xed 0x01`) followed by the 32 raw key
//! bytes, the whole sequence multibase-encoded with base58-btc (a `z...`
//! string). Decoding validates every layer and yields the raw key bytes.

use multibase::Base;

/// Multicodec code for an Ed25519 public key.
///
/// Encoded as an unsigned varint this becomes the wire prefix `0xed 0x01`.
pub const ED25519_PUB: u64 = 0xed;

/// Length of a raw Ed25519 public key.
pub const ED25519_PUB_LEN: usize = 32;

/// Error decoding a `publicKeyMultibase` value.
#[derive(Debug, thiserror::Error)]
pub enum MultikeyError {
    /// The multibase layer failed to decode.
    #[error(transparent)]
    Multibase(#[from] multibase::Error),

    /// The multicodec varint prefix failed to decode.
    #[error(transparent)]
    Varint(#[from] unsigned_varint::decode::Error),

    /// The multicodec prefix identifies something other than an Ed25519
    /// public key.
    #[error("unexpected multicodec code 0x{0:02x}")]
    UnexpectedCodec(u64),

    /// The key material after the prefix has the wrong length.
    #[error("invalid key length {0}, expected 32 bytes")]
    InvalidLength(usize),
}

/// Decodes a multibase-encoded, multicodec-tagged Ed25519 public key into
/// its raw 32 bytes.
pub fn decode_multikey(multikey: &str) -> Result<[u8; ED25519_PUB_LEN], MultikeyError> {
    let (_base, data) = multibase::decode(multikey)?;
    let (codec, key) = unsigned_varint::decode::u64(&data)?;
    if codec != ED25519_PUB {
        return Err(MultikeyError::UnexpectedCodec(codec));
    }
    key.try_into()
        .map_err(|_| MultikeyError::InvalidLength(key.len()))
}

/// Encodes a raw Ed25519 public key as a base58-btc multibase string with
/// the multicodec prefix.
pub fn encode_multikey(public_key: &[u8; ED25519_PUB_LEN]) -> String {
    let mut codec_buffer = [0u8; 10];
    let prefix = unsigned_varint::encode::u64(ED25519_PUB, &mut codec_buffer);
    let mut bytes = Vec::with_capacity(prefix.len() + public_key.len());
    bytes.extend_from_slice(prefix);
    bytes.extend_from_slice(public_key);
    multibase::encode(Base::Base58Btc, bytes)
}

/// Tells whether `candidate` is a well-formed Ed25519 multikey.
///
/// Every decode failure collapses to `false`; callers that need the failure
/// cause use [`decode_multikey`] directly.
pub fn is_ed25519_multikey(candidate: &str) -> bool {
    decode_multikey(candidate).is_ok()
}
