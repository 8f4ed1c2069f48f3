//! BLAKE2 (RFC 7693) at its full digest sizes, backed by the `blake2` crate.

use ::blake2::Digest;

fixed_adapter! {
    /// BLAKE2b with a 64 byte digest.
    Blake2b512 => ::blake2::Blake2b512, block: 128, digest: 64
}

fixed_adapter! {
    /// BLAKE2s with a 32 byte digest.
    Blake2s256 => ::blake2::Blake2s256, block: 64, digest: 32
}
