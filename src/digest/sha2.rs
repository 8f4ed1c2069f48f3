//! The SHA-2 family, backed by the `sha2` crate.

use ::sha2::Digest;

fixed_adapter! {
    /// SHA-224 (FIPS 180-4).
    Sha224 => ::sha2::Sha224, block: 64, digest: 28
}

fixed_adapter! {
    /// SHA-256 (FIPS 180-4).
    Sha256 => ::sha2::Sha256, block: 64, digest: 32
}

fixed_adapter! {
    /// SHA-384 (FIPS 180-4).
    Sha384 => ::sha2::Sha384, block: 128, digest: 48
}

fixed_adapter! {
    /// SHA-512 (FIPS 180-4).
    Sha512 => ::sha2::Sha512, block: 128, digest: 64
}
