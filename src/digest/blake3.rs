//! BLAKE3, backed by the `blake3` crate.
//!
//! [`Blake3`] produces the standard 32 byte digest; [`Blake3Xof`] uses BLAKE3's extendable output for digests of any length.
//! Both support the keyed mode through [`KeyedDigest`], with a 32 byte key.

use zeroize::Zeroizing;

use crate::error::{Error, ErrorKind, Result};

use super::{FixedDigest, HashFunction, KeyedDigest, UNBOUNDED_DIGEST, UnboundedDigest};

fn hasher_keyed(key: &[u8]) -> Result<::blake3::Hasher> {
    if key.len() != ::blake3::KEY_LEN {
        log::debug!(
            "rejected {} byte BLAKE3 key (expected {} bytes)",
            key.len(),
            ::blake3::KEY_LEN
        );
        return Err(Error::new_with_message(
            ErrorKind::InvalidInput,
            "BLAKE3 keys must be exactly 32 bytes",
        ));
    }

    let mut bytes = Zeroizing::new([0u8; ::blake3::KEY_LEN]);
    bytes.copy_from_slice(key);
    Ok(::blake3::Hasher::new_keyed(&bytes))
}

/// BLAKE3 with a 32 byte digest.
#[derive(Clone, Default)]
pub struct Blake3(::blake3::Hasher);

impl Blake3 {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HashFunction for Blake3 {
    const BLOCK_SIZE: usize = ::blake3::BLOCK_LEN;
    const DIGEST_SIZE: usize = ::blake3::OUT_LEN;

    fn update(&mut self, message: &[u8]) -> Result<()> {
        self.0.update(message);
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.0.reset();
        Ok(())
    }
}

impl FixedDigest for Blake3 {
    type Output = [u8; ::blake3::OUT_LEN];

    fn digest(&mut self) -> Result<Self::Output> {
        let hash = *self.0.finalize().as_bytes();
        self.0.reset();
        Ok(hash)
    }
}

impl KeyedDigest for Blake3 {
    const KEY_SIZE: usize = ::blake3::KEY_LEN;

    fn new_keyed(key: &[u8]) -> Result<Self> {
        hasher_keyed(key).map(Self)
    }
}

/// BLAKE3 in extendable-output mode.
///
/// The first 32 bytes of any output equal the [`Blake3`] digest of the same message.
#[derive(Clone, Default)]
pub struct Blake3Xof(::blake3::Hasher);

impl Blake3Xof {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HashFunction for Blake3Xof {
    const BLOCK_SIZE: usize = ::blake3::BLOCK_LEN;
    const DIGEST_SIZE: usize = UNBOUNDED_DIGEST;

    fn update(&mut self, message: &[u8]) -> Result<()> {
        self.0.update(message);
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.0.reset();
        Ok(())
    }
}

impl UnboundedDigest for Blake3Xof {
    fn finish_into(&mut self, out: &mut [u8]) -> Result<()> {
        self.0.finalize_xof().fill(out);
        self.0.reset();
        Ok(())
    }
}

impl KeyedDigest for Blake3Xof {
    const KEY_SIZE: usize = ::blake3::KEY_LEN;

    fn new_keyed(key: &[u8]) -> Result<Self> {
        hasher_keyed(key).map(Self)
    }
}

#[cfg(test)]
mod test {
    use super::{Blake3, Blake3Xof};
    use crate::digest::{FixedDigest, HashFunction, KeyedDigest, UnboundedDigest};
    use crate::error::ErrorKind;

    #[test]
    fn test_xof_prefix_matches_fixed() {
        let fixed = Blake3::digest_message(b"abc").unwrap();

        let mut long = [0u8; 100];
        Blake3Xof::digest_message(b"abc", &mut long).unwrap();
        assert_eq!(long[..32], fixed);
    }

    #[test]
    fn test_keyed_reset_keeps_key() {
        let key = [7u8; 32];
        let mut keyed = Blake3::new_keyed(&key).unwrap();
        keyed.update(b"garbage").unwrap();
        keyed.reset().unwrap();
        keyed.update(b"message").unwrap();
        let a = keyed.digest().unwrap();

        let expected = *::blake3::keyed_hash(&key, b"message").as_bytes();
        assert_eq!(a, expected);
        assert_ne!(a, Blake3::digest_message(b"message").unwrap());
    }

    #[test]
    fn test_keyed_rejects_wrong_length() {
        assert_eq!(
            Blake3::new_keyed(&[0; 31]).err().map(|e| e.kind()),
            Some(ErrorKind::InvalidInput)
        );
        assert_eq!(
            Blake3Xof::new_keyed(&[]).err().map(|e| e.kind()),
            Some(ErrorKind::InvalidInput)
        );
    }

    #[test]
    fn test_digest_returns_to_initial_state() {
        let mut h = Blake3Xof::new();
        h.update(b"first").unwrap();
        let _ = h.digest_to_vec(16).unwrap();
        h.update(b"second").unwrap();
        let mut a = [0u8; 16];
        h.digest(&mut a).unwrap();

        let mut b = [0u8; 16];
        Blake3Xof::digest_message(b"second", &mut b).unwrap();
        assert_eq!(a, b);
    }
}
