//! The contract implemented by digest algorithms.
//!
//! Every algorithm implements [`HashFunction`], which covers the incremental half of the interface ([`HashFunction::update`] and [`HashFunction::reset`]),
//! and exactly one of the two output shapes:
//! * [`FixedDigest`], for algorithms with a fixed digest size (SHA-256, BLAKE2b-512, ...), and
//! * [`UnboundedDigest`], for extendable-output functions where the caller picks the digest length.
//!
//! Both shapes provide a stateless one-shot `digest_message` that never touches an existing instance.
//!
//! ## Thread Safety
//! A digest instance is a single-threaded state machine. Every mutating operation takes `&mut self`, so sharing one instance between threads requires external serialization (e.g. a `Mutex`).
//! Prefer one instance per thread.
//!
//! ## Keys
//! Keyed algorithms ([`KeyedDigest`]) take the key as raw bytes, for example a [`SecureKey::view`][crate::key::SecureKey::view].

use alloc::vec::Vec;

use crate::error::{Error, ErrorKind, Result};
use crate::traits::ByteArray;

mod block;

pub use block::BlockBuffer;

/// The value of [`HashFunction::DIGEST_SIZE`] reserved for algorithms that produce digests of any length.
pub const UNBOUNDED_DIGEST: usize = 0;

/// The operations shared by every digest algorithm.
pub trait HashFunction {
    /// The number of bytes consumed by one step of the algorithm.
    ///
    /// Must be a power of two. This is checked at compile time when the provided methods of [`FixedDigest`] or [`UnboundedDigest`] are used.
    const BLOCK_SIZE: usize;

    /// The size of the digest in bytes, or [`UNBOUNDED_DIGEST`] if the caller chooses the length.
    const DIGEST_SIZE: usize;

    /// Absorbs `message` into the running state.
    ///
    /// May be called any number of times. The concatenation of all messages since the last reset (or finalization) is hashed, regardless of how it was split.
    fn update(&mut self, message: &[u8]) -> Result<()>;

    /// Restores the initial state, discarding everything absorbed so far.
    ///
    /// After a reset, the instance behaves exactly like a freshly constructed one (keyed instances keep their key).
    fn reset(&mut self) -> Result<()>;
}

/// A [`HashFunction`] with a fixed digest size.
pub trait FixedDigest: HashFunction {
    /// The digest type, an array of exactly [`HashFunction::DIGEST_SIZE`] bytes.
    type Output: ByteArray;

    /// Finalizes the running state and returns the digest.
    ///
    /// The instance is returned to its initial state, so the next call to [`HashFunction::update`] starts a new message.
    fn digest(&mut self) -> Result<Self::Output>;

    /// Finalizes the running state and writes the digest to `out`.
    ///
    /// ## Errors
    /// Returns [`ErrorKind::InvalidDigestLength`] if `out.len() != DIGEST_SIZE`. In that case nothing is written and the running state is preserved.
    fn digest_into(&mut self, out: &mut [u8]) -> Result<()> {
        const { check_fixed_params::<Self>() }
        check_fixed_length::<Self>(out.len())?;

        let digest = self.digest()?;
        out.copy_from_slice(digest.as_ref());
        Ok(())
    }

    /// Computes the digest of `message` with a fresh instance.
    ///
    /// Equivalent to `update(message)` followed by `digest()` on `Self::default()`, without keeping any state around.
    fn digest_message(message: &[u8]) -> Result<Self::Output>
    where
        Self: Default,
    {
        const { check_fixed_params::<Self>() }

        let mut this = Self::default();
        this.update(message)?;
        this.digest()
    }
}

/// A [`HashFunction`] that produces digests of a caller-chosen length (an extendable-output function).
///
/// ## Valid Lengths
/// A request must be for at least 1 and at most [`UnboundedDigest::MAX_DIGEST_SIZE`] bytes.
/// Every finalizing method rejects a zero-length request with [`ErrorKind::InvalidDigestLength`].
/// Rejected requests write nothing and leave the running state as it was.
pub trait UnboundedDigest: HashFunction {
    /// The largest digest length, in bytes, the algorithm can produce.
    const MAX_DIGEST_SIZE: usize = usize::MAX;

    /// Finalizes the running state, filling all of `out` with output.
    ///
    /// Implementors may assume that `out.len()` has already been validated (non-zero and at most [`UnboundedDigest::MAX_DIGEST_SIZE`]). Callers should use [`UnboundedDigest::digest`] instead.
    /// The instance must be returned to its initial state afterwards.
    fn finish_into(&mut self, out: &mut [u8]) -> Result<()>;

    /// Finalizes the running state and fills `out` with exactly `out.len()` bytes of digest.
    ///
    /// ## Errors
    /// Returns [`ErrorKind::InvalidDigestLength`] if `out` is empty or longer than [`UnboundedDigest::MAX_DIGEST_SIZE`]. In that case nothing is written and the running state is preserved.
    fn digest(&mut self, out: &mut [u8]) -> Result<()> {
        const { check_unbounded_params::<Self>() }
        check_unbounded_length::<Self>(out.len())?;

        self.finish_into(out)
    }

    /// Finalizes the running state and returns `len` bytes of digest.
    ///
    /// ## Errors
    /// Same as [`UnboundedDigest::digest`].
    fn digest_to_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        const { check_unbounded_params::<Self>() }
        check_unbounded_length::<Self>(len)?;

        let mut out = alloc::vec![0u8; len];
        self.finish_into(&mut out)?;
        Ok(out)
    }

    /// Computes an `out.len()` byte digest of `message` with a fresh instance.
    ///
    /// The length is validated before anything is hashed.
    fn digest_message(message: &[u8], out: &mut [u8]) -> Result<()>
    where
        Self: Default,
    {
        const { check_unbounded_params::<Self>() }
        check_unbounded_length::<Self>(out.len())?;

        let mut this = Self::default();
        this.update(message)?;
        this.finish_into(out)
    }
}

/// A [`HashFunction`] that can be keyed.
pub trait KeyedDigest: HashFunction + Sized {
    /// The required key length in bytes.
    const KEY_SIZE: usize;

    /// Constructs an instance keyed with `key`.
    ///
    /// ## Errors
    /// Returns [`ErrorKind::InvalidInput`] if `key.len() != KEY_SIZE`.
    fn new_keyed(key: &[u8]) -> Result<Self>;
}

const fn check_block_size<H: HashFunction + ?Sized>() {
    assert!(
        H::BLOCK_SIZE != 0 && H::BLOCK_SIZE.is_power_of_two(),
        "BLOCK_SIZE must be a non-zero power of two"
    );
}

const fn check_fixed_params<H: FixedDigest + ?Sized>() {
    check_block_size::<H>();
    assert!(
        H::DIGEST_SIZE != UNBOUNDED_DIGEST,
        "fixed-size digests must not use UNBOUNDED_DIGEST"
    );
    assert!(
        H::DIGEST_SIZE == <H::Output as ByteArray>::LEN,
        "Output must be DIGEST_SIZE bytes long"
    );
}

const fn check_unbounded_params<H: UnboundedDigest + ?Sized>() {
    check_block_size::<H>();
    assert!(
        H::DIGEST_SIZE == UNBOUNDED_DIGEST,
        "unbounded digests must declare DIGEST_SIZE as UNBOUNDED_DIGEST"
    );
}

fn check_fixed_length<H: FixedDigest + ?Sized>(len: usize) -> Result<()> {
    if len != H::DIGEST_SIZE {
        log::debug!(
            "rejected {len} byte output for a {} byte digest",
            H::DIGEST_SIZE
        );
        return Err(Error::new_with_message(
            ErrorKind::InvalidDigestLength,
            "output length does not match the digest size",
        ));
    }
    Ok(())
}

fn check_unbounded_length<H: UnboundedDigest + ?Sized>(len: usize) -> Result<()> {
    if len == 0 {
        log::debug!("rejected empty digest request");
        return Err(Error::new_with_message(
            ErrorKind::InvalidDigestLength,
            "digest length must be non-zero",
        ));
    }
    if len > H::MAX_DIGEST_SIZE {
        log::debug!(
            "rejected {len} byte digest request (maximum is {})",
            H::MAX_DIGEST_SIZE
        );
        return Err(Error::new_with_message(
            ErrorKind::InvalidDigestLength,
            "digest length exceeds the algorithm's maximum",
        ));
    }
    Ok(())
}

/// Computes the digest of `bytes` using `digest`, starting from its current state.
pub fn digest<D: FixedDigest>(mut digest: D, bytes: &[u8]) -> Result<D::Output> {
    digest.update(bytes)?;
    digest.digest()
}

#[allow(unused_macros)]
macro_rules! fixed_adapter {
    ($(#[$meta:meta])* $name:ident => $inner:ty, block: $block:literal, digest: $digest:literal) => {
        $(#[$meta])*
        #[derive(Clone, Default)]
        pub struct $name($inner);

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }
        }

        impl $crate::digest::HashFunction for $name {
            const BLOCK_SIZE: usize = $block;
            const DIGEST_SIZE: usize = $digest;

            fn update(&mut self, message: &[u8]) -> $crate::error::Result<()> {
                Digest::update(&mut self.0, message);
                Ok(())
            }

            fn reset(&mut self) -> $crate::error::Result<()> {
                self.0 = <$inner>::default();
                Ok(())
            }
        }

        impl $crate::digest::FixedDigest for $name {
            type Output = [u8; $digest];

            fn digest(&mut self) -> $crate::error::Result<Self::Output> {
                let hash = Digest::finalize(core::mem::take(&mut self.0));
                let mut out = [0u8; $digest];
                out.copy_from_slice(&hash);
                Ok(out)
            }
        }
    };
}

#[cfg(feature = "sha2")]
pub mod sha2;

#[cfg(feature = "blake2")]
pub mod blake2;

#[cfg(feature = "blake3")]
pub mod blake3;
