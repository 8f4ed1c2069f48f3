#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

//! Secret key storage and a uniform contract for cryptographic hash functions.
//!
//! * [`key::SecureKey`] holds key material in a shared, lock-guarded buffer that is wiped when the last holder releases it.
//! * [`digest`] defines the [`HashFunction`][digest::HashFunction] contract, with fixed-size and extendable-output variants, and adapters for common algorithms.

extern crate alloc;

pub mod cmp;
pub mod digest;
pub mod error;
pub mod hex;
pub mod key;
pub mod traits;

mod util;
