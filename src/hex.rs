//! Hexadecimal encoding and decoding for secret data, backed by `base16ct`.
//!
//! ## Side Channel Avoidance
//! `base16ct` uses neither lookup tables nor branches on the byte values, so rendering a key (or parsing one) does not leak its contents through cache or branch timing.
//! The only data-dependent branch is the final validity check in [`decode`], which only reveals *that* the input was malformed.

use alloc::{string::String, vec::Vec};
use core::fmt::Write;

use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, ErrorKind, Result};

/// Input bytes encoded per round trip through the stack buffer in [`encode_lower`].
const CHUNK: usize = 32;

/// Writes `bytes` to `out` as lowercase hex, two digits per byte, most-significant nibble first.
///
/// Digits are staged in a small stack buffer, which is wiped before returning.
pub fn encode_lower<W: Write + ?Sized>(bytes: &[u8], out: &mut W) -> core::fmt::Result {
    let mut buf = Zeroizing::new([0u8; 2 * CHUNK]);
    for chunk in bytes.chunks(CHUNK) {
        let digits =
            base16ct::lower::encode_str(chunk, &mut buf[..]).map_err(|_| core::fmt::Error)?;
        out.write_str(digits)?;
    }
    Ok(())
}

/// Returns `bytes` as a lowercase hex string.
///
/// The returned string is as sensitive as `bytes`; wrap it in [`Zeroizing`] if it must be wiped.
pub fn encode_to_string(bytes: &[u8]) -> String {
    base16ct::lower::encode_string(bytes)
}

/// Decodes the hex string `hex` into `out`.
///
/// Both upper and lower case digits are accepted. `out` must be exactly half as long as `hex`.
///
/// ## Errors
/// Returns [`ErrorKind::InvalidInput`] if `hex` has an odd length, if `out` has the wrong length, or if `hex` contains a character that is not a hex digit.
/// The length checks happen first and leave `out` untouched. If a digit is invalid, `out` is zeroed.
pub fn decode(hex: &[u8], out: &mut [u8]) -> Result<()> {
    if hex.len() % 2 != 0 {
        return Err(Error::new_with_message(
            ErrorKind::InvalidInput,
            "odd number of hex digits",
        ));
    }
    if hex.len() / 2 != out.len() {
        return Err(Error::new_with_message(
            ErrorKind::InvalidInput,
            "output buffer does not match the decoded length",
        ));
    }

    if base16ct::mixed::decode(hex, out).is_err() {
        out.zeroize();
        return Err(Error::new_with_message(
            ErrorKind::InvalidInput,
            "invalid hex digit",
        ));
    }

    Ok(())
}

/// Decodes the hex string `hex` into a newly allocated buffer, which is wiped when dropped.
pub fn decode_to_vec(hex: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let mut out = Zeroizing::new(alloc::vec![0u8; hex.len() / 2]);
    decode(hex, &mut out)?;
    Ok(out)
}
