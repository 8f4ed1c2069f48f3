mod private {
    pub trait Sealed {}
}

use bytemuck::{Pod, Zeroable};
use private::Sealed;

/// A fixed-size array of bytes, used for block and digest types.
///
/// This is a sealed trait and is implemented only for `[u8; N]`.
pub trait ByteArray: Sealed + Pod + Eq + core::fmt::Debug + AsRef<[u8]> + AsMut<[u8]> + 'static {
    const LEN: usize;

    /// Copies `sl` into a new array.
    ///
    /// Returns [`None`] unless `sl.len() == Self::LEN`.
    fn from_slice(sl: &[u8]) -> Option<Self> {
        if sl.len() != Self::LEN {
            return None;
        }

        let mut this = <Self as Zeroable>::zeroed();
        this.as_mut().copy_from_slice(sl);
        Some(this)
    }

    /// Parses a hex string of exactly `2 * Self::LEN` digits.
    fn from_hex_string(s: &str) -> Option<Self> {
        let mut this = <Self as Zeroable>::zeroed();
        crate::hex::decode(s.as_bytes(), this.as_mut()).ok()?;
        Some(this)
    }
}

impl<const N: usize> Sealed for [u8; N] {}
impl<const N: usize> ByteArray for [u8; N] {
    const LEN: usize = N;
}
