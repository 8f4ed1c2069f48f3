//! Shared, self-wiping containers for secret key material.
//!
//! A [`SecureKey`] is either *null* (no bytes) or *bound* to a non-empty heap buffer.
//! Clones share the buffer rather than copying the secret, and the buffer is overwritten with zeroes when the last holder releases it.

use alloc::{boxed::Box, sync::Arc};
use core::{fmt, ops::Deref};

use zeroize::Zeroize;

use crate::error::Result;
use crate::util::{self, RwLock};

/// The heap allocation behind a bound key.
///
/// Never empty, never resized. The bytes are zeroed before the allocation is returned to the allocator.
struct KeyBuffer(Box<[u8]>);

impl KeyBuffer {
    fn new(value: &[u8]) -> Option<Arc<Self>> {
        if value.is_empty() {
            return None;
        }

        Some(Arc::new(Self(Box::from(value))))
    }
}

impl Drop for KeyBuffer {
    fn drop(&mut self) {
        log::trace!("wiping {} byte key buffer", self.0.len());
        self.0[..].zeroize();
    }
}

/// A container for secret key material.
///
/// The key is *null* exactly when it holds no bytes: [`SecureKey::len`] is 0, [`SecureKey::is_null`] is true, and [`SecureKey::view`] is empty.
/// Constructing a key from an empty or absent byte string yields the null key rather than an error.
///
/// ## Sharing
/// [`Clone`] shares the underlying buffer (an O(1) reference count increment); the secret is never duplicated in memory.
/// [`SecureKey::set`] and [`SecureKey::clear`] replace only this instance's buffer, so other holders keep seeing the old value.
/// When the last holder of a buffer releases it, the bytes are overwritten with zeroes using [`zeroize`], which the optimizer may not elide.
///
/// ## Concurrency
/// Every instance guards its buffer handle with a reader/writer lock, so all methods take `&self` and a key can be shared between threads.
/// Reads ([`SecureKey::view`], [`SecureKey::len`], comparison, formatting, cloning) proceed in parallel; writes exclude all readers of that instance.
/// Operations touching two keys ([`SecureKey::replace_from`], [`SecureKey::swap`]) lock both in a fixed global order, so concurrent swaps of the same pair cannot deadlock.
/// No lock is held once a method returns.
///
/// ## Comparison
/// [`PartialEq`] compares the contents in constant time (see [`crate::cmp::eq`]). Two null keys are equal and a null key never equals a bound one.
///
/// ## Formatting
/// [`Display`][fmt::Display] renders the key as lowercase hex (a null key renders as the empty string).
/// [`Debug`][fmt::Debug] only prints the length.
pub struct SecureKey {
    buffer: RwLock<Option<Arc<KeyBuffer>>>,
}

#[allow(clippy::len_without_is_empty)]
impl SecureKey {
    /// Creates a null key.
    pub const fn new() -> Self {
        Self {
            buffer: RwLock::new(None),
        }
    }

    /// Creates a key holding a copy of `value`.
    ///
    /// If `value` is empty, the result is the null key.
    pub fn from_slice(value: &[u8]) -> Self {
        Self {
            buffer: RwLock::new(KeyBuffer::new(value)),
        }
    }

    /// Creates a key from a hex string (upper or lower case digits).
    ///
    /// The empty string gives the null key. The intermediate decoded buffer is wiped before returning.
    ///
    /// ## Errors
    /// Returns [`ErrorKind::InvalidInput`][crate::error::ErrorKind::InvalidInput] if `hex` has an odd length or contains a non-hex character.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let bytes = crate::hex::decode_to_vec(hex.as_bytes())?;
        Ok(Self::from_slice(&bytes))
    }

    /// Releases this instance's buffer and makes it null.
    ///
    /// Clones that share the buffer are unaffected. Clearing a null key does nothing.
    pub fn clear(&self) {
        let old = self.buffer.write().take();
        if old.is_some() {
            log::trace!("key cleared");
        }
    }

    /// Replaces this instance's contents with a copy of `value`.
    ///
    /// If `value` is empty, the key becomes null. Clones that shared the previous buffer keep it.
    pub fn set(&self, value: &[u8]) {
        let new = KeyBuffer::new(value);
        let old = core::mem::replace(&mut *self.buffer.write(), new);
        if old.is_some() {
            log::trace!("key buffer replaced");
        }
    }

    fn handle(&self) -> Option<Arc<KeyBuffer>> {
        self.buffer.read().as_ref().map(Arc::clone)
    }

    /// Returns a read-only view of the key bytes.
    ///
    /// The view shares the buffer, so it stays valid (and unwiped) for as long as it is held, even if this key is later set, cleared or dropped.
    /// A null key gives an empty view.
    pub fn view(&self) -> KeyView {
        KeyView(self.handle())
    }

    /// Returns the length of the key in bytes, or 0 for the null key.
    pub fn len(&self) -> usize {
        self.buffer.read().as_ref().map_or(0, |buf| buf.0.len())
    }

    /// Checks whether this key is null.
    pub fn is_null(&self) -> bool {
        self.buffer.read().is_none()
    }

    /// Moves the contents out of this key, leaving it null.
    ///
    /// This is the equivalent of a move construction: the returned key holds exactly what `self` held, and the transfer is atomic with respect to concurrent readers of `self`.
    pub fn take(&self) -> SecureKey {
        Self {
            buffer: RwLock::new(self.buffer.write().take()),
        }
    }

    /// Makes this key share `other`'s buffer (copy assignment).
    pub fn assign(&self, other: &SecureKey) {
        if core::ptr::eq(self, other) {
            return;
        }

        let new = other.handle();
        let _old = core::mem::replace(&mut *self.buffer.write(), new);
    }

    /// Moves `other`'s buffer into this key, leaving `other` null (move assignment).
    ///
    /// Both keys are write-locked for the duration of the transfer. Assigning a key to itself does nothing.
    pub fn replace_from(&self, other: &SecureKey) {
        if core::ptr::eq(self, other) {
            return;
        }

        let _old = {
            let (mut this, mut other) = util::write_both(&self.buffer, &other.buffer);
            core::mem::replace(&mut *this, other.take())
        };
    }

    /// Exchanges the contents of two keys.
    pub fn swap(&self, other: &SecureKey) {
        if core::ptr::eq(self, other) {
            return;
        }

        let (mut this, mut other) = util::write_both(&self.buffer, &other.buffer);
        core::mem::swap(&mut *this, &mut *other);
    }
}

impl Default for SecureKey {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SecureKey {
    fn clone(&self) -> Self {
        Self {
            buffer: RwLock::new(self.handle()),
        }
    }
}

impl From<&[u8]> for SecureKey {
    fn from(value: &[u8]) -> Self {
        Self::from_slice(value)
    }
}

impl<const N: usize> From<&[u8; N]> for SecureKey {
    fn from(value: &[u8; N]) -> Self {
        Self::from_slice(value)
    }
}

impl From<Option<&[u8]>> for SecureKey {
    fn from(value: Option<&[u8]>) -> Self {
        value.map_or_else(Self::new, Self::from_slice)
    }
}

impl PartialEq for SecureKey {
    fn eq(&self, other: &Self) -> bool {
        if core::ptr::eq(self, other) {
            return true;
        }

        // Each side is snapshotted under its own read lock, so two locks are never held at once
        let this = self.view();
        let other = other.view();
        crate::cmp::eq(&this, &other)
    }
}

impl Eq for SecureKey {}

impl PartialEq<[u8]> for SecureKey {
    fn eq(&self, other: &[u8]) -> bool {
        crate::cmp::eq(&self.view(), other)
    }
}

impl fmt::Display for SecureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.view();
        crate::hex::encode_lower(&view, f)
    }
}

impl fmt::Debug for SecureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureKey")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// A read-only view of the bytes of a [`SecureKey`], obtained from [`SecureKey::view`].
///
/// Dereferences to `[u8]`. Holding a view keeps the viewed buffer alive.
#[derive(Clone)]
pub struct KeyView(Option<Arc<KeyBuffer>>);

impl Deref for KeyView {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match &self.0 {
            Some(buf) => &buf.0[..],
            None => &[],
        }
    }
}

impl AsRef<[u8]> for KeyView {
    fn as_ref(&self) -> &[u8] {
        self
    }
}

impl fmt::Debug for KeyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyView")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
