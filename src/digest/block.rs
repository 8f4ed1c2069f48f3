use zeroize::Zeroize;

use crate::error::Result;
use crate::traits::ByteArray;

/// Buffers a partial block between calls to [`HashFunction::update`][super::HashFunction::update].
///
/// Implementors that compress whole blocks feed arbitrary slices through [`BlockBuffer::update`], which hands every complete block to the compression step in order and keeps the tail.
/// The buffered bytes are wiped on [`BlockBuffer::reset`] and on drop.
pub struct BlockBuffer<B: ByteArray> {
    buf: B,
    pos: usize,
}

impl<B: ByteArray> BlockBuffer<B> {
    pub fn new() -> Self {
        const {
            assert!(B::LEN != 0 && B::LEN.is_power_of_two());
        }
        Self {
            buf: <B as bytemuck::Zeroable>::zeroed(),
            pos: 0,
        }
    }

    /// Appends `input`, calling `compress` once for every block completed, in order.
    ///
    /// If `compress` fails, the error is returned immediately and the block that failed is not retained.
    pub fn update<F: FnMut(&B) -> Result<()>>(
        &mut self,
        mut input: &[u8],
        mut compress: F,
    ) -> Result<()> {
        if self.pos != 0 {
            let take = (B::LEN - self.pos).min(input.len());
            self.buf.as_mut()[self.pos..][..take].copy_from_slice(&input[..take]);
            self.pos += take;
            input = &input[take..];

            if self.pos < B::LEN {
                return Ok(());
            }

            self.pos = 0;
            compress(&self.buf)?;
        }

        let mut chunks = input.chunks_exact(B::LEN);
        for chunk in &mut chunks {
            compress(bytemuck::from_bytes(chunk))?;
        }

        let rem = chunks.remainder();
        self.buf.as_mut()[..rem.len()].copy_from_slice(rem);
        self.pos = rem.len();

        Ok(())
    }

    /// The buffered bytes of the incomplete block.
    pub fn remainder(&self) -> &[u8] {
        &self.buf.as_ref()[..self.pos]
    }

    /// The number of buffered bytes. Always less than the block size.
    pub fn len(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// Discards (and wipes) the buffered bytes.
    pub fn reset(&mut self) {
        self.buf.as_mut().zeroize();
        self.pos = 0;
    }
}

impl<B: ByteArray> Default for BlockBuffer<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ByteArray> Clone for BlockBuffer<B> {
    fn clone(&self) -> Self {
        Self {
            buf: self.buf,
            pos: self.pos,
        }
    }
}

impl<B: ByteArray> Drop for BlockBuffer<B> {
    fn drop(&mut self) {
        self.buf.as_mut().zeroize();
    }
}
