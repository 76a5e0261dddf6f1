//! Pool-managed decompressor wrapper.

use super::{Decompressor, Progress, RawInflater};
use crate::error::InflateError;

/// A decompressor handle as handed out by an
/// [`InflaterPool`](crate::InflaterPool).
///
/// `LenientInflater` wraps any [`Decompressor`] and changes two behaviours:
///
/// - **Zero-length calls.** Some engines do not update their end-of-stream
///   state when asked for zero output bytes. A `decompress` call with an
///   empty output slice is turned into a probe for a single byte into an
///   internal scratch byte, so [`is_finished`](Decompressor::is_finished)
///   is accurate afterwards. The call still reports zero bytes produced.
/// - **Suppressed `end`.** [`end`](Decompressor::end) does nothing. Code that
///   unconditionally ends the decompressors it is done with cannot destroy a
///   pooled handle; only the pool releases the native state.
///
/// Everything else, including [`reset`](Decompressor::reset), is passed
/// through to the wrapped decompressor.
///
/// # Panics
///
/// A zero-length call panics if the probe produces a byte. The caller asked
/// for nothing while the stream still had data, and dropping that byte
/// silently would corrupt the output.
#[derive(Debug)]
pub struct LenientInflater<D = RawInflater> {
    inner: D,
    probe: [u8; 1],
}

impl LenientInflater<RawInflater> {
    /// Creates a fresh handle over a new [`RawInflater`].
    pub fn new(zlib_header: bool) -> Self {
        Self::wrap(RawInflater::new(zlib_header))
    }
}

impl<D: Decompressor> LenientInflater<D> {
    /// Wraps an existing decompressor.
    pub fn wrap(inner: D) -> Self {
        Self {
            inner,
            probe: [0u8; 1],
        }
    }

    /// Returns a reference to the wrapped decompressor.
    pub fn get_ref(&self) -> &D {
        &self.inner
    }

    /// Really ends the wrapped decompressor and drops the handle.
    pub(crate) fn destroy(mut self) {
        self.inner.end();
    }
}

impl<D: Decompressor> Decompressor for LenientInflater<D> {
    fn decompress(&mut self, input: &[u8], output: &mut [u8]) -> Result<Progress, InflateError> {
        if !output.is_empty() {
            return self.inner.decompress(input, output);
        }

        let progress = self.inner.decompress(input, &mut self.probe)?;
        if progress.produced > 0 {
            panic!(
                "zero-length inflate produced {} byte(s); the stream still had data",
                progress.produced
            );
        }
        Ok(progress)
    }

    fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    fn is_ended(&self) -> bool {
        self.inner.is_ended()
    }

    fn total_in(&self) -> u64 {
        self.inner.total_in()
    }

    fn total_out(&self) -> u64 {
        self.inner.total_out()
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    fn end(&mut self) {
        tracing::trace!("ignoring end() on pooled inflater");
    }
}
