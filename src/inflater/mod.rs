//! Streaming decompressor handles.
//!
//! - [`Decompressor`] - Capability shared by every handle kind
//! - [`RawInflater`] - zlib/deflate engine backed by `flate2`
//! - [`LenientInflater`] - Pool-managed wrapper with the zero-length probe
//!   fix and a suppressed [`Decompressor::end`]

mod lenient;
mod raw;

#[cfg(test)]
pub(crate) mod mock;

pub use lenient::LenientInflater;
pub use raw::RawInflater;

use crate::error::InflateError;

/// Outcome of a single [`Decompressor::decompress`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    /// Compressed bytes consumed from the input slice.
    pub consumed: usize,
    /// Decompressed bytes written to the output slice.
    pub produced: usize,
    /// Whether the end of the compressed stream was reached.
    pub stream_end: bool,
}

/// A stateful streaming decompressor.
///
/// Implementations consume compressed bytes and produce decompressed bytes
/// incrementally. They hold native buffers that are released by
/// [`end`](Decompressor::end).
///
/// # Lifecycle
///
/// A handle starts *fresh*, is fed input while *in use*, returns to a clean
/// state through [`reset`](Decompressor::reset), and is finally *ended*.
/// Ended is terminal: every later `decompress` fails with
/// [`InflateError::Ended`].
pub trait Decompressor {
    /// Decompresses from `input` into `output`.
    ///
    /// Returns how many bytes were consumed and produced. A call that makes
    /// no progress returns a zeroed [`Progress`]; the caller should supply
    /// more input or more output space.
    fn decompress(&mut self, input: &[u8], output: &mut [u8]) -> Result<Progress, InflateError>;

    /// Returns `true` once the end of the compressed stream was reached.
    fn is_finished(&self) -> bool;

    /// Returns `true` once the native state was released.
    fn is_ended(&self) -> bool;

    /// Total compressed bytes consumed since the last reset.
    fn total_in(&self) -> u64;

    /// Total decompressed bytes produced since the last reset.
    fn total_out(&self) -> u64;

    /// Clears all stream state so the handle can start a new stream.
    fn reset(&mut self);

    /// Releases the native resources held by this handle.
    fn end(&mut self);
}
