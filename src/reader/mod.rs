//! Streaming decompression over [`std::io::Read`].
//!
//! - [`InflateReader`] - Reads a zlib stream from a reader through a pooled
//!   inflater
//!
//! # Example
//!
//! ```
//! use std::io::Read;
//! use inflater_pool::InflateReader;
//!
//! let compressed: &[u8] = &[0x78, 0x9c, 0xcb, 0xc8, 0x04, 0x00, 0x01, 0x3b, 0x00, 0xd2];
//! let mut reader = InflateReader::new(compressed);
//!
//! let mut out = String::new();
//! reader.read_to_string(&mut out)?;
//! assert_eq!(out, "hi");
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, Read};

use crate::buffer::Buffer;
use crate::error::InflateError;
use crate::inflater::{Decompressor, LenientInflater, RawInflater};
use crate::pool::{InflaterPool, PooledInflater};

/// Outcome of one inflate step over the staged input.
pub(crate) enum Step {
    /// Bytes were written to the output.
    Produced(usize),
    /// The stream ended after writing this many bytes.
    End(usize),
    /// More compressed input is required.
    NeedInput,
}

/// Inflates staged input into `out`, consuming what the engine took.
pub(crate) fn inflate_step<D: Decompressor>(
    inflater: &mut LenientInflater<D>,
    input: &mut Buffer,
    out: &mut [u8],
) -> Result<Step, InflateError> {
    let progress = inflater.decompress(input.pending(), out)?;
    input.consume(progress.consumed);

    if progress.stream_end {
        Ok(Step::End(progress.produced))
    } else if progress.produced > 0 {
        Ok(Step::Produced(progress.produced))
    } else {
        Ok(Step::NeedInput)
    }
}

/// A reader that decompresses a zlib stream read from `R`.
///
/// The inflater comes from an [`InflaterPool`] and goes back to it when the
/// reader is dropped. Compressed input is staged in a reusable thread-local
/// buffer.
///
/// After the end of the compressed stream, reads return `Ok(0)`. Any input
/// past the stream end is left unread in the staging buffer.
///
/// # Errors
///
/// - input ending before the stream does: [`io::ErrorKind::UnexpectedEof`]
/// - malformed data: [`io::ErrorKind::InvalidData`]
/// - errors from `R` are passed through
pub struct InflateReader<'p, R, D: Decompressor = RawInflater> {
    reader: R,
    inflater: PooledInflater<'p, D>,
    input: Buffer,
    eof: bool,
    done: bool,
}

impl<R: Read> InflateReader<'static, R> {
    /// Creates a reader using the process-wide pool.
    pub fn new(reader: R) -> Self {
        Self::with_pool(reader, InflaterPool::global())
    }
}

impl<'p, R: Read, D: Decompressor> InflateReader<'p, R, D> {
    /// Creates a reader using an inflater from `pool`.
    pub fn with_pool(reader: R, pool: &'p InflaterPool<D>) -> Self {
        Self {
            reader,
            inflater: pool.checkout(),
            input: Buffer::take(),
            eof: false,
            done: false,
        }
    }

    /// Total compressed bytes consumed so far.
    pub fn total_in(&self) -> u64 {
        self.inflater.total_in()
    }

    /// Total decompressed bytes produced so far.
    pub fn total_out(&self) -> u64 {
        self.inflater.total_out()
    }

    /// Returns `true` once the end of the compressed stream was reached.
    pub fn is_finished(&self) -> bool {
        self.done
    }

    /// Returns a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consumes this reader, returning the underlying reader.
    ///
    /// The inflater goes back to its pool.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read, D: Decompressor> Read for InflateReader<'_, R, D> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if out.is_empty() || self.done {
            return Ok(0);
        }

        loop {
            match inflate_step(&mut *self.inflater, &mut self.input, out)? {
                Step::Produced(n) => return Ok(n),
                Step::End(n) => {
                    self.done = true;
                    return Ok(n);
                }
                Step::NeedInput => {
                    if self.eof {
                        return Err(InflateError::Truncated {
                            produced: self.inflater.total_out() as usize,
                        }
                        .into());
                    }
                    if self.input.fill_from(&mut self.reader)? == 0 {
                        self.eof = true;
                    }
                }
            }
        }
    }
}
