//! Async reader adapter for pooled inflaters.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::AsyncReadExt;
//! use inflater_pool::AsyncInflateReader;
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> std::io::Result<Vec<u8>> {
//!     let mut reader = AsyncInflateReader::new(reader);
//!     let mut out = Vec::new();
//!     reader.read_to_end(&mut out).await?;
//!     Ok(out)
//! }
//! ```

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::ready;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::buffer::Buffer;
use crate::error::InflateError;
use crate::inflater::{Decompressor, RawInflater};
use crate::pool::{InflaterPool, PooledInflater};
use crate::reader::{Step, inflate_step};

pin_project! {
    /// An async reader that decompresses a zlib stream read from `R`.
    ///
    /// This uses `futures_io::AsyncRead` which is runtime-agnostic.
    /// Works with tokio, async-std, smol, or any futures-compatible runtime.
    ///
    /// Behaves like [`InflateReader`](crate::InflateReader): the inflater is
    /// taken from a pool and returned when the reader is dropped, and reads
    /// after the end of the stream return `Ok(0)`.
    ///
    /// For tokio users, `tokio_util::compat` converts a
    /// `tokio::io::AsyncRead` into a `futures_io::AsyncRead`:
    ///
    /// ```ignore
    /// use tokio_util::compat::TokioAsyncReadCompatExt;
    /// use inflater_pool::AsyncInflateReader;
    ///
    /// let file = tokio::fs::File::open("object.z").await?;
    /// let reader = AsyncInflateReader::new(file.compat());
    /// ```
    pub struct AsyncInflateReader<'p, R, D: Decompressor> {
        #[pin]
        reader: R,
        inflater: PooledInflater<'p, D>,
        input: Buffer,
        eof: bool,
        done: bool,
    }
}

impl<R: AsyncRead> AsyncInflateReader<'static, R, RawInflater> {
    /// Creates a reader using the process-wide pool.
    pub fn new(reader: R) -> Self {
        Self::with_pool(reader, InflaterPool::global())
    }
}

impl<'p, R: AsyncRead, D: Decompressor> AsyncInflateReader<'p, R, D> {
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
}

impl<R: AsyncRead, D: Decompressor> AsyncRead for AsyncInflateReader<'_, R, D> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        out: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        let mut this = self.project();

        if out.is_empty() || *this.done {
            return Poll::Ready(Ok(0));
        }

        loop {
            match inflate_step(&mut **this.inflater, this.input, out)? {
                Step::Produced(n) => return Poll::Ready(Ok(n)),
                Step::End(n) => {
                    *this.done = true;
                    return Poll::Ready(Ok(n));
                }
                Step::NeedInput => {
                    if *this.eof {
                        let produced = this.inflater.total_out() as usize;
                        return Poll::Ready(Err(InflateError::Truncated { produced }.into()));
                    }

                    let spare = this.input.spare_mut();
                    match ready!(this.reader.as_mut().poll_read(cx, spare)) {
                        Ok(0) => *this.eof = true,
                        Ok(n) => this.input.commit(n),
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                        Err(e) => return Poll::Ready(Err(e)),
                    }
                }
            }
        }
    }
}
