//! inflater-pool
//!
//! A bounded pool of reusable zlib streaming decompressors for Rust.
//!
//! `inflater-pool` hands out decompressor handles ("inflaters") to code that
//! inflates many independent byte streams, so each stream does not pay for
//! allocating and tearing down the engine's native buffers. It is designed as
//! a small primitive for:
//!
//! - object stores reading zlib-compressed objects
//! - pack and transport layers inflating many short streams
//! - any hot path that would otherwise create a fresh decompressor per call
//!
//! The crate intentionally:
//! - keeps at most a fixed number of *idle* handles (4 by default)
//! - never blocks: an empty pool allocates, a full pool ends the extra handle
//! - does NOT bound how many handles are in use at once
//! - does NOT know about any file or wire format
//!
//! Every pooled handle is a [`LenientInflater`]: a zero-length decompress
//! call still updates the end-of-stream state, and `end()` is ignored so only
//! the pool decides when native buffers are freed.
//!
//! # Acquire and release
//!
//! ```
//! use inflater_pool::{Decompressor, InflaterPool, PoolConfig};
//!
//! let pool = InflaterPool::new(PoolConfig::default());
//! let compressed = [0x78, 0x9c, 0xcb, 0xc8, 0x04, 0x00, 0x01, 0x3b, 0x00, 0xd2];
//!
//! let mut inflater = pool.acquire();
//! let mut out = [0u8; 16];
//! let progress = inflater.decompress(&compressed, &mut out)?;
//! assert_eq!(&out[..progress.produced], b"hi");
//! pool.release(inflater);
//! # Ok::<(), inflater_pool::InflateError>(())
//! ```
//!
//! # Scoped
//!
//! ```
//! use inflater_pool::InflaterPool;
//!
//! let compressed = [0x78, 0x9c, 0xcb, 0xc8, 0x04, 0x00, 0x01, 0x3b, 0x00, 0xd2];
//! let data = InflaterPool::global().inflate_exact(&compressed, 2)?;
//! assert_eq!(&data[..], b"hi");
//! # Ok::<(), inflater_pool::InflateError>(())
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::AsyncReadExt;
//! use inflater_pool::AsyncInflateReader;
//!
//! async fn demo<R: futures_io::AsyncRead + Unpin>(reader: R) -> std::io::Result<()> {
//!     let mut out = Vec::new();
//!     AsyncInflateReader::new(reader).read_to_end(&mut out).await?;
//!     println!("inflated {} bytes", out.len());
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod inflater;
mod pool;
mod reader;

mod buffer; // internal (thread-local input staging)

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface
//

pub use config::{DEFAULT_CAPACITY, DEFAULT_INPUT_BUFFER_SIZE, PoolConfig};
pub use error::InflateError;
pub use inflater::{Decompressor, LenientInflater, Progress, RawInflater};
pub use pool::{InflaterPool, PooledInflater, acquire, release};
pub use reader::InflateReader;

#[cfg(feature = "async-io")]
pub use async_stream::AsyncInflateReader;
