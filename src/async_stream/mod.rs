//! Async streaming decompression.
//!
//! This module provides asynchronous decompression using the
//! `futures-io::AsyncRead` trait, making it runtime-agnostic and compatible
//! with tokio, async-std, smol, and other async runtimes.
//!
//! - [`AsyncInflateReader`] - Decompresses a zlib stream from an async reader
//!
//! This module requires the `async-io` feature to be enabled.

mod reader;

pub use reader::AsyncInflateReader;
