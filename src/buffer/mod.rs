//! Internal buffer management for the streaming readers.
//!
//! This module provides a thread-local pool of compressed-input staging
//! buffers. It is an implementation detail and not part of the public API.

mod pool;

pub(crate) use pool::Buffer;
