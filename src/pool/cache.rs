//! Bounded LIFO cache of idle inflaters.

use std::fmt;

use bytes::{Bytes, BytesMut};
use parking_lot::Mutex;

use super::PooledInflater;
use crate::config::PoolConfig;
use crate::error::InflateError;
use crate::inflater::{Decompressor, LenientInflater, RawInflater};

type Factory<D> = Box<dyn Fn() -> D + Send + Sync>;

/// Array-backed idle store. Slots at index `>= count` are always `None`.
struct Slots<D> {
    store: Box<[Option<LenientInflater<D>>]>,
    count: usize,
}

/// A bounded, thread-safe pool of reusable inflaters.
///
/// The pool keeps at most [`capacity`](InflaterPool::capacity) idle handles.
/// [`acquire`](InflaterPool::acquire) hands out the most recently released
/// one, or allocates a fresh handle when none is idle; it never waits.
/// [`release`](InflaterPool::release) resets the handle and keeps it, or
/// ends it for real when the pool is already full.
///
/// The lock guards only the slot/count update. Resetting and ending
/// handles happen outside it.
///
/// # Example
///
/// ```
/// use inflater_pool::{Decompressor, InflaterPool, PoolConfig};
///
/// let pool = InflaterPool::new(PoolConfig::default());
///
/// let inflater = pool.acquire();
/// assert!(!inflater.is_finished());
/// pool.release(inflater);
/// assert_eq!(pool.idle(), 1);
///
/// // Releasing nothing is a no-op
/// pool.release(None);
/// assert_eq!(pool.idle(), 1);
/// ```
pub struct InflaterPool<D = RawInflater> {
    slots: Mutex<Slots<D>>,
    factory: Factory<D>,
    config: PoolConfig,
}

impl InflaterPool<RawInflater> {
    /// Creates a pool of `flate2`-backed inflaters.
    ///
    /// Fresh handles use [`PoolConfig::zlib_header`].
    pub fn new(config: PoolConfig) -> Self {
        let zlib_header = config.zlib_header();
        Self::with_factory(config, move || RawInflater::new(zlib_header))
    }
}

impl Default for InflaterPool<RawInflater> {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

impl<D: Decompressor> InflaterPool<D> {
    /// Creates a pool whose fresh handles come from `factory`.
    ///
    /// # Example
    ///
    /// ```
    /// use inflater_pool::{InflaterPool, PoolConfig, RawInflater};
    ///
    /// // Raw deflate streams
    /// let pool = InflaterPool::with_factory(PoolConfig::default(), || RawInflater::new(false));
    /// assert_eq!(pool.capacity(), 4);
    /// ```
    pub fn with_factory<F>(config: PoolConfig, factory: F) -> Self
    where
        F: Fn() -> D + Send + Sync + 'static,
    {
        let store = (0..config.capacity()).map(|_| None).collect();
        Self {
            slots: Mutex::new(Slots { store, count: 0 }),
            factory: Box::new(factory),
            config,
        }
    }

    /// Obtains an inflater.
    ///
    /// Returns the most recently released idle handle, or a fresh one if the
    /// pool is empty. Never blocks and never fails.
    ///
    /// Handles obtained here should be given back with
    /// [`release`](InflaterPool::release) to avoid reallocation.
    pub fn acquire(&self) -> LenientInflater<D> {
        if let Some(inflater) = self.take_idle() {
            tracing::trace!("reusing idle inflater");
            return inflater;
        }

        tracing::debug!("no idle inflater, allocating a fresh one");
        LenientInflater::wrap((self.factory)())
    }

    /// Obtains an inflater that is released automatically when dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use inflater_pool::InflaterPool;
    ///
    /// let pool = InflaterPool::default();
    /// {
    ///     let _inflater = pool.checkout();
    ///     assert_eq!(pool.idle(), 0);
    /// }
    /// assert_eq!(pool.idle(), 1);
    /// ```
    pub fn checkout(&self) -> PooledInflater<'_, D> {
        PooledInflater::new(self, self.acquire())
    }

    /// Returns an inflater to the pool.
    ///
    /// `None` is accepted and ignored. The handle is reset, then kept if
    /// fewer than [`capacity`](InflaterPool::capacity) handles are idle.
    /// Otherwise its native state is released immediately.
    ///
    /// A handle that was already ended is never pooled.
    pub fn release(&self, inflater: impl Into<Option<LenientInflater<D>>>) {
        let Some(mut inflater) = inflater.into() else {
            return;
        };

        if inflater.is_ended() {
            tracing::warn!("dropping ended inflater instead of pooling it");
            return;
        }

        inflater.reset();

        if let Some(rejected) = self.store_idle(inflater) {
            tracing::debug!(
                capacity = self.config.capacity(),
                "inflater pool full, ending released inflater"
            );
            rejected.destroy();
        }
    }

    /// Returns the number of idle handles currently held.
    pub fn idle(&self) -> usize {
        self.slots.lock().count
    }

    /// Returns the maximum number of idle handles retained.
    pub fn capacity(&self) -> usize {
        self.config.capacity()
    }

    /// Returns the pool configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Inflates `input`, which must decompress to exactly `size` bytes.
    ///
    /// The stream must end right after `size` bytes; trailing compressed
    /// input beyond the stream end is ignored.
    ///
    /// # Errors
    ///
    /// - [`InflateError::SizeMismatch`] if the stream ends early or carries
    ///   more than `size` bytes
    /// - [`InflateError::Truncated`] if `input` runs out first
    /// - [`InflateError::Corrupt`] for malformed data
    ///
    /// # Example
    ///
    /// ```
    /// use inflater_pool::InflaterPool;
    ///
    /// let compressed = [0x78, 0x9c, 0xcb, 0xc8, 0x04, 0x00, 0x01, 0x3b, 0x00, 0xd2];
    /// let pool = InflaterPool::default();
    ///
    /// let data = pool.inflate_exact(&compressed, 2)?;
    /// assert_eq!(&data[..], b"hi");
    /// assert!(pool.inflate_exact(&compressed, 3).is_err());
    /// # Ok::<(), inflater_pool::InflateError>(())
    /// ```
    pub fn inflate_exact(&self, input: &[u8], size: usize) -> Result<Bytes, InflateError> {
        let mut inflater = self.checkout();
        let mut out = BytesMut::zeroed(size);
        let mut consumed = 0;
        let mut produced = 0;

        while produced < size {
            let progress = inflater.decompress(&input[consumed..], &mut out[produced..])?;
            consumed += progress.consumed;
            produced += progress.produced;

            if progress.stream_end {
                break;
            }
            if progress.consumed == 0 && progress.produced == 0 {
                return Err(InflateError::Truncated { produced });
            }
        }

        if produced < size {
            return Err(InflateError::SizeMismatch {
                expected: size,
                actual: produced,
            });
        }

        // Make sure nothing follows, without going through the zero-length
        // path which treats leftover data as a bug.
        let mut probe = [0u8; 1];
        while !inflater.is_finished() {
            let progress = inflater.decompress(&input[consumed..], &mut probe)?;
            if progress.produced > 0 {
                return Err(InflateError::SizeMismatch {
                    expected: size,
                    actual: size + progress.produced,
                });
            }
            if progress.consumed == 0 && !progress.stream_end {
                return Err(InflateError::Truncated { produced });
            }
            consumed += progress.consumed;
        }

        Ok(out.freeze())
    }

    /// Inflates a complete compressed stream of unknown length.
    ///
    /// # Errors
    ///
    /// - [`InflateError::Truncated`] if `input` ends before the stream does
    /// - [`InflateError::Corrupt`] for malformed data
    pub fn inflate_to_vec(&self, input: &[u8]) -> Result<Vec<u8>, InflateError> {
        let mut inflater = self.checkout();
        let mut out: Vec<u8> = Vec::with_capacity(input.len().saturating_mul(2).max(64));
        let mut consumed = 0;

        loop {
            if out.len() == out.capacity() {
                out.reserve(out.capacity());
            }
            let filled = out.len();
            out.resize(out.capacity(), 0);

            let progress = inflater.decompress(&input[consumed..], &mut out[filled..])?;
            out.truncate(filled + progress.produced);
            consumed += progress.consumed;

            if progress.stream_end {
                return Ok(out);
            }
            if progress.consumed == 0 && progress.produced == 0 {
                return Err(InflateError::Truncated {
                    produced: out.len(),
                });
            }
        }
    }

    fn take_idle(&self) -> Option<LenientInflater<D>> {
        let mut slots = self.slots.lock();
        if slots.count == 0 {
            return None;
        }
        slots.count -= 1;
        let index = slots.count;
        slots.store[index].take()
    }

    /// Stores `inflater` if there is room, handing it back otherwise.
    fn store_idle(&self, inflater: LenientInflater<D>) -> Option<LenientInflater<D>> {
        let mut slots = self.slots.lock();
        if slots.count >= slots.store.len() {
            return Some(inflater);
        }
        let index = slots.count;
        slots.store[index] = Some(inflater);
        slots.count += 1;
        tracing::trace!(idle = slots.count, "inflater returned to pool");
        None
    }
}

impl<D> fmt::Debug for InflaterPool<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InflaterPool")
            .field("idle", &self.slots.lock().count)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
