//! Bounded pool of reusable inflaters.
//!
//! - [`InflaterPool`] - LIFO store of idle handles with `acquire`/`release`
//! - [`PooledInflater`] - Handle that goes back to its pool on drop
//! - [`acquire`] / [`release`] - Shortcuts for the process-wide pool
//!
//! # Example
//!
//! ```
//! use inflater_pool::{acquire, release, Decompressor};
//!
//! let mut inflater = acquire();
//! let mut out = [0u8; 16];
//! let compressed = [0x78, 0x9c, 0xcb, 0xc8, 0x04, 0x00, 0x01, 0x3b, 0x00, 0xd2];
//! let progress = inflater.decompress(&compressed, &mut out)?;
//! assert_eq!(&out[..progress.produced], b"hi");
//! release(inflater);
//! # Ok::<(), inflater_pool::InflateError>(())
//! ```

mod cache;
mod guard;

pub use cache::InflaterPool;
pub use guard::PooledInflater;

use once_cell::sync::Lazy;

use crate::config::PoolConfig;
use crate::inflater::LenientInflater;

static GLOBAL_POOL: Lazy<InflaterPool> = Lazy::new(|| InflaterPool::new(PoolConfig::default()));

impl InflaterPool {
    /// Returns the process-wide pool, creating it on first use.
    ///
    /// It uses [`PoolConfig::default`] and lives for the rest of the process.
    pub fn global() -> &'static InflaterPool {
        &GLOBAL_POOL
    }
}

/// Obtains an inflater from the process-wide pool.
///
/// See [`InflaterPool::acquire`].
pub fn acquire() -> LenientInflater {
    GLOBAL_POOL.acquire()
}

/// Returns an inflater to the process-wide pool.
///
/// See [`InflaterPool::release`].
pub fn release(inflater: impl Into<Option<LenientInflater>>) {
    GLOBAL_POOL.release(inflater)
}
