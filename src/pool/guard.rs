//! Scoped checkout of a pooled inflater.

use std::fmt;
use std::ops::{Deref, DerefMut};

use super::InflaterPool;
use crate::inflater::{Decompressor, LenientInflater, RawInflater};

/// An inflater borrowed from an [`InflaterPool`].
///
/// Dereferences to the [`LenientInflater`] and gives it back to the pool
/// when dropped, including during unwinding.
pub struct PooledInflater<'a, D: Decompressor = RawInflater> {
    pool: &'a InflaterPool<D>,
    inflater: Option<LenientInflater<D>>,
}

impl<'a, D: Decompressor> PooledInflater<'a, D> {
    pub(crate) fn new(pool: &'a InflaterPool<D>, inflater: LenientInflater<D>) -> Self {
        Self {
            pool,
            inflater: Some(inflater),
        }
    }

    /// Takes the inflater out of the guard without releasing it.
    ///
    /// The caller becomes responsible for passing it to
    /// [`InflaterPool::release`].
    pub fn detach(mut self) -> LenientInflater<D> {
        self.inflater
            .take()
            .expect("pooled inflater is present until dropped")
    }

    /// Returns the pool this inflater goes back to.
    pub fn pool(&self) -> &'a InflaterPool<D> {
        self.pool
    }
}

impl<D: Decompressor> Deref for PooledInflater<'_, D> {
    type Target = LenientInflater<D>;

    fn deref(&self) -> &Self::Target {
        self.inflater
            .as_ref()
            .expect("pooled inflater is present until dropped")
    }
}

impl<D: Decompressor> DerefMut for PooledInflater<'_, D> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.inflater
            .as_mut()
            .expect("pooled inflater is present until dropped")
    }
}

impl<D: Decompressor> Drop for PooledInflater<'_, D> {
    fn drop(&mut self) {
        self.pool.release(self.inflater.take());
    }
}

impl<D: Decompressor + fmt::Debug> fmt::Debug for PooledInflater<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledInflater")
            .field("inflater", &self.inflater)
            .finish_non_exhaustive()
    }
}
