//! Thread-local pool of compressed-input staging buffers.

use std::cell::RefCell;
use std::io::{self, Read};

use crate::config::DEFAULT_INPUT_BUFFER_SIZE;

/// Maximum number of buffers to keep per thread.
pub const MAX_POOL_SIZE: usize = 4;

/// A reusable staging buffer for compressed input.
///
/// Bytes between `start` and `end` have been read but not yet consumed by
/// the inflater.
pub struct Buffer {
    data: Vec<u8>,
    start: usize,
    end: usize,
}

impl Buffer {
    /// Takes a buffer from the thread-local pool or creates a new one.
    pub fn take() -> Self {
        THREAD_BUFFER_POOL.with(|pool| {
            let data = pool
                .borrow_mut()
                .pop()
                .unwrap_or_else(|| vec![0u8; DEFAULT_INPUT_BUFFER_SIZE]);
            Self {
                data,
                start: 0,
                end: 0,
            }
        })
    }

    /// Returns the bytes read but not yet consumed.
    pub fn pending(&self) -> &[u8] {
        &self.data[self.start..self.end]
    }

    /// Marks `n` pending bytes as consumed.
    pub fn consume(&mut self, n: usize) {
        self.start = (self.start + n).min(self.end);
        if self.start == self.end {
            self.clear();
        }
    }

    /// Returns writable space after the pending bytes.
    ///
    /// Pending bytes are moved to the front first; the buffer grows only
    /// when it is entirely pending.
    pub fn spare_mut(&mut self) -> &mut [u8] {
        if self.start > 0 {
            self.data.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }
        if self.end == self.data.len() {
            let len = self.data.len().max(DEFAULT_INPUT_BUFFER_SIZE);
            self.data.resize(len * 2, 0);
        }
        &mut self.data[self.end..]
    }

    /// Records that `n` bytes were written into [`spare_mut`](Self::spare_mut).
    pub fn commit(&mut self, n: usize) {
        self.end = (self.end + n).min(self.data.len());
    }

    /// Reads once from `reader` into spare space, retrying on interrupts.
    pub fn fill_from<R: Read>(&mut self, reader: &mut R) -> io::Result<usize> {
        loop {
            match reader.read(self.spare_mut()) {
                Ok(n) => {
                    self.commit(n);
                    return Ok(n);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Drops all pending bytes without deallocating.
    pub fn clear(&mut self) {
        self.start = 0;
        self.end = 0;
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        // Return the buffer to the pool if it's not too large
        if self.data.len() <= DEFAULT_INPUT_BUFFER_SIZE * 2 {
            THREAD_BUFFER_POOL.with(|pool| {
                let mut pool = pool.borrow_mut();
                if pool.len() < MAX_POOL_SIZE {
                    pool.push(std::mem::take(&mut self.data));
                }
            });
        }
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::take()
    }
}

// Thread-local buffer pool
thread_local! {
    static THREAD_BUFFER_POOL: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}
