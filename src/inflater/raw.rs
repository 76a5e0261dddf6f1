//! zlib/deflate decompressor backed by `flate2`.

use flate2::{Decompress, FlushDecompress, Status};

use super::{Decompressor, Progress};
use crate::error::InflateError;

/// A streaming zlib (or raw deflate) decompressor.
///
/// `RawInflater` owns a `flate2::Decompress` and tracks whether the stream
/// has ended. Calling [`end`](Decompressor::end) drops the engine state for
/// real; the handle is unusable afterwards.
///
/// # Example
///
/// ```
/// use inflater_pool::{Decompressor, RawInflater};
///
/// // zlib stream for the bytes "hi"
/// let compressed = [0x78, 0x9c, 0xcb, 0xc8, 0x04, 0x00, 0x01, 0x3b, 0x00, 0xd2];
///
/// let mut inflater = RawInflater::new(true);
/// let mut out = [0u8; 16];
/// let progress = inflater.decompress(&compressed, &mut out)?;
///
/// assert_eq!(&out[..progress.produced], b"hi");
/// assert!(inflater.is_finished());
/// # Ok::<(), inflater_pool::InflateError>(())
/// ```
#[derive(Debug)]
pub struct RawInflater {
    engine: Option<Decompress>,
    zlib_header: bool,
    finished: bool,
}

impl RawInflater {
    /// Creates a fresh decompressor.
    ///
    /// `zlib_header` selects zlib-wrapped streams; `false` expects raw
    /// deflate data.
    pub fn new(zlib_header: bool) -> Self {
        Self {
            engine: Some(Decompress::new(zlib_header)),
            zlib_header,
            finished: false,
        }
    }

    /// Returns whether this handle expects a zlib header.
    pub fn zlib_header(&self) -> bool {
        self.zlib_header
    }
}

impl Default for RawInflater {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Decompressor for RawInflater {
    fn decompress(&mut self, input: &[u8], output: &mut [u8]) -> Result<Progress, InflateError> {
        let engine = self.engine.as_mut().ok_or(InflateError::Ended)?;

        if self.finished {
            return Ok(Progress {
                stream_end: true,
                ..Progress::default()
            });
        }

        let before_in = engine.total_in();
        let before_out = engine.total_out();

        let status = engine.decompress(input, output, FlushDecompress::None)?;

        // BufError only signals that no progress was possible.
        let stream_end = matches!(status, Status::StreamEnd);
        if stream_end {
            self.finished = true;
        }

        Ok(Progress {
            consumed: (engine.total_in() - before_in) as usize,
            produced: (engine.total_out() - before_out) as usize,
            stream_end,
        })
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn is_ended(&self) -> bool {
        self.engine.is_none()
    }

    fn total_in(&self) -> u64 {
        self.engine.as_ref().map_or(0, |e| e.total_in())
    }

    fn total_out(&self) -> u64 {
        self.engine.as_ref().map_or(0, |e| e.total_out())
    }

    fn reset(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.reset(self.zlib_header);
            self.finished = false;
        }
    }

    fn end(&mut self) {
        if self.engine.take().is_some() {
            tracing::trace!("inflater native state released");
        }
        self.finished = false;
    }
}
