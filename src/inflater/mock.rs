//! Scripted decompressor for unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Decompressor, Progress};
use crate::error::InflateError;

/// Counters shared by every [`MockInflater`] created from one factory.
#[derive(Debug, Default)]
pub(crate) struct MockCounters {
    pub(crate) created: AtomicUsize,
    pub(crate) resets: AtomicUsize,
    pub(crate) ends: AtomicUsize,
}

/// A decompressor that copies input to output and records lifecycle calls.
///
/// An empty input slice stands for the end of the stream.
///
/// `leak_on_probe` makes it emit one byte even when the caller cannot have
/// asked for it, which is the engine misbehaviour the probe guards against.
#[derive(Debug)]
pub(crate) struct MockInflater {
    pub(crate) id: usize,
    pub(crate) leak_on_probe: bool,
    counters: Arc<MockCounters>,
    finished: bool,
    ended: bool,
    total_in: u64,
    total_out: u64,
}

impl MockInflater {
    pub(crate) fn new(counters: &Arc<MockCounters>) -> Self {
        let id = counters.created.fetch_add(1, Ordering::SeqCst);
        Self {
            id,
            leak_on_probe: false,
            counters: Arc::clone(counters),
            finished: false,
            ended: false,
            total_in: 0,
            total_out: 0,
        }
    }
}

impl Decompressor for MockInflater {
    fn decompress(&mut self, input: &[u8], output: &mut [u8]) -> Result<Progress, InflateError> {
        if self.ended {
            return Err(InflateError::Ended);
        }

        let copied = input.len().min(output.len());
        output[..copied].copy_from_slice(&input[..copied]);

        let mut produced = copied;
        if self.leak_on_probe && produced == 0 && !output.is_empty() {
            output[0] = 0xFF;
            produced = 1;
        }

        // Like the engines the probe exists for, the end of the stream is
        // only noticed when there is room for output.
        let stream_end = input.is_empty() && !output.is_empty() && !self.leak_on_probe;
        if stream_end {
            self.finished = true;
        }

        self.total_in += copied as u64;
        self.total_out += produced as u64;
        Ok(Progress {
            consumed: copied,
            produced,
            stream_end,
        })
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn is_ended(&self) -> bool {
        self.ended
    }

    fn total_in(&self) -> u64 {
        self.total_in
    }

    fn total_out(&self) -> u64 {
        self.total_out
    }

    fn reset(&mut self) {
        self.counters.resets.fetch_add(1, Ordering::SeqCst);
        self.finished = false;
        self.total_in = 0;
        self.total_out = 0;
    }

    fn end(&mut self) {
        self.counters.ends.fetch_add(1, Ordering::SeqCst);
        self.ended = true;
    }
}
