// Integration tests for the inflater pool
// Tests cover: LIFO reuse, capacity bound, teardown of excess handles,
// release(None), zero-length probe, concurrent acquire/release

use std::collections::HashSet;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use inflater_pool::{
    Decompressor, InflateError, InflaterPool, LenientInflater, PoolConfig, Progress,
};

// ============================================================================
// Test decompressor
// ============================================================================

/// Records which handles were ended so teardown is observable.
#[derive(Default)]
struct Ledger {
    next_id: AtomicUsize,
    ended: Mutex<Vec<usize>>,
}

struct Tracked {
    id: usize,
    ledger: Arc<Ledger>,
    in_use: Arc<AtomicBool>,
    ended: bool,
}

impl Tracked {
    fn new(ledger: &Arc<Ledger>) -> Self {
        Self {
            id: ledger.next_id.fetch_add(1, Ordering::SeqCst),
            ledger: Arc::clone(ledger),
            in_use: Arc::new(AtomicBool::new(false)),
            ended: false,
        }
    }
}

impl Decompressor for Tracked {
    fn decompress(&mut self, input: &[u8], output: &mut [u8]) -> Result<Progress, InflateError> {
        let n = input.len().min(output.len());
        output[..n].copy_from_slice(&input[..n]);
        Ok(Progress {
            consumed: n,
            produced: n,
            stream_end: input.is_empty(),
        })
    }

    fn is_finished(&self) -> bool {
        false
    }

    fn is_ended(&self) -> bool {
        self.ended
    }

    fn total_in(&self) -> u64 {
        0
    }

    fn total_out(&self) -> u64 {
        0
    }

    fn reset(&mut self) {}

    fn end(&mut self) {
        self.ended = true;
        self.ledger.ended.lock().unwrap().push(self.id);
    }
}

fn tracked_pool(capacity: usize) -> (InflaterPool<Tracked>, Arc<Ledger>) {
    let ledger = Arc::new(Ledger::default());
    let factory_ledger = Arc::clone(&ledger);
    let pool = InflaterPool::with_factory(PoolConfig::new(capacity).unwrap(), move || {
        Tracked::new(&factory_ledger)
    });
    (pool, ledger)
}

fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

// ============================================================================
// Pool Discipline
// ============================================================================

#[test]
fn test_acquire_on_empty_pool_never_fails() {
    let (pool, ledger) = tracked_pool(4);
    assert_eq!(pool.idle(), 0);

    let a = pool.acquire();
    let b = pool.acquire();
    assert_ne!(a.get_ref().id, b.get_ref().id);
    assert!(!a.is_ended());
    assert_eq!(ledger.next_id.load(Ordering::SeqCst), 2);
}

#[test]
fn test_release_five_into_capacity_four() {
    let (pool, ledger) = tracked_pool(4);

    let handles: Vec<_> = (0..5).map(|_| pool.acquire()).collect();
    let ids: Vec<usize> = handles.iter().map(|h| h.get_ref().id).collect();

    for handle in handles {
        pool.release(handle);
    }

    // H1..H4 retained, H5 torn down
    assert_eq!(pool.idle(), 4);
    assert_eq!(*ledger.ended.lock().unwrap(), vec![ids[4]]);

    // LIFO: H4, H3, H2, H1, then a fresh handle
    assert_eq!(pool.acquire().get_ref().id, ids[3]);
    assert_eq!(pool.acquire().get_ref().id, ids[2]);
    assert_eq!(pool.acquire().get_ref().id, ids[1]);
    assert_eq!(pool.acquire().get_ref().id, ids[0]);

    let fresh = pool.acquire();
    assert!(!ids.contains(&fresh.get_ref().id));
    assert_eq!(pool.idle(), 0);
}

#[test]
fn test_released_handle_is_reused_before_allocating() {
    let (pool, ledger) = tracked_pool(4);

    let handle = pool.acquire();
    let id = handle.get_ref().id;
    pool.release(handle);

    assert_eq!(pool.acquire().get_ref().id, id);
    assert_eq!(ledger.next_id.load(Ordering::SeqCst), 1);
}

#[test]
fn test_release_none_leaves_state_unchanged() {
    let (pool, ledger) = tracked_pool(4);
    pool.release(pool.acquire());
    pool.release(pool.acquire());
    let before = pool.idle();

    pool.release(None);

    assert_eq!(pool.idle(), before);
    assert!(ledger.ended.lock().unwrap().is_empty());
}

#[test]
fn test_end_on_pooled_handle_is_ignored() {
    let (pool, ledger) = tracked_pool(4);

    let mut handle = pool.acquire();
    handle.end();
    assert!(!handle.is_ended());
    pool.release(handle);

    assert_eq!(pool.idle(), 1);
    assert!(ledger.ended.lock().unwrap().is_empty());
}

#[test]
fn test_handle_from_other_pool_is_accepted() {
    let (pool, _) = tracked_pool(4);
    let (other, _) = tracked_pool(4);

    pool.release(other.acquire());
    assert_eq!(pool.idle(), 1);
    assert_eq!(other.idle(), 0);
}

#[test]
fn test_wrapped_handle_can_be_released() {
    let (pool, ledger) = tracked_pool(1);
    pool.release(LenientInflater::wrap(Tracked::new(&ledger)));
    pool.release(LenientInflater::wrap(Tracked::new(&ledger)));

    assert_eq!(pool.idle(), 1);
    assert_eq!(ledger.ended.lock().unwrap().len(), 1);
}

// ============================================================================
// Zero-Length Probe
// ============================================================================

#[test]
fn test_zero_length_call_reports_finished() {
    let data = b"object contents of a known size";
    let compressed = zlib(data);
    let pool = InflaterPool::default();

    let mut inflater = pool.acquire();
    let mut out = vec![0u8; data.len()];
    let progress = inflater
        .decompress(&compressed[..compressed.len() - 4], &mut out)
        .unwrap();
    assert_eq!(progress.produced, data.len());
    assert!(!inflater.is_finished());

    // Only the adler32 trailer is left
    let rest = &compressed[progress.consumed..];
    let progress = inflater.decompress(rest, &mut []).unwrap();
    assert_eq!(progress.produced, 0);
    assert!(inflater.is_finished());

    pool.release(inflater);
}

#[test]
#[should_panic(expected = "zero-length inflate produced")]
fn test_zero_length_call_with_pending_data_panics() {
    let compressed = zlib(b"still has data");
    let mut inflater = InflaterPool::default().acquire();
    let _ = inflater.decompress(&compressed, &mut []);
}

// ============================================================================
// Global Pool
// ============================================================================

#[test]
fn test_global_pool_round_trip() {
    let compressed = zlib(b"global");
    let mut inflater = inflater_pool::acquire();
    let mut out = [0u8; 16];
    let progress = inflater.decompress(&compressed, &mut out).unwrap();
    assert_eq!(&out[..progress.produced], b"global");

    inflater_pool::release(inflater);
    inflater_pool::release(None);
    assert!(InflaterPool::global().idle() <= InflaterPool::global().capacity());
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_concurrent_acquire_release_keeps_invariants() {
    const THREADS: usize = 8;
    const ROUNDS: usize = 500;

    let (pool, ledger) = tracked_pool(4);
    let pool = Arc::new(pool);
    let violations = Arc::new(AtomicUsize::new(0));

    let workers: Vec<_> = (0..THREADS)
        .map(|t| {
            let pool = Arc::clone(&pool);
            let violations = Arc::clone(&violations);
            thread::spawn(move || {
                for round in 0..ROUNDS {
                    // Vary how many handles each thread holds at once
                    let burst = 1 + (t * 31 + round * 17) % 6;
                    let held: Vec<_> = (0..burst).map(|_| pool.acquire()).collect();

                    for handle in &held {
                        // A handle already marked in use was handed out twice
                        if handle.get_ref().in_use.swap(true, Ordering::SeqCst) {
                            violations.fetch_add(1, Ordering::SeqCst);
                        }
                        if handle.is_ended() {
                            violations.fetch_add(1, Ordering::SeqCst);
                        }
                    }

                    if pool.idle() > pool.capacity() {
                        violations.fetch_add(1, Ordering::SeqCst);
                    }

                    for handle in held {
                        handle.get_ref().in_use.store(false, Ordering::SeqCst);
                        pool.release(handle);
                    }
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(violations.load(Ordering::SeqCst), 0);
    assert!(pool.idle() <= pool.capacity());

    // Every handle ever created is either idle, or was ended exactly once
    let created = ledger.next_id.load(Ordering::SeqCst);
    let ended = ledger.ended.lock().unwrap();
    let unique: HashSet<_> = ended.iter().copied().collect();
    assert_eq!(unique.len(), ended.len(), "a handle was ended twice");
    assert_eq!(created, ended.len() + pool.idle());
}

#[test]
fn test_concurrent_inflate_through_shared_pool() {
    let data: Vec<u8> = (0..8192).map(|i| (i % 199) as u8).collect();
    let compressed = Arc::new(zlib(&data));
    let data = Arc::new(data);
    let pool = Arc::new(InflaterPool::default());

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let pool = Arc::clone(&pool);
            let compressed = Arc::clone(&compressed);
            let data = Arc::clone(&data);
            thread::spawn(move || {
                for _ in 0..50 {
                    let out = pool.inflate_exact(&compressed, data.len()).unwrap();
                    assert_eq!(&out[..], &data[..]);
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    assert!(pool.idle() >= 1);
    assert!(pool.idle() <= pool.capacity());
}
