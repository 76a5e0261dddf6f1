#![no_main]

use inflater_pool::{InflaterPool, PoolConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<u8>| {
    let pool = InflaterPool::new(PoolConfig::default());

    // Arbitrary bytes may be corrupt, truncated or valid; none may panic
    let whole = pool.inflate_to_vec(&data);

    // A declared size must either match exactly or be rejected
    if let Some((&first, rest)) = data.split_first() {
        let size = first as usize * 16;
        if let Ok(out) = pool.inflate_exact(rest, size) {
            assert_eq!(out.len(), size);
        }
    }

    // Same input inflates the same way through a reused handle
    assert_eq!(pool.inflate_to_vec(&data).ok(), whole.ok());

    // Every handle went back to the pool
    assert!(pool.idle() >= 1);
    assert!(pool.idle() <= pool.capacity());
});
