#![no_main]

use std::io::Read;

use inflater_pool::{InflateReader, InflaterPool};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<u8>| {
    let pool = InflaterPool::default();

    // Test with various output buffer sizes
    for out_size in [1usize, 7, 4096] {
        let mut reader = InflateReader::with_pool(&data[..], &pool);
        let mut buf = vec![0u8; out_size];
        let mut streamed = Vec::new();

        let ok = loop {
            match reader.read(&mut buf) {
                Ok(0) => break true,
                Ok(n) => streamed.extend_from_slice(&buf[..n]),
                Err(_) => break false,
            }
        };

        // Verify: streaming matches whole-buffer inflation
        if ok {
            assert_eq!(pool.inflate_to_vec(&data).unwrap(), streamed);
        }
    }
});
