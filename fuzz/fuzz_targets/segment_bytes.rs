#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use scanwin::{Segmenter, WindowConfig};

fuzz_target!(|data: Vec<u8>| {
    for chunk_size in [1, 7, 64, 4096, scanwin::DEFAULT_CHUNK_SIZE] {
        let config = WindowConfig::default().with_chunk_size(chunk_size);
        let segmenter = Segmenter::new(config).unwrap();
        let input = Bytes::from(data.clone());

        let segments = segmenter.segment(input.clone());
        assert_eq!(segments.len(), data.len().div_ceil(chunk_size));

        // Segments are contiguous, bounded, and cover the input exactly
        let mut expected_offset = 0u64;
        for window in segmenter.segment(input) {
            assert!(!window.is_empty());
            assert!(window.len() <= chunk_size);
            assert_eq!(window.offset, expected_offset);
            let start = window.offset as usize;
            assert_eq!(&window.data[..], &data[start..start + window.len()]);
            expected_offset = window.end();
        }
        assert_eq!(expected_offset, data.len() as u64);
    }
});
