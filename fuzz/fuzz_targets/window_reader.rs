#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use scanwin::{OverlapWindower, Window, WindowConfig, WindowReader};

fuzz_target!(|input: (u8, u8, u8, Vec<u8>)| {
    let (chunk, peek, split, data) = input;
    let chunk_size = chunk as usize % 64 + 1;
    let peek_size = peek as usize % 64;
    let split = split as usize % 128 + 1;

    let config = WindowConfig::new(chunk_size, peek_size).unwrap();
    let windows: Vec<Window> = WindowReader::new(config)
        .unwrap()
        .windows(Cursor::new(data.clone()))
        .map(|r| r.into_result().unwrap())
        .collect();

    // Every window is bounded and mirrors the stream at its offset
    for (i, window) in windows.iter().enumerate() {
        assert!(!window.is_empty());
        assert!(window.len() <= chunk_size + peek_size);
        assert_eq!(window.offset, (i * chunk_size) as u64);
        let start = window.offset as usize;
        assert_eq!(&window.data[..], &data[start..start + window.len()]);
    }

    // The last window reaches end of stream
    let covered = windows.last().map(|w| w.end()).unwrap_or(0);
    assert_eq!(covered, data.len() as u64);

    // Push granularity never changes the result
    let mut engine = OverlapWindower::new(config).unwrap();
    let mut pushed = Vec::new();
    for piece in data.chunks(split) {
        pushed.extend(engine.push(piece));
    }
    pushed.extend(engine.finish());
    assert_eq!(pushed, windows);
});
