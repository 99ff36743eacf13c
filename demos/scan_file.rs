//! Scan a file for a literal pattern using overlapping windows.
//!
//! The file is windowed on a background producer thread, then read twice
//! more through a `ReReader` that is rewound in between. All passes agree.
//!
//! Run with:
//!     RUST_LOG=debug cargo run --example scan_file -- <path> <pattern>

use std::collections::BTreeSet;
use std::fs::File;

use scanwin::{CancelToken, ReReader, WindowConfig, WindowReader};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let path = args.next().ok_or("usage: scan_file <path> <pattern>")?;
    let pattern = args.next().unwrap_or_else(|| "AKIA".to_string());
    let needle = pattern.as_bytes();

    // Any match up to `peek_size + 1` bytes long lands whole in some window
    let config = WindowConfig::default().with_peek_size(needle.len().max(1) - 1);
    let reader = WindowReader::new(config)?;

    let cancel = CancelToken::new();

    let mut first = BTreeSet::new();
    for result in reader.spawn(File::open(&path)?, &cancel)? {
        let (window, error) = result.into_parts();
        first.extend(find(&window.data, needle).map(|at| window.offset + at as u64));
        if let Some(error) = error {
            return Err(error.into());
        }
    }
    info!(matches = first.len(), "producer pass done");

    let mut source = ReReader::new(File::open(&path)?);
    for pass in 0..2 {
        let mut again = BTreeSet::new();
        for result in reader.windows(&mut source) {
            let window = result.into_result()?;
            again.extend(find(&window.data, needle).map(|at| window.offset + at as u64));
        }
        info!(
            pass,
            matches = again.len(),
            recorded = source.len_recorded(),
            spilled = source.is_spilled(),
            "re-read pass done"
        );
        if again != first {
            return Err("passes disagree".into());
        }
        source.reset()?;
    }
    source.stop();

    for offset in &first {
        println!("{path}:{offset}: {pattern}");
    }

    Ok(())
}

fn find<'a>(haystack: &'a [u8], needle: &'a [u8]) -> impl Iterator<Item = usize> + 'a {
    haystack
        .windows(needle.len().max(1))
        .enumerate()
        .filter(move |(_, w)| *w == needle)
        .map(|(i, _)| i)
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(env_filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
