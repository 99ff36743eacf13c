//! Async windowing of several files concurrently.
//!
//! Each tokio file is bridged to `futures-io` with `tokio-util`'s compat
//! layer and windowed on its own task.
//!
//! Run with:
//!     cargo run --example async_tokio --features async-io -- <path>...

use futures_util::StreamExt;
use scanwin::{WindowConfig, WindowError, window_async};
use tokio_util::compat::TokioAsyncReadCompatExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        return Err("usage: async_tokio <path>...".into());
    }

    let config = WindowConfig::new(64 * 1024, 256)?;

    let handles: Vec<_> = paths
        .into_iter()
        .map(|path| tokio::spawn(window_file(path, config)))
        .collect();

    for handle in handles {
        let (path, windows, bytes) = handle.await??;
        println!("{path}: {windows} windows, {bytes} bytes observed");
    }

    Ok(())
}

async fn window_file(
    path: String,
    config: WindowConfig,
) -> Result<(String, usize, u64), WindowError> {
    let file = tokio::fs::File::open(&path).await?;
    let mut stream = window_async(file.compat(), config)?;

    let mut windows = 0;
    let mut end = 0;
    while let Some(result) = stream.next().await {
        let window = result.into_result()?;
        windows += 1;
        end = window.end();
    }

    Ok((path, windows, end))
}
