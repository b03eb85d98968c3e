//! Test infrastructure for voice-resample-rs integration tests.
//!
//! Provides chunk builders and stream helpers for driving the converter
//! without a real decoder pipeline.

use tokio::sync::mpsc;

pub use voice_resample_rs::chunk::Chunk;
pub use voice_resample_rs::interpolate::{lagrange, Point};
pub use voice_resample_rs::resampler::{resample, ChunkStream, Resampler};

/// Creates a mono chunk from a slice of amplitudes.
pub fn mono_chunk(samples: &[f32]) -> Chunk {
    Chunk::mono(samples)
}

/// A ramp signal 0.0, 1.0, 2.0, ... of the given length.
pub fn ramp(len: usize) -> Vec<f32> {
    (0..len).map(|i| i as f32).collect()
}

/// Queues the given chunks on a fresh stream and closes it.
///
/// The channel is sized to hold everything up front so the sends complete
/// before any consumer exists; dropping the sender closes the stream once
/// the queue drains.
pub async fn feed(chunks: Vec<Chunk>) -> ChunkStream {
    let (tx, rx) = mpsc::channel(chunks.len().max(1));

    for chunk in chunks {
        tx.send(chunk).await.expect("test stream should have room");
    }

    rx
}

/// Collects every chunk from a stream until it closes.
pub async fn collect(mut stream: ChunkStream) -> Vec<Chunk> {
    let mut chunks = Vec::new();

    while let Some(chunk) = stream.recv().await {
        chunks.push(chunk);
    }

    chunks
}

/// Flattens collected chunks into one interleaved sample buffer.
pub fn concat_samples(chunks: &[Chunk]) -> Vec<f32> {
    chunks
        .iter()
        .flat_map(|chunk| chunk.samples().iter().copied())
        .collect()
}

/// Interpolation node shorthand for expected-value computations.
pub fn node(position: f32, amplitude: f32) -> Point {
    Point {
        position,
        amplitude,
    }
}
