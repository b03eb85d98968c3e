use tokio::sync::mpsc;

use crate::chunk::Chunk;
use crate::resampler::ChunkStream;

/// Start a sine wave source producing chunks of `chunk_frames` frames at
/// `sample_rate`, the same tone on every channel.
///
/// With a `duration_frames` limit the stream is finite and closes once the
/// limit is reached; without one it runs until the receiver is dropped.
pub fn start(
    f: f64,
    sample_rate: u32,
    channels: usize,
    chunk_frames: usize,
    duration_frames: Option<u64>,
) -> ChunkStream {
    let (tx, rx) = mpsc::channel(4);

    tokio::spawn(async move {
        // Phase of the sine wave, advanced one frame at a time
        let mut phase = 0.0;
        let mut produced: u64 = 0;
        let mut frame = vec![0.0f32; channels];

        loop {
            let mut chunk = Chunk::with_capacity(channels, chunk_frames);

            for _ in 0..chunk_frames {
                if duration_frames.is_some_and(|limit| produced >= limit) {
                    break;
                }

                frame.fill(sine_wave(phase));
                chunk.push_frame(&frame);

                // Increment the phase by the frequency divided by the
                // sample rate, wrapping around 1.0 to avoid overflow
                phase += f / sample_rate as f64;
                phase %= 1.0;
                produced += 1;
            }

            if chunk.is_empty() || tx.send(chunk).await.is_err() {
                break;
            }

            if duration_frames.is_some_and(|limit| produced >= limit) {
                break;
            }
        }
    });

    rx
}

const AMPLITUDE: f64 = 0.5; // 50% amplitude

// Define a helper function to generate a sine wave sample given a phase
fn sine_wave(phase: f64) -> f32 {
    ((phase * std::f64::consts::PI * 2.0).sin() * AMPLITUDE) as f32
}
