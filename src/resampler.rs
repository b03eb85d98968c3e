//! Streaming sample-rate conversion between audio pipeline stages.
//!
//! The converter adapts a chunk stream produced at a source's native sample
//! rate to the fixed rate the voice sink consumes. Output amplitudes are
//! estimated with Lagrange interpolation over a window of nearby input
//! frames, so the engine keeps a sliding pair of chunks to resolve windows
//! that cross a chunk boundary.

use crate::chunk::Chunk;
use crate::constants::{DEFAULT_CHUNK_FRAMES, DEFAULT_OUTPUT_CAPACITY};
use crate::interpolate::{lagrange, Point};
use std::time::Duration;
use tokio::sync::mpsc;

/// A stream of chunks between pipeline stages. Closing the sender half is
/// the end-of-stream signal in both directions.
pub type ChunkStream = mpsc::Receiver<Chunk>;

/// Streaming sample-rate converter.
///
/// Bound to one input stream and one set of conversion parameters at
/// construction. [`Resampler::start`] consumes the converter and spawns a
/// dedicated worker task which owns all conversion state and runs until the
/// input closes; a new converter is constructed per playback session.
pub struct Resampler {
    input: ChunkStream,
    source_rate: u32,
    target_rate: u32,
    quality: usize,
    output_capacity: usize,
    chunk_frames: usize,
    throttle: Option<Duration>,
}

impl Resampler {
    /// Create a converter reading `input` at `source_rate` and producing
    /// frames at `target_rate`.
    ///
    /// `quality` is the number of interpolation points taken from each side
    /// of the target position. Values below 1 make no sense and are
    /// silently corrected to 1.
    ///
    /// Every input chunk is expected to hold at least `quality` frames so
    /// an interpolation window never reaches further back than one chunk.
    pub fn new(input: ChunkStream, source_rate: u32, target_rate: u32, quality: i32) -> Self {
        debug_assert!(source_rate > 0 && target_rate > 0);

        let quality = if quality < 1 { 1 } else { quality as usize };

        Self {
            input,
            source_rate,
            target_rate,
            quality,
            output_capacity: DEFAULT_OUTPUT_CAPACITY,
            chunk_frames: DEFAULT_CHUNK_FRAMES,
            throttle: None,
        }
    }

    /// Bounded capacity of the output stream, in chunks. A full output
    /// blocks the worker until the consumer catches up.
    pub fn set_output_capacity(&mut self, capacity: usize) {
        self.output_capacity = capacity.max(1);
    }

    /// Number of frames per emitted chunk. The final chunk of a stream may
    /// be shorter.
    pub fn set_chunk_frames(&mut self, frames: usize) {
        self.chunk_frames = frames.max(1);
    }

    /// Fixed delay applied after each converted chunk is emitted,
    /// independent of backpressure. Useful to resample faster than realtime
    /// without maxing out a core.
    pub fn set_throttle(&mut self, delay: Duration) {
        self.throttle = Some(delay);
    }

    /// Spawn the worker task and hand back the output stream.
    ///
    /// The output closes once the input closes or delivers an empty chunk;
    /// there is no other termination signal. A caller wanting a deadline
    /// closes the input when it expires.
    pub fn start(self) -> ChunkStream {
        let (tx, rx) = mpsc::channel(self.output_capacity);

        tokio::spawn(async move {
            if self.source_rate == self.target_rate {
                self.relay(tx).await;
            } else {
                self.convert(tx).await;
            }
        });

        rx
    }

    /// Passthrough for matching rates. Interpolating at ratio 1.0 would
    /// only accumulate floating point error, so chunks are relayed
    /// untouched.
    async fn relay(self, tx: mpsc::Sender<Chunk>) {
        let Resampler { mut input, .. } = self;

        while let Some(chunk) = input.recv().await {
            if chunk.is_empty() {
                break;
            }

            if tx.send(chunk).await.is_err() {
                return;
            }
        }

        debug!("passthrough input ended, closing output");
    }

    async fn convert(self, tx: mpsc::Sender<Chunk>) {
        let Resampler {
            mut input,
            source_rate,
            target_rate,
            quality,
            chunk_frames,
            throttle,
            ..
        } = self;

        let ratio = source_rate as f64 / target_rate as f64;

        debug!("converting {source_rate} Hz -> {target_rate} Hz (ratio {ratio}, quality {quality})");

        // Prime the window with the first chunk. The left side is seeded
        // with silence so the earliest interpolation windows see the same
        // zero padding that batch conversion applies at its edges.
        let Some(first) = pull(&mut input).await else {
            debug!("input ended before the first chunk, closing output");
            return;
        };

        let channels = first.channels();
        let mut window = Window::new(input, first);

        let mut points = vec![Point::default(); quality * 2];
        let mut frame = vec![0.0f32; channels];
        let mut pending = Chunk::with_capacity(channels, chunk_frames);

        // Index of the next output frame within the whole stream.
        let mut position: u64 = 0;

        'stream: loop {
            let scaled = position as f64 * ratio;
            let base = scaled as i64;

            for channel in 0..channels {
                for (k, point) in points.iter_mut().enumerate() {
                    let index = base + k as i64 - quality as i64 + 1;

                    let Some(amplitude) = window.node(index, channel).await else {
                        // Out of input mid-window: the frame under
                        // construction cannot be completed, drop it.
                        break 'stream;
                    };

                    *point = Point {
                        position: index as f32,
                        amplitude,
                    };
                }

                frame[channel] = lagrange(&points, scaled as f32);
            }

            pending.push_frame(&frame);
            position += 1;

            if pending.frames() == chunk_frames {
                let chunk =
                    std::mem::replace(&mut pending, Chunk::with_capacity(channels, chunk_frames));

                if tx.send(chunk).await.is_err() {
                    // Consumer went away, nothing left to produce for.
                    return;
                }

                if let Some(delay) = throttle {
                    tokio::time::sleep(delay).await;
                }
            }
        }

        // Flush the fully computed frames before closing the output.
        if !pending.is_empty() {
            let _ = tx.send(pending).await;
        }

        debug!("input exhausted after {position} output frames, closing output");
    }
}

/// Sliding two-chunk window over the input stream.
///
/// `offset` is the stream position of the first frame of `current`. Nodes
/// left of it resolve against `previous`, nodes beyond the current chunk
/// advance the window by swapping the buffers and pulling a fresh chunk.
struct Window {
    input: ChunkStream,
    previous: Chunk,
    current: Chunk,
    offset: i64,
}

impl Window {
    fn new(input: ChunkStream, first: Chunk) -> Self {
        let previous = Chunk::silence(first.channels(), first.frames());

        Self {
            input,
            previous,
            current: first,
            offset: 0,
        }
    }

    /// Amplitude of `channel` at stream position `index`, pulling the next
    /// chunk whenever the window has to advance. `None` means the input is
    /// exhausted.
    async fn node(&mut self, index: i64, channel: usize) -> Option<f32> {
        loop {
            if index < self.offset {
                let i = self.previous.frames() as i64 + index - self.offset;
                debug_assert!(i >= 0, "window reached past the previous chunk");

                return Some(self.previous.sample(i as usize, channel));
            }

            let relative = (index - self.offset) as usize;
            if relative < self.current.frames() {
                return Some(self.current.sample(relative, channel));
            }

            // The window extends past the buffered data: discard the
            // oldest chunk and pull the next one, then resolve again.
            self.offset += self.current.frames() as i64;
            std::mem::swap(&mut self.previous, &mut self.current);
            self.current = pull(&mut self.input).await?;
        }
    }
}

/// Pull the next chunk, treating a closed input or an empty chunk as end of
/// stream. Abnormal input never surfaces as an error, only as termination.
async fn pull(input: &mut ChunkStream) -> Option<Chunk> {
    match input.recv().await {
        Some(chunk) if !chunk.is_empty() => Some(chunk),
        _ => None,
    }
}

/// One-shot conversion of a complete in-memory chunk.
///
/// Unlike the streaming converter there is no next chunk to pull when a
/// window crosses an edge; nodes outside the input count as silence. The
/// output covers every position that lands inside the input, so its length
/// is `input.frames() / ratio` rounded up.
pub fn resample(input: &Chunk, source_rate: u32, target_rate: u32, quality: i32) -> Chunk {
    debug_assert!(source_rate > 0 && target_rate > 0);

    let quality = if quality < 1 { 1 } else { quality as usize };
    let ratio = source_rate as f64 / target_rate as f64;
    let channels = input.channels();
    let frames = input.frames() as i64;

    let mut points = vec![Point::default(); quality * 2];
    let mut frame = vec![0.0f32; channels];
    let mut output = Chunk::with_capacity(channels, (input.frames() as f64 / ratio) as usize + 1);

    for i in 0u64.. {
        let scaled = i as f64 * ratio;
        let base = scaled as i64;

        if base >= frames {
            break;
        }

        for channel in 0..channels {
            for (k, point) in points.iter_mut().enumerate() {
                let index = base + k as i64 - quality as i64 + 1;

                let amplitude = if (0..frames).contains(&index) {
                    input.sample(index as usize, channel)
                } else {
                    0.0
                };

                *point = Point {
                    position: index as f32,
                    amplitude,
                };
            }

            frame[channel] = lagrange(&points, scaled as f32);
        }

        output.push_frame(&frame);
    }

    output
}
