// Define some constants for the audio parameters
pub const VOICE_SAMPLE_RATE: u32 = 48000; // Fixed rate of the voice-channel sink
pub const BIT_DEPTH: u16 = 16; // 16 bits per sample on the wire
pub const CHANNELS: u16 = 2; // Stereo channel

// Preset source rates for playback speed effects. Declaring the decoded
// stream at a rate below or above its true one makes the converter stretch
// or compress it on the way to the sink.
pub const NIGHTCORE_SAMPLE_RATE: u32 = 40000;
pub const CHOPPED_SAMPLE_RATE: u32 = 56000;

/// Default bounded capacity of a converter's output stream, in chunks.
pub const DEFAULT_OUTPUT_CAPACITY: usize = 10;

/// Default frames per emitted chunk: 20 ms at the voice sink rate.
pub const DEFAULT_CHUNK_FRAMES: usize = 960;
