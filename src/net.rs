use anyhow::Result;
use byteorder::{LittleEndian, WriteBytesExt};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

// Import the tokio and hound crates
use hound::{SampleFormat, WavSpec};

use crate::constants::BIT_DEPTH;
use crate::resampler::ChunkStream;

/// Serve `source` as an infinite WAV stream over TCP in a background task.
///
/// The converter output is single-consumer with backpressure, so the first
/// client to connect takes the stream.
pub fn start(addr: String, sample_rate: u32, channels: u16, source: ChunkStream) {
    tokio::spawn(async move {
        if let Err(e) = serve(&addr, sample_rate, channels, source).await {
            error!("Error while streaming wav audio: {e:?}");
        }
    });
}

async fn serve(addr: &str, sample_rate: u32, channels: u16, mut source: ChunkStream) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {addr}");

    let (mut stream, peer) = listener.accept().await?;
    info!("Streaming to {peer}");

    // Create a WavSpec object to specify the audio properties
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: BIT_DEPTH,
        sample_format: SampleFormat::Int,
    };

    // Write the wav header to the stream using the hound crate
    // This will allow players to recognize the stream as a wav file
    let header = spec.into_header_for_infinite_file();
    stream.write_all(&header[..]).await?;

    // Relay converted chunks until the converter closes its output
    while let Some(chunk) = source.recv().await {
        let mut wav_data: Vec<u8> = Vec::with_capacity(chunk.frames() * channels as usize * 2);

        for frame in chunk.iter_frames() {
            for &sample in frame {
                let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
                WriteBytesExt::write_i16::<LittleEndian>(&mut wav_data, value)?;
            }
        }

        stream.write_all(wav_data.as_slice()).await?;
    }

    info!("Source stream ended, closing connection to {peer}");
    Ok(())
}
