use std::time::Duration;

use anyhow::Result;
use voice_resample_rs::resampler::Resampler;
use voice_resample_rs::{config, constants::CHANNELS, net, sources};

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    let config = config::load_or_default().await;

    // A sine tone stands in for the decoder pipeline
    let source = sources::sine::start(
        440.0,
        config.source_rate,
        CHANNELS as usize,
        config.chunk_frames,
        None,
    );

    let mut resampler = Resampler::new(
        source,
        config.source_rate,
        config.target_rate,
        config.quality,
    );
    resampler.set_output_capacity(config.output_capacity);
    resampler.set_chunk_frames(config.chunk_frames);
    if let Some(ms) = config.throttle_ms {
        resampler.set_throttle(Duration::from_millis(ms));
    }

    net::start(
        config.listen_addr,
        config.target_rate,
        CHANNELS,
        resampler.start(),
    );

    tokio::signal::ctrl_c().await?;

    Ok(())
}
