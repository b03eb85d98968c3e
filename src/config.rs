use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::fs::read_to_string;

use crate::constants::{DEFAULT_CHUNK_FRAMES, DEFAULT_OUTPUT_CAPACITY, VOICE_SAMPLE_RATE};

#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Native sample rate of the source stream
    pub source_rate: u32,

    /// Sample rate expected by the sink
    pub target_rate: u32,

    /// Interpolation points taken from each side of the target position
    pub quality: i32,

    /// Frames per emitted chunk
    pub chunk_frames: usize,

    /// Bounded capacity of the converter output, in chunks
    pub output_capacity: usize,

    /// Optional delay in milliseconds applied after each emitted chunk
    pub throttle_ms: Option<u64>,

    /// Address the wav demo stream listens on
    pub listen_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source_rate: 44100,
            target_rate: VOICE_SAMPLE_RATE,
            quality: 2,
            chunk_frames: DEFAULT_CHUNK_FRAMES,
            output_capacity: DEFAULT_OUTPUT_CAPACITY,
            throttle_ms: None,
            listen_addr: "127.0.0.1:7878".to_string(),
        }
    }
}

pub async fn load() -> Result<Config> {
    let config = read_to_string("Config.toml").await?;
    let config: Config = toml::from_str(&config)?;

    Ok(config)
}

/// Load Config.toml, falling back to defaults when it is missing or
/// malformed.
pub async fn load_or_default() -> Config {
    match load().await {
        Ok(config) => config,
        Err(e) => {
            info!("Error while reading config: {:?}", e);
            info!("Falling back to default config.");
            Config::default()
        }
    }
}
