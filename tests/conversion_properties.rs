//! Cross-mode conversion properties.
//!
//! The streaming engine and the batch function share one interpolation and
//! one edge policy, so their outputs must agree wherever both produce
//! frames.

mod common;

use common::*;

/// Downsampling a short ramp at double stride, in both modes, against
/// expected values computed from the Lagrange formula itself.
#[tokio::test]
async fn test_double_stride_downsample_matches_formula() {
    let input = [0.0, 1.0, 2.0, 3.0];

    let expected = vec![
        lagrange(&[node(0.0, 0.0), node(1.0, 1.0)], 0.0),
        lagrange(&[node(2.0, 2.0), node(3.0, 3.0)], 2.0),
    ];
    assert_eq!(expected, vec![0.0, 2.0]);

    let batch = resample(&mono_chunk(&input), 2, 1, 1);
    assert_eq!(batch.samples(), &expected[..]);

    let source = feed(vec![mono_chunk(&input)]).await;
    let streamed = collect(Resampler::new(source, 2, 1, 1).start()).await;
    assert_eq!(concat_samples(&streamed), expected);
}

/// A chunked stream converts to a strict prefix of the batch result over
/// the concatenated input: the batch zero-pads the right edge where the
/// stream stops once a window would need input that never arrives.
#[tokio::test]
async fn test_streaming_output_prefixes_batch_output() {
    let samples = ramp(300);
    let chunks = vec![
        mono_chunk(&samples[..64]),
        mono_chunk(&samples[64..164]),
        mono_chunk(&samples[164..]),
    ];

    let source = feed(chunks).await;
    let mut resampler = Resampler::new(source, 44100, 48000, 2);
    resampler.set_chunk_frames(32);
    let streamed = concat_samples(&collect(resampler.start()).await);

    let batch = resample(&mono_chunk(&samples), 44100, 48000, 2);

    assert!(!streamed.is_empty());
    assert!(streamed.len() <= batch.frames());
    assert_eq!(&streamed[..], &batch.samples()[..streamed.len()]);

    // Every output position whose full window fits inside the input made
    // it out before the engine drained.
    let ratio = 44100.0f64 / 48000.0;
    let expected_len = (0..)
        .take_while(|&i| (i as f64 * ratio) as usize + 2 < samples.len())
        .count();
    assert_eq!(streamed.len(), expected_len);
}

/// Upsampling across a chunk boundary agrees with the batch result.
#[tokio::test]
async fn test_upsampling_stream_matches_batch_prefix() {
    let samples = ramp(100);
    let chunks = vec![mono_chunk(&samples[..60]), mono_chunk(&samples[60..])];

    let source = feed(chunks).await;
    let mut resampler = Resampler::new(source, 24000, 48000, 1);
    resampler.set_chunk_frames(64);
    let streamed = concat_samples(&collect(resampler.start()).await);

    let batch = resample(&mono_chunk(&samples), 24000, 48000, 1);

    // Doubling the rate doubles the frame count, short of the frames whose
    // windows reach past the final input sample.
    assert_eq!(streamed.len(), 198);
    assert_eq!(&streamed[..], &batch.samples()[..streamed.len()]);
}
