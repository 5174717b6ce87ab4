use std::fs::File;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioNormalizer, NormalizeError};
use crate::domain::normalized_path_for;

use super::{TARGET_CHANNELS, TARGET_SAMPLE_RATE};

const RESAMPLE_CHUNK: usize = 1024;

/// Pure Rust pipeline: symphonia decode, channel averaging, rubato resample, hound encode.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeAudioNormalizer;

#[async_trait]
impl AudioNormalizer for NativeAudioNormalizer {
    #[tracing::instrument(skip_all, fields(input = %input.display()))]
    async fn normalize(&self, input: &Path) -> Result<PathBuf, NormalizeError> {
        let input = input.to_path_buf();
        let output = normalized_path_for(&input);
        let target = output.clone();

        tokio::task::spawn_blocking(move || {
            let pcm = decode_to_mono(&input)?;
            write_wav(&target, &pcm)
        })
        .await
        .map_err(|e| NormalizeError::EncodingFailed(format!("task join error: {e}")))??;

        Ok(output)
    }
}

/// Decodes any supported container to mono f32 samples at 16 kHz.
pub fn decode_to_mono(path: &Path) -> Result<Vec<f32>, NormalizeError> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| NormalizeError::DecodingFailed(format!("probe: {}", e)))?;

    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| NormalizeError::DecodingFailed("no audio track found".to_string()))?;

    let track_id = track.id;
    let codec_params = track.codec_params.clone();
    let source_rate = codec_params
        .sample_rate
        .ok_or_else(|| NormalizeError::DecodingFailed("unknown sample rate".to_string()))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| NormalizeError::DecodingFailed(format!("codec: {}", e)))?;

    let mut mono: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(SymphoniaError::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(e) => {
                return Err(NormalizeError::DecodingFailed(format!("packet: {}", e)));
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(SymphoniaError::DecodeError(e)) => {
                tracing::warn!(error = %e, "Skipping corrupt audio frame");
                continue;
            }
            Err(e) => {
                return Err(NormalizeError::DecodingFailed(format!("decode: {}", e)));
            }
        };

        let spec = *decoded.spec();
        let num_frames = decoded.frames();
        if num_frames == 0 {
            continue;
        }
        let channels = spec.channels.count().max(1);

        let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);

        if channels > 1 {
            mono.extend(
                sample_buf
                    .samples()
                    .chunks(channels)
                    .map(|frame| frame.iter().sum::<f32>() / channels as f32),
            );
        } else {
            mono.extend_from_slice(sample_buf.samples());
        }
    }

    if mono.is_empty() {
        return Err(NormalizeError::DecodingFailed(
            "no audio samples decoded".to_string(),
        ));
    }

    if source_rate != TARGET_SAMPLE_RATE {
        mono = resample(&mono, source_rate, TARGET_SAMPLE_RATE)?;
    }

    tracing::debug!(
        samples = mono.len(),
        duration_secs = mono.len() as f32 / TARGET_SAMPLE_RATE as f32,
        "Audio decoded to 16kHz mono PCM"
    );

    Ok(mono)
}

fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>, NormalizeError> {
    use rubato::{
        Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
    };

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let ratio = to_rate as f64 / from_rate as f64;

    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, RESAMPLE_CHUNK, 1)
        .map_err(|e| NormalizeError::EncodingFailed(format!("resampler init: {}", e)))?;

    // The sinc filter lags its input; feed silence until the delayed tail is out.
    let delay = resampler.output_delay();
    let expected_len = (samples.len() as f64 * ratio) as usize;
    let mut output = Vec::with_capacity(delay + expected_len + RESAMPLE_CHUNK);
    let mut chunks = samples.chunks(RESAMPLE_CHUNK);

    while output.len() < delay + expected_len {
        let mut input = chunks.next().map(<[f32]>::to_vec).unwrap_or_default();
        input.resize(RESAMPLE_CHUNK, 0.0);

        let result = resampler
            .process(&[input], None)
            .map_err(|e| NormalizeError::EncodingFailed(format!("resample: {}", e)))?;

        match result.first() {
            Some(channel) if !channel.is_empty() => output.extend_from_slice(channel),
            _ => break,
        }
    }

    output.drain(..delay.min(output.len()));
    output.truncate(expected_len);

    Ok(output)
}

fn write_wav(path: &Path, samples: &[f32]) -> Result<(), NormalizeError> {
    let spec = hound::WavSpec {
        channels: TARGET_CHANNELS,
        sample_rate: TARGET_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| NormalizeError::EncodingFailed(format!("wav create: {}", e)))?;

    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer
            .write_sample(value)
            .map_err(|e| NormalizeError::EncodingFailed(format!("wav write: {}", e)))?;
    }

    writer
        .finalize()
        .map_err(|e| NormalizeError::EncodingFailed(format!("wav finalize: {}", e)))
}
