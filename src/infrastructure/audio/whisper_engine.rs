use std::path::Path;

use whisper_rs::{
    FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters, WhisperState,
    WhisperVadParams,
};

use crate::application::ports::{
    DecodeOptions, SpeechEngine, Transcription, TranscriptionError, TranscriptionInfo,
};
use crate::domain::TranscriptSegment;
use crate::presentation::config::ComputeDevice;

use super::{TARGET_CHANNELS, TARGET_SAMPLE_RATE};

/// whisper.cpp speech engine.
///
/// The context holds the weights and is shared read-only; every call builds
/// its own inference state so concurrent requests never contend on it.
pub struct WhisperEngine {
    context: WhisperContext,
    vad_model_path: Option<String>,
    n_threads: i32,
}

impl WhisperEngine {
    pub fn load(
        model_path: &Path,
        vad_model_path: Option<&Path>,
        device: ComputeDevice,
        n_threads: usize,
    ) -> Result<Self, TranscriptionError> {
        tracing::info!(
            model = %model_path.display(),
            device = %device,
            n_threads,
            "Loading whisper model"
        );

        let model_str = model_path.to_str().ok_or_else(|| {
            TranscriptionError::ModelLoadFailed(format!(
                "model path is not valid UTF-8: {}",
                model_path.display()
            ))
        })?;

        let mut params = WhisperContextParameters::default();
        params.use_gpu(device == ComputeDevice::Cuda);

        let context = WhisperContext::new_with_params(model_str, params)
            .map_err(|e| TranscriptionError::ModelLoadFailed(e.to_string()))?;

        let vad_model_path = vad_model_path
            .map(|p| {
                p.to_str().map(str::to_string).ok_or_else(|| {
                    TranscriptionError::ModelLoadFailed(format!(
                        "VAD model path is not valid UTF-8: {}",
                        p.display()
                    ))
                })
            })
            .transpose()?;

        tracing::info!(vad = vad_model_path.is_some(), "Whisper engine loaded");

        Ok(Self {
            context,
            vad_model_path,
            n_threads: i32::try_from(n_threads).unwrap_or(i32::MAX),
        })
    }
}

impl SpeechEngine for WhisperEngine {
    fn transcribe(
        &self,
        audio: &Path,
        options: &DecodeOptions,
    ) -> Result<Transcription, TranscriptionError> {
        let samples = read_canonical_wav(audio)?;
        let duration_secs = samples.len() as f32 / TARGET_SAMPLE_RATE as f32;

        let mut state = self
            .context
            .create_state()
            .map_err(|e| TranscriptionError::EngineUnavailable(e.to_string()))?;

        let mut params = FullParams::new(SamplingStrategy::BeamSearch {
            beam_size: i32::try_from(options.beam_size).unwrap_or(i32::MAX),
            patience: -1.0,
        });
        params.set_n_threads(self.n_threads);
        params.set_language(Some(options.language.as_deref().unwrap_or("auto")));
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);

        match (&self.vad_model_path, options.vad_filter) {
            (Some(vad_path), true) => {
                let mut vad = WhisperVadParams::new();
                vad.set_min_silence_duration(
                    i32::try_from(options.min_silence_duration_ms).unwrap_or(i32::MAX),
                );
                params.enable_vad(true);
                params.set_vad_model_path(Some(vad_path.as_str()));
                params.set_vad_params(vad);
            }
            (None, true) => {
                tracing::warn!("VAD requested but no VAD model is loaded, decoding full audio");
            }
            _ => {}
        }

        tracing::debug!(
            samples = samples.len(),
            duration_secs,
            beam_size = options.beam_size,
            vad = options.vad_filter,
            "Running whisper inference"
        );

        state
            .full(params, &samples)
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?;

        let total = state.full_n_segments();
        let language = Some(state.full_lang_id_from_state())
            .and_then(whisper_rs::get_lang_str)
            .map(str::to_string)
            .or_else(|| options.language.clone());

        tracing::debug!(language = ?language, segments = total, "Whisper inference finished");

        Ok(Transcription::new(
            WhisperSegments {
                state,
                next: 0,
                total,
            },
            TranscriptionInfo {
                language,
                duration_secs,
            },
        ))
    }
}

/// Pulls segments out of a finished inference state one at a time.
struct WhisperSegments {
    state: WhisperState,
    next: i32,
    total: i32,
}

impl Iterator for WhisperSegments {
    type Item = TranscriptSegment;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.total {
            let index = self.next;
            self.next += 1;

            let Some(segment) = self.state.get_segment(index) else {
                continue;
            };

            let text = match segment.to_str_lossy() {
                Ok(text) => text.trim().to_string(),
                Err(e) => {
                    tracing::warn!(segment = index, error = %e, "Skipping unreadable segment");
                    continue;
                }
            };
            if text.is_empty() {
                continue;
            }

            // Timestamps are in centiseconds
            return Some(TranscriptSegment::new(
                segment.start_timestamp() as f32 / 100.0,
                segment.end_timestamp() as f32 / 100.0,
                text,
            ));
        }
        None
    }
}

/// Loads a mono 16 kHz 16-bit WAV as f32 samples in [-1, 1].
pub fn read_canonical_wav(path: &Path) -> Result<Vec<f32>, TranscriptionError> {
    let mut reader = hound::WavReader::open(path)
        .map_err(|e| TranscriptionError::AudioUnreadable(format!("{}: {}", path.display(), e)))?;

    let spec = reader.spec();
    if spec.channels != TARGET_CHANNELS
        || spec.sample_rate != TARGET_SAMPLE_RATE
        || spec.bits_per_sample != 16
        || spec.sample_format != hound::SampleFormat::Int
    {
        return Err(TranscriptionError::AudioUnreadable(format!(
            "expected mono 16kHz 16-bit PCM, got {} channel(s) at {}Hz, {} bits",
            spec.channels, spec.sample_rate, spec.bits_per_sample
        )));
    }

    reader
        .samples::<i16>()
        .map(|s| s.map(|v| v as f32 / 32768.0))
        .collect::<Result<Vec<f32>, _>>()
        .map_err(|e| TranscriptionError::AudioUnreadable(e.to_string()))
}
