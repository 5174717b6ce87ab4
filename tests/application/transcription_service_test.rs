use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use futures::stream;

use voxscribe::application::ports::{AudioNormalizer, DecodeOptions, NormalizeError};
use voxscribe::application::services::TranscribeError;
use voxscribe::infrastructure::audio::NativeAudioNormalizer;
use voxscribe::infrastructure::storage::StreamSource;

use crate::helpers::{
    FailingSpeechEngine, PanickingSpeechEngine, StubSpeechEngine, build_wav, create_service, tone,
};

struct RejectingNormalizer {
    missing_decoder: bool,
}

#[async_trait::async_trait]
impl AudioNormalizer for RejectingNormalizer {
    async fn normalize(&self, _input: &Path) -> Result<PathBuf, NormalizeError> {
        if self.missing_decoder {
            Err(NormalizeError::DecoderMissing("ffmpeg not found".to_string()))
        } else {
            Err(NormalizeError::EncodingFailed("disk full".to_string()))
        }
    }
}

fn wav_source(wav: Vec<u8>) -> StreamSource<'static> {
    StreamSource::new(Box::pin(stream::iter(vec![Ok::<_, std::io::Error>(Bytes::from(wav))])))
}

#[tokio::test]
async fn given_stub_engine_when_transcribing_upload_then_segments_are_space_joined() {
    let dir = tempfile::TempDir::new().unwrap();
    let service = create_service(
        dir.path(),
        Arc::new(NativeAudioNormalizer),
        Arc::new(StubSpeechEngine::new(vec!["hello", "world"])),
    );
    let mut source = wav_source(build_wav(16_000, 1, &tone(16_000, 1, 0.25)));

    let transcript = service
        .transcribe_upload("greeting.wav", &mut source)
        .await
        .unwrap();

    assert_eq!(transcript.as_str(), "hello world");
}

#[tokio::test]
async fn given_undersized_upload_when_transcribing_then_fails_before_normalizing() {
    let dir = tempfile::TempDir::new().unwrap();
    let service = create_service(
        dir.path(),
        Arc::new(RejectingNormalizer {
            missing_decoder: false,
        }),
        Arc::new(StubSpeechEngine::new(vec!["never"])),
    );
    let mut source = wav_source(vec![1u8; 10]);

    let result = service.transcribe_upload("tiny.wav", &mut source).await;

    assert!(matches!(result, Err(TranscribeError::InvalidInput(_))));
}

#[tokio::test]
async fn given_missing_decoder_when_transcribing_then_returns_invalid_input() {
    let dir = tempfile::TempDir::new().unwrap();
    let service = create_service(
        dir.path(),
        Arc::new(RejectingNormalizer {
            missing_decoder: true,
        }),
        Arc::new(StubSpeechEngine::new(vec![])),
    );
    let mut source = wav_source(vec![1u8; 4096]);

    let result = service.transcribe_upload("clip.ogg", &mut source).await;

    match result {
        Err(TranscribeError::InvalidInput(msg)) => assert!(msg.contains("ffmpeg not found")),
        other => panic!("expected invalid input, got {:?}", other),
    }
}

#[tokio::test]
async fn given_encoder_failure_when_transcribing_then_returns_internal_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let service = create_service(
        dir.path(),
        Arc::new(RejectingNormalizer {
            missing_decoder: false,
        }),
        Arc::new(StubSpeechEngine::new(vec![])),
    );
    let mut source = wav_source(vec![1u8; 4096]);

    let result = service.transcribe_upload("clip.ogg", &mut source).await;

    assert!(matches!(result, Err(TranscribeError::Internal(_))));
}

#[tokio::test]
async fn given_engine_error_when_transcribing_then_returns_internal_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let service = create_service(
        dir.path(),
        Arc::new(NativeAudioNormalizer),
        Arc::new(FailingSpeechEngine { unavailable: false }),
    );
    let mut source = wav_source(build_wav(16_000, 1, &tone(16_000, 1, 0.25)));

    let result = service.transcribe_upload("clip.wav", &mut source).await;

    match result {
        Err(TranscribeError::Internal(msg)) => assert!(msg.contains("beam search diverged")),
        other => panic!("expected internal error, got {:?}", other),
    }
}

#[tokio::test]
async fn given_engine_panic_when_transcribing_then_returns_internal_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let service = create_service(
        dir.path(),
        Arc::new(NativeAudioNormalizer),
        Arc::new(PanickingSpeechEngine),
    );
    let mut source = wav_source(build_wav(16_000, 1, &tone(16_000, 1, 0.25)));

    let result = service.transcribe_upload("clip.wav", &mut source).await;

    assert!(matches!(result, Err(TranscribeError::Internal(_))));
}

#[tokio::test]
async fn given_stream_error_when_storing_upload_then_returns_internal_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let service = create_service(
        dir.path(),
        Arc::new(NativeAudioNormalizer),
        Arc::new(StubSpeechEngine::new(vec![])),
    );
    let mut source = StreamSource::new(Box::pin(stream::iter(vec![
        Ok(Bytes::from_static(b"partial")),
        Err(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "client went away",
        )),
    ])));

    let result = service.transcribe_upload("clip.wav", &mut source).await;

    assert!(matches!(result, Err(TranscribeError::Internal(_))));
}

#[test]
fn given_default_decode_options_then_beam_five_and_vad_with_500ms_silence() {
    let options = DecodeOptions::default();

    assert_eq!(options.beam_size, 5);
    assert!(options.vad_filter);
    assert_eq!(options.min_silence_duration_ms, 500);
    assert!(options.language.is_none());
}
