use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;

use voxscribe::application::ports::{DecodeOptions, SpeechEngine, TranscriptionError};
use voxscribe::application::services::{TranscriptionService, UploadValidator};
use voxscribe::infrastructure::audio::{AudioNormalizerFactory, ModelResolver, WhisperEngine};
use voxscribe::infrastructure::observability::{TracingConfig, init_tracing};
use voxscribe::infrastructure::storage::LocalUploadStore;
use voxscribe::presentation::config::TranscriptionSettings;
use voxscribe::presentation::{AppState, Environment, Settings, create_router};

fn load_engine(settings: &TranscriptionSettings) -> Result<WhisperEngine, TranscriptionError> {
    let resolver = ModelResolver::new(&settings.model_dir, settings.download_models);
    let model_path = resolver.resolve_whisper(settings.model_size, settings.precision)?;
    let vad_path = if settings.vad_filter {
        Some(resolver.resolve_vad()?)
    } else {
        None
    };

    WhisperEngine::load(
        &model_path,
        vad_path.as_deref(),
        settings.device,
        settings.effective_threads(),
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;

    init_tracing(
        &TracingConfig::new(environment.as_str(), settings.logging.json),
        settings.server.port,
    );

    let store = Arc::new(LocalUploadStore::new(PathBuf::from(
        &settings.storage.upload_dir,
    ))?);
    let normalizer = AudioNormalizerFactory::create(&settings.audio);

    let transcription_settings = settings.transcription.clone();
    let engine: Arc<dyn SpeechEngine> = Arc::new(
        tokio::task::spawn_blocking(move || load_engine(&transcription_settings)).await??,
    );

    let options = DecodeOptions {
        beam_size: settings.transcription.beam_size,
        vad_filter: settings.transcription.vad_filter,
        min_silence_duration_ms: settings.transcription.min_silence_ms,
        language: settings.transcription.language.clone(),
    };

    let transcription_service = Arc::new(TranscriptionService::new(
        store,
        UploadValidator::new(settings.storage.min_upload_bytes),
        normalizer,
        engine,
        options,
    ));

    let state = AppState {
        transcription_service,
        max_upload_bytes: settings.server.max_upload_mb * 1024 * 1024,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
