use voxscribe::infrastructure::audio::{ModelResolver, VAD_MODEL_FILE, model_file_name};
use voxscribe::presentation::config::{ComputePrecision, ModelSize};

#[test]
fn given_every_size_and_precision_when_naming_model_then_matches_hosted_whisper_cpp_files() {
    use ComputePrecision::{Float16, Float32, Int8};
    use ModelSize::{Base, Large, Medium, Small, Tiny};

    let cases = [
        (Tiny, Int8, "ggml-tiny-q8_0.bin"),
        (Tiny, Float16, "ggml-tiny.bin"),
        (Tiny, Float32, "ggml-tiny-f32.bin"),
        (Base, Int8, "ggml-base-q8_0.bin"),
        (Base, Float16, "ggml-base.bin"),
        (Base, Float32, "ggml-base-f32.bin"),
        (Small, Int8, "ggml-small-q8_0.bin"),
        (Small, Float16, "ggml-small.bin"),
        (Small, Float32, "ggml-small-f32.bin"),
        (Medium, Int8, "ggml-medium-q8_0.bin"),
        (Medium, Float16, "ggml-medium.bin"),
        (Medium, Float32, "ggml-medium-f32.bin"),
        (Large, Int8, "ggml-large-v3-q5_0.bin"),
        (Large, Float16, "ggml-large-v3.bin"),
        (Large, Float32, "ggml-large-v3-f32.bin"),
    ];

    for (size, precision, expected) in cases {
        assert_eq!(
            model_file_name(size, precision),
            expected,
            "{size:?}/{precision:?}"
        );
    }
}

#[test]
fn given_model_in_local_dir_when_resolving_then_returns_local_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let local = dir.path().join("ggml-tiny.bin");
    std::fs::write(&local, b"weights").unwrap();
    let resolver = ModelResolver::new(dir.path(), false);

    let resolved = resolver
        .resolve_whisper(ModelSize::Tiny, ComputePrecision::Float16)
        .unwrap();

    assert_eq!(resolved, local);
}

#[test]
fn given_local_vad_model_when_resolving_then_returns_local_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let local = dir.path().join(VAD_MODEL_FILE);
    std::fs::write(&local, b"vad").unwrap();
    let resolver = ModelResolver::new(dir.path(), false);

    assert_eq!(resolver.resolve_vad().unwrap(), local);
}

#[test]
fn given_missing_model_and_download_disabled_when_resolving_then_returns_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let resolver = ModelResolver::new(dir.path(), false);

    let result = resolver.resolve_whisper(ModelSize::Medium, ComputePrecision::Int8);

    assert!(result.is_err());
}

#[test]
fn given_missing_f32_model_when_resolving_then_does_not_attempt_download() {
    let dir = tempfile::TempDir::new().unwrap();
    let resolver = ModelResolver::new(dir.path(), true);

    let err = resolver
        .resolve_whisper(ModelSize::Base, ComputePrecision::Float32)
        .unwrap_err();

    assert!(err.to_string().contains("ggml-base-f32.bin"));
}
