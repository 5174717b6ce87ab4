use voxscribe::application::services::{
    DEFAULT_MIN_UPLOAD_BYTES, TranscribeError, UploadValidator,
};

fn write_file(dir: &tempfile::TempDir, name: &str, len: usize) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, vec![7u8; len]).unwrap();
    path
}

#[tokio::test]
async fn given_file_one_byte_below_minimum_when_validating_then_returns_invalid_input() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_file(&dir, "short.wav", 1023);

    let result = UploadValidator::default().validate(&path).await;

    assert!(matches!(result, Err(TranscribeError::InvalidInput(_))));
}

#[tokio::test]
async fn given_file_exactly_at_minimum_when_validating_then_returns_size() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_file(&dir, "exact.wav", 1024);

    let size = UploadValidator::default().validate(&path).await.unwrap();

    assert_eq!(size, 1024);
}

#[tokio::test]
async fn given_empty_file_when_validating_then_message_names_sizes() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_file(&dir, "empty.wav", 0);

    let err = UploadValidator::default().validate(&path).await.unwrap_err();

    let message = err.to_string();
    assert!(message.contains("0 bytes"));
    assert!(message.contains("1024"));
}

#[tokio::test]
async fn given_missing_file_when_validating_then_returns_internal_error() {
    let dir = tempfile::TempDir::new().unwrap();

    let result = UploadValidator::default()
        .validate(&dir.path().join("missing.wav"))
        .await;

    assert!(matches!(result, Err(TranscribeError::Internal(_))));
}

#[tokio::test]
async fn given_custom_minimum_when_validating_then_threshold_applies() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_file(&dir, "small.wav", 64);
    let validator = UploadValidator::new(32);

    assert_eq!(validator.min_bytes(), 32);
    assert_eq!(validator.validate(&path).await.unwrap(), 64);
}

#[test]
fn given_default_validator_when_created_then_minimum_is_1024_bytes() {
    assert_eq!(DEFAULT_MIN_UPLOAD_BYTES, 1024);
    assert_eq!(UploadValidator::default().min_bytes(), 1024);
}
