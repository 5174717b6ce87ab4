use std::path::{Path, PathBuf};

use voxscribe::domain::{StoredFile, UploadId, normalized_path_for, sanitize_filename};

#[test]
fn given_upload_id_and_filename_when_creating_stored_file_then_name_is_id_underscore_filename() {
    let id = UploadId::new();
    let file = StoredFile::new(Path::new("uploads"), id, "lecture.mp3");

    let expected = PathBuf::from("uploads").join(format!("{}_lecture.mp3", id.as_uuid()));
    assert_eq!(file.path(), expected);
    assert_eq!(file.id(), id);
}

#[test]
fn given_two_uploads_of_same_name_when_creating_stored_files_then_paths_differ() {
    let a = StoredFile::new(Path::new("uploads"), UploadId::new(), "clip.wav");
    let b = StoredFile::new(Path::new("uploads"), UploadId::new(), "clip.wav");

    assert_ne!(a.path(), b.path());
}

#[test]
fn given_stored_file_when_deriving_normalized_path_then_replaces_extension_with_16k_wav() {
    let id = UploadId::new();
    let file = StoredFile::new(Path::new("uploads"), id, "talk.mp3");

    let expected = PathBuf::from("uploads").join(format!("{}_talk_16k.wav", id.as_uuid()));
    assert_eq!(file.normalized_path(), expected);
}

#[test]
fn given_path_with_multiple_dots_when_normalizing_then_only_last_extension_is_dropped() {
    let normalized = normalized_path_for(Path::new("/data/abc_my.voice.memo.m4a"));

    assert_eq!(normalized, PathBuf::from("/data/abc_my.voice.memo_16k.wav"));
}

#[test]
fn given_path_without_extension_when_normalizing_then_keeps_full_name() {
    let normalized = normalized_path_for(Path::new("uploads/abc_recording"));

    assert_eq!(normalized, PathBuf::from("uploads/abc_recording_16k.wav"));
}

#[test]
fn given_traversal_filename_when_sanitizing_then_keeps_only_last_component() {
    assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
    assert_eq!(sanitize_filename("C:\\Users\\me\\memo.ogg"), "memo.ogg");
}

#[test]
fn given_degenerate_filename_when_sanitizing_then_falls_back_to_placeholder() {
    assert_eq!(sanitize_filename(""), "upload");
    assert_eq!(sanitize_filename(".."), "upload");
    assert_eq!(sanitize_filename("dir/"), "upload");
}

#[test]
fn given_stored_file_when_displayed_then_matches_path() {
    let file = StoredFile::new(Path::new("uploads"), UploadId::new(), "a.wav");

    assert_eq!(format!("{}", file), file.path().display().to_string());
}
