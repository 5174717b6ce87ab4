use std::fmt;
use std::path::{Path, PathBuf};

use super::upload_id::UploadId;

const FALLBACK_FILENAME: &str = "upload";
const NORMALIZED_SUFFIX: &str = "_16k.wav";

/// Location of a raw upload on disk: `<dir>/<upload-id>_<filename>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    id: UploadId,
    path: PathBuf,
}

impl StoredFile {
    pub fn new(dir: &Path, id: UploadId, filename: &str) -> Self {
        let name = format!("{}_{}", id.as_uuid(), sanitize_filename(filename));
        Self {
            id,
            path: dir.join(name),
        }
    }

    pub fn id(&self) -> UploadId {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the canonical (mono, 16 kHz) rendition of this upload lives.
    pub fn normalized_path(&self) -> PathBuf {
        normalized_path_for(&self.path)
    }
}

impl fmt::Display for StoredFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Drops the last extension of `input` and appends `_16k.wav`.
pub fn normalized_path_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| FALLBACK_FILENAME.to_string());
    input.with_file_name(format!("{stem}{NORMALIZED_SUFFIX}"))
}

/// Keeps only the final path component of a client supplied filename.
pub fn sanitize_filename(filename: &str) -> String {
    let last = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    match last {
        "" | "." | ".." => FALLBACK_FILENAME.to_string(),
        name => name.to_string(),
    }
}
