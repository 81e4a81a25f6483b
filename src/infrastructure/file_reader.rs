// src/infrastructure/file_reader.rs
use crate::domain::LessonFile;
use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;
use tracing::{debug, error, instrument};

/// MIME types for the upload formats the lesson form accepts.
const MIME_TYPES: [(&str, &str); 7] = [
    ("pdf", "application/pdf"),
    ("jpg", "image/jpeg"),
    ("png", "image/png"),
    ("docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
    ("mp4", "video/mp4"),
    ("mp3", "audio/mpeg"),
    ("html", "text/html"),
];

pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    MIME_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map_or("", |(_, mime)| *mime)
}

/// Self-contained `data:` URL for `bytes`.
pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
    let mime = if mime_type.is_empty() {
        "application/octet-stream"
    } else {
        mime_type
    };
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Read one file and encode it for embedding in a lesson.
#[instrument(level = "debug")]
pub async fn read_as_lesson_file(path: PathBuf) -> Result<LessonFile> {
    let bytes = tokio::fs::read(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mime_type = mime_type_for(&path);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    debug!(%name, size = bytes.len(), "Encoded file");
    Ok(LessonFile {
        name,
        mime_type: mime_type.to_string(),
        size: bytes.len() as u64,
        data_url: encode_data_url(mime_type, &bytes),
    })
}

/// Read all files concurrently, calling `on_ready` as each one completes.
///
/// Completion order is whatever the reads produce, not the input order.
/// Failed reads are logged and skipped.
pub async fn read_all<F>(paths: Vec<PathBuf>, mut on_ready: F)
where
    F: FnMut(LessonFile),
{
    let mut reads = JoinSet::new();
    for path in paths {
        reads.spawn(read_as_lesson_file(path));
    }

    while let Some(joined) = reads.join_next().await {
        match joined {
            Ok(Ok(file)) => on_ready(file),
            Ok(Err(e)) => error!(error = %format!("{e:#}"), "Skipping unreadable file"),
            Err(e) => error!(error = %e, "File read task failed"),
        }
    }
}
