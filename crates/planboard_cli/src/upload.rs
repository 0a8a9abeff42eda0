//! Encoding local files as embedded study material.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use planboard_core::StudyFile;
use std::path::Path;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Reads `path` and wraps its bytes in a base64 `data:` URI.
pub fn encode_study_file(path: &Path) -> Result<StudyFile> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read `{}`", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("`{}` has no file name", path.display()))?;
    Ok(StudyFile {
        url: data_url(mime_for(path), &bytes),
        name,
    })
}

pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", B64.encode(bytes))
}

/// MIME type from the file extension; unknown extensions are opaque bytes.
pub fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("html" | "htm") => "text/html",
        Some("csv") => "text/csv",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("mp3") => "audio/mpeg",
        Some("mp4") => "video/mp4",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("ppt") => "application/vnd.ms-powerpoint",
        Some("pptx") => {
            "application/vnd.openxmlformats-officedocument.presentationml.presentation"
        }
        Some("zip") => "application/zip",
        _ => FALLBACK_MIME,
    }
}

/// MIME type recorded in a `data:` URI, for listings.
pub fn mime_of(url: &str) -> &str {
    url.strip_prefix("data:")
        .and_then(|rest| rest.split([';', ',']).next())
        .filter(|mime| !mime.is_empty())
        .unwrap_or(FALLBACK_MIME)
}

#[cfg(test)]
mod tests {
    use super::{data_url, encode_study_file, mime_for, mime_of};
    use std::path::Path;

    #[test]
    fn data_url_is_base64_with_mime() {
        assert_eq!(data_url("text/plain", b"hi"), "data:text/plain;base64,aGk=");
    }

    #[test]
    fn mime_lookup_ignores_case_and_falls_back() {
        assert_eq!(mime_for(Path::new("Lecture.PDF")), "application/pdf");
        assert_eq!(mime_for(Path::new("archive.xyz")), "application/octet-stream");
        assert_eq!(mime_for(Path::new("README")), "application/octet-stream");
    }

    #[test]
    fn mime_is_recovered_from_url() {
        assert_eq!(mime_of("data:image/png;base64,AAAA"), "image/png");
        assert_eq!(mime_of("data:,plain"), "application/octet-stream");
    }

    #[test]
    fn encode_reads_file_into_study_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let file = encode_study_file(&path).unwrap();
        assert_eq!(file.name, "notes.txt");
        assert_eq!(file.url, "data:text/plain;base64,aGVsbG8=");
        assert!(file.validate().is_ok());
    }

    #[test]
    fn encode_missing_file_reports_path() {
        let err = encode_study_file(Path::new("/definitely/missing.pdf")).unwrap_err();
        assert!(err.to_string().contains("missing.pdf"));
    }
}
