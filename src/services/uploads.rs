// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local storage for course outline attachments.
//!
//! Files land in `<root>/Files` or `<root>/Videos` under a random UUID name
//! that keeps the original (lowercased) extension. The returned reference is
//! the public path served from [`UPLOADS_ROUTE`].

use crate::error::AppError;
use std::path::{Path, PathBuf};

/// Public route prefix under which the upload root is served.
pub const UPLOADS_ROUTE: &str = "/api/Uploads";

const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "ppt", "pptx"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv"];

/// Kind of outline attachment; each has its own directory and allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Document,
    Video,
}

impl AttachmentKind {
    /// Subdirectory of the upload root.
    pub fn directory(self) -> &'static str {
        match self {
            AttachmentKind::Document => "Files",
            AttachmentKind::Video => "Videos",
        }
    }

    /// Permitted lowercase extensions, without the dot.
    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            AttachmentKind::Document => DOCUMENT_EXTENSIONS,
            AttachmentKind::Video => VIDEO_EXTENSIONS,
        }
    }

    /// Message for an attachment whose extension is not allowed.
    pub fn rejection_message(self, section_title: &str) -> String {
        let (label, allowed) = match self {
            AttachmentKind::Document => ("file", "PDF, DOC, PPT, PPTX"),
            AttachmentKind::Video => ("video", "MP4, MOV, AVI, MKV"),
        };
        format!(
            "Invalid {} format for section '{}'. Only {} allowed.",
            label, section_title, allowed
        )
    }

    /// Lowercased extension of `filename` if it is allow-listed for this kind.
    pub fn allowed_extension(self, filename: &str) -> Option<String> {
        let extension = Path::new(filename)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();

        self.allowed_extensions()
            .contains(&extension.as_str())
            .then_some(extension)
    }
}

/// Writes attachments under the configured upload root.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the per-kind directories if missing.
    pub async fn ensure_directories(&self) -> Result<(), AppError> {
        for kind in [AttachmentKind::Document, AttachmentKind::Video] {
            let dir = self.root.join(kind.directory());
            tokio::fs::create_dir_all(&dir).await.map_err(|e| {
                AppError::Storage(format!("Failed to create {}: {}", dir.display(), e))
            })?;
        }
        Ok(())
    }

    /// Store `bytes` under a fresh name with `extension`; returns the public reference.
    ///
    /// `extension` must already have passed [`AttachmentKind::allowed_extension`].
    pub async fn save(
        &self,
        kind: AttachmentKind,
        extension: &str,
        bytes: &[u8],
    ) -> Result<String, AppError> {
        let dir = self.root.join(kind.directory());
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::Storage(format!("Failed to create {}: {}", dir.display(), e))
        })?;

        let name = format!("{}.{}", uuid::Uuid::new_v4(), extension);
        let path = dir.join(&name);
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            AppError::Storage(format!("Failed to write {}: {}", path.display(), e))
        })?;

        tracing::debug!(
            kind = kind.directory(),
            file = %name,
            bytes = bytes.len(),
            "Stored upload"
        );

        Ok(format!("{}/{}/{}", UPLOADS_ROUTE, kind.directory(), name))
    }

    /// Map a public reference back to its file on disk.
    ///
    /// Only references produced by [`UploadStore::save`] resolve.
    pub fn resolve(&self, reference: &str) -> Option<PathBuf> {
        let rest = reference.strip_prefix(UPLOADS_ROUTE)?.strip_prefix('/')?;
        let (directory, name) = rest.split_once('/')?;

        let known = [AttachmentKind::Document, AttachmentKind::Video]
            .iter()
            .any(|k| k.directory() == directory);
        if !known || name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return None;
        }

        Some(self.root.join(directory).join(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_extensions() {
        let kind = AttachmentKind::Document;
        assert_eq!(kind.allowed_extension("notes.pdf").as_deref(), Some("pdf"));
        assert_eq!(kind.allowed_extension("Slides.PPTX").as_deref(), Some("pptx"));
        assert_eq!(kind.allowed_extension("../../etc/x.doc").as_deref(), Some("doc"));
        assert_eq!(kind.allowed_extension("notes.txt"), None);
        assert_eq!(kind.allowed_extension("notes.pdf.exe"), None);
        assert_eq!(kind.allowed_extension("pdf"), None);
        assert_eq!(kind.allowed_extension("lecture.mp4"), None);
    }

    #[test]
    fn test_video_extensions() {
        let kind = AttachmentKind::Video;
        for name in ["a.mp4", "a.MOV", "a.avi", "a.mkv"] {
            assert!(kind.allowed_extension(name).is_some(), "{name}");
        }
        assert_eq!(kind.allowed_extension("a.pdf"), None);
        assert_eq!(kind.allowed_extension("a.webm"), None);
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            AttachmentKind::Document.rejection_message("Intro"),
            "Invalid file format for section 'Intro'. Only PDF, DOC, PPT, PPTX allowed."
        );
        assert_eq!(
            AttachmentKind::Video.rejection_message("Intro"),
            "Invalid video format for section 'Intro'. Only MP4, MOV, AVI, MKV allowed."
        );
    }

    #[tokio::test]
    async fn test_save_writes_bytes_and_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());

        let reference = store
            .save(AttachmentKind::Document, "pdf", b"%PDF-1.7 hello")
            .await
            .unwrap();

        assert!(reference.starts_with("/api/Uploads/Files/"));
        assert!(reference.ends_with(".pdf"));

        let path = store.resolve(&reference).expect("reference should resolve");
        assert_eq!(std::fs::read(path).unwrap(), b"%PDF-1.7 hello");
    }

    #[tokio::test]
    async fn test_save_generates_unique_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());

        let a = store.save(AttachmentKind::Video, "mp4", b"a").await.unwrap();
        let b = store.save(AttachmentKind::Video, "mp4", b"b").await.unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_resolve_rejects_foreign_paths() {
        let store = UploadStore::new("/srv/uploads");
        assert!(store.resolve("/api/Uploads/Files/x.pdf").is_some());
        assert!(store.resolve("/api/Uploads/Other/x.pdf").is_none());
        assert!(store.resolve("/api/Uploads/Files/../secret").is_none());
        assert!(store.resolve("/api/Uploads/Files/").is_none());
        assert!(store.resolve("/elsewhere/Files/x.pdf").is_none());
    }
}
