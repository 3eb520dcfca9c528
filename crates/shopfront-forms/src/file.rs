//! File selection engine.
//!
//! Backs a file field in drop-target mode: tracks drag state, validates
//! candidate files against the field's constraints, keeps per-file
//! rejection messages, and produces previews (base64 data URLs for images,
//! a coarse content-type icon class otherwise).

use crate::field::FileConstraints;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use shopfront_types::form::{FieldValue, FileAttachment};
use tracing::debug;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Drag lifecycle events forwarded from the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    Enter,
    Over,
    Leave,
    Drop,
}

/// Coarse grouping used to pick a preview icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    Image,
    Pdf,
    WordProcessing,
    Spreadsheet,
    Other,
}

/// Display description of one selected file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePreview {
    pub filename: String,
    pub size_label: String,
    pub kind: PreviewKind,
    /// `data:<mime>;base64,<...>` for images, absent otherwise.
    pub data_url: Option<String>,
}

/// Stateful selection behind one file field.
#[derive(Debug, Clone, Default)]
pub struct FileSelection {
    constraints: FileConstraints,
    files: Vec<FileAttachment>,
    rejections: Vec<String>,
    drag_active: bool,
}

impl FileSelection {
    pub fn new(constraints: FileConstraints) -> Self {
        Self {
            constraints,
            ..Self::default()
        }
    }

    pub fn constraints(&self) -> &FileConstraints {
        &self.constraints
    }

    pub fn files(&self) -> &[FileAttachment] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Rejection messages from the most recent offer.
    pub fn rejections(&self) -> &[String] {
        &self.rejections
    }

    pub fn drag_active(&self) -> bool {
        self.drag_active
    }

    /// Track the drag lifecycle. The active flag holds only while a drag
    /// hovers the target.
    pub fn drag(&mut self, event: DragEvent) {
        self.drag_active = matches!(event, DragEvent::Enter | DragEvent::Over);
    }

    /// Offer candidate files (from a drop or a picker dialog).
    ///
    /// Each candidate is validated on its own; rejections replace the
    /// previous batch's messages. Valid files append for multi-file fields
    /// and replace for single-file fields, then the selection is truncated
    /// to the configured maximum.
    pub fn offer(&mut self, candidates: Vec<FileAttachment>) {
        let mut rejections = Vec::new();
        let mut valid = Vec::new();
        for file in candidates {
            match self.check(&file) {
                Ok(()) => valid.push(file),
                Err(message) => {
                    debug!(filename = %file.filename, %message, "file rejected");
                    rejections.push(message);
                }
            }
        }
        if let Some(max) = self.constraints.max_files {
            if valid.len() > max {
                rejections.push(format!("Maximum {max} files allowed"));
                valid.truncate(max);
            }
        }
        self.rejections = rejections;

        if valid.is_empty() {
            return;
        }
        if self.constraints.multiple {
            self.files.extend(valid);
        } else {
            self.files = valid;
        }
        if let Some(max) = self.constraints.max_files {
            self.files.truncate(max);
        }
    }

    /// Remove one selected file. A single-file field clears entirely.
    pub fn remove(&mut self, index: usize) {
        if self.constraints.multiple {
            if index < self.files.len() {
                self.files.remove(index);
            }
        } else {
            self.files.clear();
        }
    }

    /// The selection as a submittable field value.
    pub fn value(&self) -> FieldValue {
        if self.constraints.multiple {
            FieldValue::Files(self.files.clone())
        } else {
            match self.files.first() {
                Some(file) => FieldValue::File(file.clone()),
                None => FieldValue::Null,
            }
        }
    }

    /// Display descriptions of the current selection.
    pub fn previews(&self) -> Vec<FilePreview> {
        self.files
            .iter()
            .map(|file| {
                let kind = preview_kind(&file.content_type);
                FilePreview {
                    filename: file.filename.clone(),
                    size_label: format_size(file.size()),
                    kind,
                    data_url: (kind == PreviewKind::Image).then(|| data_url(file)),
                }
            })
            .collect()
    }

    fn check(&self, file: &FileAttachment) -> Result<(), String> {
        if let Some(max) = self.constraints.max_size {
            if file.size() > max {
                return Err(format!(
                    "{} is too large. Maximum size is {}",
                    file.filename,
                    format_size(max)
                ));
            }
        }
        if let Some(accept) = &self.constraints.accept {
            let accepted = accept.split(',').map(str::trim).any(|entry| {
                if let Some(extension) = entry.strip_prefix('.') {
                    file.filename
                        .to_lowercase()
                        .ends_with(&format!(".{}", extension.to_lowercase()))
                } else {
                    matches_mime(&file.content_type, entry)
                }
            });
            if !accepted {
                return Err(format!(
                    "{} is not a valid file type. Accepted types: {accept}",
                    file.filename
                ));
            }
        }
        Ok(())
    }
}

/// MIME allowlist match. A pattern may carry one `*` segment (`image/*`);
/// a literal pattern matches anywhere in the content type.
fn matches_mime(content_type: &str, pattern: &str) -> bool {
    match pattern.split_once('*') {
        Some((prefix, suffix)) => {
            content_type.starts_with(prefix)
                && content_type.ends_with(suffix)
                && content_type.len() >= prefix.len() + suffix.len()
        }
        None => content_type.contains(pattern),
    }
}

fn preview_kind(content_type: &str) -> PreviewKind {
    if content_type.starts_with("image/") {
        PreviewKind::Image
    } else if content_type == "application/pdf" {
        PreviewKind::Pdf
    } else if content_type.contains("word") || content_type.contains("document") {
        PreviewKind::WordProcessing
    } else if content_type.contains("sheet") || content_type.contains("excel") {
        PreviewKind::Spreadsheet
    } else {
        PreviewKind::Other
    }
}

fn data_url(file: &FileAttachment) -> String {
    format!(
        "data:{};base64,{}",
        file.content_type,
        BASE64.encode(&file.bytes)
    )
}

/// Human-readable size: base 1024, up to two decimals, trailing zeros
/// trimmed (`1536` bytes reads `1.5 KB`).
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(SIZE_UNITS.len() - 1);
    let scaled = bytes as f64 / 1024f64.powi(exponent as i32);
    let mut number = format!("{scaled:.2}");
    while number.ends_with('0') {
        number.pop();
    }
    if number.ends_with('.') {
        number.pop();
    }
    format!("{number} {}", SIZE_UNITS[exponent])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str, size: usize) -> FileAttachment {
        FileAttachment::new(name, "image/png", vec![0u8; size])
    }

    #[test]
    fn test_size_formatting() {
        assert_eq!(format_size(0), "0 Bytes");
        assert_eq!(format_size(512), "512 Bytes");
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1024 * 1024), "1 MB");
        assert_eq!(format_size(2 * 1024 * 1024), "2 MB");
    }

    #[test]
    fn test_oversized_file_is_rejected_with_named_message() {
        let mut selection =
            FileSelection::new(FileConstraints::new().max_size(1024 * 1024));
        selection.offer(vec![png("huge.png", 2 * 1024 * 1024)]);
        assert!(selection.is_empty());
        assert_eq!(
            selection.rejections(),
            ["huge.png is too large. Maximum size is 1 MB"]
        );
    }

    #[test]
    fn test_accept_list_matches_extensions_and_mime_patterns() {
        let mut selection = FileSelection::new(
            FileConstraints::new().accept(".pdf, image/*").multiple(true),
        );
        selection.offer(vec![
            png("photo.PNG", 10),
            FileAttachment::new("report.pdf", "application/pdf", vec![1]),
            FileAttachment::new("notes.txt", "text/plain", vec![1]),
        ]);
        assert_eq!(selection.files().len(), 2);
        assert_eq!(selection.rejections().len(), 1);
        assert!(selection.rejections()[0].starts_with("notes.txt is not a valid file type"));
    }

    #[test]
    fn test_multi_file_appends_and_truncates() {
        let mut selection =
            FileSelection::new(FileConstraints::new().multiple(true).max_files(2));
        selection.offer(vec![png("a.png", 1)]);
        selection.offer(vec![png("b.png", 1), png("c.png", 1)]);
        assert_eq!(selection.files().len(), 2);
        assert_eq!(selection.files()[0].filename, "a.png");
        assert_eq!(selection.files()[1].filename, "b.png");
    }

    #[test]
    fn test_single_offer_over_max_reports_and_truncates() {
        let mut selection =
            FileSelection::new(FileConstraints::new().multiple(true).max_files(1));
        selection.offer(vec![png("a.png", 1), png("b.png", 1)]);
        assert_eq!(selection.files().len(), 1);
        assert_eq!(selection.rejections(), ["Maximum 1 files allowed"]);
    }

    #[test]
    fn test_single_file_replaces_and_removal_clears() {
        let mut selection = FileSelection::new(FileConstraints::new());
        selection.offer(vec![png("first.png", 1)]);
        selection.offer(vec![png("second.png", 1)]);
        assert_eq!(selection.files().len(), 1);
        assert_eq!(selection.files()[0].filename, "second.png");
        selection.remove(0);
        assert!(selection.is_empty());
        assert_eq!(selection.value(), FieldValue::Null);
    }

    #[test]
    fn test_rejections_do_not_clear_prior_selection() {
        let mut selection =
            FileSelection::new(FileConstraints::new().max_size(100).multiple(true));
        selection.offer(vec![png("ok.png", 10)]);
        selection.offer(vec![png("big.png", 200)]);
        assert_eq!(selection.files().len(), 1);
        assert_eq!(selection.rejections().len(), 1);
    }

    #[test]
    fn test_drag_lifecycle() {
        let mut selection = FileSelection::new(FileConstraints::new());
        selection.drag(DragEvent::Enter);
        assert!(selection.drag_active());
        selection.drag(DragEvent::Over);
        assert!(selection.drag_active());
        selection.drag(DragEvent::Leave);
        assert!(!selection.drag_active());
        selection.drag(DragEvent::Enter);
        selection.drag(DragEvent::Drop);
        assert!(!selection.drag_active());
    }

    #[test]
    fn test_previews_classify_and_embed_images() {
        let mut selection = FileSelection::new(FileConstraints::new().multiple(true));
        selection.offer(vec![
            png("photo.png", 3),
            FileAttachment::new("cv.pdf", "application/pdf", vec![1]),
            FileAttachment::new(
                "sheet.xlsx",
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                vec![1],
            ),
        ]);
        let previews = selection.previews();
        assert_eq!(previews[0].kind, PreviewKind::Image);
        assert!(previews[0]
            .data_url
            .as_deref()
            .is_some_and(|url| url.starts_with("data:image/png;base64,")));
        assert_eq!(previews[1].kind, PreviewKind::Pdf);
        assert!(previews[1].data_url.is_none());
        assert_eq!(previews[2].kind, PreviewKind::Spreadsheet);
    }

    #[test]
    fn test_multiple_selection_submits_repeated_key_value() {
        let mut selection = FileSelection::new(FileConstraints::new().multiple(true));
        selection.offer(vec![png("a.png", 1), png("b.png", 1)]);
        match selection.value() {
            FieldValue::Files(files) => assert_eq!(files.len(), 2),
            other => panic!("expected Files, got {other:?}"),
        }
    }
}
