//! Writes rendered reports to the export directory

use crate::document::PaginatedDocument;
use crate::render::DocumentRenderer;
use learnboard_common::{ensure, LearnboardError, Result};
use learnboard_config::ExportConfig;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument};

/// Renders documents and stores them under one directory
#[derive(Debug, Clone)]
pub struct ReportExporter {
    output_dir: PathBuf,
}

impl ReportExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(&config.output_dir)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Target path: the document's file name with the renderer's extension
    pub fn target_path(&self, document: &PaginatedDocument, renderer: &dyn DocumentRenderer) -> Result<PathBuf> {
        let name = Path::new(&document.file_name);
        ensure!(
            name.file_name() == Some(name.as_os_str()),
            "Report file name must not contain directories: {}",
            document.file_name
        );
        Ok(self.output_dir.join(name.with_extension(renderer.extension())))
    }

    /// Render `document` and write it, returning the written path.
    ///
    /// Rendering and I/O failures are reported as retryable export errors.
    #[instrument(skip(self, document, renderer), fields(file = %document.file_name))]
    pub async fn export(
        &self,
        document: &PaginatedDocument,
        renderer: &dyn DocumentRenderer,
    ) -> Result<PathBuf> {
        let path = self.target_path(document, renderer)?;

        let bytes = renderer.render(document).map_err(|e| {
            error!("Failed to render report {}: {}", document.file_name, e);
            LearnboardError::export_retryable(format!("Failed to render {}", document.file_name), e)
        })?;

        tokio::fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            error!("Failed to create export directory {}: {}", self.output_dir.display(), e);
            LearnboardError::export_retryable(
                format!("Failed to create {}", self.output_dir.display()),
                e,
            )
        })?;
        tokio::fs::write(&path, &bytes).await.map_err(|e| {
            error!("Failed to write report {}: {}", path.display(), e);
            LearnboardError::export_retryable(format!("Failed to write {}", path.display()), e)
        })?;

        info!(path = %path.display(), bytes = bytes.len(), pages = document.page_count(), "Exported report");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Page, ReportKind};
    use crate::render::{JsonRenderer, TextRenderer};

    struct FailingRenderer;

    impl DocumentRenderer for FailingRenderer {
        fn render(&self, _document: &PaginatedDocument) -> Result<Vec<u8>> {
            Err(LearnboardError::new("font missing"))
        }

        fn extension(&self) -> &'static str {
            "pdf"
        }
    }

    fn document(file_name: &str) -> PaginatedDocument {
        PaginatedDocument {
            kind: ReportKind::Company,
            title: "Report".to_string(),
            file_name: file_name.to_string(),
            pages: vec![Page::new(1)],
        }
    }

    #[tokio::test]
    async fn test_export_writes_with_renderer_extension() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = ReportExporter::new(dir.path().join("reports"));

        let path = exporter
            .export(&document("企業学習進捗レポート.pdf"), &JsonRenderer)
            .await
            .unwrap();
        assert_eq!(path, dir.path().join("reports").join("企業学習進捗レポート.json"));
        assert!(path.exists());

        let text_path = exporter
            .export(&document("企業学習進捗レポート.pdf"), &TextRenderer::default())
            .await
            .unwrap();
        assert_eq!(text_path.extension().unwrap(), "txt");
    }

    #[tokio::test]
    async fn test_render_failure_is_retryable() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = ReportExporter::new(dir.path());
        let err = exporter
            .export(&document("report.pdf"), &FailingRenderer)
            .await
            .unwrap_err();
        assert!(matches!(err, LearnboardError::Export { retryable: true, .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_unwritable_directory_is_retryable() {
        let file = tempfile::NamedTempFile::new().unwrap();
        // a regular file cannot act as the export directory
        let exporter = ReportExporter::new(file.path());
        let err = exporter
            .export(&document("report.pdf"), &JsonRenderer)
            .await
            .unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn test_nested_file_name_is_rejected() {
        let exporter = ReportExporter::new("reports");
        assert!(exporter
            .target_path(&document("../escape.pdf"), &JsonRenderer)
            .is_err());
    }
}
