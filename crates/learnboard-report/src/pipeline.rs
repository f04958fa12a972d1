//! Shared assembly loop for tabular reports, blocking and streaming

use crate::document::{PaginatedDocument, ReportKind};
use crate::writer::DocumentWriter;
use learnboard_config::ReportLayout;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, instrument};

/// Stages of report generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStage {
    Preamble,
    Rows,
    Closing,
    Complete,
}

/// Progress information for streamed report generation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportProgress {
    pub stage: ReportStage,
    /// Rows written so far
    pub rows_written: usize,
    pub total_rows: usize,
    /// Pages started so far
    pub pages: usize,
}

impl ReportProgress {
    /// Share of rows written, `0.0..=1.0`
    pub fn fraction(&self) -> f32 {
        if self.total_rows == 0 {
            1.0
        } else {
            self.rows_written as f32 / self.total_rows as f32
        }
    }
}

/// A report made of a preamble, one table row per item and a closing block
pub trait TabularReport {
    fn kind(&self) -> ReportKind;
    fn title(&self) -> String;
    fn file_name(&self) -> String;
    fn row_count(&self) -> usize;

    /// Everything above the first table row, including the table header
    fn write_preamble(&self, writer: &mut DocumentWriter<'_>);

    fn write_row(&self, writer: &mut DocumentWriter<'_>, index: usize);

    /// Everything after the last row
    fn write_closing(&self, writer: &mut DocumentWriter<'_>);
}

/// Build the whole document in one go
#[instrument(skip_all, fields(kind = ?report.kind(), rows = report.row_count()))]
pub fn assemble<R: TabularReport + ?Sized>(report: &R, layout: &ReportLayout) -> PaginatedDocument {
    let mut writer = DocumentWriter::new(layout);
    report.write_preamble(&mut writer);
    for index in 0..report.row_count() {
        report.write_row(&mut writer, index);
    }
    report.write_closing(&mut writer);

    debug!(pages = writer.page_count(), "Assembled report");
    writer.finish(report.kind(), report.title(), report.file_name())
}

fn send_progress(
    tx: Option<&mpsc::UnboundedSender<ReportProgress>>,
    stage: ReportStage,
    rows_written: usize,
    total_rows: usize,
    pages: usize,
) {
    if let Some(tx) = tx {
        let _ = tx.send(ReportProgress {
            stage,
            rows_written,
            total_rows,
            pages,
        });
    }
}

/// Same output as [`assemble`], yielding to the runtime whenever a page fills
pub async fn assemble_streaming<R: TabularReport + Sync + ?Sized>(
    report: &R,
    layout: &ReportLayout,
    progress: Option<mpsc::UnboundedSender<ReportProgress>>,
) -> PaginatedDocument {
    let tx = progress.as_ref();
    let total_rows = report.row_count();
    let mut writer = DocumentWriter::new(layout);

    report.write_preamble(&mut writer);
    send_progress(tx, ReportStage::Preamble, 0, total_rows, writer.page_count());

    for index in 0..total_rows {
        let pages_before = writer.page_count();
        report.write_row(&mut writer, index);
        if writer.page_count() > pages_before {
            send_progress(tx, ReportStage::Rows, index, total_rows, writer.page_count());
            tokio::task::yield_now().await;
        }
    }
    send_progress(tx, ReportStage::Rows, total_rows, total_rows, writer.page_count());

    report.write_closing(&mut writer);
    send_progress(tx, ReportStage::Closing, total_rows, total_rows, writer.page_count());

    let document = writer.finish(report.kind(), report.title(), report.file_name());
    send_progress(tx, ReportStage::Complete, total_rows, total_rows, document.page_count());
    debug!(pages = document.page_count(), "Streamed report");
    document
}
