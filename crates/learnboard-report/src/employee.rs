//! Individual employee learning report

use crate::context::ReportContext;
use crate::document::{PaginatedDocument, ReportKind, TextStyle};
use crate::pipeline::{assemble, assemble_streaming, ReportProgress, TabularReport};
use crate::writer::{DocumentWriter, TableHeader};
use learnboard_analytics::EmployeeSummary;
use learnboard_common::{truncate_chars, ContentItem, Employee, ProgressRecord, ProgressStatus};
use learnboard_i18n::FluentValue;
use std::collections::HashMap;
use tokio::sync::mpsc;

/// Download name of an employee's report, family name first
pub fn employee_report_file_name(employee: &Employee) -> String {
    format!("学習進捗レポート_{}{}.pdf", employee.last_name, employee.first_name)
}

/// Builds the report of a single employee
#[derive(Debug, Clone)]
pub struct EmployeeReportBuilder<'a> {
    ctx: ReportContext<'a>,
    max_title_chars: usize,
}

impl<'a> EmployeeReportBuilder<'a> {
    pub fn new(ctx: ReportContext<'a>, max_title_chars: usize) -> Self {
        Self {
            ctx,
            max_title_chars,
        }
    }

    fn prepare<'r>(
        &'r self,
        employee: &'r Employee,
        records: &'r [ProgressRecord],
        contents: &'r [ContentItem],
    ) -> EmployeeReport<'r> {
        let catalog: HashMap<&str, &ContentItem> =
            contents.iter().map(|c| (c.id.as_str(), c)).collect();
        let courses = records
            .iter()
            .filter_map(|record| {
                catalog
                    .get(record.content_id.as_str())
                    .map(|content| (*content, record))
            })
            .collect();

        EmployeeReport {
            builder: self,
            employee,
            summary: EmployeeSummary::from_records(employee.id.clone(), records),
            courses,
        }
    }

    pub fn build(
        &self,
        employee: &Employee,
        records: &[ProgressRecord],
        contents: &[ContentItem],
    ) -> PaginatedDocument {
        let report = self.prepare(employee, records, contents);
        assemble(&report, self.ctx.layout)
    }

    /// Like [`EmployeeReportBuilder::build`], yielding between pages
    pub async fn build_streaming(
        &self,
        employee: &Employee,
        records: &[ProgressRecord],
        contents: &[ContentItem],
        progress: Option<mpsc::UnboundedSender<ReportProgress>>,
    ) -> PaginatedDocument {
        let report = self.prepare(employee, records, contents);
        assemble_streaming(&report, self.ctx.layout, progress).await
    }
}

struct EmployeeReport<'r> {
    builder: &'r EmployeeReportBuilder<'r>,
    employee: &'r Employee,
    summary: EmployeeSummary,
    /// Records whose content is in the catalog, in record order
    courses: Vec<(&'r ContentItem, &'r ProgressRecord)>,
}

impl EmployeeReport<'_> {
    fn ctx(&self) -> &ReportContext<'_> {
        &self.builder.ctx
    }

    fn status_label(&self, status: ProgressStatus) -> String {
        self.ctx().text(match status {
            ProgressStatus::Completed => "status-completed",
            ProgressStatus::InProgress => "status-in-progress",
            ProgressStatus::NotStarted => "status-not-started",
        })
    }

    fn arg_line(&self, key: &str, name: &str, value: String) -> String {
        self.ctx().text_with(key, &[(name, FluentValue::from(value))])
    }
}

impl TabularReport for EmployeeReport<'_> {
    fn kind(&self) -> ReportKind {
        ReportKind::Employee
    }

    fn title(&self) -> String {
        self.ctx().text("report-employee-title")
    }

    fn file_name(&self) -> String {
        employee_report_file_name(self.employee)
    }

    fn row_count(&self) -> usize {
        self.courses.len()
    }

    fn write_preamble(&self, writer: &mut DocumentWriter<'_>) {
        let ctx = self.ctx();
        let layout = ctx.layout;
        let own = &layout.employee;
        let info = TextStyle::normal(layout.info_font_size);
        let heading = TextStyle::bold(layout.heading_font_size);

        writer.title(self.title());
        writer.text(
            layout.left_x,
            own.name_y,
            self.arg_line("report-employee-name", "name", self.employee.display_name()),
            info,
        );
        writer.text(
            layout.left_x,
            own.email_y,
            self.arg_line("report-employee-email", "email", self.employee.email.clone()),
            info,
        );
        writer.text(
            layout.left_x,
            own.date_y,
            self.arg_line("report-generated", "date", ctx.report_date()),
            info,
        );

        writer.text(
            layout.left_x,
            own.summary_heading_y,
            ctx.text("report-learning-summary"),
            heading,
        );
        let summary_lines = [
            self.arg_line("report-completed-courses", "count", self.summary.completed.to_string()),
            self.arg_line(
                "report-in-progress-courses",
                "count",
                self.summary.in_progress.to_string(),
            ),
            self.arg_line(
                "report-total-time",
                "time",
                ctx.duration(self.summary.total_time_seconds),
            ),
            self.arg_line("report-average-score", "score", self.summary.average_score.to_string()),
        ];
        let mut y = own.summary_first_line_y;
        for line in summary_lines {
            writer.text(layout.left_x, y, line, info);
            y += own.summary_line_height;
        }

        writer.text(
            layout.left_x,
            own.details_heading_y,
            ctx.text("report-course-details"),
            heading,
        );
        writer.start_table(
            TableHeader::new(
                &own.columns,
                vec![
                    ctx.text("report-col-course"),
                    ctx.text("report-col-status"),
                    ctx.text("report-col-progress"),
                    ctx.text("report-col-time"),
                ],
            ),
            own.header_y,
        );
    }

    fn write_row(&self, writer: &mut DocumentWriter<'_>, index: usize) {
        let (content, record) = self.courses[index];
        let y = writer.next_row();
        writer.row_cells(
            y,
            vec![
                truncate_chars(&content.title, self.builder.max_title_chars).to_string(),
                self.status_label(record.status),
                format!("{}%", record.progress_percentage),
                self.ctx().duration(record.time_spent_seconds),
            ],
        );
        writer.end_row();
    }

    fn write_closing(&self, writer: &mut DocumentWriter<'_>) {
        writer.end_table();
    }
}
