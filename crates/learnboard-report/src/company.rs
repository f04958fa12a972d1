//! Company-wide learning progress report

use crate::context::ReportContext;
use crate::document::{PaginatedDocument, ReportKind, TextStyle};
use crate::pipeline::{assemble, assemble_streaming, ReportProgress, TabularReport};
use crate::writer::{DocumentWriter, TableHeader};
use learnboard_analytics::EmployeeSummary;
use learnboard_common::{ContentItem, Employee, EntityId, ProgressRecord};
use learnboard_i18n::FluentValue;
use std::collections::{BTreeMap, HashSet};
use tokio::sync::mpsc;
use tracing::debug;

/// Download name of the company report
pub const COMPANY_REPORT_FILE_NAME: &str = "企業学習進捗レポート.pdf";

#[derive(Debug, Clone, PartialEq, Eq)]
struct CompanyRow {
    name: String,
    summary: EmployeeSummary,
}

/// Builds the company report for a list of employees
#[derive(Debug, Clone)]
pub struct CompanyReportBuilder<'a> {
    ctx: ReportContext<'a>,
    company_name: String,
}

impl<'a> CompanyReportBuilder<'a> {
    pub fn new(ctx: ReportContext<'a>, company_name: impl Into<String>) -> Self {
        Self {
            ctx,
            company_name: company_name.into(),
        }
    }

    fn prepare(
        &self,
        employees: &[Employee],
        progress_by_employee: &BTreeMap<EntityId, Vec<ProgressRecord>>,
        contents: &[ContentItem],
    ) -> CompanyReport<'_> {
        let known: HashSet<&str> = contents.iter().map(|c| c.id.as_str()).collect();
        let mut uncataloged = 0usize;

        let rows = employees
            .iter()
            .map(|employee| {
                let records = progress_by_employee
                    .get(&employee.id)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                uncataloged += records
                    .iter()
                    .filter(|record| !known.contains(record.content_id.as_str()))
                    .count();
                CompanyRow {
                    name: employee.display_name(),
                    summary: EmployeeSummary::from_records(employee.id.clone(), records),
                }
            })
            .collect();

        if uncataloged > 0 {
            debug!(uncataloged, "Company report counts records outside the content catalog");
        }

        CompanyReport { builder: self, rows }
    }

    pub fn build(
        &self,
        employees: &[Employee],
        progress_by_employee: &BTreeMap<EntityId, Vec<ProgressRecord>>,
        contents: &[ContentItem],
    ) -> PaginatedDocument {
        let report = self.prepare(employees, progress_by_employee, contents);
        assemble(&report, self.ctx.layout)
    }

    /// Like [`CompanyReportBuilder::build`], yielding between pages
    pub async fn build_streaming(
        &self,
        employees: &[Employee],
        progress_by_employee: &BTreeMap<EntityId, Vec<ProgressRecord>>,
        contents: &[ContentItem],
        progress: Option<mpsc::UnboundedSender<ReportProgress>>,
    ) -> PaginatedDocument {
        let report = self.prepare(employees, progress_by_employee, contents);
        assemble_streaming(&report, self.ctx.layout, progress).await
    }
}

struct CompanyReport<'b> {
    builder: &'b CompanyReportBuilder<'b>,
    rows: Vec<CompanyRow>,
}

impl CompanyReport<'_> {
    fn ctx(&self) -> &ReportContext<'_> {
        &self.builder.ctx
    }

    fn header(&self) -> TableHeader {
        let ctx = self.ctx();
        TableHeader::new(
            &ctx.layout.company.columns,
            vec![
                ctx.text("report-col-employee"),
                ctx.text("report-col-completed"),
                ctx.text("report-col-in-progress"),
                ctx.text("report-col-total-time"),
            ],
        )
    }

    fn count_line(&self, key: &str, count: u64) -> String {
        self.ctx()
            .text_with(key, &[("count", FluentValue::from(count.to_string()))])
    }
}

impl TabularReport for CompanyReport<'_> {
    fn kind(&self) -> ReportKind {
        ReportKind::Company
    }

    fn title(&self) -> String {
        self.ctx().text("report-company-title")
    }

    fn file_name(&self) -> String {
        COMPANY_REPORT_FILE_NAME.to_string()
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn write_preamble(&self, writer: &mut DocumentWriter<'_>) {
        let ctx = self.ctx();
        let layout = ctx.layout;
        let info = TextStyle::normal(layout.info_font_size);

        writer.title(self.title());
        writer.text(
            layout.left_x,
            layout.company.company_name_y,
            ctx.text_with(
                "report-company-name",
                &[("company", FluentValue::from(self.builder.company_name.as_str()))],
            ),
            info,
        );
        writer.text(
            layout.left_x,
            layout.company.date_y,
            ctx.text_with("report-date", &[("date", FluentValue::from(ctx.report_date()))]),
            info,
        );
        writer.start_table(self.header(), layout.company.header_y);
    }

    fn write_row(&self, writer: &mut DocumentWriter<'_>, index: usize) {
        let row = &self.rows[index];
        let layout = self.ctx().layout;

        let y = writer.next_row();
        writer.row_cells(
            y,
            vec![
                row.name.clone(),
                row.summary.completed.to_string(),
                row.summary.in_progress.to_string(),
                self.ctx().duration(row.summary.total_time_seconds),
            ],
        );
        if index + 1 < self.rows.len() {
            writer.rule(y + layout.header_rule_offset, layout.separator_width);
        }
        writer.end_row();
    }

    fn write_closing(&self, writer: &mut DocumentWriter<'_>) {
        let layout = self.ctx().layout;
        writer.end_table();
        writer.rule(writer.cursor(), layout.header_rule_width);

        let lines = [
            self.count_line("report-total-employees", self.rows.len() as u64),
            self.count_line(
                "report-total-completed",
                self.rows.iter().map(|r| r.summary.completed).sum(),
            ),
            self.count_line(
                "report-total-in-progress",
                self.rows.iter().map(|r| r.summary.in_progress).sum(),
            ),
            self.ctx().text_with(
                "report-total-time",
                &[(
                    "time",
                    FluentValue::from(
                        self.ctx()
                            .duration(self.rows.iter().map(|r| r.summary.total_time_seconds).sum()),
                    ),
                )],
            ),
        ];

        let needed = layout.summary_gap
            + layout.summary_heading_gap
            + layout.summary_line_height * (lines.len() - 1) as f64;
        let mut y = if writer.ensure_room(needed) {
            writer.cursor()
        } else {
            writer.cursor() + layout.summary_gap
        };

        writer.text(
            layout.left_x,
            y,
            self.ctx().text("report-summary"),
            TextStyle::bold(layout.table_font_size),
        );
        y += layout.summary_heading_gap;

        let style = TextStyle::normal(layout.table_font_size);
        for line in lines {
            writer.text(layout.left_x, y, line, style);
            y += layout.summary_line_height;
        }
        writer.set_cursor(y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnboard_analytics::TimeContext;
    use learnboard_common::test_utils::{content, employee, mock_timestamp, RecordBuilder};
    use learnboard_common::ContentType;
    use learnboard_config::ReportLayout;
    use learnboard_i18n::{Locale, Translator};

    struct Fixture {
        translator: Translator,
        layout: ReportLayout,
        time: TimeContext,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                translator: Translator::new(Locale::Japanese).unwrap(),
                layout: ReportLayout::default(),
                time: TimeContext::new(mock_timestamp(2024, 6, 15, 3, 0, 0), chrono_tz::Asia::Tokyo),
            }
        }

        fn builder(&self) -> CompanyReportBuilder<'_> {
            let ctx = ReportContext::new(&self.translator, Locale::Japanese, &self.layout, &self.time);
            CompanyReportBuilder::new(ctx, "Acme")
        }
    }

    fn staff(count: usize) -> Vec<Employee> {
        (0..count)
            .map(|i| employee(&format!("e{i}"), "Taro", &format!("Yamada{i}")))
            .collect()
    }

    #[test]
    fn test_first_page_layout() {
        let fixture = Fixture::new();
        let employees = staff(2);
        let contents = vec![content("c1", ContentType::Video)];
        let progress = BTreeMap::from([(
            "e0".to_string(),
            vec![
                RecordBuilder::new("e0", "c1")
                    .completed(mock_timestamp(2024, 6, 1, 0, 0, 0))
                    .time_spent(9000)
                    .build(),
                RecordBuilder::new("e0", "ghost").in_progress(10).build(),
            ],
        )]);

        let doc = fixture.builder().build(&employees, &progress, &contents);
        assert_eq!(doc.file_name, COMPANY_REPORT_FILE_NAME);
        assert_eq!(doc.page_count(), 1);

        let page = &doc.pages[0];
        let title = page.find_text("企業学習進捗レポート").unwrap();
        assert_eq!((title.x, title.y), (105.0, 20.0));
        assert_eq!(page.find_text("会社名: Acme").unwrap().y, 40.0);
        assert_eq!(page.find_text("報告日: 2024/6/15").unwrap().y, 50.0);
        assert_eq!(page.find_text("従業員名").unwrap().y, 70.0);

        let first = page.find_text("Yamada0 Taro").unwrap();
        assert_eq!(first.y, 80.0);
        assert_eq!(page.find_text("2時間30分").unwrap().y, 80.0);

        // header rule, one separator, bottom rule
        let rules: Vec<_> = page.rules().collect();
        assert_eq!(rules.len(), 3);
        assert_eq!((rules[1].y, rules[1].width), (82.0, 0.1));
        assert_eq!((rules[2].y, rules[2].width), (100.0, 0.5));

        assert_eq!(page.find_text("サマリー").unwrap().y, 115.0);
        assert_eq!(page.find_text("総従業員数: 2").unwrap().y, 125.0);
        assert_eq!(page.find_text("総学習中コース数: 1").unwrap().y, 141.0);
        assert_eq!(page.find_text("総学習時間: 2時間30分").unwrap().y, 149.0);
    }

    #[test]
    fn test_uncataloged_records_still_count() {
        let fixture = Fixture::new();
        let employees = staff(1);
        let progress = BTreeMap::from([(
            "e0".to_string(),
            vec![RecordBuilder::new("e0", "ghost")
                .in_progress(40)
                .time_spent(3600)
                .build()],
        )]);

        let doc = fixture.builder().build(&employees, &progress, &[]);
        let page = &doc.pages[0];
        let row: Vec<&str> = page
            .texts()
            .filter(|cell| cell.y == 80.0)
            .map(|cell| cell.text.as_str())
            .collect();
        assert_eq!(row, vec!["Yamada0 Taro", "0", "1", "1時間0分"]);
        assert!(page.find_text("総学習中コース数: 1").is_some());
        assert!(page.find_text("総学習時間: 1時間0分").is_some());
    }

    #[test]
    fn test_twenty_one_rows_span_two_pages() {
        let fixture = Fixture::new();
        let employees = staff(21);
        let doc = fixture.builder().build(&employees, &BTreeMap::new(), &[]);

        assert_eq!(doc.page_count(), 2);
        let first = &doc.pages[0];
        assert_eq!(first.find_text("Yamada19 Taro").unwrap().y, 270.0);

        let second = &doc.pages[1];
        let header = second.texts().next().unwrap();
        assert_eq!((header.text.as_str(), header.y), ("従業員名", 20.0));
        assert_eq!(second.find_text("Yamada20 Taro").unwrap().y, 30.0);
        assert!(first.find_text("Yamada20 Taro").is_none());
    }

    #[test]
    fn test_summary_moves_to_fresh_page_when_it_does_not_fit() {
        let fixture = Fixture::new();
        // last row at y 270, bottom rule at 280
        let doc = fixture.builder().build(&staff(20), &BTreeMap::new(), &[]);

        assert_eq!(doc.page_count(), 2);
        let summary_page = &doc.pages[1];
        assert!(summary_page.find_text("従業員名").is_none());
        assert_eq!(summary_page.find_text("サマリー").unwrap().y, 20.0);
        assert_eq!(summary_page.find_text("総従業員数: 20").unwrap().y, 30.0);
    }

    #[test]
    fn test_empty_roster_still_has_table_and_summary() {
        let fixture = Fixture::new();
        let doc = fixture.builder().build(&[], &BTreeMap::new(), &[]);
        let page = &doc.pages[0];
        assert_eq!(page.rules().count(), 2);
        assert!(page.find_text("総従業員数: 0").is_some());
        assert!(page.find_text("総学習時間: 0時間0分").is_some());
    }

    #[tokio::test]
    async fn test_streaming_matches_blocking_build() {
        let fixture = Fixture::new();
        let employees = staff(45);
        let builder = fixture.builder();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let streamed = builder
            .build_streaming(&employees, &BTreeMap::new(), &[], Some(tx))
            .await;
        let blocking = builder.build(&employees, &BTreeMap::new(), &[]);
        assert_eq!(streamed, blocking);

        let mut updates = Vec::new();
        while let Some(update) = rx.recv().await {
            updates.push(update);
        }
        let last = updates.last().unwrap();
        assert_eq!(last.stage, crate::pipeline::ReportStage::Complete);
        assert_eq!(last.pages, blocking.page_count());
        assert_eq!(last.fraction(), 1.0);
    }
}
