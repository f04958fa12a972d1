//! Cursor-based page writer with table pagination

use crate::document::{Element, Page, PaginatedDocument, ReportKind, Rule, TextCell, TextStyle};
use learnboard_config::ReportLayout;
use tracing::trace;

/// Column positions and header labels of a table
#[derive(Debug, Clone, PartialEq)]
pub struct TableHeader {
    pub columns: Vec<(f64, String)>,
}

impl TableHeader {
    pub fn new(xs: &[f64], labels: Vec<String>) -> Self {
        Self {
            columns: xs.iter().copied().zip(labels).collect(),
        }
    }
}

/// Appends elements to pages, tracking a vertical cursor.
///
/// While a table is open, [`DocumentWriter::next_row`] starts a new page once
/// the cursor passes `max_row_y` and repeats the header there.
#[derive(Debug)]
pub struct DocumentWriter<'a> {
    layout: &'a ReportLayout,
    pages: Vec<Page>,
    cursor: f64,
    table: Option<TableHeader>,
}

impl<'a> DocumentWriter<'a> {
    pub fn new(layout: &'a ReportLayout) -> Self {
        Self {
            layout,
            pages: vec![Page::new(1)],
            cursor: layout.title_y,
            table: None,
        }
    }

    pub fn layout(&self) -> &ReportLayout {
        self.layout
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    pub fn set_cursor(&mut self, y: f64) {
        self.cursor = y;
    }

    fn push(&mut self, element: Element) {
        if let Some(page) = self.pages.last_mut() {
            page.elements.push(element);
        }
    }

    pub fn text(&mut self, x: f64, y: f64, text: impl Into<String>, style: TextStyle) {
        self.push(Element::Text(TextCell {
            x,
            y,
            text: text.into(),
            style,
        }));
    }

    /// Full-width rule between the left and right bounds
    pub fn rule(&mut self, y: f64, width: f64) {
        self.push(Element::Rule(Rule {
            x_start: self.layout.left_x,
            x_end: self.layout.right_x,
            y,
            width,
        }));
    }

    /// Bold title centred on the page
    pub fn title(&mut self, text: impl Into<String>) {
        let style = TextStyle::bold(self.layout.title_font_size).centered();
        self.text(self.layout.center_x(), self.layout.title_y, text, style);
    }

    pub fn new_page(&mut self) {
        let number = self.pages.len() + 1;
        trace!(page = number, "Starting page");
        self.pages.push(Page::new(number));
        self.cursor = self.layout.continuation_header_y;
    }

    fn emit_header(&mut self, header: &TableHeader, y: f64) {
        let style = TextStyle::bold(self.layout.table_font_size);
        for (x, label) in &header.columns {
            self.text(*x, y, label.clone(), style);
        }
        self.rule(y + self.layout.header_rule_offset, self.layout.header_rule_width);
    }

    /// Write the table header at `y`; rows follow one row height below
    pub fn start_table(&mut self, header: TableHeader, y: f64) {
        self.emit_header(&header, y);
        self.cursor = y + self.layout.row_height;
        self.table = Some(header);
    }

    /// Baseline for the next row, breaking the page first if needed
    pub fn next_row(&mut self) -> f64 {
        if self.cursor > self.layout.max_row_y {
            self.new_page();
            if let Some(header) = self.table.take() {
                let y = self.layout.continuation_header_y;
                self.emit_header(&header, y);
                self.cursor = y + self.layout.row_height;
                self.table = Some(header);
            }
        }
        self.cursor
    }

    /// One cell per column at `y`
    pub fn row_cells(&mut self, y: f64, cells: Vec<String>) {
        let style = TextStyle::normal(self.layout.table_font_size);
        let xs: Vec<f64> = self
            .table
            .as_ref()
            .map(|header| header.columns.iter().map(|(x, _)| *x).collect())
            .unwrap_or_default();
        for (x, text) in xs.into_iter().zip(cells) {
            self.text(x, y, text, style);
        }
    }

    pub fn end_row(&mut self) {
        self.cursor += self.layout.row_height;
    }

    pub fn end_table(&mut self) {
        self.table = None;
    }

    /// Move to a fresh page unless `height` more millimetres fit below the cursor.
    ///
    /// Returns whether a page break happened.
    pub fn ensure_room(&mut self, height: f64) -> bool {
        if self.cursor + height > self.layout.content_bottom() {
            self.new_page();
            true
        } else {
            false
        }
    }

    pub fn finish(
        self,
        kind: ReportKind,
        title: impl Into<String>,
        file_name: impl Into<String>,
    ) -> PaginatedDocument {
        PaginatedDocument {
            kind,
            title: title.into(),
            file_name: file_name.into(),
            pages: self.pages,
        }
    }
}
