//! Document renderers.
//!
//! Turning a [`PaginatedDocument`] into bytes is pluggable; PDF output is
//! left to an external renderer implementing [`DocumentRenderer`].

use crate::document::{Align, Element, Page, PaginatedDocument};
use learnboard_common::Result;
use std::collections::BTreeMap;

/// Renders a document into a byte stream
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, document: &PaginatedDocument) -> Result<Vec<u8>>;

    /// File extension of the rendered output, without the dot
    fn extension(&self) -> &'static str;
}

/// Plain text at a fixed column pitch, one form feed between pages
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    /// Millimetres per character column
    pub mm_per_column: f64,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self { mm_per_column: 2.0 }
    }
}

enum Mark<'a> {
    Text { column: usize, text: &'a str },
    Rule { from: usize, to: usize, heavy: bool },
}

impl TextRenderer {
    fn column(&self, x: f64) -> usize {
        (x / self.mm_per_column).round().max(0.0) as usize
    }

    fn render_page(&self, page: &Page) -> String {
        // hundredths of a millimetre keep equal baselines on one line
        let mut lines: BTreeMap<i64, Vec<Mark<'_>>> = BTreeMap::new();
        for element in &page.elements {
            let (y, mark) = match element {
                Element::Text(cell) => {
                    let width = cell.text.chars().count();
                    let column = match cell.style.align {
                        Align::Left => self.column(cell.x),
                        Align::Center => self.column(cell.x).saturating_sub(width / 2),
                    };
                    (cell.y, Mark::Text { column, text: &cell.text })
                }
                Element::Rule(rule) => (
                    rule.y,
                    Mark::Rule {
                        from: self.column(rule.x_start),
                        to: self.column(rule.x_end),
                        heavy: rule.width >= 0.5,
                    },
                ),
            };
            lines.entry((y * 100.0).round() as i64).or_default().push(mark);
        }

        let mut out = String::new();
        for marks in lines.values_mut() {
            marks.sort_by_key(|mark| match mark {
                Mark::Text { column, .. } => *column,
                Mark::Rule { from, .. } => *from,
            });
            let mut line = String::new();
            for mark in marks.iter() {
                let (column, content) = match mark {
                    Mark::Text { column, text } => (*column, (*text).to_string()),
                    Mark::Rule { from, to, heavy } => {
                        let ch = if *heavy { '=' } else { '-' };
                        (*from, ch.to_string().repeat(to.saturating_sub(*from)))
                    }
                };
                let len = line.chars().count();
                if len < column {
                    line.push_str(&" ".repeat(column - len));
                } else if len > 0 {
                    line.push(' ');
                }
                line.push_str(&content);
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

impl DocumentRenderer for TextRenderer {
    fn render(&self, document: &PaginatedDocument) -> Result<Vec<u8>> {
        let pages: Vec<String> = document.pages.iter().map(|p| self.render_page(p)).collect();
        Ok(pages.join("\u{c}\n").into_bytes())
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}

/// The document model as pretty-printed JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl DocumentRenderer for JsonRenderer {
    fn render(&self, document: &PaginatedDocument) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(document)?)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
