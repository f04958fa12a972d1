//! Renderer-independent document model.
//!
//! Coordinates are millimetres on the page, y growing downwards, and a text
//! cell's `y` is its baseline.

use serde::{Deserialize, Serialize};

/// Which report a document is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Company,
    Employee,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Left,
    /// `x` is the horizontal centre of the text
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_size: f64,
    pub bold: bool,
    pub align: Align,
}

impl TextStyle {
    pub fn normal(font_size: f64) -> Self {
        Self {
            font_size,
            bold: false,
            align: Align::Left,
        }
    }

    pub fn bold(font_size: f64) -> Self {
        Self {
            bold: true,
            ..Self::normal(font_size)
        }
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextCell {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub style: TextStyle,
}

/// A horizontal line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub x_start: f64,
    pub x_end: f64,
    pub y: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Text(TextCell),
    Rule(Rule),
}

/// One page, elements in drawing order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based
    pub number: usize,
    pub elements: Vec<Element>,
}

impl Page {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            elements: Vec::new(),
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextCell> {
        self.elements.iter().filter_map(|element| match element {
            Element::Text(cell) => Some(cell),
            Element::Rule(_) => None,
        })
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.elements.iter().filter_map(|element| match element {
            Element::Rule(rule) => Some(rule),
            Element::Text(_) => None,
        })
    }

    /// First text cell whose content equals `text`
    pub fn find_text(&self, text: &str) -> Option<&TextCell> {
        self.texts().find(|cell| cell.text == text)
    }
}

/// A finished report, ready for any [`DocumentRenderer`](crate::DocumentRenderer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedDocument {
    pub kind: ReportKind,
    pub title: String,
    /// Suggested download name
    pub file_name: String,
    pub pages: Vec<Page>,
}

impl PaginatedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
