//! # Learnboard Report
//!
//! Paginated company and employee progress reports as a renderer-independent
//! document model, plus text and JSON renderers and file export.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod company;
pub mod context;
pub mod document;
pub mod employee;
pub mod export;
pub mod pipeline;
pub mod render;
pub mod writer;

pub use company::{CompanyReportBuilder, COMPANY_REPORT_FILE_NAME};
pub use context::ReportContext;
pub use document::{Align, Element, Page, PaginatedDocument, ReportKind, Rule, TextCell, TextStyle};
pub use employee::{employee_report_file_name, EmployeeReportBuilder};
pub use export::ReportExporter;
pub use pipeline::{assemble, assemble_streaming, ReportProgress, ReportStage, TabularReport};
pub use render::{DocumentRenderer, JsonRenderer, TextRenderer};
pub use writer::{DocumentWriter, TableHeader};
