//! Configuration management for learnboard

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{
    AnalyticsConfig, CompanyReportLayout, Config, EmployeeReportLayout, ExportConfig,
    LoggingSettings, ReportLayout,
};
