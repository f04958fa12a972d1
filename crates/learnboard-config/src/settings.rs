//! Application configuration structures

use chrono_tz::Tz;
use learnboard_common::LoggingConfig;
use learnboard_i18n::Locale;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Locale for every chart and report label
    pub locale: Locale,

    /// IANA time zone used for local hours, dates and month boundaries
    pub timezone: Tz,

    /// Aggregation tunables
    #[validate(nested)]
    pub analytics: AnalyticsConfig,

    /// Report page geometry, in millimetres
    #[validate(nested)]
    pub report: ReportLayout,

    /// Report export settings
    #[validate(nested)]
    pub export: ExportConfig,

    /// Logging configuration
    #[validate(nested)]
    pub logging: LoggingSettings,
}

/// Aggregation tunables
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Seconds of learning time that count as one hour in the time-of-day chart
    #[validate(range(min = 60, max = 86400, message = "Smoothing window must be between 60 and 86400 seconds"))]
    pub smoothing_window_seconds: u64,

    /// Share of an access hour's value also credited to the following hour
    #[validate(range(min = 0.0, max = 1.0, message = "Next-hour weight must be between 0 and 1"))]
    pub next_hour_weight: f64,

    /// Upper bounds (exclusive) of calendar activity levels 1, 2 and 3
    pub activity_thresholds_seconds: [u64; 3],

    /// Days an invitation stays valid after it is (re)sent
    #[validate(range(min = 1, max = 365, message = "Invitation validity must be between 1 and 365 days"))]
    pub invitation_validity_days: i64,

    /// Maximum characters of a course title in report tables
    #[validate(range(min = 1, max = 200, message = "Title length must be between 1 and 200 characters"))]
    pub max_title_chars: usize,
}

/// Page geometry shared by both report kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ReportLayout {
    #[validate(range(min = 50.0, message = "Page width must be at least 50mm"))]
    pub page_width: f64,
    #[validate(range(min = 50.0, message = "Page height must be at least 50mm"))]
    pub page_height: f64,
    pub bottom_margin: f64,
    pub left_x: f64,
    pub right_x: f64,
    pub title_y: f64,
    #[validate(range(min = 1.0, message = "Row height must be at least 1mm"))]
    pub row_height: f64,
    /// A row starting below this cursor position goes to a new page
    pub max_row_y: f64,
    pub continuation_header_y: f64,
    pub header_rule_offset: f64,
    pub header_rule_width: f64,
    pub separator_width: f64,
    pub summary_gap: f64,
    pub summary_heading_gap: f64,
    pub summary_line_height: f64,
    pub title_font_size: f64,
    pub info_font_size: f64,
    pub heading_font_size: f64,
    pub table_font_size: f64,
    #[validate(nested)]
    pub company: CompanyReportLayout,
    #[validate(nested)]
    pub employee: EmployeeReportLayout,
}

/// Positions specific to the company report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CompanyReportLayout {
    pub company_name_y: f64,
    pub date_y: f64,
    pub header_y: f64,
    /// x of the name, completed, in-progress and total-time columns
    pub columns: [f64; 4],
}

/// Positions specific to the per-employee report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct EmployeeReportLayout {
    pub name_y: f64,
    pub email_y: f64,
    pub date_y: f64,
    pub summary_heading_y: f64,
    pub summary_first_line_y: f64,
    pub summary_line_height: f64,
    pub details_heading_y: f64,
    pub header_y: f64,
    /// x of the title, status, progress and time columns
    pub columns: [f64; 4],
}

/// Report export settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory rendered reports are written to
    #[validate(custom(function = "crate::validation::validate_file_path", message = "Output directory contains invalid characters"))]
    pub output_dir: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[validate(custom(function = "crate::validation::validate_log_level", message = "Log level must be one of: trace, debug, info, warn, error"))]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,

    /// Optional log file path
    pub file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            timezone: chrono_tz::Asia::Tokyo,
            analytics: AnalyticsConfig::default(),
            report: ReportLayout::default(),
            export: ExportConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Config {
    /// Comprehensive validation of the entire configuration
    pub fn validate_all(&self) -> Result<(), ValidationErrors> {
        self.validate()?;

        let mut errors = ValidationErrors::new();
        if let Err(err) =
            crate::validation::validate_thresholds(&self.analytics.activity_thresholds_seconds)
        {
            errors.add("activity_thresholds_seconds", err);
        }
        for (field, err) in self.report.geometry_errors() {
            errors.add(field, err);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            smoothing_window_seconds: 7200,
            next_hour_weight: 0.5,
            activity_thresholds_seconds: [1800, 3600, 7200],
            invitation_validity_days: 30,
            max_title_chars: 40,
        }
    }
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            bottom_margin: 10.0,
            left_x: 20.0,
            right_x: 190.0,
            title_y: 20.0,
            row_height: 10.0,
            max_row_y: 270.0,
            continuation_header_y: 20.0,
            header_rule_offset: 2.0,
            header_rule_width: 0.5,
            separator_width: 0.1,
            summary_gap: 15.0,
            summary_heading_gap: 10.0,
            summary_line_height: 8.0,
            title_font_size: 18.0,
            info_font_size: 12.0,
            heading_font_size: 14.0,
            table_font_size: 10.0,
            company: CompanyReportLayout::default(),
            employee: EmployeeReportLayout::default(),
        }
    }
}

impl ReportLayout {
    /// Horizontal centre of the page, where titles are anchored
    pub fn center_x(&self) -> f64 {
        self.page_width / 2.0
    }

    /// Lowest y a line of text may occupy
    pub fn content_bottom(&self) -> f64 {
        self.page_height - self.bottom_margin
    }

    /// Relational checks the derive cannot express
    fn geometry_errors(&self) -> Vec<(&'static str, validator::ValidationError)> {
        use crate::validation::{validate_columns, validate_vertical_order};

        let mut errors = Vec::new();
        if let Err(err) = validate_vertical_order(&[
            self.continuation_header_y,
            self.max_row_y,
            self.content_bottom(),
            self.page_height,
        ]) {
            errors.push(("max_row_y", err));
        }
        if let Err(err) = validate_columns(&self.company.columns, self.left_x, self.right_x) {
            errors.push(("company.columns", err));
        }
        if let Err(err) = validate_columns(&self.employee.columns, self.left_x, self.right_x) {
            errors.push(("employee.columns", err));
        }
        if let Err(err) = validate_vertical_order(&[
            self.company.header_y,
            self.max_row_y,
        ]) {
            errors.push(("company.header_y", err));
        }
        if let Err(err) = validate_vertical_order(&[
            self.employee.summary_first_line_y,
            self.employee.details_heading_y,
            self.employee.header_y,
            self.max_row_y,
        ]) {
            errors.push(("employee.header_y", err));
        }
        if self.right_x > self.page_width {
            errors.push((
                "right_x",
                validator::ValidationError::new("right_x_outside_page"),
            ));
        }
        errors
    }
}

impl Default for CompanyReportLayout {
    fn default() -> Self {
        Self {
            company_name_y: 40.0,
            date_y: 50.0,
            header_y: 70.0,
            columns: [20.0, 100.0, 130.0, 170.0],
        }
    }
}

impl Default for EmployeeReportLayout {
    fn default() -> Self {
        Self {
            name_y: 40.0,
            email_y: 50.0,
            date_y: 70.0,
            summary_heading_y: 90.0,
            summary_first_line_y: 100.0,
            summary_line_height: 10.0,
            details_heading_y: 150.0,
            header_y: 160.0,
            columns: [20.0, 100.0, 140.0, 170.0],
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: "reports".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl LoggingSettings {
    /// Translate into the subscriber configuration used by `init_logging`
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.clone(),
            json_format: self.json,
            pretty_format: !self.json,
            file_path: self.file.clone(),
            ..LoggingConfig::default()
        }
    }
}
