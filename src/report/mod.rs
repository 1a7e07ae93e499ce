pub mod report_model;
pub mod text;

pub use report_model::{FeasibilityReport, ReportMeta};
pub use text::generate_text_report;
