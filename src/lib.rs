pub mod capture;
pub mod cli;
pub mod element;
pub mod patterns;
pub mod report;
pub mod scan;

pub use capture::capture_model::ScanCapture;
pub use capture::loader::{CaptureError, load_capture};
pub use report::report_model::FeasibilityReport;
pub use scan::score::{AggregateScore, RiskLevel, ScoreConfig};
pub use scan::session::ScanSession;

/// Analyse a parsed capture end to end with default scoring.
pub fn analyze_capture(capture: &ScanCapture) -> (ScanSession, AggregateScore) {
    let session = ScanSession::from_capture(capture);
    let score = AggregateScore::compute(&session.pages, &ScoreConfig::default());
    (session, score)
}
