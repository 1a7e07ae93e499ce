use crate::capture::capture_model::{PageCapture, ScanCapture};
use crate::patterns::signatures::{detect_software, SoftwareSummary};
use crate::scan::page_analysis::PageAnalysis;

// ============================================================================
// Scan session
// ============================================================================

/// Accumulates one site scan: per-page analyses in crawl order plus the
/// software detections merged across pages. Plain value, owned by the
/// caller; the engine keeps no process-wide state.
#[derive(Debug, Clone, Default)]
pub struct ScanSession {
    pub site_url: String,
    pub pages: Vec<PageAnalysis>,
    pub software: SoftwareSummary,
}

impl ScanSession {
    pub fn new(site_url: &str) -> Self {
        ScanSession {
            site_url: site_url.to_string(),
            ..Default::default()
        }
    }

    /// Fold one captured page into the session.
    pub fn record_page(&mut self, capture: &PageCapture) {
        let detected = detect_software(&capture.probes, &capture.meta_generator);
        self.software.merge(&detected);
        self.pages.push(PageAnalysis::from_capture(capture));
    }

    /// Analyse a whole capture in page order.
    pub fn from_capture(capture: &ScanCapture) -> Self {
        let mut session = ScanSession::new(&capture.site_url);
        for page in &capture.pages {
            session.record_page(page);
        }
        session
    }
}
