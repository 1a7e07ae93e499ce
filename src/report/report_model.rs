use serde::{Deserialize, Serialize};
use url::Url;

use crate::patterns::signatures::SoftwareSummary;
use crate::scan::page_analysis::PageAnalysis;
use crate::scan::session::ScanSession;

// ============================================================================
// Structured report
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    pub site: String,
    pub domain: String,
    pub pages_analysed: usize,
    pub timestamp: String,
}

/// Machine-readable report. Serialized as JSON for downstream tooling;
/// deserializing it back yields an equal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityReport {
    pub meta: ReportMeta,
    pub software: SoftwareSummary,
    pub pages: Vec<PageAnalysis>,
}

impl FeasibilityReport {
    pub fn from_session(session: &ScanSession, timestamp: &str) -> Self {
        FeasibilityReport {
            meta: ReportMeta {
                site: session.site_url.clone(),
                domain: domain_of(&session.site_url),
                pages_analysed: session.pages.len(),
                timestamp: timestamp.to_string(),
            },
            software: session.software.clone(),
            pages: session.pages.clone(),
        }
    }
}

fn domain_of(url: &str) -> String {
    Url::parse(url)
        .map(|parsed| parsed.authority().to_string())
        .unwrap_or_default()
}
