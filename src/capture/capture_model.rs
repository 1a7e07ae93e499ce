use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::element::ElementSnapshot;

// ============================================================================
// Scan capture (wire contract)
// ============================================================================

/// Everything the rendering collaborator materialized for one scan: the
/// crawled pages in crawl order, each with its element snapshots in DOM
/// query order. The engine folds this without further I/O.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanCapture {
    #[serde(rename = "siteUrl")]
    pub site_url: String,
    pub pages: Vec<PageCapture>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageCapture {
    pub url: String,
    pub buttons: Vec<ElementSnapshot>,
    pub inputs: Vec<ElementSnapshot>,
    pub links: Vec<ElementSnapshot>,
    /// Unique class tokens seen anywhere on the page.
    #[serde(rename = "pageClasses")]
    pub page_classes: Vec<String>,
    pub iframes: Vec<IframeCapture>,
    #[serde(rename = "shadowHosts")]
    pub shadow_hosts: Vec<ShadowHostCapture>,
    pub canvases: Vec<CanvasCapture>,
    /// Boolean results of the collaborator's software probes, keyed by the
    /// probe names in the signature tables.
    pub probes: BTreeMap<String, bool>,
    #[serde(rename = "metaGenerator")]
    pub meta_generator: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IframeCapture {
    /// Resolved src, empty when the iframe carries none.
    pub src: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowHostCapture {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasCapture {
    pub id: Option<String>,
    pub width: f64,
    pub height: f64,
    pub classes: Option<String>,
}
