use serde::{Deserialize, Serialize};
use url::Url;

use crate::capture::capture_model::{CanvasCapture, IframeCapture, PageCapture, ShadowHostCapture};
use crate::patterns::classify_class;
use crate::scan::tally::{class_prefix_note, CategoryTally};

pub const MAX_PAGE_CLASS_EXAMPLES: usize = 15;
pub const MAX_SHADOW_HOST_DESCRIPTIONS: usize = 5;
pub const MAX_CANVAS_DIMENSIONS: usize = 5;

// ============================================================================
// Structural findings
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IframeFinding {
    pub src: String,
    pub page_url: String,
    pub is_cross_origin: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowDomFinding {
    pub count: usize,
    pub page_url: String,
    /// Host descriptions, e.g. `chat-widget#support` or `user-card.profile`.
    pub element_tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasFinding {
    pub count: usize,
    pub page_url: String,
    /// `WxH` descriptions with an id or class hint when one exists.
    pub dimensions: Vec<String>,
}

// ============================================================================
// Page analysis
// ============================================================================

/// Everything the engine derives from one captured page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageAnalysis {
    pub url: String,
    pub buttons: CategoryTally,
    pub inputs: CategoryTally,
    pub links: CategoryTally,
    /// Count of every dynamic class seen in the page-wide stylesheet scan,
    /// not just the ones kept as examples.
    pub dynamic_class_count: usize,
    pub dynamic_class_examples: Vec<(String, String)>,
    pub iframes: Vec<IframeFinding>,
    pub shadow_dom: Option<ShadowDomFinding>,
    pub canvas: Option<CanvasFinding>,
}

impl PageAnalysis {
    pub fn from_capture(capture: &PageCapture) -> Self {
        let mut page = PageAnalysis {
            url: capture.url.clone(),
            ..Default::default()
        };

        for snap in &capture.buttons {
            page.buttons.record(snap);
        }
        for snap in &capture.inputs {
            page.inputs.record(snap);
        }
        for snap in &capture.links {
            page.links.record(snap);
        }

        let (count, examples) = classify_page_classes(&capture.page_classes);
        page.dynamic_class_count = count;
        page.dynamic_class_examples = examples;

        page.iframes = capture
            .iframes
            .iter()
            .map(|frame| resolve_iframe(frame, &capture.url))
            .collect();
        page.shadow_dom = summarize_shadow_hosts(&capture.shadow_hosts, &capture.url);
        page.canvas = summarize_canvases(&capture.canvases, &capture.url);

        page
    }
}

/// Classify every class token found in the page-wide scan. The count covers
/// all dynamic tokens; only the first few become examples.
fn classify_page_classes(tokens: &[String]) -> (usize, Vec<(String, String)>) {
    let mut count = 0;
    let mut examples = Vec::new();
    for token in tokens {
        let verdict = classify_class(token);
        if verdict.is_dynamic {
            count += 1;
            if examples.len() < MAX_PAGE_CLASS_EXAMPLES {
                let reason =
                    format!("{}{}", verdict.reason, class_prefix_note(&verdict.stable_prefix));
                examples.push((token.clone(), reason));
            }
        }
    }
    (count, examples)
}

fn resolve_iframe(frame: &IframeCapture, page_url: &str) -> IframeFinding {
    let src = if frame.src.is_empty() {
        "(no src)".to_string()
    } else {
        frame.src.clone()
    };
    // Relative and srcdoc frames inherit the page origin.
    let is_cross_origin = src.starts_with("http") && authority_of(&src) != authority_of(page_url);
    IframeFinding {
        src,
        page_url: page_url.to_string(),
        is_cross_origin,
    }
}

fn authority_of(url: &str) -> String {
    Url::parse(url)
        .map(|parsed| parsed.authority().to_string())
        .unwrap_or_default()
}

fn summarize_shadow_hosts(
    hosts: &[ShadowHostCapture],
    page_url: &str,
) -> Option<ShadowDomFinding> {
    if hosts.is_empty() {
        return None;
    }
    let mut element_tags = Vec::new();
    for host in hosts.iter().take(MAX_SHADOW_HOST_DESCRIPTIONS) {
        let mut desc = host.tag.clone();
        if let Some(id) = host.id.as_deref().filter(|id| !id.is_empty()) {
            desc.push('#');
            desc.push_str(id);
        } else if let Some(first) = first_class(host.classes.as_deref()) {
            desc.push('.');
            desc.push_str(first);
        }
        element_tags.push(desc);
    }
    Some(ShadowDomFinding {
        count: hosts.len(),
        page_url: page_url.to_string(),
        element_tags,
    })
}

fn summarize_canvases(canvases: &[CanvasCapture], page_url: &str) -> Option<CanvasFinding> {
    if canvases.is_empty() {
        return None;
    }
    let mut dimensions = Vec::new();
    for canvas in canvases.iter().take(MAX_CANVAS_DIMENSIONS) {
        let mut desc = format!("{}x{}", canvas.width as i64, canvas.height as i64);
        if let Some(id) = canvas.id.as_deref().filter(|id| !id.is_empty()) {
            desc.push_str(&format!(" (id={})", id));
        } else if let Some(first) = first_class(canvas.classes.as_deref()) {
            desc.push_str(&format!(" (.{})", first));
        }
        dimensions.push(desc);
    }
    Some(CanvasFinding {
        count: canvases.len(),
        page_url: page_url.to_string(),
        dimensions,
    })
}

fn first_class(classes: Option<&str>) -> Option<&str> {
    classes.and_then(|value| value.split_whitespace().next())
}
