use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// Software signature tables
// ============================================================================
//
// The rendering collaborator evaluates its own window/DOM probes and hands
// the engine a map of probe-name -> bool. The tables below map probe names
// to display names; the engine never runs probe code itself.

pub static FRONTEND_SIGNATURES: &[(&str, &str)] = &[
    ("next_data", "Next.js"),
    ("nuxt", "Nuxt.js"),
    ("angularjs", "AngularJS"),
    ("angular", "Angular"),
    ("gatsby", "Gatsby"),
    ("ember", "Ember.js"),
    ("vue", "Vue.js"),
    ("react_root", "React"),
    ("next_root", "Next.js"),
];

pub static CSS_FRAMEWORK_SIGNATURES: &[(&str, &str)] = &[
    ("chakra", "Chakra UI"),
    ("mantine", "Mantine"),
    ("antd", "Ant Design"),
    ("mui", "Material UI"),
    ("blueprint", "Blueprint"),
];

pub static ANALYTICS_SIGNATURES: &[(&str, &str)] = &[
    ("tracker", TRACKER_INSTALLED),
    ("segment", "Segment"),
    ("mixpanel", "Mixpanel"),
    ("amplitude", "Amplitude"),
    ("heap", "Heap"),
    ("fullstory", "FullStory"),
    ("hotjar", "Hotjar"),
    ("gtag", "Google Tag Manager"),
    ("intercom", "Intercom"),
    ("appcues", "Appcues"),
    ("walkme", "WalkMe"),
    ("userpilot", "Userpilot"),
    ("chameleon", "Chameleon"),
];

pub static OTHER_SIGNATURES: &[(&str, &str)] = &[
    ("sentry", "Sentry"),
    ("datadog_rum", "Datadog RUM"),
    ("launchdarkly", "LaunchDarkly"),
    ("stripe", "Stripe"),
];

/// Display name reported when the tracker's own agent is already on the page.
pub const TRACKER_INSTALLED: &str = "Site tracker (already installed)";

/// In-app guide products called out separately in the report.
pub static COMPETITOR_TOOLS: &[&str] = &["Appcues", "WalkMe", "Userpilot", "Chameleon"];

// ============================================================================
// Detection summary
// ============================================================================

/// Software detected across a scan, one list per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoftwareSummary {
    pub frontend_frameworks: Vec<String>,
    pub css_frameworks: Vec<String>,
    pub analytics_tools: Vec<String>,
    pub other_tools: Vec<String>,
    pub meta_generator: String,
}

impl SoftwareSummary {
    pub fn is_empty(&self) -> bool {
        self.frontend_frameworks.is_empty()
            && self.css_frameworks.is_empty()
            && self.analytics_tools.is_empty()
    }

    /// Union another page's detection into this one, keeping first-appearance
    /// order. The meta generator keeps the first non-empty value seen.
    pub fn merge(&mut self, other: &SoftwareSummary) {
        merge_names(&mut self.frontend_frameworks, &other.frontend_frameworks);
        merge_names(&mut self.css_frameworks, &other.css_frameworks);
        merge_names(&mut self.analytics_tools, &other.analytics_tools);
        merge_names(&mut self.other_tools, &other.other_tools);
        if self.meta_generator.is_empty() && !other.meta_generator.is_empty() {
            self.meta_generator = other.meta_generator.clone();
        }
    }
}

fn merge_names(into: &mut Vec<String>, from: &[String]) {
    for name in from {
        if !into.iter().any(|n| n == name) {
            into.push(name.clone());
        }
    }
}

/// Evaluate the signature tables against one page's probe results.
///
/// Table order drives output order. Duplicate display names (two probes for
/// the same product) collapse to the first hit.
pub fn detect_software(probes: &BTreeMap<String, bool>, meta_generator: &str) -> SoftwareSummary {
    SoftwareSummary {
        frontend_frameworks: matched_names(FRONTEND_SIGNATURES, probes),
        css_frameworks: matched_names(CSS_FRAMEWORK_SIGNATURES, probes),
        analytics_tools: matched_names(ANALYTICS_SIGNATURES, probes),
        other_tools: matched_names(OTHER_SIGNATURES, probes),
        meta_generator: meta_generator.to_string(),
    }
}

fn matched_names(table: &[(&str, &str)], probes: &BTreeMap<String, bool>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (probe, name) in table {
        if probes.get(*probe).copied().unwrap_or(false) && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}
