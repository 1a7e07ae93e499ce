use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scan::page_analysis::{CanvasFinding, IframeFinding, PageAnalysis, ShadowDomFinding};

// ============================================================================
// Scoring configuration
// ============================================================================

/// Weights and cutoffs behind the feasibility score. The defaults are the
/// published contract; the config file can override them for what-if runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreConfig {
    #[serde(default = "default_button_weight")]
    pub button_weight: usize,

    #[serde(default = "default_input_weight")]
    pub input_weight: usize,

    /// Overall score below this adds 3 risk points.
    #[serde(default = "default_low_cutoff")]
    pub low_score_cutoff: f64,

    /// Overall score below this adds 2 risk points.
    #[serde(default = "default_moderate_cutoff")]
    pub moderate_score_cutoff: f64,

    /// Overall score below this adds 1 risk point.
    #[serde(default = "default_high_cutoff")]
    pub high_score_cutoff: f64,

    /// Dynamic-class count above this adds 2 risk points.
    #[serde(default = "default_class_threshold")]
    pub dynamic_class_threshold: usize,

    /// Iframe count above this adds 1 risk point.
    #[serde(default = "default_iframe_threshold")]
    pub iframe_threshold: usize,

    #[serde(default = "default_high_points")]
    pub high_risk_points: u32,

    #[serde(default = "default_moderate_points")]
    pub moderate_risk_points: u32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            button_weight: 3,
            input_weight: 2,
            low_score_cutoff: 50.0,
            moderate_score_cutoff: 70.0,
            high_score_cutoff: 85.0,
            dynamic_class_threshold: 20,
            iframe_threshold: 2,
            high_risk_points: 3,
            moderate_risk_points: 2,
        }
    }
}

// Serde default helpers
fn default_button_weight() -> usize { 3 }
fn default_input_weight() -> usize { 2 }
fn default_low_cutoff() -> f64 { 50.0 }
fn default_moderate_cutoff() -> f64 { 70.0 }
fn default_high_cutoff() -> f64 { 85.0 }
fn default_class_threshold() -> usize { 20 }
fn default_iframe_threshold() -> usize { 2 }
fn default_high_points() -> u32 { 3 }
fn default_moderate_points() -> u32 { 2 }

// ============================================================================
// Risk level
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
        };
        write!(f, "{}", label)
    }
}

// ============================================================================
// Aggregate score
// ============================================================================

/// Site-wide totals, deduplicated examples, and the derived scores. Built
/// once from the per-page analyses, then read by every report section.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateScore {
    pub total_buttons: usize,
    pub total_inputs: usize,
    pub stable_button_ids: usize,
    pub stable_input_ids: usize,
    pub dynamic_button_ids: usize,
    pub dynamic_input_ids: usize,
    pub no_id_buttons: usize,
    pub no_id_inputs: usize,
    pub track_attr_buttons: usize,
    pub track_attr_inputs: usize,
    pub data_attr_buttons: usize,
    pub text_content_buttons: usize,
    pub total_dynamic_classes: usize,

    pub aria_label_buttons: usize,
    pub aria_label_inputs: usize,
    pub aria_describedby_buttons: usize,
    pub aria_describedby_inputs: usize,
    pub role_buttons: usize,
    pub role_inputs: usize,
    pub title_buttons: usize,
    pub title_inputs: usize,

    /// Concatenated in page order, duplicates kept.
    pub dynamic_id_examples: Vec<(String, String)>,
    /// Deduplicated, first occurrence wins. Same for the lists below.
    pub stable_id_examples: Vec<String>,
    pub track_attr_examples: Vec<String>,
    pub aria_label_examples: Vec<String>,
    pub role_examples: Vec<String>,
    /// Deduplicated by class token.
    pub unique_dynamic_classes: Vec<(String, String)>,

    pub iframes: Vec<IframeFinding>,
    pub shadow_pages: Vec<ShadowDomFinding>,
    pub canvas_pages: Vec<CanvasFinding>,
    pub total_iframe_count: usize,
    pub total_shadow_roots: usize,
    pub total_canvas_count: usize,

    pub button_id_score: f64,
    pub input_id_score: f64,
    pub overall_id_score: f64,
    pub has_critical_dynamic_css: bool,
    pub risk_points: u32,
    pub risk_level: RiskLevel,
}

impl AggregateScore {
    pub fn compute(pages: &[PageAnalysis], config: &ScoreConfig) -> Self {
        let total_buttons: usize = pages.iter().map(|p| p.buttons.total).sum();
        let total_inputs: usize = pages.iter().map(|p| p.inputs.total).sum();
        let stable_button_ids: usize = pages.iter().map(|p| p.buttons.stable_ids).sum();
        let stable_input_ids: usize = pages.iter().map(|p| p.inputs.stable_ids).sum();
        let dynamic_button_ids: usize = pages.iter().map(|p| p.buttons.dynamic_ids).sum();
        let dynamic_input_ids: usize = pages.iter().map(|p| p.inputs.dynamic_ids).sum();
        let no_id_buttons: usize = pages.iter().map(|p| p.buttons.no_ids).sum();
        let no_id_inputs: usize = pages.iter().map(|p| p.inputs.no_ids).sum();
        let track_attr_buttons: usize = pages.iter().map(|p| p.buttons.has_track_attr).sum();
        let track_attr_inputs: usize = pages.iter().map(|p| p.inputs.has_track_attr).sum();
        let data_attr_buttons: usize = pages.iter().map(|p| p.buttons.has_data_attr).sum();
        let text_content_buttons: usize = pages.iter().map(|p| p.buttons.has_text_content).sum();
        let total_dynamic_classes: usize = pages.iter().map(|p| p.dynamic_class_count).sum();

        let aria_label_buttons: usize = pages.iter().map(|p| p.buttons.has_aria_label).sum();
        let aria_label_inputs: usize = pages.iter().map(|p| p.inputs.has_aria_label).sum();
        let aria_describedby_buttons: usize =
            pages.iter().map(|p| p.buttons.has_aria_describedby).sum();
        let aria_describedby_inputs: usize =
            pages.iter().map(|p| p.inputs.has_aria_describedby).sum();
        let role_buttons: usize = pages.iter().map(|p| p.buttons.has_role).sum();
        let role_inputs: usize = pages.iter().map(|p| p.inputs.has_role).sum();
        let title_buttons: usize = pages.iter().map(|p| p.buttons.has_title).sum();
        let title_inputs: usize = pages.iter().map(|p| p.inputs.has_title).sum();

        // Example concatenation runs buttons then inputs per page, pages in
        // crawl order, so reruns of the same capture pick the same examples.
        let mut dynamic_id_examples = Vec::new();
        let mut stable_id_raw = Vec::new();
        let mut track_attr_raw = Vec::new();
        let mut aria_label_raw = Vec::new();
        let mut role_raw = Vec::new();
        let mut dynamic_class_raw = Vec::new();
        for page in pages {
            for tally in [&page.buttons, &page.inputs] {
                dynamic_id_examples.extend(tally.dynamic_id_examples.iter().cloned());
                stable_id_raw.extend(tally.stable_id_examples.iter().cloned());
                track_attr_raw.extend(tally.track_attr_examples.iter().cloned());
                aria_label_raw.extend(tally.aria_label_examples.iter().cloned());
                role_raw.extend(tally.role_examples.iter().cloned());
                dynamic_class_raw.extend(tally.dynamic_class_examples.iter().cloned());
            }
            dynamic_class_raw.extend(page.dynamic_class_examples.iter().cloned());
        }

        let mut iframes = Vec::new();
        let mut shadow_pages = Vec::new();
        let mut canvas_pages = Vec::new();
        for page in pages {
            iframes.extend(page.iframes.iter().cloned());
            if let Some(shadow) = &page.shadow_dom {
                shadow_pages.push(shadow.clone());
            }
            if let Some(canvas) = &page.canvas {
                canvas_pages.push(canvas.clone());
            }
        }
        let total_iframe_count = iframes.len();
        let total_shadow_roots: usize = shadow_pages.iter().map(|s| s.count).sum();
        let total_canvas_count: usize = canvas_pages.iter().map(|c| c.count).sum();

        let unique_dynamic_classes = dedup_by_class(dynamic_class_raw);

        let button_id_score = ratio_score(stable_button_ids, total_buttons);
        let input_id_score = ratio_score(stable_input_ids, total_inputs);
        let weighted_stable = (stable_button_ids * config.button_weight
            + stable_input_ids * config.input_weight) as f64;
        let weighted_total =
            (total_buttons * config.button_weight + total_inputs * config.input_weight) as f64;
        let overall_id_score = if weighted_total > 0.0 {
            weighted_stable / weighted_total * 100.0
        } else {
            100.0
        };

        let has_critical_dynamic_css = !unique_dynamic_classes.is_empty();

        let mut risk_points = 0u32;
        if overall_id_score < config.low_score_cutoff {
            risk_points += 3;
        } else if overall_id_score < config.moderate_score_cutoff {
            risk_points += 2;
        } else if overall_id_score < config.high_score_cutoff {
            risk_points += 1;
        }
        if has_critical_dynamic_css && total_dynamic_classes > config.dynamic_class_threshold {
            risk_points += 2;
        }
        if total_shadow_roots > 0 {
            risk_points += 2;
        }
        if total_iframe_count > config.iframe_threshold {
            risk_points += 1;
        }

        let risk_level = if risk_points >= config.high_risk_points {
            RiskLevel::High
        } else if risk_points >= config.moderate_risk_points {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        };

        AggregateScore {
            total_buttons,
            total_inputs,
            stable_button_ids,
            stable_input_ids,
            dynamic_button_ids,
            dynamic_input_ids,
            no_id_buttons,
            no_id_inputs,
            track_attr_buttons,
            track_attr_inputs,
            data_attr_buttons,
            text_content_buttons,
            total_dynamic_classes,
            aria_label_buttons,
            aria_label_inputs,
            aria_describedby_buttons,
            aria_describedby_inputs,
            role_buttons,
            role_inputs,
            title_buttons,
            title_inputs,
            dynamic_id_examples,
            stable_id_examples: dedup_strings(stable_id_raw),
            track_attr_examples: dedup_strings(track_attr_raw),
            aria_label_examples: dedup_strings(aria_label_raw),
            role_examples: dedup_strings(role_raw),
            unique_dynamic_classes,
            iframes,
            shadow_pages,
            canvas_pages,
            total_iframe_count,
            total_shadow_roots,
            total_canvas_count,
            button_id_score,
            input_id_score,
            overall_id_score,
            has_critical_dynamic_css,
            risk_points,
            risk_level,
        }
    }
}

fn ratio_score(stable: usize, total: usize) -> f64 {
    if total > 0 {
        stable as f64 / total as f64 * 100.0
    } else {
        100.0
    }
}

fn dedup_strings(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for value in values {
        if seen.insert(value.clone()) {
            unique.push(value);
        }
    }
    unique
}

fn dedup_by_class(pairs: Vec<(String, String)>) -> Vec<(String, String)> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for pair in pairs {
        if seen.insert(pair.0.clone()) {
            unique.push(pair);
        }
    }
    unique
}
