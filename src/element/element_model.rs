use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// Element snapshot (wire contract from the rendering collaborator)
// ============================================================================

/// Raw attribute snapshot for one interactive element, as materialized by
/// the page-rendering collaborator. Every field is optional on the wire; a
/// missing field folds as "no signal".
///
/// `track_attrs` holds the vendor's own data-track-* attributes as
/// pre-formatted `name="value"` strings; `data_attrs` holds every other
/// data-* attribute.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementSnapshot {
    pub tag: String,
    pub id: Option<String>,
    pub classes: String,
    #[serde(rename = "trackAttrs")]
    pub track_attrs: Vec<String>,
    #[serde(rename = "dataAttrs")]
    pub data_attrs: BTreeMap<String, String>,
    #[serde(rename = "ariaLabel")]
    pub aria_label: String,
    #[serde(rename = "ariaDescribedby")]
    pub aria_describedby: String,
    #[serde(rename = "ariaLabelledby")]
    pub aria_labelledby: String,
    pub role: String,
    pub r#type: String,
    pub name: String,
    pub placeholder: String,
    pub title: String,
    /// Trimmed text content, at most 50 chars, empty when 2 chars or fewer.
    pub text: String,
}

impl ElementSnapshot {
    pub fn class_tokens(&self) -> impl Iterator<Item = &str> {
        self.classes.split_whitespace()
    }

    /// Enough text for a :contains selector to be worth suggesting.
    pub fn has_usable_text(&self) -> bool {
        self.text.trim().chars().count() > 2
    }
}

// ============================================================================
// Selector suggestions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionMethod {
    DataAttr,
    AriaLabel,
    Contains,
    Attribute,
    ClassPrefix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Excellent,
    Good,
    Acceptable,
}

/// A recommended targeting selector for one element that lacks a stable id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorSuggestion {
    /// Human-readable description, e.g. `Button "Submit Order"`.
    pub element_desc: String,
    pub selector: String,
    pub method: SuggestionMethod,
    pub confidence: Confidence,
}
