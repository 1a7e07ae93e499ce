use serde::{Deserialize, Serialize};

use crate::element::element_model::{ElementSnapshot, SelectorSuggestion};
use crate::element::suggest::suggest_selector;
use crate::patterns::{classify_class, classify_id};

// Example-list caps. These are contract values: reports built from the same
// capture must keep the same examples, so the caps never flex with input
// volume.
pub const MAX_TRACK_ATTR_EXAMPLES: usize = 3;
pub const MAX_ID_EXAMPLES: usize = 5;
pub const MAX_ARIA_EXAMPLES: usize = 5;
pub const MAX_CLASS_EXAMPLES: usize = 8;
pub const MAX_SUGGESTIONS: usize = 15;

// ============================================================================
// Per-category tally
// ============================================================================

/// Counters and bounded example lists for one element category on one page.
/// Mutated only while that page's snapshots are folded, then read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryTally {
    pub total: usize,
    pub stable_ids: usize,
    pub dynamic_ids: usize,
    pub no_ids: usize,
    pub has_track_attr: usize,
    pub has_data_attr: usize,
    pub has_text_content: usize,
    pub has_aria_label: usize,
    pub has_aria_describedby: usize,
    pub has_role: usize,
    pub has_title: usize,
    /// (id, reason) pairs, reason annotated when a prefix workaround exists.
    pub dynamic_id_examples: Vec<(String, String)>,
    pub stable_id_examples: Vec<String>,
    pub track_attr_examples: Vec<String>,
    /// (class, reason) pairs with a prefix note appended.
    pub dynamic_class_examples: Vec<(String, String)>,
    pub aria_label_examples: Vec<String>,
    pub role_examples: Vec<String>,
    pub selector_suggestions: Vec<SelectorSuggestion>,
}

impl CategoryTally {
    /// Fold one element snapshot into the tally.
    ///
    /// Exactly one of stable_ids/dynamic_ids/no_ids is incremented per
    /// snapshot, so those three always sum to `total`. A suggestion is only
    /// sought for elements that lack a stable id and carry no vendor
    /// tracking attribute.
    pub fn record(&mut self, snap: &ElementSnapshot) {
        self.total += 1;

        if !snap.track_attrs.is_empty() {
            self.has_track_attr += 1;
            for attr in snap.track_attrs.iter().take(2) {
                if self.track_attr_examples.len() >= MAX_TRACK_ATTR_EXAMPLES {
                    break;
                }
                self.track_attr_examples.push(attr.clone());
            }
        }

        if !snap.data_attrs.is_empty() {
            self.has_data_attr += 1;
        }

        let mut needs_suggestion = false;
        match snap.id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => {
                let verdict = classify_id(id);
                if verdict.is_dynamic {
                    self.dynamic_ids += 1;
                    needs_suggestion = true;
                    if self.dynamic_id_examples.len() < MAX_ID_EXAMPLES {
                        let mut reason = verdict.reason;
                        if verdict.has_stable_prefix {
                            reason.push_str(" [has stable prefix]");
                        }
                        self.dynamic_id_examples.push((id.to_string(), reason));
                    }
                } else {
                    self.stable_ids += 1;
                    if self.stable_id_examples.len() < MAX_ID_EXAMPLES {
                        self.stable_id_examples.push(id.to_string());
                    }
                }
            }
            None => {
                self.no_ids += 1;
                needs_suggestion = true;
            }
        }

        for token in snap.class_tokens() {
            let verdict = classify_class(token);
            if verdict.is_dynamic && self.dynamic_class_examples.len() < MAX_CLASS_EXAMPLES {
                let reason = format!("{}{}", verdict.reason, class_prefix_note(&verdict.stable_prefix));
                self.dynamic_class_examples.push((token.to_string(), reason));
            }
        }

        if snap.has_usable_text() {
            self.has_text_content += 1;
        }

        if !snap.aria_label.is_empty() {
            self.has_aria_label += 1;
            if self.aria_label_examples.len() < MAX_ARIA_EXAMPLES {
                self.aria_label_examples.push(snap.aria_label.clone());
            }
        }

        if !snap.aria_describedby.is_empty() || !snap.aria_labelledby.is_empty() {
            self.has_aria_describedby += 1;
        }

        if !snap.role.is_empty() {
            self.has_role += 1;
            if self.role_examples.len() < MAX_ARIA_EXAMPLES
                && !self.role_examples.contains(&snap.role)
            {
                self.role_examples.push(snap.role.clone());
            }
        }

        if !snap.title.is_empty() {
            self.has_title += 1;
        }

        if needs_suggestion
            && snap.track_attrs.is_empty()
            && self.selector_suggestions.len() < MAX_SUGGESTIONS
        {
            if let Some(suggestion) = suggest_selector(snap) {
                self.selector_suggestions.push(suggestion);
            }
        }
    }
}

/// Annotation appended to a dynamic-class reason.
pub fn class_prefix_note(stable_prefix: &str) -> String {
    if stable_prefix.is_empty() {
        " [NO stable prefix]".to_string()
    } else {
        format!(" [prefix: {}]", stable_prefix)
    }
}
