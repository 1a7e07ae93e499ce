use once_cell::sync::Lazy;
use regex::Regex;

use crate::patterns::pattern_model::IdVerdict;

// ============================================================================
// Dynamic-id rule table
// ============================================================================

/// One rule in the dynamic-id table.
pub struct IdRule {
    pub pattern: &'static str,
    pub label: &'static str,
    pub reason: &'static str,
    pub has_stable_prefix: bool,
}

/// Ordered rule table. Order matters: library-specific patterns must be
/// tested before the generic hash and minified patterns that would also
/// match them. Matching is case-insensitive with search semantics, so a
/// rule may hit anywhere in the id unless it anchors itself.
pub static DYNAMIC_ID_RULES: &[IdRule] = &[
    // Framework auto-generated, no usable prefix
    IdRule { pattern: r"^ember\d+$", label: "ember*", reason: "Ember.js runtime ID - changes each page load", has_stable_prefix: false },
    IdRule { pattern: r"^:r[a-z0-9]+:$", label: "radix-:r*:", reason: "Radix UI runtime ID - changes each render", has_stable_prefix: false },
    IdRule { pattern: r"^\d+$", label: "numeric-only", reason: "Database record ID - changes per item", has_stable_prefix: false },
    // Component libraries with a stable leading segment
    IdRule { pattern: r"^react-select-\d+-", label: "react-select-*", reason: "React Select instance ID", has_stable_prefix: true },
    IdRule { pattern: r"^mui-\d+", label: "mui-*", reason: "Material UI component ID", has_stable_prefix: true },
    IdRule { pattern: r"^radix-[a-z]+-", label: "radix-*", reason: "Radix UI component", has_stable_prefix: true },
    IdRule { pattern: r"^headlessui-[a-z]+-", label: "headlessui-*", reason: "Headless UI component", has_stable_prefix: true },
    IdRule { pattern: r"^downshift-\d+-", label: "downshift-*", reason: "Downshift component", has_stable_prefix: true },
    IdRule { pattern: r"^chakra-[a-z]+-", label: "chakra-*", reason: "Chakra UI component", has_stable_prefix: true },
    IdRule { pattern: r"^mantine-[a-z]+-", label: "mantine-*", reason: "Mantine UI component", has_stable_prefix: true },
    // Angular
    IdRule { pattern: r"^ng-c\d+$", label: "ng-c*", reason: "Angular compiler ID - changes on rebuild", has_stable_prefix: false },
    IdRule { pattern: r"^cdk-[a-z]+-\d+", label: "cdk-*", reason: "Angular CDK component", has_stable_prefix: true },
    IdRule { pattern: r"^mat-[a-z]+-\d+", label: "mat-*", reason: "Angular Material component", has_stable_prefix: true },
    // Hash-based
    IdRule { pattern: r"^[a-f0-9]{8}-[a-f0-9]{4}-", label: "uuid-*", reason: "UUID - generated per session", has_stable_prefix: false },
    IdRule { pattern: r"^[a-f0-9]{12,}$", label: "hash-only", reason: "Pure hash ID - changes on rebuild", has_stable_prefix: false },
    IdRule { pattern: r"^[a-z]{1,2}\d{5,}$", label: "minified", reason: "Minified ID - changes on rebuild", has_stable_prefix: false },
    // Hash suffixes on an otherwise readable name
    IdRule { pattern: r"^([a-z][-a-z]+)[-_][a-f0-9]{5,}$", label: "*-hash", reason: "Hash suffix on class name", has_stable_prefix: true },
    IdRule { pattern: r"^([a-z][-a-z]+)__[a-zA-Z0-9]{5,}$", label: "*__hash", reason: "CSS Modules hash suffix", has_stable_prefix: true },
    // CSS-in-JS
    IdRule { pattern: r"^(sc|css|emotion|styled)-[a-zA-Z0-9]+$", label: "css-in-js", reason: "CSS-in-JS generated ID", has_stable_prefix: true },
];

static COMPILED_ID_RULES: Lazy<Vec<(Regex, &'static IdRule)>> = Lazy::new(|| {
    DYNAMIC_ID_RULES
        .iter()
        .map(|rule| {
            let re = Regex::new(&format!("(?i){}", rule.pattern))
                .expect("dynamic-id rule table holds only valid patterns");
            (re, rule)
        })
        .collect()
});

// ============================================================================
// Classifier
// ============================================================================

/// Check an element id against the dynamic-id table, first match wins.
///
/// An empty id and an id matching no rule both come back as the stable
/// verdict; unrecognized naming schemes are deliberately trusted rather
/// than flagged.
pub fn classify_id(element_id: &str) -> IdVerdict {
    if element_id.is_empty() {
        return IdVerdict::stable();
    }

    for (re, rule) in COMPILED_ID_RULES.iter() {
        if re.is_match(element_id) {
            return IdVerdict {
                is_dynamic: true,
                label: rule.label.to_string(),
                reason: rule.reason.to_string(),
                has_stable_prefix: rule.has_stable_prefix,
            };
        }
    }

    IdVerdict::stable()
}
