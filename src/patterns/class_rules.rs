use once_cell::sync::Lazy;
use regex::Regex;

use crate::patterns::pattern_model::ClassVerdict;

// ============================================================================
// Dynamic-class rule table
// ============================================================================

/// One rule in the dynamic-class table. When the pattern captures a group,
/// group 1 is the stable prefix reported on a match.
pub struct ClassRule {
    pub pattern: &'static str,
    pub label: &'static str,
    pub reason: &'static str,
}

/// Ordered rule table, matched anchored at the start of the token.
pub static DYNAMIC_CLASS_RULES: &[ClassRule] = &[
    // Hash suffix patterns like button-7234523bfjhfu47
    ClassRule { pattern: r"^([a-z][-a-z0-9]*)-[a-f0-9]{6,}$", label: "name-hash", reason: "Dynamic hash suffix (e.g., button-7234523bf)" },
    ClassRule { pattern: r"^([a-z][-a-z0-9]*)_[a-f0-9]{6,}$", label: "name_hash", reason: "Dynamic hash suffix with underscore" },
    ClassRule { pattern: r"^([a-z][-a-z0-9]*)__[a-zA-Z0-9]{5,}$", label: "name__hash", reason: "CSS Modules pattern (e.g., nav_bar__2RnO8)" },
    // Pure hash classes
    ClassRule { pattern: r"^[a-f0-9]{6,12}$", label: "pure-hash", reason: "Pure hash class - no stable part" },
    ClassRule { pattern: r"^_[a-zA-Z0-9]{6,}$", label: "_hash", reason: "Underscore-prefixed hash" },
    // CSS-in-JS
    ClassRule { pattern: r"^sc-[a-zA-Z]{5,}$", label: "styled-components", reason: "Styled Components hash" },
    ClassRule { pattern: r"^css-[a-z0-9]{4,}$", label: "emotion", reason: "Emotion CSS hash" },
    ClassRule { pattern: r"^emotion-[a-z0-9]+$", label: "emotion-*", reason: "Emotion hash" },
    ClassRule { pattern: r"^makeStyles-[a-zA-Z]+-\d+$", label: "mui-makeStyles", reason: "MUI makeStyles (dynamic)" },
    ClassRule { pattern: r"^jss\d+$", label: "jss", reason: "JSS generated class" },
    // Minified classes
    ClassRule { pattern: r"^[a-zA-Z]{1,2}[0-9]{4,}$", label: "minified", reason: "Minified class name" },
];

static COMPILED_CLASS_RULES: Lazy<Vec<(Regex, &'static ClassRule)>> = Lazy::new(|| {
    DYNAMIC_CLASS_RULES
        .iter()
        .map(|rule| {
            let re = Regex::new(&format!("(?i){}", rule.pattern))
                .expect("dynamic-class rule table holds only valid patterns");
            (re, rule)
        })
        .collect()
});

// ============================================================================
// Classifier
// ============================================================================

/// Check one CSS class token against the dynamic-class table, first match
/// wins. The captured group (when the rule has one) becomes the stable
/// prefix for a `[class^="..."]` workaround.
pub fn classify_class(class_name: &str) -> ClassVerdict {
    if class_name.is_empty() {
        return ClassVerdict::stable();
    }

    for (re, rule) in COMPILED_CLASS_RULES.iter() {
        if let Some(caps) = re.captures(class_name) {
            let stable_prefix = caps
                .get(1)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            return ClassVerdict {
                is_dynamic: true,
                label: rule.label.to_string(),
                reason: rule.reason.to_string(),
                stable_prefix,
            };
        }
    }

    ClassVerdict::stable()
}
