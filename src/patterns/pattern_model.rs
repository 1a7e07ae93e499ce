// ============================================================================
// Classification verdicts
// ============================================================================

/// Verdict for an element id checked against the dynamic-id rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdVerdict {
    pub is_dynamic: bool,
    pub label: String,
    pub reason: String,
    /// A starts-with selector can still target this id.
    pub has_stable_prefix: bool,
}

impl IdVerdict {
    /// The empty verdict: nothing matched, the id is treated as stable.
    pub fn stable() -> Self {
        IdVerdict {
            is_dynamic: false,
            label: String::new(),
            reason: String::new(),
            has_stable_prefix: false,
        }
    }
}

/// Verdict for a single CSS class token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassVerdict {
    pub is_dynamic: bool,
    pub label: String,
    pub reason: String,
    /// Captured leading substring usable in a `[class^="..."]` selector.
    /// Empty when the matching rule captures nothing.
    pub stable_prefix: String,
}

impl ClassVerdict {
    pub fn stable() -> Self {
        ClassVerdict {
            is_dynamic: false,
            label: String::new(),
            reason: String::new(),
            stable_prefix: String::new(),
        }
    }
}
