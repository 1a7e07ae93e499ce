use once_cell::sync::Lazy;
use regex::Regex;

use crate::element::element_model::{
    Confidence, ElementSnapshot, SelectorSuggestion, SuggestionMethod,
};
use crate::patterns::classify_class;

/// Test-style data attributes, ordered by reliability.
pub static PREFERRED_DATA_ATTRS: &[&str] = &[
    "data-testid",
    "data-test-id",
    "data-test",
    "data-qa",
    "data-cy",
    "data-e2e",
    "data-id",
    "data-name",
    "data-action",
];

// A value carrying a long hex run is assumed to be build output.
static HEX_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-f0-9]{8,}").expect("hex-run pattern is valid"));

/// Pick the best available targeting selector for one element.
///
/// Returns None when nothing on the ladder applies. The caller decides
/// whether the element needs a suggestion at all (stable ids and vendor
/// tracking attributes make one pointless); this function only ranks what
/// the snapshot offers.
pub fn suggest_selector(snap: &ElementSnapshot) -> Option<SelectorSuggestion> {
    let tag = snap.tag.as_str();
    let desc = describe_element(snap);

    // --- Priority 1: preferred data-* test attributes ---
    for attr in PREFERRED_DATA_ATTRS {
        if let Some(val) = snap.data_attrs.get(*attr) {
            if !val.is_empty() {
                return Some(suggestion(
                    &desc,
                    format!("{}[{}=\"{}\"]", tag, attr, val),
                    SuggestionMethod::DataAttr,
                    Confidence::Excellent,
                ));
            }
        }
    }

    // Any other data-* attribute with a short, stable-looking value.
    for (attr, val) in &snap.data_attrs {
        if !val.is_empty() && val.chars().count() < 60 && !HEX_RUN.is_match(val) {
            return Some(suggestion(
                &desc,
                format!("{}[{}=\"{}\"]", tag, attr, val),
                SuggestionMethod::DataAttr,
                Confidence::Good,
            ));
        }
    }

    // --- Priority 2: aria-label ---
    if !snap.aria_label.is_empty() && snap.aria_label.chars().count() < 60 {
        return Some(suggestion(
            &desc,
            format!("{}[aria-label=\"{}\"]", tag, snap.aria_label),
            SuggestionMethod::AriaLabel,
            Confidence::Good,
        ));
    }

    // --- Priority 3: :contains("text") for buttons/links with clear text ---
    if !snap.text.is_empty()
        && snap.text.chars().count() <= 40
        && (tag == "button" || tag == "a")
    {
        return Some(suggestion(
            &desc,
            format!("{}:contains(\"{}\")", tag, snap.text),
            SuggestionMethod::Contains,
            Confidence::Good,
        ));
    }

    // --- Priority 4: title attribute ---
    if !snap.title.is_empty() && snap.title.chars().count() < 60 {
        return Some(suggestion(
            &desc,
            format!("{}[title=\"{}\"]", tag, snap.title),
            SuggestionMethod::Attribute,
            Confidence::Acceptable,
        ));
    }

    // --- Priority 5: class with stable prefix ---
    for token in snap.class_tokens() {
        let verdict = classify_class(token);
        if verdict.is_dynamic && !verdict.stable_prefix.is_empty() {
            return Some(suggestion(
                &desc,
                format!("{}[class^=\"{}\"]", tag, verdict.stable_prefix),
                SuggestionMethod::ClassPrefix,
                Confidence::Acceptable,
            ));
        }
    }

    // --- Priority 6: name/type/placeholder for form elements ---
    if !snap.name.is_empty() && matches!(tag, "input" | "select" | "textarea") {
        return Some(suggestion(
            &desc,
            format!("{}[name=\"{}\"]", tag, snap.name),
            SuggestionMethod::Attribute,
            Confidence::Acceptable,
        ));
    }

    if !snap.r#type.is_empty() && !snap.placeholder.is_empty() && tag == "input" {
        return Some(suggestion(
            &desc,
            format!("input[type=\"{}\"][placeholder=\"{}\"]", snap.r#type, snap.placeholder),
            SuggestionMethod::Attribute,
            Confidence::Acceptable,
        ));
    }

    if !snap.placeholder.is_empty() && tag == "input" {
        return Some(suggestion(
            &desc,
            format!("input[placeholder=\"{}\"]", snap.placeholder),
            SuggestionMethod::Attribute,
            Confidence::Acceptable,
        ));
    }

    None
}

fn suggestion(
    desc: &str,
    selector: String,
    method: SuggestionMethod,
    confidence: Confidence,
) -> SelectorSuggestion {
    SelectorSuggestion {
        element_desc: desc.to_string(),
        selector,
        method,
        confidence,
    }
}

/// Build a short human-readable description of the element.
pub fn describe_element(snap: &ElementSnapshot) -> String {
    if !snap.text.is_empty() {
        format!("{} \"{}\"", capitalize(&snap.tag), clip(&snap.text, 30))
    } else if !snap.aria_label.is_empty() {
        format!(
            "{} [aria-label=\"{}\"]",
            capitalize(&snap.tag),
            clip(&snap.aria_label, 30)
        )
    } else if !snap.name.is_empty() {
        format!("{} [name=\"{}\"]", capitalize(&snap.tag), snap.name)
    } else {
        format!("{} element", capitalize(&snap.tag))
    }
}

fn capitalize(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn clip(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
