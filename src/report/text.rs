use std::collections::{HashMap, HashSet};

use url::Url;

use crate::element::element_model::{Confidence, SelectorSuggestion};
use crate::patterns::signatures::{SoftwareSummary, COMPETITOR_TOOLS, TRACKER_INSTALLED};
use crate::scan::page_analysis::PageAnalysis;
use crate::scan::score::AggregateScore;
use crate::scan::session::ScanSession;

const RULE_WIDTH: usize = 65;
const MAX_URL_DISPLAY: usize = 50;

// ============================================================================
// Text report
// ============================================================================

/// Render the human-readable report. Pure function of its inputs; the
/// caller supplies the timestamp so identical sessions render identically.
pub fn generate_text_report(
    session: &ScanSession,
    score: &AggregateScore,
    generated_at: &str,
) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.extend(header_lines(session, score, generated_at));
    lines.extend(dynamic_css_warning_lines(score));
    lines.extend(software_lines(&session.software));
    lines.extend(id_analysis_lines(score));
    lines.extend(aria_lines(score));
    lines.extend(css_class_lines(score));
    lines.extend(iframe_lines(score));
    lines.extend(shadow_dom_lines(score));
    lines.extend(canvas_lines(score));
    lines.extend(suggestion_lines(&session.pages));
    lines.extend(summary_lines(score, &session.pages));
    lines.join("\n")
}

fn rule(ch: &str) -> String {
    ch.repeat(RULE_WIDTH)
}

fn header_lines(session: &ScanSession, score: &AggregateScore, generated_at: &str) -> Vec<String> {
    vec![
        rule("="),
        "              SELECTOR FEASIBILITY REPORT".to_string(),
        rule("="),
        format!("Site: {}", session.site_url),
        format!("Pages Analysed: {}", session.pages.len()),
        format!("Date: {}", generated_at),
        format!("Risk Level: {}", score.risk_level),
        String::new(),
    ]
}

fn dynamic_css_warning_lines(score: &AggregateScore) -> Vec<String> {
    if !score.has_critical_dynamic_css {
        return Vec::new();
    }

    let mut lines = vec![
        rule("!"),
        "!!! CRITICAL: DYNAMIC CSS SELECTORS DETECTED !!!".to_string(),
        rule("!"),
        String::new(),
        "The following dynamic class patterns were found.".to_string(),
        "These change on rebuild/deploy and will BREAK analytics tags.".to_string(),
        String::new(),
    ];

    for (class_name, reason) in score.unique_dynamic_classes.iter().take(10) {
        lines.push(format!("  \"{}\"", class_name));
        lines.push(format!("     -> {}", reason));
        lines.push(String::new());
    }

    if score.unique_dynamic_classes.len() > 10 {
        lines.push(format!(
            "  ... and {} more dynamic classes",
            score.unique_dynamic_classes.len() - 10
        ));
        lines.push(String::new());
    }

    lines.extend([
        "WORKAROUNDS:".to_string(),
        "  1. Use starts-with [class^=\"prefix-\"] if stable prefix exists".to_string(),
        "  2. Use :contains(\"Button Text\") for elements with text".to_string(),
        "  3. Request engineering add data-track-* attributes".to_string(),
        "  4. Use stable IDs instead of classes".to_string(),
        String::new(),
        rule("!"),
        String::new(),
    ]);
    lines
}

fn software_lines(software: &SoftwareSummary) -> Vec<String> {
    let mut lines = vec![rule("-"), "0. DETECTED SOFTWARE".to_string(), rule("-")];

    if !software.frontend_frameworks.is_empty() {
        lines.push(format!(
            "Frontend: {}",
            software.frontend_frameworks.join(", ")
        ));
    }
    if !software.css_frameworks.is_empty() {
        lines.push(format!("UI Framework: {}", software.css_frameworks.join(", ")));
    }
    if !software.analytics_tools.is_empty() {
        let installed_note = if software
            .analytics_tools
            .iter()
            .any(|tool| tool == TRACKER_INSTALLED)
        {
            " [ALREADY INSTALLED]"
        } else {
            ""
        };
        let competitors: Vec<&str> = software
            .analytics_tools
            .iter()
            .map(|tool| tool.as_str())
            .filter(|tool| COMPETITOR_TOOLS.contains(tool))
            .collect();
        let competitor_note = if competitors.is_empty() {
            String::new()
        } else {
            format!(" [COMPETITORS: {}]", competitors.join(", "))
        };
        lines.push(format!(
            "Analytics: {}{}{}",
            software.analytics_tools.join(", "),
            installed_note,
            competitor_note
        ));
    }
    if !software.other_tools.is_empty() {
        lines.push(format!("Other: {}", software.other_tools.join(", ")));
    }

    if software.is_empty() {
        lines.push("No common frameworks detected".to_string());
    }

    lines.push(String::new());
    lines
}

fn id_analysis_lines(score: &AggregateScore) -> Vec<String> {
    let mut lines = vec![
        rule("-"),
        "1. ELEMENT ID ANALYSIS (Primary for Tagging)".to_string(),
        rule("-"),
        String::new(),
        format!("Overall ID Stability Score: {:.0}%", score.overall_id_score),
        String::new(),
    ];

    let bs = score.button_id_score;
    let button_badge = if bs >= 70.0 { "[GOOD]" } else { "[NEEDS WORK]" };
    lines.extend([
        "BUTTONS (highest priority for tagging):".to_string(),
        format!("  Total: {}", score.total_buttons),
        format!(
            "  With stable IDs: {} ({:.0}%) {}",
            score.stable_button_ids, bs, button_badge
        ),
        format!(
            "  With dynamic IDs: {} {}",
            score.dynamic_button_ids,
            warn_badge(score.dynamic_button_ids)
        ),
        format!("  Without IDs: {}", score.no_id_buttons),
        format!(
            "  With data-track-* attr: {} {}",
            score.track_attr_buttons,
            excellent_badge(score.track_attr_buttons)
        ),
        format!("  With other data-* attr: {}", score.data_attr_buttons),
        format!(
            "  With text content: {} (can use :contains)",
            score.text_content_buttons
        ),
        String::new(),
    ]);

    let iis = score.input_id_score;
    let input_badge = if iis >= 70.0 { "[GOOD]" } else { "[NEEDS WORK]" };
    lines.extend([
        "INPUTS:".to_string(),
        format!("  Total: {}", score.total_inputs),
        format!(
            "  With stable IDs: {} ({:.0}%) {}",
            score.stable_input_ids, iis, input_badge
        ),
        format!(
            "  With dynamic IDs: {} {}",
            score.dynamic_input_ids,
            warn_badge(score.dynamic_input_ids)
        ),
        format!("  Without IDs: {}", score.no_id_inputs),
        format!(
            "  With data-track-* attr: {} {}",
            score.track_attr_inputs,
            excellent_badge(score.track_attr_inputs)
        ),
        String::new(),
    ]);

    if !score.stable_id_examples.is_empty() {
        lines.push("Example STABLE IDs (good for targeting):".to_string());
        for example in score.stable_id_examples.iter().take(5) {
            lines.push(format!("  id=\"{}\"", example));
        }
        lines.push(String::new());
    }

    if !score.dynamic_id_examples.is_empty() {
        lines.push("Example DYNAMIC IDs (problematic):".to_string());
        for (id, reason) in score.dynamic_id_examples.iter().take(5) {
            lines.push(format!("  id=\"{}\"", id));
            lines.push(format!("     -> {}", reason));
        }
        lines.push(String::new());
    }

    if !score.track_attr_examples.is_empty() {
        lines.push("Example data-track-* attributes found (excellent):".to_string());
        for attr in score.track_attr_examples.iter().take(3) {
            lines.push(format!("  {}", attr));
        }
        lines.push(String::new());
    }

    lines
}

fn aria_lines(score: &AggregateScore) -> Vec<String> {
    let total_labels = score.aria_label_buttons + score.aria_label_inputs;
    let total_roles = score.role_buttons + score.role_inputs;
    if total_labels == 0 && total_roles == 0 {
        return Vec::new();
    }

    const ARIA_HINT: &str = "[GOOD - can use [aria-label=\"...\"] selector]";

    let mut lines = vec![
        rule("-"),
        "1b. ARIA ATTRIBUTES (Alternative Selectors)".to_string(),
        rule("-"),
        String::new(),
        "ARIA attributes are accessibility-focused and typically stable.".to_string(),
        "They can be used as reliable selectors when IDs are dynamic.".to_string(),
        String::new(),
        "BUTTONS:".to_string(),
        format!(
            "  With aria-label: {} {}",
            score.aria_label_buttons,
            if score.aria_label_buttons > 0 { ARIA_HINT } else { "" }
        ),
        format!(
            "  With aria-describedby/labelledby: {}",
            score.aria_describedby_buttons
        ),
        format!("  With role attribute: {}", score.role_buttons),
        format!("  With title attribute: {}", score.title_buttons),
        String::new(),
        "INPUTS:".to_string(),
        format!(
            "  With aria-label: {} {}",
            score.aria_label_inputs,
            if score.aria_label_inputs > 0 { ARIA_HINT } else { "" }
        ),
        format!(
            "  With aria-describedby/labelledby: {}",
            score.aria_describedby_inputs
        ),
        format!("  With role attribute: {}", score.role_inputs),
        format!("  With title attribute: {}", score.title_inputs),
        String::new(),
    ];

    if !score.aria_label_examples.is_empty() {
        lines.push("Example aria-label values (excellent for selectors):".to_string());
        for label in score.aria_label_examples.iter().take(5) {
            lines.push(format!("  [aria-label=\"{}\"]", clip_display(label, 40)));
        }
        lines.push(String::new());
        lines.push(
            "Usage: button[aria-label=\"Submit\"], input[aria-label=\"Search\"]".to_string(),
        );
        lines.push(String::new());
    }

    if !score.role_examples.is_empty() {
        lines.push("Role attributes found:".to_string());
        for role in score.role_examples.iter().take(5) {
            lines.push(format!("  [role=\"{}\"]", role));
        }
        lines.push(String::new());
    }

    lines
}

fn css_class_lines(score: &AggregateScore) -> Vec<String> {
    let mut lines = vec![
        rule("-"),
        "2. CSS CLASS ANALYSIS".to_string(),
        rule("-"),
        format!(
            "Total dynamic classes detected: {}",
            score.total_dynamic_classes
        ),
        String::new(),
    ];

    if score.total_dynamic_classes == 0 {
        lines.extend([
            "[GOOD] No dynamic CSS class patterns detected.".to_string(),
            "CSS selectors should be stable for tagging.".to_string(),
        ]);
    } else {
        lines.extend([
            "[WARNING] Dynamic CSS classes found.".to_string(),
            "Avoid using these directly in analytics tag rules.".to_string(),
            String::new(),
            "Selector workarounds:".to_string(),
            "  - [class^=\"stable-prefix-\"] matches class starting with prefix".to_string(),
            "  - [class$=\"-suffix\"] matches class ending with suffix".to_string(),
            "  - [class*=\"contains\"] matches class containing text".to_string(),
            "  - :contains(\"Button Text\") matches element text".to_string(),
        ]);
    }

    lines.push(String::new());
    lines
}

fn iframe_lines(score: &AggregateScore) -> Vec<String> {
    let total = score.total_iframe_count;
    let mut lines = vec![
        rule("-"),
        "3. IFRAMES".to_string(),
        rule("-"),
        format!(
            "Total Count: {} {}",
            total,
            if total == 0 { "[OK]" } else { "[WARNING]" }
        ),
    ];

    if total > 0 {
        lines.extend([
            String::new(),
            "Trackers lose visitor context across iframe boundaries.".to_string(),
            "Analytics will not work inside cross-origin iframes.".to_string(),
            String::new(),
            "IFRAME LOCATIONS:".to_string(),
        ]);

        // Group by page path, first appearance wins the ordering.
        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, frame) in score.iframes.iter().enumerate() {
            let page_path = short_page_path(&frame.page_url);
            if !groups.contains_key(&page_path) {
                order.push(page_path.clone());
            }
            groups.entry(page_path).or_default().push(index);
        }

        for page_path in order {
            let indexes = &groups[&page_path];
            lines.push(format!("  Page: {}", page_path));
            for index in indexes.iter().take(3) {
                let frame = &score.iframes[*index];
                let origin = if frame.is_cross_origin {
                    "[CROSS-ORIGIN]"
                } else {
                    "[same-origin]"
                };
                lines.push(format!(
                    "    {} {}",
                    origin,
                    clip_display(&frame.src, MAX_URL_DISPLAY)
                ));
            }
            if indexes.len() > 3 {
                lines.push(format!("    ... and {} more on this page", indexes.len() - 3));
            }
            lines.push(String::new());
        }
    }

    lines.push(String::new());
    lines
}

fn shadow_dom_lines(score: &AggregateScore) -> Vec<String> {
    let total = score.total_shadow_roots;
    let mut lines = vec![
        rule("-"),
        "4. SHADOW DOM".to_string(),
        rule("-"),
        format!(
            "Total Shadow Roots: {} {}",
            total,
            if total == 0 { "[OK]" } else { "[WARNING]" }
        ),
    ];

    if total > 0 {
        lines.extend([
            String::new(),
            "Analytics selectors cannot pierce Shadow DOM boundaries.".to_string(),
            "Elements inside shadow roots are invisible to tag selectors.".to_string(),
            String::new(),
            "SHADOW DOM LOCATIONS:".to_string(),
        ]);

        for shadow in &score.shadow_pages {
            lines.push(format!("  Page: {}", short_page_path(&shadow.page_url)));
            lines.push(format!("    Count: {} shadow root(s)", shadow.count));
            if !shadow.element_tags.is_empty() {
                lines.push(format!("    Elements: {}", shadow.element_tags.join(", ")));
            }
            lines.push(String::new());
        }

        lines.extend([
            "Workaround: Use the event-capture API or request engineering expose".to_string(),
            "            data attributes outside the shadow boundary.".to_string(),
        ]);
    }

    lines.push(String::new());
    lines
}

fn canvas_lines(score: &AggregateScore) -> Vec<String> {
    let total = score.total_canvas_count;
    let mut lines = vec![
        rule("-"),
        "5. CANVAS ELEMENTS".to_string(),
        rule("-"),
        format!(
            "Total Count: {} {}",
            total,
            if total == 0 { "[OK]" } else { "[INFO]" }
        ),
    ];

    if total > 0 {
        lines.extend([
            String::new(),
            "Canvas renders as pixels; clicks inside are not taggable.".to_string(),
            "Common uses: Charts, graphs, image editors, maps, games.".to_string(),
            String::new(),
            "CANVAS LOCATIONS:".to_string(),
        ]);

        for canvas in &score.canvas_pages {
            lines.push(format!("  Page: {}", short_page_path(&canvas.page_url)));
            lines.push(format!("    Count: {} canvas element(s)", canvas.count));
            if !canvas.dimensions.is_empty() {
                lines.push(format!("    Sizes: {}", canvas.dimensions.join(", ")));
            }
            lines.push(String::new());
        }

        lines.push(
            "Workaround: Use the event-capture API if canvas interactions need tracking."
                .to_string(),
        );
    }

    lines.push(String::new());
    lines
}

fn suggestion_lines(pages: &[PageAnalysis]) -> Vec<String> {
    // Deduplicate by selector string, keep first occurrence.
    let mut seen: HashSet<&str> = HashSet::new();
    let mut unique: Vec<&SelectorSuggestion> = Vec::new();
    for page in pages {
        for tally in [&page.buttons, &page.inputs, &page.links] {
            for suggestion in &tally.selector_suggestions {
                if seen.insert(suggestion.selector.as_str()) {
                    unique.push(suggestion);
                }
            }
        }
    }

    let mut lines = vec![rule("-"), "6. SUGGESTED SELECTORS".to_string(), rule("-")];

    if unique.is_empty() {
        lines.extend([
            "[GOOD] All interactive elements have stable IDs or".to_string(),
            "data-track-* attributes. No selector workarounds needed.".to_string(),
        ]);
    } else {
        lines.extend([
            format!("{} selector suggestion(s) for elements", unique.len()),
            "that lack stable IDs. Copy these into analytics tag rules.".to_string(),
            String::new(),
        ]);

        let tiers = [
            (Confidence::Excellent, "EXCELLENT (data-* test attributes)"),
            (Confidence::Good, "GOOD (aria-label, :contains, data-*)"),
            (
                Confidence::Acceptable,
                "ACCEPTABLE (class prefix, name, placeholder)",
            ),
        ];
        for (confidence, label) in tiers {
            let group: Vec<&SelectorSuggestion> = unique
                .iter()
                .copied()
                .filter(|s| s.confidence == confidence)
                .collect();
            if group.is_empty() {
                continue;
            }
            lines.push(format!("  [{}]", label));
            for suggestion in group.iter().take(8) {
                lines.push(format!("    {}", suggestion.element_desc));
                lines.push(format!("      -> {}", suggestion.selector));
            }
            if group.len() > 8 {
                lines.push(format!(
                    "    ... and {} more at this confidence level",
                    group.len() - 8
                ));
            }
            lines.push(String::new());
        }
    }

    lines.push(String::new());
    lines
}

fn summary_lines(score: &AggregateScore, pages: &[PageAnalysis]) -> Vec<String> {
    let mut lines = vec![
        rule("="),
        "              SUMMARY & RECOMMENDATIONS".to_string(),
        rule("="),
        format!("Overall Risk: {}", score.risk_level),
        String::new(),
        "TAGGING STRATEGY:".to_string(),
    ];

    let overall = score.overall_id_score;
    if overall >= 80.0 && !score.has_critical_dynamic_css {
        lines.extend([
            "  [GOOD] Standard selector tagging should work well.".to_string(),
            "  Use IDs as primary selectors where available.".to_string(),
        ]);
    } else if overall >= 50.0 {
        lines.extend([
            "  [MODERATE] Mixed approach needed.".to_string(),
            "  - Use stable IDs where available".to_string(),
            "  - Use :contains(\"text\") for buttons with clear labels".to_string(),
            "  - Use [class^=\"prefix-\"] for classes with stable prefixes".to_string(),
            "  - Request data-track-* attrs for critical CTAs".to_string(),
        ]);
    } else {
        lines.extend([
            "  [CHALLENGING] Significant work required.".to_string(),
            "  - Request engineering add data-track-* attributes".to_string(),
            "  - Use :contains() extensively".to_string(),
            "  - Avoid CSS class selectors".to_string(),
            "  - Consider the event-capture API for complex elements".to_string(),
        ]);
    }
    lines.push(String::new());

    let mut concerns: Vec<String> = Vec::new();
    if score.button_id_score < 70.0 {
        concerns.push(format!(
            "Low button ID stability ({:.0}%)",
            score.button_id_score
        ));
    }
    if score.has_critical_dynamic_css {
        concerns.push(format!(
            "Dynamic CSS classes detected ({} found)",
            score.total_dynamic_classes
        ));
    }
    if score.total_shadow_roots > 0 {
        let shadow_paths: Vec<String> = score
            .shadow_pages
            .iter()
            .take(3)
            .map(|shadow| short_page_path(&shadow.page_url))
            .collect();
        concerns.push(format!("Shadow DOM on: {}", shadow_paths.join(", ")));
    }
    if score.total_iframe_count > 2 {
        concerns.push(format!("Multiple iframes ({})", score.total_iframe_count));
    }

    if !concerns.is_empty() {
        lines.push("KEY CONCERNS:".to_string());
        for concern in &concerns {
            lines.push(format!("  * {}", concern));
        }
        lines.push(String::new());
    }

    let mut positives: Vec<String> = Vec::new();
    if score.track_attr_buttons > 0 || score.track_attr_inputs > 0 {
        positives.push(format!(
            "data-track-* attributes already in use ({} elements)",
            score.track_attr_buttons + score.track_attr_inputs
        ));
    }
    if score.stable_button_ids > 0 {
        positives.push(format!("{} buttons have stable IDs", score.stable_button_ids));
    }
    if score.text_content_buttons > 0 {
        positives.push(format!(
            "{} buttons have text (can use :contains)",
            score.text_content_buttons
        ));
    }

    if !positives.is_empty() {
        lines.push("POSITIVE INDICATORS:".to_string());
        for positive in &positives {
            lines.push(format!("  + {}", positive));
        }
        lines.push(String::new());
    }

    lines.push("RECOMMENDED NEXT STEPS:".to_string());
    if overall < 80.0 || score.has_critical_dynamic_css {
        lines.extend([
            "  1. Share this report with customer engineering team".to_string(),
            "  2. Request data-track-* attributes on key CTAs".to_string(),
            "  3. Identify elements that can use :contains() workaround".to_string(),
            "  4. Plan for event-capture API use where needed".to_string(),
        ]);
    } else {
        lines.extend([
            "  1. Proceed with standard tracker installation".to_string(),
            "  2. Prioritise ID-based selectors".to_string(),
            "  3. Test feature tags after deployment".to_string(),
        ]);
    }

    lines.push(String::new());
    lines.push(rule("="));

    lines.push(String::new());
    lines.push("Pages Scanned:".to_string());
    for (index, page) in pages.iter().enumerate() {
        lines.push(format!("  {}. {}", index + 1, clip_display(&page.url, 60)));
    }

    lines
}

fn warn_badge(count: usize) -> &'static str {
    if count > 0 { "[WARNING]" } else { "" }
}

fn excellent_badge(count: usize) -> &'static str {
    if count > 0 { "[EXCELLENT]" } else { "" }
}

/// Shorten a page URL to its path for display, keeping the tail when long.
fn short_page_path(url: &str) -> String {
    let path = Url::parse(url)
        .map(|parsed| parsed.path().to_string())
        .unwrap_or_else(|_| url.to_string());
    let char_count = path.chars().count();
    let shortened = if char_count > MAX_URL_DISPLAY {
        let tail: String = path
            .chars()
            .skip(char_count - (MAX_URL_DISPLAY - 3))
            .collect();
        format!("...{}", tail)
    } else {
        path
    };
    if shortened.is_empty() {
        "/".to_string()
    } else {
        shortened
    }
}

fn clip_display(value: &str, max: usize) -> String {
    if value.chars().count() > max {
        let clipped: String = value.chars().take(max).collect();
        format!("{}...", clipped)
    } else {
        value.to_string()
    }
}
