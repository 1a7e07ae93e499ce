use selector_audit::analyze_capture;
use selector_audit::capture::ScanCapture;
use selector_audit::element::ElementSnapshot;
use selector_audit::report::{generate_text_report, FeasibilityReport};
use selector_audit::scan::{AggregateScore, RiskLevel};

use crate::common::builders::{
    button_with_id, button_with_text, canvas, capture, data_attrs, element, iframe, input_named,
    page, probes, shadow_host,
};

mod common;

// ============================================================================
// Helper builders
// ============================================================================

fn render(scan: &ScanCapture) -> (String, AggregateScore) {
    let (session, score) = analyze_capture(scan);
    let text = generate_text_report(&session, &score, "2026-08-22 10:30");
    (text, score)
}

/// A checkout page where 3 of 10 buttons keep stable ids.
fn checkout_scan() -> ScanCapture {
    let mut checkout = page("https://shop.example.com/checkout");
    for i in 0..7 {
        checkout
            .buttons
            .push(button_with_id(&format!("react-select-{}-input", i)));
    }
    for id in ["place-order", "apply-coupon", "edit-cart"] {
        checkout.buttons.push(button_with_id(id));
    }
    capture("https://shop.example.com", vec![checkout])
}

// ============================================================================
// 1. Low-stability scan end to end
// ============================================================================

#[test]
fn low_stability_scan_reports_high_risk() {
    let (text, score) = render(&checkout_scan());

    assert_eq!(score.risk_points, 3);
    assert_eq!(score.risk_level, RiskLevel::High);

    assert!(text.contains("              SELECTOR FEASIBILITY REPORT"));
    assert!(text.contains("Site: https://shop.example.com"));
    assert!(text.contains("Pages Analysed: 1"));
    assert!(text.contains("Date: 2026-08-22 10:30"));
    assert!(text.contains("Risk Level: HIGH"));
    assert!(text.contains("Overall ID Stability Score: 30%"));
    assert!(text.contains("  With stable IDs: 3 (30%) [NEEDS WORK]"));
    assert!(text.contains("  With dynamic IDs: 7 [WARNING]"));
    assert!(text.contains("  [CHALLENGING] Significant work required."));
    assert!(text.contains("  * Low button ID stability (30%)"));
    assert!(text.contains("  2. Request data-track-* attributes on key CTAs"));
    assert!(text.contains("  4. Plan for event-capture API use where needed"));
    assert!(text.contains("  1. https://shop.example.com/checkout"));
}

#[test]
fn dynamic_id_examples_show_reason_and_prefix_note() {
    let (text, _) = render(&checkout_scan());

    assert!(text.contains("Example DYNAMIC IDs (problematic):"));
    assert!(text.contains("  id=\"react-select-0-input\""));
    assert!(text.contains("     -> React Select instance ID [has stable prefix]"));
    assert!(text.contains("Example STABLE IDs (good for targeting):"));
    assert!(text.contains("  id=\"place-order\""));
}

// ============================================================================
// 2. Empty scan
// ============================================================================

#[test]
fn empty_scan_reports_low_risk_and_perfect_score() {
    let scan = capture(
        "https://static.example.com",
        vec![page("https://static.example.com/")],
    );
    let (text, score) = render(&scan);

    assert_eq!(score.risk_points, 0);
    assert_eq!(score.risk_level, RiskLevel::Low);
    assert!(text.contains("Risk Level: LOW"));
    assert!(text.contains("Overall ID Stability Score: 100%"));
    assert!(text.contains("  Total: 0"));
    assert!(text.contains("[GOOD] No dynamic CSS class patterns detected."));
    assert!(text.contains("Total Count: 0 [OK]"));
    assert!(text.contains("Total Shadow Roots: 0 [OK]"));
}

#[test]
fn zero_count_badges_stay_blank() {
    let scan = capture(
        "https://static.example.com",
        vec![page("https://static.example.com/")],
    );
    let (text, _) = render(&scan);

    // Absent badges leave a trailing space behind the count.
    assert!(text.contains("  With dynamic IDs: 0 \n"));
    assert!(text.contains("  With data-track-* attr: 0 \n"));
}

// ============================================================================
// 3. Dynamic CSS warning block
// ============================================================================

#[test]
fn css_warning_block_only_appears_with_dynamic_classes() {
    let (clean_text, _) = render(&checkout_scan());
    assert!(!clean_text.contains("CRITICAL: DYNAMIC CSS SELECTORS DETECTED"));

    let mut styled = page("https://app.example.com/");
    styled.page_classes.push("jss100".to_string());
    styled.page_classes.push("button-7234523bf".to_string());
    let scan = capture("https://app.example.com", vec![styled]);
    let (text, score) = render(&scan);

    assert!(score.has_critical_dynamic_css);
    assert!(text.contains("!!! CRITICAL: DYNAMIC CSS SELECTORS DETECTED !!!"));
    assert!(text.contains("  \"jss100\""));
    assert!(text.contains("     -> JSS generated class [NO stable prefix]"));
    assert!(text.contains("  \"button-7234523bf\""));
    assert!(text.contains("     -> Dynamic hash suffix (e.g., button-7234523bf) [prefix: button]"));
    assert!(text.contains("WORKAROUNDS:"));
    assert!(text.contains("  1. Use starts-with [class^=\"prefix-\"] if stable prefix exists"));
    assert!(text.contains("  4. Use stable IDs instead of classes"));
    assert!(text.contains("[WARNING] Dynamic CSS classes found."));
    assert!(text.contains("Avoid using these directly in analytics tag rules."));
}

#[test]
fn css_warning_block_caps_listed_classes_at_ten() {
    let mut styled = page("https://app.example.com/");
    for i in 0..12 {
        styled.page_classes.push(format!("jss{}", i + 100));
    }
    let scan = capture("https://app.example.com", vec![styled]);
    let (text, _) = render(&scan);

    assert!(text.contains("  \"jss109\""));
    assert!(!text.contains("  \"jss110\""));
    assert!(text.contains("  ... and 2 more dynamic classes"));
}

// ============================================================================
// 4. Detected software section
// ============================================================================

#[test]
fn software_section_marks_installed_tracker_and_competitors() {
    let mut home = page("https://app.example.com/");
    home.probes = probes(&[
        ("react_root", true),
        ("tracker", true),
        ("appcues", true),
    ]);
    let scan = capture("https://app.example.com", vec![home]);
    let (text, _) = render(&scan);

    assert!(text.contains("0. DETECTED SOFTWARE"));
    assert!(text.contains("Frontend: React"));
    assert!(text.contains(
        "Analytics: Site tracker (already installed), Appcues [ALREADY INSTALLED] [COMPETITORS: Appcues]"
    ));
}

#[test]
fn software_section_reports_nothing_detected() {
    let scan = capture(
        "https://plain.example.com",
        vec![page("https://plain.example.com/")],
    );
    let (text, _) = render(&scan);

    assert!(text.contains("No common frameworks detected"));
}

// ============================================================================
// 5. ARIA section gating
// ============================================================================

#[test]
fn aria_section_is_omitted_without_aria_signals() {
    let (text, _) = render(&checkout_scan());
    assert!(!text.contains("1b. ARIA ATTRIBUTES"));
}

#[test]
fn aria_section_lists_labels_and_roles() {
    let mut home = page("https://app.example.com/");
    home.buttons.push(ElementSnapshot {
        aria_label: "Close dialog".into(),
        role: "menuitem".into(),
        ..element("button")
    });
    home.inputs.push(ElementSnapshot {
        aria_label: "A very long descriptive search field label here".into(),
        ..element("input")
    });
    let scan = capture("https://app.example.com", vec![home]);
    let (text, _) = render(&scan);

    assert!(text.contains("1b. ARIA ATTRIBUTES (Alternative Selectors)"));
    assert!(text.contains(
        "  With aria-label: 1 [GOOD - can use [aria-label=\"...\"] selector]"
    ));
    assert!(text.contains("  [aria-label=\"Close dialog\"]"));
    assert!(text.contains("  [aria-label=\"A very long descriptive search field lab...\"]"));
    assert!(text.contains(
        "Usage: button[aria-label=\"Submit\"], input[aria-label=\"Search\"]"
    ));
    assert!(text.contains("Role attributes found:"));
    assert!(text.contains("  [role=\"menuitem\"]"));
}

// ============================================================================
// 6. Iframe section
// ============================================================================

#[test]
fn iframes_are_grouped_per_page_and_capped() {
    let mut dashboard = page("https://app.example.com/dashboard");
    dashboard.iframes = vec![
        iframe("https://js.stripe.com/v3/"),
        iframe("/local-widget"),
        iframe("https://app.example.com/help"),
        iframe("https://www.youtube.com/embed/intro"),
    ];
    let mut pricing = page("https://app.example.com/pricing");
    pricing.iframes = vec![iframe("")];
    let scan = capture("https://app.example.com", vec![dashboard, pricing]);
    let (text, _) = render(&scan);

    assert!(text.contains("3. IFRAMES"));
    assert!(text.contains("Total Count: 5 [WARNING]"));
    assert!(text.contains("Trackers lose visitor context across iframe boundaries."));
    assert!(text.contains("  Page: /dashboard"));
    assert!(text.contains("    [CROSS-ORIGIN] https://js.stripe.com/v3/"));
    assert!(text.contains("    [same-origin] /local-widget"));
    assert!(text.contains("    [same-origin] https://app.example.com/help"));
    assert!(!text.contains("youtube.com/embed/intro"));
    assert!(text.contains("    ... and 1 more on this page"));
    assert!(text.contains("  Page: /pricing"));
    assert!(text.contains("    [same-origin] (no src)"));
}

#[test]
fn long_iframe_sources_are_clipped() {
    let src = format!("https://cdn.example.com/{}", "a".repeat(40));
    let mut home = page("https://app.example.com/");
    home.iframes = vec![iframe(&src)];
    let scan = capture("https://app.example.com", vec![home]);
    let (text, _) = render(&scan);

    let clipped: String = src.chars().take(50).collect();
    assert!(text.contains(&format!("    [CROSS-ORIGIN] {}...", clipped)));
    assert!(!text.contains(&src));
}

// ============================================================================
// 7. Shadow DOM and canvas sections
// ============================================================================

#[test]
fn shadow_dom_section_lists_hosts_per_page() {
    let mut home = page("https://app.example.com/");
    home.shadow_hosts = vec![
        shadow_host("chat-widget", Some("support"), None),
        shadow_host("user-card", None, Some("profile compact")),
    ];
    let scan = capture("https://app.example.com", vec![home]);
    let (text, score) = render(&scan);

    assert_eq!(score.total_shadow_roots, 2);
    assert!(text.contains("Total Shadow Roots: 2 [WARNING]"));
    assert!(text.contains("Analytics selectors cannot pierce Shadow DOM boundaries."));
    assert!(text.contains("  Page: /"));
    assert!(text.contains("    Count: 2 shadow root(s)"));
    assert!(text.contains("    Elements: chat-widget#support, user-card.profile"));
    assert!(text.contains("Workaround: Use the event-capture API or request engineering expose"));
    assert!(text.contains("            data attributes outside the shadow boundary."));
}

#[test]
fn canvas_section_lists_sizes() {
    let mut home = page("https://app.example.com/");
    home.canvases = vec![canvas(300.0, 150.0, Some("chart"), None)];
    let scan = capture("https://app.example.com", vec![home]);
    let (text, _) = render(&scan);

    assert!(text.contains("5. CANVAS ELEMENTS"));
    assert!(text.contains("Total Count: 1 [INFO]"));
    assert!(text.contains("Canvas renders as pixels; clicks inside are not taggable."));
    assert!(text.contains("    Sizes: 300x150 (id=chart)"));
    assert!(text.contains(
        "Workaround: Use the event-capture API if canvas interactions need tracking."
    ));
}

// ============================================================================
// 8. Suggested selectors section
// ============================================================================

#[test]
fn clean_scan_needs_no_suggestions() {
    let mut home = page("https://app.example.com/");
    home.buttons.push(button_with_id("save-settings"));
    let scan = capture("https://app.example.com", vec![home]);
    let (text, _) = render(&scan);

    assert!(text.contains("6. SUGGESTED SELECTORS"));
    assert!(text.contains("[GOOD] All interactive elements have stable IDs or"));
    assert!(text.contains("data-track-* attributes. No selector workarounds needed."));
}

#[test]
fn suggestions_are_grouped_by_confidence() {
    let mut home = page("https://app.example.com/");
    home.buttons.push(ElementSnapshot {
        data_attrs: data_attrs(&[("data-testid", "checkout")]),
        ..element("button")
    });
    home.buttons.push(button_with_text("Add to cart"));
    home.inputs.push(input_named("email"));
    let scan = capture("https://app.example.com", vec![home]);
    let (text, _) = render(&scan);

    assert!(text.contains("3 selector suggestion(s) for elements"));
    assert!(text.contains("that lack stable IDs. Copy these into analytics tag rules."));
    assert!(text.contains("  [EXCELLENT (data-* test attributes)]"));
    assert!(text.contains("      -> button[data-testid=\"checkout\"]"));
    assert!(text.contains("  [GOOD (aria-label, :contains, data-*)]"));
    assert!(text.contains("    Button \"Add to cart\""));
    assert!(text.contains("      -> button:contains(\"Add to cart\")"));
    assert!(text.contains("  [ACCEPTABLE (class prefix, name, placeholder)]"));
    assert!(text.contains("    Input [name=\"email\"]"));
    assert!(text.contains("      -> input[name=\"email\"]"));
}

#[test]
fn repeated_selectors_are_reported_once() {
    let mut home = page("https://app.example.com/");
    home.buttons.push(button_with_text("Add to cart"));
    let mut pricing = page("https://app.example.com/pricing");
    pricing.buttons.push(button_with_text("Add to cart"));
    let scan = capture("https://app.example.com", vec![home, pricing]);
    let (text, _) = render(&scan);

    assert!(text.contains("1 selector suggestion(s) for elements"));
    assert_eq!(text.matches("-> button:contains(\"Add to cart\")").count(), 1);
}

#[test]
fn suggestion_tiers_cap_at_eight_shown() {
    let mut home = page("https://app.example.com/");
    for i in 0..10 {
        home.buttons.push(button_with_text(&format!("Action {}", i)));
    }
    let scan = capture("https://app.example.com", vec![home]);
    let (text, _) = render(&scan);

    assert!(text.contains("10 selector suggestion(s) for elements"));
    assert!(text.contains("      -> button:contains(\"Action 7\")"));
    assert!(!text.contains("      -> button:contains(\"Action 8\")"));
    assert!(text.contains("    ... and 2 more at this confidence level"));
}

// ============================================================================
// 9. Summary strategies
// ============================================================================

#[test]
fn stable_scans_get_the_standard_strategy() {
    let mut home = page("https://app.example.com/");
    for i in 0..9 {
        home.buttons.push(button_with_id(&format!("action-{}", i)));
    }
    home.buttons.push(button_with_id("ember482"));
    let scan = capture("https://app.example.com", vec![home]);
    let (text, _) = render(&scan);

    assert!(text.contains("              SUMMARY & RECOMMENDATIONS"));
    assert!(text.contains("Overall Risk: LOW"));
    assert!(text.contains("  [GOOD] Standard selector tagging should work well."));
    assert!(text.contains("  1. Proceed with standard tracker installation"));
    assert!(text.contains("  3. Test feature tags after deployment"));
    assert!(!text.contains("KEY CONCERNS:"));
    assert!(text.contains("POSITIVE INDICATORS:"));
    assert!(text.contains("  + 9 buttons have stable IDs"));
}

#[test]
fn mixed_scans_get_the_moderate_strategy() {
    let mut home = page("https://app.example.com/");
    for i in 0..6 {
        home.buttons.push(button_with_id(&format!("action-{}", i)));
    }
    for i in 0..4 {
        home.buttons.push(button_with_id(&format!("ember{}", i + 100)));
    }
    let scan = capture("https://app.example.com", vec![home]);
    let (text, _) = render(&scan);

    assert!(text.contains("  [MODERATE] Mixed approach needed."));
    assert!(text.contains("  - Request data-track-* attrs for critical CTAs"));
    assert!(text.contains("KEY CONCERNS:"));
    assert!(text.contains("  * Low button ID stability (60%)"));
}

#[test]
fn summary_lists_structural_concerns() {
    let mut home = page("https://app.example.com/very/deep/settings");
    home.shadow_hosts = vec![shadow_host("chat-widget", None, None)];
    home.iframes = vec![iframe("/a"), iframe("/b"), iframe("/c")];
    for i in 0..21 {
        home.page_classes.push(format!("jss{}", i + 100));
    }
    let scan = capture("https://app.example.com", vec![home]);
    let (text, _) = render(&scan);

    assert!(text.contains("  * Dynamic CSS classes detected (21 found)"));
    assert!(text.contains("  * Shadow DOM on: /very/deep/settings"));
    assert!(text.contains("  * Multiple iframes (3)"));
}

// ============================================================================
// 10. Structured report
// ============================================================================

fn rich_scan() -> ScanCapture {
    let mut checkout = page("https://shop.example.com/checkout");
    checkout.buttons.push(button_with_id("place-order"));
    checkout.buttons.push(button_with_id("ember482"));
    checkout.buttons.push(button_with_text("Apply coupon"));
    checkout.inputs.push(input_named("email"));
    checkout.page_classes.push("jss100".to_string());
    checkout.iframes = vec![iframe("https://js.stripe.com/v3/")];
    checkout.shadow_hosts = vec![shadow_host("chat-widget", Some("support"), None)];
    checkout.canvases = vec![canvas(300.0, 150.0, None, Some("spend-chart"))];
    checkout.probes = probes(&[("react_root", true)]);
    checkout.meta_generator = "Shopify".to_string();
    capture("https://shop.example.com", vec![checkout])
}

#[test]
fn structured_report_round_trips_through_json() {
    let (session, _) = analyze_capture(&rich_scan());
    let report = FeasibilityReport::from_session(&session, "2026-08-22T10:30:00Z");

    let json = serde_json::to_string_pretty(&report).unwrap();
    let restored: FeasibilityReport = serde_json::from_str(&json).unwrap();

    assert_eq!(report, restored);
}

#[test]
fn structured_report_carries_meta_and_findings() {
    let (session, _) = analyze_capture(&rich_scan());
    let report = FeasibilityReport::from_session(&session, "2026-08-22T10:30:00Z");

    assert_eq!(report.meta.site, "https://shop.example.com");
    assert_eq!(report.meta.domain, "shop.example.com");
    assert_eq!(report.meta.pages_analysed, 1);
    assert_eq!(report.meta.timestamp, "2026-08-22T10:30:00Z");
    assert_eq!(report.software.frontend_frameworks, vec!["React".to_string()]);
    assert_eq!(report.software.meta_generator, "Shopify");

    let page = &report.pages[0];
    assert_eq!(page.buttons.total, 3);
    assert_eq!(page.buttons.stable_ids, 1);
    assert_eq!(page.dynamic_class_count, 1);
    assert_eq!(page.iframes[0].src, "https://js.stripe.com/v3/");
    assert!(page.iframes[0].is_cross_origin);
    assert_eq!(page.shadow_dom.as_ref().unwrap().count, 1);
    assert_eq!(
        page.canvas.as_ref().unwrap().dimensions,
        vec!["300x150 (.spend-chart)".to_string()]
    );
}

#[test]
fn example_pairs_serialize_as_two_element_arrays() {
    let (session, _) = analyze_capture(&rich_scan());
    let report = FeasibilityReport::from_session(&session, "2026-08-22T10:30:00Z");

    let value = serde_json::to_value(&report).unwrap();
    let pair = &value["pages"][0]["buttons"]["dynamic_id_examples"][0];
    let entries = pair.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], "ember482");
}
