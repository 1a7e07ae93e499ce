use crate::capture::loader::load_capture;
use crate::patterns::class_rules::DYNAMIC_CLASS_RULES;
use crate::patterns::id_rules::DYNAMIC_ID_RULES;
use crate::patterns::{classify_class, classify_id};
use crate::report::report_model::FeasibilityReport;
use crate::report::text::generate_text_report;
use crate::scan::score::{AggregateScore, RiskLevel, ScoreConfig};
use crate::scan::session::ScanSession;

// ============================================================================
// analyze subcommand
// ============================================================================

/// Analyze a capture file and return the computed risk level.
pub fn cmd_analyze(
    capture_path: &str,
    format: &str,
    output: Option<&str>,
    scoring: &ScoreConfig,
    verbose: u8,
) -> Result<RiskLevel, Box<dyn std::error::Error>> {
    let capture = load_capture(capture_path)?;

    if verbose > 0 {
        eprintln!(
            "Analyzing {} ({} pages)...",
            capture.site_url,
            capture.pages.len()
        );
    }

    let session = ScanSession::from_capture(&capture);
    let score = AggregateScore::compute(&session.pages, scoring);

    if verbose > 1 {
        eprintln!(
            "  {} buttons, {} inputs, {} risk points",
            score.total_buttons, score.total_inputs, score.risk_points
        );
    }

    let now = chrono::Local::now();
    let output_content = match format {
        "json" => {
            let report = FeasibilityReport::from_session(&session, &now.to_rfc3339());
            serde_json::to_string_pretty(&report)?
        }
        _ => {
            let generated_at = now.format("%Y-%m-%d %H:%M").to_string();
            generate_text_report(&session, &score, &generated_at)
        }
    };

    // Write or print
    match output {
        Some(path) => std::fs::write(path, &output_content)?,
        None => println!("{}", output_content),
    }

    Ok(score.risk_level)
}

// ============================================================================
// classify subcommand
// ============================================================================

/// Classify an id and/or class token and print the verdicts.
pub fn cmd_classify(id: Option<&str>, class: Option<&str>) {
    if id.is_none() && class.is_none() {
        eprintln!("Nothing to classify: pass --id and/or --class");
        return;
    }

    if let Some(id) = id {
        let verdict = classify_id(id);
        if verdict.is_dynamic {
            println!("id \"{}\": DYNAMIC ({})", id, verdict.label);
            println!("  {}", verdict.reason);
            if verdict.has_stable_prefix {
                println!("  has stable prefix");
            }
        } else {
            println!("id \"{}\": STABLE", id);
        }
    }

    if let Some(class) = class {
        let verdict = classify_class(class);
        if verdict.is_dynamic {
            println!("class \"{}\": DYNAMIC ({})", class, verdict.label);
            println!("  {}", verdict.reason);
            if verdict.stable_prefix.is_empty() {
                println!("  no stable prefix");
            } else {
                println!("  stable prefix: {}", verdict.stable_prefix);
            }
        } else {
            println!("class \"{}\": STABLE", class);
        }
    }
}

// ============================================================================
// patterns subcommand
// ============================================================================

/// Print both rule tables in evaluation order.
pub fn cmd_patterns() {
    println!("Dynamic id rules ({}):", DYNAMIC_ID_RULES.len());
    for rule in DYNAMIC_ID_RULES {
        let prefix_note = if rule.has_stable_prefix {
            " [stable prefix]"
        } else {
            ""
        };
        println!("  {:<24} {}{}", rule.label, rule.pattern, prefix_note);
    }
    println!();
    println!("Dynamic class rules ({}):", DYNAMIC_CLASS_RULES.len());
    for rule in DYNAMIC_CLASS_RULES {
        println!("  {:<24} {}", rule.label, rule.pattern);
    }
}
