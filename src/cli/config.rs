use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::scan::score::ScoreConfig;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "selector-audit",
    version,
    about = "Selector feasibility analysis for analytics tagging"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: selector-audit.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a DOM capture and produce a feasibility report
    Analyze {
        /// Path to the capture JSON file
        #[arg(long)]
        capture: String,

        /// Output format: text or json
        #[arg(long)]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Classify a single id and/or class token
    Classify {
        /// Element id to classify
        #[arg(long)]
        id: Option<String>,

        /// CSS class token to classify
        #[arg(long)]
        class: Option<String>,
    },

    /// Print the dynamic-pattern rule tables in evaluation order
    Patterns,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `selector-audit.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub scoring: ScoreConfig,
    #[serde(default)]
    pub analyze: AnalyzeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scoring: ScoreConfig::default(),
            analyze: AnalyzeConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnalyzeConfig {
    pub format: Option<String>,
    pub output: Option<String>,
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("selector-audit.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}
