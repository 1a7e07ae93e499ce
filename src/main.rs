use clap::Parser;
use selector_audit::cli::commands::{cmd_analyze, cmd_classify, cmd_patterns};
use selector_audit::cli::config::{Cli, Commands, load_config};
use selector_audit::scan::score::RiskLevel;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Analyze {
            capture,
            format,
            output,
        } => {
            // Resolve output settings: CLI > config > defaults
            let format = format
                .as_deref()
                .or(config.analyze.format.as_deref())
                .unwrap_or("text");
            let output = output.as_deref().or(config.analyze.output.as_deref());
            let risk = cmd_analyze(&capture, format, output, &config.scoring, cli.verbose)?;
            if risk == RiskLevel::High {
                std::process::exit(1);
            }
        }
        Commands::Classify { id, class } => {
            cmd_classify(id.as_deref(), class.as_deref());
        }
        Commands::Patterns => {
            cmd_patterns();
        }
    }

    Ok(())
}
