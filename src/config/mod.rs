pub mod credentials;
pub mod toml_config;

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "market-brief")]
#[command(about = "Collects the day's news, generates a market report and broadcasts it over LINE")]
pub struct CliConfig {
    #[arg(long, value_name = "FILE", help = "Optional TOML file overriding endpoints and limits")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Print the report instead of broadcasting it")]
    pub dry_run: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_is_production_run() {
        let config = CliConfig::try_parse_from(["market-brief"]).unwrap();
        assert!(config.config.is_none());
        assert!(!config.dry_run);
        assert!(!config.verbose);
        assert!(!config.json_logs);
    }

    #[test]
    fn test_flags_parse() {
        let config = CliConfig::try_parse_from([
            "market-brief",
            "--config",
            "brief.toml",
            "--dry-run",
            "--verbose",
        ])
        .unwrap();
        assert_eq!(config.config, Some(PathBuf::from("brief.toml")));
        assert!(config.dry_run);
        assert!(config.verbose);
    }
}
