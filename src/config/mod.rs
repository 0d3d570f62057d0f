pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_non_empty_string, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Json,
    Csv,
}

#[cfg(feature = "cli")]
impl ReportFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            ReportFormat::Json => "programme_report.json",
            ReportFormat::Csv => "programme_report.csv",
        }
    }

    /// Separate investment-ledger file; JSON embeds the ledger in the report.
    pub fn ledger_file_name(&self) -> Option<&'static str> {
        match self {
            ReportFormat::Json => None,
            ReportFormat::Csv => Some("investment_ledger.csv"),
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "civic-incentives")]
#[command(about = "Runs an incentive programme roster and writes an eligibility report")]
pub struct CliConfig {
    /// Path to the TOML roster
    #[arg(short, long, default_value = "roster.toml")]
    pub roster: String,

    #[arg(short, long, default_value = "./output")]
    pub output: String,

    #[arg(long, value_enum, default_value_t = ReportFormat::Json)]
    pub format: ReportFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("roster", &self.roster)?;
        validate_non_empty_string("output", &self.output)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["civic-incentives"]);
        assert_eq!(config.roster, "roster.toml");
        assert_eq!(config.format, ReportFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_csv_format() {
        let config = CliConfig::parse_from([
            "civic-incentives",
            "--roster",
            "bonny.toml",
            "--format",
            "csv",
            "--verbose",
        ]);
        assert_eq!(config.format.file_name(), "programme_report.csv");
        assert_eq!(config.format.ledger_file_name(), Some("investment_ledger.csv"));
        assert_eq!(ReportFormat::Json.ledger_file_name(), None);
        assert!(config.verbose);
    }

    #[test]
    fn test_cli_rejects_empty_output() {
        let config = CliConfig::parse_from(["civic-incentives", "--output", ""]);
        assert!(config.validate().is_err());
    }
}
