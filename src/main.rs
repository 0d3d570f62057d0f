use anyhow::Context;
use civic_incentives::core::Storage;
use civic_incentives::utils::error::ErrorSeverity;
use civic_incentives::utils::logger::{self, LogFormat};
use civic_incentives::utils::validation::Validate;
use civic_incentives::{CliConfig, IncentiveError, LocalStorage, ReportFormat, RosterConfig};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_logger(LogFormat::from_flag(config.json_logs), config.verbose);

    tracing::info!("Starting civic-incentives CLI");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(1);
    }

    match run(&config).await {
        Ok(output_path) => {
            tracing::info!("Report saved to: {}", output_path);
            println!("Report saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("Programme run failed: {:#}", e);

            let exit_code = match e.downcast_ref::<IncentiveError>() {
                Some(err) => {
                    eprintln!("{}", err.user_friendly_message());
                    eprintln!("Suggestion: {}", err.recovery_suggestion());
                    match err.severity() {
                        ErrorSeverity::Low => 0,
                        ErrorSeverity::Medium => 2,
                        ErrorSeverity::High => 1,
                        ErrorSeverity::Critical => 3,
                    }
                }
                None => {
                    eprintln!("{:#}", e);
                    1
                }
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn run(config: &CliConfig) -> anyhow::Result<String> {
    let input = LocalStorage::new(".");
    let roster = RosterConfig::from_storage(&input, &config.roster).await?;
    tracing::info!("Loaded roster for \"{}\" from {}", roster.startup.name, config.roster);

    let mut programme = roster.into_programme()?;
    let report = programme.run();

    let data = match config.format {
        ReportFormat::Json => report.to_json()?.into_bytes(),
        ReportFormat::Csv => report.to_csv()?,
    };

    let output = LocalStorage::new(config.output.clone());
    let file_name = config.format.file_name();
    output
        .write_file(file_name, &data)
        .await
        .with_context(|| format!("writing {} to {}", file_name, config.output))?;

    if let Some(ledger_name) = config.format.ledger_file_name() {
        output
            .write_file(ledger_name, &report.ledger_to_csv()?)
            .await
            .with_context(|| format!("writing {} to {}", ledger_name, config.output))?;
    }

    Ok(format!("{}/{}", config.output, file_name))
}
