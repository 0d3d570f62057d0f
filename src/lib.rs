pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, ReportFormat};

pub use config::{cli::LocalStorage, toml_config::RosterConfig};
pub use core::{
    BonusPolicy, Citizen, EligibilityRecord, Enrolment, FiscalData, Incentive, InvestmentOutcome,
    Investor, Programme, ProgrammeReport, Registrable, Sector, ServiceKind, Startup,
    ValidityWindow,
};
pub use utils::error::{IncentiveError, Result};
