use thiserror::Error;

#[derive(Error, Debug)]
pub enum IncentiveError {
    #[error("Incentive {code} has already been received")]
    DuplicateIncentive { code: String },

    #[error("Citizen with tax id {tax_id} is already participating")]
    DuplicateParticipant { tax_id: String },

    #[error("Investment amount must be positive, got {amount}")]
    InvalidAmount { amount: f64 },

    #[error("Insufficient savings: requested {requested}, available {available}")]
    InsufficientSavings { requested: f64, available: f64 },

    #[error("Association \"{name}\" is not a partner of {startup}")]
    UnknownAssociation { name: String, startup: String },

    #[error("Unsupported service kind: {kind}")]
    UnsupportedService { kind: String },

    #[error("Unknown sector: {sector}")]
    UnknownSector { sector: String },

    #[error("Invalid validity window: {start} is after {end}")]
    InvalidValidityWindow {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration parsing error: {message}")]
    ConfigParseError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Registry,
    Savings,
    Service,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl IncentiveError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            IncentiveError::DuplicateIncentive { .. }
            | IncentiveError::DuplicateParticipant { .. }
            | IncentiveError::UnknownAssociation { .. } => ErrorCategory::Registry,
            IncentiveError::InvalidAmount { .. } | IncentiveError::InsufficientSavings { .. } => {
                ErrorCategory::Savings
            }
            IncentiveError::UnsupportedService { .. } => ErrorCategory::Service,
            IncentiveError::UnknownSector { .. }
            | IncentiveError::InvalidValidityWindow { .. }
            | IncentiveError::InvalidConfigValueError { .. }
            | IncentiveError::MissingConfigError { .. }
            | IncentiveError::ConfigParseError { .. } => ErrorCategory::Configuration,
            IncentiveError::IoError(_)
            | IncentiveError::SerializationError(_)
            | IncentiveError::CsvError(_) => ErrorCategory::System,
        }
    }

    /// Rejections raised by normal usage are `Low`; they never abort a run.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Registry | ErrorCategory::Savings | ErrorCategory::Service => {
                ErrorSeverity::Low
            }
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Whether the error is an expected rejection rather than a failure.
    pub fn is_rejection(&self) -> bool {
        self.severity() == ErrorSeverity::Low
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            IncentiveError::DuplicateIncentive { .. } => {
                "The incentive is already registered; no action is needed"
            }
            IncentiveError::DuplicateParticipant { .. } => {
                "The citizen is already participating; no action is needed"
            }
            IncentiveError::InvalidAmount { .. } => "Use an amount greater than zero",
            IncentiveError::InsufficientSavings { .. } => {
                "Lower the amount or wait for further bonus rewards"
            }
            IncentiveError::UnknownAssociation { .. } => {
                "Choose one of the startup's partner associations"
            }
            IncentiveError::UnsupportedService { .. } => {
                "Request either ISEE or ANNUAL-TAX-FILING"
            }
            IncentiveError::UnknownSector { .. } => {
                "Use one of: sport, culture, environment, energy, health, other"
            }
            IncentiveError::InvalidValidityWindow { .. } => {
                "Make sure valid_from is not later than valid_until"
            }
            IncentiveError::InvalidConfigValueError { .. }
            | IncentiveError::MissingConfigError { .. }
            | IncentiveError::ConfigParseError { .. } => {
                "Check the roster file against the documented format"
            }
            IncentiveError::IoError(_) => "Check that the path exists and is accessible",
            IncentiveError::SerializationError(_) | IncentiveError::CsvError(_) => {
                "Report generation failed; retry with another output format"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid roster configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
            _ => format!("Request rejected: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, IncentiveError>;
