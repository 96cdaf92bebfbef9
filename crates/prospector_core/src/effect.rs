use crate::ResultRow;

/// Immutable submission payload, constructed once at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    pub urls: Vec<String>,
    pub keywords: Vec<String>,
    pub strong_negatives: Vec<String>,
    pub weak_negatives: Vec<String>,
}

/// Severity tag for the uniform notification channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Probe the backend once at startup.
    CheckHealth,
    /// Dispatch the single in-flight scrape call.
    SubmitScrape { request: ScrapeRequest },
    /// Signal the in-flight call for cooperative cancellation.
    CancelSubmission,
    /// Serialize and write the given rows as CSV.
    ExportCsv { rows: Vec<ResultRow> },
    /// Surface a user-visible message.
    Notify { severity: Severity, message: String },
}

impl Effect {
    pub fn notify(severity: Severity, message: impl Into<String>) -> Self {
        Effect::Notify {
            severity,
            message: message.into(),
        }
    }
}
