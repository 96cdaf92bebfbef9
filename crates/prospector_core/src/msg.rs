use crate::{ExportOutcome, SubmissionOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Result of the startup reachability probe.
    HealthChecked { online: bool },
    /// A URL file was read; `content` is its full text.
    FileLoaded { name: String, content: String },
    /// The platform failed to read the chosen file.
    FileReadFailed { name: String, error: String },
    /// User detached the uploaded file.
    FileRemoved,
    /// User edited the free-text sites box.
    SitesTextChanged(String),
    /// User submitted a keyword candidate.
    KeywordSubmitted(String),
    /// User removed a keyword tag.
    KeywordRemoved(String),
    /// User edited the strong negative terms field.
    StrongNegativesChanged(String),
    /// User edited the weak negative terms field.
    WeakNegativesChanged(String),
    /// User asked to start the analysis.
    SubmitClicked,
    /// User asked to cancel the in-flight analysis.
    CancelClicked,
    /// The engine settled the in-flight submission.
    SubmissionSettled { outcome: SubmissionOutcome },
    /// User asked for the CSV download.
    ExportClicked,
    /// The engine finished (or failed) writing the CSV.
    ExportSettled { outcome: ExportOutcome },
    /// User asked for a fresh form.
    ResetClicked,
    /// Fallback for placeholder wiring.
    NoOp,
}
