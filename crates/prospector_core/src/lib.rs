//! Prospector core: pure submission state machine and input reconciliation.
pub mod collect;
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, ScrapeRequest, Severity};
pub use msg::Msg;
pub use state::{
    AttachedFile, ExportOutcome, FailureReason, LifecycleState, ResultRow, SessionState,
    SubmissionOutcome, ValidationError, DEFAULT_KEYWORDS, DEFAULT_MAX_URLS,
    DEFAULT_STRONG_NEGATIVES, DEFAULT_WEAK_NEGATIVES,
};
pub use update::update;
pub use view_model::PanelViewModel;
