use crate::{AttachedFile, LifecycleState, ResultRow};

/// Read-only projection of `SessionState` for the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelViewModel {
    /// `None` while the startup probe is still outstanding.
    pub backend_online: Option<bool>,
    pub lifecycle: LifecycleState,
    pub attached_file: Option<AttachedFile>,
    pub url_count: usize,
    pub can_submit: bool,
    pub keywords: Vec<String>,
    pub strong_negatives: String,
    pub weak_negatives: String,
    pub results: Vec<ResultRow>,
    /// Present only after a successful submission; distinguishes an empty
    /// result set from "no submission yet".
    pub results_banner: Option<String>,
    pub last_failure: Option<String>,
}
