use crate::collect;
use crate::view_model::PanelViewModel;

/// Default cap on the number of URLs accepted per submission.
pub const DEFAULT_MAX_URLS: usize = 500;

/// Keyword list seeded into a fresh session (backend locale domain terms).
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "trator",
    "tratores",
    "massey ferguson",
    "john deere",
    "valtra",
    "valmet",
    "new holland",
    "case ih",
    "agrícola",
    "agricola",
    "retroescavadeira",
    "pá carregadeira",
    "motocana",
    "plantadeira",
    "colheitadeira",
    "esteira",
    "motoniveladora",
];

/// Strong negative terms seeded into a fresh session.
pub const DEFAULT_STRONG_NEGATIVES: &str = "scania, iveco, daf, constellation, \
vw delivery, vw worker, mercedes benz, volvo fh, volvo vm, onibus, ônibus, bus, \
micro-onibus, carcaça, sucata de ferro, sucata de motor";

/// Weak negative terms seeded into a fresh session.
pub const DEFAULT_WEAK_NEGATIVES: &str = "caminhão, caminhao, truck, \
cavalo mecânico, lote de pneu, jogo de pneu, pneus soltos, lote de peças, \
caixa de peças, manual do proprietário, catálogo, edital, condições de venda";

/// Lifecycle of the single permitted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Idle,
    Submitting,
    Cancelled,
    Succeeded,
    Failed,
}

/// One match returned by the backend. Fields are opaque pass-through;
/// absent fields decode to empty strings upstream of this type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultRow {
    pub site: String,
    pub terms: String,
    pub description: String,
    pub link: String,
}

/// Info about the currently attached URL file, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedFile {
    pub name: String,
    pub url_count: usize,
}

/// Why a settled submission failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    Transport,
    HttpStatus(u16),
    Timeout,
    MalformedResponse,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::Transport => write!(f, "network error"),
            FailureReason::HttpStatus(code) => write!(f, "http status {code}"),
            FailureReason::Timeout => write!(f, "timeout"),
            FailureReason::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

/// Terminal outcome of an in-flight submission, as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Completed(Vec<ResultRow>),
    Failed {
        reason: FailureReason,
        message: String,
    },
    Cancelled,
}

/// Outcome of a CSV export effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written(String),
    Failed(String),
}

/// Pre-flight validation failures. Reported to the user; never change state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NoUrls,
    TooManyUrls { count: usize, max: usize },
    BackendOffline,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::NoUrls => write!(f, "Add at least one URL"),
            ValidationError::TooManyUrls { count, max } => {
                write!(f, "Too many URLs: {count} collected, limit is {max}")
            }
            ValidationError::BackendOffline => {
                write!(f, "Backend is offline; check the API address")
            }
        }
    }
}

/// The whole session, as an explicit value. `update` consumes and returns it;
/// nothing outside the update cycle mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    lifecycle: LifecycleState,
    backend_online: Option<bool>,
    file_urls: Vec<String>,
    attached_file: Option<AttachedFile>,
    sites_text: String,
    keywords: Vec<String>,
    strong_negatives: String,
    weak_negatives: String,
    results: Vec<ResultRow>,
    last_failure: Option<String>,
    max_urls: usize,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::with_max_urls(DEFAULT_MAX_URLS)
    }

    pub fn with_max_urls(max_urls: usize) -> Self {
        Self {
            lifecycle: LifecycleState::Idle,
            backend_online: None,
            file_urls: Vec::new(),
            attached_file: None,
            sites_text: String::new(),
            keywords: DEFAULT_KEYWORDS.iter().map(|k| (*k).to_owned()).collect(),
            strong_negatives: DEFAULT_STRONG_NEGATIVES.to_owned(),
            weak_negatives: DEFAULT_WEAK_NEGATIVES.to_owned(),
            results: Vec::new(),
            last_failure: None,
            max_urls,
        }
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    pub fn backend_online(&self) -> Option<bool> {
        self.backend_online
    }

    pub fn max_urls(&self) -> usize {
        self.max_urls
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn strong_negatives(&self) -> &str {
        &self.strong_negatives
    }

    pub fn weak_negatives(&self) -> &str {
        &self.weak_negatives
    }

    pub fn results(&self) -> &[ResultRow] {
        &self.results
    }

    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    /// Union of file-provided and free-text URLs, order-stable, deduplicated.
    pub fn collected_urls(&self) -> Vec<String> {
        collect::merge_urls(&self.file_urls, &self.sites_text)
    }

    pub(crate) fn set_backend_online(&mut self, online: bool) {
        self.backend_online = Some(online);
    }

    /// Replace the file-provided URL set. Clears the free-text box so the
    /// same list is not counted twice in the UI (the union at submit time
    /// still merges both sources).
    pub(crate) fn attach_file(&mut self, name: String, urls: Vec<String>) {
        self.attached_file = Some(AttachedFile {
            name,
            url_count: urls.len(),
        });
        self.file_urls = urls;
        self.sites_text.clear();
    }

    pub(crate) fn detach_file(&mut self) {
        self.attached_file = None;
        self.file_urls.clear();
    }

    pub(crate) fn set_sites_text(&mut self, text: String) {
        self.sites_text = text;
    }

    pub(crate) fn set_keywords(&mut self, keywords: Vec<String>) {
        self.keywords = keywords;
    }

    pub(crate) fn set_strong_negatives(&mut self, text: String) {
        self.strong_negatives = text;
    }

    pub(crate) fn set_weak_negatives(&mut self, text: String) {
        self.weak_negatives = text;
    }

    /// Enter `Submitting`. Prior results are discarded; the new result set
    /// arrives wholesale on success.
    pub(crate) fn begin_submission(&mut self) {
        self.lifecycle = LifecycleState::Submitting;
        self.results.clear();
        self.last_failure = None;
    }

    pub(crate) fn settle_success(&mut self, rows: Vec<ResultRow>) {
        self.lifecycle = LifecycleState::Succeeded;
        self.results = rows;
    }

    pub(crate) fn settle_failure(&mut self, message: String) {
        self.lifecycle = LifecycleState::Failed;
        self.last_failure = Some(message);
    }

    pub(crate) fn settle_cancelled(&mut self) {
        self.lifecycle = LifecycleState::Cancelled;
    }

    /// Back to defaults: clears URLs, results and failure, restores the
    /// seeded keyword and negative-term lists. Backend reachability and the
    /// configured URL cap survive the reset.
    pub(crate) fn reset(&mut self) {
        let max_urls = self.max_urls;
        let backend_online = self.backend_online;
        *self = Self::with_max_urls(max_urls);
        self.backend_online = backend_online;
    }

    pub fn view(&self) -> PanelViewModel {
        let url_count = self.collected_urls().len();
        let can_submit = url_count > 0
            && self.backend_online == Some(true)
            && self.lifecycle != LifecycleState::Submitting;
        PanelViewModel {
            backend_online: self.backend_online,
            lifecycle: self.lifecycle,
            attached_file: self.attached_file.clone(),
            url_count,
            can_submit,
            keywords: self.keywords.clone(),
            strong_negatives: self.strong_negatives.clone(),
            weak_negatives: self.weak_negatives.clone(),
            results: self.results.clone(),
            results_banner: self.results_banner(),
            last_failure: self.last_failure.clone(),
        }
    }

    fn results_banner(&self) -> Option<String> {
        if self.lifecycle != LifecycleState::Succeeded {
            return None;
        }
        if self.results.is_empty() {
            // Distinct empty state, not an empty table.
            Some("No opportunities found for the given keywords".to_owned())
        } else {
            Some(format!("{} opportunity(s) found", self.results.len()))
        }
    }
}
