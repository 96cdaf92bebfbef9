use crate::collect::{self, KeywordRejection};
use crate::{
    Effect, LifecycleState, Msg, ScrapeRequest, SessionState, Severity, SubmissionOutcome,
    ValidationError,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: SessionState, msg: Msg) -> (SessionState, Vec<Effect>) {
    let effects = match msg {
        Msg::HealthChecked { online } => {
            state.set_backend_online(online);
            if online {
                Vec::new()
            } else {
                vec![Effect::notify(
                    Severity::Error,
                    "Could not reach the backend; check the API address",
                )]
            }
        }
        Msg::FileLoaded { name, content } => {
            if !name.ends_with(".txt") {
                return (
                    state,
                    vec![Effect::notify(
                        Severity::Error,
                        "Only .txt files are accepted",
                    )],
                );
            }
            let urls = collect::parse_urls(&content);
            let count = urls.len();
            state.attach_file(name, urls);
            vec![Effect::notify(
                Severity::Success,
                format!("{count} URL(s) loaded from file"),
            )]
        }
        Msg::FileReadFailed { name, error } => {
            // Prior input state is left untouched.
            vec![Effect::notify(
                Severity::Error,
                format!("Failed to read {name}: {error}"),
            )]
        }
        Msg::FileRemoved => {
            state.detach_file();
            Vec::new()
        }
        Msg::SitesTextChanged(text) => {
            state.set_sites_text(text);
            Vec::new()
        }
        Msg::KeywordSubmitted(raw) => match collect::add_keyword(state.keywords(), &raw) {
            Ok(keywords) => {
                state.set_keywords(keywords);
                Vec::new()
            }
            Err(KeywordRejection::Empty) => Vec::new(),
            Err(KeywordRejection::Duplicate) => {
                vec![Effect::notify(
                    Severity::Warning,
                    "This keyword already exists",
                )]
            }
        },
        Msg::KeywordRemoved(term) => {
            state.set_keywords(collect::remove_keyword(state.keywords(), &term));
            Vec::new()
        }
        Msg::StrongNegativesChanged(text) => {
            state.set_strong_negatives(text);
            Vec::new()
        }
        Msg::WeakNegativesChanged(text) => {
            state.set_weak_negatives(text);
            Vec::new()
        }
        Msg::SubmitClicked => submit(&mut state),
        Msg::CancelClicked => {
            // Cancelling outside Submitting is a no-op; the settled outcome
            // has already been reported.
            if state.lifecycle() == LifecycleState::Submitting {
                state.settle_cancelled();
                vec![
                    Effect::CancelSubmission,
                    Effect::notify(Severity::Warning, "Analysis cancelled"),
                ]
            } else {
                Vec::new()
            }
        }
        Msg::SubmissionSettled { outcome } => {
            // A late settlement (after cancellation or reset) is discarded
            // silently; it must not overwrite the terminal state.
            if state.lifecycle() != LifecycleState::Submitting {
                return (state, Vec::new());
            }
            match outcome {
                SubmissionOutcome::Completed(rows) => {
                    let count = rows.len();
                    state.settle_success(rows);
                    vec![Effect::notify(
                        Severity::Success,
                        format!("Analysis complete! {count} opportunity(s) found"),
                    )]
                }
                SubmissionOutcome::Failed { reason, message } => {
                    state.settle_failure(format!("{reason}: {message}"));
                    vec![Effect::notify(
                        Severity::Error,
                        format!("Error: {message}"),
                    )]
                }
                SubmissionOutcome::Cancelled => {
                    state.settle_cancelled();
                    vec![Effect::notify(Severity::Warning, "Analysis cancelled")]
                }
            }
        }
        Msg::ExportClicked => {
            if state.results().is_empty() {
                vec![Effect::notify(
                    Severity::Warning,
                    "No results to download",
                )]
            } else {
                vec![Effect::ExportCsv {
                    rows: state.results().to_vec(),
                }]
            }
        }
        Msg::ExportSettled { outcome } => match outcome {
            crate::ExportOutcome::Written(path) => {
                vec![Effect::notify(
                    Severity::Success,
                    format!("CSV written to {path}"),
                )]
            }
            crate::ExportOutcome::Failed(message) => {
                vec![Effect::notify(
                    Severity::Error,
                    format!("CSV export failed: {message}"),
                )]
            }
        },
        Msg::ResetClicked => {
            if state.lifecycle() == LifecycleState::Submitting {
                vec![Effect::notify(
                    Severity::Warning,
                    "Cancel the running analysis before resetting",
                )]
            } else {
                state.reset();
                vec![Effect::notify(Severity::Info, "Form reset")]
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Submit guards, in order: single-flight, URL presence, URL cap, backend
/// reachability. A guard violation reports and leaves state unchanged.
fn submit(state: &mut SessionState) -> Vec<Effect> {
    if state.lifecycle() == LifecycleState::Submitting {
        // Blocked, not aborted: the prior in-flight call keeps its token.
        return vec![Effect::notify(
            Severity::Warning,
            "An analysis is already running",
        )];
    }

    let request = match validate(state) {
        Ok(request) => request,
        Err(err) => return vec![Effect::notify(Severity::Error, err.to_string())],
    };

    let url_count = request.urls.len();
    state.begin_submission();
    vec![
        Effect::notify(
            Severity::Info,
            format!("Starting analysis of {url_count} site(s)"),
        ),
        Effect::SubmitScrape { request },
    ]
}

fn validate(state: &SessionState) -> Result<ScrapeRequest, ValidationError> {
    let urls = state.collected_urls();
    if urls.is_empty() {
        return Err(ValidationError::NoUrls);
    }
    if urls.len() > state.max_urls() {
        return Err(ValidationError::TooManyUrls {
            count: urls.len(),
            max: state.max_urls(),
        });
    }
    if state.backend_online() != Some(true) {
        return Err(ValidationError::BackendOffline);
    }
    Ok(ScrapeRequest {
        urls,
        keywords: state.keywords().to_vec(),
        strong_negatives: collect::parse_terms(state.strong_negatives()),
        weak_negatives: collect::parse_terms(state.weak_negatives()),
    })
}
