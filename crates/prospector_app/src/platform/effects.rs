use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use chrono::Utc;
use panel_logging::{panel_info, panel_warn};
use prospector_core::{
    Effect, ExportOutcome, FailureReason, Msg, ResultRow, ScrapeRequest, SubmissionOutcome,
};
use prospector_engine::{
    ClientSettings, EngineConfig, EngineEvent, EngineHandle, FailureKind, ScrapeHit,
    ScrapeRequestBody, SubmitError,
};

use super::app::AppEvent;
use super::config::AppConfig;
use super::view;

/// Executes core effects against the engine and pumps engine events back
/// into the app loop as core messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: &AppConfig, event_tx: mpsc::Sender<AppEvent>) -> Self {
        let mut engine_config = EngineConfig::default_with_output(config.output_dir.clone());
        engine_config.client = ClientSettings {
            base_url: config.api_base_url.clone(),
            connect_timeout: config.connect_timeout(),
            request_timeout: config.request_timeout(),
        };
        engine_config.timestamp = Arc::new(|| Utc::now().to_rfc3339());

        let engine = EngineHandle::new(engine_config);
        let runner = Self { engine };
        runner.spawn_event_pump(event_tx);
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::CheckHealth => {
                    panel_info!("Probing backend health");
                    self.engine.check_health();
                }
                Effect::SubmitScrape { request } => {
                    panel_info!("Dispatching scrape request: {} url(s)", request.urls.len());
                    self.engine.submit(to_wire(request));
                }
                Effect::CancelSubmission => {
                    self.engine.cancel();
                }
                Effect::ExportCsv { rows } => {
                    self.engine
                        .export_csv(rows.into_iter().map(to_hit).collect());
                }
                Effect::Notify { severity, message } => {
                    view::notify(severity, &message);
                }
            }
        }
    }

    fn spawn_event_pump(&self, event_tx: mpsc::Sender<AppEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                if event_tx.send(AppEvent::Core(map_event(event))).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::HealthChecked { online } => Msg::HealthChecked { online },
        EngineEvent::SubmissionSettled { result } => Msg::SubmissionSettled {
            outcome: map_settlement(result),
        },
        EngineEvent::ExportSettled { result } => Msg::ExportSettled {
            outcome: match result {
                Ok(path) => ExportOutcome::Written(path.display().to_string()),
                Err(message) => ExportOutcome::Failed(message),
            },
        },
    }
}

fn map_settlement(result: Result<Vec<ScrapeHit>, SubmitError>) -> SubmissionOutcome {
    match result {
        Ok(hits) => SubmissionOutcome::Completed(hits.into_iter().map(from_hit).collect()),
        Err(SubmitError {
            kind: FailureKind::Cancelled,
            ..
        }) => SubmissionOutcome::Cancelled,
        Err(err) => {
            panel_warn!("Submission failed: {}", err);
            SubmissionOutcome::Failed {
                reason: map_reason(&err.kind),
                message: err.message,
            }
        }
    }
}

fn map_reason(kind: &FailureKind) -> FailureReason {
    match kind {
        FailureKind::HttpStatus(code) => FailureReason::HttpStatus(*code),
        FailureKind::Timeout => FailureReason::Timeout,
        FailureKind::MalformedResponse => FailureReason::MalformedResponse,
        FailureKind::InvalidBaseUrl | FailureKind::Network | FailureKind::Cancelled => {
            FailureReason::Transport
        }
    }
}

fn to_wire(request: ScrapeRequest) -> ScrapeRequestBody {
    ScrapeRequestBody {
        urls: request.urls,
        palavras_chave: request.keywords,
        negativos_fortes: request.strong_negatives,
        negativos_fracos: request.weak_negatives,
    }
}

fn from_hit(hit: ScrapeHit) -> ResultRow {
    ResultRow {
        site: hit.site,
        terms: hit.termos,
        description: hit.descricao,
        link: hit.link,
    }
}

fn to_hit(row: ResultRow) -> ScrapeHit {
    ScrapeHit {
        site: row.site,
        termos: row.terms,
        descricao: row.description,
        link: row.link,
    }
}
