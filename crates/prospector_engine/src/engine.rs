use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use panel_logging::{panel_info, panel_warn};
use tokio_util::sync::CancellationToken;

use crate::client::{ClientSettings, ReqwestBackend, ScrapeApi};
use crate::csv::{export_filename, to_csv, UTF8_BOM};
use crate::persist::write_atomic;
use crate::{EngineEvent, ScrapeHit, ScrapeRequestBody};

/// Settings and capabilities injected by the shell.
pub struct EngineConfig {
    pub client: ClientSettings,
    /// Directory the CSV export is written into.
    pub output_dir: PathBuf,
    /// Produces the timestamp embedded in export filenames. The shell
    /// injects a wall-clock formatter; the default is epoch seconds.
    pub timestamp: Arc<dyn Fn() -> String + Send + Sync>,
}

impl EngineConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            client: ClientSettings::default(),
            output_dir,
            timestamp: Arc::new(default_timestamp),
        }
    }
}

fn default_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
        .to_string()
}

enum EngineCommand {
    CheckHealth,
    Submit { request: ScrapeRequestBody },
    CancelSubmission,
    ExportCsv { rows: Vec<ScrapeHit> },
}

/// Runs the backend client on a dedicated runtime thread and talks to the
/// shell over plain mpsc channels.
///
/// At most one submission is in flight; its cancellation token lives in a
/// slot that is cleared exactly once, on settlement, and never re-armed.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || run_engine(config, cmd_rx, event_tx));

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn check_health(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CheckHealth);
    }

    pub fn submit(&self, request: ScrapeRequestBody) {
        let _ = self.cmd_tx.send(EngineCommand::Submit { request });
    }

    pub fn cancel(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CancelSubmission);
    }

    pub fn export_csv(&self, rows: Vec<ScrapeHit>) {
        let _ = self.cmd_tx.send(EngineCommand::ExportCsv { rows });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

fn run_engine(
    config: EngineConfig,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let backend = Arc::new(ReqwestBackend::new(config.client));
    let in_flight: Arc<Mutex<Option<CancellationToken>>> = Arc::new(Mutex::new(None));

    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::CheckHealth => {
                let backend = backend.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let online = backend.health().await;
                    panel_info!("Health probe finished: online={}", online);
                    let _ = event_tx.send(EngineEvent::HealthChecked { online });
                });
            }
            EngineCommand::Submit { request } => {
                let mut slot = in_flight.lock().expect("in-flight slot");
                if slot.is_some() {
                    // The core blocks duplicate submits; this is the engine
                    // honoring the same invariant if one slips through.
                    panel_warn!("Submit ignored: a submission is already in flight");
                    continue;
                }
                let token = CancellationToken::new();
                *slot = Some(token.clone());
                drop(slot);

                let backend = backend.clone();
                let event_tx = event_tx.clone();
                let in_flight = in_flight.clone();
                panel_info!("Submitting scrape request: {} url(s)", request.urls.len());
                runtime.spawn(async move {
                    let result = backend.submit(&request, token).await;
                    // Settlement discards the token; it is never reused.
                    in_flight.lock().expect("in-flight slot").take();
                    let _ = event_tx.send(EngineEvent::SubmissionSettled { result });
                });
            }
            EngineCommand::CancelSubmission => {
                let slot = in_flight.lock().expect("in-flight slot");
                match slot.as_ref() {
                    Some(token) => {
                        panel_info!("Cancelling in-flight submission");
                        token.cancel();
                    }
                    None => {
                        panel_info!("Cancel ignored: nothing in flight");
                    }
                }
            }
            EngineCommand::ExportCsv { rows } => {
                let result = match to_csv(&rows) {
                    Some(body) => {
                        let filename = export_filename(&(config.timestamp)());
                        let content = format!("{UTF8_BOM}{body}");
                        write_atomic(&config.output_dir, &filename, &content)
                            .map_err(|err| err.to_string())
                    }
                    None => Err("no rows to export".to_string()),
                };
                let _ = event_tx.send(EngineEvent::ExportSettled { result });
            }
        }
    }
}
