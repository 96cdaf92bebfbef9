use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// JSON body POSTed to `/api/scrape`. Field names are fixed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeRequestBody {
    pub urls: Vec<String>,
    #[serde(rename = "palavrasChave")]
    pub palavras_chave: Vec<String>,
    #[serde(rename = "negativosFortes")]
    pub negativos_fortes: Vec<String>,
    #[serde(rename = "negativosFracos")]
    pub negativos_fracos: Vec<String>,
}

/// One row of the backend response. The backend gives no type guarantees,
/// so every field is optional on the wire and decodes to an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ScrapeHit {
    #[serde(rename = "Site", default)]
    pub site: String,
    #[serde(rename = "Termos", default)]
    pub termos: String,
    #[serde(rename = "Descricao", default)]
    pub descricao: String,
    #[serde(rename = "Link", default)]
    pub link: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScrapeResponseBody {
    #[serde(default)]
    pub data: Vec<ScrapeHit>,
}

/// Error payload the backend sends with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitError {
    pub kind: FailureKind,
    pub message: String,
}

impl SubmitError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidBaseUrl,
    Network,
    HttpStatus(u16),
    Timeout,
    Cancelled,
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidBaseUrl => write!(f, "invalid base url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Cancelled => write!(f, "cancelled"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

/// Events emitted by the engine back to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    HealthChecked {
        online: bool,
    },
    SubmissionSettled {
        result: Result<Vec<ScrapeHit>, SubmitError>,
    },
    ExportSettled {
        result: Result<PathBuf, String>,
    },
}
