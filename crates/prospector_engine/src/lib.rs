//! Prospector engine: backend client, CSV export and effect execution.
mod client;
mod csv;
mod engine;
mod persist;
mod types;

pub use client::{ClientSettings, ReqwestBackend, ScrapeApi};
pub use csv::{export_filename, to_csv, UTF8_BOM};
pub use engine::{EngineConfig, EngineHandle};
pub use persist::{ensure_output_dir, write_atomic, PersistError};
pub use types::{EngineEvent, FailureKind, ScrapeHit, ScrapeRequestBody, SubmitError};
