mod app;
mod config;
mod effects;
mod logging;
mod view;

pub use app::run_app;
