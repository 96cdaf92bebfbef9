//! Terminal rendering of the view model and the notification channel.

use panel_logging::{panel_error, panel_info, panel_warn};
use prospector_core::{LifecycleState, PanelViewModel, Severity};

const SITE_WIDTH: usize = 30;
const TERMS_WIDTH: usize = 30;
const DESCRIPTION_WIDTH: usize = 50;
const LINK_WIDTH: usize = 40;

/// The single user-visible notification channel. Every message carries a
/// severity tag and is mirrored into the log.
pub fn notify(severity: Severity, message: &str) {
    match severity {
        Severity::Error => panel_error!("{}", message),
        Severity::Warning => panel_warn!("{}", message),
        Severity::Info | Severity::Success => panel_info!("{}", message),
    }
    let tag = match severity {
        Severity::Info => "info",
        Severity::Success => "ok",
        Severity::Warning => "warn",
        Severity::Error => "error",
    };
    println!("[{tag}] {message}");
}

pub fn render_status(view: &PanelViewModel) {
    let backend = match view.backend_online {
        None => "checking...",
        Some(true) => "online",
        Some(false) => "offline",
    };
    let lifecycle = match view.lifecycle {
        LifecycleState::Idle => "idle",
        LifecycleState::Submitting => "submitting",
        LifecycleState::Cancelled => "cancelled",
        LifecycleState::Succeeded => "succeeded",
        LifecycleState::Failed => "failed",
    };
    println!(
        "backend: {backend} | state: {lifecycle} | urls: {} | keywords: {}",
        view.url_count,
        view.keywords.len()
    );
    if let Some(file) = &view.attached_file {
        println!("file: {} ({} URL(s))", file.name, file.url_count);
    }
    if let Some(failure) = &view.last_failure {
        println!("last failure: {failure}");
    }
}

pub fn render_results(view: &PanelViewModel) {
    let Some(banner) = &view.results_banner else {
        println!("No analysis has completed yet.");
        return;
    };
    println!("{banner}");
    if view.results.is_empty() {
        return;
    }
    print_row("Site", "Termos", "Descrição", "Link");
    for row in &view.results {
        print_row(
            &truncate(&row.site, SITE_WIDTH),
            &truncate(&row.terms, TERMS_WIDTH),
            &truncate(&row.description, DESCRIPTION_WIDTH),
            &truncate(&row.link, LINK_WIDTH),
        );
    }
}

fn print_row(site: &str, terms: &str, description: &str, link: &str) {
    println!(
        "{site:<sw$} | {terms:<tw$} | {description:<dw$} | {link}",
        sw = SITE_WIDTH,
        tw = TERMS_WIDTH,
        dw = DESCRIPTION_WIDTH,
    );
}

pub fn print_help(commands: &[(&str, &str)]) {
    println!("Commands:");
    for (name, description) in commands {
        println!("  {name:<18} {description}");
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let clipped: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{clipped}...")
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("trator", 30), "trator");
    }

    #[test]
    fn truncate_clips_on_char_boundaries() {
        let text = "pá carregadeira usada em leilão rural do interior";
        let clipped = truncate(text, 20);
        assert!(clipped.ends_with("..."));
        assert_eq!(clipped.chars().count(), 20);
    }
}
