use std::io::BufRead;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use panel_logging::panel_info;
use prospector_core::{update, Effect, LifecycleState, Msg, SessionState};

use super::config;
use super::effects::EffectRunner;
use super::logging;
use super::view;

/// Everything the app loop reacts to: one channel carries both parsed
/// terminal input and core messages pumped back from the engine.
pub enum AppEvent {
    Input(String),
    Core(Msg),
}

type CommandHandler = fn(&str) -> Option<Msg>;

/// Command dispatch table: action names mapped to message builders,
/// decoupled from anything the renderer knows about.
const DISPATCH: &[(&str, CommandHandler, &str)] = &[
    ("sites", cmd_sites, "replace the free-text site list (URLs separated by spaces)"),
    ("file", cmd_file, "load a .txt file with one URL per line"),
    ("detach", cmd_detach, "remove the loaded URL file"),
    ("keyword", cmd_keyword, "add <term> | rm <term>"),
    ("negatives", cmd_negatives, "strong <terms,...> | weak <terms,...>"),
    ("submit", cmd_submit, "start the analysis"),
    ("cancel", cmd_cancel, "cancel the running analysis"),
    ("export", cmd_export, "write the current results as CSV"),
    ("reset", cmd_reset, "clear the form back to defaults"),
];

pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(logging::LogDestination::File);

    let config = config::load(Path::new(config::CONFIG_FILENAME));
    panel_info!("Prospector starting; backend at {}", config.api_base_url);

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(&config, event_tx.clone());
    spawn_input_reader(event_tx);

    let mut state = SessionState::with_max_urls(config.max_urls);
    // Single startup probe; no periodic re-check.
    runner.run(vec![Effect::CheckHealth]);

    println!("Prospector control panel. Type 'help' for commands.");
    view::render_status(&state.view());

    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Core(msg) => {
                state = dispatch_msg(state, msg, &runner);
            }
            AppEvent::Input(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match line {
                    "quit" | "exit" => break,
                    "help" => {
                        let entries: Vec<(&str, &str)> =
                            DISPATCH.iter().map(|(name, _, help)| (*name, *help)).collect();
                        view::print_help(&entries);
                    }
                    "status" => view::render_status(&state.view()),
                    "results" => view::render_results(&state.view()),
                    _ => match dispatch_command(line) {
                        Some(msg) => state = dispatch_msg(state, msg, &runner),
                        None => println!("Unknown command; type 'help'."),
                    },
                }
            }
        }
    }

    panel_info!("Prospector shutting down");
    Ok(())
}

fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if event_tx.send(AppEvent::Input(line)).is_err() {
                break;
            }
        }
    });
}

fn dispatch_msg(state: SessionState, msg: Msg, runner: &EffectRunner) -> SessionState {
    let before = state.view();
    let (state, effects) = update(state, msg);
    runner.run(effects);

    let after = state.view();
    if after != before {
        view::render_status(&after);
        if after.lifecycle == LifecycleState::Succeeded && before.lifecycle != after.lifecycle {
            view::render_results(&after);
        }
    }
    state
}

fn dispatch_command(line: &str) -> Option<Msg> {
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };
    DISPATCH
        .iter()
        .find(|(command, _, _)| *command == name)
        .and_then(|(_, handler, _)| handler(rest))
}

fn cmd_sites(rest: &str) -> Option<Msg> {
    let text = rest.split_whitespace().collect::<Vec<_>>().join("\n");
    Some(Msg::SitesTextChanged(text))
}

fn cmd_file(rest: &str) -> Option<Msg> {
    if rest.is_empty() {
        return None;
    }
    let path = Path::new(rest);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| rest.to_string());
    Some(match std::fs::read_to_string(path) {
        Ok(content) => Msg::FileLoaded { name, content },
        Err(err) => Msg::FileReadFailed {
            name,
            error: err.to_string(),
        },
    })
}

fn cmd_detach(_rest: &str) -> Option<Msg> {
    Some(Msg::FileRemoved)
}

fn cmd_keyword(rest: &str) -> Option<Msg> {
    if let Some(term) = rest.strip_prefix("add ") {
        return Some(Msg::KeywordSubmitted(term.to_string()));
    }
    if let Some(term) = rest.strip_prefix("rm ") {
        return Some(Msg::KeywordRemoved(term.trim().to_string()));
    }
    None
}

fn cmd_negatives(rest: &str) -> Option<Msg> {
    if let Some(terms) = rest.strip_prefix("strong ") {
        return Some(Msg::StrongNegativesChanged(terms.to_string()));
    }
    if let Some(terms) = rest.strip_prefix("weak ") {
        return Some(Msg::WeakNegativesChanged(terms.to_string()));
    }
    None
}

fn cmd_submit(_rest: &str) -> Option<Msg> {
    Some(Msg::SubmitClicked)
}

fn cmd_cancel(_rest: &str) -> Option<Msg> {
    Some(Msg::CancelClicked)
}

fn cmd_export(_rest: &str) -> Option<Msg> {
    Some(Msg::ExportClicked)
}

fn cmd_reset(_rest: &str) -> Option<Msg> {
    Some(Msg::ResetClicked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_maps_plain_actions() {
        assert_eq!(dispatch_command("submit"), Some(Msg::SubmitClicked));
        assert_eq!(dispatch_command("cancel"), Some(Msg::CancelClicked));
        assert_eq!(dispatch_command("export"), Some(Msg::ExportClicked));
        assert_eq!(dispatch_command("reset"), Some(Msg::ResetClicked));
        assert_eq!(dispatch_command("detach"), Some(Msg::FileRemoved));
    }

    #[test]
    fn dispatch_rejects_unknown_actions() {
        assert_eq!(dispatch_command("launch"), None);
        assert_eq!(dispatch_command("keyword purge all"), None);
    }

    #[test]
    fn sites_command_joins_urls_into_lines() {
        assert_eq!(
            dispatch_command("sites http://a.example http://b.example"),
            Some(Msg::SitesTextChanged(
                "http://a.example\nhttp://b.example".to_string()
            ))
        );
    }

    #[test]
    fn keyword_subcommands_carry_raw_terms() {
        assert_eq!(
            dispatch_command("keyword add Pá Carregadeira"),
            Some(Msg::KeywordSubmitted("Pá Carregadeira".to_string()))
        );
        assert_eq!(
            dispatch_command("keyword rm trator"),
            Some(Msg::KeywordRemoved("trator".to_string()))
        );
    }

    #[test]
    fn negatives_subcommands_replace_field_text() {
        assert_eq!(
            dispatch_command("negatives strong scania, iveco"),
            Some(Msg::StrongNegativesChanged("scania, iveco".to_string()))
        );
        assert_eq!(
            dispatch_command("negatives weak truck"),
            Some(Msg::WeakNegativesChanged("truck".to_string()))
        );
    }

    #[test]
    fn file_command_reports_read_failures_without_touching_state() {
        let msg = dispatch_command("file /definitely/not/here.txt");
        assert!(matches!(msg, Some(Msg::FileReadFailed { .. })));
    }
}
