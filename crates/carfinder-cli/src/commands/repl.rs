use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use carfinder_application::{SearchOutcome, SearchSession, TurnOutcome};
use carfinder_core::filter::Facet;

use crate::display;

const COMMANDS: [&str; 8] = [
    "/set", "/unset", "/apply", "/clear", "/filters", "/options", "/cars", "/history",
];

/// One line of REPL input.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Set { facet: String, value: String },
    Unset { facet: String },
    Apply,
    Clear,
    Filters,
    Options,
    Cars,
    History,
    Quit,
    Chat(String),
    Usage(&'static str),
    Unknown(String),
}

impl ReplCommand {
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if line == "quit" || line == "exit" {
            return Some(Self::Quit);
        }
        if !line.starts_with('/') {
            return Some(Self::Chat(line.to_string()));
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        let parsed = match command {
            "/set" => match rest.split_once(char::is_whitespace) {
                Some((facet, value)) => Self::Set {
                    facet: facet.to_string(),
                    value: value.trim().to_string(),
                },
                None => Self::Usage("/set <facet> <value>"),
            },
            "/unset" if !rest.is_empty() => Self::Unset {
                facet: rest.to_string(),
            },
            "/unset" => Self::Usage("/unset <facet>"),
            "/apply" => Self::Apply,
            "/clear" => Self::Clear,
            "/filters" => Self::Filters,
            "/options" => Self::Options,
            "/cars" => Self::Cars,
            "/history" => Self::History,
            other => Self::Unknown(other.to_string()),
        };
        Some(parsed)
    }
}

/// rustyline helper completing slash commands and facet names.
struct ReplHelper;

impl ReplHelper {
    fn takes_facet(command: &str) -> bool {
        command == "/set" || command == "/unset"
    }
}

impl Helper for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') {
            return Ok((0, vec![]));
        }

        match line.split_once(' ') {
            None => {
                let candidates = COMMANDS
                    .iter()
                    .filter(|cmd| cmd.starts_with(line))
                    .map(|cmd| Pair {
                        display: cmd.to_string(),
                        replacement: cmd.to_string(),
                    })
                    .collect();
                Ok((0, candidates))
            }
            Some((command, prefix)) if Self::takes_facet(command) && !prefix.contains(' ') => {
                let candidates = Facet::all()
                    .map(Facet::ui_name)
                    .filter(|name| name.starts_with(prefix))
                    .map(|name| Pair {
                        display: name.to_string(),
                        replacement: name.to_string(),
                    })
                    .collect();
                Ok((command.len() + 1, candidates))
            }
            Some(_) => Ok((0, vec![])),
        }
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if !line.starts_with('/') {
            return None;
        }

        match line.split_once(' ') {
            None => COMMANDS
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string()),
            Some((command, prefix))
                if Self::takes_facet(command) && !prefix.is_empty() && !prefix.contains(' ') =>
            {
                Facet::all()
                    .map(Facet::ui_name)
                    .find(|name| name.starts_with(prefix) && name.len() > prefix.len())
                    .map(|name| name[prefix.len()..].to_string())
            }
            Some(_) => None,
        }
    }
}

impl Validator for ReplHelper {}

fn notice(text: impl AsRef<str>) {
    println!("{}", text.as_ref().bright_black());
}

fn print_search_outcome(outcome: &SearchOutcome) {
    match outcome {
        SearchOutcome::Applied { count } => notice(format!("{count} cars found. Type /cars to list them.")),
        SearchOutcome::Stale => notice("A newer search already replaced these results."),
        SearchOutcome::Failed(e) => eprintln!("{}", format!("Search failed: {e}").red()),
    }
}

/// Runs one REPL line. Returns `false` when the loop should stop.
async fn execute(session: &SearchSession, command: ReplCommand) -> bool {
    match command {
        ReplCommand::Quit => return false,
        ReplCommand::Set { facet, value } => {
            if let Err(e) = session.set_facet_by_name(&facet, value).await {
                eprintln!("{}", e.to_string().red());
            }
        }
        ReplCommand::Unset { facet } => {
            if let Err(e) = session.set_facet_by_name(&facet, "").await {
                eprintln!("{}", e.to_string().red());
            }
        }
        ReplCommand::Apply => print_search_outcome(&session.apply_filters().await),
        ReplCommand::Clear => {
            session.clear_filters().await;
            notice("Filters cleared. Type /apply to search.");
        }
        ReplCommand::Filters => display::print_filters(&session.filters().await),
        ReplCommand::Options => display::print_options(&session.filter_options().await),
        ReplCommand::Cars => display::print_cars(&session.cars().await),
        ReplCommand::History => display::print_history(&session.history().await),
        ReplCommand::Chat(text) => {
            let before = session.history().await.len();
            let outcome = session.submit_message(text).await;
            for message in session.history().await.iter().skip(before + 1) {
                display::print_message(message);
            }
            match outcome {
                TurnOutcome::Answered {
                    search: Some(search),
                    ..
                } => {
                    display::print_filters(&session.filters().await);
                    print_search_outcome(&search);
                }
                TurnOutcome::Skipped => notice("A request is already in progress."),
                _ => {}
            }
        }
        ReplCommand::Usage(usage) => notice(format!("Usage: {usage}")),
        ReplCommand::Unknown(command) => notice(format!("Unknown command: {command}")),
    }
    true
}

pub async fn run(session: &SearchSession) -> Result<()> {
    let (options_loaded, outcome) = session.initialize().await;
    if !options_loaded {
        notice("Filter options are unavailable.");
    }

    let mut rl = Editor::new()?;
    rl.set_helper(Some(ReplHelper));

    println!("{}", "=== Carfinder ===".bright_magenta().bold());
    print_search_outcome(&outcome);
    notice("Describe the car you want, use /set <facet> <value> and /apply, or type 'quit' to exit.");
    println!();

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let Some(command) = ReplCommand::parse(&line) else {
                    continue;
                };
                let _ = rl.add_history_entry(line.as_str());
                if !execute(session, command).await {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    Ok(())
}
