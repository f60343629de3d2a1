//! To-do demo binary
//!
//! Runs an interactive prompt by default. `--script` replays the fixed
//! walkthrough and `--actions <file>` dispatches JSON actions, one per line.

use anyhow::Context;
use clap::Parser;
use reflux_runtime::Store;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use todo::{Command, TodoAction, TodoApp, TodoError, TodoView, render, todo_app, view};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// To-do list driven by reducers and a store
#[derive(Debug, Parser)]
#[command(name = "todo", version, about)]
struct Args {
    /// Run the scripted walkthrough and exit
    #[arg(long, conflicts_with = "actions")]
    script: bool,

    /// Dispatch the JSON actions in this file (one per line) and exit
    #[arg(long, value_name = "FILE")]
    actions: Option<PathBuf>,

    /// Print the state as JSON after each dispatch instead of the list view
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo=info,reflux_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    reflux_runtime::metrics::register_metrics();

    let args = Args::parse();
    let store = Store::new(todo_app());

    if args.script {
        let mut stdout = std::io::stdout().lock();
        todo::script::run(&store, &mut stdout).context("walkthrough failed")?;
        return Ok(());
    }

    let json = args.json;
    let weak = store.downgrade();
    let _subscription = store.subscribe(move || {
        let Some(store) = weak.upgrade() else { return };
        if let Err(error) = print_state(&store, json) {
            tracing::warn!(%error, "Failed to render state");
        }
    });

    match args.actions {
        Some(path) => replay(&store, &path),
        None => prompt(&store, json),
    }
}

fn print_state(store: &Store<TodoApp>, json: bool) -> Result<(), TodoError> {
    let state = store.get_state();
    let mut stdout = std::io::stdout().lock();
    if json {
        writeln!(stdout, "{}", state.to_json()?)?;
    } else {
        writeln!(stdout, "{}", render(&state))?;
    }
    Ok(())
}

fn replay(store: &Store<TodoApp>, path: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    for (number, line) in std::io::BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let action = TodoAction::from_json(&line)
            .with_context(|| format!("{}:{}: invalid action", path.display(), number + 1))?;
        tracing::debug!(?action, "Replaying action");
        store.dispatch(action)?;
    }
    Ok(())
}

fn prompt(store: &Store<TodoApp>, json: bool) -> anyhow::Result<()> {
    let mut view = TodoView::new();
    let stdin = std::io::stdin();

    println!("{}", view::HELP);
    print_state(store, json)?;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(error) => {
                eprintln!("{error}");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{}", view::HELP),
            Command::State => println!("{}", store.get_state().to_json()?),
            _ => {
                if let Some(action) = view.action_for(&command) {
                    store.dispatch(action)?;
                }
            }
        }
    }
    Ok(())
}
