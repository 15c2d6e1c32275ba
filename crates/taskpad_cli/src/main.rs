//! Line-oriented host for the taskpad controller.
//!
//! # Responsibility
//! - Translate stdin commands into `UiEvent`s and print redraws.
//! - Keep all task semantics inside `taskpad_core`; this binary owns only
//!   the index-to-id mapping of the last printed view.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use taskpad_core::db::open_db;
use taskpad_core::{
    default_log_level, init_logging, Controller, Dispatch, EditKey, Filter, RowAction,
    SqliteTaskSlot, TaskId, UiEvent, ViewEntry,
};

fn main() {
    if let Err(message) = run() {
        eprintln!("taskpad: {message}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let data_dir = data_dir_from_args()?;
    std::fs::create_dir_all(&data_dir)
        .map_err(|err| format!("cannot create data dir `{}`: {err}", data_dir.display()))?;

    let log_dir = data_dir.join("logs");
    init_logging(
        default_log_level(),
        log_dir.to_str().ok_or("data dir is not valid UTF-8")?,
    )?;

    let conn = open_db(data_dir.join("taskpad.db")).map_err(|err| err.to_string())?;
    let mut controller = Controller::open(SqliteTaskSlot::new(&conn));

    println!("taskpad {} — type `help` for commands", taskpad_core::core_version());
    let mut visible: Vec<TaskId> = print_view(&controller);

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).map_err(|err| err.to_string())? == 0 {
            break;
        }

        match parse_command(line.trim(), &visible) {
            Command::Quit => break,
            Command::Help => print_help(),
            Command::Nothing => {}
            Command::List => visible = print_view(&controller),
            Command::Unknown(word) => println!("unknown command `{word}`; try `help`"),
            Command::BadIndex(index) => println!("no task at index {index}"),
            Command::Event(event) => {
                let now = Instant::now();
                let outcome = controller.dispatch(event, now);
                visible = report(&mut controller, outcome, now, visible);
            }
            Command::EditFlow { id, text } => {
                // Enter edit mode first so the commit exercises the same
                // transition a click-driven host would.
                let now = Instant::now();
                controller.dispatch(
                    UiEvent::RowAction {
                        id,
                        action: RowAction::Edit,
                    },
                    now,
                );
                let outcome = controller.dispatch(
                    UiEvent::EditKey {
                        id,
                        key: EditKey::Enter,
                        text,
                    },
                    now,
                );
                if !outcome.redraw {
                    // Rejected commit; a line host has no lingering input box,
                    // so abort the session instead of staying in edit mode.
                    controller.dispatch(
                        UiEvent::EditKey {
                            id,
                            key: EditKey::Escape,
                            text: String::new(),
                        },
                        now,
                    );
                }
                visible = report(&mut controller, outcome, now, visible);
            }
        }
    }

    Ok(())
}

enum Command {
    Event(UiEvent),
    EditFlow { id: TaskId, text: String },
    List,
    Help,
    Quit,
    Nothing,
    Unknown(String),
    BadIndex(usize),
}

fn parse_command(line: &str, visible: &[TaskId]) -> Command {
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let id_at = |index_text: &str| -> Result<TaskId, Command> {
        let index: usize = index_text
            .parse()
            .map_err(|_| Command::Unknown(line.to_string()))?;
        visible
            .get(index.wrapping_sub(1))
            .copied()
            .ok_or(Command::BadIndex(index))
    };

    match word {
        "" => Command::Nothing,
        "quit" | "exit" => Command::Quit,
        "help" => Command::Help,
        "list" => Command::List,
        "add" => Command::Event(UiEvent::SubmitNew {
            text: rest.to_string(),
        }),
        "all" | "active" | "completed" => match word.parse::<Filter>() {
            Ok(filter) => Command::Event(UiEvent::FilterSelected(filter)),
            Err(_) => Command::Unknown(word.to_string()),
        },
        "clear" => Command::Event(UiEvent::ClearCompleted),
        "done" | "undo" => match id_at(rest) {
            Ok(id) => Command::Event(UiEvent::ToggleChanged {
                id,
                checked: word == "done",
            }),
            Err(command) => command,
        },
        "rm" => match id_at(rest) {
            Ok(id) => Command::Event(UiEvent::RowAction {
                id,
                action: RowAction::Delete,
            }),
            Err(command) => command,
        },
        "edit" => {
            let (index_text, text) = match rest.split_once(char::is_whitespace) {
                Some((index_text, text)) => (index_text, text.trim()),
                None => (rest, ""),
            };
            match id_at(index_text) {
                Ok(id) => Command::EditFlow {
                    id,
                    text: text.to_string(),
                },
                Err(command) => command,
            }
        }
        other => Command::Unknown(other.to_string()),
    }
}

fn report<S: taskpad_core::TaskSlot>(
    controller: &mut Controller<S>,
    outcome: Dispatch,
    now: Instant,
    visible: Vec<TaskId>,
) -> Vec<TaskId> {
    if let Some(message) = controller.status(now) {
        println!("! {}", message.text);
    }
    // A line host shows each message exactly once; expire it immediately
    // instead of arming a 3-second timer.
    if let Some(token) = outcome.status_token {
        controller.expire_status(token);
    }

    if outcome.redraw {
        print_view(controller)
    } else {
        visible
    }
}

fn print_view<S: taskpad_core::TaskSlot>(controller: &Controller<S>) -> Vec<TaskId> {
    let view = controller.view();
    let mut ids = Vec::new();

    for entry in &view.entries {
        match entry {
            ViewEntry::Placeholder => println!("  (no tasks yet)"),
            ViewEntry::Task {
                id,
                completed,
                text,
            } => {
                ids.push(*id);
                let mark = if *completed { "x" } else { " " };
                println!("  [{mark}] {}. {text}", ids.len());
            }
            ViewEntry::Edit { id, prefill } => {
                ids.push(*id);
                println!("  [e] {}. {prefill}", ids.len());
            }
        }
    }
    println!("  -- {} ({})", view.count_label, view.filter);
    ids
}

fn print_help() {
    println!("  add <text>        add a task");
    println!("  list              redraw the list");
    println!("  done <n>/undo <n> toggle completion");
    println!("  edit <n> <text>   replace a task's text");
    println!("  rm <n>            delete a task");
    println!("  clear             remove completed tasks");
    println!("  all|active|completed  switch the view filter");
    println!("  quit              leave");
}

fn data_dir_from_args() -> Result<PathBuf, String> {
    let mut args = std::env::args().skip(1);
    let dir = match (args.next().as_deref(), args.next()) {
        (Some("--data-dir"), Some(dir)) => PathBuf::from(dir),
        (Some("--data-dir"), None) => return Err("--data-dir needs a path".to_string()),
        (Some(other), _) => return Err(format!("unknown argument `{other}`")),
        (None, _) => std::env::current_dir()
            .map_err(|err| err.to_string())?
            .join(".taskpad"),
    };
    if dir.is_absolute() {
        Ok(dir)
    } else {
        Ok(std::env::current_dir()
            .map_err(|err| err.to_string())?
            .join(dir))
    }
}
