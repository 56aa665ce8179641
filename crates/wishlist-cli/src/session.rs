//! Line-oriented terminal session over a [`WishlistView`].
//!
//! Each input line is parsed into a [`Command`], forwarded to the view as an
//! intent, and answered with the freshly rendered screen.

use std::fmt::Write as _;
use std::str::FromStr;

use tokio::io::{AsyncBufReadExt, BufReader};

use wishlist_core::WishId;
use wishlist_server::form::FieldName;
use wishlist_server::schema::view::ViewModel;
use wishlist_server::view::{SubmitOutcome, ViewError, WishlistView};

pub const HELP: &str = "\
commands:
  list                   redraw the screen
  select N               edit wish number N
  new                    leave edit mode (Add New)
  set name|comment TEXT  change a field
  blur name|comment      mark a field as touched
  submit                 save the form
  reset                  revert the form
  remove N               delete wish number N
  reload                 fetch the wishes again
  help                   show this text
  quit                   leave the session";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Select(usize),
    New,
    Set(FieldName, String),
    Blur(FieldName),
    Submit,
    Reset,
    Remove(usize),
    Reload,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim_start()),
            None => (line, ""),
        };

        match word {
            "list" | "ls" => Ok(Command::List),
            "select" | "edit" => parse_index(rest).map(Command::Select),
            "new" => Ok(Command::New),
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let field = parse_field(field)?;
                Ok(Command::Set(field, value.trim_start().to_string()))
            }
            "blur" => parse_field(rest).map(Command::Blur),
            "submit" | "save" => Ok(Command::Submit),
            "reset" => Ok(Command::Reset),
            "remove" | "rm" => parse_index(rest).map(Command::Remove),
            "reload" => Ok(Command::Reload),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "" => Err("empty command, type 'help'".to_string()),
            other => Err(format!("unknown command '{other}', type 'help'")),
        }
    }
}

fn parse_index(arg: &str) -> Result<usize, String> {
    match arg.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(format!("expected a wish number starting at 1, got '{arg}'")),
    }
}

fn parse_field(arg: &str) -> Result<FieldName, String> {
    arg.trim().parse::<FieldName>().map_err(|e| e.to_string())
}

/// Maps a 1-based list position to the wish id shown there.
fn wish_at(view: &WishlistView, n: usize) -> Result<WishId, String> {
    view.wishes()
        .get(n - 1)
        .map(|w| w.id)
        .ok_or_else(|| format!("there is no wish number {n}"))
}

/// Applies one command. Returns the status line to print above the screen.
pub async fn apply(view: &WishlistView, command: Command) -> Result<Option<String>, String> {
    let err = |e: ViewError| e.to_string();
    match command {
        Command::List | Command::Help | Command::Quit => Ok(None),
        Command::Select(n) => {
            view.select(wish_at(view, n)?).map_err(err)?;
            Ok(None)
        }
        Command::New => {
            view.add_new().map_err(err)?;
            Ok(None)
        }
        Command::Set(field, value) => {
            view.change_field(field, value).map_err(err)?;
            Ok(None)
        }
        Command::Blur(field) => {
            view.blur_field(field).map_err(err)?;
            Ok(None)
        }
        Command::Submit => match view.submit().await.map_err(err)? {
            SubmitOutcome::Created(wish) => Ok(Some(format!("added '{}'", wish.name))),
            SubmitOutcome::Updated(wish) => Ok(Some(format!("saved '{}'", wish.name))),
        },
        Command::Reset => {
            view.reset().map_err(err)?;
            Ok(None)
        }
        Command::Remove(n) => {
            let removed = view.remove(wish_at(view, n)?).await.map_err(err)?;
            Ok(Some(format!("removed '{}'", removed.name)))
        }
        Command::Reload => {
            let count = view.load().await.map_err(err)?;
            Ok(Some(format!("loaded {count} wish(es)")))
        }
    }
}

/// Draws the screen as plain text.
pub fn render_text(model: &ViewModel) -> String {
    let mut out = String::new();
    let title = match model.editing {
        Some(_) => "Edit wish",
        None => "New wish",
    };
    let _ = writeln!(out, "== {title} ==");

    for field in &model.fields {
        let _ = write!(out, "  {:<8} ", format!("{}:", field.label));
        if field.value.is_empty() {
            let _ = write!(out, "({})", field.placeholder);
        } else {
            let _ = write!(out, "{}", field.value);
        }
        if let Some(error) = &field.error {
            let _ = write!(out, "  <- {error}");
        }
        out.push('\n');
    }

    let button = |label: &str, enabled: bool| {
        if enabled {
            format!("[{label}]")
        } else {
            format!(" {label} ")
        }
    };
    let _ = writeln!(
        out,
        "  {} {} {}",
        button("submit", model.buttons.submit),
        button("reset", model.buttons.reset),
        button("add new", model.buttons.add_new),
    );

    if model.submitting {
        out.push_str("  saving...\n");
    }
    if let Some(error) = &model.error {
        let _ = writeln!(out, "  error: {error}");
    }

    out.push_str("== Wishes ==\n");
    if model.loading {
        out.push_str("  loading...\n");
    } else if model.wishes.is_empty() {
        out.push_str("  (none)\n");
    }
    for (i, wish) in model.wishes.iter().enumerate() {
        let marker = if wish.selected { '>' } else { ' ' };
        let _ = write!(out, "{marker} {}. {}", i + 1, wish.name);
        if !wish.comment.is_empty() {
            let _ = write!(out, " ({})", wish.comment);
        }
        out.push('\n');
    }
    out
}

/// Runs the session on stdin until `quit` or end of input.
pub async fn run(view: &WishlistView) -> std::io::Result<()> {
    println!("{HELP}\n");
    print!("{}", render_text(&view.render()));
    if let Err(err) = view.load().await {
        eprintln!("error: {err}");
    }
    print!("{}", render_text(&view.render()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(msg) => {
                eprintln!("{msg}");
                continue;
            }
        };
        tracing::debug!(?command, "session command");

        match command {
            Command::Quit => break,
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            _ => {}
        }
        match apply(view, command).await {
            Ok(Some(status)) => println!("{status}"),
            Ok(None) => {}
            Err(msg) => eprintln!("error: {msg}"),
        }
        print!("{}", render_text(&view.render()));
    }
    Ok(())
}
