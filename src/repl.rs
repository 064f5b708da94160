//! Line-oriented builder front end.
//!
//! DESIGN
//! ======
//! Each input line is parsed into a `Command` (pure, see `parse_command`)
//! and executed against a `BuilderSession`. Gateway commands await the
//! gateway inline, so this loop never has two requests in flight; the
//! session's ticket handling is still used so results flow through the
//! same path a concurrent UI would take. Any visible notification is
//! printed before the next prompt and cleared once expired.

use std::str::FromStr;
use std::time::Instant;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::catalog::{self, FieldType, Property, UnknownFieldType, UnknownProperty};
use crate::form::{EditError, FieldDefinition, FormId};
use crate::gateway::FormGateway;
use crate::session::{BuilderSession, Outcome};

pub const HELP: &str = "\
commands:
  title <text>          set the form title
  add <type>            append a field (see `palette`)
  remove <i>            remove field i
  open <i> | close      open/close the property panel
  set <property> <val>  edit a property of the open field
  option <k> <val>      replace option k of the open field
  add-option            append an empty option to the open field
  fields | palette      list fields / placeable types
  preview               show the rendered form
  save | history        save remotely / list saved forms
  load <id> | new       load a saved form / start over
  help | quit";

// =============================================================================
// COMMANDS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Title(String),
    Add(FieldType),
    Remove(usize),
    Open(usize),
    Close,
    Set { property: Property, value: String },
    SetOption { index: usize, value: String },
    AddOption,
    Fields,
    Palette,
    Preview,
    Save,
    History,
    Load(FormId),
    New,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("{command}: missing {argument}")]
    MissingArgument { command: &'static str, argument: &'static str },
    #[error("{command}: '{value}' is not a position")]
    BadIndex { command: &'static str, value: String },
    #[error(transparent)]
    FieldType(#[from] UnknownFieldType),
    #[error(transparent)]
    Property(#[from] UnknownProperty),
}

/// Split off the first whitespace-delimited word.
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(at) => (&input[..at], input[at..].trim_start()),
        None => (input, ""),
    }
}

fn require<'a>(command: &'static str, argument: &'static str, value: &'a str) -> Result<&'a str, CommandError> {
    if value.is_empty() { Err(CommandError::MissingArgument { command, argument }) } else { Ok(value) }
}

fn index(command: &'static str, raw: &str) -> Result<usize, CommandError> {
    let raw = require(command, "index", raw)?;
    raw.parse::<usize>()
        .map_err(|_| CommandError::BadIndex { command, value: raw.to_owned() })
}

/// Parse one input line.
///
/// # Errors
///
/// Returns [`CommandError`] for blank lines, unknown words and missing or
/// malformed arguments.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let (word, rest) = split_word(line.trim());
    match word {
        "" => Err(CommandError::Empty),
        "title" => Ok(Command::Title(rest.to_owned())),
        "add" => Ok(Command::Add(FieldType::from_str(require("add", "type", rest)?)?)),
        "remove" | "rm" => Ok(Command::Remove(index("remove", rest)?)),
        "open" => Ok(Command::Open(index("open", rest)?)),
        "close" => Ok(Command::Close),
        "set" => {
            let (name, value) = split_word(require("set", "property", rest)?);
            Ok(Command::Set { property: Property::from_str(name)?, value: value.to_owned() })
        }
        "option" => {
            let (position, value) = split_word(rest);
            Ok(Command::SetOption { index: index("option", position)?, value: value.to_owned() })
        }
        "add-option" => Ok(Command::AddOption),
        "fields" | "ls" => Ok(Command::Fields),
        "palette" => Ok(Command::Palette),
        "preview" => Ok(Command::Preview),
        "save" => Ok(Command::Save),
        "history" => Ok(Command::History),
        "load" => Ok(Command::Load(FormId::new(require("load", "id", rest)?))),
        "new" => Ok(Command::New),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_owned())),
    }
}

// =============================================================================
// RENDERING
// =============================================================================

fn property_value(field: &FieldDefinition, property: Property) -> String {
    match property {
        Property::Label => field.label.clone(),
        Property::Placeholder => field.placeholder.clone(),
        Property::Required => field.required.to_string(),
        Property::MaxLength => field.max_length().map(|n| n.to_string()).unwrap_or_default(),
        Property::Options => field.options().map(|o| o.join(" | ")).unwrap_or_default(),
    }
}

/// The property panel for `field`: one line per property the catalog allows.
#[must_use]
pub fn describe_panel(index: usize, field: &FieldDefinition) -> String {
    let mut out = format!("field {index} ({})", field.field_type());
    for &property in catalog::allowed_properties(field.field_type()) {
        out.push_str(&format!("\n  {property}: {}", property_value(field, property)));
    }
    out
}

fn describe_fields(session: &BuilderSession) -> String {
    let doc = session.document();
    let mut lines = vec![format!(
        "title: {}{}",
        doc.title,
        doc.remote_id.as_ref().map(|id| format!(" (id {id})")).unwrap_or_default()
    )];
    for (i, field) in doc.fields.iter().enumerate() {
        let marker = if session.selection() == Some(i) { '*' } else { ' ' };
        lines.push(format!("{marker}{i}: {} ({})", field.label, field.field_type()));
    }
    lines.join("\n")
}

/// Failures are already in the notification slot; only staleness needs a line.
fn describe_outcome(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Applied | Outcome::Failed(_) => None,
        Outcome::Stale => Some("response ignored (superseded)".to_owned()),
    }
}

// =============================================================================
// EXECUTION
// =============================================================================

pub enum Flow {
    Continue(Option<String>),
    Quit,
}

/// Run `command` against the session.
///
/// # Errors
///
/// Returns the [`EditError`] of a rejected local edit. Gateway failures are
/// not errors here: they are reported through the session's notification.
pub async fn execute<G>(session: &mut BuilderSession, gateway: &G, command: Command) -> Result<Flow, EditError>
where
    G: FormGateway + ?Sized,
{
    let reply = match command {
        Command::Title(title) => {
            session.set_title(title);
            None
        }
        Command::Add(field_type) => {
            let index = session.append_field(field_type);
            Some(format!("added {field_type} at {index}"))
        }
        Command::Remove(index) => {
            let removed = session.remove_field(index)?;
            Some(format!("removed {}", removed.label))
        }
        Command::Open(index) => {
            session.open_for(index)?;
            Some(describe_panel(index, session.selected_field()?))
        }
        Command::Close => {
            session.close();
            None
        }
        Command::Set { property, value } => {
            session.set_property_input(property, &value)?;
            None
        }
        Command::SetOption { index, value } => {
            session.set_option(index, value)?;
            None
        }
        Command::AddOption => {
            let position = session.add_option()?;
            Some(format!("option {position} added"))
        }
        Command::Fields => Some(describe_fields(session)),
        Command::Palette => Some(
            catalog::palette()
                .iter()
                .map(|entry| format!("{:<16}{}", entry.field_type.as_str(), entry.label))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        Command::Preview => Some(session.preview().to_string()),
        Command::Save => describe_outcome(&session.save_with(gateway).await),
        Command::History => {
            let outcome = session.history_with(gateway).await;
            match outcome {
                Outcome::Applied if session.history().is_empty() => Some("no saved forms".to_owned()),
                Outcome::Applied => Some(
                    session
                        .history()
                        .iter()
                        .map(|entry| format!("{:>6}  {}  {}", entry.id, entry.updated_at, entry.title))
                        .collect::<Vec<_>>()
                        .join("\n"),
                ),
                other => describe_outcome(&other),
            }
        }
        Command::Load(id) => describe_outcome(&session.load_with(gateway, id).await),
        Command::New => {
            session.reset();
            None
        }
        Command::Help => Some(HELP.to_owned()),
        Command::Quit => return Ok(Flow::Quit),
    };
    Ok(Flow::Continue(reply))
}

/// Drive a session from `input` until end of input or `quit`.
///
/// # Errors
///
/// Returns an I/O error from reading `input` or writing `output`.
pub async fn run<R, W, G>(session: &mut BuilderSession, gateway: &G, input: R, mut output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    G: FormGateway + ?Sized,
{
    let mut lines = input.lines();
    let mut last_shown: Option<Instant> = None;
    loop {
        let now = Instant::now();
        if let Some(notification) = session.notifier().current_at(now) {
            if last_shown != Some(notification.visible_until) {
                last_shown = Some(notification.visible_until);
                let tag = if notification.success { "ok" } else { "failed" };
                output
                    .write_all(format!("[{tag}] {}\n", notification.message).as_bytes())
                    .await?;
            }
        }
        session.notifier_mut().sweep_at(now);
        output.write_all(b"> ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let reply = match parse_command(&line) {
            Err(CommandError::Empty) => None,
            Err(e) => Some(format!("error: {e}")),
            Ok(command) => match execute(session, gateway, command).await {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue(reply)) => reply,
                Err(e) => Some(format!("error: {e} ({})", e.error_code())),
            },
        };

        if let Some(reply) = reply {
            output.write_all(reply.as_bytes()).await?;
            output.write_all(b"\n").await?;
        }
    }
    output.flush().await
}

#[cfg(test)]
#[path = "repl_test.rs"]
mod tests;
