//! Line-oriented command shell driving the contact controller.
//!
//! # Responsibility
//! - Parse one command per input line.
//! - Dispatch commands to controller events.

use phonebook_core::{ConfirmGate, ContactController, ContactStorage, ContactView, FormInput};
use std::io::{self, Write};

pub const HELP: &str = "\
commands:
  list                              show all contacts (clears search)
  add <name> | <phone> [| <email>]  add a new contact (discards an edit in progress)
  edit <id>                         load a contact into the form
  submit <name> | <phone> [| <email>]
                                    save the form (update when editing, else add)
  cancel                            leave edit mode
  delete <id>                       delete a contact after confirmation
  search <query>                    filter by name or phone
  clear                             clear the search
  help                              show this help
  quit                              exit";

/// One parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Add(FormInput),
    Edit(String),
    Submit(FormInput),
    Cancel,
    Delete(String),
    Search(String),
    Clear,
    Help,
    Quit,
    Empty,
}

/// Command parse failure, shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(pub String);

pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "" => Ok(Command::Empty),
        "list" | "ls" => Ok(Command::List),
        "add" => parse_form(rest).map(Command::Add),
        "submit" | "save" => parse_form(rest).map(Command::Submit),
        "edit" => required_id(rest).map(Command::Edit),
        "delete" | "rm" => required_id(rest).map(Command::Delete),
        "search" => Ok(Command::Search(rest.to_string())),
        "clear" => Ok(Command::Clear),
        "cancel" => Ok(Command::Cancel),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(ParseError(format!("unknown command `{other}`; try `help`"))),
    }
}

fn parse_form(rest: &str) -> Result<FormInput, ParseError> {
    let mut fields = rest.split('|');
    let name = fields.next().unwrap_or_default();
    let Some(phone) = fields.next() else {
        return Err(ParseError(
            "expected `<name> | <phone> [| <email>]`".to_string(),
        ));
    };
    let email = fields.next().unwrap_or_default();
    if fields.next().is_some() {
        return Err(ParseError("too many `|`-separated fields".to_string()));
    }
    Ok(FormInput::new(name, phone, email))
}

fn required_id(rest: &str) -> Result<String, ParseError> {
    if rest.is_empty() {
        return Err(ParseError("expected a contact id".to_string()));
    }
    Ok(rest.to_string())
}

/// Reads lines until `quit` or end of input.
pub fn run_shell<S, V, G, F>(
    controller: &mut ContactController<S, V, G>,
    mut next_line: F,
    out: &mut dyn Write,
) -> io::Result<()>
where
    S: ContactStorage,
    V: ContactView,
    G: ConfirmGate,
    F: FnMut() -> io::Result<Option<String>>,
{
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = next_line()? else {
            return Ok(());
        };

        match parse_command(&line) {
            Ok(Command::Quit) => return Ok(()),
            Ok(Command::Help) => writeln!(out, "{HELP}")?,
            Ok(Command::Empty) => {}
            Ok(command) => dispatch(controller, command),
            Err(ParseError(message)) => writeln!(out, "error: {message}")?,
        }
    }
}

fn dispatch<S, V, G>(controller: &mut ContactController<S, V, G>, command: Command)
where
    S: ContactStorage,
    V: ContactView,
    G: ConfirmGate,
{
    match command {
        Command::List | Command::Clear => controller.clear_search(),
        Command::Add(input) => {
            controller.cancel();
            controller.submit(input);
        }
        Command::Submit(input) => controller.submit(input),
        Command::Edit(id) => controller.edit_clicked(&id),
        Command::Delete(id) => controller.delete_clicked(&id),
        Command::Search(query) => controller.search_input(&query),
        Command::Cancel => controller.cancel(),
        Command::Help | Command::Quit | Command::Empty => {}
    }
}
