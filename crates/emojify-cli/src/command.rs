//! Line parser for the interactive session.

pub const HELP: &str = "\
Type a sentence and press enter to generate emojis for it.

Commands:
  /prompt <text>   edit the prompt without submitting
  /count <n>       set the number of emojis
  /submit          submit the current prompt
  /clear           clear the prompt and all results
  /list            show all results
  /status          show the current fields
  /help            show this message
  /quit            exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text: set it as the prompt and submit.
    Generate(String),
    SetPrompt(String),
    SetCount(String),
    Submit,
    Clear,
    List,
    Status,
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command '/{0}'. Type /help for a list of commands.")]
    Unknown(String),
}

pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }

    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Command::Generate(line.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "prompt" | "p" => Ok(Command::SetPrompt(arg.to_string())),
        "count" | "n" => Ok(Command::SetCount(arg.to_string())),
        "submit" | "s" => Ok(Command::Submit),
        "clear" | "c" => Ok(Command::Clear),
        "list" | "l" => Ok(Command::List),
        "status" => Ok(Command::Status),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}
