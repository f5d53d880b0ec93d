//! Command parser.
//!
//! Each stdin line is one command. Field validation (empty username, missing
//! full name) is left to the App so the same toasts appear as in any other
//! frontend; the parser only rejects lines it cannot map to an input at all.

use finstagram_app::{RouteError, UserInput, View};
use thiserror::Error;

/// Help text printed for `help`.
pub const HELP: &str = "\
commands:
  login <username> <password>          log in
  signup <username> <password>         create an account
  show login|signup                    switch between the two forms
  profile <full name> | <bio> | <loc>  complete profile setup
  go <view>                            feed, reels, messages, notifications, profile
  open <peer>                          open a conversation (messages view)
  back                                 close the conversation
  draft <text>                         replace the message draft
  send                                 send the draft
  say <text>                           draft and send in one step
  dismiss                              hide the status message
  logout                               log out
  help                                 show this text
  quit                                 exit
";

/// A parsed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Inputs to deliver in order. Empty for a blank line.
    Inputs(Vec<UserInput>),
    /// Print [`HELP`].
    Help,
}

/// Lines that do not map to any input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// First word is not a command.
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    /// A required argument is missing.
    #[error("`{command}` needs {argument}")]
    MissingArgument {
        /// Command name.
        command: &'static str,
        /// What is missing.
        argument: &'static str,
    },

    /// Argument is not one of the accepted values.
    #[error("`{command}` does not accept `{value}`")]
    InvalidArgument {
        /// Command name.
        command: &'static str,
        /// Rejected value.
        value: String,
    },

    /// `go` target is not a view.
    #[error(transparent)]
    Route(#[from] RouteError),
}

/// Parse one input line.
pub fn parse_line(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let input = match word {
        "" => return Ok(Command::Inputs(Vec::new())),
        "help" | "?" => return Ok(Command::Help),
        "login" => {
            let (username, password) = two_words(rest);
            UserInput::SubmitLogin { username, password }
        },
        "signup" => {
            let (username, password) = two_words(rest);
            UserInput::SubmitSignup { username, password }
        },
        "show" => match rest {
            "login" => UserInput::ShowLogin,
            "signup" => UserInput::ShowSignup,
            "" => {
                return Err(CommandError::MissingArgument {
                    command: "show",
                    argument: "login or signup",
                });
            },
            other => {
                let value = other.to_string();
                return Err(CommandError::InvalidArgument { command: "show", value });
            },
        },
        "profile" => {
            let mut parts = rest.split('|').map(str::trim);
            let mut next = || parts.next().unwrap_or_default().to_string();
            UserInput::SubmitProfile { full_name: next(), bio: next(), location: next() }
        },
        "go" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument { command: "go", argument: "a view" });
            }
            UserInput::Navigate(rest.parse::<View>()?)
        },
        "open" => {
            if rest.is_empty() {
                let argument = "a username";
                return Err(CommandError::MissingArgument { command: "open", argument });
            }
            UserInput::SelectPeer(rest.to_string())
        },
        "back" => UserInput::Back,
        "draft" => UserInput::EditDraft(rest.to_string()),
        "send" => UserInput::SendDraft,
        "say" => {
            let draft = UserInput::EditDraft(rest.to_string());
            return Ok(Command::Inputs(vec![draft, UserInput::SendDraft]));
        },
        "dismiss" => UserInput::DismissToast,
        "logout" => UserInput::Logout,
        "quit" | "exit" => UserInput::Quit,
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    };
    Ok(Command::Inputs(vec![input]))
}

/// First two whitespace-separated words, empty when absent.
fn two_words(rest: &str) -> (String, String) {
    let mut words = rest.split_whitespace();
    let first = words.next().unwrap_or_default().to_string();
    let second = words.next().unwrap_or_default().to_string();
    (first, second)
}
