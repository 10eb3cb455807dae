use std::path::PathBuf;

use chatpdf_core::{LoginForm, Msg, Route};

pub const HELP: &str = "\
Commands:
  <text>                          ask a question (on the chat page)
  /home /login /chat /upload /about   open a page
  /upload <path>                  upload a document
  /signin <login> <password>      sign in with email or username
  /register <username> <email> <password> <confirm>
  /signout                        forget the saved session
  /dismiss                        close an error or upload dialog
  /clear                          start a fresh chat
  /help                           show this list
  /quit                           exit";

/// One line of user input, decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ask(String),
    SignIn(LoginForm),
    Register(LoginForm),
    Send(Vec<Msg>),
    Help,
    Invalid(String),
}

pub fn parse_line(line: &str) -> Command {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Command::Ask(line.to_string());
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = parts.collect();

    match (name.as_str(), args.as_slice()) {
        ("help" | "?", _) => Command::Help,
        ("quit" | "exit", _) => Command::Send(vec![Msg::QuitRequested]),
        ("clear", []) => Command::Send(vec![Msg::ChatCleared]),
        ("dismiss", []) => Command::Send(vec![Msg::ErrorDismissed, Msg::UploadStatusDismissed]),
        ("signout" | "logout", []) => Command::Send(vec![Msg::SignedOut]),
        ("upload", []) => Command::Send(vec![Msg::Navigate(Route::Upload)]),
        ("upload", _) => {
            // Paths may contain spaces; take everything after the command name.
            let raw = rest["upload".len()..].trim();
            let path = raw.trim_matches(|c| c == '"' || c == '\'');
            Command::Send(vec![
                Msg::Navigate(Route::Upload),
                Msg::FileChosen(Some(PathBuf::from(path))),
            ])
        }
        ("signin" | "login", [login, password]) => Command::SignIn(LoginForm {
            email: (*login).to_string(),
            password: (*password).to_string(),
            ..LoginForm::default()
        }),
        ("login", []) => Command::Send(vec![Msg::Navigate(Route::Login)]),
        ("register", [username, email, password, confirm]) => Command::Register(LoginForm {
            username: (*username).to_string(),
            email: (*email).to_string(),
            password: (*password).to_string(),
            confirm_password: (*confirm).to_string(),
        }),
        ("signin", _) => Command::Invalid("usage: /signin <login> <password>".to_string()),
        ("register", _) => Command::Invalid(
            "usage: /register <username> <email> <password> <confirm>".to_string(),
        ),
        (page, []) => match page.parse::<Route>() {
            Ok(route) => Command::Send(vec![Msg::Navigate(route)]),
            Err(_) => Command::Invalid(format!("unknown command /{page}; try /help")),
        },
        (other, _) => Command::Invalid(format!("unknown command /{other}; try /help")),
    }
}
