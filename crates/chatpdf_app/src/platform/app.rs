use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use chatpdf_core::{update, AppState, AuthToken, LoginForm, LoginMode, Msg, Route};
use chatpdf_engine::{ensure_state_dir, ApiSettings, MarkdownRenderer, TerminalRenderer};
use chatpdf_logging::{chat_debug, chat_info};

use super::cli::Args;
use super::effects::{EffectRunner, Flow};
use super::logging;
use super::persistence::SessionStore;
use super::ui;
use super::ui::input::Command;

/// Everything the main loop reacts to: typed lines and backend completions.
pub enum Inbox {
    Command(Command),
    Msg(Msg),
}

pub fn run_app(args: Args) -> anyhow::Result<()> {
    logging::initialize(args.log, &args.log_file);
    chat_info!("Starting chatpdf against {}", args.api_url);

    let mut settings = ApiSettings::with_base_url(&args.api_url)
        .with_context(|| format!("invalid backend url {:?}", args.api_url))?;
    settings.request_timeout = Duration::from_secs(args.timeout_secs);

    let state_dir = args.state_dir();
    ensure_state_dir(&state_dir)
        .with_context(|| format!("cannot use state directory {}", state_dir.display()))?;

    let (inbox_tx, inbox_rx) = mpsc::channel::<Inbox>();
    let runner = EffectRunner::new(settings, SessionStore::new(state_dir), inbox_tx.clone())
        .context("failed to start the request engine")?;
    spawn_stdin_reader(inbox_tx);

    let mut app = App {
        state: AppState::new(),
        runner,
        markdown: TerminalRenderer,
    };
    print_lines(&ui::render::page(&app.state.view()));
    println!("Type /help for commands.");

    if !args.no_wake && app.dispatch(Msg::AppStarted) == Flow::Exit {
        return Ok(());
    }
    let restored = args
        .token
        .clone()
        .filter(|token| !token.trim().is_empty())
        .map(AuthToken::new)
        .or_else(|| app.runner.store().load());
    if let Some(token) = restored {
        app.dispatch(Msg::SessionRestored(token));
    }

    while let Ok(item) = inbox_rx.recv() {
        let flow = match item {
            Inbox::Msg(msg) => app.dispatch(msg),
            Inbox::Command(command) => app.handle_command(command),
        };
        if flow == Flow::Exit {
            break;
        }
    }

    chat_info!("chatpdf exiting");
    Ok(())
}

struct App<R: MarkdownRenderer> {
    state: AppState,
    runner: EffectRunner,
    markdown: R,
}

impl<R: MarkdownRenderer> App<R> {
    fn dispatch(&mut self, msg: Msg) -> Flow {
        chat_debug!("dispatch {:?}", msg);
        let before = self.state.view();
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            print_lines(&ui::render::render(&before, &state.view(), &self.markdown));
        }
        self.state = state;
        self.runner.run(effects)
    }

    fn dispatch_all(&mut self, msgs: Vec<Msg>) -> Flow {
        for msg in msgs {
            if self.dispatch(msg) == Flow::Exit {
                return Flow::Exit;
            }
        }
        Flow::Continue
    }

    fn handle_command(&mut self, command: Command) -> Flow {
        match command {
            Command::Ask(question) => {
                if self.state.route() != Route::Chat {
                    println!("Questions go on the chat page; type /chat first.");
                    return Flow::Continue;
                }
                self.dispatch_all(vec![
                    Msg::ChatInputChanged(question),
                    Msg::QuestionSubmitted,
                ])
            }
            Command::SignIn(form) => self.submit_login(LoginMode::SignIn, form),
            Command::Register(form) => self.submit_login(LoginMode::Register, form),
            Command::Send(msgs) => self.dispatch_all(msgs),
            Command::Help => {
                println!("{}", ui::input::HELP);
                Flow::Continue
            }
            Command::Invalid(message) => {
                println!("{message}");
                Flow::Continue
            }
        }
    }

    fn submit_login(&mut self, mode: LoginMode, form: LoginForm) -> Flow {
        if self.state.is_signed_in() {
            println!("Already signed in; /signout first to switch accounts.");
            return Flow::Continue;
        }
        let mut msgs = vec![Msg::Navigate(Route::Login)];
        if self.state.view().login.mode != mode {
            msgs.push(Msg::LoginModeToggled);
        }
        msgs.push(Msg::LoginSubmitted(form));
        self.dispatch_all(msgs)
    }
}

fn spawn_stdin_reader(inbox: mpsc::Sender<Inbox>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            let command = ui::input::parse_line(&line);
            if inbox.send(Inbox::Command(command)).is_err() {
                return;
            }
        }
        let _ = inbox.send(Inbox::Msg(Msg::QuitRequested));
    });
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
