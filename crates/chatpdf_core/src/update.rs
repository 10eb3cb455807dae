use std::path::PathBuf;

use chatpdf_logging::{chat_debug, chat_info, chat_warn};

use crate::{
    auth_failure_message, chat_failure_message, login, AppState, AuthToken, ChatMessage, Effect,
    LoginForm, Msg, RequestFailure, RequestId, Route, UploadStatus,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::AppStarted => vec![Effect::WakeServer],
        Msg::SessionRestored(token) => {
            state.set_session(token);
            Vec::new()
        }
        Msg::Navigate(route) => {
            state.navigate(route);
            Vec::new()
        }
        Msg::ChatInputChanged(text) => {
            state.chat.set_input(text);
            Vec::new()
        }
        Msg::QuestionSubmitted => submit_question(&mut state),
        Msg::AnswerReceived { request_id, result } => {
            answer_received(&mut state, request_id, result)
        }
        Msg::ErrorDismissed => {
            if state.chat.clear_error() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ChatCleared => {
            state.chat.tear_down();
            state.mark_dirty();
            Vec::new()
        }
        Msg::FileChosen(path) => choose_file(&mut state, path),
        Msg::UploadFinished { request_id, result } => {
            let status = match &result {
                Ok(()) => UploadStatus::Success,
                Err(failure) => {
                    chat_warn!("Upload request {} failed: {:?}", request_id, failure);
                    UploadStatus::Error
                }
            };
            if state.upload.finish(request_id, status) {
                if status == UploadStatus::Success {
                    state.documents.set(true);
                }
                state.mark_dirty();
            } else {
                chat_debug!("Dropping stale upload completion {}", request_id);
            }
            Vec::new()
        }
        Msg::UploadStatusDismissed => {
            if state.upload.dismiss() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::LoginModeToggled => {
            if !state.login.is_pending() {
                state.login.toggle_mode();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::LoginSubmitted(form) => submit_login(&mut state, &form),
        Msg::AuthFinished { request_id, result } => auth_finished(&mut state, request_id, result),
        Msg::SignedOut => {
            if state.clear_session().is_some() {
                state.chat.tear_down();
                state.navigate(Route::Login);
                vec![Effect::ClearToken]
            } else {
                Vec::new()
            }
        }
        Msg::QuitRequested => {
            state.chat.tear_down();
            vec![Effect::Shutdown]
        }
    };

    (state, effects)
}

fn submit_question(state: &mut AppState) -> Vec<Effect> {
    let question = state.chat.input().trim().to_string();
    if question.is_empty() {
        return Vec::new();
    }
    if !state.is_signed_in() {
        chat_debug!("Ignoring question while signed out");
        return Vec::new();
    }

    state.chat.clear_input();
    state.chat.clear_error();
    let id = state.allocate_message_id();
    state.chat.push(ChatMessage {
        id,
        content: question.clone(),
        is_response: false,
    });
    state.mark_dirty();

    if state.chat.is_pending() {
        // Serialized per transcript: this one goes out when the current answer lands.
        state.chat.enqueue(question);
        return Vec::new();
    }
    send_question(state, question).into_iter().collect()
}

fn send_question(state: &mut AppState, question: String) -> Option<Effect> {
    let token = state.session().cloned()?;
    let request_id = state.allocate_request_id();
    state.chat.begin(request_id);
    chat_info!(
        "SendQuestion request_id={} question_len={}",
        request_id,
        question.len()
    );
    Some(Effect::SendQuestion {
        request_id,
        token,
        question,
        document_provided: state.documents.read(),
    })
}

fn answer_received(
    state: &mut AppState,
    request_id: RequestId,
    result: Result<String, RequestFailure>,
) -> Vec<Effect> {
    if !state.chat.accepts(request_id) {
        chat_debug!("Dropping stale answer for request {}", request_id);
        return Vec::new();
    }

    state.chat.finish();
    match result {
        Ok(answer) => {
            let id = state.allocate_message_id();
            state.chat.push(ChatMessage {
                id,
                content: answer,
                is_response: true,
            });
        }
        Err(failure) => {
            chat_warn!("Question request {} failed: {:?}", request_id, failure);
            state.chat.fail(chat_failure_message(&failure));
        }
    }
    state.mark_dirty();

    match state.chat.pop_queued() {
        Some(next) => send_question(state, next).into_iter().collect(),
        None => Vec::new(),
    }
}

fn choose_file(state: &mut AppState, path: Option<PathBuf>) -> Vec<Effect> {
    let Some(path) = path else {
        return Vec::new();
    };
    if state.upload.is_pending() {
        chat_debug!("Upload already in progress; ignoring {:?}", path);
        return Vec::new();
    }
    let Some(token) = state.session().cloned() else {
        chat_debug!("Ignoring upload while signed out");
        return Vec::new();
    };

    let request_id = state.allocate_request_id();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    state.upload.begin(request_id, file_name);
    state.mark_dirty();
    chat_info!("UploadFile request_id={} path={:?}", request_id, path);
    vec![Effect::UploadFile {
        request_id,
        token,
        path,
    }]
}

fn submit_login(state: &mut AppState, form: &LoginForm) -> Vec<Effect> {
    if state.login.is_pending() {
        return Vec::new();
    }
    match login::validate(state.login.mode(), form) {
        Ok(request) => {
            let request_id = state.allocate_request_id();
            state.login.begin(request_id);
            state.mark_dirty();
            vec![Effect::Authenticate {
                request_id,
                request,
            }]
        }
        Err(err) => {
            state.login.set_error(err.to_string());
            state.mark_dirty();
            Vec::new()
        }
    }
}

fn auth_finished(
    state: &mut AppState,
    request_id: RequestId,
    result: Result<AuthToken, RequestFailure>,
) -> Vec<Effect> {
    let Some(mode) = state.login.finish(request_id) else {
        chat_debug!("Dropping stale auth completion {}", request_id);
        return Vec::new();
    };
    state.mark_dirty();
    match result {
        Ok(token) => {
            state.set_session(token.clone());
            state.navigate(Route::Chat);
            vec![Effect::PersistToken(token)]
        }
        Err(failure) => {
            state.login.set_error(auth_failure_message(mode, &failure));
            Vec::new()
        }
    }
}
