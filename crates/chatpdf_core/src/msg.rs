use std::path::PathBuf;

use crate::{AuthToken, LoginForm, RequestFailure, RequestId, Route};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Application finished starting up.
    AppStarted,
    /// A token was found in local storage or supplied by configuration.
    SessionRestored(AuthToken),
    /// User moved to another page.
    Navigate(Route),
    /// User edited the question box.
    ChatInputChanged(String),
    /// User submitted the current question box content.
    QuestionSubmitted,
    /// Backend completion for a question.
    AnswerReceived {
        request_id: RequestId,
        result: Result<String, RequestFailure>,
    },
    /// User closed the chat error dialog.
    ErrorDismissed,
    /// User asked for an empty transcript.
    ChatCleared,
    /// User picked (or dropped) a file; `None` when the picker was cancelled.
    FileChosen(Option<PathBuf>),
    /// Backend completion for an upload.
    UploadFinished {
        request_id: RequestId,
        result: Result<(), RequestFailure>,
    },
    /// User closed the upload success/error dialog.
    UploadStatusDismissed,
    /// User switched between sign-in and registration.
    LoginModeToggled,
    /// User submitted the login form.
    LoginSubmitted(LoginForm),
    /// Backend completion for sign-in or registration.
    AuthFinished {
        request_id: RequestId,
        result: Result<AuthToken, RequestFailure>,
    },
    /// User signed out.
    SignedOut,
    /// User closed the application.
    QuitRequested,
}
