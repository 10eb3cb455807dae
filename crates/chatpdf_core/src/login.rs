use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::chat::transport_message;
use crate::{RequestFailure, RequestId};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    #[default]
    SignIn,
    Register,
}

impl LoginMode {
    fn toggled(self) -> Self {
        match self {
            LoginMode::SignIn => LoginMode::Register,
            LoginMode::Register => LoginMode::SignIn,
        }
    }
}

/// Raw form fields as typed by the user.
///
/// In sign-in mode `email` doubles as "email or username"; when it is empty
/// the username is sent as the login instead.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct LoginForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

// Both types travel inside `Msg`/`Effect`, which are logged with `{:?}`.
impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum AuthRequest {
    SignIn {
        login: String,
        password: String,
    },
    Register {
        username: String,
        email: String,
        password: String,
    },
}

impl fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthRequest::SignIn { login, .. } => f
                .debug_struct("SignIn")
                .field("login", login)
                .finish_non_exhaustive(),
            AuthRequest::Register {
                username, email, ..
            } => f
                .debug_struct("Register")
                .field("username", username)
                .field("email", email)
                .finish_non_exhaustive(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(&email.to_lowercase())
}

/// Local validation; nothing here touches the network.
pub fn validate(mode: LoginMode, form: &LoginForm) -> Result<AuthRequest, LoginError> {
    match mode {
        LoginMode::SignIn => {
            let login = if form.email.is_empty() {
                form.username.clone()
            } else {
                form.email.clone()
            };
            Ok(AuthRequest::SignIn {
                login,
                password: form.password.clone(),
            })
        }
        LoginMode::Register => {
            if form.password != form.confirm_password {
                return Err(LoginError::PasswordMismatch);
            }
            if !is_valid_email(&form.email) {
                return Err(LoginError::InvalidEmail);
            }
            Ok(AuthRequest::Register {
                username: form.username.clone(),
                email: form.email.clone(),
                password: form.password.clone(),
            })
        }
    }
}

pub fn auth_failure_message(mode: LoginMode, failure: &RequestFailure) -> String {
    match (failure, mode) {
        (RequestFailure::Rejected { .. }, LoginMode::Register) => "Registration failed".to_string(),
        (RequestFailure::Rejected { .. }, LoginMode::SignIn) => "Invalid credentials".to_string(),
        (RequestFailure::Transport { message }, _) => transport_message(message.as_deref()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct LoginState {
    mode: LoginMode,
    pending: Option<(RequestId, LoginMode)>,
    error: Option<String>,
}

impl LoginState {
    pub(crate) fn mode(&self) -> LoginMode {
        self.mode
    }

    pub(crate) fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.error = None;
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub(crate) fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    pub(crate) fn begin(&mut self, request_id: RequestId) {
        self.error = None;
        self.pending = Some((request_id, self.mode));
    }

    /// Clears the pending request and returns the mode it was submitted in,
    /// or `None` when `request_id` is not the outstanding one.
    pub(crate) fn finish(&mut self, request_id: RequestId) -> Option<LoginMode> {
        match self.pending {
            Some((pending_id, mode)) if pending_id == request_id => {
                self.pending = None;
                Some(mode)
            }
            _ => None,
        }
    }
}
