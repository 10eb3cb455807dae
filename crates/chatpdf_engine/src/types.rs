use std::fmt;

use serde::{Deserialize, Serialize};

pub type RequestId = u64;

/// Body of `POST /api/v1/send`. The backend expects the inverted `noDoc` flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AskRequest<'a> {
    pub question: &'a str,
    #[serde(rename = "noDoc")]
    pub no_doc: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Body the backend sends with a non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignUpRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignInRequest<'a> {
    pub login: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WakeRequest<'a> {
    pub message: &'a str,
}

#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    SignIn {
        login: String,
        password: String,
    },
    SignUp {
        username: String,
        email: String,
        password: String,
    },
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::SignIn { login, .. } => f
                .debug_struct("SignIn")
                .field("login", login)
                .finish_non_exhaustive(),
            Credentials::SignUp {
                username, email, ..
            } => f
                .debug_struct("SignUp")
                .field("username", username)
                .field("email", email)
                .finish_non_exhaustive(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    AnswerReady {
        request_id: RequestId,
        result: Result<String, ApiError>,
    },
    UploadDone {
        request_id: RequestId,
        result: Result<(), ApiError>,
    },
    AuthDone {
        request_id: RequestId,
        result: Result<String, ApiError>,
    },
    WakeDone {
        result: Result<(), ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    /// Non-2xx reply; `error` is the body's `error` field when present.
    HttpStatus { status: u16, error: Option<String> },
    Timeout,
    Network,
    Decode,
    Io,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus { status, .. } => write!(f, "http status {status}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Io => write!(f, "io error"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StartError {
    #[error("http client: {0}")]
    Client(#[from] ApiError),
    #[error("tokio runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
