//! ChatPDF engine: backend IO, effect execution and markdown rendering.
mod api;
mod engine;
mod markdown;
mod persist;
mod types;

pub use api::{ApiSettings, ChatApi, ReqwestChatApi, DEFAULT_BASE_URL, WAKE_MESSAGE};
pub use engine::EngineHandle;
pub use markdown::{HtmlRenderer, MarkdownRenderer, TerminalRenderer};
pub use persist::{ensure_state_dir, AtomicFileWriter, PersistError};
pub use types::{
    ApiError, AskRequest, AskResponse, Credentials, EngineEvent, ErrorBody, FailureKind,
    RequestId, SignInRequest, SignUpRequest, StartError, TokenResponse, WakeRequest,
};
