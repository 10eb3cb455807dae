//! ChatPDF core: pure state machine and view-model helpers.
mod chat;
mod document;
mod effect;
mod login;
mod msg;
mod route;
mod session;
mod state;
mod update;
mod upload;
mod view_model;

pub use chat::{
    chat_failure_message, ChatMessage, ChatPhase, RequestFailure, FALLBACK_FAILURE,
    FETCH_FAILED, REUPLOAD_REQUIRED,
};
pub use document::DocumentPresence;
pub use effect::Effect;
pub use login::{
    auth_failure_message, is_valid_email, validate, AuthRequest, LoginError, LoginForm, LoginMode,
};
pub use msg::Msg;
pub use route::{Route, UnknownRoute};
pub use session::AuthToken;
pub use state::{AppState, MessageId, RequestId};
pub use update::update;
pub use upload::{UploadStatus, UPLOAD_FAILED};
pub use view_model::{AppViewModel, ChatView, LoginView, UploadView};
