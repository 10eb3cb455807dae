use crate::{ChatMessage, ChatPhase, LoginMode, Route, UploadStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub route: Route,
    pub nav_bar: bool,
    pub signed_in: bool,
    pub document_provided: bool,
    pub chat: ChatView,
    pub upload: UploadView,
    pub login: LoginView,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatView {
    pub input: String,
    pub transcript: Vec<ChatMessage>,
    pub phase: ChatPhase,
    pub pending: bool,
    /// Questions echoed but not yet sent.
    pub queued: usize,
    pub error: Option<String>,
    /// Bumped every time the transcript is torn down.
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadView {
    pub pending: bool,
    pub file_name: Option<String>,
    pub status: UploadStatus,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginView {
    pub mode: LoginMode,
    pub pending: bool,
    pub error: Option<String>,
}
