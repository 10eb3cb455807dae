use crate::chat::ChatState;
use crate::login::LoginState;
use crate::upload::UploadState;
use crate::view_model::{AppViewModel, ChatView, LoginView, UploadView};
use crate::{AuthToken, DocumentPresence, Route, UploadStatus, UPLOAD_FAILED};

pub type MessageId = u64;
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    route: Route,
    session: Option<AuthToken>,
    pub(crate) documents: DocumentPresence,
    pub(crate) chat: ChatState,
    pub(crate) upload: UploadState,
    pub(crate) login: LoginState,
    next_message_id: MessageId,
    next_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn session(&self) -> Option<&AuthToken> {
        self.session.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn document_provided(&self) -> bool {
        self.documents.read()
    }

    pub fn view(&self) -> AppViewModel {
        let upload_status = self.upload.status();
        AppViewModel {
            route: self.route,
            nav_bar: self.route.shows_nav_bar(),
            signed_in: self.is_signed_in(),
            document_provided: self.documents.read(),
            chat: ChatView {
                input: self.chat.input().to_string(),
                transcript: self.chat.transcript().to_vec(),
                phase: self.chat.phase(),
                pending: self.chat.is_pending(),
                queued: self.chat.queued_len(),
                error: self.chat.error().map(ToOwned::to_owned),
                generation: self.chat.generation(),
            },
            upload: UploadView {
                pending: self.upload.is_pending(),
                file_name: self.upload.file_name().map(ToOwned::to_owned),
                status: upload_status,
                error: (upload_status == UploadStatus::Error).then(|| UPLOAD_FAILED.to_string()),
            },
            login: LoginView {
                mode: self.login.mode(),
                pending: self.login.is_pending(),
                error: self.login.error().map(ToOwned::to_owned),
            },
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn allocate_message_id(&mut self) -> MessageId {
        self.next_message_id += 1;
        self.next_message_id
    }

    pub(crate) fn allocate_request_id(&mut self) -> RequestId {
        self.next_request_id += 1;
        self.next_request_id
    }

    pub(crate) fn set_session(&mut self, token: AuthToken) {
        self.session = Some(token);
        self.mark_dirty();
    }

    pub(crate) fn clear_session(&mut self) -> Option<AuthToken> {
        let previous = self.session.take();
        if previous.is_some() {
            self.mark_dirty();
        }
        previous
    }

    /// Moves to `route`. Leaving the chat page tears its transcript down;
    /// the login page bounces to chat when a session already exists.
    pub(crate) fn navigate(&mut self, route: Route) {
        let route = if route == Route::Login && self.is_signed_in() {
            Route::Chat
        } else {
            route
        };
        if route == self.route {
            return;
        }
        if self.route == Route::Chat {
            self.chat.tear_down();
        }
        self.route = route;
        self.mark_dirty();
    }
}
