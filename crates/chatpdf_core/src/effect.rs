use std::path::PathBuf;

use crate::{AuthRequest, AuthToken, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fire-and-forget ping so the backend is warm by the first question.
    WakeServer,
    SendQuestion {
        request_id: RequestId,
        token: AuthToken,
        question: String,
        document_provided: bool,
    },
    UploadFile {
        request_id: RequestId,
        token: AuthToken,
        path: PathBuf,
    },
    Authenticate {
        request_id: RequestId,
        request: AuthRequest,
    },
    PersistToken(AuthToken),
    ClearToken,
    Shutdown,
}
