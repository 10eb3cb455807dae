use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use chatpdf_logging::{chat_debug, chat_warn};

use crate::api::{ApiSettings, ChatApi, ReqwestChatApi};
use crate::{Credentials, EngineEvent, RequestId, StartError};

enum EngineCommand {
    Ask {
        request_id: RequestId,
        token: String,
        question: String,
        document_provided: bool,
    },
    Upload {
        request_id: RequestId,
        token: String,
        path: PathBuf,
    },
    Authenticate {
        request_id: RequestId,
        credentials: Credentials,
    },
    Wake,
}

/// Runs backend requests on a background tokio runtime.
///
/// Commands return immediately; each completion arrives later as an
/// [`EngineEvent`]. Dropping the handle stops the runtime and abandons any
/// request still in flight.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, StartError> {
        let api = ReqwestChatApi::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    pub fn with_api(api: Arc<dyn ChatApi>) -> Result<Self, StartError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("chatpdf-engine")
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(api.as_ref(), command).await;
                    let _ = event_tx.send(event);
                });
            }
            chat_debug!("Engine command channel closed");
        });

        Ok(Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        })
    }

    pub fn ask(
        &self,
        request_id: RequestId,
        token: impl Into<String>,
        question: impl Into<String>,
        document_provided: bool,
    ) {
        self.send(EngineCommand::Ask {
            request_id,
            token: token.into(),
            question: question.into(),
            document_provided,
        });
    }

    pub fn upload(&self, request_id: RequestId, token: impl Into<String>, path: PathBuf) {
        self.send(EngineCommand::Upload {
            request_id,
            token: token.into(),
            path,
        });
    }

    pub fn authenticate(&self, request_id: RequestId, credentials: Credentials) {
        self.send(EngineCommand::Authenticate {
            request_id,
            credentials,
        });
    }

    pub fn wake(&self) {
        self.send(EngineCommand::Wake);
    }

    /// Non-blocking poll. Also `None` while another thread is parked in [`recv`](Self::recv).
    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_lock().ok()?.try_recv().ok()
    }

    /// Blocks until the next completion. `None` once the engine has stopped.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv().ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            chat_warn!("Engine thread is gone; command dropped");
        }
    }
}

async fn handle_command(api: &dyn ChatApi, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::Ask {
            request_id,
            token,
            question,
            document_provided,
        } => EngineEvent::AnswerReady {
            request_id,
            result: api.ask(&token, &question, document_provided).await,
        },
        EngineCommand::Upload {
            request_id,
            token,
            path,
        } => EngineEvent::UploadDone {
            request_id,
            result: api.upload(&token, &path).await,
        },
        EngineCommand::Authenticate {
            request_id,
            credentials,
        } => EngineEvent::AuthDone {
            request_id,
            result: api.authenticate(&credentials).await,
        },
        EngineCommand::Wake => EngineEvent::WakeDone {
            result: api.wake().await,
        },
    }
}
