use std::sync::{mpsc, Arc};
use std::thread;

use chatpdf_core::{AuthRequest, AuthToken, Effect, Msg, RequestFailure};
use chatpdf_engine::{
    ApiError, ApiSettings, Credentials, EngineEvent, EngineHandle, FailureKind, StartError,
};
use chatpdf_logging::{chat_debug, chat_info, chat_warn};

use super::app::Inbox;
use super::persistence::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct EffectRunner {
    engine: Arc<EngineHandle>,
    store: SessionStore,
}

impl EffectRunner {
    pub fn new(
        settings: ApiSettings,
        store: SessionStore,
        inbox: mpsc::Sender<Inbox>,
    ) -> Result<Self, StartError> {
        let engine = Arc::new(EngineHandle::new(settings)?);
        let runner = Self { engine, store };
        runner.spawn_event_loop(inbox);
        Ok(runner)
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn run(&self, effects: Vec<Effect>) -> Flow {
        let mut flow = Flow::Continue;
        for effect in effects {
            match effect {
                Effect::WakeServer => self.engine.wake(),
                Effect::SendQuestion {
                    request_id,
                    token,
                    question,
                    document_provided,
                } => {
                    chat_debug!(
                        "ask request_id={} document_provided={}",
                        request_id,
                        document_provided
                    );
                    self.engine
                        .ask(request_id, token.as_str(), question, document_provided);
                }
                Effect::UploadFile {
                    request_id,
                    token,
                    path,
                } => {
                    self.engine.upload(request_id, token.as_str(), path);
                }
                Effect::Authenticate {
                    request_id,
                    request,
                } => {
                    let credentials = credentials_for(request);
                    chat_info!("Authenticate request_id={} {:?}", request_id, credentials);
                    self.engine.authenticate(request_id, credentials);
                }
                Effect::PersistToken(token) => self.store.save(&token),
                Effect::ClearToken => self.store.clear(),
                Effect::Shutdown => flow = Flow::Exit,
            }
        }
        flow
    }

    fn spawn_event_loop(&self, inbox: mpsc::Sender<Inbox>) {
        let engine = self.engine.clone();
        thread::spawn(move || {
            while let Some(event) = engine.recv() {
                let Some(msg) = event_to_msg(event) else {
                    continue;
                };
                if inbox.send(Inbox::Msg(msg)).is_err() {
                    break;
                }
            }
            chat_debug!("Engine event loop finished");
        });
    }
}

fn credentials_for(request: AuthRequest) -> Credentials {
    match request {
        AuthRequest::SignIn { login, password } => Credentials::SignIn { login, password },
        AuthRequest::Register {
            username,
            email,
            password,
        } => Credentials::SignUp {
            username,
            email,
            password,
        },
    }
}

fn event_to_msg(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::AnswerReady { request_id, result } => Some(Msg::AnswerReceived {
            request_id,
            result: result.map_err(|err| to_failure(request_id, err)),
        }),
        EngineEvent::UploadDone { request_id, result } => Some(Msg::UploadFinished {
            request_id,
            result: result.map_err(|err| to_failure(request_id, err)),
        }),
        EngineEvent::AuthDone { request_id, result } => Some(Msg::AuthFinished {
            request_id,
            result: result
                .map(AuthToken::new)
                .map_err(|err| to_failure(request_id, err)),
        }),
        EngineEvent::WakeDone { result } => {
            match result {
                Ok(()) => chat_debug!("Backend is awake"),
                Err(err) => chat_warn!("Warm-up ping failed: {}", err),
            }
            None
        }
    }
}

fn to_failure(request_id: u64, err: ApiError) -> RequestFailure {
    chat_warn!("Request {} failed: {}", request_id, err);
    match err.kind {
        FailureKind::HttpStatus { error, .. } => RequestFailure::Rejected { error },
        _ => RequestFailure::Transport {
            message: Some(err.message),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn api_error(kind: FailureKind, message: &str) -> ApiError {
        ApiError {
            kind,
            message: message.to_string(),
        }
    }

    #[test]
    fn http_rejections_carry_the_error_field() {
        let msg = event_to_msg(EngineEvent::AnswerReady {
            request_id: 4,
            result: Err(api_error(
                FailureKind::HttpStatus {
                    status: 500,
                    error: Some("dimensions mismatch".to_string()),
                },
                "server error",
            )),
        });
        assert_eq!(
            msg,
            Some(Msg::AnswerReceived {
                request_id: 4,
                result: Err(RequestFailure::Rejected {
                    error: Some("dimensions mismatch".to_string())
                }),
            })
        );
    }

    #[test]
    fn transport_failures_keep_the_message() {
        let msg = event_to_msg(EngineEvent::UploadDone {
            request_id: 2,
            result: Err(api_error(FailureKind::Timeout, "operation timed out")),
        });
        assert_eq!(
            msg,
            Some(Msg::UploadFinished {
                request_id: 2,
                result: Err(RequestFailure::Transport {
                    message: Some("operation timed out".to_string())
                }),
            })
        );
    }

    #[test]
    fn tokens_and_wake_replies() {
        assert_eq!(
            event_to_msg(EngineEvent::AuthDone {
                request_id: 9,
                result: Ok("jwt".to_string()),
            }),
            Some(Msg::AuthFinished {
                request_id: 9,
                result: Ok(AuthToken::new("jwt")),
            })
        );
        assert_eq!(event_to_msg(EngineEvent::WakeDone { result: Ok(()) }), None);
    }

    #[test]
    fn register_becomes_sign_up() {
        let credentials = credentials_for(AuthRequest::Register {
            username: "reader".to_string(),
            email: "r@example.com".to_string(),
            password: "pw".to_string(),
        });
        assert_eq!(
            credentials,
            Credentials::SignUp {
                username: "reader".to_string(),
                email: "r@example.com".to_string(),
                password: "pw".to_string(),
            }
        );
    }
}
