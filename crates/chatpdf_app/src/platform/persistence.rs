use std::path::PathBuf;

use chatpdf_core::AuthToken;
use chatpdf_engine::AtomicFileWriter;
use chatpdf_logging::{chat_error, chat_info, chat_warn};
use chrono::Utc;
use serde::{Deserialize, Serialize};

const SESSION_FILENAME: &str = ".chatpdf_session.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSession {
    token: String,
    saved_utc: String,
}

/// The one piece of client state that survives a restart: the session token.
#[derive(Debug, Clone)]
pub(crate) struct SessionStore {
    writer: AtomicFileWriter,
}

impl SessionStore {
    pub(crate) fn new(dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir),
        }
    }

    pub(crate) fn load(&self) -> Option<AuthToken> {
        let content = match self.writer.read(SESSION_FILENAME) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(err) => {
                chat_warn!(
                    "Failed to read saved session from {:?}: {}",
                    self.writer.dir(),
                    err
                );
                return None;
            }
        };

        let session: PersistedSession = match ron::from_str(&content) {
            Ok(session) => session,
            Err(err) => {
                chat_warn!("Failed to parse saved session: {}", err);
                return None;
            }
        };
        if session.token.is_empty() {
            return None;
        }

        chat_info!("Loaded session saved at {}", session.saved_utc);
        Some(AuthToken::new(session.token))
    }

    pub(crate) fn save(&self, token: &AuthToken) {
        let session = PersistedSession {
            token: token.as_str().to_string(),
            saved_utc: Utc::now().to_rfc3339(),
        };

        let pretty = ron::ser::PrettyConfig::new();
        let content = match ron::ser::to_string_pretty(&session, pretty) {
            Ok(text) => text,
            Err(err) => {
                chat_error!("Failed to serialize session: {}", err);
                return;
            }
        };

        if let Err(err) = self.writer.write(SESSION_FILENAME, &content) {
            chat_error!(
                "Failed to write session to {:?}: {}",
                self.writer.dir(),
                err
            );
        }
    }

    pub(crate) fn clear(&self) {
        if let Err(err) = self.writer.remove(SESSION_FILENAME) {
            chat_error!("Failed to remove saved session: {}", err);
        }
    }
}
