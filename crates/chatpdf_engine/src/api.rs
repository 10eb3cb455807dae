use std::path::Path;
use std::time::Duration;

use chatpdf_logging::chat_debug;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    ApiError, AskRequest, AskResponse, Credentials, ErrorBody, FailureKind, SignInRequest,
    SignUpRequest, TokenResponse, WakeRequest,
};

pub const DEFAULT_BASE_URL: &str = "https://chatpdf-9g4j.onrender.com";
pub const WAKE_MESSAGE: &str = "waking the server to reduce cold start";

const SEND_PATH: &str = "/api/v1/send";
const UPLOAD_PATH: &str = "/api/v1/upload";
const SIGNUP_PATH: &str = "/api/v1/signup";
const SIGNIN_PATH: &str = "/api/v1/signin";
const WAKE_PATH: &str = "/z";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    /// The backend sleeps when idle; the first request after a cold start is slow.
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url"),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl ApiSettings {
    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        Ok(Self {
            base_url,
            ..Self::default()
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{path}"))
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

/// The backend operations the client uses.
#[async_trait::async_trait]
pub trait ChatApi: Send + Sync {
    async fn ask(
        &self,
        token: &str,
        question: &str,
        document_provided: bool,
    ) -> Result<String, ApiError>;

    async fn upload(&self, token: &str, path: &Path) -> Result<(), ApiError>;

    /// Returns the session token issued for `credentials`.
    async fn authenticate(&self, credentials: &Credentials) -> Result<String, ApiError>;

    async fn wake(&self) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestChatApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestChatApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }
}

#[async_trait::async_trait]
impl ChatApi for ReqwestChatApi {
    async fn ask(
        &self,
        token: &str,
        question: &str,
        document_provided: bool,
    ) -> Result<String, ApiError> {
        let body = AskRequest {
            question,
            no_doc: !document_provided,
        };
        let response = self
            .client
            .post(self.settings.endpoint(SEND_PATH)?)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let reply: AskResponse = decode_success(response).await?;
        Ok(reply.answer)
    }

    async fn upload(&self, token: &str, path: &Path) -> Result<(), ApiError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| ApiError::new(FailureKind::Io, format!("{}: {err}", path.display())))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        chat_debug!("Uploading {} ({} bytes)", file_name, bytes.len());

        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));
        let response = self
            .client
            .post(self.settings.endpoint(UPLOAD_PATH)?)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        ensure_success(response).await.map(drop)
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let request = match credentials {
            Credentials::SignIn { login, password } => self
                .client
                .post(self.settings.endpoint(SIGNIN_PATH)?)
                .json(&SignInRequest { login, password }),
            Credentials::SignUp {
                username,
                email,
                password,
            } => self
                .client
                .post(self.settings.endpoint(SIGNUP_PATH)?)
                .json(&SignUpRequest {
                    username,
                    email,
                    password,
                }),
        };
        let response = request.send().await.map_err(map_reqwest_error)?;

        let reply: TokenResponse = decode_success(response).await?;
        Ok(reply.token)
    }

    async fn wake(&self) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.settings.endpoint(WAKE_PATH)?)
            .json(&WakeRequest {
                message: WAKE_MESSAGE,
            })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        ensure_success(response).await.map(drop)
    }
}

/// Turns a non-2xx reply into `FailureKind::HttpStatus`, keeping the body's
/// `error` field when it can be read.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let error = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error);
    Err(ApiError::new(
        FailureKind::HttpStatus {
            status: status.as_u16(),
            error,
        },
        status.to_string(),
    ))
}

async fn decode_success<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    ensure_success(response)
        .await?
        .json::<T>()
        .await
        .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let settings = ApiSettings::with_base_url("http://localhost:8080/").unwrap();
        assert_eq!(
            settings.endpoint(SEND_PATH).unwrap().as_str(),
            "http://localhost:8080/api/v1/send"
        );

        let settings = ApiSettings::with_base_url("http://localhost:8080/proxy").unwrap();
        assert_eq!(
            settings.endpoint(WAKE_PATH).unwrap().as_str(),
            "http://localhost:8080/proxy/z"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = ApiSettings::with_base_url("not a url").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }

    #[test]
    fn ask_body_uses_inverted_wire_flag() {
        let body = serde_json::to_value(AskRequest {
            question: "q",
            no_doc: true,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "question": "q", "noDoc": true }));
    }
}
