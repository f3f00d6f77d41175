use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use thiserror::Error;

use crate::http_client::{HttpClient, HttpRequest};
use crate::ValidationError;

const SEND_TIMEOUT_MS: u64 = 15_000;
const DEFAULT_MAIL_ENDPOINT: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages/send";

/// A fully rendered digest ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestMessage {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub html_body: String,
}

impl DigestMessage {
    pub fn new(
        to: impl Into<String>,
        from: impl Into<String>,
        subject: impl Into<String>,
        html_body: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let to = to.into();
        let from = from.into();
        if to.trim().is_empty() {
            return Err(ValidationError::EmptyAddress { field: "to" });
        }
        if from.trim().is_empty() {
            return Err(ValidationError::EmptyAddress { field: "from" });
        }

        Ok(Self {
            to,
            from,
            subject: subject.into(),
            html_body: html_body.into(),
        })
    }
}

/// Delivery failed; surfaced as a boolean outcome on the run report, never
/// retried.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("mail transport error: {0}")]
    Transport(String),
    #[error("mail endpoint returned status {0}")]
    Status(u16),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Delivery boundary; authentication and transport details live behind it.
pub trait ReportTransport: Send + Sync {
    fn send<'a>(
        &'a self,
        message: &'a DigestMessage,
    ) -> Pin<Box<dyn Future<Output = Result<(), DispatchError>> + Send + 'a>>;
}

/// Mail-API transport: POSTs the base64url raw message with a ready-made
/// bearer token. Token acquisition is the provider client's problem, not
/// ours.
#[derive(Clone)]
pub struct MailApiTransport {
    http: Arc<dyn HttpClient>,
    access_token: String,
    endpoint: String,
}

impl MailApiTransport {
    pub fn new(http: Arc<dyn HttpClient>, access_token: impl Into<String>) -> Self {
        Self {
            http,
            access_token: access_token.into(),
            endpoint: String::from(DEFAULT_MAIL_ENDPOINT),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl ReportTransport for MailApiTransport {
    fn send<'a>(
        &'a self,
        message: &'a DigestMessage,
    ) -> Pin<Box<dyn Future<Output = Result<(), DispatchError>> + Send + 'a>> {
        Box::pin(async move {
            let raw = URL_SAFE.encode(build_mime(message));
            let body = serde_json::json!({ "raw": raw }).to_string();

            let request = HttpRequest::post(&self.endpoint)
                .with_header("authorization", format!("Bearer {}", self.access_token))
                .with_json_body(body)
                .with_timeout_ms(SEND_TIMEOUT_MS);

            let response = self
                .http
                .execute(request)
                .await
                .map_err(|error| DispatchError::Transport(error.message().to_owned()))?;

            if !response.is_success() {
                return Err(DispatchError::Status(response.status));
            }

            Ok(())
        })
    }
}

/// Writes the digest body to disk; backs `preview` and offline tests.
#[derive(Debug, Clone)]
pub struct FileTransport {
    path: PathBuf,
}

impl FileTransport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportTransport for FileTransport {
    fn send<'a>(
        &'a self,
        message: &'a DigestMessage,
    ) -> Pin<Box<dyn Future<Output = Result<(), DispatchError>> + Send + 'a>> {
        Box::pin(async move {
            std::fs::write(&self.path, &message.html_body)?;
            Ok(())
        })
    }
}

/// Swallows the message; used by dry runs.
#[derive(Debug, Default, Clone)]
pub struct NoopTransport;

impl ReportTransport for NoopTransport {
    fn send<'a>(
        &'a self,
        message: &'a DigestMessage,
    ) -> Pin<Box<dyn Future<Output = Result<(), DispatchError>> + Send + 'a>> {
        let _ = message;
        Box::pin(async move { Ok(()) })
    }
}

/// Minimal RFC 822 text/html message.
fn build_mime(message: &DigestMessage) -> String {
    format!(
        "To: {}\r\nFrom: {}\r\nSubject: {}\r\nMIME-Version: 1.0\r\nContent-Type: text/html; charset=UTF-8\r\n\r\n{}",
        message.to, message.from, message.subject, message.html_body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::{HttpError, HttpResponse};
    use std::sync::Mutex;

    #[derive(Debug)]
    struct RecordingHttpClient {
        response: Result<HttpResponse, HttpError>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl RecordingHttpClient {
        fn accepting() -> Arc<Self> {
            Arc::new(Self {
                response: Ok(HttpResponse::ok_json(r#"{"id":"msg-1"}"#)),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn rejecting(status: u16) -> Arc<Self> {
            Arc::new(Self {
                response: Ok(HttpResponse {
                    status,
                    body: String::new(),
                }),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn recorded_requests(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .clone()
        }
    }

    impl HttpClient for RecordingHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    fn message() -> DigestMessage {
        DigestMessage::new(
            "trader@example.test",
            "digest@example.test",
            "Daily digest",
            "<html><body>hello</body></html>",
        )
        .expect("test message is valid")
    }

    #[test]
    fn message_rejects_empty_addresses() {
        let err = DigestMessage::new("", "digest@example.test", "s", "b").expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyAddress { field: "to" }));

        let err = DigestMessage::new("a@example.test", " ", "s", "b").expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyAddress { field: "from" }));
    }

    #[test]
    fn mime_carries_headers_and_body() {
        let mime = build_mime(&message());
        assert!(mime.starts_with("To: trader@example.test\r\n"));
        assert!(mime.contains("Subject: Daily digest\r\n"));
        assert!(mime.contains("Content-Type: text/html; charset=UTF-8\r\n\r\n<html>"));
    }

    #[tokio::test]
    async fn mail_api_posts_encoded_message_with_bearer_token() {
        let client = RecordingHttpClient::accepting();
        let transport = MailApiTransport::new(client.clone(), "token-123")
            .with_endpoint("https://mail.example.test/send");

        transport.send(&message()).await.expect("send should succeed");

        let requests = client.recorded_requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.url, "https://mail.example.test/send");
        assert_eq!(
            request.headers.get("authorization").map(String::as_str),
            Some("Bearer token-123")
        );

        let body: serde_json::Value =
            serde_json::from_str(request.body.as_deref().expect("body present"))
                .expect("body is json");
        let raw = body["raw"].as_str().expect("raw field present");
        let decoded = URL_SAFE.decode(raw).expect("raw is base64url");
        let mime = String::from_utf8(decoded).expect("mime is utf-8");
        assert!(mime.contains("Subject: Daily digest"));
        assert!(mime.ends_with("<html><body>hello</body></html>"));
    }

    #[tokio::test]
    async fn mail_api_maps_rejection_status() {
        let client = RecordingHttpClient::rejecting(401);
        let transport = MailApiTransport::new(client, "expired-token");

        let error = transport.send(&message()).await.expect_err("must fail");
        assert!(matches!(error, DispatchError::Status(401)));
    }

    #[tokio::test]
    async fn file_transport_writes_digest_body() {
        let dir = tempfile::tempdir().expect("temp dir should create");
        let path = dir.path().join("digest.html");
        let transport = FileTransport::new(&path);

        transport.send(&message()).await.expect("write should succeed");

        let written = std::fs::read_to_string(&path).expect("file should exist");
        assert_eq!(written, "<html><body>hello</body></html>");
    }
}
