use crate::classification::client::ApiError;
use crate::default_config::ACCEPT_MEDIA_TYPE;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method};

/// Raw reply from the classification service, before any decoding.
#[derive(Debug, Clone)]
pub struct RawReply {
    pub status: u16,

    pub body: String,
}

impl RawReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait::async_trait]
pub trait AsyncTransport: Send + Sync {
    /// Sends one authenticated request and returns the raw reply.
    ///
    /// Transport failures are reported as errors. A reply with a non-success
    /// status is not an error at this layer.
    async fn send(
        &self,
        method: &str,
        url: &str,
        token: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<RawReply, ApiError>;
}

/// Transport backed by reqwest.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AsyncTransport for HttpTransport {
    async fn send(
        &self,
        method: &str,
        url: &str,
        token: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<RawReply, ApiError> {
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|_| ApiError::InvalidMethod(method.to_string()))?;

        let mut req = self
            .client
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(ACCEPT, ACCEPT_MEDIA_TYPE);

        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;

        Ok(RawReply { status, body })
    }
}

#[cfg(test)]
pub(crate) mod scripted {
    use super::*;
    use std::sync::Mutex;

    /// A transport that replays a scripted list of replies and records every
    /// request it was asked to send. Calls past the end of the script get an
    /// empty 200 reply.
    pub(crate) struct ScriptedTransport {
        replies: Mutex<Vec<RawReply>>,
        requests: Mutex<Vec<SentRequest>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct SentRequest {
        pub method: String,
        pub url: String,
        pub token: String,
        pub body: Option<serde_json::Value>,
    }

    impl ScriptedTransport {
        pub(crate) fn new() -> Self {
            Self {
                replies: Mutex::new(Vec::new()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn reply(self, status: u16, body: &str) -> Self {
            self.replies.lock().unwrap().push(RawReply {
                status,
                body: body.to_string(),
            });
            self
        }

        pub(crate) fn requests(&self) -> Vec<SentRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub(crate) fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait::async_trait]
    impl AsyncTransport for ScriptedTransport {
        async fn send(
            &self,
            method: &str,
            url: &str,
            token: &str,
            body: Option<&serde_json::Value>,
        ) -> Result<RawReply, ApiError> {
            self.requests.lock().unwrap().push(SentRequest {
                method: method.to_string(),
                url: url.to_string(),
                token: token.to_string(),
                body: body.cloned(),
            });

            let mut replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                return Ok(RawReply {
                    status: 200,
                    body: String::new(),
                });
            }

            Ok(replies.remove(0))
        }
    }
}
