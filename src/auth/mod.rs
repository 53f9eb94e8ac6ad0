use crate::auth::pkce::{challenge_of, new_verifier, random_alphanumeric};
use crate::constant::log::*;
use crate::default_config::TOKEN_FRESHNESS_MARGIN;
use crate::pretty_log::{colored_println, ThemeColor};
use formatx::formatx;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::io::Write;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

pub mod pkce;

const STATE_LEN: usize = 32;

const PAGE_DONE: &str = "<html><body>Sign-in complete. You can close this window.</body></html>";
const PAGE_DENIED: &str = "<html><body>Sign-in was denied. You can close this window.</body></html>";
const PAGE_NOT_FOUND: &str = "<html><body>Not found.</body></html>";
const PAGE_BAD_REQUEST: &str = "<html><body>Malformed sign-in callback.</body></html>";

/// A source of bearer tokens for the classification service.
///
/// Asked before every remote call, so implementations decide for themselves
/// how much validity a returned token has left.
#[async_trait::async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, AuthError>;
}

/// # OidcTokenProvider
///
/// Token source backed by an OpenID Connect authorization code flow with
/// PKCE. Sign-in happens through the system browser against the issuer,
/// with the authorization code delivered to a local loopback listener.
pub struct OidcTokenProvider {
    http: Client,
    client_id: String,
    redirect_url: Url,
    scopes: String,
    authorization_endpoint: Url,
    token_endpoint: Url,
    session: Mutex<Option<Session>>,
}

struct Session {
    access_token: String,
    refresh_token: Option<String>,
    expires_at: Instant,
}

#[derive(Deserialize, Debug)]
struct ProviderMetadata {
    authorization_endpoint: String,
    token_endpoint: String,
}

#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: String,

    #[serde(default)]
    refresh_token: Option<String>,

    expires_in: u64,
}

struct Callback {
    code: String,
    state: String,
}

enum CallbackOutcome {
    /// A request for some other path, e.g. a browser probing for an icon.
    NotCallback,
    Accepted { code: String, state: String },
    Denied { description: String },
    Malformed,
}

impl OidcTokenProvider {
    /// # discover
    ///
    /// Resolve the issuer's authorization and token endpoints through its
    /// OpenID Connect discovery document and build a provider around them.
    pub async fn discover(
        client_id: &str,
        issuer_url: &str,
        redirect_url: &str,
        scopes: &str,
    ) -> Result<Self, AuthError> {
        let redirect = Url::parse(redirect_url)
            .map_err(|_| AuthError::InvalidRedirectUri(redirect_url.to_string()))?;
        if redirect.host_str().is_none() {
            return Err(AuthError::InvalidRedirectUri(redirect_url.to_string()));
        }

        let http = Client::new();
        let discovery_url = format!(
            "{}/.well-known/openid-configuration",
            issuer_url.trim_end_matches('/')
        );

        let resp = http.get(&discovery_url).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;

        if !(200..300).contains(&status) {
            return Err(AuthError::Endpoint { status, body });
        }

        let metadata: ProviderMetadata = serde_json::from_str(&body)?;

        Ok(Self {
            http,
            client_id: client_id.to_string(),
            redirect_url: redirect,
            scopes: scopes.to_string(),
            authorization_endpoint: Url::parse(&metadata.authorization_endpoint)
                .map_err(|_| AuthError::Metadata(metadata.authorization_endpoint.clone()))?,
            token_endpoint: Url::parse(&metadata.token_endpoint)
                .map_err(|_| AuthError::Metadata(metadata.token_endpoint.clone()))?,
            session: Mutex::new(None),
        })
    }

    /// # sign_in
    ///
    /// Run one interactive sign-in: print the authorization URL for the
    /// browser, wait for the loopback callback, exchange the authorization
    /// code for tokens and keep them for later calls.
    pub async fn sign_in<W: Write>(&self, stdout: &mut W) -> Result<(), AuthError> {
        let verifier = new_verifier();
        let challenge = challenge_of(&verifier);
        let state = random_alphanumeric(STATE_LEN);

        let mut authorize_url = self.authorization_endpoint.clone();
        authorize_url
            .query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", self.redirect_url.as_str())
            .append_pair("scope", &self.scopes)
            .append_pair("state", &state)
            .append_pair("code_challenge", &challenge)
            .append_pair("code_challenge_method", "S256");

        colored_println(stdout, ThemeColor::Main, HINT_SIGN_IN);
        colored_println(stdout, ThemeColor::Main, authorize_url.as_str());

        let callback = self.wait_for_callback(stdout).await?;

        if callback.state != state {
            return Err(AuthError::StateMismatch);
        }

        let token = self
            .request_token(&[
                ("grant_type", "authorization_code"),
                ("code", &callback.code),
                ("redirect_uri", self.redirect_url.as_str()),
                ("client_id", &self.client_id),
                ("code_verifier", &verifier),
            ])
            .await?;

        self.store(token).await;

        colored_println(stdout, ThemeColor::Success, SIGN_IN_COMPLETE);

        Ok(())
    }

    async fn wait_for_callback<W: Write>(&self, stdout: &mut W) -> Result<Callback, AuthError> {
        let addr = format!(
            "{}:{}",
            self.redirect_url.host_str().unwrap_or("localhost"),
            self.redirect_url.port_or_known_default().unwrap_or(80)
        );
        let listener = TcpListener::bind(&addr).await?;

        colored_println(
            stdout,
            ThemeColor::Second,
            &formatx!(HINT_SIGN_IN_WAITING, addr).unwrap_or_default(),
        );

        loop {
            let (stream, _) = listener.accept().await?;
            let mut reader = BufReader::new(stream);
            let mut request_line = String::new();
            reader.read_line(&mut request_line).await?;

            // Drain the header section before replying.
            let mut header_line = String::new();
            loop {
                header_line.clear();
                let read = reader.read_line(&mut header_line).await?;
                if read == 0 || header_line == "\r\n" || header_line == "\n" {
                    break;
                }
            }

            let target = match request_line.split_whitespace().nth(1) {
                Some(target) => target.to_string(),
                None => {
                    respond(reader.into_inner(), "400 Bad Request", PAGE_BAD_REQUEST).await?;
                    continue;
                }
            };

            match parse_callback_target(&target, self.redirect_url.path()) {
                CallbackOutcome::NotCallback => {
                    respond(reader.into_inner(), "404 Not Found", PAGE_NOT_FOUND).await?;
                }
                CallbackOutcome::Accepted { code, state } => {
                    respond(reader.into_inner(), "200 OK", PAGE_DONE).await?;
                    return Ok(Callback { code, state });
                }
                CallbackOutcome::Denied { description } => {
                    respond(reader.into_inner(), "200 OK", PAGE_DENIED).await?;
                    return Err(AuthError::AccessDenied(description));
                }
                CallbackOutcome::Malformed => {
                    respond(reader.into_inner(), "400 Bad Request", PAGE_BAD_REQUEST).await?;
                    return Err(AuthError::Callback(target));
                }
            }
        }
    }

    async fn request_token(&self, params: &[(&str, &str)]) -> Result<TokenResponse, AuthError> {
        let resp = self
            .http
            .post(self.token_endpoint.clone())
            .form(params)
            .send()
            .await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;

        if !(200..300).contains(&status) {
            return Err(AuthError::Endpoint { status, body });
        }

        serde_json::from_str(&body).map_err(AuthError::from)
    }

    async fn store(&self, token: TokenResponse) {
        let mut session = self.session.lock().await;

        *session = Some(Session {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        });
    }

    #[cfg(test)]
    fn with_session(session: Option<Session>) -> Self {
        Self {
            http: Client::new(),
            client_id: "test-client".to_string(),
            redirect_url: Url::parse("http://localhost:3000/signin-callback").unwrap(),
            scopes: "openid".to_string(),
            authorization_endpoint: Url::parse("https://ims.example.test/authorize").unwrap(),
            token_endpoint: Url::parse("https://ims.example.test/token").unwrap(),
            session: Mutex::new(session),
        }
    }
}

#[async_trait::async_trait]
impl AccessTokenProvider for OidcTokenProvider {
    /// A token with a freshness margin of validity left. When the current
    /// one is closer to expiry than that, it is refreshed through the
    /// identity provider first.
    async fn access_token(&self) -> Result<String, AuthError> {
        let mut session = self.session.lock().await;

        let current = session.as_ref().ok_or(AuthError::NotSignedIn)?;

        let margin = Duration::from_secs(TOKEN_FRESHNESS_MARGIN);
        if current.expires_at > Instant::now() + margin {
            return Ok(current.access_token.clone());
        }

        let Some(refresh_token) = current.refresh_token.clone() else {
            // Nothing to refresh with. Hand out the current token for the
            // rest of its lifetime.
            return Ok(current.access_token.clone());
        };

        let token = self
            .request_token(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", &refresh_token),
                ("client_id", &self.client_id),
            ])
            .await?;

        let access_token = token.access_token.clone();
        *session = Some(Session {
            access_token: token.access_token,
            refresh_token: token.refresh_token.or(Some(refresh_token)),
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        });

        Ok(access_token)
    }
}

fn parse_callback_target(target: &str, expected_path: &str) -> CallbackOutcome {
    let requested = match Url::parse(&format!("http://localhost{}", target)) {
        Ok(url) => url,
        Err(_) => return CallbackOutcome::NotCallback,
    };

    if requested.path() != expected_path {
        return CallbackOutcome::NotCallback;
    }

    let mut code = None;
    let mut state = None;
    let mut error = None;
    let mut error_description = None;

    for (key, value) in requested.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            "error_description" => error_description = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(error) = error {
        return CallbackOutcome::Denied {
            description: error_description.unwrap_or(error),
        };
    }

    match (code, state) {
        (Some(code), Some(state)) => CallbackOutcome::Accepted { code, state },
        _ => CallbackOutcome::Malformed,
    }
}

async fn respond(mut stream: TcpStream, status: &str, body: &str) -> Result<(), AuthError> {
    let reply = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    stream.write_all(reply.as_bytes()).await?;
    stream.shutdown().await?;

    Ok(())
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{msg} {status}: {body}", msg = ERR_AUTH_ENDPOINT)]
    Endpoint { status: u16, body: String },

    #[error("{msg} {0}", msg = ERR_AUTH_DECODE)]
    Decode(#[from] serde_json::Error),

    #[error("{msg} {0}", msg = ERR_AUTH_METADATA)]
    Metadata(String),

    #[error("{msg} {0}", msg = ERR_AUTH_CALLBACK)]
    Callback(String),

    #[error("{msg}", msg = ERR_AUTH_STATE_MISMATCH)]
    StateMismatch,

    #[error("{msg} {0}", msg = ERR_AUTH_DENIED)]
    AccessDenied(String),

    #[error("{msg}", msg = ERR_AUTH_NOT_SIGNED_IN)]
    NotSignedIn,

    #[error("{msg} {0}", msg = ERR_AUTH_REDIRECT)]
    InvalidRedirectUri(String),
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Token source handing out a distinct token per ask and counting the
    /// asks.
    pub(crate) struct CountingTokenProvider {
        asked: AtomicUsize,
    }

    impl CountingTokenProvider {
        pub(crate) fn new() -> Self {
            Self {
                asked: AtomicUsize::new(0),
            }
        }

        pub(crate) fn asked(&self) -> usize {
            self.asked.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl AccessTokenProvider for CountingTokenProvider {
        async fn access_token(&self) -> Result<String, AuthError> {
            let ask = self.asked.fetch_add(1, Ordering::SeqCst) + 1;

            Ok(format!("test-token-{}", ask))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_target_with_code_and_state_is_accepted() {
        let outcome = parse_callback_target(
            "/signin-callback?code=abc123&state=xyz789",
            "/signin-callback",
        );

        match outcome {
            CallbackOutcome::Accepted { code, state } => {
                assert_eq!(code, "abc123");
                assert_eq!(state, "xyz789");
            }
            _ => panic!("expected the callback to be accepted"),
        }
    }

    #[test]
    fn test_other_paths_are_not_treated_as_callbacks() {
        let outcome = parse_callback_target("/favicon.ico", "/signin-callback");

        assert!(matches!(outcome, CallbackOutcome::NotCallback));
    }

    #[test]
    fn test_denied_callback_carries_the_description() {
        let outcome = parse_callback_target(
            "/signin-callback?error=access_denied&error_description=User+canceled",
            "/signin-callback",
        );

        match outcome {
            CallbackOutcome::Denied { description } => {
                assert_eq!(description, "User canceled");
            }
            _ => panic!("expected the callback to be denied"),
        }
    }

    #[test]
    fn test_callback_without_state_is_malformed() {
        let outcome = parse_callback_target("/signin-callback?code=abc123", "/signin-callback");

        assert!(matches!(outcome, CallbackOutcome::Malformed));
    }

    #[tokio::test]
    async fn test_access_token_before_sign_in_is_refused() {
        let provider = OidcTokenProvider::with_session(None);

        let result = provider.access_token().await;

        assert!(matches!(result, Err(AuthError::NotSignedIn)));
    }

    #[tokio::test]
    async fn test_access_token_returns_a_fresh_session_token_unchanged() {
        let provider = OidcTokenProvider::with_session(Some(Session {
            access_token: "still-good".to_string(),
            refresh_token: Some("refresh".to_string()),
            expires_at: Instant::now() + Duration::from_secs(3600),
        }));

        let token = provider.access_token().await.unwrap();

        assert_eq!(token, "still-good");
    }

    #[tokio::test]
    async fn test_access_token_without_refresh_token_survives_the_margin() {
        let provider = OidcTokenProvider::with_session(Some(Session {
            access_token: "nearly-expired".to_string(),
            refresh_token: None,
            expires_at: Instant::now() + Duration::from_secs(5),
        }));

        let token = provider.access_token().await.unwrap();

        assert_eq!(token, "nearly-expired");
    }
}
