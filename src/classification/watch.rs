use crate::auth::{AccessTokenProvider, AuthError};
use crate::classification::client::{ApiError, ClassificationClient};
use crate::classification::classification_model::run_status::RunStatus;
use crate::constant::log::*;
use crate::pretty_log::{clean_one_line, colored_println, ThemeColor};
use chrono::Local;
use formatx::formatx;
use std::io::Write;
use std::time::{Duration, Instant};
use thiserror::Error;

/// # watch_run
///
/// Watch the status of a run by interval until it reaches a terminal value
/// or the wait budget runs out.
///
/// ### Arguments
///
/// * `stdout`:
/// * `client`:
/// * `auth`: token source, asked for a fresh token before every fetch.
/// * `run_id`:
/// * `status`: status already known to the caller, usually from run creation.
/// * `interval`: pause between two status fetches.
/// * `wait_for`: wall-clock budget. Checked after each fetch, so the watch
///   can overrun it by up to one interval.
///
/// ### Returns
///
/// The last observed status. Terminal when the run completed in time,
/// otherwise whatever the final fetch before the deadline yielded.
pub async fn watch_run<W: Write>(
    stdout: &mut W,
    client: &ClassificationClient,
    auth: &dyn AccessTokenProvider,
    run_id: &str,
    mut status: RunStatus,
    interval: Duration,
    wait_for: Duration,
) -> Result<RunStatus, EclWatchError> {
    let deadline = Instant::now() + wait_for;

    colored_println(
        stdout,
        ThemeColor::Warn,
        &formatx!(
            WATCHING_RUN_STATUS,
            status,
            Local::now().format("%Y-%m-%d %H:%M:%S")
        )
        .unwrap_or_default(),
    );

    while matches!(status, RunStatus::NotStarted | RunStatus::InProgress) {
        tokio::time::sleep(interval).await;

        let token = auth.access_token().await?;
        status = client.get_run_status(&token, run_id).await?;

        clean_one_line(stdout);
        colored_println(
            stdout,
            ThemeColor::Warn,
            &formatx!(
                WATCHING_RUN_STATUS,
                status,
                Local::now().format("%Y-%m-%d %H:%M:%S")
            )
            .unwrap_or_default(),
        );

        if Instant::now() > deadline {
            break;
        }
    }

    Ok(status)
}

#[derive(Error, Debug)]
pub enum EclWatchError {
    #[error(transparent)]
    ApiError(#[from] ApiError),

    #[error(transparent)]
    AuthError(#[from] AuthError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::testing::CountingTokenProvider;
    use crate::classification::client::ResponsePolicy;
    use crate::classification::transport::scripted::ScriptedTransport;
    use std::sync::Arc;

    const BASE: &str = "https://api.example.test";
    const RUN_ID: &str = "205f4f11";

    fn client_over(transport: Arc<ScriptedTransport>) -> ClassificationClient {
        ClassificationClient::with_transport(BASE, ResponsePolicy::EnforceSuccess, transport)
            .unwrap()
    }

    #[tokio::test]
    async fn test_watch_fetches_once_per_step_and_stops_on_terminal() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .reply(200, r#"{"status":"NotStarted"}"#)
                .reply(200, r#"{"status":"InProgress"}"#)
                .reply(200, r#"{"status":"InProgress"}"#)
                .reply(200, r#"{"status":"Finished"}"#),
        );
        let client = client_over(transport.clone());
        let auth = CountingTokenProvider::new();
        let mut out = Vec::new();

        let status = watch_run(
            &mut out,
            &client,
            &auth,
            RUN_ID,
            RunStatus::NotStarted,
            Duration::ZERO,
            Duration::from_secs(3600),
        )
        .await
        .unwrap();

        assert_eq!(status, RunStatus::Finished);
        assert_eq!(transport.request_count(), 4);
        assert!(transport
            .requests()
            .iter()
            .all(|r| r.url == "https://api.example.test/elementclassification/runs/205f4f11/status"));
    }

    #[tokio::test]
    async fn test_watch_asks_a_fresh_token_for_every_fetch() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .reply(200, r#"{"status":"InProgress"}"#)
                .reply(200, r#"{"status":"Finished"}"#),
        );
        let client = client_over(transport.clone());
        let auth = CountingTokenProvider::new();
        let mut out = Vec::new();

        watch_run(
            &mut out,
            &client,
            &auth,
            RUN_ID,
            RunStatus::InProgress,
            Duration::ZERO,
            Duration::from_secs(3600),
        )
        .await
        .unwrap();

        assert_eq!(auth.asked(), transport.request_count());
    }

    #[tokio::test]
    async fn test_watch_gives_up_after_the_wait_budget() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .reply(200, r#"{"status":"InProgress"}"#)
                .reply(200, r#"{"status":"InProgress"}"#)
                .reply(200, r#"{"status":"InProgress"}"#),
        );
        let client = client_over(transport.clone());
        let auth = CountingTokenProvider::new();
        let mut out = Vec::new();

        let status = watch_run(
            &mut out,
            &client,
            &auth,
            RUN_ID,
            RunStatus::InProgress,
            Duration::ZERO,
            Duration::ZERO,
        )
        .await
        .unwrap();

        assert_eq!(status, RunStatus::InProgress);
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_watch_returns_an_already_terminal_status_without_fetching() {
        let transport = Arc::new(ScriptedTransport::new());
        let client = client_over(transport.clone());
        let auth = CountingTokenProvider::new();
        let mut out = Vec::new();

        let status = watch_run(
            &mut out,
            &client,
            &auth,
            RUN_ID,
            RunStatus::Failed,
            Duration::ZERO,
            Duration::from_secs(3600),
        )
        .await
        .unwrap();

        assert_eq!(status, RunStatus::Failed);
        assert_eq!(transport.request_count(), 0);
        assert_eq!(auth.asked(), 0);
    }
}
