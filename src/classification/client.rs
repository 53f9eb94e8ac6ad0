use crate::classification::classification_endpoint::cancel_run::CancelRun;
use crate::classification::classification_endpoint::create_run::CreateRun;
use crate::classification::classification_endpoint::delete_run::DeleteRun;
use crate::classification::classification_endpoint::download_run_result::DownloadRunResult;
use crate::classification::classification_endpoint::get_models::GetModels;
use crate::classification::classification_endpoint::get_run::GetRun;
use crate::classification::classification_endpoint::get_run_results::GetRunResults;
use crate::classification::classification_endpoint::get_run_status::GetRunStatus;
use crate::classification::classification_endpoint::get_runs::GetRuns;
use crate::classification::classification_endpoint::Endpoint;
use crate::classification::classification_model::model_info::{ModelInfo, ModelsResponse};
use crate::classification::classification_model::result_entry::{ResultEntry, ResultsResponse};
use crate::classification::classification_model::run::{Run, RunResponse, RunsResponse};
use crate::classification::classification_model::run_create::RunCreate;
use crate::classification::classification_model::run_status::{RunStatus, StatusResponse};
use crate::classification::transport::{AsyncTransport, HttpTransport, RawReply};
use crate::constant::log::*;
use crate::default_config::SERVICE_ROUTE;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;

/// How the client treats replies whose HTTP status is outside [200, 300).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ResponsePolicy {
    /// A non-success status becomes an error carrying the status code and
    /// the raw response body.
    #[default]
    EnforceSuccess,

    /// The body is decoded as received, whatever the status. Callers own
    /// the status interpretation.
    Passthrough,
}

/// Client facade for the element classification service.
///
/// One method per remote operation. The base URL is validated once at
/// construction; afterwards every call is a single request against it.
pub struct ClassificationClient {
    base: String,
    policy: ResponsePolicy,
    transport: Arc<dyn AsyncTransport>,
}

impl ClassificationClient {
    pub fn new(api_uri: &str, policy: ResponsePolicy) -> Result<Self, ApiError> {
        Self::with_transport(api_uri, policy, Arc::new(HttpTransport::new()))
    }

    pub fn with_transport(
        api_uri: &str,
        policy: ResponsePolicy,
        transport: Arc<dyn AsyncTransport>,
    ) -> Result<Self, ApiError> {
        Url::parse(api_uri).map_err(|e| ApiError::InvalidBaseUrl(format!("{} ({})", api_uri, e)))?;

        Ok(Self {
            base: format!("{}{}", api_uri.trim_end_matches('/'), SERVICE_ROUTE),
            policy,
            transport,
        })
    }

    pub async fn get_models(&self, token: &str) -> Result<Vec<ModelInfo>, ApiError> {
        let response: ModelsResponse = self.query(&GetModels, token).await?;

        Ok(response.models)
    }

    pub async fn get_runs(&self, token: &str, project_id: &str) -> Result<Vec<Run>, ApiError> {
        let response: RunsResponse = self
            .query(
                &GetRuns {
                    project_id: project_id.into(),
                },
                token,
            )
            .await?;

        Ok(response.runs)
    }

    pub async fn get_run(&self, token: &str, run_id: &str) -> Result<Run, ApiError> {
        let response: RunResponse = self
            .query(
                &GetRun {
                    run_id: run_id.into(),
                },
                token,
            )
            .await?;

        Ok(response.run)
    }

    pub async fn get_run_status(&self, token: &str, run_id: &str) -> Result<RunStatus, ApiError> {
        let response: StatusResponse = self
            .query(
                &GetRunStatus {
                    run_id: run_id.into(),
                },
                token,
            )
            .await?;

        Ok(response.status)
    }

    pub async fn get_run_results(
        &self,
        token: &str,
        run_id: &str,
    ) -> Result<Vec<ResultEntry>, ApiError> {
        let response: ResultsResponse = self
            .query(
                &GetRunResults {
                    run_id: run_id.into(),
                },
                token,
            )
            .await?;

        Ok(response.results)
    }

    /// # download_run_result
    ///
    /// Download one named result artifact of a run.
    ///
    /// ### Returns
    ///
    /// The raw text payload, or None when the reply carried no body.
    pub async fn download_run_result(
        &self,
        token: &str,
        run_id: &str,
        result_name: &str,
    ) -> Result<Option<String>, ApiError> {
        let reply = self
            .raw_query(
                &DownloadRunResult {
                    run_id: run_id.into(),
                    result_name: result_name.into(),
                },
                token,
            )
            .await?;

        if reply.body.is_empty() {
            Ok(None)
        } else {
            Ok(Some(reply.body))
        }
    }

    pub async fn create_run(&self, token: &str, create: RunCreate) -> Result<Run, ApiError> {
        let response: RunResponse = self.query(&CreateRun { create }, token).await?;

        Ok(response.run)
    }

    pub async fn cancel_run(&self, token: &str, run_id: &str) -> Result<Run, ApiError> {
        let response: RunResponse = self
            .query(
                &CancelRun {
                    run_id: run_id.into(),
                },
                token,
            )
            .await?;

        Ok(response.run)
    }

    pub async fn delete_run(&self, token: &str, run_id: &str) -> Result<(), ApiError> {
        self.raw_query(
            &DeleteRun {
                run_id: run_id.into(),
            },
            token,
        )
        .await
        .map(|_| ())
    }

    async fn query<T: DeserializeOwned>(
        &self,
        endpoint: &impl Endpoint,
        token: &str,
    ) -> Result<T, ApiError> {
        let reply = self.raw_query(endpoint, token).await?;

        serde_json::from_str(&reply.body).map_err(ApiError::from)
    }

    async fn raw_query(&self, endpoint: &impl Endpoint, token: &str) -> Result<RawReply, ApiError> {
        let url = format!("{}{}", self.base, endpoint.endpoint());
        let reply = self
            .transport
            .send(endpoint.method(), &url, token, endpoint.body().as_ref())
            .await?;

        if self.policy == ResponsePolicy::EnforceSuccess && !reply.is_success() {
            return Err(ApiError::Status {
                status: reply.status,
                body: reply.body,
            });
        }

        Ok(reply)
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{msg} {0}", msg = ERR_INVALID_API_BASE)]
    InvalidBaseUrl(String),

    #[error("{msg} {0}", msg = ERR_INVALID_METHOD)]
    InvalidMethod(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("{msg} {status}: {body}", msg = ERR_SERVICE_STATUS)]
    Status { status: u16, body: String },

    #[error("{msg} {0}", msg = ERR_DECODE_RESPONSE)]
    Decode(#[from] serde_json::Error),
}
