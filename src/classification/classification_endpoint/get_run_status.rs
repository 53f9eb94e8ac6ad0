use crate::classification::classification_endpoint::Endpoint;

/// Endpoint for retrieving only the status of a run.
///
/// Cheaper than fetching the whole run while polling.
pub struct GetRunStatus {
    pub run_id: String,
}

impl Endpoint for GetRunStatus {
    /// HTTP method used (GET).
    fn method(&self) -> &str {
        "GET"
    }

    /// API path for retrieving a run status.
    fn endpoint(&self) -> String {
        format!("/runs/{}/status", self.run_id)
    }
}
