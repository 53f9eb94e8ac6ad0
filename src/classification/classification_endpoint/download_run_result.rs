use crate::classification::classification_endpoint::Endpoint;

/// Endpoint for downloading one named result artifact of a run.
pub struct DownloadRunResult {
    pub run_id: String,

    /// Name of the artifact, as listed by the run results endpoint.
    pub result_name: String,
}

impl Endpoint for DownloadRunResult {
    /// HTTP method used (GET).
    fn method(&self) -> &str {
        "GET"
    }

    /// API path for downloading a result artifact.
    fn endpoint(&self) -> String {
        format!("/runs/{}/results/{}", self.run_id, self.result_name)
    }
}
