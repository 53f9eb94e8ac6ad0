use crate::classification::classification_endpoint::Endpoint;

/// Endpoint for listing the result artifacts of a finished run.
pub struct GetRunResults {
    pub run_id: String,
}

impl Endpoint for GetRunResults {
    /// HTTP method used (GET).
    fn method(&self) -> &str {
        "GET"
    }

    /// API path for listing run results.
    fn endpoint(&self) -> String {
        format!("/runs/{}/results", self.run_id)
    }
}
