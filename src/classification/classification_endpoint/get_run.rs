use crate::classification::classification_endpoint::Endpoint;

/// Endpoint for retrieving a single run.
pub struct GetRun {
    pub run_id: String,
}

impl Endpoint for GetRun {
    /// HTTP method used (GET).
    fn method(&self) -> &str {
        "GET"
    }

    /// API path for retrieving a run.
    fn endpoint(&self) -> String {
        format!("/runs/{}", self.run_id)
    }
}
