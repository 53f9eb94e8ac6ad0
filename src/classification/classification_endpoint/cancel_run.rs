use crate::classification::classification_endpoint::Endpoint;

/// Endpoint for requesting cancellation of a run.
pub struct CancelRun {
    pub run_id: String,
}

impl Endpoint for CancelRun {
    /// HTTP method used (POST).
    fn method(&self) -> &str {
        "POST"
    }

    /// API path for cancelling a run.
    fn endpoint(&self) -> String {
        format!("/runs/{}/cancel", self.run_id)
    }
}
