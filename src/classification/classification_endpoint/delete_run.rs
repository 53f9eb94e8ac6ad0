use crate::classification::classification_endpoint::Endpoint;

/// Endpoint for deleting a run entity.
pub struct DeleteRun {
    pub run_id: String,
}

impl Endpoint for DeleteRun {
    /// HTTP method used (DELETE).
    fn method(&self) -> &str {
        "DELETE"
    }

    /// API path for deleting a run.
    fn endpoint(&self) -> String {
        format!("/runs/{}", self.run_id)
    }
}
