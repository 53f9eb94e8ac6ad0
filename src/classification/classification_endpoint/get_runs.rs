use crate::classification::classification_endpoint::Endpoint;

/// Endpoint for listing the runs of a project.
pub struct GetRuns {
    /// Identifier of the owning project.
    pub project_id: String,
}

impl Endpoint for GetRuns {
    /// HTTP method used (GET).
    fn method(&self) -> &str {
        "GET"
    }

    /// API path for listing runs.
    fn endpoint(&self) -> String {
        format!("/runs?projectId={}", self.project_id)
    }
}
