use crate::classification::classification_endpoint::Endpoint;
use crate::classification::classification_model::run_create::RunCreate;

/// Endpoint for creating a new classification run.
pub struct CreateRun {
    pub create: RunCreate,
}

impl Endpoint for CreateRun {
    /// HTTP method used (POST).
    fn method(&self) -> &str {
        "POST"
    }

    /// API path for creating a run. The trailing slash is part of the
    /// remote contract.
    fn endpoint(&self) -> String {
        "/runs/".to_string()
    }

    fn body(&self) -> Option<serde_json::Value> {
        serde_json::to_value(&self.create).ok()
    }
}
