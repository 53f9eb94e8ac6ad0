use crate::classification::classification_endpoint::Endpoint;

/// Endpoint for listing available classification models.
pub struct GetModels;

impl Endpoint for GetModels {
    /// HTTP method used (GET).
    fn method(&self) -> &str {
        "GET"
    }

    /// API path for listing models.
    fn endpoint(&self) -> String {
        "/models".to_string()
    }
}
