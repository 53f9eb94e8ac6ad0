pub mod cancel_run;
pub mod create_run;
pub mod delete_run;
pub mod download_run_result;
pub mod get_models;
pub mod get_run;
pub mod get_run_results;
pub mod get_run_status;
pub mod get_runs;

/// A single remote operation of the classification service.
pub trait Endpoint {
    /// HTTP method used.
    fn method(&self) -> &str;

    /// API path relative to the service base URL.
    fn endpoint(&self) -> String;

    /// JSON request body, if the operation carries one.
    fn body(&self) -> Option<serde_json::Value> {
        None
    }
}
