pub const ERR_INVALID_API_BASE: &str = "Invalid API base URL:";
pub const ERR_INVALID_METHOD: &str = "Unsupported HTTP method:";
pub const ERR_SERVICE_STATUS: &str = "The classification service responded";
pub const ERR_DECODE_RESPONSE: &str = "Failed to decode a classification service response:";
pub const ERR_NO_MODELS: &str = "The classification service reported no available models.";
pub const ERR_MISSING_RESULT_PAYLOAD: &str = "Result '{}' of run '{}' came back without a payload.";
pub const ERR_AUTH_ENDPOINT: &str = "The identity provider responded";
pub const ERR_AUTH_DECODE: &str = "Failed to decode an identity provider response:";
pub const ERR_AUTH_METADATA: &str = "Identity provider metadata is invalid:";
pub const ERR_AUTH_CALLBACK: &str = "Malformed sign-in callback:";
pub const ERR_AUTH_STATE_MISMATCH: &str =
    "Sign-in callback state does not match this sign-in attempt.";
pub const ERR_AUTH_DENIED: &str = "Sign-in was denied by the identity provider:";
pub const ERR_AUTH_NOT_SIGNED_IN: &str =
    "Not signed in. Sign in before calling the classification service.";
pub const ERR_AUTH_REDIRECT: &str = "Invalid redirect URL:";

pub const HINT_SIGN_IN: &str = "Open this URL in your browser to sign in:";
pub const HINT_SIGN_IN_WAITING: &str = "Waiting for the sign-in callback on {} ...";
pub const SIGN_IN_COMPLETE: &str = "Sign-in complete.";

pub const FOUND_RUN_IN_PROJECT: &str = "Found run in project. Run id - '{}'. Status - '{}'.";
pub const SELECTING_MODEL_VERSION: &str = "Selecting '{}' model version to run classification on.";
pub const RUN_CREATED: &str = "Run created. Run id - '{}'.";
pub const WATCHING_RUN_STATUS: &str = "Current run status - '{}'. ({})";
pub const RUN_NOT_FINISHED_IN_TIME: &str =
    "Run did not finish in time. Cancelling and deleting run.";
pub const RUN_CANCELED: &str = "Run canceled.";
pub const RUN_DELETED: &str = "Run deleted.";
pub const RUN_KEPT: &str = "Run kept. Run id - '{}'.";
pub const FOUND_RESULT: &str = "Found result! Name: '{}'";
pub const HANDLE_RESULTS_STARTED: &str = "Started handling classification results.";
pub const HANDLE_RESULTS_SUMMARY: &str = "Classification results: {} bytes of '{}'.";
pub const HANDLE_RESULTS_FINISHED: &str = "Finished handling classification results.";
