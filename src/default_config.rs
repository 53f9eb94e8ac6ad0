pub const ISSUER_URL: &str = "https://ims.elementclass.io";

pub const REDIRECT_URL: &str = "http://localhost:3000/signin-callback";

pub const API_URL: &str = "https://api.elementclass.io";

/// Service segment appended to the API base URL.
pub const SERVICE_ROUTE: &str = "/elementclassification";

/// Versioned media type the service expects on every call.
pub const ACCEPT_MEDIA_TYPE: &str = "application/vnd.elementclass.v1+json";

pub const SCOPES: &str = "elementclassification:read elementclassification:modify openid";

/// Seconds between two status fetches while watching a run.
pub const WATCH_INTERVAL: u64 = 5;

/// Remaining validity, in seconds, under which a token is refreshed
/// before use.
pub const TOKEN_FRESHNESS_MARGIN: u64 = 60;

/// Wait budget for a run in milliseconds. One hour.
pub const WAIT_FOR_MS: u64 = 3_600_000;

/// Name of the result artifact downloaded after a finished run.
pub const RESULT_ARTIFACT_NAME: &str = "ElementClassifications.json";
