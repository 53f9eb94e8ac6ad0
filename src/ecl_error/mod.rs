use crate::auth::AuthError;
use crate::classification::client::ApiError;
use crate::classification::watch::EclWatchError;
use crate::constant::log::*;
use crate::pretty_log::{colored_println, ThemeColor};
use formatx::formatx;
use std::fmt::Display;
use std::io::Write;

#[derive(Debug)]
pub enum EclError {
    Api(ApiError),
    Auth(AuthError),
    MissingResultPayload { run_id: String, name: String },
    NoModelsAvailable,
}

impl From<ApiError> for EclError {
    fn from(value: ApiError) -> Self {
        EclError::Api(value)
    }
}

impl From<AuthError> for EclError {
    fn from(value: AuthError) -> Self {
        EclError::Auth(value)
    }
}

impl From<EclWatchError> for EclError {
    fn from(value: EclWatchError) -> Self {
        match value {
            EclWatchError::ApiError(e) => EclError::Api(e),
            EclWatchError::AuthError(e) => EclError::Auth(e),
        }
    }
}

impl Display for EclError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            EclError::Api(err) => err.to_string(),
            EclError::Auth(err) => err.to_string(),
            EclError::MissingResultPayload { run_id, name } => {
                formatx!(ERR_MISSING_RESULT_PAYLOAD, name, run_id).unwrap_or_default()
            }
            EclError::NoModelsAvailable => ERR_NO_MODELS.to_string(),
        };
        write!(f, "{}", str)
    }
}

impl EclError {
    pub fn colored_println<W: Write>(&self, writer: &mut W) {
        colored_println(writer, ThemeColor::Error, self.to_string().as_str());
    }

    /// # exit_code
    ///
    /// Numeric process status for this failure. A reply with a non-success
    /// HTTP status surfaces that status; everything else falls back to -1.
    pub fn exit_code(&self) -> i32 {
        match self {
            EclError::Api(ApiError::Status { status, .. }) => *status as i32,
            _ => -1,
        }
    }
}
