use serde::Deserialize;
use strum_macros::Display;

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Default, Display)]
pub enum RunStatus {
    NotStarted,
    InProgress,
    Failed,
    Finished,
    Canceled,
    #[serde(other)]
    #[default]
    None,
}

impl RunStatus {
    /// Failed, Finished and Canceled runs never progress again.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Failed | RunStatus::Finished | RunStatus::Canceled
        )
    }
}

#[derive(Deserialize, Debug)]
pub struct StatusResponse {
    pub status: RunStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_run_status() {
        let status: RunStatus = serde_json::from_str(r#""InProgress""#).unwrap();
        assert_eq!(status, RunStatus::InProgress);

        let status: RunStatus = serde_json::from_str(r#""Finished""#).unwrap();
        assert_eq!(status, RunStatus::Finished);

        let response: StatusResponse =
            serde_json::from_str(r#"{"status":"NotStarted"}"#).unwrap();
        assert_eq!(response.status, RunStatus::NotStarted);
    }

    #[test]
    fn test_unknown_status_falls_back_to_none() {
        let status: RunStatus = serde_json::from_str(r#""SomethingNew""#).unwrap();
        assert_eq!(status, RunStatus::None);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(RunStatus::Failed.is_terminal());
        assert!(RunStatus::Finished.is_terminal());
        assert!(RunStatus::Canceled.is_terminal());

        assert!(!RunStatus::None.is_terminal());
        assert!(!RunStatus::NotStarted.is_terminal());
        assert!(!RunStatus::InProgress.is_terminal());
    }

    #[test]
    fn test_display_matches_wire_name() {
        assert_eq!(RunStatus::InProgress.to_string(), "InProgress");
        assert_eq!(RunStatus::Canceled.to_string(), "Canceled");
    }
}
