use chrono::{DateTime, Utc};
use semver::Version;
use serde::Deserialize;
use std::cmp::Ordering;

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub version: String,

    pub last_modified_date_time: DateTime<Utc>,
}

#[derive(Deserialize, Debug)]
pub struct ModelsResponse {
    pub models: Vec<ModelInfo>,
}

impl ModelInfo {
    /// # pick_newest
    ///
    /// Select the model with the newest version.
    ///
    /// Version strings are compared as semantic versions, padded with zeros
    /// when they carry fewer than three components, so `10.0` outranks `2.0`.
    /// Versions that do not parse sort below any that do, falling back to
    /// string order among themselves.
    pub fn pick_newest(models: &[ModelInfo]) -> Option<&ModelInfo> {
        models
            .iter()
            .max_by(|a, b| compare_versions(&a.version, &b.version))
    }
}

fn compare_versions(a: &str, b: &str) -> Ordering {
    match (lenient_semver(a), lenient_semver(b)) {
        (Some(va), Some(vb)) => va.cmp(&vb),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.cmp(b),
    }
}

fn lenient_semver(version: &str) -> Option<Version> {
    let trimmed = version.trim();
    let padded = match trimmed.chars().filter(|c| *c == '.').count() {
        0 => format!("{}.0.0", trimmed),
        1 => format!("{}.0", trimmed),
        _ => trimmed.to_string(),
    };

    Version::parse(&padded).ok()
}
