use serde::Serialize;

/// Request body for creating a classification run.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RunCreate {
    pub dataset_id: String,

    pub change_set_id: String,

    pub model_version: String,
}
