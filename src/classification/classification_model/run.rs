use crate::classification::classification_model::run_status::RunStatus;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub id: String,

    pub model_version: String,

    pub metadata: RunMetadata,

    #[serde(default, deserialize_with = "deserialize_run_status")]
    pub status: RunStatus,

    pub last_modified_date_time: DateTime<Utc>,

    #[serde(rename = "_links")]
    pub links: RunLinks,
}

fn deserialize_run_status<'de, D>(deserializer: D) -> Result<RunStatus, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<RunStatus>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RunMetadata {
    pub count_of_issues: u32,

    pub count_of_processed: u32,

    pub count_of_elements: u32,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RunLinks {
    pub workspace: Link,

    pub dataset: Link,

    pub change_set: Link,
}

#[derive(Deserialize, Debug)]
pub struct Link {
    pub href: String,
}

#[derive(Deserialize, Debug)]
pub struct RunResponse {
    pub run: Run,
}

#[derive(Deserialize, Debug)]
pub struct RunsResponse {
    pub runs: Vec<Run>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_run() {
        //region content
        let content = r###"{
  "run": {
    "id": "205f4f11-1a48-4b3a-a53b-1448e6e50e97",
    "modelVersion": "4.0",
    "metadata": {
      "countOfIssues": 75,
      "countOfProcessed": 3759,
      "countOfElements": 3781
    },
    "status": "Finished",
    "lastModifiedDateTime": "2024-11-05T09:41:52Z",
    "_links": {
      "workspace": {
        "href": "https://api.elementclass.io/workspaces/6959406f"
      },
      "dataset": {
        "href": "https://api.elementclass.io/datasets/0c0f7eb0"
      },
      "changeSet": {
        "href": "https://api.elementclass.io/datasets/0c0f7eb0/changesets/44"
      }
    }
  }
}
"###;
        //endregion

        let response = serde_json::from_str::<RunResponse>(content).unwrap();
        let run = response.run;

        assert_eq!(run.id, "205f4f11-1a48-4b3a-a53b-1448e6e50e97");
        assert_eq!(run.model_version, "4.0");
        assert_eq!(run.status, RunStatus::Finished);
        assert_eq!(run.metadata.count_of_issues, 75);
        assert_eq!(run.metadata.count_of_processed, 3759);
        assert_eq!(run.metadata.count_of_elements, 3781);
        assert_eq!(
            run.last_modified_date_time,
            "2024-11-05T09:41:52Z".parse::<DateTime<Utc>>().unwrap()
        );
        assert_eq!(
            run.links.change_set.href,
            "https://api.elementclass.io/datasets/0c0f7eb0/changesets/44"
        );
    }

    #[test]
    fn test_deserialize_run_with_null_status() {
        //region content
        let content = r###"{
  "runs": [
    {
      "id": "3a7d8f02-91b4-4c25-8c15-77aa90c2d8b1",
      "modelVersion": "3.2",
      "metadata": {
        "countOfIssues": 0,
        "countOfProcessed": 0,
        "countOfElements": 1204
      },
      "status": null,
      "lastModifiedDateTime": "2024-10-30T17:05:11Z",
      "_links": {
        "workspace": { "href": "https://api.elementclass.io/workspaces/6959406f" },
        "dataset": { "href": "https://api.elementclass.io/datasets/0c0f7eb0" },
        "changeSet": { "href": "https://api.elementclass.io/datasets/0c0f7eb0/changesets/41" }
      }
    }
  ]
}
"###;
        //endregion

        let response = serde_json::from_str::<RunsResponse>(content).unwrap();

        assert_eq!(response.runs.len(), 1);
        assert_eq!(response.runs[0].status, RunStatus::None);
    }
}
