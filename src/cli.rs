use crate::auth::AccessTokenProvider;
use crate::classification::classification_model::model_info::ModelInfo;
use crate::classification::classification_model::run_create::RunCreate;
use crate::classification::classification_model::run_status::RunStatus;
use crate::classification::client::ClassificationClient;
use crate::classification::watch::watch_run;
use crate::constant::log::*;
use crate::default_config;
use crate::ecl_error::EclError;
use crate::pretty_log::{colored_println, ThemeColor};
use formatx::formatx;
use std::io::Write;
use std::time::Duration;

/// Receives the downloaded classification results for post-processing.
///
/// Handling may take arbitrarily long; the run is only cleaned up after
/// the handler returns.
#[async_trait::async_trait]
pub trait ResultHandler: Send {
    async fn handle(&mut self, results: &str) -> Result<(), EclError>;
}

/// Handler that reports the payload on the console and drops it.
pub struct ConsoleResultHandler;

#[async_trait::async_trait]
impl ResultHandler for ConsoleResultHandler {
    async fn handle(&mut self, results: &str) -> Result<(), EclError> {
        let mut stdout = std::io::stdout();

        colored_println(&mut stdout, ThemeColor::Main, HANDLE_RESULTS_STARTED);
        colored_println(
            &mut stdout,
            ThemeColor::Second,
            &formatx!(
                HANDLE_RESULTS_SUMMARY,
                results.len(),
                default_config::RESULT_ARTIFACT_NAME
            )
            .unwrap_or_default(),
        );
        colored_println(&mut stdout, ThemeColor::Main, HANDLE_RESULTS_FINISHED);

        Ok(())
    }
}

/// # cli do classify
///
/// Run one classification end to end: pick the newest model, create a run
/// for the dataset and change set, watch it until it settles or the wait
/// budget runs out, then fetch the results and clean up.
///
/// A run that did not finish in time is cancelled and deleted, which is
/// not an error. A finished run has its results listed, the result
/// artifact downloaded and handed to `handler`, and is then deleted
/// unless `delete_run_on_exit` says otherwise.
///
/// Contains console output.
pub async fn cli_do_classify<W: Write>(
    stdout: &mut W,
    client: &ClassificationClient,
    auth: &dyn AccessTokenProvider,
    dataset_id: &str,
    change_set_id: &str,
    interval: Duration,
    wait_for: Duration,
    delete_run_on_exit: bool,
    handler: &mut dyn ResultHandler,
) -> Result<(), EclError> {
    let token = auth.access_token().await?;
    let models = client.get_models(&token).await?;
    let model = ModelInfo::pick_newest(&models).ok_or(EclError::NoModelsAvailable)?;

    colored_println(
        stdout,
        ThemeColor::Main,
        &formatx!(SELECTING_MODEL_VERSION, &model.version).unwrap_or_default(),
    );

    let token = auth.access_token().await?;
    let run = client
        .create_run(
            &token,
            RunCreate {
                dataset_id: dataset_id.to_string(),
                change_set_id: change_set_id.to_string(),
                model_version: model.version.clone(),
            },
        )
        .await?;

    colored_println(
        stdout,
        ThemeColor::Main,
        &formatx!(RUN_CREATED, &run.id).unwrap_or_default(),
    );

    let status = watch_run(stdout, client, auth, &run.id, run.status, interval, wait_for).await?;

    if status != RunStatus::Finished {
        colored_println(stdout, ThemeColor::Warn, RUN_NOT_FINISHED_IN_TIME);

        let token = auth.access_token().await?;
        client.cancel_run(&token, &run.id).await?;
        colored_println(stdout, ThemeColor::Warn, RUN_CANCELED);

        let token = auth.access_token().await?;
        client.delete_run(&token, &run.id).await?;
        colored_println(stdout, ThemeColor::Warn, RUN_DELETED);

        return Ok(());
    }

    let token = auth.access_token().await?;
    let results = client.get_run_results(&token, &run.id).await?;

    for result in &results {
        colored_println(
            stdout,
            ThemeColor::Success,
            &formatx!(FOUND_RESULT, &result.name).unwrap_or_default(),
        );
    }

    let token = auth.access_token().await?;
    let payload = client
        .download_run_result(&token, &run.id, default_config::RESULT_ARTIFACT_NAME)
        .await?
        .ok_or_else(|| EclError::MissingResultPayload {
            run_id: run.id.clone(),
            name: default_config::RESULT_ARTIFACT_NAME.to_string(),
        })?;

    handler.handle(&payload).await?;

    if delete_run_on_exit {
        let token = auth.access_token().await?;
        client.delete_run(&token, &run.id).await?;
        colored_println(stdout, ThemeColor::Warn, RUN_DELETED);
    } else {
        colored_println(
            stdout,
            ThemeColor::Main,
            &formatx!(RUN_KEPT, &run.id).unwrap_or_default(),
        );
    }

    Ok(())
}

/// # cli do history
///
/// List the runs recorded for a project, one line per run, and return.
///
/// Contains console output.
pub async fn cli_do_history<W: Write>(
    stdout: &mut W,
    client: &ClassificationClient,
    auth: &dyn AccessTokenProvider,
    project_id: &str,
) -> Result<(), EclError> {
    let token = auth.access_token().await?;
    let runs = client.get_runs(&token, project_id).await?;

    for run in &runs {
        colored_println(
            stdout,
            ThemeColor::Main,
            &formatx!(FOUND_RUN_IN_PROJECT, &run.id, run.status).unwrap_or_default(),
        );
    }

    Ok(())
}
