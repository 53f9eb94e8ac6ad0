mod auth;
mod classification;
mod cli;
mod constant;
mod default_config;
mod ecl_error;
mod pretty_log;

use crate::auth::OidcTokenProvider;
use crate::classification::client::{ClassificationClient, ResponsePolicy};
use crate::cli::ConsoleResultHandler;
use crate::ecl_error::EclError;
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::time::Duration;
use strum_macros::Display;

#[derive(Parser)]
#[command(name="Element Classification",
  author,
  version,
  about(env!("CARGO_PKG_DESCRIPTION")),
  long_about=None,
  arg_required_else_help=true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Connection settings shared by every command that talks to the service.
#[derive(Args)]
struct PlatformArgs {
    /// client id registered for this tool at the identity provider.
    #[arg(long)]
    client_id: String,

    /// token issuer URL.
    #[arg(long, default_value = default_config::ISSUER_URL)]
    issuer_uri: String,

    /// redirect URL the sign-in callback listens on.
    #[arg(long, default_value = default_config::REDIRECT_URL)]
    redirect_uri: String,

    /// classification service URL.
    #[arg(long, default_value = default_config::API_URL)]
    api_uri: String,

    /// scopes requested at sign-in.
    #[arg(long, default_value = default_config::SCOPES)]
    scopes: String,
}

#[derive(Subcommand, Display)]
enum Commands {
    /// Classify the elements of a dataset change set and fetch the results.
    Classify {
        /// dataset identity.
        #[arg(short = 'i', long)]
        dataset_id: String,

        /// change set identity.
        #[arg(short = 'c', long)]
        change_set_id: String,

        /// milliseconds to wait for the run before giving up.
        #[arg(short, long, default_value_t = default_config::WAIT_FOR_MS)]
        wait_for: u64,

        /// delete the run once its results are handled.
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        delete_run_on_exit: bool,

        #[command(flatten)]
        platform: PlatformArgs,
    },
    /// List the classification runs recorded for a project.
    History {
        /// project identity.
        #[arg(short, long)]
        project_id: String,

        #[command(flatten)]
        platform: PlatformArgs,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Some(command) = cli.command {
        let command_name = command.to_string();
        show_welcome(Some(command_name.as_str()));

        match main_cli(command).await {
            Ok(_) => {}
            Err(err) => {
                err.colored_println(&mut std::io::stderr());
                std::process::exit(err.exit_code());
            }
        }

        show_finished(Some(command_name.as_str()));
    }
}

async fn main_cli(command: Commands) -> Result<(), EclError> {
    let mut stdout = std::io::stdout();
    match command {
        Commands::Classify {
            dataset_id,
            change_set_id,
            wait_for,
            delete_run_on_exit,
            platform,
        } => {
            // ecl classify
            let (client, auth) = sign_in_platform(&mut stdout, platform).await?;

            let mut handler = ConsoleResultHandler;
            cli::cli_do_classify(
                &mut stdout,
                &client,
                &auth,
                &dataset_id,
                &change_set_id,
                Duration::from_secs(default_config::WATCH_INTERVAL),
                Duration::from_millis(wait_for),
                delete_run_on_exit,
                &mut handler,
            )
            .await?;
        }
        Commands::History {
            project_id,
            platform,
        } => {
            // ecl history
            let (client, auth) = sign_in_platform(&mut stdout, platform).await?;

            cli::cli_do_history(&mut stdout, &client, &auth, &project_id).await?;
        }
    }

    Ok(())
}

/// # sign in platform
///
/// Discover the identity provider named by `platform`, walk the browser
/// sign-in, and build a client for the classification service.
///
/// Contains console output.
async fn sign_in_platform<W: Write>(
    stdout: &mut W,
    platform: PlatformArgs,
) -> Result<(ClassificationClient, OidcTokenProvider), EclError> {
    let auth = OidcTokenProvider::discover(
        &platform.client_id,
        &platform.issuer_uri,
        &platform.redirect_uri,
        &platform.scopes,
    )
    .await?;
    auth.sign_in(stdout).await?;

    let client = ClassificationClient::new(&platform.api_uri, ResponsePolicy::default())?;

    Ok((client, auth))
}

fn show_welcome(title: Option<&str>) {
    let title = if let Some(t) = title {
        format!("| {}", t.to_uppercase())
    } else {
        String::new()
    };

    println!("::: Element Classification {} :::", title);
}

fn show_finished(title: Option<&str>) {
    let title = if let Some(t) = title {
        format!("| {}", t.to_uppercase())
    } else {
        String::new()
    };

    println!("::: All Finished {} :::", title);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_show_welcome() {
        show_welcome(Some("test"));
    }
}
