use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use x_search::cli::Cli;
use x_search::client::XaiClient;
use x_search::commands::Operation;
use x_search::config::{api_key_from_env, Config};
use x_search::report::TIMESTAMP_FORMAT;

async fn run(cli: Cli, operation: Operation) -> anyhow::Result<String> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(model) = cli.model {
        config.model = model;
    }
    let api_key = api_key_from_env()?;
    tracing::debug!(model = %config.model, base_url = %config.base_url, "config loaded");

    let client = XaiClient::new(api_key, &config);
    let stamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
    operation.run(&client, &stamp).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut cli = Cli::parse();
    let Some(command) = cli.command.take() else {
        let _ = Cli::command().print_help();
        return ExitCode::FAILURE;
    };

    // Bad input is reported before the credential is checked or anything is sent.
    let operation = match Operation::try_from(command) {
        Ok(operation) => operation,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(cli, operation).await {
        Ok(markdown) => {
            print!("{}", markdown);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
