use std::{io, process, sync::Arc};

use postboard::{
    application::{
        error::AppError,
        posts::{FetchSettings, PostService},
    },
    config::{self, Command, FetchArgs, SessionSettings, Settings, ShellArgs},
    infra::{error::InfraError, http::HttpPostGateway, telemetry},
    presentation::{
        shell::{SessionCommand, Shell, ShellError},
        views::{render_document, render_text},
    },
};
use tokio::io::BufReader;
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(error.exit_code());
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    telemetry::init(&settings.logging)?;

    let service = build_service(&settings)?;
    let command = cli_args
        .command
        .unwrap_or(Command::Shell(ShellArgs::default()));

    match command {
        Command::Shell(_) => run_shell(service, &settings.session).await,
        Command::Fetch(args) => run_fetch(service, args).await,
    }
}

fn build_service(settings: &Settings) -> Result<PostService, AppError> {
    let gateway = HttpPostGateway::new(
        settings.api.base_url.clone(),
        settings.api.request_timeout,
    )?;
    info!(base_url = %gateway.base(), "posts service configured");
    Ok(PostService::new(
        Arc::new(gateway),
        FetchSettings::from(&settings.api),
    ))
}

async fn run_shell(service: PostService, session: &SessionSettings) -> Result<(), AppError> {
    let mut shell = Shell::new(service, io::stdout());
    shell.greet()?;
    if session.initial_fetch {
        shell
            .execute(SessionCommand::Fetch {
                count: session.initial_count,
            })
            .await?;
    }
    shell.run(BufReader::new(tokio::io::stdin())).await?;
    Ok(())
}

async fn run_fetch(service: PostService, args: FetchArgs) -> Result<(), AppError> {
    let notice = service.fetch_batch(args.count).await?;
    let session = service.snapshot();
    println!("{notice}");
    print!("{}", render_text(&session));

    if let Some(path) = args.html {
        let document = render_document(&session.view).map_err(ShellError::from)?;
        tokio::fs::write(&path, document)
            .await
            .map_err(|err| InfraError::write_document(&path, err))?;
        println!("Wrote {}.", path.display());
    }
    Ok(())
}
