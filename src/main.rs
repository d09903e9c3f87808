use std::sync::Arc;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use futures::stream;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hookstream::cli::{
    exit_code, parse_args, render_json, render_text, version_line, CliCommand, GenerateArgs,
    InputSource, USAGE,
};
use hookstream::client::GenerationClient;
use hookstream::config::SessionConfig;
use hookstream::error::ClientError;
use hookstream::models::GenerateRequest;
use hookstream::observer::TracingObserver;
use hookstream::session::{SessionOutcome, StreamSession};
use hookstream::sse::decode_transcript;
use hookstream::store::{JsonFileStore, ResultStore};

/// Resolves on Ctrl-C; the session then ends as incomplete.
async fn ctrl_c() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available: never cancel.
        std::future::pending::<()>().await;
    }
}

async fn run_session(args: &GenerateArgs, config: SessionConfig) -> Result<SessionOutcome> {
    let mut session = StreamSession::new(config).with_observer(Arc::new(TracingObserver));

    let outcome = match &args.source {
        InputSource::Replay(path) => {
            let transcript = tokio::fs::read_to_string(path)
                .await
                .wrap_err(format!("Failed to read transcript {:?}", path))?;
            let frames = decode_transcript(&transcript)
                .into_iter()
                .map(|frame| frame.map_err(ClientError::Frame));
            info!(path = %path.display(), "replaying transcript");
            session.run_with_cancel(stream::iter(frames), ctrl_c()).await?
        }
        InputSource::Prompt(prompt) => {
            let client = GenerationClient::new(&session.config().provider);
            let request =
                GenerateRequest::new(prompt.clone()).with_session_id(session.id().to_string());
            let frames = client
                .stream(&request)
                .await
                .wrap_err("Failed to start generation")?;
            session.run_with_cancel(frames, ctrl_c()).await?
        }
    };

    Ok(outcome)
}

async fn generate(args: GenerateArgs) -> Result<i32> {
    let config = SessionConfig::from_env().wrap_err("Invalid configuration")?;
    let outcome = run_session(&args, config).await?;

    let mut saved_id = None;
    if let (Some(dir), Some(result)) = (&args.save_dir, outcome.result()) {
        let store = JsonFileStore::new(dir);
        let id = store.save(result).await.wrap_err("Failed to save result")?;
        info!(%id, dir = %dir.display(), "result saved");
        saved_id = Some(id);
    }

    let rendered = if args.json {
        render_json(&outcome, saved_id)?
    } else {
        render_text(&outcome)?
    };
    println!("{}", rendered.trim_end());

    Ok(exit_code(&outcome))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Logs go to stderr; stdout carries results only.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hookstream=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let code = match parse_args(std::env::args()) {
        CliCommand::Version => {
            println!("{}", version_line());
            0
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            0
        }
        CliCommand::Invalid(reason) => {
            eprintln!("error: {}\n\n{}", reason, USAGE);
            64
        }
        CliCommand::Generate(args) => generate(args).await?,
    };

    std::process::exit(code)
}
