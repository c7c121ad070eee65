use std::{io, path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    AnalysisClient, Form, FormField, HttpTransport, StaleResponsePolicy, SubmissionOutcome,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    task::JoinSet,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod interactive;
mod terminal;

use config::{load_settings, Settings};
use interactive::handle_line;
use terminal::TerminalSurface;

type Client = AnalysisClient<HttpTransport, TerminalSurface>;

#[derive(Parser, Debug)]
#[command(name = "analysis-terminal")]
struct Args {
    /// TOML settings file (defaults to ./analysis.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long)]
    ticker: Option<String>,
    #[arg(long)]
    start_date: Option<String>,
    #[arg(long)]
    end_date: Option<String>,
    /// Extra form field, repeatable.
    #[arg(long = "field", value_name = "NAME=VALUE")]
    fields: Vec<String>,
    #[arg(long)]
    discard_stale: bool,
    #[arg(long)]
    no_color: bool,
    /// Read one submission per stdin line (`name=value` pairs separated by spaces).
    #[arg(long)]
    interactive: bool,
}

impl Args {
    fn apply_to(&self, settings: &mut Settings) {
        if let Some(v) = &self.server_url {
            settings.server_url = v.clone();
        }
        if let Some(v) = &self.endpoint {
            settings.endpoint = v.clone();
        }
        if self.discard_stale {
            settings.discard_stale = true;
        }
        if self.no_color {
            settings.color = false;
        }
    }

    fn form(&self) -> Result<Form> {
        let mut form = Form::new();
        let named = [
            ("ticker", &self.ticker),
            ("start_date", &self.start_date),
            ("end_date", &self.end_date),
        ];
        for (name, value) in named {
            if let Some(value) = value {
                form.push(FormField::named(name, value.as_str()));
            }
        }
        for field in Form::parse_fields(&self.fields)?.fields() {
            form.push(field.clone());
        }
        Ok(form)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    args.apply_to(&mut settings);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let transport = HttpTransport::with_endpoint(&settings.server_url, &settings.endpoint)?;
    info!(endpoint = %transport.endpoint(), "analysis client ready");
    let policy = if settings.discard_stale {
        StaleResponsePolicy::DiscardStale
    } else {
        StaleResponsePolicy::ApplyAll
    };
    let client = Arc::new(
        AnalysisClient::new(transport, TerminalSurface::new(settings.color))
            .with_stale_policy(policy),
    );

    if args.interactive {
        run_interactive(client).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let outcome = client.submit(&args.form()?).await;
    draw(&client).await?;
    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn draw(client: &Client) -> Result<()> {
    client
        .with_surface(|surface| surface.draw(&mut io::stdout().lock()))
        .await
        .context("failed to write to stdout")
}

async fn run_interactive(client: Arc<Client>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight = JoinSet::new();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                handle_line(&client, &line, &mut in_flight).await;
            }
            Some(joined) = in_flight.join_next() => {
                finish(&client, joined.context("submission task panicked")?).await?;
            }
        }
    }

    while let Some(joined) = in_flight.join_next().await {
        finish(&client, joined.context("submission task panicked")?).await?;
    }
    Ok(())
}

async fn finish(client: &Client, outcome: SubmissionOutcome) -> Result<()> {
    if let SubmissionOutcome::Superseded { sequence } = outcome {
        info!(sequence, "response superseded by a newer submission");
        return Ok(());
    }
    draw(client).await
}
