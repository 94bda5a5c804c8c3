use std::{
    io::{self, Write},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui_core::{
    load_settings, AppController, ClientError, DataServices, MatchPolicy, RestDataClient,
    SelectJobRequest, SidenavListService, StaticDataService,
};

mod render;

#[derive(Parser, Debug)]
#[command(name = "console", about = "Browse stream-processing jobs, topics and processors")]
struct Args {
    /// Settings file; defaults to ./console.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    api_url: Option<String>,
    /// Serve the catalogue from a JSON snapshot instead of the REST api.
    #[arg(long, conflicts_with = "api_url")]
    fixture: Option<PathBuf>,
    #[arg(long)]
    match_policy: Option<MatchPolicy>,
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Jobs,
    Topics,
    Processors,
    Search { query: String },
    /// Select a job by position or exact name and show its streams.
    Select { target: String },
    Menu,
    NewJobTemplate,
}

fn select_request(target: &str) -> SelectJobRequest {
    match target.parse::<usize>() {
        Ok(index) => SelectJobRequest::ByIndex(index),
        Err(_) => SelectJobRequest::ByName(target.to_string()),
    }
}

fn load_failure_context(err: &ClientError) -> &'static str {
    if err.is_transient() {
        "job catalogue backend is unreachable or unavailable; retry later"
    } else {
        "failed to load job catalogue"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref()).context("failed to load settings")?;
    if let Some(url) = &args.api_url {
        settings.api_base_url = url.clone();
    }
    if let Some(policy) = args.match_policy {
        settings.match_policy = policy;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let services = match &args.fixture {
        Some(path) => DataServices::from_backend(Arc::new(
            StaticDataService::from_fixture(path)
                .await
                .context("failed to load fixture")?,
        )),
        None => {
            info!(api = %settings.api_base_url, "using rest data services");
            DataServices::from_backend(Arc::new(
                RestDataClient::from_settings(&settings).context("failed to build api client")?,
            ))
        }
    };

    let mut controller = AppController::load(
        services,
        Arc::new(SidenavListService::default()),
        &settings,
    )
    .await
    .map_err(|err| {
        let context = load_failure_context(&err);
        anyhow::Error::new(err).context(context)
    })?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&mut controller, args.command, args.json, &mut out)?;
    out.flush()?;
    Ok(())
}

fn run(
    controller: &mut AppController,
    command: Command,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Jobs => {
            if json {
                render::json(out, controller.jobs())?;
            } else {
                let jobs = controller.query_search_positions("");
                render::job_list(out, &jobs, controller.selected_job())?;
            }
        }
        Command::Topics => {
            if json {
                render::json(out, controller.topics())?;
            } else {
                render::topics(out, controller.topics())?;
            }
        }
        Command::Processors => {
            if json {
                render::json(out, controller.processors())?;
            } else {
                render::processors(out, controller.processors())?;
            }
        }
        Command::Search { query } => {
            controller.search_text_change(&query);
            if json {
                render::json(out, &controller.query_search(&query))?;
            } else {
                render::job_list(out, &controller.query_search_positions(&query), None)?;
            }
        }
        Command::Select { target } => {
            controller
                .select_job(select_request(&target))
                .with_context(|| format!("cannot select job '{target}'"))?;
            if json {
                render::json(out, &controller.selected_job())?;
            } else if let Some(job) = controller.selected_job() {
                render::job_detail(out, job, controller.selected_stream())?;
            }
        }
        Command::Menu => {
            if json {
                render::json(out, controller.menu_items())?;
            } else {
                render::menu(out, controller.menu_items())?;
            }
        }
        Command::NewJobTemplate => render::json(out, controller.new_job_template())?,
    }
    Ok(())
}
