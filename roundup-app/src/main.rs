use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, DigestArgs};
use roundup_common::observability::{LogConfig, init_logging};
use roundup_config::{RoundupConfig, RoundupConfigLoader};
use roundup_core::DigestOutcome;
use roundup_social::twitter::normalize_list_id;
use roundup_tui::{DigestForm, run_tui};
use tracing::{info, warn};

mod cli;
mod wiring;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Secrets referenced as ${VAR} in the YAML may live in .env.
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        return Err(e).context("failed to read .env");
    }

    let cfg: RoundupConfig = RoundupConfigLoader::new()
        .with_optional_file(&cli.config)
        .load()
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;

    let command = cli.command.unwrap_or(Command::Tui);
    let log_path = init_logging(LogConfig {
        app_name: "roundup",
        log_dir: cfg.logging.dir.clone(),
        emit_stderr: matches!(command, Command::Digest(_)),
        format: cfg.logging.format,
        default_filter: cfg.logging.filter.clone(),
    })?;
    info!(log = %log_path.display(), version = ?cfg.version, "roundup starting");

    match command {
        Command::Tui => run_interactive(&cfg).await,
        Command::Digest(args) => run_headless(&cfg, args).await,
    }
}

async fn run_interactive(cfg: &RoundupConfig) -> Result<()> {
    let deps = wiring::build_deps(cfg)?;
    let today = chrono::Local::now().date_naive();
    let form = DigestForm::new(today, cfg.digest.lookback_days);
    run_tui(deps, form).await
}

async fn run_headless(cfg: &RoundupConfig, args: DigestArgs) -> Result<()> {
    let list_id = normalize_list_id(&args.list)
        .with_context(|| format!("could not find a list id in {:?}", args.list))?;
    let today = chrono::Local::now().date_naive();
    let window = args.window(today, cfg.digest.lookback_days)?;

    let mut deps = wiring::build_deps(cfg)?;
    if let Some(top_k) = args.top_k {
        deps.pipeline = wiring::build_pipeline(top_k, cfg.digest.timeout_secs)?;
    }

    info!(
        %list_id,
        start = %window.start(),
        end = %window.end(),
        top_k = deps.pipeline.top_k(),
        "headless digest"
    );
    let outcome = deps
        .pipeline
        .digest_from_source(
            deps.source.as_ref(),
            &list_id,
            window.start(),
            window.end(),
            deps.summarizer.as_ref(),
        )
        .await
        .context("digest failed")?;

    match outcome {
        DigestOutcome::Digest(text) => println!("{text}"),
        DigestOutcome::NothingToSummarize => {
            warn!(%list_id, "no posts in window");
            println!("No posts found in the selected window");
        }
    }
    Ok(())
}
