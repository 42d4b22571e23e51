//! roomstage - furnished room layout with constrained pointer dragging
//!
//! Headless runner: stages the room, loads assets, replays a pointer script
//! and reports the final layout.

mod config;
mod loader;
mod scripted_input;
mod session;

use anyhow::{Context, Result};
use clap::Parser;
use config::StageConfig;
use roomstage_testkit::{EventRecord, JsonlSink};
use scripted_input::PointerScript;
use session::StageSession;
use std::{fs, path::PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "roomstage",
    about = "Stage a furnished room and replay pointer drags against it"
)]
struct Args {
    /// Stage configuration (TOML).
    #[arg(long, default_value = config::DEFAULT_STAGE_PATH)]
    config: PathBuf,

    /// Fail instead of falling back to defaults when the config is invalid.
    #[arg(long)]
    strict: bool,

    /// Pointer script (JSON) to replay once assets are placed.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Where to write the JSONL event log.
    #[arg(long, default_value = "logs/roomstage-events.jsonl")]
    event_log: PathBuf,

    /// Shuffle load completion order with this seed.
    #[arg(long, value_name = "SEED")]
    shuffle_loads: Option<u64>,

    /// Write the final layout here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write the effective configuration to this path and exit.
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting roomstage v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = if args.strict {
        StageConfig::from_path(&args.config)?
    } else {
        StageConfig::load_from_path(&args.config)
    };

    if let Some(path) = &args.write_config {
        config
            .save_to_path(path)
            .with_context(|| format!("writing config to {}", path.display()))?;
        info!(path = %path.display(), "wrote stage config");
        return Ok(());
    }

    let mut session = StageSession::from_config(&config)?;
    let mut sink = JsonlSink::create(&args.event_log)
        .with_context(|| format!("creating event log {}", args.event_log.display()))?;

    loader::run_loads(
        session.load_requests(),
        &session.load_handle(),
        args.shuffle_loads,
    );
    let placed = session.frame();
    sink.write(&EventRecord {
        frame: session.frame_count(),
        kind: "frame",
        payload: &placed,
    })?;
    info!(placed = placed.len(), "initial layout complete");

    if let Some(path) = &args.script {
        let script = PointerScript::from_path(path)?;
        script.replay(&mut session, &mut sink)?;
        info!(steps = script.steps().len(), "pointer script replayed");
    }

    let layout = serde_json::to_string_pretty(&session.layout_snapshot())?;
    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, layout)
                .with_context(|| format!("writing layout to {}", path.display()))?;
        }
        None => println!("{layout}"),
    }
    Ok(())
}
