//! SIWS Demo - headless Sign in with Solana walkthrough
//!
//! Runs the UI reconciler against an in-memory page, a simulated wallet and a
//! simulated SIWS state machine, printing the page after every step.
//!
//! # Usage
//!
//! ```bash
//! # Built-in scenario
//! siws-demo
//!
//! # Custom scenario, one step every 500ms, JSON frames
//! siws-demo --scenario flow.json --step-delay-ms 500 --json
//!
//! # Verbose logging
//! RUST_LOG=debug siws-demo
//! ```
//!
//! # Environment Variables
//!
//! - `SIWS_DEMO_SCENARIO`: scenario file
//! - `SIWS_UI_CONFIG`: UI configuration file
//! - `SIWS_UI_*`: label and truncation overrides (see `siws_ui_core::config`)
//! - `RUST_LOG`: log level (trace, debug, info, warn, error)

mod demo;
mod scenario;
mod simulation;

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::info;

use demo::{Demo, Frame};
use scenario::{Scenario, Step};

/// Headless Sign in with Solana demo
#[derive(Parser, Debug)]
#[command(name = "siws-demo")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file (JSON); the built-in walkthrough runs when omitted
    #[arg(short = 's', long, env = "SIWS_DEMO_SCENARIO", value_name = "FILE")]
    scenario: Option<PathBuf>,

    /// UI configuration file (TOML)
    #[arg(short = 'c', long, env = "SIWS_UI_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pause between steps in milliseconds
    #[arg(long, default_value_t = 0)]
    step_delay_ms: u64,

    /// Print frames as JSON lines instead of text
    #[arg(long)]
    json: bool,
}

fn print_frame(out: &mut impl Write, frame: &Frame, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(frame)?)?;
    } else {
        writeln!(out, "── {} ──", frame.cause)?;
        write!(out, "{}", siws_ui_core::render_elements(&frame.elements))?;
    }
    Ok(())
}

/// Feed steps into the channel, paced by `delay`
async fn produce_steps(steps: Vec<Step>, delay: Duration, tx: mpsc::Sender<Step>) {
    let mut pacing = (!delay.is_zero()).then(|| tokio::time::interval(delay));
    for step in steps {
        if let Some(interval) = pacing.as_mut() {
            interval.tick().await;
        }
        if tx.send(step).await.is_err() {
            break;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("siws_demo=info".parse()?)
                .add_directive("siws_ui_core=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => siws_ui_core::load_config_from_path(path)?,
        None => siws_ui_core::load_config()?,
    };
    let scenario = match &args.scenario {
        Some(path) => Scenario::from_path(path)?,
        None => Scenario::default(),
    };
    info!(steps = scenario.steps.len(), "Starting SIWS demo");

    let demo = Demo::new(&config).context("Failed to start the UI")?;

    let (tx, mut rx) = mpsc::channel::<Step>(16);
    let producer = tokio::spawn(produce_steps(
        scenario.steps,
        Duration::from_millis(args.step_delay_ms),
        tx,
    ));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    print_frame(&mut out, &demo.frame("start"), args.json)?;

    // Steps are handled one at a time on this thread; a step and the SIWS
    // stages it triggers finish before the next step is received.
    while let Some(step) = rx.recv().await {
        for frame in demo.apply(&step) {
            print_frame(&mut out, &frame, args.json)?;
        }
    }

    producer.await.context("Scenario producer panicked")?;
    info!("Demo finished");
    Ok(())
}
