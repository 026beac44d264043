// Intent probe
// Runs one message through the detector and prints the result as JSON.
//
// usage: intent-probe <MESSAGE> [CONTEXT] [--premium] [--calls N]

use anyhow::Context;
use clap::Parser;
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wellness_intent_core::{ConversationContextFull, DetectorConfig, IntentDetector};

/// Runs one message through the intent detector
#[derive(Parser, Debug)]
#[command(name = "intent-probe")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct ProbeArgs {
    /// Message to analyze
    pub message: String,

    /// Conversation context as a JSON file
    pub context: Option<PathBuf>,

    /// Treat the user as premium
    #[arg(long)]
    pub premium: bool,

    /// Re-ranking calls already made today
    #[arg(long, default_value_t = 0)]
    pub calls: u32,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var("INTENT_LOG_JSON").map(|v| v == "1").unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = ProbeArgs::parse();
    let config = DetectorConfig::from_env()?;
    info!(?config, "detector configuration loaded");

    let context = match &args.context {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("cannot read context file {}", path.display()))?;
            serde_json::from_str::<ConversationContextFull>(&raw)
                .with_context(|| format!("invalid context JSON in {}", path.display()))?
        }
        None => ConversationContextFull::default(),
    };

    let detector = IntentDetector::new(config);
    let result = detector.detect_intent(&args.message, &context, args.premium, args.calls);

    info!("{}", result.summary());
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
