//! Binary entry point for `helpdesk-bot`.
//!
//! This module provides the command-line interface for helpdesk-bot with options
//! for configuration file paths, logging verbosity, and trace export. It
//! initializes the necessary components and starts the service.

use clap::Parser;
use helpdesk_bot::base::{config::Config, types::Void};
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, WithExportConfig};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};

/// Helpdesk-bot: a Slack support assistant backed by Gemini and MantisBT.
///
/// Configuration can come from `config.toml`, a `.env` file, or environment
/// variables. Every message in the channels the bot is in gets an answer from
/// Gemini, unless it asks to "create ticket", in which case a MantisBT ticket
/// is opened instead.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Override the config file path (optional).
    ///
    /// By default, the bot will look for a config file at `.hidden/config.toml`
    /// in the current directory.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
    /// Increase log verbosity (-v, -vv, etc.).
    ///
    /// Use multiple times to increase verbosity:
    /// - No flag: INFO level
    /// - -v: DEBUG level
    /// - -vv or more: TRACE level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Export spans to an OTLP/HTTP collector.
    ///
    /// The endpoint is taken from the standard `OTEL_EXPORTER_OTLP_*`
    /// environment variables.
    #[arg(long)]
    otlp: bool,
}

/// Main entry point for the helpdesk-bot binary.
///
/// Sets up logging based on verbosity, loads configuration, and starts the bot.
#[tokio::main]
async fn main() -> Void {
    let args = Args::parse();

    // Pull a local `.env` into the environment, if there is one.

    dotenvy::dotenv().ok();

    // Construct the level filter.

    let level = match args.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let level_filter = tracing_subscriber::filter::LevelFilter::from_level(level);

    // Prepare the log layer.

    let stdout = tracing_subscriber::fmt::layer()
        .with_ansi(true)
        .with_level(true)
        .with_file(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    // Prepare the otlp layer, if requested.

    let otel = if args.otlp {
        let exporter = opentelemetry_otlp::SpanExporter::builder().with_http().with_protocol(Protocol::HttpBinary).build()?;
        let tracer = opentelemetry_sdk::trace::SdkTracerProvider::builder().with_simple_exporter(exporter).build().tracer("helpdesk-bot");

        Some(tracing_opentelemetry::layer().with_tracer(tracer))
    } else {
        None
    };

    tracing_subscriber::registry().with(otel).with(level_filter).with(stdout).init();

    // A missing or invalid setting stops the process here.

    let config = Config::load(args.config.as_deref()).inspect_err(|e| tracing::error!("Invalid configuration: {:#}", e))?;

    helpdesk_bot::start(config).await
}
