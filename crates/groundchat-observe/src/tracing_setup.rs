//! Logging for the `groundchat` binary.
//!
//! Every chat turn runs inside a `turn` span carrying its `turn_id` and
//! `model`; state transitions are debug events inside it. With span close
//! events enabled, each turn logs its total duration when the span ends,
//! which is the only per-turn latency record the service keeps.
//!
//! Logs go to stderr so `groundchat ask --json` can keep stdout for events.
//!
//! ```no_run
//! let filter = groundchat_observe::tracing_setup::verbosity_filter(1, false);
//! groundchat_observe::tracing_setup::init_tracing(filter, false).unwrap();
//! ```

use std::sync::OnceLock;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Service and tracer name reported to OpenTelemetry.
pub const SERVICE_NAME: &str = "groundchat";

static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

/// Default filter for the CLI verbosity flags.
///
/// `-v` opens up the workspace crates (turn state transitions, scrape and
/// search outcomes) plus HTTP request spans; `-vv` logs everything.
pub fn verbosity_filter(verbose: u8, quiet: bool) -> &'static str {
    match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info,groundchat_core=debug,groundchat_infra=debug,groundchat_api=debug,tower_http=debug",
        _ => "trace",
    }
}

/// `RUST_LOG` when set, otherwise `default_filter`.
pub fn build_env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Install the global subscriber.
///
/// With `enable_otel`, turn spans are also exported through the stdout
/// span exporter under the `groundchat` service name.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(
    default_filter: &str,
    enable_otel: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    let env_filter = build_env_filter(default_filter);

    if enable_otel {
        let provider = SdkTracerProvider::builder()
            .with_resource(Resource::builder().with_service_name(SERVICE_NAME).build())
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .build();
        let otel_layer =
            tracing_opentelemetry::layer().with_tracer(provider.tracer(SERVICE_NAME));

        let _ = TRACER_PROVIDER.set(provider.clone());
        opentelemetry::global::set_tracer_provider(provider);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    tracing::debug!(otel = enable_otel, "tracing initialized");
    Ok(())
}

/// Flush exported turn spans. No-op when OpenTelemetry was not enabled.
pub fn shutdown_tracing() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            eprintln!("Warning: failed to flush exported spans: {e}");
        }
    }
}
